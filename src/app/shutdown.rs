//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Stops the periodic progress logger and waits for it to exit.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    logging_task: Option<tokio::task::JoinHandle<()>>,
) {
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        let _ = logging_task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_stops_logging_task() {
        let cancel = CancellationToken::new();
        let child = cancel.child_token();
        let task = tokio::spawn(async move { child.cancelled().await });
        shutdown_gracefully(cancel.clone(), Some(task)).await;
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn test_shutdown_without_task() {
        shutdown_gracefully(CancellationToken::new(), None).await;
    }
}
