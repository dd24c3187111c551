//! Target list initialization.

use std::collections::HashSet;

use anyhow::{Context, Result};
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::normalize_target;
use crate::config::Config;

/// Collects the run's targets: lines of `config.file` followed by each
/// `--target`, normalized, with blank lines, `#` comments, invalid entries,
/// and repeats dropped. First occurrence order is kept.
pub async fn read_targets(config: &Config) -> Result<Vec<String>> {
    let mut raw = Vec::new();

    if let Some(path) = &config.file {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;
        let mut lines = BufReader::new(file).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read line from input file")?
        {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            raw.push(trimmed.to_string());
        }
        info!("Read {} targets from {}", raw.len(), path.display());
    }
    raw.extend(config.targets.iter().cloned());

    let mut seen = HashSet::new();
    Ok(raw
        .iter()
        .filter_map(|line| normalize_target(line))
        .filter(|target| seen.insert(target.clone()))
        .collect())
}
