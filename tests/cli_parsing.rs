//! Command-line parsing tests for `Config`.

use clap::Parser;

use dork_recon::{Config, LogFormat};

#[test]
fn test_minimal_invocation() {
    let config = Config::try_parse_from(["dork_recon", "targets.txt"]).expect("parse");
    assert_eq!(config.file.as_deref(), Some(std::path::Path::new("targets.txt")));
    assert!(config.targets.is_empty());
    assert!(config.categories.is_empty());
    assert_eq!(config.workers, 4);
}

#[test]
fn test_targets_and_categories() {
    let config = Config::try_parse_from([
        "dork_recon",
        "-t",
        "example.com",
        "--target",
        "example.org",
        "-c",
        "login_admin,config_files",
    ])
    .expect("parse");
    assert_eq!(config.file, None);
    assert_eq!(config.targets, vec!["example.com", "example.org"]);
    assert_eq!(config.categories, vec!["login_admin", "config_files"]);
}

#[test]
fn test_tuning_flags() {
    let config = Config::try_parse_from([
        "dork_recon",
        "-t",
        "example.com",
        "-w",
        "64",
        "--min-delay-secs",
        "6",
        "--max-delay-secs",
        "3",
        "--max-retries",
        "0",
        "--no-probe",
        "--log-format",
        "json",
    ])
    .expect("parse");
    assert!(config.no_probe);
    assert!(matches!(config.log_format, LogFormat::Json));

    let backend = config.backend_config();
    assert_eq!(backend.worker_count, 32);
    assert_eq!(backend.max_retries, 1);
    assert!(backend.max_delay >= backend.min_delay);
}

#[test]
fn test_unknown_flag_rejected() {
    assert!(Config::try_parse_from(["dork_recon", "--frobnicate"]).is_err());
}
