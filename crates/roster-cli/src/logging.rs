//! Logging setup
//!
//! Only initializes if the ROSTER_LOG environment variable is set; its value
//! is the level for both roster crates. Logs go to `config.log_file` when
//! set, otherwise to stderr.

use std::fs::OpenOptions;
use std::sync::Mutex;

use roster_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub fn init(config: &Config) {
    let Ok(log_level) = std::env::var("ROSTER_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!(
        "roster_core={},roster_cli={}",
        log_level, log_level
    ));

    match &config.log_file {
        Some(log_path) => {
            let log_file = match OpenOptions::new().create(true).append(true).open(log_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
                    return;
                }
            };

            // Ignore error if already initialized
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .try_init();

            info!("Logging initialized to {:?}", log_path);
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
