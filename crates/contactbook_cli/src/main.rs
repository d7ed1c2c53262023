//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `contactbook_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use contactbook_core::{default_log_level, init_logging, ContactBook, SeedOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const LOG_DIR_NAME: &str = "contactbook-logs";

fn main() -> ExitCode {
    println!("contactbook_core version={}", contactbook_core::core_version());

    let log_dir = default_log_dir();
    if let Err(err) = init_cli_logging(&log_dir) {
        eprintln!("contactbook_core logging init failed: {err}");
        return ExitCode::FAILURE;
    }
    println!("contactbook_core log_dir={}", log_dir.display());

    let book = match ContactBook::with_sample_data(&SeedOptions::default()) {
        Ok(book) => book,
        Err(err) => {
            eprintln!("contactbook_core seed failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("contactbook_core customers={}", book.customers().count());
    if let Some(newest) = book.customers().find_all(None).first() {
        println!("contactbook_core newest={newest}");
    }
    ExitCode::SUCCESS
}

fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join(LOG_DIR_NAME)
}

fn init_cli_logging(log_dir: &Path) -> Result<(), String> {
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| format!("log dir `{}` is not valid UTF-8", log_dir.display()))?;
    init_logging(default_log_level(), log_dir)
}
