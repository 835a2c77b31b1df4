use std::path::PathBuf;

use anyhow::Result;
use chatlog_config::Config;
use chatlog_security::{Redactor, Sanitizer};

pub fn handle(config: &Config, source: Option<PathBuf>, dest: Option<PathBuf>) -> Result<()> {
    let source = source.unwrap_or_else(|| config.sanitize.source.clone());
    let dest = dest.unwrap_or_else(|| config.sanitize.dest.clone());

    let sanitizer = Sanitizer::new(Redactor::new(config.sanitize.placeholder.clone()));
    let report = sanitizer.run(&source, &dest)?;

    let resolved = std::fs::canonicalize(&report.dest).unwrap_or_else(|_| report.dest.clone());
    println!("Masked logs written to: {}", resolved.display());
    println!(
        "  Written: {}  Skipped: {}  Failed: {}",
        report.written, report.skipped, report.failed
    );

    Ok(())
}
