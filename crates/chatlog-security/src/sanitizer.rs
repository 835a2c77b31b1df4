//! Directory-level log sanitization

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chatlog_core::{Error, Result};
use walkdir::WalkDir;

use crate::Redactor;

/// Outcome of one sanitizer run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Files newly written to the destination tree
    pub written: usize,
    /// Files whose destination already existed
    pub skipped: usize,
    /// Files that could not be read or written
    pub failed: usize,
    pub dest: PathBuf,
}

/// Mirrors a tree of chat logs into a destination tree with every line masked.
///
/// Destination files that already exist are never touched, so re-running over
/// a growing source tree only processes new logs.
pub struct Sanitizer {
    redactor: Redactor,
}

impl Sanitizer {
    pub fn new(redactor: Redactor) -> Self {
        Self { redactor }
    }

    pub fn run(&self, source: &Path, dest: &Path) -> Result<SanitizeReport> {
        if !source.is_dir() {
            return Err(Error::SourceDirMissing(source.to_path_buf()));
        }

        fs::create_dir_all(dest)?;

        let mut report = SanitizeReport {
            dest: dest.to_path_buf(),
            ..Default::default()
        };

        // A destination nested in the source tree must not be read back as input.
        let nested_dest = fs::canonicalize(dest)?
            .strip_prefix(fs::canonicalize(source)?)
            .ok()
            .map(Path::to_path_buf);

        let mut files = Vec::new();
        let walker = WalkDir::new(source)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| match (&nested_dest, e.path().strip_prefix(source)) {
                (Some(nested), Ok(relative)) => !relative.starts_with(nested),
                _ => true,
            });
        for entry in walker {
            match entry {
                Ok(entry) if entry.path().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Failed to read source tree entry: {}", e);
                    report.failed += 1;
                }
            }
        }

        for path in files {
            let relative = path
                .strip_prefix(source)
                .map_err(|e| Error::Other(e.into()))?;
            let target = dest.join(relative);

            if target.exists() {
                tracing::debug!("Skipping {}: already sanitized", target.display());
                report.skipped += 1;
                continue;
            }

            match self.mirror_file(&path, &target) {
                Ok(lines) => {
                    tracing::info!("Masked {} ({} lines)", relative.display(), lines);
                    report.written += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to sanitize {}: {}", path.display(), e);
                    // Leave no partial output behind so the next run retries it.
                    if target.is_file() && fs::remove_file(&target).is_err() {
                        tracing::warn!("Could not remove partial {}", target.display());
                    }
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    fn mirror_file(&self, source: &Path, target: &Path) -> Result<usize> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        self.sanitize_file(source, target)
    }

    fn sanitize_file(&self, source: &Path, target: &Path) -> Result<usize> {
        let content = decode_dropping_invalid(&fs::read(source)?);

        let mut writer = BufWriter::new(fs::File::create(target)?);
        let mut lines = 0;
        for line in content.split_inclusive('\n') {
            writer.write_all(self.redactor.mask_line(line).as_bytes())?;
            lines += 1;
        }
        writer.flush()?;

        Ok(lines)
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(Redactor::default())
    }
}

/// Decode UTF-8, silently dropping invalid byte sequences.
fn decode_dropping_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
