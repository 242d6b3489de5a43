//! Imported-document file counter.
//!
//! # Responsibility
//! - Count non-hidden files with a given extension in one directory.
//!
//! # Invariants
//! - Never returns an error: any enumeration failure counts as zero.
//!   A filesystem hiccup must not block quota computation or the reading
//!   experience built on top of it, so availability wins over accuracy
//!   here. Do not "fix" this into a fallible API.

use log::warn;
use std::path::Path;

/// Counts non-hidden regular files in `directory` whose extension
/// matches `extension` case-insensitively.
///
/// Missing directory, permission failure or unreadable entries all
/// degrade to a lower count, never to an error.
pub fn count_files(directory: &Path, extension: &str) -> usize {
    let entries = match std::fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(
                "event=file_probe module=quota status=degraded dir={} error={err}",
                directory.display()
            );
            return 0;
        }
    };

    entries
        .filter_map(Result::ok)
        .filter(|entry| {
            entry
                .file_type()
                .map(|file_type| file_type.is_file())
                .unwrap_or(false)
        })
        .filter(|entry| !is_hidden(&entry.file_name().to_string_lossy()))
        .filter(|entry| has_extension(&entry.path(), extension))
        .count()
}

fn is_hidden(file_name: &str) -> bool {
    file_name.starts_with('.')
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|value| value.to_str())
        .is_some_and(|value| value.eq_ignore_ascii_case(extension))
}
