/// Append-only conversion log
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::games::converter::ConvertError;

pub const DEFAULT_HISTORY_FILE: &str = "conversion_history.txt";

/// Blank input falls back to the default file; `.txt` is appended when missing.
pub fn resolve_path(input: &str) -> PathBuf {
    let name = input.trim();
    if name.is_empty() {
        return PathBuf::from(DEFAULT_HISTORY_FILE);
    }
    if name.ends_with(".txt") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}.txt"))
    }
}

pub fn format_entry(at: &NaiveDateTime, text: &str) -> String {
    format!("{} - {}\n", at.format("%Y-%m-%d %H:%M:%S%.6f"), text)
}

pub fn append(path: &Path, text: &str) -> Result<(), ConvertError> {
    append_at(path, text, &Local::now().naive_local())
}

pub fn append_at(path: &Path, text: &str, at: &NaiveDateTime) -> Result<(), ConvertError> {
    let to_history_error = |source| ConvertError::History { path: path.to_path_buf(), source };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_history_error)?;
    file.write_all(format_entry(at, text).as_bytes())
        .map_err(to_history_error)?;

    debug!(path = %path.display(), "history entry appended");
    Ok(())
}
