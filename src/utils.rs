use crate::output::OutputFormat;
use chrono::{DateTime, Local};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\:?*&=#%"<>|\s]+"#).unwrap());

/// Convert a tag to a sanitized filename stem
pub fn sanitize_filename(tag: &str) -> String {
    let name = UNSAFE_FILENAME_CHARS.replace_all(tag, "_").to_string();

    // Limit filename length
    if name.chars().count() > 100 {
        name.chars().take(100).collect()
    } else {
        name
    }
}

/// `{tag}_{YYYYmmdd_HHMMSS}.{ext}` for when no output path is given
pub fn default_output_path(tag: &str, format: OutputFormat, now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}.{}",
        sanitize_filename(tag),
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}
