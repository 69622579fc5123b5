use crate::utils::error::{Result, ShellError};
use regex::Regex;
use std::sync::LazyLock;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9+\-]").expect("sanitize pattern is valid"));

/// Maps a display name onto a single filesystem-safe path segment.
///
/// The name is lower-cased and every character outside `[a-z0-9+-]` becomes
/// `-`, one for one. A result that would start with a digit gets a `p` prefix.
pub fn sanitize_name(name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(ShellError::invalid_input("Can not sanitize an empty field."));
    }

    let lowered = name.to_lowercase();
    let mut sanitized = UNSAFE_CHARS.replace_all(&lowered, "-").into_owned();

    if sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        sanitized.insert(0, 'p');
    }

    Ok(sanitized)
}
