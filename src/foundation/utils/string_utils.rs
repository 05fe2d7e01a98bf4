use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

fn unsafe_path_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[/\\\p{Cc}]").expect("valid path character pattern"))
}

/// Turns an entry name into a directory name that stays inside the music directory.
///
/// The name is NFC-normalized so that visually identical names map to the same
/// directory, path separators and control characters are replaced with `_`, and
/// surrounding whitespace is trimmed. Returns `None` when nothing usable is left
/// (an empty name, `.` or `..`).
///
/// # Examples
///
/// ```
/// use spotrack::foundation::utils::to_dir_name;
///
/// assert_eq!(to_dir_name("AC/DC").as_deref(), Some("AC_DC"));
/// assert_eq!(to_dir_name(".."), None);
/// ```
pub fn to_dir_name(name: &str) -> Option<String> {
    let normalized = name.nfc().collect::<String>();
    let cleaned = unsafe_path_chars().replace_all(&normalized, "_");
    let result = cleaned.trim();

    match result {
        "" | "." | ".." => None,
        _ => Some(result.to_string()),
    }
}

/// Splits a space-separated option string into individual arguments.
///
/// Tokens are passed to the downloader verbatim, no shell quoting is applied.
pub fn split_options(options: &str) -> Vec<String> {
    options.split_whitespace().map(str::to_string).collect()
}
