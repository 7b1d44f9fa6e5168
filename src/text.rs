use std::sync::LazyLock;

use regex::Regex;

// `\s` is Unicode-aware: covers nbsp, tabs, CR/LF and the other White_Space chars.
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every run of whitespace into a single plain space and trim the ends.
///
/// Runs are collapsed rather than replaced char for char, so stored values can
/// differ from the site's text ("1  Example St" is saved as "1 Example St").
/// Labels that wrap across lines still match the field table exactly.
pub fn scrub(text: &str) -> String {
    SPACE_RE.replace_all(text, " ").trim().to_string()
}
