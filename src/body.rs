//! Extraction of the `value` field from a create/update body.
//!
//! This is a literal pattern match on `"value":"..."`, not JSON parsing. The
//! greedy prefix means the last occurrence on a line wins, and escaped quotes
//! inside the value end the match early.

use regex::Regex;
use std::sync::LazyLock;

static VALUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#".*"value":"(.*?)".*"#).expect("value pattern is a valid regex")
});

/// Pull the `value` string out of a request body
///
/// Returns `None` when the body is absent, the pattern doesn't match, or the
/// captured value is empty.
pub fn extract_value(body: Option<&str>) -> Option<String> {
    let body = body.unwrap_or("");
    let replaced = VALUE_PATTERN.replace_all(body, "${1}");

    if replaced.is_empty() || replaced == body {
        None
    } else {
        Some(replaced.into_owned())
    }
}
