use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref GUID_PATTERN: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    )
    .expect("GUID pattern is a valid regex");
}

/// Check a string against the canonical `8-4-4-4-12` hexadecimal GUID shape
/// (case-insensitive, no braces, no surrounding whitespace)
pub fn is_valid_guid(s: &str) -> bool {
    GUID_PATTERN.is_match(s)
}
