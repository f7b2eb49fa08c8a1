//! Turn free-form text into a list of identifier tokens.

/// Delimiter used when the caller does not pick one.
pub const DEFAULT_DELIMITER: char = ',';

/// Characters folded into the delimiter before splitting.
///
/// Covers line breaks, tabs, plain spaces, the ideographic comma (U+3001)
/// and the full-width comma (U+FF0C).
pub const SEPARATORS: &[char] = &['\n', '\r', '\t', ' ', '\u{3001}', '\u{FF0C}'];

/// Split `text` into trimmed, non-empty identifier tokens.
///
/// Order is preserved and duplicates are kept; every token is looked up.
///
/// # Example
///
/// ```
/// use cvss_parser::normalize_identifiers;
///
/// let ids = normalize_identifiers("CVE-2021-44228、CVE-2014-0160\nCVE-2021-44228", ',');
/// assert_eq!(ids, ["CVE-2021-44228", "CVE-2014-0160", "CVE-2021-44228"]);
/// ```
pub fn normalize_identifiers(text: &str, delimiter: char) -> Vec<String> {
    let folded: String = text
        .chars()
        .map(|c| if SEPARATORS.contains(&c) { delimiter } else { c })
        .collect();

    folded
        .split(delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
