//! Regex heuristics for pulling credential fields out of a single line.
//!
//! These are deliberately low-precision: leak dumps have no schema, so the
//! contract is "best-effort first match per line", not correctness. Each
//! extractor is a pure function over the line text (plus the matched email
//! for the password extractor) so they can be tested against literal
//! fixtures in isolation.
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\s.-]{8,14}\d").expect("valid phone regex"));

static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,5}\s\w+\s\w+").expect("valid address regex"));

/// Compile the domain-scoped email pattern: a word-bounded local part of
/// letters, digits and `._%+-` followed by `@` and the literal domain.
pub fn email_regex(domain: &str) -> Result<Regex> {
    Regex::new(&format!(
        r"\b[A-Za-z0-9._%+-]+@{}\b",
        regex::escape(domain)
    ))
    .with_context(|| format!("compile email pattern for domain {domain}"))
}

/// Extract the password following `email` on this line.
///
/// Dumps commonly use `email:password` or `email:password:extra` layouts:
/// the token is the maximal non-whitespace run after `<email>:`, truncated
/// at its first `:` so trailing metadata is not swallowed. Returns an empty
/// string when no such pattern is present.
pub fn extract_password(line: &str, email: &str) -> String {
    let mut search = 0;
    while let Some(off) = line[search..].find(email) {
        let after = search + off + email.len();
        if let Some(rest) = line[after..].strip_prefix(':') {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let token = &rest[..end];
            if !token.is_empty() {
                return token.split(':').next().unwrap_or_default().to_string();
            }
        }
        // The email grammar is ASCII, so a one-byte step keeps the slice on
        // a char boundary while letting later occurrences match.
        search += off + 1;
    }
    String::new()
}

/// First phone-shaped substring: optional `+`, then 10-16 characters of
/// digits and separators bounded by digits. Returned verbatim.
pub fn extract_phone(line: &str) -> String {
    PHONE_RE
        .find(line)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First `<number> <word> <word>` street-address-shaped substring.
pub fn extract_address(line: &str) -> String {
    ADDRESS_RE
        .find(line)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_after_email() {
        assert_eq!(
            extract_password("user@example.com:hunter2", "user@example.com"),
            "hunter2"
        );
    }

    #[test]
    fn password_stops_at_second_colon() {
        assert_eq!(
            extract_password("user@example.com:hunter2:0211554433", "user@example.com"),
            "hunter2"
        );
    }

    #[test]
    fn password_absent_when_no_colon_or_empty_token() {
        assert_eq!(extract_password("user@example.com", "user@example.com"), "");
        assert_eq!(
            extract_password("user@example.com: spaced", "user@example.com"),
            ""
        );
    }

    #[test]
    fn password_found_mid_line() {
        assert_eq!(
            extract_password(
                "id=4; user@example.com:s3cret phone=555",
                "user@example.com"
            ),
            "s3cret"
        );
    }

    #[test]
    fn password_empty_segment_before_colon_yields_empty() {
        // "email::pw" matches with token "::pw" semantics: the token is
        // ":pw" and its first segment is empty, which the engine discards.
        assert_eq!(extract_password("a@b.com::pw", "a@b.com"), "");
    }

    #[test]
    fn phone_matches_common_shapes() {
        assert_eq!(extract_phone("call +1 555-867-5309 now"), "+1 555-867-5309");
        assert_eq!(extract_phone("tel 0211554433"), "0211554433");
        assert_eq!(extract_phone("no digits here"), "");
    }

    #[test]
    fn address_matches_number_word_word() {
        assert_eq!(
            extract_address("lives at 42 Elm Street apt 3"),
            "42 Elm Street"
        );
        assert_eq!(extract_address("nothing here"), "");
    }

    #[test]
    fn email_regex_scopes_to_domain() {
        let re = email_regex("example.com").unwrap();
        let line = "a.b%x+1@example.com and other@elsewhere.net";
        let hits: Vec<_> = re.find_iter(line).map(|m| m.as_str()).collect();
        assert_eq!(hits, vec!["a.b%x+1@example.com"]);
        assert!(!re.is_match("user@exampleXcom"));
    }
}
