//! Parsing of loosely-typed query parameters.
//!
//! External input never reaches query construction directly; each
//! parameter goes through a parse-with-default function here.

/// 1-based page number. Absent, non-numeric or zero input falls back
/// to 1.
pub fn parse_page(raw: Option<&str>) -> u64 {
    parse_positive(raw).unwrap_or(1)
}

/// Page size. Absent, non-numeric or zero input falls back to 10.
pub fn parse_limit(raw: Option<&str>) -> u64 {
    parse_positive(raw).unwrap_or(10)
}

/// Search text defaults to the empty string, which matches every
/// record.
pub fn parse_search_text(raw: Option<&str>) -> String {
    raw.unwrap_or_default().to_string()
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|&n| n >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_when_absent() {
        assert_eq!(parse_page(None), 1);
    }

    #[test]
    fn page_defaults_when_non_numeric() {
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
    }

    #[test]
    fn page_defaults_when_zero() {
        assert_eq!(parse_page(Some("0")), 1);
    }

    #[test]
    fn page_parses_valid_input() {
        assert_eq!(parse_page(Some("7")), 7);
        assert_eq!(parse_page(Some(" 2 ")), 2);
    }

    #[test]
    fn limit_defaults_to_ten() {
        assert_eq!(parse_limit(None), 10);
        assert_eq!(parse_limit(Some("nope")), 10);
        assert_eq!(parse_limit(Some("0")), 10);
    }

    #[test]
    fn limit_parses_valid_input() {
        assert_eq!(parse_limit(Some("25")), 25);
    }

    #[test]
    fn search_text_defaults_to_empty() {
        assert_eq!(parse_search_text(None), "");
        assert_eq!(parse_search_text(Some("blr")), "blr");
    }
}
