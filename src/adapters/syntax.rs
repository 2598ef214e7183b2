//! Syntax linter (`php -l`).
//!
//! The whole output is searched once with the configured pattern; it must
//! provide named groups `line` and `message`. A pattern that fails to
//! compile or lacks either group never matches.

use super::RawMatch;
use regex::bytes::RegexBuilder;

pub fn command_line(exe: String, extra: Vec<String>, path: String) -> Vec<String> {
    let mut args = vec![exe, "-l".to_string(), "-d display_errors=On".to_string()];
    args.extend(extra);
    args.push(path);
    args
}

/// At most one match: the leftmost one in the raw text.
pub fn extract<'h>(pattern: &str, raw: &'h [u8]) -> Option<RawMatch<'h>> {
    let re = match RegexBuilder::new(pattern).unicode(false).build() {
        Ok(re) => re,
        Err(e) => {
            log::debug!("syntax pattern does not compile: {}", e);
            return None;
        }
    };
    let caps = re.captures(raw)?;
    Some((caps.name("line")?.as_bytes(), caps.name("message")?.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SYNTAX_PATTERN;

    const PARSE_ERROR: &[u8] = b"PHP Parse error:  syntax error, unexpected '}' in /srv/app/Foo.php on line 14\n\
Parse error: syntax error, unexpected '}' in /srv/app/Foo.php on line 14\n\
Errors parsing /srv/app/Foo.php\n";

    #[test]
    fn test_default_pattern_yields_first_match_only() {
        let (line, message) = extract(DEFAULT_SYNTAX_PATTERN, PARSE_ERROR).unwrap();
        assert_eq!(line, b"14");
        assert_eq!(
            message,
            &b"PHP Parse error:  syntax error, unexpected '}' in /srv/app/Foo.php"[..]
        );
    }

    #[test]
    fn test_clean_file_has_no_match() {
        assert!(extract(DEFAULT_SYNTAX_PATTERN, b"No syntax errors detected in Foo.php\n").is_none());
    }

    #[test]
    fn test_custom_pattern_not_matching() {
        let pattern = r"line (?P<line>\d+).*?error.*?(?P<message>.+)";
        assert!(extract(pattern, b"No syntax errors detected in Foo.php").is_none());
        let (line, message) = extract(pattern, b"line 9: fatal error here").unwrap();
        assert_eq!(line, b"9");
        assert_eq!(message, b" here");
    }

    #[test]
    fn test_invalid_or_incomplete_pattern_never_matches() {
        assert!(extract(r"(?P<line>\d+", b"on line 3").is_none());
        assert!(extract(r"on line (?P<line>\d+)", b"on line 3").is_none());
        assert!(extract("", b"anything").is_none());
    }
}
