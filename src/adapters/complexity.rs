//! Complexity/mess detector (`phpmd <file> text <rulesets>`).
//!
//! The text report prints one `path:line<TAB>message` row per violation.

use super::RawMatch;
use regex::bytes::Regex;
use std::sync::OnceLock;

fn row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?-u).*:(?P<line>\d+)[ \t]+(?P<message>.*)").expect("static phpmd pattern")
    })
}

/// phpmd's positional grammar is `<file> <format> <rulesets>`, so the path
/// precedes the report format instead of closing the argument list.
pub fn command_line(exe: String, extra: Vec<String>, path: String) -> Vec<String> {
    let mut args = vec![exe, path, "text".to_string()];
    args.extend(extra);
    args
}

pub fn extract(raw: &[u8]) -> Vec<RawMatch<'_>> {
    row_re()
        .captures_iter(raw)
        .filter_map(|caps| Some((caps.name("line")?.as_bytes(), caps.name("message")?.as_bytes())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_rows_in_order() {
        let raw = b"\n/srv/app/src/Foo.php:10\tThe method bar() has a Cyclomatic Complexity of 12.\n\
/srv/app/src/Foo.php:31\tAvoid unused local variables such as '$tmp'.\n\
/srv/app/src/Foo.php:5     The class Foo has 1200 lines of code.\n";
        let got = extract(raw);
        let lines: Vec<&[u8]> = got.iter().map(|(l, _)| *l).collect();
        assert_eq!(lines, vec![&b"10"[..], &b"31"[..], &b"5"[..]]);
        assert_eq!(got[1].1, &b"Avoid unused local variables such as '$tmp'."[..]);
        assert_eq!(got[2].1, &b"The class Foo has 1200 lines of code."[..]);
    }

    #[test]
    fn test_windows_drive_colon_does_not_confuse_line() {
        let raw = b"C:\\work\\Foo.php:77\tThe method baz() has an NPath complexity of 400.";
        let got = extract(raw);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].0, &b"77"[..]);
    }

    #[test]
    fn test_rows_without_line_are_ignored() {
        assert!(extract(b"No mess detected\n").is_empty());
        assert!(extract(b"").is_empty());
    }
}
