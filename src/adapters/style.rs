//! Style checker (`phpcs --report=checkstyle`).
//!
//! Every `<error .../>` record of the checkstyle report becomes a finding,
//! in document order.

use super::RawMatch;
use regex::bytes::Regex;
use std::sync::OnceLock;

fn record_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?-u).*line="(?P<line>\d+)" column="(?P<column>\d+)" severity="(?P<severity>\w+)" message="(?P<message>.*)" source"#,
        )
        .expect("static checkstyle pattern")
    })
}

pub fn command_line(exe: String, extra: Vec<String>, path: String) -> Vec<String> {
    let mut args = vec![exe, "--report=checkstyle".to_string()];
    args.extend(extra);
    args.push(path);
    args
}

pub fn extract(raw: &[u8]) -> Vec<RawMatch<'_>> {
    record_re()
        .captures_iter(raw)
        .filter_map(|caps| Some((caps.name("line")?.as_bytes(), caps.name("message")?.as_bytes())))
        .collect()
}
