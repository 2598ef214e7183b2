//! Analyzer adapters: one per external tool.
//!
//! The set is closed (`Adapter::ALL`) and always visited in the same order:
//! syntax linter, style checker, complexity detector. Each variant differs
//! only in how it builds its command line and how it extracts
//! `(line, message)` pairs from the raw output; running the tool and
//! decoding messages are shared here.

pub mod complexity;
pub mod style;
pub mod syntax;

use crate::config::{Settings, ToolSettings};
use crate::decode::decode_message;
use crate::models::{Finding, Marker, Target};
use crate::runner::ProcessRunner;
use crate::utils::normalize_path;
use indexmap::IndexMap;
use std::path::Path;

/// A raw match: line digits and undecoded message bytes.
pub type RawMatch<'a> = (&'a [u8], &'a [u8]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adapter {
    Syntax,
    Style,
    Complexity,
}

impl Adapter {
    pub const ALL: [Adapter; 3] = [Adapter::Syntax, Adapter::Style, Adapter::Complexity];

    /// Identity used for grouping and gutter-mark ownership.
    pub fn name(&self) -> &'static str {
        match self {
            Adapter::Syntax => "Linter",
            Adapter::Style => "Sniffer",
            Adapter::Complexity => "MessDetector",
        }
    }

    pub fn marker(&self) -> Marker {
        match self {
            Adapter::Syntax => Marker::Cross,
            Adapter::Style | Adapter::Complexity => Marker::Dot,
        }
    }

    /// Executable used when no explicit path is configured.
    pub fn default_executable(&self) -> &'static str {
        match self {
            Adapter::Syntax => "php",
            Adapter::Style => "phpcs",
            Adapter::Complexity => "phpmd",
        }
    }

    pub fn settings<'a>(&self, settings: &'a Settings) -> &'a ToolSettings {
        match self {
            Adapter::Syntax => &settings.syntax,
            Adapter::Style => &settings.style,
            Adapter::Complexity => &settings.complexity,
        }
    }

    /// Full argument vector, executable first.
    pub fn command_line(&self, settings: &Settings, path: &Path) -> Vec<String> {
        let tool = self.settings(settings);
        let exe = if tool.executable.is_empty() {
            self.default_executable().to_string()
        } else {
            tool.executable.clone()
        };
        let path = normalize_path(path).to_string_lossy().to_string();
        let extra = expand_args(&tool.args);
        match self {
            Adapter::Syntax => syntax::command_line(exe, extra, path),
            Adapter::Style => style::command_line(exe, extra, path),
            Adapter::Complexity => complexity::command_line(exe, extra, path),
        }
    }

    /// Parse raw tool output into findings, in order of appearance.
    pub fn parse(&self, settings: &Settings, raw: &[u8], fallback_encoding: &str) -> Vec<Finding> {
        let matches: Vec<RawMatch<'_>> = match self {
            Adapter::Syntax => syntax::extract(&settings.syntax_pattern, raw)
                .into_iter()
                .collect(),
            Adapter::Style => style::extract(raw),
            Adapter::Complexity => complexity::extract(raw),
        };
        to_findings(self.name(), matches, fallback_encoding)
    }

    /// Run the tool against `target` and return its findings.
    ///
    /// A disabled adapter, a target without a file, or a tool that produced
    /// nothing usable all yield an empty list.
    pub fn findings(
        &self,
        settings: &Settings,
        runner: &dyn ProcessRunner,
        target: &Target,
    ) -> Vec<Finding> {
        if !self.settings(settings).enabled {
            return Vec::new();
        }
        let Some(path) = target.path() else {
            return Vec::new();
        };
        let args = self.command_line(settings, path);
        let raw = runner.run(&args);
        log::debug!("{}", String::from_utf8_lossy(&raw));
        self.parse(settings, &raw, &target.fallback_encoding)
    }
}

/// Turn configured `key -> value` pairs into tokens; a non-empty value is
/// glued to its key as `key=value` in a single token.
pub fn expand_args(args: &IndexMap<String, String>) -> Vec<String> {
    args.iter()
        .map(|(k, v)| {
            if v.is_empty() {
                k.clone()
            } else {
                format!("{}={}", k, v)
            }
        })
        .collect()
}

fn to_findings(adapter: &str, matches: Vec<RawMatch<'_>>, fallback: &str) -> Vec<Finding> {
    let mut out = Vec::with_capacity(matches.len());
    for (line, message) in matches {
        let Some(line) = std::str::from_utf8(line)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
        else {
            log::debug!("{}: skipping match with unusable line number", adapter);
            continue;
        };
        match decode_message(message, fallback) {
            Ok(text) => out.push(Finding::new(line, text)),
            Err(e) => log::warn!("{}: dropping finding on line {}: {}", adapter, line, e),
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::TargetId;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Runner returning canned output per executable and recording calls.
    #[derive(Default)]
    pub struct ScriptedRunner {
        pub outputs: HashMap<String, Vec<u8>>,
        pub calls: Mutex<Vec<Vec<String>>>,
    }

    impl ScriptedRunner {
        pub fn with(mut self, exe: &str, out: &str) -> Self {
            self.outputs.insert(exe.to_string(), out.as_bytes().to_vec());
            self
        }

        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().clone()
        }
    }

    impl ProcessRunner for ScriptedRunner {
        fn run(&self, args: &[String]) -> Vec<u8> {
            self.calls.lock().push(args.to_vec());
            args.first()
                .and_then(|exe| self.outputs.get(exe))
                .cloned()
                .unwrap_or_default()
        }
    }

    pub fn all_enabled() -> Settings {
        let mut s = Settings::default();
        s.syntax.enabled = true;
        s.style.enabled = true;
        s.complexity.enabled = true;
        s
    }

    #[test]
    fn test_disabled_adapter_never_spawns() {
        let mut s = Settings::default();
        s.syntax.enabled = false;
        s.style.enabled = false;
        s.complexity.enabled = false;
        let runner = ScriptedRunner::default().with("phpcs", "x");
        let t = Target::for_file("a.php", "windows-1252");
        for a in Adapter::ALL {
            assert!(a.findings(&s, &runner, &t).is_empty());
        }
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_target_without_file_never_spawns() {
        let runner = ScriptedRunner::default();
        let t = Target {
            id: TargetId("scratch".into()),
            path: None,
            fallback_encoding: "utf-8".into(),
        };
        assert!(Adapter::Style.findings(&all_enabled(), &runner, &t).is_empty());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_expand_args_keeps_order_and_joins_values() {
        let mut args = IndexMap::new();
        args.insert("--standard".to_string(), "PSR2".to_string());
        args.insert("-n".to_string(), String::new());
        args.insert("--ignore".to_string(), "vendor/*,tests/*".to_string());
        assert_eq!(
            expand_args(&args),
            vec!["--standard=PSR2", "-n", "--ignore=vendor/*,tests/*"]
        );
    }

    #[test]
    fn test_explicit_executable_overrides_bare_name() {
        let mut s = all_enabled();
        s.style.executable = "/opt/phpcs/bin/phpcs".into();
        let cmd = Adapter::Style.command_line(&s, Path::new("src/./Foo.php"));
        assert_eq!(cmd[0], "/opt/phpcs/bin/phpcs");
        assert_eq!(Adapter::Syntax.command_line(&s, Path::new("a.php"))[0], "php");
    }

    #[test]
    fn test_command_lines_per_adapter() {
        let s = all_enabled();
        let path = Path::new("src/./lib/../Foo.php");
        let normalized = Path::new("src").join("Foo.php").to_string_lossy().to_string();
        assert_eq!(
            Adapter::Syntax.command_line(&s, path),
            vec!["php".to_string(), "-l".into(), "-d display_errors=On".into(), normalized.clone()]
        );
        assert_eq!(
            Adapter::Style.command_line(&s, path),
            vec![
                "phpcs".to_string(),
                "--report=checkstyle".into(),
                "--standard=PSR2".into(),
                "-n".into(),
                normalized.clone()
            ]
        );
        assert_eq!(
            Adapter::Complexity.command_line(&s, path),
            vec![
                "phpmd".to_string(),
                normalized,
                "text".into(),
                "codesize,unusedcode,naming".into()
            ]
        );
    }

    #[test]
    fn test_undecodable_message_drops_only_that_finding() {
        let mut s = all_enabled();
        s.style.enabled = true;
        let raw = b"<error line=\"1\" column=\"1\" severity=\"error\" message=\"ok\" source=\"A\"/>\n\
                    <error line=\"2\" column=\"1\" severity=\"error\" message=\"\x81\" source=\"B\"/>\n\
                    <error line=\"3\" column=\"1\" severity=\"error\" message=\"also ok\" source=\"C\"/>\n";
        let found = Adapter::Style.parse(&s, raw, "shift_jis");
        let lines: Vec<_> = found.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_findings_carry_no_anchor() {
        let runner = ScriptedRunner::default().with("phpmd", "/a/Foo.php:4\tToo complex.\n");
        let t = Target::for_file("/a/Foo.php", "windows-1252");
        let found = Adapter::Complexity.findings(&all_enabled(), &runner, &t);
        assert_eq!(found, vec![Finding::new(4, "Too complex.")]);
        assert!(found[0].anchor().is_none());
    }
}
