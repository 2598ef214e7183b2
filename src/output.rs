//! Output rendering for `phpcheck sniff`.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-file reports and a top-level summary.

use crate::adapters::Adapter;
use crate::models::{Marker, Report};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;
use serde_json::Value as JsonVal;

/// One analysed file as shown to the user.
pub struct FileReport {
    pub file: String,
    pub report: Report,
    /// Rendered gutter, present when gutter marks are enabled.
    pub gutter: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
/// Totals across all files, keyed by adapter identity.
pub struct Summary {
    pub linter: usize,
    pub sniffer: usize,
    pub mess_detector: usize,
    pub files: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.linter + self.sniffer + self.mess_detector
    }
}

pub fn summarize(results: &[FileReport]) -> Summary {
    let count = |a: Adapter| -> usize { results.iter().map(|r| r.report.count(a.name())).sum() };
    Summary {
        linter: count(Adapter::Syntax),
        sniffer: count(Adapter::Style),
        mess_detector: count(Adapter::Complexity),
        files: results.len(),
    }
}

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print reports in the requested format.
pub fn print_reports(results: &[FileReport], output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_json(results)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
        },
        _ => {
            let color = use_colors(output);
            for r in results {
                for line in human_lines(r, color) {
                    println!("{}", line);
                }
                if let Some(g) = r.gutter.as_deref().filter(|g| !g.is_empty()) {
                    print!("{}", g);
                }
            }
            let s = summarize(results);
            let summary = format!(
                "— Summary — linter={} sniffer={} mess_detector={} files={}",
                s.linter, s.sniffer, s.mess_detector, s.files
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// One line per finding, in report order.
pub fn human_lines(r: &FileReport, color: bool) -> Vec<String> {
    let mut out = Vec::new();
    for entry in &r.report.entries {
        let icon = match (entry.marker, color) {
            (Marker::Cross, true) => "✖".red().to_string(),
            (Marker::Dot, true) => "●".yellow().to_string(),
            (Marker::Cross, false) => "✖".to_string(),
            (Marker::Dot, false) => "●".to_string(),
        };
        let tag = format!("⟦{}⟧", entry.name);
        let tag = if color {
            tag.bold().to_string()
        } else {
            tag
        };
        for f in &entry.findings {
            let loc = format!("{}:{}", r.file, f.line);
            let loc = if color { loc.bold().to_string() } else { loc };
            out.push(format!("{} {} {} — {}", icon, tag, loc, f.message));
        }
    }
    out
}

/// Compose the JSON document (pure) for testing/snapshot purposes.
pub fn compose_json(results: &[FileReport]) -> JsonVal {
    let files: Vec<_> = results
        .iter()
        .map(|r| {
            json!({
                "file": r.file,
                "messages": r.report.messages,
                "line_index": r.report.line_index,
                "entries": r.report.entries,
                "event": r.report.event,
            })
        })
        .collect();
    json!({"files": files, "summary": summarize(results)})
}
