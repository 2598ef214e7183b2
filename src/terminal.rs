//! Terminal host: a [`Surface`] backed by the target file's contents.
//!
//! Anchors are byte offsets of line starts. Gutter marks and the status
//! text are kept in memory and rendered on demand. The quick panel is a
//! `dialoguer` selection list when interactive and a numbered listing on
//! stdout otherwise.

use crate::models::{Anchor, Marker};
use crate::surface::Surface;
use dialoguer::{theme::ColorfulTheme, Select};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

#[derive(Default)]
struct State {
    caret: Anchor,
    marks: BTreeMap<String, (Vec<Anchor>, Marker)>,
    status: Option<String>,
}

pub struct TerminalSurface {
    label: String,
    lines: Vec<String>,
    line_starts: Vec<usize>,
    len: usize,
    interactive: bool,
    color: bool,
    state: Mutex<State>,
}

impl TerminalSurface {
    pub fn open(path: &Path, label: impl Into<String>, interactive: bool) -> io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(label, &bytes, interactive))
    }

    pub fn from_bytes(label: impl Into<String>, bytes: &[u8], interactive: bool) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            bytes
                .iter()
                .enumerate()
                .filter(|(_, b)| **b == b'\n')
                .map(|(i, _)| i + 1),
        );
        let lines = String::from_utf8_lossy(bytes)
            .lines()
            .map(str::to_string)
            .collect();
        Self {
            label: label.into(),
            lines,
            line_starts,
            len: bytes.len(),
            interactive,
            color: std::env::var_os("NO_COLOR").is_none(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Owners with at least one mark, in name order.
    pub fn marks(&self) -> Vec<(String, Vec<Anchor>, Marker)> {
        self.state
            .lock()
            .marks
            .iter()
            .map(|(k, (a, m))| (k.clone(), a.clone(), *m))
            .collect()
    }

    fn glyph(&self, marker: Marker) -> String {
        let g = match marker {
            Marker::Cross => "✖",
            Marker::Dot => "●",
        };
        match (self.color, marker) {
            (false, _) => g.to_string(),
            (true, Marker::Cross) => g.red().to_string(),
            (true, Marker::Dot) => g.yellow().to_string(),
        }
    }

    /// Marked rows with their source text; a cross wins over a dot on a
    /// shared row.
    pub fn render_gutter(&self) -> String {
        let mut rows: BTreeMap<usize, Marker> = BTreeMap::new();
        for (_, anchors, marker) in self.marks() {
            for a in anchors {
                let row = self.anchor_to_caret(a).0;
                let slot = rows.entry(row).or_insert(marker);
                if marker == Marker::Cross {
                    *slot = Marker::Cross;
                }
            }
        }
        let mut out = String::new();
        for (row, marker) in rows {
            let text = self.lines.get(row).map(String::as_str).unwrap_or("");
            out.push_str(&format!("{} {:>5} │ {}\n", self.glyph(marker), row + 1, text));
        }
        out
    }

    fn pick(&self, items: &[String]) -> Option<usize> {
        let picked = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{}: jump to", self.label))
            .items(items)
            .default(0)
            .interact_opt();
        selection(picked, items.len())
    }

    fn print_list(&self, items: &[String]) {
        if self.color {
            println!("{}", self.label.bold());
        } else {
            println!("{}", self.label);
        }
        for (i, item) in items.iter().enumerate() {
            println!("  {:>3}. {}", i + 1, item);
        }
    }
}

/// Escape, an aborted prompt or an out-of-range index all cancel.
fn selection(picked: dialoguer::Result<Option<usize>>, count: usize) -> Option<usize> {
    match picked {
        Ok(choice) => choice.filter(|i| *i < count),
        Err(e) => {
            log::debug!("selection prompt failed: {}", e);
            None
        }
    }
}

impl Surface for TerminalSurface {
    fn line_to_anchor(&self, line: usize) -> Anchor {
        let row = line.saturating_sub(1);
        self.line_starts.get(row).copied().unwrap_or(self.len)
    }

    fn anchor_to_caret(&self, anchor: Anchor) -> (usize, usize) {
        let row = self
            .line_starts
            .partition_point(|&s| s <= anchor)
            .saturating_sub(1);
        (row, anchor - self.line_starts[row])
    }

    fn focus(&self, anchor: Anchor) {
        self.state.lock().caret = anchor;
        let (row, col) = self.anchor_to_caret(anchor);
        eprintln!("→ {}:{}:{}", self.label, row + 1, col + 1);
    }

    fn caret_line(&self) -> usize {
        let caret = self.state.lock().caret;
        self.anchor_to_caret(caret).0
    }

    fn clear_marks(&self, owner: &str) {
        self.state.lock().marks.remove(owner);
    }

    fn add_marks(&self, owner: &str, anchors: &[Anchor], marker: Marker) {
        self.state
            .lock()
            .marks
            .insert(owner.to_string(), (anchors.to_vec(), marker));
    }

    fn present_list(&self, items: &[String]) -> Option<usize> {
        if items.is_empty() {
            return None;
        }
        if self.interactive {
            return self.pick(items);
        }
        self.print_list(items);
        None
    }

    fn set_status(&self, text: &str) {
        self.state.lock().status = Some(text.to_string());
        eprintln!("{}: {}", self.label, text);
    }

    fn clear_status(&self) {
        self.state.lock().status = None;
    }
}
