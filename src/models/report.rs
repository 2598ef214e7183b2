//! Aggregated outcome of one run across all adapters.

use super::{AdapterResult, EventKind, Finding};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
/// Report built by the aggregator.
///
/// `messages[i]` is the display string of the i-th finding visited in
/// entry order then parse order, and [`Report::finding`] walks the same
/// order, so an index picked from the list always maps back to its finding.
pub struct Report {
    pub event: EventKind,
    pub entries: Vec<AdapterResult>,
    pub messages: Vec<String>,
    /// Line number to the last message recorded for it.
    pub line_index: BTreeMap<usize, String>,
}

impl Report {
    pub fn new(event: EventKind) -> Self {
        Self {
            event,
            entries: Vec::new(),
            messages: Vec::new(),
            line_index: BTreeMap::new(),
        }
    }

    /// Append one adapter's findings. Anchors must already be resolved.
    pub(crate) fn push(&mut self, result: AdapterResult) {
        for f in &result.findings {
            self.messages.push(f.display());
            // later adapters win on line collisions
            self.line_index.insert(f.line, f.message.clone());
        }
        self.entries.push(result);
    }

    /// Finding at flat position `i`.
    pub fn finding(&self, i: usize) -> Option<&Finding> {
        self.findings().nth(i)
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.entries.iter().flat_map(|e| e.findings.iter())
    }

    /// Message for a zero-based editor row, if any finding sits on it.
    pub fn status_for_line(&self, row: usize) -> Option<&str> {
        self.line_index.get(&(row + 1)).map(String::as_str)
    }

    pub fn count(&self, adapter: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.name == adapter)
            .map(|e| e.findings.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
