//! Shared data models: findings, per-adapter results, run targets and reports.

pub mod report;

pub use report::Report;

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Opaque location token resolved by the host from a line number.
/// The terminal host uses byte offsets.
pub type Anchor = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single line-addressed issue reported by one analyzer.
pub struct Finding {
    /// 1-based line as reported by the tool; never checked against the file.
    pub line: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    anchor: Option<Anchor>,
}

impl Finding {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
            anchor: None,
        }
    }

    /// Display string used by the quick-selection list.
    pub fn display(&self) -> String {
        format!("({}) {}", self.line, self.message)
    }

    /// Anchor assigned during aggregation; `None` before that step.
    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    pub(crate) fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = Some(anchor);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Presentation hint for gutter marks. Opaque to the aggregation logic.
pub enum Marker {
    Cross,
    Dot,
}

impl Marker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Marker::Cross => "cross",
            Marker::Dot => "dot",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// Ordered findings of one adapter plus its identity and marker symbol.
pub struct AdapterResult {
    pub name: &'static str,
    pub marker: Marker,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// What triggered a run.
pub enum EventKind {
    Explicit,
    OnSave,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
/// Stable identity of an open document.
pub struct TargetId(pub String);

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
/// A document to analyse: its identity, backing file and fallback encoding.
pub struct Target {
    pub id: TargetId,
    /// `None` for unsaved buffers; such targets are never analysed.
    pub path: Option<PathBuf>,
    pub fallback_encoding: String,
}

impl Target {
    /// A file-backed target identified by its path.
    pub fn for_file(path: impl Into<PathBuf>, fallback_encoding: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: TargetId(path.to_string_lossy().to_string()),
            path: Some(path),
            fallback_encoding: fallback_encoding.into(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Extension without the leading dot, if any.
    pub fn extension(&self) -> Option<&str> {
        self.path()?.extension()?.to_str()
    }
}
