//! phpcheck core library.
//!
//! Runs external PHP analyzers (syntax linter, style checker, complexity
//! detector) against one file, normalizes their outputs into line-addressed
//! findings and merges them into a single report.
//!
//! High-level modules:
//! - `adapters`: per-tool command lines and output extraction.
//! - `aggregator`: ordered merge, anchors, gutter marks, quick panel, status.
//! - `session`: per-target latest report and background runs.
//! - `commands`: host entry points (sniff, show previous, on save...).
//! - `surface`: collaborator traits an editor host implements.
//! - `terminal`: the CLI's implementation of those traits.
//! - `config`: discovery and effective settings resolution.
//! - `models`: findings, adapter results, reports.
//! - `output`: human/JSON printers.
pub mod adapters;
pub mod aggregator;
pub mod cli;
pub mod commands;
pub mod config;
pub mod decode;
pub mod error;
pub mod models;
pub mod output;
pub mod runner;
pub mod session;
pub mod surface;
pub mod terminal;
pub mod utils;
