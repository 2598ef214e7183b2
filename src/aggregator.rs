//! Report aggregation across all adapters.
//!
//! A run visits `Adapter::ALL` in order, resolves each finding's anchor
//! through the host, refreshes that adapter's gutter marks and folds the
//! findings into a [`Report`]. Presentation (quick panel, status line) is a
//! separate step so a stored report can be shown again without rerunning
//! the tools.

use crate::adapters::Adapter;
use crate::config::Settings;
use crate::models::{AdapterResult, EventKind, Report, Target};
use crate::runner::ProcessRunner;
use crate::surface::Surface;
use std::sync::Arc;

#[derive(Clone)]
pub struct Aggregator {
    settings: Arc<Settings>,
    runner: Arc<dyn ProcessRunner>,
}

impl Aggregator {
    pub fn new(settings: Arc<Settings>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { settings, runner }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run every adapter and build the report. Marks are refreshed, nothing
    /// is presented.
    pub fn collect(&self, target: &Target, event: EventKind, surface: &dyn Surface) -> Report {
        let mut report = Report::new(event);
        for adapter in Adapter::ALL {
            let mut findings = adapter.findings(&self.settings, self.runner.as_ref(), target);
            log::debug!("{} found {} errors", adapter.name(), findings.len());

            let mut anchors = Vec::with_capacity(findings.len());
            for f in findings.iter_mut() {
                let anchor = surface.line_to_anchor(f.line);
                f.set_anchor(anchor);
                anchors.push(anchor);
            }

            surface.clear_marks(adapter.name());
            if !anchors.is_empty() && self.settings.display.gutter_marks {
                surface.add_marks(adapter.name(), &anchors, adapter.marker());
            }

            report.push(AdapterResult {
                name: adapter.name(),
                marker: adapter.marker(),
                findings,
            });
        }
        report
    }

    /// Show the quick panel unless the settings or the trigger suppress it.
    /// An empty report has nothing to pick from and is never shown.
    pub fn present(&self, report: &Report, surface: &dyn Surface) {
        let display = &self.settings.display;
        if !display.quick_panel || report.is_empty() {
            return;
        }
        if report.event == EventKind::OnSave && !display.on_save {
            return;
        }
        self.show_list(report, surface);
    }

    /// Collect then present, blocking until the user has picked or cancelled.
    pub fn run(&self, target: &Target, event: EventKind, surface: &dyn Surface) -> Report {
        let report = self.collect(target, event, surface);
        self.present(&report, surface);
        report
    }

    pub fn show_list(&self, report: &Report, surface: &dyn Surface) {
        let picked = surface.present_list(&report.messages);
        self.on_selected(report, picked, surface);
    }

    /// Jump to the finding at flat position `picked`; `None` is a cancel.
    pub fn on_selected(&self, report: &Report, picked: Option<usize>, surface: &dyn Surface) {
        let Some(i) = picked else {
            return;
        };
        let Some(anchor) = report.finding(i).and_then(|f| f.anchor()) else {
            log::debug!("selection {} is out of range", i);
            return;
        };
        surface.focus(anchor);
        self.refresh_status(report, surface);
    }

    /// Put the message for the caret row in the status line, or clear it.
    pub fn refresh_status(&self, report: &Report, surface: &dyn Surface) {
        if !self.settings.display.status || surface.is_scratch() {
            return;
        }
        match report.status_for_line(surface.caret_line()) {
            Some(msg) => surface.set_status(msg),
            None => surface.clear_status(),
        }
    }
}

/// Remove the marks of every adapter.
pub fn clear_all_marks(surface: &dyn Surface) {
    for adapter in Adapter::ALL {
        surface.clear_marks(adapter.name());
    }
}
