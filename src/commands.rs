//! Host-facing commands: what an editor (or the CLI) invokes.
//!
//! `Checker` owns the aggregator and the session registry and gates every
//! command on the target's extension.

use crate::aggregator::{clear_all_marks, Aggregator};
use crate::config::Settings;
use crate::models::{EventKind, Report, Target};
use crate::runner::ProcessRunner;
use crate::session::{spawn_run, RunHandle, SessionRegistry};
use crate::surface::Surface;
use std::sync::Arc;

pub struct Checker {
    aggregator: Aggregator,
    sessions: SessionRegistry,
}

impl Checker {
    pub fn new(settings: Settings, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            aggregator: Aggregator::new(Arc::new(settings), runner),
            sessions: SessionRegistry::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        self.aggregator.settings()
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Only saved files with an allowed extension are analysed.
    pub fn should_execute(&self, target: &Target) -> bool {
        target
            .extension()
            .map(|ext| self.settings().accepts_extension(ext))
            .unwrap_or(false)
    }

    /// Explicit run; blocks until the report is built and presented.
    pub fn sniff_file(&self, target: &Target, surface: &dyn Surface) -> Option<Report> {
        if !self.should_execute(target) {
            log::debug!("skipping {}: extension not enabled", target.id);
            return None;
        }
        let session = self.sessions.get_or_create(&target.id);
        Some(session.run(&self.aggregator, target, EventKind::Explicit, surface))
    }

    pub fn can_show_previous(&self, target: &Target) -> bool {
        self.should_execute(target)
            && self
                .sessions
                .get_existing(&target.id)
                .map(|s| s.has_messages())
                .unwrap_or(false)
    }

    /// Present the stored report again without rerunning any tool.
    pub fn show_previous(&self, target: &Target, surface: &dyn Surface) -> bool {
        if !self.can_show_previous(target) {
            return false;
        }
        let Some(report) = self
            .sessions
            .get_existing(&target.id)
            .and_then(|s| s.report())
        else {
            return false;
        };
        self.aggregator.show_list(&report, surface);
        true
    }

    pub fn clear_marks(&self, target: &Target, surface: &dyn Surface) {
        if self.should_execute(target) {
            clear_all_marks(surface);
        }
    }

    /// Save hook: start a background run when run-on-save is enabled.
    pub fn on_post_save(&self, target: &Target, surface: Arc<dyn Surface>) -> Option<RunHandle> {
        if !self.settings().run_on_save || !self.should_execute(target) {
            return None;
        }
        let session = self.sessions.get_or_create(&target.id);
        Some(spawn_run(
            session,
            self.aggregator.clone(),
            target.clone(),
            EventKind::OnSave,
            surface,
        ))
    }

    /// Caret moved: refresh the status line from the stored report.
    pub fn on_selection_modified(&self, target: &Target, surface: &dyn Surface) {
        if !self.should_execute(target) {
            return;
        }
        let Some(session) = self.sessions.get_existing(&target.id) else {
            return;
        };
        session.with_report(|r| self.aggregator.refresh_status(r, surface));
    }
}
