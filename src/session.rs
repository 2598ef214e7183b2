//! Per-target sessions holding the latest report.
//!
//! A session is created the first time a target is run and lives as long as
//! the registry. Each new run replaces the stored report wholesale. Runs on
//! the same target are serialized by the session's run lock; distinct
//! targets never share a lock.

use crate::aggregator::Aggregator;
use crate::models::{EventKind, Report, Target, TargetId};
use crate::surface::Surface;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::JoinHandle;

pub struct Session {
    id: TargetId,
    run_lock: Mutex<()>,
    report: RwLock<Option<Report>>,
}

impl Session {
    fn new(id: TargetId) -> Self {
        Self {
            id,
            run_lock: Mutex::new(()),
            report: RwLock::new(None),
        }
    }

    /// Snapshot of the latest report.
    pub fn report(&self) -> Option<Report> {
        self.report.read().clone()
    }

    pub fn with_report<R>(&self, f: impl FnOnce(&Report) -> R) -> Option<R> {
        self.report.read().as_ref().map(f)
    }

    /// Trigger of the latest run.
    pub fn event(&self) -> Option<EventKind> {
        self.with_report(|r| r.event)
    }

    pub fn has_messages(&self) -> bool {
        self.with_report(|r| !r.is_empty()).unwrap_or(false)
    }

    /// Run all adapters, store the report, then present it.
    ///
    /// The run lock covers collection and the store so marks and the stored
    /// report always come from the same run; presenting happens after the
    /// lock is released.
    pub fn run(
        &self,
        aggregator: &Aggregator,
        target: &Target,
        event: EventKind,
        surface: &dyn Surface,
    ) -> Report {
        let report = {
            let _guard = self.run_lock.lock();
            let report = aggregator.collect(target, event, surface);
            log::debug!("{}: stored {} message(s)", self.id, report.messages.len());
            *self.report.write() = Some(report.clone());
            report
        };
        aggregator.present(&report, surface);
        report
    }
}

#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<TargetId, Arc<Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, id: &TargetId) -> Arc<Session> {
        self.sessions
            .lock()
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Session::new(id.clone())))
            .clone()
    }

    pub fn get_existing(&self, id: &TargetId) -> Option<Arc<Session>> {
        self.sessions.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to a run executing on its own worker thread.
pub struct RunHandle {
    target: TargetId,
    handle: JoinHandle<Report>,
}

impl RunHandle {
    pub fn target(&self) -> &TargetId {
        &self.target
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the run; `None` if the worker panicked.
    pub fn join(self) -> Option<Report> {
        match self.handle.join() {
            Ok(report) => Some(report),
            Err(_) => {
                log::warn!("background run for {} panicked", self.target);
                None
            }
        }
    }
}

/// Start a run on a dedicated worker thread.
pub fn spawn_run(
    session: Arc<Session>,
    aggregator: Aggregator,
    target: Target,
    event: EventKind,
    surface: Arc<dyn Surface>,
) -> RunHandle {
    let id = target.id.clone();
    let handle = std::thread::spawn(move || session.run(&aggregator, &target, event, surface.as_ref()));
    RunHandle { target: id, handle }
}
