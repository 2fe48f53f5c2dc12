use crate::controllers::session::events::SessionEvent;
use crate::controllers::session::ports::DriverPresenterPort;
use crate::core::data::Snapshot;
use std::sync::{Arc, Mutex};

/// Single-slot handoff between the worker and a renderer: the worker
/// overwrites the latest published snapshot, the renderer only ever reads
/// it. Last value wins; intermediate frames may be skipped.
#[derive(Default)]
pub struct LatestSnapshotCell {
    slot: Mutex<Option<Arc<Snapshot>>>,
    terminal: Mutex<Option<SessionEvent>>,
}

impl LatestSnapshotCell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.slot.lock().unwrap().clone()
    }

    /// The most recent terminal event (completed/stopped/failed), if any
    /// session has ended since construction.
    #[must_use]
    pub fn last_outcome(&self) -> Option<SessionEvent> {
        self.terminal.lock().unwrap().clone()
    }
}

impl DriverPresenterPort for LatestSnapshotCell {
    fn present(&self, event: SessionEvent) {
        match event {
            SessionEvent::Snapshot(snapshot) => {
                *self.slot.lock().unwrap() = Some(snapshot);
            }
            terminal => {
                *self.terminal.lock().unwrap() = Some(terminal);
            }
        }
    }
}
