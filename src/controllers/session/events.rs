use crate::core::data::Snapshot;
use std::sync::Arc;

/// Everything the driver publishes through its presenter port. Snapshots
/// flow on every step; exactly one terminal event ends each session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Snapshot(Arc<Snapshot>),
    Completed {
        algorithm: &'static str,
        steps: u64,
    },
    Stopped {
        algorithm: &'static str,
    },
    Failed {
        algorithm: &'static str,
        message: String,
    },
}
