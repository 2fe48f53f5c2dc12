use crate::core::data::ElementState;
use std::sync::atomic::{AtomicU64, Ordering};

/// Event sink side of the step surface. Consumers (audio mapping, counters,
/// recorders) observe what happened; they get no control over the session.
pub trait StepEventSink: Send + Sync {
    /// Two indices are being compared.
    fn compare(&self, i: usize, j: usize);

    /// Two indices are about to exchange; emitted before the slots move.
    fn swap(&self, i: usize, j: usize);

    /// A single index changed display state.
    fn state_change(&self, index: usize, state: ElementState);

    /// The algorithm finished naturally. At most once per session.
    fn completed(&self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

impl StepEventSink for NullEventSink {
    fn compare(&self, _i: usize, _j: usize) {}

    fn swap(&self, _i: usize, _j: usize) {}

    fn state_change(&self, _index: usize, _state: ElementState) {}

    fn completed(&self) {}
}

/// Tallies events across a session. Cheap enough to leave attached in
/// production; the headless controller and benches read it afterwards.
#[derive(Debug, Default)]
pub struct CountingEventSink {
    comparisons: AtomicU64,
    exchanges: AtomicU64,
    state_changes: AtomicU64,
    completions: AtomicU64,
}

impl CountingEventSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn comparisons(&self) -> u64 {
        self.comparisons.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn exchanges(&self) -> u64 {
        self.exchanges.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn state_changes(&self) -> u64 {
        self.state_changes.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn completions(&self) -> u64 {
        self.completions.load(Ordering::Relaxed)
    }
}

impl StepEventSink for CountingEventSink {
    fn compare(&self, _i: usize, _j: usize) {
        self.comparisons.fetch_add(1, Ordering::Relaxed);
    }

    fn swap(&self, _i: usize, _j: usize) {
        self.exchanges.fetch_add(1, Ordering::Relaxed);
    }

    fn state_change(&self, _index: usize, _state: ElementState) {
        self.state_changes.fetch_add(1, Ordering::Relaxed);
    }

    fn completed(&self) {
        self.completions.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_sink_tallies_each_event_kind() {
        let sink = CountingEventSink::new();

        sink.compare(0, 1);
        sink.compare(1, 2);
        sink.swap(0, 1);
        sink.state_change(2, ElementState::Sorted);
        sink.completed();

        assert_eq!(sink.comparisons(), 2);
        assert_eq!(sink.exchanges(), 1);
        assert_eq!(sink.state_changes(), 1);
        assert_eq!(sink.completions(), 1);
    }
}
