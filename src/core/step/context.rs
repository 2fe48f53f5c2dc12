use crate::core::data::{Dataset, ElementState};
use crate::core::step::control::StepControl;
use crate::core::step::events::StepEventSink;
use std::collections::HashSet;
use std::time::Duration;
use tracing::warn;

/// Bookkeeping that outlives any single step: which indices carry
/// short-lived Compare/Swap marks from the previous step, and whether the
/// completion event has already gone out.
#[derive(Debug, Default)]
pub struct SessionMarks {
    transient: HashSet<usize>,
    completion_sent: bool,
}

impl SessionMarks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Per-step surface an algorithm works through. Bundles mutable access to
/// the dataset with the two session capabilities: the event sink and the
/// cancellation/pacing control. All display-state mutation funnels through
/// here so mark bookkeeping stays in one place.
pub struct StepContext<'a> {
    data: &'a mut Dataset,
    events: &'a dyn StepEventSink,
    control: &'a dyn StepControl,
    marks: &'a mut SessionMarks,
    update_requested: bool,
}

impl<'a> StepContext<'a> {
    pub fn new(
        data: &'a mut Dataset,
        events: &'a dyn StepEventSink,
        control: &'a dyn StepControl,
        marks: &'a mut SessionMarks,
    ) -> Self {
        Self {
            data,
            events,
            control,
            marks,
            update_requested: false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value read for the algorithm's own logic. Indexing past the end is
    /// an algorithm bug and panics; the driver contains the panic and ends
    /// the session with an error.
    #[must_use]
    pub fn value(&self, index: usize) -> i32 {
        self.data.value(index)
    }

    #[must_use]
    pub fn state(&self, index: usize) -> ElementState {
        self.data.state(index)
    }

    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.control.is_stop_requested()
    }

    #[must_use]
    pub fn pacing_delay(&self) -> Duration {
        self.control.pacing_delay()
    }

    /// Marks two indices as under comparison and forwards the event. The
    /// previous step's Compare/Swap marks are cleared first.
    pub fn compare(&mut self, i: usize, j: usize) {
        if !self.check_pair(i, j, "compare") {
            return;
        }

        self.clear_previous_marks();
        self.data.set_state(i, ElementState::Compare);
        self.data.set_state(j, ElementState::Compare);
        self.marks.transient.insert(i);
        self.marks.transient.insert(j);
        self.events.compare(i, j);
    }

    /// The shared report-then-exchange primitive: announces the swap and
    /// marks both slots before the slots actually move, so an observer can
    /// render the "about to swap" moment distinctly from the result.
    pub fn exchange(&mut self, i: usize, j: usize) {
        if !self.check_pair(i, j, "exchange") {
            return;
        }

        self.clear_previous_marks();
        self.events.swap(i, j);
        self.data.set_state(i, ElementState::Swap);
        self.data.set_state(j, ElementState::Swap);
        self.marks.transient.insert(i);
        self.marks.transient.insert(j);
        self.data.swap(i, j);
        self.update_requested = true;
    }

    pub fn set_state(&mut self, index: usize, state: ElementState) {
        if !self.check_index(index, "state change") {
            return;
        }

        if matches!(
            state,
            ElementState::Sorted | ElementState::Pivot | ElementState::Normal
        ) {
            self.marks.transient.remove(&index);
        }
        self.data.set_state(index, state);
        self.events.state_change(index, state);
    }

    /// Value overwrite for copy-back phases (merge, tree write-back).
    pub fn set_value(&mut self, index: usize, value: i32) {
        if !self.check_index(index, "value write") {
            return;
        }

        self.data.set_value(index, value);
    }

    /// Bulk-clears a half-open index range back to Normal without touching
    /// Sorted positions. Silent: no per-index events.
    pub fn reset_range(&mut self, range: std::ops::Range<usize>) {
        for index in range {
            if index >= self.data.len() {
                break;
            }
            if self.data.state(index) != ElementState::Sorted {
                self.data.set_state(index, ElementState::Normal);
                self.marks.transient.remove(&index);
            }
        }
    }

    pub fn reset_indices(&mut self, indices: &[usize]) {
        for &index in indices {
            if index < self.data.len() && self.data.state(index) != ElementState::Sorted {
                self.data.set_state(index, ElementState::Normal);
                self.marks.transient.remove(&index);
            }
        }
    }

    /// Restores the neutral baseline: every non-Sorted element back to
    /// Normal. Used by the cancellation path of every algorithm.
    pub fn clear_transient_marks(&mut self) {
        self.data.clear_transient_states();
        self.marks.transient.clear();
        self.update_requested = true;
    }

    /// Forwards the terminal completion event, at most once per session.
    pub fn complete(&mut self) {
        if !self.marks.completion_sent {
            self.marks.completion_sent = true;
            self.events.completed();
        }
    }

    /// Advisory hint that a snapshot should be published; the driver
    /// decides the actual cadence.
    pub fn request_visual_update(&mut self) {
        self.update_requested = true;
    }

    #[must_use]
    pub fn update_requested(&self) -> bool {
        self.update_requested
    }

    fn clear_previous_marks(&mut self) {
        let previous: Vec<usize> = self.marks.transient.drain().collect();
        for index in previous {
            if index >= self.data.len() {
                continue;
            }
            let state = self.data.state(index);
            if state != ElementState::Sorted && state != ElementState::Pivot {
                self.data.set_state(index, ElementState::Normal);
            }
        }
    }

    fn check_index(&self, index: usize, operation: &str) -> bool {
        if index < self.data.len() {
            return true;
        }
        warn!(index, len = self.data.len(), operation, "index out of range, ignoring");
        false
    }

    fn check_pair(&self, i: usize, j: usize, operation: &str) -> bool {
        if i < self.data.len() && j < self.data.len() {
            return true;
        }
        warn!(i, j, len = self.data.len(), operation, "indices out of range, ignoring");
        false
    }
}
