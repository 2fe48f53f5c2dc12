use crate::core::algorithms::SortAlgorithm;
use crate::core::data::ElementState;
use crate::core::step::StepContext;

/// Work item on the simulated recursion stack. A `Merge` item is pushed
/// before its two child `Sort` items so it pops only after both children
/// have been fully processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkItem {
    Sort { start: usize, end: usize },
    Merge { left: usize, mid: usize, right: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Pop work items, splitting sort ranges into children.
    Splitting,
    /// Set up cursors and highlight the runs about to merge.
    PrepareMerge,
    /// One head-to-head comparison per step.
    CompareHeads,
    /// Left run still has elements after the right ran dry.
    DrainLeft,
    /// Right run still has elements after the left ran dry.
    DrainRight,
    /// Write the merged buffer back, one slot per step.
    CopyBack,
}

/// Head comparison of the merge pass. `<=` keeps elements of the left run
/// ahead of equal elements from the right run, so the pass is stable.
fn prefers_left(left: i32, right: i32) -> bool {
    left <= right
}

/// Merge sort with an explicit stack of tagged sort/merge ranges and a
/// temporary buffer per merge.
#[derive(Debug)]
pub struct MergeSort {
    len: usize,
    stack: Vec<WorkItem>,
    buffer: Vec<i32>,
    left: usize,
    mid: usize,
    right: usize,
    left_cursor: usize,
    right_cursor: usize,
    write_cursor: usize,
    sorted: bool,
    halted: bool,
    phase: Phase,
}

impl MergeSort {
    #[must_use]
    pub fn new() -> Self {
        let mut algorithm = Self {
            len: 0,
            stack: Vec::new(),
            buffer: Vec::new(),
            left: 0,
            mid: 0,
            right: 0,
            left_cursor: 0,
            right_cursor: 0,
            write_cursor: 0,
            sorted: false,
            halted: false,
            phase: Phase::Splitting,
        };
        algorithm.reset(0);
        algorithm
    }

    fn step_splitting(&mut self, ctx: &mut StepContext<'_>) -> bool {
        let Some(item) = self.stack.pop() else {
            for index in 0..self.len {
                if ctx.state(index) != ElementState::Sorted {
                    ctx.set_state(index, ElementState::Sorted);
                }
            }
            self.sorted = true;
            ctx.complete();
            return false;
        };

        match item {
            WorkItem::Merge { left, mid, right } => {
                self.left = left;
                self.mid = mid;
                self.right = right;
                self.phase = Phase::PrepareMerge;
            }
            WorkItem::Sort { start, end } => {
                if start < end {
                    let mid = start + (end - start) / 2;
                    self.stack.push(WorkItem::Merge {
                        left: start,
                        mid,
                        right: end,
                    });
                    self.stack.push(WorkItem::Sort {
                        start: mid + 1,
                        end,
                    });
                    self.stack.push(WorkItem::Sort { start, end: mid });
                } else {
                    // Single-element range: the recursion base case.
                    ctx.set_state(start, ElementState::Sorted);
                }
            }
        }
        true
    }

    fn step_prepare_merge(&mut self, ctx: &mut StepContext<'_>) -> bool {
        self.buffer.clear();
        self.left_cursor = self.left;
        self.right_cursor = self.mid + 1;
        self.write_cursor = 0;

        for index in self.left..=self.right {
            ctx.set_state(index, ElementState::Pivot);
        }
        self.phase = Phase::CompareHeads;
        ctx.request_visual_update();
        true
    }

    fn step_compare_heads(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.left_cursor <= self.mid && self.right_cursor <= self.right {
            ctx.compare(self.left_cursor, self.right_cursor);
            if prefers_left(ctx.value(self.left_cursor), ctx.value(self.right_cursor)) {
                ctx.set_state(self.left_cursor, ElementState::Swap);
                self.buffer.push(ctx.value(self.left_cursor));
                self.left_cursor += 1;
            } else {
                ctx.set_state(self.right_cursor, ElementState::Swap);
                self.buffer.push(ctx.value(self.right_cursor));
                self.right_cursor += 1;
            }
            ctx.request_visual_update();
            return true;
        }

        self.phase = if self.left_cursor <= self.mid {
            Phase::DrainLeft
        } else {
            Phase::DrainRight
        };
        true
    }

    fn step_drain_left(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.left_cursor <= self.mid {
            ctx.set_state(self.left_cursor, ElementState::Swap);
            self.buffer.push(ctx.value(self.left_cursor));
            self.left_cursor += 1;
            ctx.request_visual_update();
            return true;
        }

        self.write_cursor = 0;
        self.phase = Phase::CopyBack;
        true
    }

    fn step_drain_right(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.right_cursor <= self.right {
            ctx.set_state(self.right_cursor, ElementState::Swap);
            self.buffer.push(ctx.value(self.right_cursor));
            self.right_cursor += 1;
            ctx.request_visual_update();
            return true;
        }

        self.write_cursor = 0;
        self.phase = Phase::CopyBack;
        true
    }

    fn step_copy_back(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.write_cursor < self.buffer.len() {
            let target = self.left + self.write_cursor;
            ctx.set_value(target, self.buffer[self.write_cursor]);
            ctx.set_state(target, ElementState::Sorted);
            self.write_cursor += 1;
            ctx.request_visual_update();
            return true;
        }

        for index in self.left..=self.right {
            if ctx.state(index) != ElementState::Sorted {
                ctx.set_state(index, ElementState::Sorted);
            }
        }
        self.phase = Phase::Splitting;
        ctx.request_visual_update();
        true
    }
}

impl Default for MergeSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortAlgorithm for MergeSort {
    fn name(&self) -> &'static str {
        "Merge Sort"
    }

    fn reset(&mut self, len: usize) {
        self.len = len;
        self.stack.clear();
        self.buffer.clear();
        self.left = 0;
        self.mid = 0;
        self.right = 0;
        self.left_cursor = 0;
        self.right_cursor = 0;
        self.write_cursor = 0;
        self.sorted = len <= 1;
        self.halted = false;
        self.phase = Phase::Splitting;

        if !self.sorted {
            self.stack.push(WorkItem::Sort {
                start: 0,
                end: len - 1,
            });
        }
    }

    fn next_step(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.sorted {
            ctx.complete();
            return false;
        }
        if self.halted {
            return false;
        }
        if ctx.is_stop_requested() {
            ctx.clear_transient_marks();
            self.halted = true;
            return false;
        }

        match self.phase {
            Phase::Splitting => self.step_splitting(ctx),
            Phase::PrepareMerge => self.step_prepare_merge(ctx),
            Phase::CompareHeads => self.step_compare_heads(ctx),
            Phase::DrainLeft => self.step_drain_left(ctx),
            Phase::DrainRight => self.step_drain_right(ctx),
            Phase::CopyBack => self.step_copy_back(ctx),
        }
    }

    fn is_sorted(&self) -> bool {
        self.sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::algorithms::harness::{
        self, Recorded, RecordingSink, assert_reset_is_idempotent,
        assert_stop_halts_without_transients,
    };
    use crate::core::data::Dataset;

    #[test]
    fn sorts_standard_inputs() {
        harness::assert_sorts_standard_inputs(|| Box::new(MergeSort::new()));
    }

    #[test]
    fn head_comparison_prefers_the_left_run_on_ties() {
        assert!(prefers_left(2, 2));
        assert!(prefers_left(1, 2));
        assert!(!prefers_left(3, 2));
    }

    #[test]
    fn tied_heads_take_the_left_element_first() {
        // [2, 2, 1, 1] merges its two runs with every head-to-head tied;
        // the left cursor must always win, preserving relative order.
        let mut algorithm = MergeSort::new();
        let mut dataset = Dataset::from_values(&[2, 2, 1, 1]);
        let sink = RecordingSink::default();

        harness::drive(&mut algorithm, &mut dataset, &sink);

        assert_eq!(dataset.values(), vec![1, 1, 2, 2]);

        // The merges of [2|2] and [1|1] are the tied head-to-heads; the
        // Swap mark (the taken element) must land on the left index.
        let events = sink.events();
        let mut tied_compares_seen = 0;
        for window in events.windows(2) {
            if let [Recorded::Compare(i, j), Recorded::StateChange(taken, ElementState::Swap)] =
                window
            {
                if (*i, *j) == (0, 1) || (*i, *j) == (2, 3) {
                    tied_compares_seen += 1;
                    assert_eq!(taken, i, "tied heads must take the left run's element");
                }
            }
        }
        assert_eq!(tied_compares_seen, 2);
    }

    #[test]
    fn merge_items_pop_after_both_children() {
        let mut algorithm = MergeSort::new();
        algorithm.reset(4);

        // Initial split of [0,3] must leave the merge item at the bottom.
        assert_eq!(algorithm.stack, vec![WorkItem::Sort { start: 0, end: 3 }]);
        let mut dataset = Dataset::from_values(&[4, 3, 2, 1]);
        let sink = RecordingSink::default();
        algorithm.initialize(&dataset);
        harness::step_n(&mut algorithm, &mut dataset, &sink, 1);

        assert_eq!(
            algorithm.stack,
            vec![
                WorkItem::Merge {
                    left: 0,
                    mid: 1,
                    right: 3
                },
                WorkItem::Sort { start: 2, end: 3 },
                WorkItem::Sort { start: 0, end: 1 },
            ]
        );
    }

    #[test]
    fn reset_mid_sort_is_idempotent() {
        let mut algorithm = MergeSort::new();
        assert_reset_is_idempotent(&mut algorithm, &[9, 4, 6, 2, 8, 5, 1], 11);
    }

    #[test]
    fn stop_request_halts_cleanly() {
        let mut algorithm = MergeSort::new();
        assert_stop_halts_without_transients(&mut algorithm, &[9, 4, 6, 2, 8, 5, 1], 9);
    }
}
