use crate::core::algorithms::SortAlgorithm;
use crate::core::data::ElementState;
use crate::core::step::StepContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SortRange {
    low: usize,
    high: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Pop the next range off the work stack.
    TakeRange,
    /// Mark the range's rightmost element as pivot.
    SelectPivot,
    /// One pivot comparison (and possibly one exchange) per step.
    Partitioning,
    /// Pivot placed; push the sub-ranges.
    PartitionComplete,
}

/// Iterative quicksort: recursion becomes an explicit stack of
/// `(low, high)` ranges. Rightmost-element pivot; values equal to the
/// pivot go to the low side, which keeps duplicate-heavy inputs correct
/// without extra logic.
#[derive(Debug)]
pub struct QuickSort {
    len: usize,
    stack: Vec<SortRange>,
    current: Option<SortRange>,
    pivot: usize,
    cursor: usize,
    store: usize,
    sorted: bool,
    halted: bool,
    phase: Phase,
}

impl QuickSort {
    #[must_use]
    pub fn new() -> Self {
        let mut algorithm = Self {
            len: 0,
            stack: Vec::new(),
            current: None,
            pivot: 0,
            cursor: 0,
            store: 0,
            sorted: false,
            halted: false,
            phase: Phase::TakeRange,
        };
        algorithm.reset(0);
        algorithm
    }

    fn step_take_range(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.stack.is_empty() {
            for index in 0..self.len {
                if ctx.state(index) != ElementState::Sorted {
                    ctx.set_state(index, ElementState::Sorted);
                }
            }
            self.sorted = true;
            ctx.complete();
            return false;
        }

        self.phase = Phase::SelectPivot;
        true
    }

    fn step_select_pivot(&mut self, ctx: &mut StepContext<'_>) -> bool {
        let Some(range) = self.stack.pop() else {
            self.phase = Phase::TakeRange;
            return true;
        };

        if range.low >= range.high {
            ctx.set_state(range.low, ElementState::Sorted);
            self.phase = Phase::TakeRange;
            return true;
        }

        self.current = Some(range);
        self.pivot = range.high;
        self.cursor = range.low;
        self.store = range.low;
        ctx.set_state(self.pivot, ElementState::Pivot);
        self.phase = Phase::Partitioning;
        ctx.request_visual_update();
        true
    }

    fn step_partitioning(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.cursor < self.pivot {
            ctx.compare(self.cursor, self.pivot);
            if ctx.value(self.cursor) <= ctx.value(self.pivot) {
                if self.cursor != self.store {
                    ctx.exchange(self.cursor, self.store);
                } else {
                    ctx.set_state(self.cursor, ElementState::Swap);
                    ctx.request_visual_update();
                }
                self.store += 1;
            } else {
                ctx.request_visual_update();
            }
            self.cursor += 1;
            return true;
        }

        // Swing the pivot into its final slot.
        if self.store != self.pivot {
            ctx.exchange(self.store, self.pivot);
        }
        ctx.set_state(self.store, ElementState::Sorted);
        self.phase = Phase::PartitionComplete;
        true
    }

    fn step_partition_complete(&mut self, ctx: &mut StepContext<'_>) -> bool {
        let Some(range) = self.current.take() else {
            self.phase = Phase::TakeRange;
            return true;
        };

        ctx.reset_range(range.low..range.high + 1);

        // Right side first so the left range is processed next.
        if self.store + 1 < range.high {
            self.stack.push(SortRange {
                low: self.store + 1,
                high: range.high,
            });
        } else if self.store + 1 == range.high {
            ctx.set_state(range.high, ElementState::Sorted);
        }

        if self.store > range.low + 1 {
            self.stack.push(SortRange {
                low: range.low,
                high: self.store - 1,
            });
        } else if self.store == range.low + 1 {
            ctx.set_state(range.low, ElementState::Sorted);
        }

        self.phase = Phase::TakeRange;
        ctx.request_visual_update();
        true
    }
}

impl Default for QuickSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortAlgorithm for QuickSort {
    fn name(&self) -> &'static str {
        "Quick Sort"
    }

    fn reset(&mut self, len: usize) {
        self.len = len;
        self.stack.clear();
        self.current = None;
        self.pivot = 0;
        self.cursor = 0;
        self.store = 0;
        self.sorted = len <= 1;
        self.halted = false;
        self.phase = Phase::TakeRange;

        if !self.sorted {
            self.stack.push(SortRange {
                low: 0,
                high: len - 1,
            });
            self.phase = Phase::SelectPivot;
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
            Phase::TakeRange => self.step_take_range(ctx),
            Phase::SelectPivot => self.step_select_pivot(ctx),
            Phase::Partitioning => self.step_partitioning(ctx),
            Phase::PartitionComplete => self.step_partition_complete(ctx),
        }
    }

    fn is_sorted(&self) -> bool {
        self.sorted
    }
}
