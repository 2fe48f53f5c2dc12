use crate::core::algorithms::SortAlgorithm;
use crate::core::data::ElementState;
use crate::core::step::StepContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Bubbling the largest element rightwards.
    ForwardPass,
    /// Bubbling the smallest element leftwards.
    BackwardPass,
    /// A full forward+backward cycle finished; decide whether to repeat.
    CheckingCycle,
}

/// Cocktail shaker sort: a two-ended bubble sort over a window that
/// shrinks from both sides. A cycle without exchanges ends the sort.
#[derive(Debug)]
pub struct CocktailSort {
    len: usize,
    start: usize,
    end: usize,
    cursor: usize,
    swapped_in_cycle: bool,
    sorted: bool,
    halted: bool,
    phase: Phase,
}

impl CocktailSort {
    #[must_use]
    pub fn new() -> Self {
        let mut algorithm = Self {
            len: 0,
            start: 0,
            end: 0,
            cursor: 0,
            swapped_in_cycle: false,
            sorted: false,
            halted: false,
            phase: Phase::ForwardPass,
        };
        algorithm.reset(0);
        algorithm
    }

    fn finish(&mut self, ctx: &mut StepContext<'_>) -> bool {
        for index in 0..self.len {
            if ctx.state(index) != ElementState::Sorted {
                ctx.set_state(index, ElementState::Sorted);
            }
        }
        self.sorted = true;
        ctx.complete();
        false
    }

    fn step_forward(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.cursor < self.end {
            ctx.compare(self.cursor, self.cursor + 1);
            if ctx.value(self.cursor) > ctx.value(self.cursor + 1) {
                ctx.exchange(self.cursor, self.cursor + 1);
                self.swapped_in_cycle = true;
            }
            self.cursor += 1;
            return true;
        }

        ctx.set_state(self.end, ElementState::Sorted);
        self.end -= 1;
        self.cursor = self.end;
        self.phase = Phase::BackwardPass;
        ctx.reset_range(self.start..self.end + 1);
        ctx.request_visual_update();
        true
    }

    fn step_backward(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.cursor > self.start {
            ctx.compare(self.cursor - 1, self.cursor);
            if ctx.value(self.cursor - 1) > ctx.value(self.cursor) {
                ctx.exchange(self.cursor - 1, self.cursor);
                self.swapped_in_cycle = true;
            }
            self.cursor -= 1;
            return true;
        }

        ctx.set_state(self.start, ElementState::Sorted);
        self.start += 1;
        self.phase = Phase::CheckingCycle;
        true
    }

    fn step_checking_cycle(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if !self.swapped_in_cycle {
            return self.finish(ctx);
        }

        self.cursor = self.start;
        self.swapped_in_cycle = false;
        self.phase = Phase::ForwardPass;
        ctx.reset_range(self.start..self.end + 1);
        ctx.request_visual_update();
        true
    }
}

impl Default for CocktailSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortAlgorithm for CocktailSort {
    fn name(&self) -> &'static str {
        "Cocktail Sort"
    }

    fn reset(&mut self, len: usize) {
        self.len = len;
        self.start = 0;
        self.end = len.saturating_sub(1);
        self.cursor = 0;
        self.swapped_in_cycle = false;
        self.sorted = len <= 1;
        self.halted = false;
        self.phase = Phase::ForwardPass;
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

        // The window has closed; everything left is in place.
        if self.start >= self.end {
            return self.finish(ctx);
        }

        match self.phase {
            Phase::ForwardPass => self.step_forward(ctx),
            Phase::BackwardPass => self.step_backward(ctx),
            Phase::CheckingCycle => self.step_checking_cycle(ctx),
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
        self, RecordingSink, assert_reset_is_idempotent, assert_stop_halts_without_transients,
    };
    use crate::core::data::Dataset;

    #[test]
    fn sorts_standard_inputs() {
        harness::assert_sorts_standard_inputs(|| Box::new(CocktailSort::new()));
    }

    #[test]
    fn backward_pass_pulls_small_tail_element_home_early() {
        // A small element at the tail is cocktail sort's best case; plain
        // bubble sort would need a full pass per position.
        let mut algorithm = CocktailSort::new();
        let mut dataset = Dataset::from_values(&[2, 3, 4, 5, 1]);
        let sink = RecordingSink::default();

        harness::drive(&mut algorithm, &mut dataset, &sink);

        assert_eq!(dataset.values(), vec![1, 2, 3, 4, 5]);
        // One forward pass (4 compares), one backward pass (3), and the
        // second cycle's no-exchange forward (2) + backward (1).
        assert_eq!(sink.comparisons().len(), 10);
    }

    #[test]
    fn reset_mid_sort_is_idempotent() {
        let mut algorithm = CocktailSort::new();
        assert_reset_is_idempotent(&mut algorithm, &[6, 2, 9, 1, 5, 3], 7);
    }

    #[test]
    fn stop_request_halts_cleanly() {
        let mut algorithm = CocktailSort::new();
        assert_stop_halts_without_transients(&mut algorithm, &[6, 2, 9, 1, 5, 3], 5);
    }
}
