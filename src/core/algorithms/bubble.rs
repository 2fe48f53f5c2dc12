use crate::core::algorithms::SortAlgorithm;
use crate::core::data::ElementState;
use crate::core::step::StepContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Comparing adjacent pairs within the current pass.
    Comparing,
    /// A pass just finished; decide whether another is needed.
    CheckingPass,
}

/// Bubble sort as nested index counters: one adjacent comparison (plus the
/// exchange it may trigger) per step. A pass without exchanges ends the
/// sort early.
#[derive(Debug)]
pub struct BubbleSort {
    len: usize,
    pass: usize,
    cursor: usize,
    swapped_in_pass: bool,
    sorted: bool,
    halted: bool,
    phase: Phase,
}

impl BubbleSort {
    #[must_use]
    pub fn new() -> Self {
        let mut algorithm = Self {
            len: 0,
            pass: 0,
            cursor: 0,
            swapped_in_pass: false,
            sorted: false,
            halted: false,
            phase: Phase::Comparing,
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

    fn step_comparing(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.pass >= self.len - 1 {
            return self.finish(ctx);
        }

        let unsorted_end = self.len - 1 - self.pass;
        if self.cursor < unsorted_end {
            ctx.compare(self.cursor, self.cursor + 1);
            if ctx.value(self.cursor) > ctx.value(self.cursor + 1) {
                ctx.exchange(self.cursor, self.cursor + 1);
                self.swapped_in_pass = true;
            }
            self.cursor += 1;
            return true;
        }

        // The largest remaining element has bubbled into place.
        ctx.set_state(unsorted_end, ElementState::Sorted);
        self.phase = Phase::CheckingPass;
        true
    }

    fn step_checking_pass(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if !self.swapped_in_pass {
            return self.finish(ctx);
        }

        self.pass += 1;
        self.cursor = 0;
        self.swapped_in_pass = false;
        self.phase = Phase::Comparing;
        ctx.reset_range(0..self.len);
        ctx.request_visual_update();
        true
    }
}

impl Default for BubbleSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortAlgorithm for BubbleSort {
    fn name(&self) -> &'static str {
        "Bubble Sort"
    }

    fn reset(&mut self, len: usize) {
        self.len = len;
        self.pass = 0;
        self.cursor = 0;
        self.swapped_in_pass = false;
        self.sorted = len <= 1;
        self.halted = false;
        self.phase = Phase::Comparing;
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
            Phase::Comparing => self.step_comparing(ctx),
            Phase::CheckingPass => self.step_checking_pass(ctx),
        }
    }

    fn is_sorted(&self) -> bool {
        self.sorted
    }
}
