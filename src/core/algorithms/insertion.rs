use crate::core::algorithms::SortAlgorithm;
use crate::core::data::ElementState;
use crate::core::step::StepContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Pick the next element to insert into the sorted prefix.
    SelectKey,
    /// Walk the key left one adjacent comparison at a time.
    Shifting,
    /// The key reached its slot; extend the sorted prefix.
    Place,
}

/// Insertion sort with an outer cursor and a shifting cursor. The key
/// element moves left through adjacent position exchanges, so its Pivot
/// mark travels with it and element identity is preserved across steps.
#[derive(Debug)]
pub struct InsertionSort {
    len: usize,
    outer: usize,
    cursor: usize,
    sorted: bool,
    halted: bool,
    phase: Phase,
}

impl InsertionSort {
    #[must_use]
    pub fn new() -> Self {
        let mut algorithm = Self {
            len: 0,
            outer: 1,
            cursor: 0,
            sorted: false,
            halted: false,
            phase: Phase::SelectKey,
        };
        algorithm.reset(0);
        algorithm
    }

    fn step_select_key(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.outer >= self.len {
            for index in 0..self.len {
                if ctx.state(index) != ElementState::Sorted {
                    ctx.set_state(index, ElementState::Sorted);
                }
            }
            self.sorted = true;
            ctx.complete();
            return false;
        }

        for index in 0..self.outer {
            if ctx.state(index) != ElementState::Sorted {
                ctx.set_state(index, ElementState::Sorted);
            }
        }
        ctx.reset_range(self.outer..self.len);
        ctx.set_state(self.outer, ElementState::Pivot);
        self.cursor = self.outer;
        self.phase = Phase::Shifting;
        ctx.request_visual_update();
        true
    }

    fn step_shifting(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.cursor > 0 {
            ctx.compare(self.cursor - 1, self.cursor);
            if ctx.value(self.cursor - 1) > ctx.value(self.cursor) {
                // The exchange carries the key's Pivot mark down with it.
                ctx.exchange(self.cursor - 1, self.cursor);
                ctx.set_state(self.cursor - 1, ElementState::Pivot);
                self.cursor -= 1;
                return true;
            }
        }

        self.phase = Phase::Place;
        true
    }

    fn step_place(&mut self, ctx: &mut StepContext<'_>) -> bool {
        for index in 0..=self.outer {
            if ctx.state(index) != ElementState::Sorted {
                ctx.set_state(index, ElementState::Sorted);
            }
        }
        self.outer += 1;
        self.phase = Phase::SelectKey;
        ctx.request_visual_update();
        true
    }
}

impl Default for InsertionSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortAlgorithm for InsertionSort {
    fn name(&self) -> &'static str {
        "Insertion Sort"
    }

    fn reset(&mut self, len: usize) {
        self.len = len;
        self.outer = 1;
        self.cursor = 0;
        self.sorted = len <= 1;
        self.halted = false;
        self.phase = Phase::SelectKey;
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
            Phase::SelectKey => self.step_select_key(ctx),
            Phase::Shifting => self.step_shifting(ctx),
            Phase::Place => self.step_place(ctx),
        }
    }

    fn is_sorted(&self) -> bool {
        self.sorted
    }
}
