use crate::core::algorithms::SortAlgorithm;
use crate::core::data::ElementState;
use crate::core::step::StepContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Compute the Knuth gap ring for the current length.
    InitGaps,
    /// Begin the pass for the current gap.
    BeginGap,
    /// Pick the next element of the gap pass.
    SelectElement,
    /// Walk the picked element down its gap chain.
    GapInsertion,
    /// Current gap exhausted; move to the next one.
    GapComplete,
}

/// Shell sort over the Knuth 3k+1 sequence, each ring reduced to `gap/3`.
/// Every gap runs a stride insertion sort whose shifts are position
/// exchanges, one comparison per step.
#[derive(Debug)]
pub struct ShellSort {
    len: usize,
    gaps: Vec<usize>,
    gap_index: usize,
    outer: usize,
    cursor: usize,
    sorted: bool,
    halted: bool,
    phase: Phase,
}

impl ShellSort {
    #[must_use]
    pub fn new() -> Self {
        let mut algorithm = Self {
            len: 0,
            gaps: Vec::new(),
            gap_index: 0,
            outer: 0,
            cursor: 0,
            sorted: false,
            halted: false,
            phase: Phase::InitGaps,
        };
        algorithm.reset(0);
        algorithm
    }

    fn step_init_gaps(&mut self) -> bool {
        self.gaps.clear();
        let mut gap = 1;
        while gap < self.len / 3 {
            gap = 3 * gap + 1;
        }
        while gap > 0 {
            self.gaps.push(gap);
            gap /= 3;
        }

        self.gap_index = 0;
        self.phase = Phase::BeginGap;
        true
    }

    fn step_begin_gap(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.gap_index >= self.gaps.len() {
            for index in 0..self.len {
                ctx.set_state(index, ElementState::Sorted);
            }
            self.sorted = true;
            ctx.complete();
            return false;
        }

        let gap = self.gaps[self.gap_index];
        self.outer = gap;

        if self.outer >= self.len {
            self.gap_index += 1;
            return true;
        }

        // Highlight the leading gap chain for this pass.
        for index in 0..self.len {
            if index % gap == 0 {
                ctx.set_state(index, ElementState::Pivot);
            } else {
                ctx.reset_indices(&[index]);
            }
        }
        self.phase = Phase::SelectElement;
        ctx.request_visual_update();
        true
    }

    fn step_select_element(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.outer >= self.len {
            self.phase = Phase::GapComplete;
            return true;
        }

        ctx.set_state(self.outer, ElementState::Swap);
        self.cursor = self.outer;
        self.phase = Phase::GapInsertion;
        ctx.request_visual_update();
        true
    }

    fn step_gap_insertion(&mut self, ctx: &mut StepContext<'_>) -> bool {
        let gap = self.gaps[self.gap_index];

        if self.cursor >= gap {
            ctx.compare(self.cursor - gap, self.cursor);
            if ctx.value(self.cursor - gap) > ctx.value(self.cursor) {
                ctx.exchange(self.cursor - gap, self.cursor);
                self.cursor -= gap;
                return true;
            }
        }

        self.outer += 1;
        self.phase = Phase::SelectElement;
        ctx.request_visual_update();
        true
    }

    fn step_gap_complete(&mut self, ctx: &mut StepContext<'_>) -> bool {
        self.gap_index += 1;
        ctx.reset_range(0..self.len);
        self.phase = Phase::BeginGap;
        ctx.request_visual_update();
        true
    }
}

impl Default for ShellSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortAlgorithm for ShellSort {
    fn name(&self) -> &'static str {
        "Shell Sort"
    }

    fn reset(&mut self, len: usize) {
        self.len = len;
        self.gaps.clear();
        self.gap_index = 0;
        self.outer = 0;
        self.cursor = 0;
        self.sorted = len <= 1;
        self.halted = false;
        self.phase = Phase::InitGaps;
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
            Phase::InitGaps => self.step_init_gaps(),
            Phase::BeginGap => self.step_begin_gap(ctx),
            Phase::SelectElement => self.step_select_element(ctx),
            Phase::GapInsertion => self.step_gap_insertion(ctx),
            Phase::GapComplete => self.step_gap_complete(ctx),
        }
    }

    fn is_sorted(&self) -> bool {
        self.sorted
    }
}
