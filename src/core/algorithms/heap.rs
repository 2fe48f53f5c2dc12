use crate::core::algorithms::SortAlgorithm;
use crate::core::data::ElementState;
use crate::core::step::StepContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Sift the next parent node during heap construction.
    BuildHeap,
    /// Compare the current sift root against its left child.
    SiftLeft,
    /// Compare against the right child, then resolve the sift step.
    SiftRight,
    /// Swap the heap root with the tail and shrink the heap.
    ExtractMax,
}

/// What to do once the current sift finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterSift {
    /// Continue building: move to the next parent, or start extracting.
    ContinueBuild,
    /// Continue extracting from the shrunken heap.
    ContinueExtract,
}

/// Heap sort over the implicit array heap: build a max-heap by sifting
/// down from the last parent, then repeatedly swap the root with the heap
/// tail and restore the heap. Each child comparison is its own step.
#[derive(Debug)]
pub struct HeapSort {
    len: usize,
    heap_size: usize,
    build_remaining: usize,
    sift_root: usize,
    sift_largest: usize,
    after_sift: AfterSift,
    sorted: bool,
    halted: bool,
    phase: Phase,
}

impl HeapSort {
    #[must_use]
    pub fn new() -> Self {
        let mut algorithm = Self {
            len: 0,
            heap_size: 0,
            build_remaining: 0,
            sift_root: 0,
            sift_largest: 0,
            after_sift: AfterSift::ContinueBuild,
            sorted: false,
            halted: false,
            phase: Phase::BuildHeap,
        };
        algorithm.reset(0);
        algorithm
    }

    fn begin_sift(&mut self, root: usize, ctx: &mut StepContext<'_>) {
        self.sift_root = root;
        self.sift_largest = root;
        ctx.reset_range(0..self.heap_size);
        ctx.set_state(root, ElementState::Pivot);
        self.phase = Phase::SiftLeft;
        ctx.request_visual_update();
    }

    /// The sift at the current root is settled; hand control back to the
    /// build or extract phase.
    fn end_sift(&mut self, ctx: &mut StepContext<'_>) {
        ctx.reset_range(0..self.heap_size);
        match self.after_sift {
            AfterSift::ContinueBuild => {
                self.build_remaining -= 1;
                self.phase = Phase::BuildHeap;
            }
            AfterSift::ContinueExtract => {
                self.phase = Phase::ExtractMax;
            }
        }
        ctx.request_visual_update();
    }

    fn step_build_heap(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.build_remaining > 0 {
            self.after_sift = AfterSift::ContinueBuild;
            self.begin_sift(self.build_remaining - 1, ctx);
            return true;
        }

        self.phase = Phase::ExtractMax;
        true
    }

    fn step_sift_left(&mut self, ctx: &mut StepContext<'_>) -> bool {
        let left = 2 * self.sift_root + 1;
        if left >= self.heap_size {
            // Leaf node, nothing to restore.
            self.end_sift(ctx);
            return true;
        }

        ctx.compare(self.sift_largest, left);
        if ctx.value(left) > ctx.value(self.sift_largest) {
            self.sift_largest = left;
        }
        self.phase = Phase::SiftRight;
        ctx.request_visual_update();
        true
    }

    fn step_sift_right(&mut self, ctx: &mut StepContext<'_>) -> bool {
        let right = 2 * self.sift_root + 2;
        if right < self.heap_size {
            ctx.compare(self.sift_largest, right);
            if ctx.value(right) > ctx.value(self.sift_largest) {
                self.sift_largest = right;
            }
        }

        if self.sift_largest != self.sift_root {
            ctx.exchange(self.sift_root, self.sift_largest);
            // The displaced value may violate the heap further down.
            let next_root = self.sift_largest;
            self.begin_sift(next_root, ctx);
        } else {
            self.end_sift(ctx);
        }
        true
    }

    fn step_extract_max(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.heap_size > 1 {
            let tail = self.heap_size - 1;
            ctx.exchange(0, tail);
            ctx.set_state(tail, ElementState::Sorted);
            self.heap_size -= 1;
            self.after_sift = AfterSift::ContinueExtract;
            self.begin_sift(0, ctx);
            return true;
        }

        if self.heap_size == 1 {
            ctx.set_state(0, ElementState::Sorted);
        }
        self.sorted = true;
        ctx.complete();
        false
    }
}

impl Default for HeapSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortAlgorithm for HeapSort {
    fn name(&self) -> &'static str {
        "Heap Sort"
    }

    fn reset(&mut self, len: usize) {
        self.len = len;
        self.heap_size = len;
        self.build_remaining = len / 2;
        self.sift_root = 0;
        self.sift_largest = 0;
        self.after_sift = AfterSift::ContinueBuild;
        self.sorted = len <= 1;
        self.halted = false;
        self.phase = Phase::BuildHeap;
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
            Phase::BuildHeap => self.step_build_heap(ctx),
            Phase::SiftLeft => self.step_sift_left(ctx),
            Phase::SiftRight => self.step_sift_right(ctx),
            Phase::ExtractMax => self.step_extract_max(ctx),
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
        harness::assert_sorts_standard_inputs(|| Box::new(HeapSort::new()));
    }

    #[test]
    fn all_equal_input_completes_sorted() {
        let mut algorithm = HeapSort::new();
        let mut dataset = Dataset::from_values(&[4, 4, 4, 4]);

        harness::drive(&mut algorithm, &mut dataset, &RecordingSink::default());

        assert_eq!(dataset.values(), vec![4, 4, 4, 4]);
        assert!(algorithm.is_sorted());
    }

    #[test]
    fn two_element_input_restores_heap_before_extracting() {
        // A node with only a left child still has to apply its sift swap.
        let mut algorithm = HeapSort::new();
        let mut dataset = Dataset::from_values(&[1, 2]);

        harness::drive(&mut algorithm, &mut dataset, &RecordingSink::default());

        assert_eq!(dataset.values(), vec![1, 2]);
        assert!(algorithm.is_sorted());
    }

    #[test]
    fn sorted_suffix_grows_from_the_tail() {
        let mut algorithm = HeapSort::new();
        let mut dataset = Dataset::from_values(&[3, 9, 1, 7, 5]);
        let sink = RecordingSink::default();

        harness::drive(&mut algorithm, &mut dataset, &sink);

        assert_eq!(dataset.values(), vec![1, 3, 5, 7, 9]);
        let sorted_marks: Vec<usize> = sink
            .events()
            .into_iter()
            .filter_map(|event| match event {
                harness::Recorded::StateChange(index, ElementState::Sorted) => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(sorted_marks, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn reset_mid_sort_is_idempotent() {
        let mut algorithm = HeapSort::new();
        assert_reset_is_idempotent(&mut algorithm, &[12, 3, 14, 1, 9, 2, 8], 8);
    }

    #[test]
    fn stop_request_halts_cleanly() {
        let mut algorithm = HeapSort::new();
        assert_stop_halts_without_transients(&mut algorithm, &[12, 3, 14, 1, 9, 2, 8], 6);
    }
}
