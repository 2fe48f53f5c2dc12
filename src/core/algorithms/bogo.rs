use crate::core::algorithms::SortAlgorithm;
use crate::core::data::ElementState;
use crate::core::step::StepContext;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Scan adjacent pairs looking for an inversion.
    CheckIfSorted,
    /// Fisher–Yates, one swap per step.
    Shuffling,
    /// Shuffle finished; clear marks and scan again.
    ShuffleComplete,
}

/// Bogo sort: scan for sortedness, shuffle on the first inversion, repeat.
/// The shuffle itself is stepwise so every exchange stays observable.
#[derive(Debug)]
pub struct BogoSort {
    len: usize,
    check_cursor: usize,
    shuffle_cursor: usize,
    rng: StdRng,
    sorted: bool,
    halted: bool,
    phase: Phase,
}

impl BogoSort {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic variant for tests and reproducible demos.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut algorithm = Self {
            len: 0,
            check_cursor: 0,
            shuffle_cursor: 0,
            rng,
            sorted: false,
            halted: false,
            phase: Phase::CheckIfSorted,
        };
        algorithm.reset(0);
        algorithm
    }

    fn step_check(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.check_cursor < self.len - 1 {
            ctx.compare(self.check_cursor, self.check_cursor + 1);

            if ctx.value(self.check_cursor) > ctx.value(self.check_cursor + 1) {
                // Inversion found: this permutation is a dud.
                ctx.reset_range(0..self.len);
                self.shuffle_cursor = self.len - 1;
                self.phase = Phase::Shuffling;
                ctx.request_visual_update();
                return true;
            }

            ctx.set_state(self.check_cursor, ElementState::Compare);
            self.check_cursor += 1;
            ctx.request_visual_update();
            return true;
        }

        for index in 0..self.len {
            ctx.set_state(index, ElementState::Sorted);
        }
        self.sorted = true;
        ctx.complete();
        false
    }

    fn step_shuffle(&mut self, ctx: &mut StepContext<'_>) -> bool {
        if self.shuffle_cursor > 0 {
            let partner = self.rng.gen_range(0..=self.shuffle_cursor);
            ctx.exchange(partner, self.shuffle_cursor);
            self.shuffle_cursor -= 1;
            return true;
        }

        self.phase = Phase::ShuffleComplete;
        true
    }

    fn step_shuffle_complete(&mut self, ctx: &mut StepContext<'_>) -> bool {
        ctx.reset_range(0..self.len);
        self.check_cursor = 0;
        self.phase = Phase::CheckIfSorted;
        ctx.request_visual_update();
        true
    }
}

impl Default for BogoSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SortAlgorithm for BogoSort {
    fn name(&self) -> &'static str {
        "Bogo Sort"
    }

    fn reset(&mut self, len: usize) {
        self.len = len;
        self.check_cursor = 0;
        self.shuffle_cursor = len.saturating_sub(1);
        self.sorted = len <= 1;
        self.halted = false;
        self.phase = Phase::CheckIfSorted;
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
            Phase::CheckIfSorted => self.step_check(ctx),
            Phase::Shuffling => self.step_shuffle(ctx),
            Phase::ShuffleComplete => self.step_shuffle_complete(ctx),
        }
    }

    fn is_sorted(&self) -> bool {
        self.sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::algorithms::harness::{self, Recorded, RecordingSink};
    use crate::core::data::Dataset;

    #[test]
    fn sorted_pair_completes_without_ever_shuffling() {
        let mut algorithm = BogoSort::seeded(1);
        let mut dataset = Dataset::from_values(&[1, 2]);
        let sink = RecordingSink::default();

        harness::drive(&mut algorithm, &mut dataset, &sink);

        assert!(algorithm.is_sorted());
        assert_eq!(dataset.values(), vec![1, 2]);
        assert_eq!(sink.exchange_count(), 0, "no shuffle may run on sorted input");
    }

    #[test]
    fn small_shuffled_input_eventually_sorts() {
        let mut algorithm = BogoSort::seeded(7);
        let mut dataset = Dataset::from_values(&[3, 1, 2]);

        harness::drive(&mut algorithm, &mut dataset, &RecordingSink::default());

        assert!(algorithm.is_sorted());
        assert_eq!(dataset.values(), vec![1, 2, 3]);
    }

    #[test]
    fn trivial_sizes_complete_immediately() {
        for values in [vec![], vec![5]] {
            let mut algorithm = BogoSort::seeded(3);
            let mut dataset = Dataset::from_values(&values);
            let sink = RecordingSink::default();

            harness::drive(&mut algorithm, &mut dataset, &sink);

            assert!(algorithm.is_sorted());
            assert!(sink.comparisons().is_empty());
        }
    }

    #[test]
    fn inversion_triggers_a_full_fisher_yates_round() {
        let mut algorithm = BogoSort::seeded(11);
        let mut dataset = Dataset::from_values(&[2, 1, 3, 4]);
        let sink = RecordingSink::default();

        algorithm.initialize(&dataset);

        // First step finds the inversion, the next three shuffle.
        harness::step_n(&mut algorithm, &mut dataset, &sink, 4);

        assert_eq!(sink.exchange_count(), 3);
        assert!(
            sink.events()
                .iter()
                .all(|event| !matches!(event, Recorded::Completed))
        );
    }

    #[test]
    fn stop_request_halts_cleanly() {
        let mut algorithm = BogoSort::seeded(5);
        harness::assert_stop_halts_without_transients(&mut algorithm, &[4, 3, 2, 1], 3);
    }
}
