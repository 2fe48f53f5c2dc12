//! Shared test support for driving algorithms to completion synchronously.

use super::SortAlgorithm;
use crate::core::data::{Dataset, ElementState};
use crate::core::step::{FreeRun, SessionMarks, StepContext, StepEventSink};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Mutex;

const STEP_CEILING: u64 = 50_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Recorded {
    Compare(usize, usize),
    Swap(usize, usize),
    StateChange(usize, ElementState),
    Completed,
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<Recorded>>,
}

impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn comparisons(&self) -> Vec<(usize, usize)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Recorded::Compare(i, j) => Some((i, j)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn exchange_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, Recorded::Swap(_, _)))
            .count()
    }
}

impl StepEventSink for RecordingSink {
    fn compare(&self, i: usize, j: usize) {
        self.events.lock().unwrap().push(Recorded::Compare(i, j));
    }

    fn swap(&self, i: usize, j: usize) {
        self.events.lock().unwrap().push(Recorded::Swap(i, j));
    }

    fn state_change(&self, index: usize, state: ElementState) {
        self.events.lock().unwrap().push(Recorded::StateChange(index, state));
    }

    fn completed(&self) {
        self.events.lock().unwrap().push(Recorded::Completed);
    }
}

/// Initializes the algorithm and steps it until it reports no more work.
/// Returns the number of steps taken.
pub(crate) fn drive(
    algorithm: &mut dyn SortAlgorithm,
    dataset: &mut Dataset,
    sink: &dyn StepEventSink,
) -> u64 {
    algorithm.initialize(dataset);
    dataset.reset_states();
    resume(algorithm, dataset, sink)
}

/// Steps an already-initialized algorithm to completion.
pub(crate) fn resume(
    algorithm: &mut dyn SortAlgorithm,
    dataset: &mut Dataset,
    sink: &dyn StepEventSink,
) -> u64 {
    let mut marks = SessionMarks::new();
    let mut steps = 0;
    loop {
        let mut ctx = StepContext::new(dataset, sink, &FreeRun, &mut marks);
        if !algorithm.next_step(&mut ctx) {
            return steps;
        }
        steps += 1;
        assert!(steps < STEP_CEILING, "algorithm failed to terminate");
    }
}

/// Runs exactly `count` steps (or fewer if the algorithm finishes first).
pub(crate) fn step_n(
    algorithm: &mut dyn SortAlgorithm,
    dataset: &mut Dataset,
    sink: &dyn StepEventSink,
    count: u64,
) {
    let mut marks = SessionMarks::new();
    for _ in 0..count {
        let mut ctx = StepContext::new(dataset, sink, &FreeRun, &mut marks);
        if !algorithm.next_step(&mut ctx) {
            return;
        }
    }
}

pub(crate) fn assert_sorts(algorithm: &mut dyn SortAlgorithm, values: &[i32]) {
    let mut dataset = Dataset::from_values(values);
    let sink = RecordingSink::default();

    drive(algorithm, &mut dataset, &sink);

    let mut expected = values.to_vec();
    expected.sort_unstable();
    assert_eq!(dataset.values(), expected, "input {:?}", values);
    assert!(algorithm.is_sorted());
    assert!(
        dataset
            .elements()
            .iter()
            .all(|element| element.state() == ElementState::Sorted),
        "all elements should end marked sorted for input {:?}",
        values
    );
    assert_eq!(
        sink.events()
            .iter()
            .filter(|event| matches!(event, Recorded::Completed))
            .count(),
        1,
        "completion should be reported exactly once for input {:?}",
        values
    );
}

/// The edge-case inputs every algorithm must handle: empty, singleton,
/// pair, duplicate-heavy, already sorted, reverse sorted, seeded random.
pub(crate) fn standard_inputs() -> Vec<Vec<i32>> {
    let mut rng = StdRng::seed_from_u64(42);
    let random: Vec<i32> = (0..33).map(|_| rng.gen_range(1..100)).collect();

    vec![
        vec![],
        vec![7],
        vec![2, 1],
        vec![1, 2],
        vec![5, 5, 5, 5],
        vec![2, 1, 2, 1, 2],
        vec![1, 2, 3, 4, 5, 6],
        vec![6, 5, 4, 3, 2, 1],
        random,
    ]
}

pub(crate) fn assert_sorts_standard_inputs(mut make: impl FnMut() -> Box<dyn SortAlgorithm>) {
    for values in standard_inputs() {
        let mut algorithm = make();
        assert_sorts(algorithm.as_mut(), &values);
    }
}

/// Resetting mid-sort must discard prior progress cleanly: driving to
/// completion afterwards still sorts.
pub(crate) fn assert_reset_is_idempotent(
    algorithm: &mut dyn SortAlgorithm,
    values: &[i32],
    steps_before_reset: u64,
) {
    let mut dataset = Dataset::from_values(values);
    let sink = RecordingSink::default();

    algorithm.initialize(&dataset);
    step_n(algorithm, &mut dataset, &sink, steps_before_reset);

    algorithm.reset(dataset.len());
    dataset.reset_states();
    resume(algorithm, &mut dataset, &sink);

    let mut expected = values.to_vec();
    expected.sort_unstable();
    assert_eq!(dataset.values(), expected);
    assert!(algorithm.is_sorted());
}

/// A stop request must halt the machine on the next step without further
/// mutation, leaving no transient display marks behind.
pub(crate) fn assert_stop_halts_without_transients(
    algorithm: &mut dyn SortAlgorithm,
    values: &[i32],
    steps_before_stop: u64,
) {
    let mut dataset = Dataset::from_values(values);
    let sink = RecordingSink::default();

    algorithm.initialize(&dataset);
    step_n(algorithm, &mut dataset, &sink, steps_before_stop);

    let values_at_stop = dataset.values();
    let mut marks = SessionMarks::new();
    let stop = || true;
    let mut ctx = StepContext::new(&mut dataset, &sink, &stop, &mut marks);
    assert!(!algorithm.next_step(&mut ctx));

    assert_eq!(dataset.len(), values.len());
    assert_eq!(dataset.values(), values_at_stop, "a stopped step must not mutate");
    assert!(
        dataset
            .elements()
            .iter()
            .all(|element| !element.state().is_transient()),
        "no transient marks may survive a stop"
    );

    // Halting latches: even with the stop lifted, no further steps run.
    let mut ctx = StepContext::new(&mut dataset, &sink, &FreeRun, &mut marks);
    assert!(!algorithm.next_step(&mut ctx));
    assert_eq!(dataset.values(), values_at_stop);
}
