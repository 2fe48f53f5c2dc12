use crate::core::algorithms::AlgorithmRegistry;
use crate::core::data::Dataset;
use crate::core::step::{CountingEventSink, FreeRun, SessionMarks, StepContext};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;

/// Outcome of a synchronous drive-to-completion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessReport {
    pub algorithm: String,
    pub steps: u64,
    pub comparisons: u64,
    pub exchanges: u64,
    pub sorted: bool,
    pub dataset: Dataset,
}

/// Drives one algorithm over one generated dataset to completion on the
/// calling thread, without pacing. `step_limit` bounds unbounded
/// strategies (Bogo sort on an unlucky seed).
pub fn run_headless(
    registry: &AlgorithmRegistry,
    algorithm_name: &str,
    size: usize,
    min: i32,
    max: i32,
    seed: u64,
    step_limit: Option<u64>,
) -> Result<HeadlessReport, Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut dataset = Dataset::generate(size, min, max, &mut rng)?;
    let mut algorithm = registry.create(algorithm_name)?;
    let sink = CountingEventSink::new();

    algorithm.initialize(&dataset);
    let mut marks = SessionMarks::new();
    let mut steps: u64 = 0;
    loop {
        if step_limit.is_some_and(|limit| steps >= limit) {
            break;
        }
        let mut ctx = StepContext::new(&mut dataset, &sink, &FreeRun, &mut marks);
        if !algorithm.next_step(&mut ctx) {
            break;
        }
        steps += 1;
    }

    Ok(HeadlessReport {
        algorithm: algorithm.name().to_owned(),
        steps,
        comparisons: sink.comparisons(),
        exchanges: sink.exchanges(),
        sorted: algorithm.is_sorted(),
        dataset,
    })
}
