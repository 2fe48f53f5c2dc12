use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sort_explorer::{AlgorithmRegistry, Dataset, FreeRun, NullEventSink, SessionMarks, StepContext};

const DATASET_SIZE: usize = 256;

const BOUNDED_ALGORITHMS: &[&str] = &[
    "Bubble Sort",
    "Insertion Sort",
    "Shell Sort",
    "Cocktail Sort",
    "Quick Sort",
    "Merge Sort",
    "Heap Sort",
    "Tree Sort",
];

fn drive_to_completion(registry: &AlgorithmRegistry, name: &str) -> i32 {
    let mut rng = StdRng::seed_from_u64(99);
    let mut dataset = Dataset::generate(DATASET_SIZE, 1, 1000, &mut rng).unwrap();
    let mut algorithm = registry.create(name).unwrap();
    algorithm.initialize(&dataset);

    let mut marks = SessionMarks::new();
    loop {
        let mut ctx = StepContext::new(&mut dataset, &NullEventSink, &FreeRun, &mut marks);
        if !algorithm.next_step(&mut ctx) {
            break;
        }
    }
    dataset.value(0)
}

fn bench_step_throughput(c: &mut Criterion) {
    let registry = AlgorithmRegistry::standard();
    let mut group = c.benchmark_group("drive_to_completion");

    for name in BOUNDED_ALGORITHMS {
        group.bench_with_input(BenchmarkId::from_parameter(*name), name, |b, name| {
            b.iter(|| black_box(drive_to_completion(&registry, name)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_step_throughput);
criterion_main!(benches);
