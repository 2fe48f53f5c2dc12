use sort_explorer::{AlgorithmRegistry, Snapshot, render_bars, run_headless};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt::try_init();

    let mut args = std::env::args().skip(1);
    let algorithm = args.next().unwrap_or_else(|| "Quick Sort".to_owned());
    let size: usize = match args.next() {
        Some(raw) => raw.parse()?,
        None => 32,
    };

    let registry = AlgorithmRegistry::standard();

    // Bogo sort has no completion bound; cap it so the demo always ends.
    let step_limit = (algorithm == "Bogo Sort").then_some(500_000);

    println!("Sorting {} elements with {}...", size, algorithm);
    let report = run_headless(&registry, &algorithm, size, 1, 200, 42, step_limit)?;

    print!("{}", render_bars(&Snapshot::of(&report.dataset)));
    println!("Steps:       {}", report.steps);
    println!("Comparisons: {}", report.comparisons);
    println!("Exchanges:   {}", report.exchanges);
    if !report.sorted {
        println!("Stopped before completion (step limit reached).");
    }

    Ok(())
}
