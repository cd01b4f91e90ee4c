//! Terminal demo for the sort stepper
//!
//! Plays one sort through the scheduler and prints every published step.
//!
//! Usage:
//!   cargo run --bin sort_demo -- --list
//!   cargo run --bin sort_demo -- --algorithm heap --size 30 --speed 80
//!   cargo run --bin sort_demo -- --algorithm merge --offline --json
//!
//! Set `RUST_LOG=debug` to see scheduler lifecycle events.

use clap::Parser;
use rust_sort_stepper::{
    describe, describe_all, generate, DetRng, Distribution, Engine, EngineConfig, RunSummary,
    SchedulerMode, StepEvent, StepKind, StepObserver,
};
use tracing_subscriber::EnvFilter;

const MIN_ELEMENTS: usize = 10;
const MAX_ELEMENTS: usize = 200;

#[derive(Parser, Debug)]
#[command(name = "sort_demo", about = "Step through a sorting algorithm", version)]
struct Cli {
    /// List the available algorithms and exit
    #[arg(long)]
    list: bool,

    /// Algorithm identifier (bubble, selection, insertion, merge, quick, heap)
    #[arg(long, short, default_value = "bubble")]
    algorithm: String,

    /// Number of elements, clamped to 10..=200
    #[arg(long, short = 'n', default_value_t = 30)]
    size: usize,

    /// Initial arrangement of the values 1..=size
    #[arg(long, short, default_value = "random")]
    distribution: String,

    /// Playback speed, 1..=100
    #[arg(long, short, default_value_t = 50)]
    speed: u32,

    /// Seed for the random distribution
    #[arg(long, default_value = "default")]
    seed: String,

    /// Run on a logical clock instead of sleeping between steps
    #[arg(long)]
    offline: bool,

    /// Emit JSON lines instead of text
    #[arg(long)]
    json: bool,
}

/// Prints each step as it is published.
struct TextPrinter;

impl StepObserver for TextPrinter {
    fn on_step(&mut self, event: &StepEvent) {
        let step = &event.step;
        let (label, indices) = match step.kind() {
            StepKind::Compare => ("compare", &step.comparing),
            StepKind::Mutate => ("write  ", &step.swapping),
        };
        println!(
            "{:>6}  {:>8.3}s  {} {:?}",
            event.index, event.elapsed_sec, label, indices
        );
    }

    fn on_complete(&mut self, summary: &RunSummary) {
        println!();
        println!("{summary}");
    }
}

/// Prints each step and the summary as one JSON object per line.
struct JsonPrinter;

impl StepObserver for JsonPrinter {
    fn on_step(&mut self, event: &StepEvent) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::error!(error = %e, "failed to encode step"),
        }
    }

    fn on_complete(&mut self, summary: &RunSummary) {
        match serde_json::to_string(summary) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::error!(error = %e, "failed to encode summary"),
        }
    }
}

fn list_algorithms() {
    println!("Available algorithms:");
    println!("---------------------");
    for d in describe_all() {
        println!("  {:<10} {}", d.id, d.name);
        println!("             {}", d.description);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        list_algorithms();
        return Ok(());
    }

    let descriptor = describe(&cli.algorithm)?;
    let distribution: Distribution = cli.distribution.parse()?;
    let size = cli.size.clamp(MIN_ELEMENTS, MAX_ELEMENTS);

    let config = EngineConfig {
        speed: cli.speed,
        seed: cli.seed,
        ..Default::default()
    };

    let input = generate(size, distribution, &mut DetRng::new(&config.seed));

    let mode = if cli.offline {
        SchedulerMode::Offline
    } else {
        SchedulerMode::Realtime
    };
    let mut engine = Engine::new(mode, &config);

    if cli.json {
        engine.subscribe(JsonPrinter);
    } else {
        println!(
            "Sorting {} elements with {} ({})",
            size, descriptor.name, distribution
        );
        println!("{:?}", input);
        println!();
        engine.subscribe(TextPrinter);
    }

    engine.start(descriptor.id.as_str(), &input)?;

    match mode {
        SchedulerMode::Offline => {
            engine.run_offline();
        }
        SchedulerMode::Realtime => engine.run_until_complete(),
    }

    if !cli.json {
        println!("{:?}", engine.scheduler.array());
    }

    Ok(())
}
