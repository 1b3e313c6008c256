// Trains the grade -> priority model once and writes it to disk.
//   cargo run --release
//   cargo run -- --seed 42 --output /tmp/model.json
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use grade_priority_nn::{Grade, GradeToPriorityClassifier, Result, TrainConfig, DEFAULT_MODEL_PATH};

#[derive(Debug, Parser)]
#[command(name = "grade-priority-nn", version, about = "Train the grade -> task priority model")]
struct Cli {
    /// JSON file with training hyperparameters; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the trained model
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    output: PathBuf,

    /// Seed for weight initialization and shuffling
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of training epochs
    #[arg(long)]
    epochs: Option<usize>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => TrainConfig::load_json(path)?,
        None => TrainConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(epochs) = cli.epochs {
        config.epochs = epochs;
    }

    let mut classifier = GradeToPriorityClassifier::new(config)?;
    classifier.train();

    for grade in Grade::ALL {
        let distribution = classifier.predict(grade)?;
        let level = classifier.classify(grade)?;
        println!("{grade} -> {level:<6} {distribution:.4?}");
    }

    classifier.save(&cli.output)?;
    println!("Model written to {}", cli.output.display());
    Ok(())
}
