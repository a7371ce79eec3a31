//! stratsample - sample-size estimation and MAD-stratified sampling of
//! `(identifier, frequency)` CSV files
//!
//! stdout carries payloads (sizes, sampled rows, plans); all logging goes to
//! stderr.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use stratsample::io::{read_frequency_file, write_sample, write_sample_file, IoError};
use stratsample::item::FrequencyItem;
use stratsample::selection::StratifiedSelector;
use stratsample::sizing::{
    ClusterSampleSize, FixedPercentageSampleSize, MarginOfErrorSampleSize,
    PopulationBasedSampleSize, SampleSizeMethod, SimpleRandomSampleSize, StratifiedSampleSize,
    TimeBasedSampleSize,
};
use stratsample::traits::SampleSizeEstimator;
use stratsample::SamplingError;

/// Sample-size estimation and MAD-stratified reservoir sampling
#[derive(Parser)]
#[command(name = "stratsample")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a sample size with one of the estimators
    Size {
        #[command(subcommand)]
        method: SizeCommand,
    },

    /// Draw a stratified sample from a CSV file
    Select(SelectArgs),

    /// Print the selection plan (statistics and budgets) as JSON
    Plan(PlanArgs),
}

#[derive(Subcommand, Debug)]
enum SizeCommand {
    /// Quarter of small populations, sqrt(N) * log10(N) * 10 otherwise
    Population {
        #[arg(long)]
        population_size: u64,
    },

    /// Proportion estimate within a margin of error (z fixed at 1.96)
    MarginOfError {
        #[arg(long, default_value_t = 0.95)]
        confidence_level: f64,
        #[arg(long)]
        margin_of_error: f64,
        #[arg(long, default_value_t = 0.5)]
        proportion: f64,
    },

    /// Proportional counts per stratum
    Stratified {
        /// Comma-separated stratum sizes
        #[arg(long, value_delimiter = ',', required = true)]
        strata: Vec<u64>,
        #[arg(long)]
        population_size: u64,
        #[arg(long, allow_hyphen_values = true)]
        total_sample_size: i64,
    },

    /// N / (1 + (N - 1) / N)
    SimpleRandom {
        #[arg(long)]
        population_size: u64,
    },

    /// Fixed fraction of the dataset
    FixedPercentage {
        #[arg(long)]
        dataset_size: u64,
        /// Fraction to keep, e.g. 0.1
        #[arg(long)]
        percentage: f64,
    },

    /// Share of the dataset inside a time window
    TimeBased {
        #[arg(long, allow_hyphen_values = true)]
        start: f64,
        #[arg(long, allow_hyphen_values = true)]
        end: f64,
        #[arg(long)]
        total_time: f64,
        #[arg(long)]
        dataset_size: u64,
    },

    /// Elements covered by whole sampled clusters
    Cluster {
        #[arg(long)]
        total_clusters: u64,
        #[arg(long)]
        clusters_in_sample: u64,
        #[arg(long)]
        elements_per_cluster: u64,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// CSV file with a header row
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Identifier column name
    #[arg(long, default_value = "id")]
    id_column: String,

    /// Frequency column name
    #[arg(long, default_value = "frequency")]
    frequency_column: String,
}

#[derive(Args, Debug)]
struct BudgetArgs {
    /// Fixed number of items to sample (per chunk when chunking)
    #[arg(long, short = 'k', allow_hyphen_values = true)]
    sample_size: Option<i64>,

    /// Sample this fraction of the items instead (e.g. 0.05)
    #[arg(long, conflicts_with = "sample_size")]
    percentage: Option<f64>,
}

impl BudgetArgs {
    /// Budget for a stream (or chunk) of `len` items
    ///
    /// Defaults to the population-based estimate when neither a fixed size
    /// nor a percentage is given.
    fn budget_for(&self, len: usize) -> Result<i64, SamplingError> {
        let method = match (self.sample_size, self.percentage) {
            (Some(k), _) => return Ok(k),
            (None, Some(p)) => {
                SampleSizeMethod::FixedPercentage(FixedPercentageSampleSize::new(len as u64, p))
            }
            (None, None) => {
                SampleSizeMethod::Population(PopulationBasedSampleSize::new(len as u64))
            }
        };
        let k = method.sample_size()?;
        info!(method = method.name(), items = len, budget = k, "sample size estimated");
        Ok(k)
    }
}

#[derive(Args, Debug)]
struct SelectArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    budget: BudgetArgs,

    /// Output CSV (stdout when omitted)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Sample the input in independent chunks of this many rows
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Seed for the random source (random when omitted)
    #[arg(long, env = "STRATSAMPLE_SEED")]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    budget: BudgetArgs,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Sampling(#[from] SamplingError),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let result = match cli.command {
        Commands::Size { method } => run_size(&method),
        Commands::Select(args) => run_select(&args),
        Commands::Plan(args) => run_plan(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr subscriber
///
/// `STRATSAMPLE_LOG` (then `RUST_LOG`) overrides the level picked by `-v`/`-q`.
fn init_logging(global: &GlobalOpts) {
    let level = if global.quiet {
        "error"
    } else {
        match global.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_env("STRATSAMPLE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(format!("stratsample={}", level)));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_size(command: &SizeCommand) -> Result<(), CliError> {
    let method = match *command {
        SizeCommand::Population { population_size } => {
            SampleSizeMethod::Population(PopulationBasedSampleSize::new(population_size))
        }
        SizeCommand::MarginOfError {
            confidence_level,
            margin_of_error,
            proportion,
        } => SampleSizeMethod::MarginOfError(MarginOfErrorSampleSize::new(
            confidence_level,
            margin_of_error,
            proportion,
        )),
        SizeCommand::Stratified {
            ref strata,
            population_size,
            total_sample_size,
        } => {
            let counts = StratifiedSampleSize::new(strata.clone(), population_size)
                .allocate(total_sample_size)?;
            let line: Vec<String> = counts.iter().map(|c| c.to_string()).collect();
            println!("{}", line.join(","));
            return Ok(());
        }
        SizeCommand::SimpleRandom { population_size } => {
            SampleSizeMethod::SimpleRandom(SimpleRandomSampleSize::new(population_size))
        }
        SizeCommand::FixedPercentage {
            dataset_size,
            percentage,
        } => SampleSizeMethod::FixedPercentage(FixedPercentageSampleSize::new(
            dataset_size,
            percentage,
        )),
        SizeCommand::TimeBased {
            start,
            end,
            total_time,
            dataset_size,
        } => SampleSizeMethod::TimeBased(TimeBasedSampleSize::new(
            start,
            end,
            total_time,
            dataset_size,
        )),
        SizeCommand::Cluster {
            total_clusters,
            clusters_in_sample,
            elements_per_cluster,
        } => SampleSizeMethod::Cluster(ClusterSampleSize::new(
            total_clusters,
            clusters_in_sample,
            elements_per_cluster,
        )),
    };

    println!("{}", method.sample_size()?);
    Ok(())
}

fn run_select(args: &SelectArgs) -> Result<(), CliError> {
    let stream = load(&args.input)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "random source seeded");
    let mut selector = StratifiedSelector::with_seed(seed);

    let sample = match args.chunk_size {
        Some(chunk_size) => {
            selector.select_chunked(&stream, chunk_size, |len| args.budget.budget_for(len))?
        }
        None => {
            let k = args.budget.budget_for(stream.len())?;
            selector.select(&stream, k)?
        }
    };
    info!(rows = stream.len(), selected = sample.len(), "selection complete");

    let (id_column, frequency_column) = (&args.input.id_column, &args.input.frequency_column);
    match &args.output {
        Some(path) => write_sample_file(path, &sample, id_column, frequency_column)?,
        None => write_sample(std::io::stdout().lock(), &sample, id_column, frequency_column)?,
    }
    Ok(())
}

fn run_plan(args: &PlanArgs) -> Result<(), CliError> {
    let stream = load(&args.input)?;
    let k = args.budget.budget_for(stream.len())?;

    let plan = StratifiedSelector::with_seed(0).plan(&stream, k)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn load(input: &InputArgs) -> Result<Vec<FrequencyItem>, IoError> {
    let stream = read_frequency_file(&input.input, &input.id_column, &input.frequency_column)?;
    info!(path = %input.input.display(), rows = stream.len(), "input loaded");
    Ok(stream)
}
