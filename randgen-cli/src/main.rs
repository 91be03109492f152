//! RandGen CLI — sample, check, and inspect weighted distributions.
//!
//! Commands:
//! - `sample` — draw values from a distribution given inline or by TOML config
//! - `check` — validate a distribution without drawing
//! - `inspect` — print the merged values and cumulative distribution as JSON

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use randgen_core::export::{export_distribution_json, export_tally_csv, export_tally_json};
use randgen_core::{
    sample_batch, sample_batch_parallel, Distribution, DistributionBuilder, SamplerConfig,
    SeedHierarchy, Tally, DEFAULT_CHUNK_SIZE,
};

/// Stream label for sequential draws.
const SEQUENTIAL_STREAM: &str = "sequential";

#[derive(Parser)]
#[command(
    name = "randgen",
    about = "RandGen CLI — weighted random integers from a discrete distribution"
)]
struct Cli {
    /// Log level when RUST_LOG is unset: trace, debug, info, warn, error.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw values from the distribution.
    Sample {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of draws.
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Master seed. Overrides the config file's seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Spread draws across all cores.
        #[arg(long, default_value_t = false)]
        parallel: bool,

        /// Draws per parallel chunk.
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Validate the distribution and report its size.
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print values, merged probabilities, and the cumulative distribution.
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated integers (e.g., -1,0,1).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    numbers: Vec<i64>,

    /// Comma-separated probabilities (e.g., 0.2,0.5,0.3).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    probabilities: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Sample {
            source,
            count,
            seed,
            parallel,
            chunk_size,
            format,
        } => run_sample(&source, count, seed, parallel, chunk_size, format),
        Commands::Check { source } => run_check(&source),
        Commands::Inspect { source } => run_inspect(&source),
    }
}

/// Log to stderr. `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("randgen_core={level},randgen={level}").into());

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

/// Resolve the distribution and the seed recorded next to it, if any.
fn load_distribution(source: &SourceArgs) -> Result<(Distribution, Option<u64>)> {
    let inline = !source.numbers.is_empty() || !source.probabilities.is_empty();

    match (&source.config, inline) {
        (Some(_), true) => bail!("--config and --numbers/--probabilities are mutually exclusive"),
        (None, false) => bail!("one of --config or --numbers/--probabilities is required"),
        (Some(path), false) => {
            let config = SamplerConfig::from_file(path)?;
            let distribution = config
                .build()
                .with_context(|| format!("invalid distribution in {}", path.display()))?;
            Ok((distribution, config.seed))
        }
        (None, true) => {
            let distribution = DistributionBuilder::default()
                .build(&source.numbers, &source.probabilities)
                .context("invalid distribution")?;
            Ok((distribution, None))
        }
    }
}

fn run_sample(
    source: &SourceArgs,
    count: usize,
    seed: Option<u64>,
    parallel: bool,
    chunk_size: usize,
    format: OutputFormat,
) -> Result<()> {
    let (distribution, config_seed) = load_distribution(source)?;

    let seeds = seed
        .or(config_seed)
        .map(SeedHierarchy::new)
        .unwrap_or_else(SeedHierarchy::from_entropy);
    info!(
        count,
        parallel,
        master_seed = seeds.master_seed(),
        "sampling"
    );

    let samples = if parallel {
        sample_batch_parallel(&distribution, &seeds, count, chunk_size)
    } else {
        let mut rng = seeds.rng_for(SEQUENTIAL_STREAM, 0);
        sample_batch(&distribution, &mut rng, count)
    };

    print!("{}", render_samples(&distribution, &samples, format)?);
    Ok(())
}

/// A single text draw prints as the bare value; anything else as a tally.
fn render_samples(
    distribution: &Distribution,
    samples: &[i64],
    format: OutputFormat,
) -> Result<String> {
    if format == OutputFormat::Text && samples.len() == 1 {
        return Ok(format!("{}\n", samples[0]));
    }

    let tally = Tally::from_samples(distribution, samples);
    debug!(max_deviation = tally.max_deviation(), "tally complete");

    Ok(match format {
        OutputFormat::Text => format_tally(&tally),
        OutputFormat::Json => format!("{}\n", export_tally_json(&tally)?),
        OutputFormat::Csv => export_tally_csv(&tally)?,
    })
}

fn run_check(source: &SourceArgs) -> Result<()> {
    let (distribution, _) = load_distribution(source)?;
    println!(
        "OK: {} distinct values, cumulative ends at {}",
        distribution.len(),
        distribution.cumulative().last().copied().unwrap_or_default()
    );
    Ok(())
}

fn run_inspect(source: &SourceArgs) -> Result<()> {
    let (distribution, _) = load_distribution(source)?;
    println!("{}", export_distribution_json(&distribution)?);
    Ok(())
}

fn format_tally(tally: &Tally) -> String {
    let mut out = format!(
        "{:>12} {:>10} {:>10} {:>10}\n",
        "value", "count", "observed", "expected"
    );
    for row in &tally.rows {
        out.push_str(&format!(
            "{:>12} {:>10} {:>10.4} {:>10.4}\n",
            row.value, row.count, row.observed, row.expected
        ));
    }
    out.push_str(&format!(
        "{} draws, max deviation {:.4}\n",
        tally.total,
        tally.max_deviation()
    ));
    out
}
