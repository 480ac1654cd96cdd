use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{error, info};
use thiserror::Error;

use pitch_volume::{DecodePolicy, Pipeline, PipelineConfig, PipelineError};

const DEFAULT_COUNT: usize = 10;
const DEFAULT_INPUT: &str = "pitch_example_data";

/// Rank symbols by executed volume in a PITCH text feed.
#[derive(Parser, Debug)]
#[command(name = "pitch-volume", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the top symbols by executed volume, one `symbol volume` per line.
    ExtractData {
        /// Number of symbols to print.
        #[arg(default_value_t = DEFAULT_COUNT)]
        count: usize,

        /// Feed file, one record per line.
        #[arg(default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Skip records that fail to decode instead of stopping.
        #[arg(long)]
        skip_malformed: bool,

        /// Log run statistics when done.
        #[arg(long)]
        stats: bool,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error("unable to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    #[error("write error: {0}")]
    Output(#[from] io::Error),
}

fn extract_data(count: usize, input: PathBuf, skip_malformed: bool, stats: bool) -> Result<(), CliError> {
    let file = File::open(&input).map_err(|source| CliError::Open {
        path: input.clone(),
        source,
    })?;

    let config = PipelineConfig {
        decode_policy: if skip_malformed {
            DecodePolicy::Skip
        } else {
            DecodePolicy::Abort
        },
        ..PipelineConfig::default()
    };

    info!("reading feed from {}", input.display());
    let mut pipeline = Pipeline::new(config);
    pipeline.run_reader(BufReader::new(file))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (symbol, volume) in pipeline.top_performers(count) {
        writeln!(out, "{} {}", symbol, volume)?;
    }
    out.flush()?;

    if stats {
        pipeline.stats().log_summary();
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::ExtractData { stats: true, .. } => "info",
        _ => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let result = match cli.command {
        Commands::ExtractData {
            count,
            input,
            skip_malformed,
            stats,
        } => extract_data(count, input, skip_malformed, stats),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
