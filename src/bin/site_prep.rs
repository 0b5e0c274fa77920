//! Site and network data preparation CLI for WRENCH simulations.
//!
//! Builds per-queue capacity tables and site-pair bandwidths from
//! monitoring exports, and summarises WRENCH execution dumps.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, Result};

use wrenchprep::metrics::{self, DateOrder, DEFAULT_BANDWIDTH_SCALE};
use wrenchprep::sites::{self, DEFAULT_SCALE_FACTOR};
use wrenchprep::workflow;

#[derive(Parser)]
#[command(name = "site-prep")]
#[command(about = "Site and network data preparation for WRENCH simulations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine core counts, corepower and RSEs into a GFLOPS table
    Combine {
        /// Cores per queue
        #[arg(long, default_value = "queue_corecount.json")]
        cores: PathBuf,

        /// Corepower (average benchmark per core) per queue
        #[arg(long, default_value = "corepower.json")]
        corepower: PathBuf,

        /// RSEs per queue
        #[arg(long, default_value = "queues_and_rses.json")]
        rses: PathBuf,

        #[arg(short, long, default_value = "queues-corepower_based.json")]
        output: PathBuf,

        #[arg(long, default_value_t = DEFAULT_SCALE_FACTOR)]
        scale_factor: u64,
    },

    /// Check that every queue has populated RSE and GFLOPS info
    Verify {
        #[arg(short, long, default_value = "queues-corepower_based.json")]
        input: PathBuf,

        /// Exit with an error when any queue is incomplete
        #[arg(long)]
        strict: bool,
    },

    /// Extract per-queue maximum core counts from a Grafana CSV export
    MaxCores {
        #[arg(long, default_value = "grafana-6months.csv")]
        csv: PathBuf,

        #[arg(short, long, default_value = "number_of_cpus.json")]
        output: PathBuf,
    },

    /// Merge transfer-metric snapshots into per-connection sample lists
    MergeConnections {
        /// Snapshot files, processed in the given order
        files: Vec<PathBuf>,

        /// Directory of snapshot files, processed oldest first
        #[arg(long, conflicts_with = "files")]
        data_dir: Option<PathBuf>,

        /// Read ambiguous file-name dates as mm.dd.yyyy instead of dd.mm.yyyy
        #[arg(long, requires = "data_dir")]
        month_first: bool,

        #[arg(short, long, default_value = "combined_connections.json")]
        output: PathBuf,
    },

    /// Reduce merged samples to one scaled maximum per site pair
    ReduceConnections {
        #[arg(short, long, default_value = "combined_connections.json")]
        input: PathBuf,

        #[arg(short, long, default_value = "max_connections.json")]
        output: PathBuf,

        #[arg(long, default_value_t = DEFAULT_BANDWIDTH_SCALE)]
        scale_factor: f64,
    },

    /// Print the delay between whole-task start and compute start per task
    TaskDelays {
        #[arg(short, long, default_value = "/tmp/wrench.json")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    match cli.command {
        Commands::Combine {
            cores,
            corepower,
            rses,
            output,
            scale_factor,
        } => {
            let report = sites::combine_files(&cores, &corepower, &rses, &output, scale_factor)?;
            if !report.skipped.is_empty() {
                log::warn!("Skipped {} queues with missing data", report.skipped.len());
            }
        }
        Commands::Verify { input, strict } => {
            let report = sites::verify_file(&input)?;
            if strict && !report.is_complete() {
                bail!(
                    "{} queues lack GFLOPS and {} lack RSEs",
                    report.missing_gflops.len(),
                    report.missing_rse.len()
                );
            }
        }
        Commands::MaxCores { csv, output } => {
            metrics::extract_max_values(&csv, &output)?;
        }
        Commands::MergeConnections {
            files,
            data_dir,
            month_first,
            output,
        } => {
            let order = if month_first {
                DateOrder::MonthFirst
            } else {
                DateOrder::DayFirst
            };
            let files = match data_dir {
                Some(dir) => metrics::snapshot_files_in(&dir, order)?,
                None => files,
            };
            if files.is_empty() {
                bail!("No snapshot files given");
            }
            metrics::merge_snapshot_files(&files, &output)?;
        }
        Commands::ReduceConnections {
            input,
            output,
            scale_factor,
        } => {
            metrics::reduce_file(&input, &output, scale_factor)?;
        }
        Commands::TaskDelays { input } => {
            for delay in workflow::task_start_delays_from_file(&input)? {
                println!("{}", workflow::format_delay(&delay));
            }
        }
    }

    Ok(())
}
