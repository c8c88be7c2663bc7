//! `eeg-compare` command line front-end.
//!
//! ```bash
//! # Compare Fp1 of two recordings, declared as Alpha and Beta
//! eeg-compare compare --first a.csv --first-channel Fp1 --first-band Alpha \
//!                     --second b.csv --second-channel Fp1 --second-band Beta \
//!                     --table comparison.csv --json report.json
//!
//! # Show the frequency band catalog
//! eeg-compare bands
//!
//! # List the channels of a recording
//! eeg-compare channels a.csv
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use eeg_compare::analysis::export::Report;
use eeg_compare::analysis::series::{ChartSeries, DEFAULT_SMOOTHING};
use eeg_compare::analysis::summary::SignalStatistics;
use eeg_compare::data::loader::load_file;
use eeg_compare::session::{ComparisonSession, Recording};
use eeg_compare::FrequencyBand;

#[derive(Parser, Debug)]
#[command(name = "eeg-compare")]
#[command(author, version, about = "Compare two EEG channel recordings by frequency band", long_about = None)]
struct Cli {
    /// Default log filter, overridden by RUST_LOG
    #[arg(short, long, env = "EEG_COMPARE_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align two recordings and summarise the comparison
    Compare {
        /// First recording (.csv, .json or .parquet)
        #[arg(long)]
        first: PathBuf,
        /// Channel column of the first recording
        #[arg(long)]
        first_channel: String,
        /// Declared frequency band of the first channel
        #[arg(long)]
        first_band: String,

        /// Second recording (.csv, .json or .parquet)
        #[arg(long)]
        second: PathBuf,
        /// Channel column of the second recording
        #[arg(long)]
        second_channel: String,
        /// Declared frequency band of the second channel
        #[arg(long)]
        second_band: String,

        /// Write the per-sample comparison table here
        #[arg(long)]
        table: Option<PathBuf>,

        /// Write the full JSON report here
        #[arg(long)]
        json: Option<PathBuf>,

        /// Half-width of the moving average used for the chart range
        #[arg(long, default_value_t = DEFAULT_SMOOTHING)]
        smoothing: usize,
    },

    /// Print the frequency band catalog
    Bands,

    /// Print the channel names of a recording
    Channels {
        /// Recording to inspect
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    match cli.command {
        Commands::Compare {
            first,
            first_channel,
            first_band,
            second,
            second_channel,
            second_band,
            table,
            json,
            smoothing,
        } => {
            let mut session = ComparisonSession::new();
            session.set_table(
                Recording::First,
                load_file(&first).with_context(|| format!("loading {}", first.display()))?,
            );
            session.set_table(
                Recording::Second,
                load_file(&second).with_context(|| format!("loading {}", second.display()))?,
            );
            session.select_channel(Recording::First, first_channel);
            session.select_band(Recording::First, first_band);
            session.select_channel(Recording::Second, second_channel);
            session.select_band(Recording::Second, second_band);

            session.generate()?;
            print_comparison(&session, smoothing);

            if let Some(path) = table {
                let text = session.export_table().unwrap_or_default();
                std::fs::write(&path, text)
                    .with_context(|| format!("writing {}", path.display()))?;
                log::info!("wrote comparison table to {}", path.display());
            }
            if let Some(path) = json {
                let report = Report::new(
                    &session.samples,
                    &session.summary,
                    &session.selection_a,
                    &session.selection_b,
                );
                std::fs::write(&path, report.to_json()?)
                    .with_context(|| format!("writing {}", path.display()))?;
                log::info!("wrote report to {}", path.display());
            }
        }
        Commands::Bands => {
            for band in FrequencyBand::CATALOG {
                println!(
                    "{:<6} {:<9} {:<18} {}",
                    band.name(),
                    band.range(),
                    band.description(),
                    band.color_hint()
                );
            }
        }
        Commands::Channels { file } => {
            let table =
                load_file(&file).with_context(|| format!("loading {}", file.display()))?;
            for header in &table.headers {
                println!("{header}");
            }
        }
    }

    Ok(())
}

fn print_comparison(session: &ComparisonSession, smoothing: usize) {
    let stats = SignalStatistics::from_samples(&session.samples);
    let chart = ChartSeries::from_samples(&session.samples, smoothing);

    println!("Samples compared:          {}", stats.sample_count);
    println!("Mean |signal 1|:           {:.3}", stats.mean_abs_signal_a);
    println!("Mean |signal 2|:           {:.3}", stats.mean_abs_signal_b);
    println!("Mean |difference|:         {:.3}", stats.mean_abs_difference);
    println!(
        "Chart range (smoothed):    {:.3} .. {:.3}",
        chart.y_min, chart.y_max
    );
    println!();

    if session.summary.is_empty() {
        println!("No summary available for the selected bands.");
    } else {
        println!("{}", session.summary.narrative_summary);
        println!();
        println!("{}", session.summary.narrative_detail);
    }
}
