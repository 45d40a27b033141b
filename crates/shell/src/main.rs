//! CLI for building range search models and answering range queries.

#![deny(clippy::correctness)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::pedantic,
    clippy::nursery,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_lossless
)]

mod commands;
mod data;
mod metrics;
mod trees;
mod utils;

use clap::Parser;

use commands::Commands;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The name of the log file, without extension.
    #[arg(short('l'), long, default_value = "range-search")]
    log_name: String,

    /// The directory for log files.
    #[arg(long, default_value = "logs")]
    log_dir: std::path::PathBuf,

    /// Log at `Debug` level instead of `Info`.
    #[arg(short('v'), long, default_value_t = false)]
    verbose: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let level = if args.verbose {
        ftlog::LevelFilter::Debug
    } else {
        ftlog::LevelFilter::Info
    };
    let (_guard, log_path) = utils::configure_logger(&args.log_dir, &args.log_name, level)?;
    println!("Log file: {}", log_path.display());
    ftlog::info!("Args: {args:?}");

    match args.command {
        Commands::Build {
            reference,
            out_model,
            options,
        } => commands::build::build_model(&reference, &out_model, &options)?,
        Commands::Search {
            reference,
            in_model,
            query,
            min,
            max,
            neighbors_file,
            distances_file,
            out_model,
            options,
        } => commands::search::search_model(&commands::search::SearchArgs {
            reference,
            in_model,
            query,
            min,
            max,
            neighbors_file,
            distances_file,
            out_model,
            options,
        })?,
    }

    Ok(())
}
