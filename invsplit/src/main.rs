use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    num::NonZeroUsize,
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use libinvsplit::{load_stopwords, InventorySplitter, Stopwords};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Split a sense inventory into one `word#n#senseId` file per sense.
#[derive(Debug, clap::Parser)]
#[command(name = "invsplit")]
struct Args {
    /// Tab-separated inventory, optionally bzip2-compressed (`.bz2`)
    inventory: PathBuf,

    /// Directory receiving the per-sense files
    output_dir: PathBuf,

    /// Maximum number of features written per sense
    #[arg(default_value = "1000")]
    max_features: NonZeroUsize,

    /// Stopword file, one word per line
    #[arg(long, env = "INVSPLIT_STOPWORDS")]
    stopwords: Option<PathBuf>,

    /// Write the run summary as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log unparsable features and name collisions
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("input inventory: {}", args.inventory.display());
    info!("output directory: {}", args.output_dir.display());
    info!("max feature num.: {}", args.max_features);

    let stopwords = match &args.stopwords {
        Some(path) => load_stopwords(path),
        None => {
            info!("no stopword file given, stopwords are not filtered");
            Stopwords::new()
        }
    };
    info!("loaded {} stopwords", stopwords.len());

    let summary = InventorySplitter::new(stopwords)
        .with_max_features(args.max_features.get())
        .with_verbose(args.verbose)
        .split(&args.inventory, &args.output_dir)
        .with_context(|| format!("failed to split '{}'", args.inventory.display()))?;
    println!("{}", summary);

    if let Some(report) = args.report {
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&report)
            .with_context(|| format!("cannot create report '{}'", report.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &summary)?;
        writeln!(writer)?;
        writer.flush()?;
    }

    Ok(())
}
