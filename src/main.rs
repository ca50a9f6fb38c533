use std::io::{BufRead, BufReader, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use ldifdoc::PipelineOptions;
use ldifdoc_core::config::{Config, RecoveryPolicy};
use ldifdoc_core::Normalizer;
use ldifdoc_sink::JsonLinesSink;

#[derive(Parser)]
#[command(
    name = "ldifdoc",
    about = "Convert a directory export into bulk-indexable JSON documents"
)]
struct Cli {
    /// Read the export from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Skip the first N records without parsing them.
    #[arg(long, default_value_t = 0)]
    skip: u64,

    /// Expected number of records (progress reporting only).
    #[arg(long)]
    total: Option<u64>,

    /// Stop after N documents have been written.
    #[arg(long)]
    limit: Option<u64>,

    /// Index name written into every bulk action line.
    #[arg(long)]
    index: Option<String>,

    /// What to do with a record that fails to parse: abort or skip.
    #[arg(long)]
    on_error: Option<RecoveryPolicy>,

    /// Config file (defaults to ~/.config/ldifdoc/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to /tmp/ldifdoc-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let debug_file = cli.debug.then(|| PathBuf::from("/tmp/ldifdoc-debug.log"));
    ldifdoc::logging::init(cli.verbose, debug_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not load config, using defaults");
            Config::defaults()
        }),
    };

    let mut options = PipelineOptions::from_config(&config);
    options.skip = cli.skip;
    options.total = cli.total;
    options.limit = cli.limit;
    if let Some(index) = cli.index {
        options.index = index;
    }
    if let Some(on_error) = cli.on_error {
        options.on_error = on_error;
    }

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(std::io::stdin().lock()),
    };
    let mut sink = JsonLinesSink::new(BufWriter::new(std::io::stdout().lock()));

    let summary = ldifdoc::run(reader, &Normalizer::new(), &mut sink, &options)?;
    tracing::info!(
        indexed = summary.indexed,
        dropped_no_dn = summary.dropped_no_dn,
        failed = summary.failed,
        "done"
    );
    Ok(())
}
