//! # CLI Module
//!
//! Command-line interface for the site photo deduplicator.
//!
//! ## Usage
//! ```bash
//! # Deduplicate a job's uploads
//! site-dedup dedup uploads/job-17
//!
//! # With a custom threshold
//! site-dedup dedup uploads/job-17 --threshold 8
//!
//! # JSON output
//! site-dedup dedup a.jpg b.jpg c.jpg --output json
//!
//! # Volume estimate for the deduplicated batch
//! site-dedup estimate uploads/job-17
//!
//! # Fingerprints only
//! site-dedup hash kitchen.jpg hallway.jpg
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use site_photo_dedup::core::asset::ImageAsset;
use site_photo_dedup::core::estimate::{StubEstimator, VolumeEstimator};
use site_photo_dedup::core::hasher::HashAlgorithmKind;
use site_photo_dedup::core::partitioner::Threshold;
use site_photo_dedup::core::pipeline::{
    BatchDeduplicator, BatchResult, DedupConfig, DuplicateDecision,
};
use site_photo_dedup::core::source::{AssetLoader, SourceConfig};
use site_photo_dedup::error::Result;
use site_photo_dedup::events::{BatchEvent, Event, EventChannel, FingerprintEvent};
use std::path::PathBuf;
use std::thread;
use tracing::warn;

/// Site Photo Dedup - drop repeated shots before estimating
#[derive(Parser, Debug)]
#[command(name = "site-dedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a batch into kept and dropped images
    Dedup {
        #[command(flatten)]
        batch: BatchArgs,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
    /// Deduplicate, then print a volume estimate as JSON
    Estimate {
        #[command(flatten)]
        batch: BatchArgs,
    },
    /// Print the fingerprint of each image
    Hash {
        #[command(flatten)]
        inputs: InputArgs,

        /// Hash algorithm to use
        #[arg(short, long, default_value = "perceptual")]
        algorithm: Algorithm,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Image files or directories, in upload order
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Include hidden files
    #[arg(long)]
    include_hidden: bool,
}

#[derive(Args, Debug)]
struct BatchArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Duplicate threshold in bits (lower = stricter, 0-64)
    #[arg(short, long, allow_negative_numbers = true)]
    threshold: Option<i64>,

    /// Hash algorithm to use
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Number of worker threads (default: all cores)
    #[arg(short = 'j', long)]
    workers: Option<usize>,

    /// JSON file with default settings; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Perceptual Hash - DCT based, robust to exposure changes (default)
    Perceptual,
    /// Difference Hash - gradient based, for comparison
    Difference,
}

impl From<Algorithm> for HashAlgorithmKind {
    fn from(algo: Algorithm) -> Self {
        match algo {
            Algorithm::Perceptual => HashAlgorithmKind::Perceptual,
            Algorithm::Difference => HashAlgorithmKind::Difference,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (kept names only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dedup {
            batch,
            output,
            verbose,
        } => run_dedup(batch, output, verbose),
        Commands::Estimate { batch } => run_estimate(batch),
        Commands::Hash { inputs, algorithm } => run_hash(inputs, algorithm.into()),
    }
}

impl BatchArgs {
    /// Config file first, then flags on top
    fn resolve_config(&self) -> Result<DedupConfig> {
        let mut config = match self.config {
            Some(ref path) => DedupConfig::from_json_file(path)?,
            None => DedupConfig::default(),
        };

        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm.into();
        }
        if self.workers.is_some() {
            config.workers = self.workers;
        }

        Ok(config)
    }

    fn build(&self) -> Result<BatchDeduplicator> {
        let config = self.resolve_config()?;
        Ok(BatchDeduplicator::builder().config(config).build()?)
    }
}

/// Read every input, reporting the ones that could not be loaded
fn load_assets(inputs: &InputArgs, term: &Term) -> Vec<ImageAsset> {
    let loader = AssetLoader::new(SourceConfig {
        recursive: inputs.recursive,
        include_hidden: inputs.include_hidden,
        extensions: None,
    });

    let loaded = loader.load(&inputs.paths);
    for error in &loaded.errors {
        warn!(%error, "input skipped");
        term.write_line(&format!("{} {}", style("warning:").yellow().bold(), error))
            .ok();
    }

    loaded.assets
}

fn run_dedup(batch: BatchArgs, output: OutputFormat, verbose: bool) -> Result<()> {
    let term = Term::stderr();

    // Validate settings before touching any file
    let deduplicator = batch.build()?;

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Site Photo Dedup").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let assets = load_assets(&batch.inputs, &term);

    let (sender, receiver) = EventChannel::new();

    // Progress bar for pretty output
    let progress = if matches!(output, OutputFormat::Pretty) {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|s| s.progress_chars("█▓░"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let pb = ProgressBar::new(0);
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                Event::Batch(BatchEvent::PhaseChanged { phase }) => {
                    pb.set_message(format!("{}", phase));
                }
                Event::Fingerprint(FingerprintEvent::Started { total }) => {
                    pb.set_length(total as u64);
                }
                Event::Fingerprint(FingerprintEvent::Progress { completed, name, .. }) => {
                    pb.set_position(completed as u64);
                    if verbose {
                        pb.set_message(name);
                    }
                }
                Event::Fingerprint(FingerprintEvent::Unreadable { name, message }) => {
                    if verbose {
                        pb.println(format!("  {} {}: {}", style("✗").red(), name, message));
                    }
                }
                Event::Batch(BatchEvent::Completed { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = deduplicator.run_with_events(&assets, &sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &result, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Minimal => print_minimal_results(&result),
    }

    Ok(())
}

fn run_estimate(batch: BatchArgs) -> Result<()> {
    let term = Term::stderr();
    let deduplicator = batch.build()?;

    let assets = load_assets(&batch.inputs, &term);
    let result = deduplicator.run(&assets);

    let estimate = StubEstimator::new().estimate(&result);
    println!("{}", serde_json::to_string_pretty(&estimate)?);

    Ok(())
}

fn run_hash(inputs: InputArgs, algorithm: HashAlgorithmKind) -> Result<()> {
    let term = Term::stderr();
    let hasher = algorithm.hasher();

    term.write_line(&format!(
        "{} {}",
        style(algorithm).bold().cyan(),
        style(algorithm.description()).dim()
    ))
    .ok();

    for asset in load_assets(&inputs, &term) {
        match hasher.hash_bytes(asset.bytes()) {
            Ok(fingerprint) => println!("{}  {}", fingerprint, asset.name()),
            Err(e) => println!("UNREADABLE  {}: {}", asset.name(), e),
        }
    }

    Ok(())
}

fn print_pretty_results(term: &Term, result: &BatchResult, verbose: bool) {
    term.write_line("").ok();
    term.write_line(&format!("{} Batch Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    // Summary
    term.write_line(&format!(
        "  {} images received in {:.1}s",
        style(result.received_count).cyan(),
        result.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line(&format!("  {} kept", style(result.after_dedup_count).green()))
        .ok();
    term.write_line(&format!(
        "  {} dropped as duplicates (threshold {})",
        style(result.dropped_count).yellow(),
        result.threshold
    ))
    .ok();
    if verbose {
        if let Ok(threshold) = Threshold::new(result.threshold) {
            term.write_line(&format!("  {}", style(threshold.description()).dim()))
                .ok();
        }
    }
    if result.unreadable_count > 0 {
        term.write_line(&format!(
            "  {} unreadable",
            style(result.unreadable_count).red()
        ))
        .ok();
    }

    term.write_line("").ok();

    for report in &result.assets {
        let line = match &report.decision {
            DuplicateDecision::Kept => {
                let mut line = format!("  {} {}", style("★").green(), report.name);
                if verbose {
                    if let Some(fingerprint) = report.fingerprint {
                        line.push_str(&format!("  {}", style(fingerprint).dim()));
                    }
                }
                line
            }
            DuplicateDecision::Dropped {
                duplicate_of_name,
                distance,
                match_type,
                ..
            } => format!(
                "  {} {} {}",
                style("○").dim(),
                report.name,
                style(format!(
                    "duplicate of {} ({}, distance {})",
                    duplicate_of_name, match_type, distance
                ))
                .dim()
            ),
            DuplicateDecision::Unreadable { reason } => format!(
                "  {} {} {}",
                style("✗").red(),
                report.name,
                style(reason).red()
            ),
        };
        term.write_line(&line).ok();
    }

    term.write_line("").ok();
    term.write_line(&format!(
        "{}",
        style("No files were modified. Only kept images go on to estimation.").dim()
    ))
    .ok();
}

fn print_minimal_results(result: &BatchResult) {
    for name in &result.kept_names {
        println!("{}", name);
    }
}
