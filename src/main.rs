use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use partner_clusters::cluster::{ClusterReport, RestaurantGroups};
use partner_clusters::input::{open_input, read_input};

/// partner-clusters - Product of the two best restaurant partner clusters
///
/// Reads `partnerCount n from[n] to[n] restaurantId[n]` as whitespace-separated
/// integers and prints the product of the two largest per-restaurant scores
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Input file (stdin if not specified, .gz is decompressed)
    #[clap(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[clap(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Also write per-restaurant scores as TSV
    #[clap(long = "scores")]
    scores: Option<PathBuf>,

    /// Number of threads for scoring restaurants
    #[clap(short = 't', long = "threads", default_value = "1")]
    threads: usize,

    /// Increase log verbosity (-v info, -vv debug)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[clap(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

fn write_scores(path: &Path, report: &ClusterReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create scores file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "restaurant_id\tscore")?;
    for s in &report.scores {
        writeln!(out, "{}\t{}", s.restaurant, s.score)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    // Set up rayon thread pool
    let parallel = args.threads > 1;
    if parallel {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()?;
    }

    let start = Instant::now();
    let source = match &args.input {
        Some(path) => path.display().to_string(),
        None => "stdin".to_string(),
    };
    let reader = open_input(args.input.as_deref())
        .with_context(|| format!("Failed to open input {source}"))?;
    let input = read_input(reader).with_context(|| format!("Invalid input from {source}"))?;

    let groups = RestaurantGroups::from_input(&input).context("Invalid partner links")?;
    log::info!(
        "{} partners, {} edges, {} restaurants",
        groups.partner_count(),
        groups.num_edges(),
        groups.num_groups()
    );

    let report = ClusterReport::compute(&groups, parallel)?;
    log::info!(
        "Scored {} restaurants in {:.3}s",
        report.scores.len(),
        start.elapsed().as_secs_f64()
    );

    if let Some(path) = &args.scores {
        write_scores(path, &report)?;
    }

    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create output {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    writeln!(output, "{}", report.product)?;
    output.flush()?;

    Ok(())
}
