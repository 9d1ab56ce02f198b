use anyhow::{Context, Result};
use aphorism_config::{Config, DEFAULT_OUTPUT_DIR};
use aphorism_engine::io::{DATASET_FILE, read_dataset, write_report};
use aphorism_engine::summary::{
    DEFAULT_OTHER_CUTOFF, OTHER_LABEL, author_ranking, origin_shares, translation_counts,
};
use aphorism_engine::{AuthorTally, ReferenceTables, process_file};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

/// Number of authors listed by `summary`.
const TOP_AUTHORS: usize = 10;

#[derive(Parser)]
#[command(name = "aphorism-cli")]
#[command(version, about = "Extract structured records from a foreign-phrase anthology", long_about = None)]
#[command(after_help = "Paths left out are taken from ~/.config/aphorism/config.toml")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse the anthology and write the dataset, record log, author tally and error list
    Parse {
        /// Anthology text file
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Directory for the output files
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Reference tables (TOML) to use instead of the bundled ones
        #[arg(short, long, value_name = "FILE")]
        tables: Option<PathBuf>,
    },
    /// Print origin shares and the most cited authors of a written dataset
    Summary {
        /// Dataset CSV written by `parse`
        #[arg(value_name = "DATASET")]
        dataset: Option<PathBuf>,

        /// Origins with at most this share are reported as "Other"
        #[arg(short, long, default_value_t = DEFAULT_OTHER_CUTOFF)]
        cutoff: f64,
    },
    /// Write a config file so later runs need no arguments
    Init {
        /// Anthology text file
        #[arg(value_name = "CORPUS")]
        corpus: PathBuf,

        /// Directory for the output files
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Reference tables (TOML) to use instead of the bundled ones
        #[arg(short, long, value_name = "FILE")]
        tables: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Parse { input, out, tables } => run_parse(input, out, tables),
        Command::Summary { dataset, cutoff } => run_summary(dataset, cutoff),
        Command::Init { corpus, out, tables } => run_init(corpus, out, tables),
    }
}

fn run_init(corpus: PathBuf, out: Option<PathBuf>, tables: Option<PathBuf>) -> Result<()> {
    let mut config = Config::new(corpus);
    if let Some(out) = out {
        config.output_dir = out;
    }
    config.tables_path = tables;

    config.save().context("Failed to write config file")?;
    println!("Wrote {}", Config::config_path().display());
    Ok(())
}

fn run_parse(input: Option<PathBuf>, out: Option<PathBuf>, tables: Option<PathBuf>) -> Result<()> {
    let config = if input.is_none() || out.is_none() || tables.is_none() {
        load_config()
    } else {
        None
    };

    let input = match input.or_else(|| config.as_ref().map(|c| c.corpus_path.clone())) {
        Some(input) => input,
        None => usage_error("No input file provided and no config file found"),
    };
    let out = out
        .or_else(|| config.as_ref().map(|c| c.output_dir.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    let tables_path = tables.or_else(|| config.as_ref().and_then(|c| c.tables_path.clone()));

    let tables = match &tables_path {
        Some(path) => ReferenceTables::load_from_path(path)
            .with_context(|| format!("Failed to load reference tables from {}", path.display()))?,
        None => ReferenceTables::bundled().context("Bundled reference tables are invalid")?,
    };

    let report = process_file(&input, &tables)
        .with_context(|| format!("Failed to process {}", input.display()))?;
    write_report(&out, &report)
        .with_context(|| format!("Failed to write results to {}", out.display()))?;

    println!(
        "{} records, {} skipped entries, written to {}",
        report.records.len(),
        report.failures.len(),
        out.display()
    );
    Ok(())
}

fn run_summary(dataset: Option<PathBuf>, cutoff: f64) -> Result<()> {
    let dataset = match dataset {
        Some(dataset) => dataset,
        None => match load_config() {
            Some(config) => config.output_dir.join(DATASET_FILE),
            None => usage_error("No dataset provided and no config file found"),
        },
    };

    let records = read_dataset(&dataset)
        .with_context(|| format!("Failed to read dataset {}", dataset.display()))?;
    let shares = origin_shares(&records, cutoff)
        .with_context(|| format!("Cannot summarize {}", dataset.display()))?;

    let counts = translation_counts(&records);
    println!("{} records in {}", records.len(), dataset.display());
    println!(
        "  {} with a non-English original, {} English only",
        counts.translated, counts.english_only
    );
    println!();
    println!("Origins:");
    for (origin, share) in &shares.shares {
        println!("  {origin:<12} {:>6.2}%", share * 100.0);
    }
    if !shares.aggregated.is_empty() {
        let folded: Vec<&str> = shares.aggregated.iter().map(|(o, _)| o.as_str()).collect();
        println!("  ({} = {})", OTHER_LABEL, folded.join(", "));
    }

    let ranking = author_ranking(&AuthorTally::from_records(&records));
    let cumulative = ranking.cumulative_specific_shares();
    println!();
    println!("Sources ({} attributed records):", ranking.total);
    for author in ranking.authors.iter().take(TOP_AUTHORS) {
        let kind = if author.generic { "generic" } else { "author" };
        let covered = cumulative
            .iter()
            .find(|(rank, _)| *rank == author.rank)
            .map(|(_, share)| format!("{:>6.2}% cumulative", share * 100.0))
            .unwrap_or_default();
        println!(
            "  {:>3}. {:<24} {:>5} {kind:<8} {covered}",
            author.rank + 1,
            author.label,
            author.count
        );
    }
    Ok(())
}

/// Loads the config file if there is one, exiting on a broken one.
fn load_config() -> Option<Config> {
    match Config::load() {
        Ok(Some(config)) => {
            log::info!("Using config file {}", Config::config_path().display());
            Some(config)
        }
        Ok(None) => None,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    }
}

fn usage_error(message: &str) -> ! {
    eprintln!("Error: {message}");
    eprintln!("Usage: aphorism-cli parse [INPUT] [--out DIR] [--tables FILE]");
    eprintln!("       aphorism-cli summary [DATASET] [--cutoff F]");
    eprintln!("Or write a config file with: aphorism-cli init CORPUS [--out DIR]");
    process::exit(1);
}
