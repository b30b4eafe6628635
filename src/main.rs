use anyhow::{Context, Result};
use autocorrect::cli::output::{self, OutputFormat};
use autocorrect::{Algorithm, Autocorrector, Config, Correction};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io::{self, BufRead};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "autocorrect")]
#[command(version, about = "Suggest the closest dictionary words for misspellings", long_about = None)]
struct Cli {
    /// Words to correct
    #[arg(value_name = "WORDS")]
    words: Vec<String>,

    /// Word list to load, one word per line
    #[arg(short, long, env = "AUTOCORRECT_DICTIONARY")]
    dictionary: Option<PathBuf>,

    /// Distance metric used to rank candidates
    #[arg(short, long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Correct each word on a background worker (uses lcs-offset)
    #[arg(long)]
    parallel: bool,

    /// Also read words from stdin, one per line
    #[arg(long)]
    stdin: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if misspellings are found
    #[arg(long)]
    no_fail: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "autocorrect", &mut io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose);

    let config = Config::load(cli.dictionary.clone(), cli.algorithm, cli.no_color)?;

    let mut words = cli.words.clone();
    if cli.stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read words from stdin")?;
            let word = line.trim();
            if !word.is_empty() {
                words.push(word.to_string());
            }
        }
    }

    if words.is_empty() {
        anyhow::bail!("No words specified. Use --help for usage information.");
    }

    let dictionary_path = config.dictionary_path()?;
    let corrector = Arc::new(Autocorrector::from_path(&dictionary_path)?);

    let results = if cli.parallel {
        correct_in_background(&corrector, &words, config.algorithm)?
    } else {
        corrector
            .correct_many(&words, config.algorithm)
            .into_iter()
            .map(|(word, correction)| correction.map(|c| (word, c)))
            .collect::<autocorrect::Result<Vec<_>>>()?
    };

    output::print_corrections(&results, config.color, cli.format)
        .context("Failed to render results")?;

    let misspelled = results
        .iter()
        .filter(|(_, correction)| *correction != Correction::Correct)
        .count();

    if cli.format == OutputFormat::Text {
        output::print_summary(results.len(), misspelled, config.color);
    }

    if misspelled > 0 && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

fn correct_in_background(
    corrector: &Arc<Autocorrector>,
    words: &[String],
    algorithm: Algorithm,
) -> Result<Vec<(String, Correction)>> {
    if algorithm != Algorithm::LcsOffset {
        warn!("--parallel always ranks with lcs-offset; ignoring {}", algorithm);
    }
    if words.iter().any(String::is_empty) {
        anyhow::bail!("Words to correct must not be empty");
    }

    let max_in_flight = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(4);
    info!(max_in_flight, "correcting {} words in the background", words.len());

    let results = corrector.correct_in_background(words, max_in_flight)?;

    Ok(words
        .iter()
        .zip(results)
        .map(|(word, suggestions)| {
            let correction = if !suggestions.is_empty() {
                Correction::Suggestions(suggestions)
            } else if corrector.dictionary().contains(word) {
                Correction::Correct
            } else {
                Correction::NoCandidates
            };
            (word.clone(), correction)
        })
        .collect())
}
