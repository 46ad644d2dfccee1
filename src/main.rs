use std::path::PathBuf;

use alphabet::Alphabet;
use anyhow::Context;
use clap::Parser;
use console::Term;
use resolve::{resolve, WordPair};
use search::{PairSearch, SearchMode, SearchOutcome, Verbosity};
use stats::Stats;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use words::Corpus;

mod alphabet;
mod bitmask;
mod error;
mod input;
mod levels;
mod resolve;
mod search;
mod stats;
mod tokenizer;
mod words;

/// Find the word pairs of a text with the most distinct letters between them.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// The text file to read words from
    #[clap(value_parser, value_name = "FILE")]
    file: PathBuf,

    /// Print a summary and progress to stderr (twice for a level histogram)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Turn debugging information on (twice for trace output)
    #[clap(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    /// Evaluate level pairs on a single thread
    #[clap(short, long, action)]
    sequential: bool,
}

impl Args {
    fn verbosity(&self) -> Verbosity {
        match self.verbose {
            0 => Verbosity::Silent,
            1 => Verbosity::PrettyPrint,
            _ => Verbosity::Debug,
        }
    }

    fn mode(&self) -> SearchMode {
        if self.sequential {
            SearchMode::Sequential
        } else {
            SearchMode::Parallel
        }
    }
}

fn init_tracing(debug: u8) {
    let default = match debug {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Search `corpus` for its most impressive word pairs.
fn find_pairs(
    corpus: &Corpus,
    mode: SearchMode,
    verbosity: Verbosity,
) -> (SearchOutcome, Vec<WordPair>) {
    let mut search = PairSearch::new(corpus.levels());
    search.set_mode(mode);
    search.set_verbosity(verbosity);

    let outcome = search.run();
    let pairs = resolve(&outcome, corpus.registry());

    (outcome, pairs)
}

/// Output line for the `number`th pair, counting from 1.
fn pair_line(number: usize, pair: &WordPair) -> String {
    format!("Word pair {}: {}", number, pair)
}

fn report(stats: &Stats, verbosity: Verbosity) -> Result<(), std::io::Error> {
    let term = Term::stderr();
    term.write_line(format!("{}", stats).as_str())?;

    if verbosity == Verbosity::Debug {
        term.write_line("")?;
        term.write_line("Distinct words per level:")?;
        for line in stats.histogram_lines() {
            term.write_line(line.as_str())?;
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let corpus = Corpus::init(&args.file, Alphabet::finnish())
        .with_context(|| format!("Could not load text at path '{}'", args.file.display()))?;
    if corpus.registry().is_empty() {
        warn!("no words found in '{}'", args.file.display());
    } else if corpus.levels().is_empty() {
        warn!("no recognized letters in '{}'", args.file.display());
    }

    let verbosity = args.verbosity();
    let (outcome, pairs) = find_pairs(&corpus, args.mode(), verbosity);

    let term = Term::buffered_stdout();
    for (idx, pair) in pairs.iter().enumerate() {
        term.write_line(pair_line(idx + 1, pair).as_str())?;
    }
    term.flush()?;

    if verbosity != Verbosity::Silent {
        report(&Stats::collect(&corpus, &outcome), verbosity)?;
    }

    Ok(())
}
