use std::collections::BTreeMap;
use std::fmt::Display;

use console::style;
use counter::Counter;

use crate::bitmask::{HasLevel, Level};
use crate::search::SearchOutcome;
use crate::words::Corpus;

/// Summary of one run, for `--verbose` reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub tokens: usize,
    pub distinct_words: usize,
    pub letter_sets: usize,
    pub max_word_level: Level,
    pub best_level: Level,
    pub alphabet_size: Level,
    pub mask_pairs: usize,
    pub level_pairs_examined: usize,
    pub unions_evaluated: u64,
    /// Distinct words per level.
    pub words_per_level: BTreeMap<Level, usize>,
}

impl Stats {
    pub fn collect(corpus: &Corpus, outcome: &SearchOutcome) -> Self {
        let registry = corpus.registry();
        let histogram: Counter<Level> = registry.iter().map(|(_, mask)| mask.level()).collect();

        Stats {
            tokens: registry.tokens_seen(),
            distinct_words: registry.len(),
            letter_sets: corpus.levels().len(),
            max_word_level: corpus.levels().max_level(),
            best_level: outcome.best,
            alphabet_size: corpus.alphabet().size(),
            mask_pairs: outcome.pairs.len(),
            level_pairs_examined: outcome.level_pairs_examined,
            unions_evaluated: outcome.unions_evaluated,
            words_per_level: histogram.iter().map(|(level, count)| (*level, *count)).collect(),
        }
    }

    /// Per-level word counts, one styled line per level.
    pub fn histogram_lines(&self) -> Vec<String> {
        let widest = self.words_per_level.values().copied().max().unwrap_or(0);
        self.words_per_level
            .iter()
            .map(|(level, count)| {
                let bar_len = if widest == 0 { 0 } else { (count * 40).div_ceil(widest) };
                format!(
                    "{:>3} {:>8} {}",
                    level,
                    count,
                    style("#".repeat(bar_len)).cyan()
                )
            })
            .collect()
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", style("Summary").bold())?;
        writeln!(f, "Tokens read: {}", self.tokens)?;
        writeln!(f, "Distinct words: {}", self.distinct_words)?;
        writeln!(f, "Distinct letter sets: {}", self.letter_sets)?;
        writeln!(f, "Best single word level: {}", self.max_word_level)?;
        writeln!(
            f,
            "Best pair level: {} of {} letters",
            style(self.best_level).green(),
            self.alphabet_size
        )?;
        writeln!(f, "Winning mask pairs: {}", self.mask_pairs)?;
        write!(
            f,
            "Level pairs examined: {} ({} unions)",
            self.level_pairs_examined, self.unions_evaluated
        )
    }
}
