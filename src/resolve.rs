use std::collections::HashSet;
use std::fmt::Display;

use tracing::debug;

use crate::bitmask::pair_key;
use crate::search::SearchOutcome;
use crate::words::WordRegistry;

/// A literal pair of words whose combined letters reach the best level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordPair {
    pub first: String,
    pub second: String,
}

impl Display for WordPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' + '{}'", self.first, self.second)
    }
}

/// Expand the winning mask pairs of `outcome` into word pairs.
///
/// Each unordered mask pair is expanded once, into every word with the first
/// mask crossed with every word with the second.
pub fn resolve(outcome: &SearchOutcome, registry: &WordRegistry) -> Vec<WordPair> {
    let mut seen: HashSet<u64> = HashSet::new();
    let mut output = Vec::new();

    for &(first, second) in &outcome.pairs {
        if !seen.insert(pair_key(first, second)) {
            continue;
        }
        seen.insert(pair_key(second, first));

        let firsts = registry.words_with_mask(first);
        let seconds = registry.words_with_mask(second);
        for a in &firsts {
            for b in &seconds {
                output.push(WordPair {
                    first: a.to_string(),
                    second: b.to_string(),
                });
            }
        }
    }

    debug!(
        mask_pairs = seen.len() / 2,
        word_pairs = output.len(),
        "resolved winning pairs"
    );

    output
}
