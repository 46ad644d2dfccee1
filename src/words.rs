use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::bitmask::{HasLevel, LetterBitmask};
use crate::error::Result;
use crate::input::{lines, read_text};
use crate::levels::LevelIndex;
use crate::tokenizer::tokens;

/// Every distinct word seen, bucketed by length (in characters), with its
/// letter bitmask. Each word's mask is computed exactly once.
#[derive(Default, Debug)]
pub struct WordRegistry {
    by_length: Vec<BTreeMap<String, LetterBitmask>>,
    distinct: usize,
    tokens_seen: usize,
}

impl WordRegistry {
    /// Register `token`, returning its mask if the word is new. Words already
    /// registered at the same length are skipped.
    pub fn register(&mut self, token: &str, alphabet: &Alphabet) -> Option<LetterBitmask> {
        self.tokens_seen += 1;

        let length = token.chars().count();
        if self.by_length.len() <= length {
            self.by_length.resize_with(length + 1, BTreeMap::new);
        }

        let words = &mut self.by_length[length];
        if words.contains_key(token) {
            return None;
        }

        let mask = alphabet.mask(token);
        words.insert(token.to_owned(), mask);
        self.distinct += 1;

        Some(mask)
    }

    /// All registered words whose mask equals `mask`, shortest first and
    /// lexicographically within a length. A word needs at least as many
    /// characters as the mask has letters, so shorter buckets are skipped.
    pub fn words_with_mask(&self, mask: LetterBitmask) -> Vec<&str> {
        self.by_length
            .iter()
            .skip(mask.level())
            .flat_map(|words| words.iter())
            .filter(|(_, word_mask)| **word_mask == mask)
            .map(|(word, _)| word.as_str())
            .collect()
    }

    /// Every registered word with its mask.
    pub fn iter(&self) -> impl Iterator<Item = (&str, LetterBitmask)> {
        self.by_length
            .iter()
            .flat_map(|words| words.iter())
            .map(|(word, mask)| (word.as_str(), *mask))
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Number of tokens registered, duplicates included.
    pub fn tokens_seen(&self) -> usize {
        self.tokens_seen
    }
}

/// Everything learned from one text: the alphabet it was read with, its
/// distinct words and their letter sets by level. Built once, then only read.
pub struct Corpus {
    alphabet: Alphabet,
    registry: WordRegistry,
    levels: LevelIndex,
}

impl Corpus {
    pub fn new(alphabet: Alphabet) -> Self {
        Corpus {
            alphabet,
            registry: WordRegistry::default(),
            levels: LevelIndex::default(),
        }
    }

    /// Build a `Corpus` from the text file at `path`.
    pub fn init(path: &Path, alphabet: Alphabet) -> Result<Self> {
        let text = read_text(path)?;
        Ok(Corpus::from_text(&text, alphabet))
    }

    /// Build a `Corpus` from in-memory text, one line at a time.
    pub fn from_text(text: &str, alphabet: Alphabet) -> Self {
        let mut corpus = Corpus::new(alphabet);
        for line in lines(text) {
            corpus.ingest_line(line);
        }

        debug!(
            tokens = corpus.registry.tokens_seen(),
            words = corpus.registry.len(),
            letter_sets = corpus.levels.len(),
            max_level = corpus.levels.max_level(),
            "corpus built"
        );
        for (level, masks) in corpus.levels.iter() {
            trace!(level, letter_sets = masks.len(), "level indexed");
        }

        corpus
    }

    pub fn ingest_line(&mut self, line: &str) {
        for token in tokens(line) {
            if let Some(mask) = self.registry.register(token, &self.alphabet) {
                self.levels.insert(mask);
            }
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn registry(&self) -> &WordRegistry {
        &self.registry
    }

    pub fn levels(&self) -> &LevelIndex {
        &self.levels
    }
}
