use crate::bitmask::{LetterBitmask, Level};
use crate::error::{Error, Result};

/// Size of the character lookup table (covers ASCII and Latin-1).
const TABLE_SIZE: usize = 256;

/// Recognized characters in lower case. The leading hyphen belongs to the
/// alphabet so hyphenated words stay whole, but it carries no bit.
pub const FINNISH_LOWER: &str = "-abcdefghijklmnopqrstuvwxyzåäö";
pub const FINNISH_UPPER: &str = "-ABCDEFGHIJKLMNOPQRSTUVWXYZÅÄÖ";

/// Character to letter bit lookup table.
///
/// Both cases of a letter map to the same bit. Characters outside the
/// alphabet map to zero and are invisible to every word mask.
#[derive(Clone)]
pub struct Alphabet {
    table: [LetterBitmask; TABLE_SIZE],
    size: Level,
}

impl Alphabet {
    /// Build an alphabet from its lower and upper case spellings. The first
    /// character of each string is recognized but gets no bit; every later
    /// position `i` is assigned bit `i - 1`.
    pub fn new(lower: &str, upper: &str) -> Result<Self> {
        let lower: Vec<char> = lower.chars().collect();
        let upper: Vec<char> = upper.chars().collect();

        if lower.len() != upper.len() {
            return Err(Error::AlphabetMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }

        let size = lower.len().saturating_sub(1);
        if size > LetterBitmask::BITS as usize {
            return Err(Error::AlphabetTooLarge {
                letters: size,
                max: LetterBitmask::BITS as usize,
            });
        }

        let mut table = [0; TABLE_SIZE];
        for (idx, (lo, up)) in lower.iter().zip(upper.iter()).enumerate().skip(1) {
            let bit = 1 << (idx - 1);
            for ch in [lo, up] {
                let slot = table
                    .get_mut(*ch as usize)
                    .ok_or(Error::UnsupportedLetter(*ch))?;
                *slot = bit;
            }
        }

        Ok(Alphabet { table, size })
    }

    /// The Latin alphabet extended with å, ä and ö.
    pub fn finnish() -> Self {
        Alphabet::new(FINNISH_LOWER, FINNISH_UPPER)
            .expect("built-in alphabet fits the lookup table")
    }

    /// Number of letters that carry a bit.
    pub fn size(&self) -> Level {
        self.size
    }

    #[inline(always)]
    pub fn bit(&self, ch: char) -> LetterBitmask {
        self.table.get(ch as usize).copied().unwrap_or(0)
    }

    /// OR of the bits of every character in `word`.
    pub fn mask(&self, word: &str) -> LetterBitmask {
        word.chars().fold(0, |mask, ch| mask | self.bit(ch))
    }
}
