/// Letter bitmask type: one bit per recognized letter.
pub type LetterBitmask = u32;

/// Population count of a bitmask, i.e. the number of distinct letters.
pub type Level = usize;

/// Trait extension to allow easy computation of letter bitmask levels.
pub trait HasLevel {
    /// Number of distinct letters represented by this mask.
    fn level(&self) -> Level;

    /// Level of the letter union of `self` and `other`.
    fn union_level(&self, other: &Self) -> Level;
}

impl HasLevel for LetterBitmask {
    #[inline(always)]
    fn level(&self) -> Level {
        self.count_ones() as Level
    }

    #[inline(always)]
    fn union_level(&self, other: &Self) -> Level {
        (self | other).level()
    }
}

/// Composite key of an ordered mask pair, `first` in the high half.
#[inline(always)]
pub fn pair_key(first: LetterBitmask, second: LetterBitmask) -> u64 {
    ((first as u64) << LetterBitmask::BITS) | second as u64
}
