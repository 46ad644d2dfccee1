use std::collections::HashSet;

use crate::bitmask::{HasLevel, LetterBitmask, Level};

/// Distinct letter bitmasks grouped by level.
///
/// Words sharing a letter set (anagrams such as "ne" and "en") collapse to a
/// single entry, which keeps the pair search small.
#[derive(Default, Debug)]
pub struct LevelIndex {
    levels: Vec<Vec<LetterBitmask>>,
    seen: HashSet<LetterBitmask>,
    max_level: Level,
}

impl LevelIndex {
    /// Index `mask` unless it was seen before. Returns whether it was added.
    ///
    /// The zero mask is never indexed: it has no letters to contribute.
    pub fn insert(&mut self, mask: LetterBitmask) -> bool {
        if mask == 0 || !self.seen.insert(mask) {
            return false;
        }

        let level = mask.level();
        if self.levels.len() <= level {
            self.levels.resize_with(level + 1, Vec::new);
        }
        self.levels[level].push(mask);
        self.max_level = self.max_level.max(level);

        true
    }

    /// Masks at `level`, in first-seen order.
    pub fn level(&self, level: Level) -> &[LetterBitmask] {
        self.levels.get(level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Highest level of any single indexed mask, 0 when empty.
    pub fn max_level(&self) -> Level {
        self.max_level
    }

    /// Number of distinct masks indexed.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Non-empty levels with their masks, lowest level first.
    pub fn iter(&self) -> impl Iterator<Item = (Level, &[LetterBitmask])> {
        self.levels
            .iter()
            .enumerate()
            .filter(|(_, masks)| !masks.is_empty())
            .map(|(level, masks)| (level, masks.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_groups_by_level() {
        let mut index = LevelIndex::default();
        assert!(index.insert(0b0011));
        assert!(index.insert(0b0111));
        assert!(index.insert(0b1100));
        assert!(index.insert(0b0001));

        assert_eq!(index.level(1), &[0b0001]);
        assert_eq!(index.level(2), &[0b0011, 0b1100]);
        assert_eq!(index.level(3), &[0b0111]);
        assert_eq!(index.level(4), &[] as &[LetterBitmask]);
        assert_eq!(index.level(30), &[] as &[LetterBitmask]);
        assert_eq!(index.max_level(), 3);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_insert_dedups_masks() {
        let mut index = LevelIndex::default();
        assert!(index.insert(0b0110));
        assert!(!index.insert(0b0110));
        assert_eq!(index.level(2).len(), 1);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_zero_mask_is_inert() {
        let mut index = LevelIndex::default();
        assert!(!index.insert(0));
        assert!(index.is_empty());
        assert_eq!(index.max_level(), 0);
        assert_eq!(index.iter().count(), 0);
    }

    #[test]
    fn test_every_mask_lives_at_its_level() {
        let mut index = LevelIndex::default();
        for mask in [0b1_u32, 0b101, 0b1110, 0b1111_0000, 0b11, 0b101] {
            index.insert(mask);
        }

        let mut total = 0;
        for (level, masks) in index.iter() {
            for mask in masks {
                assert_eq!(mask.level(), level);
            }
            total += masks.len();
        }
        assert_eq!(total, index.len());
    }
}
