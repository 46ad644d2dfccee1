use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::bitmask::{HasLevel, LetterBitmask, Level};
use crate::levels::LevelIndex;

/// Two distinct masks whose letter union reached the search's best level.
pub type MaskPair = (LetterBitmask, LetterBitmask);

/// Represents verbosity options for the search and its reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Silent,
    PrettyPrint,
    Debug,
}

/// How the cross product of one level pair is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Sequential,
    /// Rows of the outer level are spread over the rayon thread pool.
    Parallel,
}

/// Result of a `PairSearch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Highest union level found, never below the best single-word level.
    pub best: Level,
    /// Every mask pair reaching `best`, in discovery order. Both orders of a
    /// pair may appear when its masks share a level.
    pub pairs: Vec<MaskPair>,
    /// Level pairs after which `best` had risen, in scan order.
    pub raises: Vec<Raise>,
    pub level_pairs_examined: usize,
    pub unions_evaluated: u64,
}

/// `best` as it stood after scanning the level pair `(outer, inner)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Raise {
    pub outer: Level,
    pub inner: Level,
    pub best: Level,
}

/// Pruned scan over pairs of levels for the largest two-mask letter union.
///
/// Levels are visited from the highest down. Once `2 * i` (for the outer
/// level) or `i + j` (for a level pair) drops below the current best, no
/// remaining combination can reach it and the scan stops.
pub struct PairSearch<'a> {
    levels: &'a LevelIndex,
    mode: SearchMode,
    verbosity: Verbosity,
}

impl<'a> PairSearch<'a> {
    pub fn new(levels: &'a LevelIndex) -> Self {
        PairSearch {
            levels,
            mode: SearchMode::Parallel,
            verbosity: Verbosity::Silent,
        }
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }

    pub fn run(&self) -> SearchOutcome {
        let max_level = self.levels.max_level();
        let mut best = max_level;
        let mut buckets: Vec<Vec<MaskPair>> = vec![Vec::new(); 2 * max_level + 1];
        let mut raises = Vec::new();
        let mut level_pairs_examined = 0_usize;
        let mut unions_evaluated = 0_u64;

        let pb = match self.verbosity {
            Verbosity::PrettyPrint | Verbosity::Debug => ProgressBar::new(max_level as u64 + 1),
            Verbosity::Silent => ProgressBar::hidden(),
        };
        let sty = ProgressStyle::with_template(
            "[{spinner:.green} {elapsed_precise}] {wide_bar:.cyan/blue} {pos:>3}/{len:3} levels {msg}",
        )
        .unwrap()
        .progress_chars("##-");
        pb.set_style(sty);

        for i in (0..=max_level).rev() {
            if 2 * i < best {
                break;
            }

            for j in (0..=i).rev() {
                if i + j < best {
                    break;
                }

                let outer = self.levels.level(i);
                let inner = self.levels.level(j);
                level_pairs_examined += 1;
                unions_evaluated += (outer.len() * inner.len()) as u64;

                let before = best;
                match self.mode {
                    SearchMode::Sequential => scan_sequential(outer, inner, &mut best, &mut buckets),
                    SearchMode::Parallel => scan_parallel(outer, inner, &mut best, &mut buckets),
                }

                if best > before {
                    trace!(outer = i, inner = j, best, "best level raised");
                    raises.push(Raise {
                        outer: i,
                        inner: j,
                        best,
                    });
                }
            }

            pb.set_message(format!("(best {})", best));
            pb.inc(1);
        }

        pb.finish_and_clear();

        let pairs = std::mem::take(&mut buckets[best]);
        debug!(
            best,
            pairs = pairs.len(),
            level_pairs_examined,
            unions_evaluated,
            "pair search finished"
        );

        SearchOutcome {
            best,
            pairs,
            raises,
            level_pairs_examined,
            unions_evaluated,
        }
    }
}

/// Record every pair of `outer` x `inner` whose union reaches the running
/// best, raising it as the scan goes.
fn scan_sequential(
    outer: &[LetterBitmask],
    inner: &[LetterBitmask],
    best: &mut Level,
    buckets: &mut [Vec<MaskPair>],
) {
    for &a in outer {
        for &b in inner {
            let union = a.union_level(&b);
            if union >= *best && a != b {
                *best = union;
                buckets[union].push((a, b));
            }
        }
    }
}

/// Same acceptance as `scan_sequential`, but against the best level as it
/// stood before this level pair. The extra pairs only land in buckets below
/// the final best, so the winning bucket is unchanged.
fn scan_parallel(
    outer: &[LetterBitmask],
    inner: &[LetterBitmask],
    best: &mut Level,
    buckets: &mut [Vec<MaskPair>],
) {
    let floor = *best;
    let found: Vec<(Level, MaskPair)> = outer
        .par_iter()
        .flat_map_iter(|&a| {
            inner.iter().filter_map(move |&b| {
                let union = a.union_level(&b);
                (union >= floor && a != b).then(|| (union, (a, b)))
            })
        })
        .collect();

    for (union, pair) in found {
        *best = (*best).max(union);
        buckets[union].push(pair);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn index_of(masks: &[LetterBitmask]) -> LevelIndex {
        let mut index = LevelIndex::default();
        for mask in masks {
            index.insert(*mask);
        }
        index
    }

    fn search(index: &LevelIndex, mode: SearchMode) -> SearchOutcome {
        let mut search = PairSearch::new(index);
        search.set_mode(mode);
        search.run()
    }

    fn unordered(pairs: &[MaskPair]) -> HashSet<MaskPair> {
        pairs.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect()
    }

    /// Best level and winning pairs by checking every pair of masks.
    fn brute_force(masks: &[LetterBitmask]) -> (Level, HashSet<MaskPair>) {
        let distinct: Vec<LetterBitmask> = masks
            .iter()
            .copied()
            .filter(|mask| *mask != 0)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let mut best = distinct.iter().map(|mask| mask.level()).max().unwrap_or(0);
        for a in &distinct {
            for b in &distinct {
                if a != b {
                    best = best.max(a.union_level(b));
                }
            }
        }

        let mut winners = HashSet::new();
        for a in &distinct {
            for b in &distinct {
                if a != b && a.union_level(b) == best {
                    winners.insert((*a.min(b), *a.max(b)));
                }
            }
        }

        (best, winners)
    }

    #[test]
    fn test_disjoint_pair() {
        let index = index_of(&[0b0011, 0b1100]);
        let outcome = search(&index, SearchMode::Sequential);

        assert_eq!(outcome.best, 4);
        assert_eq!(unordered(&outcome.pairs), HashSet::from([(0b0011, 0b1100)]));
    }

    #[test]
    fn test_single_mask_has_no_pair() {
        let index = index_of(&[0b0111]);
        for mode in [SearchMode::Sequential, SearchMode::Parallel] {
            let outcome = search(&index, mode);
            assert_eq!(outcome.best, 3);
            assert!(outcome.pairs.is_empty());
        }
    }

    #[test]
    fn test_empty_index() {
        let index = LevelIndex::default();
        let outcome = search(&index, SearchMode::Sequential);
        assert_eq!(outcome.best, 0);
        assert!(outcome.pairs.is_empty());
        assert_eq!(outcome.unions_evaluated, 0);
    }

    #[test]
    fn test_never_pairs_a_mask_with_itself() {
        let index = index_of(&[0b0111, 0b0001, 0b0010]);
        let outcome = search(&index, SearchMode::Sequential);

        // "abc" cannot be beaten, so only subsets of it tie with it.
        assert_eq!(outcome.best, 3);
        assert!(outcome.pairs.iter().all(|(a, b)| a != b));
        assert_eq!(
            unordered(&outcome.pairs),
            HashSet::from([(0b0001, 0b0111), (0b0010, 0b0111)])
        );
    }

    #[test]
    fn test_keeps_all_ties() {
        let index = index_of(&[0b0011, 0b1100, 0b0110, 0b1001, 0b0101]);
        let outcome = search(&index, SearchMode::Sequential);

        assert_eq!(outcome.best, 4);
        assert_eq!(
            unordered(&outcome.pairs),
            HashSet::from([(0b0011, 0b1100), (0b0110, 0b1001)])
        );
    }

    #[test]
    fn test_pruning_skips_hopeless_levels() {
        // The 6-letter set unions to 11 with either 5-letter set, after which
        // no other level pair can reach 11 and the scan stops.
        let index = index_of(&[0b11_1111, 0b1_1111 << 6, 0b1_1111 << 11, 0b1, 0b10]);
        let outcome = search(&index, SearchMode::Sequential);

        assert_eq!(outcome.best, 11);
        assert_eq!(
            unordered(&outcome.pairs),
            HashSet::from([(0b11_1111, 0b1_1111 << 6), (0b11_1111, 0b1_1111 << 11)])
        );
        assert_eq!(outcome.level_pairs_examined, 2);
        assert_eq!(outcome.unions_evaluated, 1 + 2);
    }

    #[test]
    fn test_best_only_rises() {
        // 4 letters, then a 3-letter set adding one, then a 2-letter set
        // adding two: the best level is raised twice during the scan.
        let index = index_of(&[0b1111, 0b1_1100, 0b110_0000, 0b1000_0000]);

        for mode in [SearchMode::Sequential, SearchMode::Parallel] {
            let outcome = search(&index, mode);
            assert_eq!(
                outcome.raises,
                vec![
                    Raise { outer: 4, inner: 3, best: 5 },
                    Raise { outer: 4, inner: 2, best: 6 },
                ]
            );
            assert_eq!(outcome.best, 6);
            assert_eq!(unordered(&outcome.pairs), HashSet::from([(0b1111, 0b110_0000)]));
        }
    }

    #[test]
    fn test_raises_are_increasing() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..30 {
            let masks: Vec<LetterBitmask> = (0..60).map(|_| rng.gen_range(0..1_u32 << 14)).collect();
            let index = index_of(&masks);
            let outcome = search(&index, SearchMode::Sequential);

            let mut previous = index.max_level();
            for raise in &outcome.raises {
                assert!(raise.best > previous);
                assert!(raise.outer + raise.inner >= raise.best);
                previous = raise.best;
            }
            assert_eq!(previous, outcome.best);
        }
    }

    #[test]
    fn test_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        for round in 0..50 {
            let count = rng.gen_range(0..40);
            let masks: Vec<LetterBitmask> =
                (0..count).map(|_| rng.gen_range(0..1_u32 << 12)).collect();
            let index = index_of(&masks);
            let (best, winners) = brute_force(&masks);

            for mode in [SearchMode::Sequential, SearchMode::Parallel] {
                let outcome = search(&index, mode);
                assert_eq!(outcome.best, best, "round {} {:?}", round, mode);
                assert_eq!(unordered(&outcome.pairs), winners, "round {} {:?}", round, mode);
                assert!(outcome.best >= index.max_level());
            }
        }
    }

    #[test]
    fn test_modes_agree() {
        let mut rng = StdRng::seed_from_u64(7);
        let masks: Vec<LetterBitmask> = (0..300).map(|_| rng.gen_range(0..1_u32 << 16)).collect();
        let index = index_of(&masks);

        let sequential = search(&index, SearchMode::Sequential);
        let parallel = search(&index, SearchMode::Parallel);

        assert_eq!(sequential.best, parallel.best);
        assert_eq!(sequential.pairs, parallel.pairs);
        assert_eq!(sequential.raises, parallel.raises);
        assert_eq!(sequential.level_pairs_examined, parallel.level_pairs_examined);
    }
}
