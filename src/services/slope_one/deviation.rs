use std::collections::{BTreeMap, BTreeSet};

use crate::models::{FilmId, Rating};

use super::rating_matrix::RatingMatrix;

/// Unordered pair of distinct films, stored with the smaller id first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilmPair {
    low: FilmId,
    high: FilmId,
}

impl FilmPair {
    /// Canonical pair for `(a, b)`, `None` for a self pair
    pub fn new(a: FilmId, b: FilmId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn low(&self) -> FilmId {
        self.low
    }

    pub fn high(&self) -> FilmId {
        self.high
    }
}

/// Co-rating statistics of one pair, in the `low - high` direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairStats {
    /// Average of `rating(low) - rating(high)` over co-raters
    pub deviation: Rating,
    /// Number of users who rated both films, always at least 1
    pub frequency: u32,
}

#[derive(Debug, Default, Clone, Copy)]
struct PairSum {
    deviation_sum: Rating,
    frequency: u32,
}

/// Average pairwise deviation and co-occurrence count for every co-rated pair
///
/// Deviation and frequency live in one entry per pair, so both are defined on
/// exactly the same key set. Only one direction is stored; the reverse is
/// derived by negation so `deviation(a, b) == -deviation(b, a)` holds exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DifferenceMatrix {
    pairs: BTreeMap<FilmPair, PairStats>,
    films: BTreeSet<FilmId>,
}

impl DifferenceMatrix {
    /// Accumulates deviations over every user's rated films
    ///
    /// Work is `O(sum of |R_u|^2)`; each unordered pair a user rated is
    /// visited once.
    pub fn build(ratings: &RatingMatrix) -> Self {
        let mut sums: BTreeMap<FilmPair, PairSum> = BTreeMap::new();

        for (_, row) in ratings.rows() {
            let rated: Vec<(FilmId, Rating)> = row.iter().map(|(f, r)| (*f, *r)).collect();

            // Rows are ordered by film id, so (low, high) is already canonical
            for (i, (low, low_rating)) in rated.iter().enumerate() {
                for (high, high_rating) in &rated[i + 1..] {
                    let pair = FilmPair {
                        low: *low,
                        high: *high,
                    };
                    let sum = sums.entry(pair).or_default();
                    sum.deviation_sum += low_rating - high_rating;
                    sum.frequency += 1;
                }
            }
        }

        let mut films = BTreeSet::new();
        let pairs: BTreeMap<FilmPair, PairStats> = sums
            .into_iter()
            .map(|(pair, sum)| {
                films.insert(pair.low);
                films.insert(pair.high);
                let stats = PairStats {
                    deviation: sum.deviation_sum / f64::from(sum.frequency),
                    frequency: sum.frequency,
                };
                (pair, stats)
            })
            .collect();

        tracing::debug!(
            pairs = pairs.len(),
            films = films.len(),
            "Difference matrix built"
        );

        Self { pairs, films }
    }

    /// Average of `rating(j) - rating(k)` over users who rated both
    pub fn deviation(&self, j: FilmId, k: FilmId) -> Option<Rating> {
        let pair = FilmPair::new(j, k)?;
        let stats = self.pairs.get(&pair)?;
        if j == pair.low {
            Some(stats.deviation)
        } else {
            Some(-stats.deviation)
        }
    }

    /// Number of users who rated both `j` and `k`
    pub fn frequency(&self, j: FilmId, k: FilmId) -> Option<u32> {
        let pair = FilmPair::new(j, k)?;
        self.pairs.get(&pair).map(|stats| stats.frequency)
    }

    /// Deviation and frequency oriented as `j` relative to `k`
    pub fn oriented(&self, j: FilmId, k: FilmId) -> Option<PairStats> {
        let pair = FilmPair::new(j, k)?;
        let stats = *self.pairs.get(&pair)?;
        if j == pair.low {
            Some(stats)
        } else {
            Some(PairStats {
                deviation: -stats.deviation,
                frequency: stats.frequency,
            })
        }
    }

    /// Films that take part in at least one co-rated pair, ascending
    pub fn films(&self) -> impl Iterator<Item = FilmId> + '_ {
        self.films.iter().copied()
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
