// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Leg Merging
//!
//! Combines independently searched legs into complete journeys and keeps the
//! cheapest one.
//!
//! The cartesian product is split across rayon workers by the first leg. Each
//! worker keeps its own cheapest candidate; all workers share one `CostBound`
//! for the merge, so a cheap combination found by one worker lets the others
//! skip combinations whose optimistic cost is already too high. Worker results
//! are reduced with "keep the cheaper, the left one on ties".
//!
//! Two legs are compatible when the first ends where the second starts and
//! lands strictly before the second takes off. Combinations are priced with
//! `Itinerary::junction_cost`; an itinerary is only materialized when it
//! improves the worker's cheapest candidate.
//!
//! A three-way merge joins legs one and two first and only walks the third leg
//! for compatible, admissible pairs. An empty input leg yields no itinerary.

use crate::bound::CostBound;
use crate::result::MergeOutcome;
use crate::stats::MergeStatistics;
use rayon::prelude::*;
use std::time::Instant;
use wayfare_model::alliance::AllianceIndex;
use wayfare_model::itinerary::Itinerary;

/// Returns the cheaper of two itineraries, `a` on ties.
#[inline]
pub fn cheaper<'g>(a: Itinerary<'g>, b: Itinerary<'g>) -> Itinerary<'g> {
    if b.max_cost() < a.max_cost() { b } else { a }
}

/// `cheaper` lifted to optional candidates; a missing candidate never wins.
#[inline]
pub fn cheaper_of<'g>(a: Option<Itinerary<'g>>, b: Option<Itinerary<'g>>) -> Option<Itinerary<'g>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(cheaper(a, b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// The cheapest itinerary of a set, or `None` for an empty set.
pub fn cheapest<'a, 'g>(itineraries: &'a [Itinerary<'g>]) -> Option<&'a Itinerary<'g>> {
    itineraries
        .par_iter()
        .reduce_with(|a, b| if b.max_cost() < a.max_cost() { b } else { a })
}

/// Worker-local cheapest candidate.
#[derive(Default)]
struct Candidate<'g> {
    best: Option<Itinerary<'g>>,
    stats: MergeStatistics,
}

impl<'g> Candidate<'g> {
    fn join(mut self, other: Candidate<'g>) -> Self {
        self.best = cheaper_of(self.best, other.best);
        self.stats = self.stats.merge(&other.stats);
        self
    }

    #[inline]
    fn beats_best(&self, cost: f64) -> bool {
        self.best.as_ref().is_none_or(|best| cost < best.max_cost())
    }
}

/// Parallel 2-way and 3-way leg merger.
#[derive(Debug, Clone, Copy)]
pub struct PathMerge<'a> {
    alliances: &'a AllianceIndex,
    pruning: bool,
}

impl<'a> PathMerge<'a> {
    #[inline]
    pub fn new(alliances: &'a AllianceIndex) -> Self {
        Self {
            alliances,
            pruning: true,
        }
    }

    /// Enables or disables bound pruning (enabled by default). The result is
    /// the same either way; pruning only skips work.
    #[inline]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Cheapest `first ++ second`.
    pub fn merge_two<'g>(
        &self,
        first: &[Itinerary<'g>],
        second: &[Itinerary<'g>],
    ) -> MergeOutcome<'g> {
        let start = Instant::now();
        if first.is_empty() || second.is_empty() {
            return MergeOutcome::new(None, MergeStatistics::default());
        }

        let bound = CostBound::new();
        let result = first
            .par_iter()
            .fold(Candidate::default, |mut acc, a| {
                for b in second {
                    self.consider(&bound, &mut acc, a, b);
                }
                acc
            })
            .reduce(Candidate::default, Candidate::join);

        self.finish(result, start)
    }

    /// Cheapest `first ++ second ++ third`.
    pub fn merge_three<'g>(
        &self,
        first: &[Itinerary<'g>],
        second: &[Itinerary<'g>],
        third: &[Itinerary<'g>],
    ) -> MergeOutcome<'g> {
        let start = Instant::now();
        if first.is_empty() || second.is_empty() || third.is_empty() {
            return MergeOutcome::new(None, MergeStatistics::default());
        }

        let bound = CostBound::new();
        let result = first
            .par_iter()
            .fold(Candidate::default, |mut acc, a| {
                for b in second {
                    acc.stats.on_combination();
                    if !a.is_compatible_with(b) {
                        acc.stats.on_incompatible();
                        continue;
                    }
                    if !self.admits(&bound, a.min_cost() + b.min_cost()) {
                        acc.stats.on_pruning_bound();
                        continue;
                    }
                    let Ok(ab) = a.clone().concatenate(b.clone(), self.alliances) else {
                        continue;
                    };
                    for c in third {
                        self.consider(&bound, &mut acc, &ab, c);
                    }
                }
                acc
            })
            .reduce(Candidate::default, Candidate::join);

        self.finish(result, start)
    }

    fn consider<'g>(
        &self,
        bound: &CostBound,
        acc: &mut Candidate<'g>,
        left: &Itinerary<'g>,
        right: &Itinerary<'g>,
    ) {
        acc.stats.on_combination();
        if !left.is_compatible_with(right) {
            acc.stats.on_incompatible();
            return;
        }
        if !self.admits(bound, left.min_cost() + right.min_cost()) {
            acc.stats.on_pruning_bound();
            return;
        }

        let cost = left.junction_cost(right, self.alliances);
        if !acc.beats_best(cost) {
            return;
        }
        if let Ok(joined) = left.clone().concatenate(right.clone(), self.alliances) {
            bound.offer(&joined);
            acc.stats.on_improvement();
            acc.best = Some(joined);
        }
    }

    #[inline]
    fn admits(&self, bound: &CostBound, min_cost: f64) -> bool {
        !self.pruning || bound.admits(min_cost)
    }

    fn finish<'g>(&self, result: Candidate<'g>, start: Instant) -> MergeOutcome<'g> {
        let mut stats = result.stats;
        stats.set_total_time(start.elapsed());
        MergeOutcome::new(result.best, stats)
    }
}
