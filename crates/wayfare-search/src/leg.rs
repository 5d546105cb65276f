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

//! # Leg Search
//!
//! Parallel, bounded enumeration of every itinerary between two cities inside
//! a time window.
//!
//! ## Algorithm
//!
//! Level-synchronous breadth-first search. The frontier of one level is a
//! `Vec<Itinerary>` that is consumed by a rayon parallel fold: every frontier
//! itinerary is moved into exactly one task, which checks it against the
//! shared `CostBound` before expanding it and returns its continuations by
//! value into a worker-local `Expansion`. The expansions are concatenated into
//! the next frontier. No itinerary is shared for mutation and none is
//! processed twice.
//!
//! A continuation of an itinerary landing at `L` in city `X` is any departure
//! of `X` that
//!
//! - takes off strictly after `L` and at most `max_layover` seconds later,
//! - takes off and lands inside the query window,
//! - flies to a city the itinerary has not touched yet, and
//! - keeps the optimistic cost within the bound's ceiling.
//!
//! Continuations that reach the destination are recorded as complete and
//! offered to the bound. When the frontier runs dry, complete itineraries
//! whose `min_cost` exceeds the final ceiling are discarded.
//!
//! The no-revisit rule bounds the depth by the number of cities, so a search
//! always terminates.
//!
//! ## Margin and exhaustive mode
//!
//! The bound is admissible for the cheapest itinerary of this leg alone. When
//! the leg is later merged with other legs, a pricier itinerary can win
//! through the discount it earns a neighbouring flight at the junction.
//! `with_margin(m)` only prunes itineraries whose optimistic cost exceeds the
//! ceiling by more than `m`. If a neighbouring leg may overlap this leg in
//! time, an itinerary pruned here could be the only one that fits, and the
//! leg has to be searched with `with_pruning(false)`, which keeps every
//! itinerary in the window.

use crate::bound::CostBound;
use crate::monitor::search_monitor::SearchMonitor;
use crate::result::LegOutcome;
use crate::stats::SearchStatistics;
use rayon::prelude::*;
use std::time::Instant;
use wayfare_model::alliance::AllianceIndex;
use wayfare_model::graph::FlightGraph;
use wayfare_model::index::LocationIndex;
use wayfare_model::itinerary::{Discount, Itinerary};
use wayfare_model::time::{Seconds, TimeWindow};

/// One point-to-point leg: where from, where to, and when.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LegQuery {
    origin: LocationIndex,
    destination: LocationIndex,
    window: TimeWindow,
}

impl LegQuery {
    #[inline]
    pub const fn new(origin: LocationIndex, destination: LocationIndex, window: TimeWindow) -> Self {
        Self {
            origin,
            destination,
            window,
        }
    }

    #[inline]
    pub const fn origin(&self) -> LocationIndex {
        self.origin
    }

    #[inline]
    pub const fn destination(&self) -> LocationIndex {
        self.destination
    }

    #[inline]
    pub const fn window(&self) -> TimeWindow {
        self.window
    }
}

impl std::fmt::Display for LegQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LegQuery({} -> {}, {})",
            self.origin, self.destination, self.window
        )
    }
}

/// Worker-local result of expanding part of a frontier.
#[derive(Default)]
struct Expansion<'g> {
    frontier: Vec<Itinerary<'g>>,
    complete: Vec<Itinerary<'g>>,
    stats: SearchStatistics,
}

impl<'g> Expansion<'g> {
    fn join(mut self, other: Expansion<'g>) -> Self {
        self.frontier.extend(other.frontier);
        self.complete.extend(other.complete);
        self.stats = self.stats.merge(&other.stats);
        self
    }
}

/// Bounded itinerary enumerator over a frozen flight graph.
#[derive(Debug, Clone, Copy)]
pub struct LegSearch<'g> {
    graph: &'g FlightGraph,
    alliances: &'g AllianceIndex,
    max_layover: Seconds,
    pruning: bool,
    margin: f64,
}

impl<'g> LegSearch<'g> {
    #[inline]
    pub fn new(graph: &'g FlightGraph, alliances: &'g AllianceIndex, max_layover: Seconds) -> Self {
        Self {
            graph,
            alliances,
            max_layover,
            pruning: true,
            margin: 0.0,
        }
    }

    /// Enables or disables bound pruning (enabled by default).
    #[inline]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Keeps itineraries whose optimistic cost exceeds the bound's ceiling by
    /// at most `margin`.
    #[inline]
    pub fn with_margin(mut self, margin: f64) -> Self {
        debug_assert!(margin >= 0.0, "called `LegSearch::with_margin` with a negative margin");
        self.margin = margin;
        self
    }

    #[inline]
    pub fn graph(&self) -> &'g FlightGraph {
        self.graph
    }

    #[inline]
    pub fn max_layover(&self) -> Seconds {
        self.max_layover
    }

    #[inline]
    pub fn is_pruning(&self) -> bool {
        self.pruning
    }

    #[inline]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Enumerates the itineraries of `query`. Must run inside the rayon pool
    /// that should do the work.
    pub fn search<M>(&self, query: &LegQuery, mut monitor: M) -> LegOutcome<'g>
    where
        M: SearchMonitor,
    {
        let start = Instant::now();
        monitor.on_enter_search(self.graph, query);

        let bound = CostBound::new();
        let seeds = self.seed(query, &bound);
        let mut stats = seeds.stats;
        let mut complete = seeds.complete;
        let mut frontier = seeds.frontier;

        let mut level = 0u64;
        while !frontier.is_empty() {
            level += 1;
            stats.on_level(frontier.len());
            monitor.on_level(level, frontier.len(), &stats);

            let expansion = frontier
                .into_par_iter()
                .fold(Expansion::default, |mut acc, itinerary| {
                    self.expand(query, &bound, itinerary, &mut acc);
                    acc
                })
                .reduce(Expansion::default, Expansion::join);

            stats = stats.merge(&expansion.stats);
            complete.extend(expansion.complete);
            frontier = expansion.frontier;
        }

        if self.pruning {
            let before = complete.len();
            complete.retain(|it| self.admits(&bound, it.min_cost()));
            stats.on_discarded_final(before - complete.len());
        }

        stats.set_total_time(start.elapsed());
        monitor.on_exit_search(&stats);
        LegOutcome::new(complete, stats, bound.corridor())
    }

    fn seed(&self, query: &LegQuery, bound: &CostBound) -> Expansion<'g> {
        let mut seeds = Expansion::default();
        if query.origin == query.destination {
            return seeds;
        }

        for flight in self.graph.outgoing(query.origin) {
            if !query.window.admits(flight.takeoff(), flight.landing())
                || flight.destination() == query.origin
            {
                continue;
            }
            if !self.admits(bound, flight.cost() * Discount::BEST_MULTIPLIER) {
                seeds.stats.on_pruning_bound();
                continue;
            }

            let itinerary = Itinerary::new(flight);
            seeds.stats.on_generated();
            self.record(query, bound, itinerary, &mut seeds);
        }
        seeds
    }

    fn expand(
        &self,
        query: &LegQuery,
        bound: &CostBound,
        itinerary: Itinerary<'g>,
        acc: &mut Expansion<'g>,
    ) {
        if !self.admits(bound, itinerary.min_cost()) {
            acc.stats.on_pruning_bound();
            return;
        }
        acc.stats.on_expanded();

        let landing = itinerary.arrival();
        for flight in self.graph.departures_after(itinerary.destination(), landing) {
            if flight.takeoff() - landing > self.max_layover {
                break;
            }
            if !query.window.admits(flight.takeoff(), flight.landing())
                || itinerary.visits(flight.destination())
            {
                continue;
            }
            if !self.admits(
                bound,
                itinerary.min_cost() + flight.cost() * Discount::BEST_MULTIPLIER,
            ) {
                acc.stats.on_pruning_bound();
                continue;
            }

            let next = itinerary.extended(flight, self.alliances);
            acc.stats.on_generated();
            self.record(query, bound, next, acc);
        }
    }

    #[inline]
    fn record(
        &self,
        query: &LegQuery,
        bound: &CostBound,
        itinerary: Itinerary<'g>,
        acc: &mut Expansion<'g>,
    ) {
        if itinerary.destination() == query.destination {
            bound.offer(&itinerary);
            acc.stats.on_completed();
            acc.complete.push(itinerary);
        } else {
            acc.frontier.push(itinerary);
        }
    }

    #[inline]
    fn admits(&self, bound: &CostBound, min_cost: f64) -> bool {
        !self.pruning || bound.admits(min_cost - self.margin)
    }
}
