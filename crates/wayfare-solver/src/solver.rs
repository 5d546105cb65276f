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

//! # Itinerary Solver
//!
//! Orchestrates the leg searches and merges behind both propositions.
//!
//! ## Motivation
//!
//! The work-hard round trip and the play-hard circuits of every side-trip
//! city share legs: `home → conference` and `conference → home` appear in
//! the round trip and in one circuit of every side trip. The solver plans all
//! legs of a run up front, searches each distinct leg exactly once, and lets
//! every merge borrow the shared results.
//!
//! ## Highlights
//!
//! - Leg plan:
//!   - Every `(origin, destination, window)` request is deduplicated through
//!     an `FxHashMap`; merges refer to legs by slot.
//!   - Side trips that are unknown, equal to home or the conference city, or
//!     lack departures or arrivals are skipped and yield no itinerary.
//!   - Each leg remembers whether some journey puts a neighbouring leg next
//!     to it and whether those neighbours may overlap it in time. Overlapping
//!     legs are searched without pruning; the others prune with a margin
//!     that covers the junction discounts their neighbours can earn.
//! - Execution:
//!   - A dedicated rayon pool with `Parameters::workers` threads.
//!   - All leg searches run as one parallel iterator; the merges start once
//!     every leg is complete.
//!   - The work-hard 2-way merge and the play-hard 3-way merges run side by
//!     side via `rayon::join`; each side trip merges its two circuits in
//!     parallel and keeps the cheaper.
//! - Errors:
//!   - Unknown home or conference cities abort the solve.
//!   - Missing itineraries are `None`, never errors.
//!
//! ## Usage
//!
//! ```rust
//! use wayfare_model::alliance::AllianceIndex;
//! use wayfare_model::loading::FlightLoader;
//! use wayfare_solver::parameters::ParametersBuilder;
//! use wayfare_solver::solver::SolverBuilder;
//!
//! let flights = "\
//! AF1;Paris;01012020080000;Boston;01012020120000;500;AF
//! AF2;Boston;01052020080000;Paris;01052020160000;500;AF
//! ";
//! let graph = FlightLoader::new().from_str(flights).unwrap();
//! let alliances = AllianceIndex::new(graph.num_companies(), Vec::new());
//!
//! let parameters = ParametersBuilder::new("Paris", "Boston")
//!     .departure_window(1577836800, 1577923200)
//!     .arrival_window(1578182400, 1578268800)
//!     .max_layover(4 * 3600)
//!     .workers(2)
//!     .build()
//!     .unwrap();
//!
//! let outcome = SolverBuilder::new()
//!     .build()
//!     .solve(&graph, &alliances, &parameters)
//!     .unwrap();
//! let round_trip = outcome.solution().work_hard().unwrap();
//! assert_eq!(round_trip.len(), 2);
//! // Both flights are flown with the same company.
//! assert!((round_trip.max_cost() - 700.0).abs() < 1e-9);
//! ```

use crate::error::SolverError;
use crate::parameters::Parameters;
use crate::result::SolverOutcome;
use crate::solution::{SideTrip, Solution};
use crate::stats::SolverStatisticsBuilder;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::Instant;
use wayfare_model::alliance::AllianceIndex;
use wayfare_model::graph::FlightGraph;
use wayfare_model::index::LocationIndex;
use wayfare_model::itinerary::{Discount, Itinerary};
use wayfare_model::time::TimeWindow;
use wayfare_search::leg::{LegQuery, LegSearch};
use wayfare_search::merge::{PathMerge, cheaper_of};
use wayfare_search::monitor::log::LogSearchMonitor;
use wayfare_search::monitor::no_op::NoOpSearchMonitor;
use wayfare_search::result::LegOutcome;
use wayfare_search::stats::{MergeStatistics, SearchStatistics};

/// Position of a leg in the plan.
type LegSlot = usize;

/// How a leg meets its neighbours, over every journey that uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LegRole {
    /// Some journey has a leg right before this one.
    follows: bool,
    /// Some journey has a leg right after this one.
    precedes: bool,
    /// Every neighbouring window ends strictly before this one starts, or
    /// starts strictly after this one ends.
    separated: bool,
}

impl LegRole {
    fn new(window: TimeWindow, previous: Option<TimeWindow>, next: Option<TimeWindow>) -> Self {
        Self {
            follows: previous.is_some(),
            precedes: next.is_some(),
            separated: previous.is_none_or(|p| p.latest() < window.earliest())
                && next.is_none_or(|n| window.latest() < n.earliest()),
        }
    }

    fn join(self, other: LegRole) -> Self {
        Self {
            follows: self.follows || other.follows,
            precedes: self.precedes || other.precedes,
            separated: self.separated && other.separated,
        }
    }
}

/// The distinct legs of one solve.
#[derive(Debug, Default)]
struct LegPlan {
    legs: Vec<LegQuery>,
    roles: Vec<LegRole>,
    slots: FxHashMap<LegQuery, LegSlot>,
    requests: u64,
}

impl LegPlan {
    /// Returns the slot of `query`, adding it if it is new. `previous` and
    /// `next` are the windows of the neighbouring legs in the requesting
    /// journey.
    fn request(
        &mut self,
        query: LegQuery,
        previous: Option<TimeWindow>,
        next: Option<TimeWindow>,
    ) -> LegSlot {
        self.requests += 1;
        let role = LegRole::new(query.window(), previous, next);
        match self.slots.get(&query) {
            Some(&slot) => {
                self.roles[slot] = self.roles[slot].join(role);
                slot
            }
            None => {
                self.legs.push(query);
                self.roles.push(role);
                let slot = self.legs.len() - 1;
                self.slots.insert(query, slot);
                slot
            }
        }
    }

    /// The search for the leg in `slot`.
    ///
    /// A leg whose neighbours may overlap it in time is searched without
    /// pruning. Otherwise an itinerary is only pruned when it stays more
    /// expensive than the leg's cheapest one even after earning the best
    /// discount on every flight that can join it.
    fn search_for<'g>(&self, slot: LegSlot, base: LegSearch<'g>) -> LegSearch<'g> {
        let role = self.roles[slot];
        if !role.separated {
            return base.with_pruning(false);
        }

        let graph = base.graph();
        let query = &self.legs[slot];
        let mut exposed = 0.0_f64;
        if role.follows {
            exposed += graph
                .incoming(query.origin())
                .map(|f| f.cost())
                .fold(0.0, f64::max);
        }
        if role.precedes {
            exposed += graph
                .outgoing(query.destination())
                .iter()
                .map(|f| f.cost())
                .fold(0.0, f64::max);
        }
        base.with_margin(exposed * (Discount::Standard.multiplier() - Discount::BEST_MULTIPLIER))
    }
}

/// The legs behind one side-trip slot.
#[derive(Debug, Clone, Copy)]
enum SideTripPlan {
    Skipped,
    /// `before`: home → side → conference → home.
    /// `after`: home → conference → side → home.
    Planned {
        before: [LegSlot; 3],
        after: [LegSlot; 3],
    },
}

/// Solves the work-hard and play-hard propositions of one trip.
#[derive(Debug, Clone)]
pub struct Solver {
    pruning: bool,
    progress_interval: Option<u64>,
}

impl Solver {
    #[inline]
    pub fn is_pruning(&self) -> bool {
        self.pruning
    }

    #[inline]
    pub fn progress_interval(&self) -> Option<u64> {
        self.progress_interval
    }

    /// Runs a complete solve on a dedicated pool of `parameters.workers()`
    /// threads.
    ///
    /// # Errors
    ///
    /// - `SolverError::InvalidParameters` if `parameters` do not validate.
    /// - `SolverError::Model` if home or the conference city is unknown.
    /// - `SolverError::ThreadPool` if the worker pool cannot be created.
    pub fn solve<'g>(
        &self,
        graph: &'g FlightGraph,
        alliances: &'g AllianceIndex,
        parameters: &Parameters,
    ) -> Result<SolverOutcome<'g>, SolverError> {
        parameters.validate()?;
        let start_time = Instant::now();

        let home = graph.require_location(parameters.home())?;
        let conference = graph.require_location(parameters.conference())?;

        let departure = parameters.departure_window();
        let arrival = parameters.arrival_window();
        let before = parameters.vacation_before_window();
        let after = parameters.vacation_after_window();

        let mut plan = LegPlan::default();
        let outbound = plan.request(LegQuery::new(home, conference, departure), None, Some(arrival));
        let inbound = plan.request(LegQuery::new(conference, home, arrival), Some(departure), None);

        let mut side_trips = Vec::with_capacity(parameters.side_trips().len());
        for city in parameters.side_trips() {
            let side_trip = match resolve_side_trip(graph, city, home, conference) {
                Some(side) => SideTripPlan::Planned {
                    before: [
                        plan.request(LegQuery::new(home, side, before), None, Some(departure)),
                        plan.request(
                            LegQuery::new(side, conference, departure),
                            Some(before),
                            Some(arrival),
                        ),
                        plan.request(LegQuery::new(conference, home, arrival), Some(departure), None),
                    ],
                    after: [
                        plan.request(LegQuery::new(home, conference, departure), None, Some(arrival)),
                        plan.request(
                            LegQuery::new(conference, side, arrival),
                            Some(departure),
                            Some(after),
                        ),
                        plan.request(LegQuery::new(side, home, after), Some(arrival), None),
                    ],
                },
                None => SideTripPlan::Skipped,
            };
            side_trips.push(side_trip);
        }

        log::info!(
            "solving {} -> {} with {} side trip(s): {} distinct legs for {} requests",
            parameters.home(),
            parameters.conference(),
            side_trips.len(),
            plan.legs.len(),
            plan.requests
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(parameters.workers())
            .build()?;

        let search = LegSearch::new(graph, alliances, parameters.max_layover())
            .with_pruning(self.pruning);
        let merge = PathMerge::new(alliances);
        let unpruned = (0..plan.legs.len())
            .filter(|&slot| self.pruning && !plan.roles[slot].separated)
            .count();
        if unpruned > 0 {
            log::debug!("{unpruned} leg(s) overlap a neighbouring leg in time and are searched without pruning");
        }

        let (legs, (work_hard, work_hard_stats), play_hard) = pool.install(|| {
            let legs: Vec<LegOutcome<'g>> = plan
                .legs
                .par_iter()
                .enumerate()
                .map(|(slot, query)| self.search_leg(&plan.search_for(slot, search), query))
                .collect();

            let (work_hard, play_hard) = rayon::join(
                || {
                    let outcome =
                        merge.merge_two(legs[outbound].itineraries(), legs[inbound].itineraries());
                    let stats = outcome.statistics().clone();
                    (outcome.into_best(), stats)
                },
                || {
                    side_trips
                        .par_iter()
                        .map(|side_trip| merge_side_trip(&merge, &legs, side_trip))
                        .collect::<Vec<_>>()
                },
            );
            (legs, work_hard, play_hard)
        });

        let search_stats = legs
            .iter()
            .fold(SearchStatistics::default(), |acc, leg| {
                acc.merge(leg.statistics())
            });
        let itineraries_enumerated = legs.iter().map(|leg| leg.len() as u64).sum();
        let mut merge_stats = work_hard_stats;
        let mut slots = Vec::with_capacity(play_hard.len());
        for (city, (itinerary, stats)) in parameters.side_trips().iter().zip(play_hard) {
            merge_stats = merge_stats.merge(&stats);
            if itinerary.is_none() {
                log::info!("no play-hard itinerary through `{city}`");
            }
            slots.push(SideTrip::new(city.clone(), itinerary));
        }
        if work_hard.is_none() {
            log::info!("no work-hard itinerary found");
        }

        let skipped = side_trips
            .iter()
            .filter(|t| matches!(t, SideTripPlan::Skipped))
            .count();
        let statistics = SolverStatisticsBuilder::new()
            .legs_searched(legs.len() as u64)
            .leg_requests(plan.requests)
            .itineraries_enumerated(itineraries_enumerated)
            .side_trips_skipped(skipped as u64)
            .used_threads(pool.current_num_threads())
            .search(search_stats)
            .merge(merge_stats)
            .solve_duration(start_time.elapsed())
            .build();

        Ok(SolverOutcome::new(
            Solution::new(work_hard, slots),
            statistics,
        ))
    }

    fn search_leg<'g>(&self, search: &LegSearch<'g>, query: &LegQuery) -> LegOutcome<'g> {
        match self.progress_interval {
            Some(interval) => search.search(query, LogSearchMonitor::new(interval)),
            None => search.search(query, NoOpSearchMonitor::new()),
        }
    }
}

/// Resolves an optional side-trip city. Returns `None` for cities that cannot
/// take part in a circuit.
fn resolve_side_trip(
    graph: &FlightGraph,
    city: &str,
    home: LocationIndex,
    conference: LocationIndex,
) -> Option<LocationIndex> {
    let Some(side) = graph.location(city) else {
        log::warn!("side trip `{city}` is not served by any flight, skipping");
        return None;
    };
    if side == home || side == conference {
        log::warn!("side trip `{city}` is the home or conference city, skipping");
        return None;
    }
    if !graph.is_connected(side) {
        log::info!("side trip `{city}` lacks departures or arrivals, skipping");
        return None;
    }
    Some(side)
}

/// Merges both circuits of a side trip and keeps the cheaper one.
fn merge_side_trip<'g>(
    merge: &PathMerge<'_>,
    legs: &[LegOutcome<'g>],
    side_trip: &SideTripPlan,
) -> (Option<Itinerary<'g>>, MergeStatistics) {
    let SideTripPlan::Planned { before, after } = *side_trip else {
        return (None, MergeStatistics::default());
    };

    let circuit = |[a, b, c]: [LegSlot; 3]| {
        merge.merge_three(
            legs[a].itineraries(),
            legs[b].itineraries(),
            legs[c].itineraries(),
        )
    };
    let (before, after) = rayon::join(|| circuit(before), || circuit(after));
    let stats = before.statistics().clone().merge(after.statistics());
    (cheaper_of(before.into_best(), after.into_best()), stats)
}

/// Builder for `Solver`.
#[derive(Debug, Clone)]
pub struct SolverBuilder {
    pruning: bool,
    progress_interval: Option<u64>,
}

impl Default for SolverBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            pruning: true,
            progress_interval: None,
        }
    }

    /// Enables or disables bound pruning inside leg searches (enabled by
    /// default). The cheapest journeys are the same either way; pruning only
    /// shrinks the leg sets the merges walk.
    #[inline]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Logs leg search progress every `level_interval` levels.
    #[inline]
    pub fn with_progress_logging(mut self, level_interval: u64) -> Self {
        self.progress_interval = Some(level_interval);
        self
    }

    #[inline]
    pub fn build(self) -> Solver {
        Solver {
            pruning: self.pruning,
            progress_interval: self.progress_interval,
        }
    }
}
