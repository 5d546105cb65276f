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

use proptest::prelude::*;
use wayfare_model::alliance::AllianceIndex;
use wayfare_model::flight::FlightRecord;
use wayfare_model::graph::{FlightGraph, FlightGraphBuilder};
use wayfare_model::time::TimeWindow;
use wayfare_search::leg::{LegQuery, LegSearch};
use wayfare_search::merge::{PathMerge, cheapest};
use wayfare_search::monitor::no_op::NoOpSearchMonitor;

const HOUR: i64 = 3600;
const CITIES: usize = 5;
const MAX_LAYOVER: i64 = 6 * HOUR;

/// (origin, destination, takeoff hour, duration hours, cost, company)
type RawFlight = (usize, usize, i64, i64, u32, usize);

fn raw_flights() -> impl Strategy<Value = Vec<RawFlight>> {
    prop::collection::vec(
        (0..CITIES, 0..CITIES, 0i64..48, 1i64..4, 1u32..300, 0usize..3),
        1..40,
    )
}

fn build(raw: &[RawFlight]) -> FlightGraph {
    let mut b = FlightGraphBuilder::new();
    // Make sure every city exists even if no random flight touches it.
    for c in 0..CITIES {
        b.insert_flight(FlightRecord::new(
            format!("anchor{c}"),
            format!("C{c}"),
            1000 * HOUR,
            format!("C{}", (c + 1) % CITIES),
            1001 * HOUR,
            1.0,
            "K0",
        ));
    }
    for (i, &(from, to, hour, dur, cost, company)) in raw.iter().enumerate() {
        if from == to {
            continue;
        }
        b.insert_flight(FlightRecord::new(
            format!("F{i}"),
            format!("C{from}"),
            hour * HOUR,
            format!("C{to}"),
            (hour + dur) * HOUR,
            cost as f64,
            format!("K{company}"),
        ));
    }
    b.build()
}

fn alliances(graph: &FlightGraph) -> AllianceIndex {
    AllianceIndex::from_names(graph, &[vec!["K0", "K1"]])
}

fn leg(graph: &FlightGraph, from: &str, to: &str) -> LegQuery {
    LegQuery::new(
        graph.location(from).unwrap(),
        graph.location(to).unwrap(),
        TimeWindow::new(0, 60 * HOUR),
    )
}

proptest! {
    #[test]
    fn pruned_search_finds_the_exhaustive_optimum(raw in raw_flights()) {
        let graph = build(&raw);
        let alliances = alliances(&graph);
        let query = leg(&graph, "C0", "C3");

        let pruned = LegSearch::new(&graph, &alliances, MAX_LAYOVER).search(&query, NoOpSearchMonitor);
        let exhaustive = LegSearch::new(&graph, &alliances, MAX_LAYOVER)
            .with_pruning(false)
            .search(&query, NoOpSearchMonitor);

        prop_assert!(pruned.len() <= exhaustive.len());
        match (cheapest(pruned.itineraries()), cheapest(exhaustive.itineraries())) {
            (Some(a), Some(b)) => prop_assert!((a.max_cost() - b.max_cost()).abs() < 1e-6),
            (None, None) => {}
            (a, b) => prop_assert!(false, "pruned: {:?}, exhaustive: {:?}", a.is_some(), b.is_some()),
        }
    }

    #[test]
    fn found_itineraries_respect_path_invariants(raw in raw_flights()) {
        let graph = build(&raw);
        let alliances = alliances(&graph);
        let query = leg(&graph, "C1", "C4");

        let outcome = LegSearch::new(&graph, &alliances, MAX_LAYOVER)
            .with_pruning(false)
            .search(&query, NoOpSearchMonitor);

        for it in outcome.itineraries() {
            prop_assert_eq!(it.origin(), query.origin());
            prop_assert_eq!(it.destination(), query.destination());
            for pair in it.flights().windows(2) {
                prop_assert_eq!(pair[0].destination(), pair[1].origin());
                prop_assert!(pair[1].takeoff() > pair[0].landing());
                prop_assert!(pair[1].takeoff() - pair[0].landing() <= MAX_LAYOVER);
            }
            let mut cities: Vec<_> = it.flights().iter().map(|f| f.origin()).collect();
            cities.push(it.destination());
            let count = cities.len();
            cities.sort();
            cities.dedup();
            prop_assert_eq!(cities.len(), count);
            for f in it.flights() {
                prop_assert!(query.window().admits(f.takeoff(), f.landing()));
            }
            prop_assert!(it.min_cost() <= it.actual_cost() + 1e-6);
            prop_assert!((it.actual_cost() - it.max_cost()).abs() < 1e-6);
        }
    }

    #[test]
    fn merge_pruning_matches_unpruned_merge(raw in raw_flights()) {
        let graph = build(&raw);
        let alliances = alliances(&graph);
        let search = LegSearch::new(&graph, &alliances, MAX_LAYOVER).with_pruning(false);
        let out = search.search(&leg(&graph, "C0", "C2"), NoOpSearchMonitor);
        let back = search.search(&leg(&graph, "C2", "C0"), NoOpSearchMonitor);

        let pruned = PathMerge::new(&alliances).merge_two(out.itineraries(), back.itineraries());
        let full = PathMerge::new(&alliances)
            .with_pruning(false)
            .merge_two(out.itineraries(), back.itineraries());

        match (pruned.best(), full.best()) {
            (Some(a), Some(b)) => {
                prop_assert!((a.max_cost() - b.max_cost()).abs() < 1e-6);
                prop_assert!(a.flights().windows(2).all(|w| w[1].takeoff() > w[0].landing()));
            }
            (None, None) => {}
            _ => prop_assert!(false, "pruning changed whether a round trip exists"),
        }
    }
}
