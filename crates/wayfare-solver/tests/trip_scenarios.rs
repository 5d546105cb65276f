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

use wayfare_model::alliance::AllianceIndex;
use wayfare_model::flight::FlightRecord;
use wayfare_model::graph::{FlightGraph, FlightGraphBuilder};
use wayfare_model::loading::{FlightLoader, parse_alliances};
use wayfare_model::time::decode_timestamp;
use wayfare_solver::error::SolverError;
use wayfare_solver::parameters::{Parameters, ParametersBuilder};
use wayfare_solver::report::{write_play_hard, write_work_hard};
use wayfare_solver::solution::Solution;
use wayfare_solver::solver::SolverBuilder;

const HOUR: i64 = 3600;
const DAY: i64 = 24 * HOUR;

const FLIGHTS: &str = "\
AF1;Paris;01102020080000;Boston;01102020140000;500;AF
AF2;Boston;01142020100000;Paris;01142020180000;450;AF
DL1;Boston;01142020090000;Paris;01142020170000;400;DL
AF3;Paris;01082020090000;Rome;01082020110000;100;AF
AZ1;Rome;01102020100000;Boston;01102020200000;600;AZ
DL2;Boston;01142020120000;Rome;01142020220000;550;DL
AZ2;Rome;01172020100000;Paris;01172020120000;90;AZ
XX1;Paris;01082020090000;Oslo;01082020120000;80;XX
";

const ALLIANCES: &str = "AF;DL\n";

fn ts(text: &str) -> i64 {
    decode_timestamp(text).unwrap()
}

fn conference_trip() -> (FlightGraph, AllianceIndex, Parameters) {
    let graph = FlightLoader::new().from_str(FLIGHTS).unwrap();
    let alliances = AllianceIndex::from_names(&graph, &parse_alliances(ALLIANCES));
    let parameters = ParametersBuilder::new("Paris", "Boston")
        .departure_window(ts("01102020000000"), ts("01112020000000"))
        .arrival_window(ts("01142020000000"), ts("01152020000000"))
        .max_layover(6 * HOUR)
        .vacation(DAY, 3 * DAY)
        .side_trips(["Rome", "Oslo", "Milan"])
        .workers(4)
        .build()
        .unwrap();
    (graph, alliances, parameters)
}

fn ids(solution_slot: Option<&wayfare_model::itinerary::Itinerary<'_>>) -> Vec<String> {
    solution_slot
        .map(|it| it.flights().iter().map(|f| f.id().to_string()).collect())
        .unwrap_or_default()
}

fn render<F>(f: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
{
    let mut buf = Vec::new();
    f(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn work_hard_prefers_the_same_company_round_trip() {
    let (graph, alliances, parameters) = conference_trip();
    let outcome = SolverBuilder::new()
        .build()
        .solve(&graph, &alliances, &parameters)
        .unwrap();

    // DL1 is cheaper on its own, but AF1 + AF2 earn the same-company rate.
    let work_hard = outcome.solution().work_hard().unwrap();
    assert_eq!(ids(Some(work_hard)), ["AF1", "AF2"]);
    assert!((work_hard.max_cost() - 665.0).abs() < 1e-6);
}

#[test]
fn play_hard_keeps_the_cheaper_circuit() {
    let (graph, alliances, parameters) = conference_trip();
    let outcome = SolverBuilder::new()
        .build()
        .solve(&graph, &alliances, &parameters)
        .unwrap();
    let solution = outcome.solution();

    // Before the conference: AF3 + AZ1 + DL1 = 1100.
    // After the conference: AF1 + DL2 (alliance) + AZ2 = 930.
    let rome = solution.side_trip("Rome").unwrap();
    let trip = rome.itinerary().unwrap();
    assert_eq!(ids(Some(trip)), ["AF1", "DL2", "AZ2"]);
    assert!((trip.max_cost() - 930.0).abs() < 1e-6);
}

#[test]
fn side_trip_without_departures_only_empties_its_slot() {
    let (graph, alliances, parameters) = conference_trip();
    let outcome = SolverBuilder::new()
        .build()
        .solve(&graph, &alliances, &parameters)
        .unwrap();
    let solution = outcome.solution();

    let cities: Vec<_> = solution.play_hard().iter().map(|t| t.city()).collect();
    assert_eq!(cities, ["Rome", "Oslo", "Milan"]);
    assert!(solution.side_trip("Oslo").unwrap().itinerary().is_none());
    assert!(solution.side_trip("Milan").unwrap().itinerary().is_none());
    assert!(solution.side_trip("Rome").unwrap().itinerary().is_some());
    assert!(solution.work_hard().is_some());
    assert_eq!(outcome.statistics().side_trips_skipped, 2);

    // Both circuits of Rome reuse a home <-> conference leg.
    assert_eq!(outcome.statistics().legs_searched, 6);
    assert_eq!(outcome.statistics().leg_requests, 8);
}

#[test]
fn exhaustive_solve_agrees_on_this_network() {
    let (graph, alliances, parameters) = conference_trip();
    let pruned = SolverBuilder::new()
        .build()
        .solve(&graph, &alliances, &parameters)
        .unwrap();
    let exhaustive = SolverBuilder::new()
        .with_pruning(false)
        .build()
        .solve(&graph, &alliances, &parameters)
        .unwrap();

    let cost = |s: &Solution<'_>| s.work_hard().map(|it| it.max_cost());
    assert_eq!(cost(pruned.solution()), cost(exhaustive.solution()));
    for (a, b) in pruned
        .solution()
        .play_hard()
        .iter()
        .zip(exhaustive.solution().play_hard())
    {
        assert_eq!(
            a.itinerary().map(|it| it.max_cost()),
            b.itinerary().map(|it| it.max_cost())
        );
    }
}

#[test]
fn reports_match_the_proposition_format() {
    let (graph, alliances, parameters) = conference_trip();
    let outcome = SolverBuilder::new()
        .build()
        .solve(&graph, &alliances, &parameters)
        .unwrap();

    let work_hard = render(|out| write_work_hard(out, &graph, outcome.solution()));
    assert_eq!(
        work_hard,
        "\
“Work Hard” Proposition :
Price : 665
AF-AF1-Paris (1/10 8h0min)/Boston (1/10 14h0min)-500$-70%
AF-AF2-Boston (1/14 10h0min)/Paris (1/14 18h0min)-450$-70%

"
    );

    let play_hard = render(|out| write_play_hard(out, &graph, outcome.solution()));
    assert_eq!(
        play_hard,
        "\
“Play Hard” Proposition 1 : Rome
Price : 930
AF-AF1-Paris (1/10 8h0min)/Boston (1/10 14h0min)-500$-80%
DL-DL2-Boston (1/14 12h0min)/Rome (1/14 22h0min)-550$-80%
AZ-AZ2-Rome (1/17 10h0min)/Paris (1/17 12h0min)-90$-100%


“Play Hard” Proposition 2 : Oslo
No itinerary found

“Play Hard” Proposition 3 : Milan
No itinerary found

"
    );
}

#[test]
fn unknown_conference_aborts() {
    let graph = FlightLoader::new().from_str(FLIGHTS).unwrap();
    let alliances = AllianceIndex::new(graph.num_companies(), Vec::new());
    let parameters = ParametersBuilder::new("Paris", "Tokyo")
        .departure_window(0, DAY)
        .arrival_window(DAY, 2 * DAY)
        .workers(1)
        .build()
        .unwrap();

    let err = SolverBuilder::new()
        .build()
        .solve(&graph, &alliances, &parameters)
        .unwrap_err();
    match err {
        SolverError::Model(e) => assert!(e.is_unknown_location()),
        other => panic!("unexpected error: {other}"),
    }
}

/// Three legs at 50/50/50 are compatible; a cheaper 30/30 alternative for the
/// last two legs is not, neither on its own nor mixed with the 50s.
#[test]
fn temporally_incompatible_combination_is_never_returned() {
    const BASE: i64 = 10 * DAY;
    let flight = |id: &str, from: &str, takeoff: i64, to: &str, cost: f64, company: &str| {
        FlightRecord::new(id, from, takeoff, to, takeoff + 2 * HOUR, cost, company)
    };

    let mut builder = FlightGraphBuilder::new();
    builder.insert_flight(flight("hv1", "H", BASE - 2 * DAY, "V", 50.0, "A"));
    builder.insert_flight(flight("vc1", "V", BASE, "C", 50.0, "B"));
    builder.insert_flight(flight("ch2", "C", BASE + HOUR, "H", 30.0, "E"));
    builder.insert_flight(flight("ch1", "C", BASE + 5 * HOUR, "H", 50.0, "D"));
    builder.insert_flight(flight("vc2", "V", BASE + 6 * HOUR, "C", 30.0, "F"));
    let graph = builder.build();
    let alliances = AllianceIndex::new(graph.num_companies(), Vec::new());

    // Overlapping conference windows let the alternatives collide in time.
    let parameters = ParametersBuilder::new("H", "C")
        .departure_window(BASE, BASE + 2 * DAY)
        .arrival_window(BASE, BASE + 2 * DAY)
        .max_layover(4 * HOUR)
        .vacation(DAY, 3 * DAY)
        .side_trip("V")
        .workers(2)
        .build()
        .unwrap();

    let outcome = SolverBuilder::new()
        .build()
        .solve(&graph, &alliances, &parameters)
        .unwrap();

    let trip = outcome.solution().side_trip("V").unwrap().itinerary().unwrap();
    assert_eq!(ids(Some(trip)), ["hv1", "vc1", "ch1"]);
    assert!((trip.max_cost() - 150.0).abs() < 1e-9);
    assert!(outcome.solution().work_hard().is_none());
}

/// Without a minimum vacation the home -> side window ends when the
/// conference window starts. The cheap way to the side city lands too late
/// for the only onward flight, the expensive one does not.
#[test]
fn touching_windows_keep_the_only_compatible_leg() {
    const BASE: i64 = 100 * HOUR;
    let flight = |id: &str, from: &str, takeoff: i64, to: &str, cost: f64, company: &str| {
        FlightRecord::new(id, from, takeoff, to, takeoff + 2 * HOUR, cost, company)
    };

    let mut builder = FlightGraphBuilder::new();
    builder.insert_flight(flight("hv_cheap", "H", BASE - 2 * HOUR, "V", 10.0, "A"));
    builder.insert_flight(flight("hv_dear", "H", BASE - 12 * HOUR, "V", 100.0, "B"));
    builder.insert_flight(flight("vc", "V", BASE, "C", 50.0, "C"));
    builder.insert_flight(flight("ch", "C", BASE + 10 * HOUR, "H", 50.0, "D"));
    let graph = builder.build();
    let alliances = AllianceIndex::new(graph.num_companies(), Vec::new());

    let parameters = ParametersBuilder::new("H", "C")
        .departure_window(BASE, BASE + 4 * HOUR)
        .arrival_window(BASE + 5 * HOUR, BASE + 30 * HOUR)
        .max_layover(HOUR)
        .vacation(0, 50 * HOUR)
        .side_trip("V")
        .workers(2)
        .build()
        .unwrap();

    let cost = |solver: SolverBuilder| {
        solver
            .build()
            .solve(&graph, &alliances, &parameters)
            .unwrap()
            .solution()
            .side_trip("V")
            .unwrap()
            .itinerary()
            .map(|it| (ids(Some(it)), it.max_cost()))
    };

    let expected = Some((vec!["hv_dear".to_string(), "vc".to_string(), "ch".to_string()], 200.0));
    assert_eq!(cost(SolverBuilder::new()), expected);
    assert_eq!(cost(SolverBuilder::new().with_pruning(false)), expected);
}

/// The pricier way to the side city flies the same company as the onward
/// flight, and the discount it earns that flight outweighs its own price.
#[test]
fn junction_discount_keeps_a_pricier_leg() {
    const BASE: i64 = 10 * DAY;
    let flight = |id: &str, from: &str, takeoff: i64, to: &str, cost: f64, company: &str| {
        FlightRecord::new(id, from, takeoff, to, takeoff + 2 * HOUR, cost, company)
    };

    let mut builder = FlightGraphBuilder::new();
    builder.insert_flight(flight("hv_own", "H", BASE - 2 * DAY, "V", 100.0, "A"));
    builder.insert_flight(flight("hv_partner", "H", BASE - 2 * DAY, "V", 150.0, "B"));
    builder.insert_flight(flight("vc", "V", BASE, "C", 1000.0, "B"));
    builder.insert_flight(flight("ch", "C", BASE + 2 * DAY + HOUR, "H", 50.0, "D"));
    let graph = builder.build();
    let alliances = AllianceIndex::new(graph.num_companies(), Vec::new());

    let parameters = ParametersBuilder::new("H", "C")
        .departure_window(BASE, BASE + DAY)
        .arrival_window(BASE + 2 * DAY, BASE + 3 * DAY)
        .max_layover(HOUR)
        .vacation(DAY, 3 * DAY)
        .side_trip("V")
        .workers(2)
        .build()
        .unwrap();

    let outcome = SolverBuilder::new()
        .build()
        .solve(&graph, &alliances, &parameters)
        .unwrap();

    // 0.7 * 150 + 0.7 * 1000 + 50 beats 100 + 1000 + 50.
    let trip = outcome.solution().side_trip("V").unwrap().itinerary().unwrap();
    assert_eq!(ids(Some(trip)), ["hv_partner", "vc", "ch"]);
    assert!((trip.max_cost() - 855.0).abs() < 1e-6);
}
