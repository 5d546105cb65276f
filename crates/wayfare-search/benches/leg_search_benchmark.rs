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

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;
use wayfare_model::alliance::AllianceIndex;
use wayfare_model::flight::FlightRecord;
use wayfare_model::graph::{FlightGraph, FlightGraphBuilder};
use wayfare_model::time::TimeWindow;
use wayfare_search::leg::{LegQuery, LegSearch};
use wayfare_search::merge::PathMerge;
use wayfare_search::monitor::no_op::NoOpSearchMonitor;

const HOUR: i64 = 3600;
const DAY: i64 = 24 * HOUR;
const COMPANIES: usize = 8;

/// A random network of `cities` airports with `flights` flights spread over
/// three days.
fn random_network(cities: usize, flights: usize, seed: u64) -> FlightGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = FlightGraphBuilder::with_capacity(flights);
    let mut inserted = 0;
    while inserted < flights {
        let from = rng.random_range(0..cities);
        let to = rng.random_range(0..cities);
        if from == to {
            continue;
        }
        let takeoff = rng.random_range(0..3 * DAY);
        let duration = rng.random_range(HOUR..6 * HOUR);
        builder.insert_flight(FlightRecord::new(
            format!("F{inserted}"),
            format!("A{from}"),
            takeoff,
            format!("A{to}"),
            takeoff + duration,
            rng.random_range(50.0..800.0),
            format!("C{}", rng.random_range(0..COMPANIES)),
        ));
        inserted += 1;
    }
    builder.build()
}

fn alliances(graph: &FlightGraph) -> AllianceIndex {
    AllianceIndex::from_names(
        graph,
        &[vec!["C0", "C1", "C2"], vec!["C3", "C4"], vec!["C5", "C6"]],
    )
}

fn bench_leg_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("leg_search_benchmark");
    group.sample_size(20);

    for &(cities, flights) in &[(10, 500), (20, 2000), (30, 5000)] {
        let graph = random_network(cities, flights, 0x5eed);
        let alliances = alliances(&graph);
        let (Some(from), Some(to)) = (graph.location("A0"), graph.location("A1")) else {
            eprintln!("Generated network lacks A0 or A1. Skipping {cities}x{flights}.");
            continue;
        };
        let query = LegQuery::new(from, to, TimeWindow::new(0, 3 * DAY));
        let label = format!("{cities}x{flights}");

        group.throughput(Throughput::Elements(flights as u64));

        for pruning in [true, false] {
            let search = LegSearch::new(&graph, &alliances, 4 * HOUR).with_pruning(pruning);
            let name = if pruning { "pruned" } else { "exhaustive" };
            group.bench_with_input(BenchmarkId::new(name, &label), &query, |b, query| {
                b.iter(|| black_box(search.search(black_box(query), NoOpSearchMonitor)))
            });
        }
    }
    group.finish();
}

fn bench_round_trip_merge(c: &mut Criterion) {
    let graph = random_network(15, 1500, 0xfeed);
    let alliances = alliances(&graph);
    let (Some(home), Some(away)) = (graph.location("A0"), graph.location("A1")) else {
        eprintln!("Generated network lacks A0 or A1. Skipping merge benchmark.");
        return;
    };

    let search = LegSearch::new(&graph, &alliances, 4 * HOUR).with_pruning(false);
    let out = search.search(
        &LegQuery::new(home, away, TimeWindow::new(0, DAY + DAY / 2)),
        NoOpSearchMonitor,
    );
    let back = search.search(
        &LegQuery::new(away, home, TimeWindow::new(DAY, 3 * DAY)),
        NoOpSearchMonitor,
    );

    let mut group = c.benchmark_group("merge_benchmark");
    group.throughput(Throughput::Elements((out.len() * back.len()) as u64));
    group.bench_function("merge_two", |b| {
        b.iter(|| {
            black_box(
                PathMerge::new(&alliances).merge_two(black_box(out.itineraries()), black_box(back.itineraries())),
            )
        })
    });
    group.finish();
}

criterion_group!(benches, bench_leg_search, bench_round_trip_merge);
criterion_main!(benches);
