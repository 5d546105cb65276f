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

//! # Flight Graph
//!
//! Immutable-after-build adjacency index over all flights of a run.
//!
//! ## Motivation
//!
//! Every leg search asks the same question over and over: "which flights leave
//! city X after time t, within the allowed layover?". Storing the flights of
//! each city as one contiguous slice sorted by take-off time answers it with a
//! binary search followed by a short linear scan, and keeps the hot loop free
//! of hashing and pointer chasing.
//!
//! ## Highlights
//!
//! - Single-writer-then-freeze: `FlightGraphBuilder` interns city and company
//!   names while flights are inserted; `build()` sorts the flight table by
//!   `(origin, takeoff)` and hands out a `FlightGraph` that is only ever read.
//! - `FlightGraph` is `Sync` and is shared by `&` across all worker threads.
//! - Every flight in a location's outgoing slice names that location as its
//!   origin; every flight in its incoming list names it as destination.
//!
//! ## Usage
//!
//! ```rust
//! use wayfare_model::flight::FlightRecord;
//! use wayfare_model::graph::FlightGraphBuilder;
//!
//! let mut builder = FlightGraphBuilder::new();
//! builder.insert_flight(FlightRecord::new("F2", "A", 500, "B", 900, 80.0, "X"));
//! builder.insert_flight(FlightRecord::new("F1", "A", 100, "C", 300, 60.0, "Y"));
//! let graph = builder.build();
//!
//! let departures = graph.neighbors("A").unwrap();
//! assert_eq!(departures.len(), 2);
//! assert_eq!(departures[0].id(), "F1");
//! assert!(graph.neighbors("Z").is_err());
//! ```

use crate::error::ModelError;
use crate::flight::{Flight, FlightRecord};
use crate::index::{CompanyIndex, FlightIndex, LocationIndex};
use crate::time::Timestamp;
use rustc_hash::FxHashMap;
use std::ops::Range;

/// A city with its departures and arrivals.
#[derive(Clone, Debug)]
pub struct Location {
    name: String,
    outgoing: Range<usize>,
    incoming: Vec<FlightIndex>,
}

impl Location {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn num_outgoing(&self) -> usize {
        self.outgoing.len()
    }

    #[inline]
    pub fn num_incoming(&self) -> usize {
        self.incoming.len()
    }

    #[inline]
    pub fn incoming(&self) -> &[FlightIndex] {
        &self.incoming
    }
}

/// Frozen adjacency index from city to departing and arriving flights.
#[derive(Clone, Debug)]
pub struct FlightGraph {
    flights: Vec<Flight>,
    locations: Vec<Location>,
    location_lookup: FxHashMap<String, LocationIndex>,
    companies: Vec<String>,
    company_lookup: FxHashMap<String, CompanyIndex>,
}

impl FlightGraph {
    #[inline]
    pub fn num_flights(&self) -> usize {
        self.flights.len()
    }

    #[inline]
    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    #[inline]
    pub fn num_companies(&self) -> usize {
        self.companies.len()
    }

    /// All flights, sorted by `(origin, takeoff)`.
    #[inline]
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    #[inline]
    pub fn flight(&self, index: FlightIndex) -> &Flight {
        debug_assert!(index.get() < self.flights.len());
        &self.flights[index.get()]
    }

    /// Looks up a city by name.
    #[inline]
    pub fn location(&self, name: &str) -> Option<LocationIndex> {
        self.location_lookup.get(name).copied()
    }

    /// Looks up a city by name, failing with `UnknownLocation` if it never
    /// appeared in any flight.
    pub fn require_location(&self, name: &str) -> Result<LocationIndex, ModelError> {
        self.location(name)
            .ok_or_else(|| ModelError::UnknownLocation(name.to_string()))
    }

    #[inline]
    pub fn location_at(&self, index: LocationIndex) -> &Location {
        debug_assert!(index.get() < self.locations.len());
        &self.locations[index.get()]
    }

    #[inline]
    pub fn location_name(&self, index: LocationIndex) -> &str {
        self.location_at(index).name()
    }

    #[inline]
    pub fn company(&self, name: &str) -> Option<CompanyIndex> {
        self.company_lookup.get(name).copied()
    }

    #[inline]
    pub fn company_name(&self, index: CompanyIndex) -> &str {
        debug_assert!(index.get() < self.companies.len());
        &self.companies[index.get()]
    }

    /// Departures of `location`, sorted by take-off time.
    #[inline]
    pub fn outgoing(&self, location: LocationIndex) -> &[Flight] {
        &self.flights[self.location_at(location).outgoing.clone()]
    }

    /// Arrivals at `location`, in flight-table order.
    pub fn incoming(&self, location: LocationIndex) -> impl Iterator<Item = &Flight> + '_ {
        self.location_at(location)
            .incoming
            .iter()
            .map(move |&i| self.flight(i))
    }

    /// Departures of `location` taking off strictly after `after`.
    #[inline]
    pub fn departures_after(&self, location: LocationIndex, after: Timestamp) -> &[Flight] {
        let outgoing = self.outgoing(location);
        let start = outgoing.partition_point(|f| f.takeoff() <= after);
        &outgoing[start..]
    }

    /// Departures of the named city.
    ///
    /// # Errors
    ///
    /// `ModelError::UnknownLocation` if the city never appeared in any flight.
    pub fn neighbors(&self, city: &str) -> Result<&[Flight], ModelError> {
        self.require_location(city).map(|idx| self.outgoing(idx))
    }

    /// Returns `true` if the city has at least one departure and one arrival.
    #[inline]
    pub fn is_connected(&self, location: LocationIndex) -> bool {
        let loc = self.location_at(location);
        loc.num_outgoing() > 0 && loc.num_incoming() > 0
    }
}

impl std::fmt::Display for FlightGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FlightGraph(locations: {}, flights: {}, companies: {})",
            self.num_locations(),
            self.num_flights(),
            self.num_companies()
        )
    }
}

/// Single-writer builder for `FlightGraph`.
#[derive(Clone, Debug, Default)]
pub struct FlightGraphBuilder {
    flights: Vec<Flight>,
    location_names: Vec<String>,
    location_lookup: FxHashMap<String, LocationIndex>,
    companies: Vec<String>,
    company_lookup: FxHashMap<String, CompanyIndex>,
}

impl FlightGraphBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(num_flights: usize) -> Self {
        Self {
            flights: Vec::with_capacity(num_flights),
            ..Self::default()
        }
    }

    #[inline]
    pub fn num_flights(&self) -> usize {
        self.flights.len()
    }

    /// Inserts a flight, creating its origin and destination locations and its
    /// company on first sight. Insertion order does not matter.
    pub fn insert_flight(&mut self, record: FlightRecord) {
        let origin = self.intern_location(record.origin);
        let destination = self.intern_location(record.destination);
        let company = self.intern_company(record.company);
        self.flights.push(Flight::new(
            record.id,
            origin,
            destination,
            record.takeoff,
            record.landing,
            company,
            record.cost,
        ));
    }

    fn intern_location(&mut self, name: String) -> LocationIndex {
        if let Some(&idx) = self.location_lookup.get(&name) {
            return idx;
        }
        let idx = LocationIndex::new(self.location_names.len());
        self.location_names.push(name.clone());
        self.location_lookup.insert(name, idx);
        idx
    }

    fn intern_company(&mut self, name: String) -> CompanyIndex {
        if let Some(&idx) = self.company_lookup.get(&name) {
            return idx;
        }
        let idx = CompanyIndex::new(self.companies.len());
        self.companies.push(name.clone());
        self.company_lookup.insert(name, idx);
        idx
    }

    /// Freezes the builder into a read-only `FlightGraph`.
    pub fn build(self) -> FlightGraph {
        let mut flights = self.flights;
        flights.sort_by(|a, b| {
            a.origin()
                .cmp(&b.origin())
                .then_with(|| a.takeoff().cmp(&b.takeoff()))
        });

        let num_locations = self.location_names.len();
        let mut starts = vec![0usize; num_locations + 1];
        for f in &flights {
            starts[f.origin().get() + 1] += 1;
        }
        for i in 0..num_locations {
            starts[i + 1] += starts[i];
        }

        let mut incoming: Vec<Vec<FlightIndex>> = vec![Vec::new(); num_locations];
        for (i, f) in flights.iter().enumerate() {
            incoming[f.destination().get()].push(FlightIndex::new(i));
        }

        let locations = self
            .location_names
            .into_iter()
            .zip(incoming)
            .enumerate()
            .map(|(i, (name, incoming))| Location {
                name,
                outgoing: starts[i]..starts[i + 1],
                incoming,
            })
            .collect();

        FlightGraph {
            flights,
            locations,
            location_lookup: self.location_lookup,
            companies: self.companies,
            company_lookup: self.company_lookup,
        }
    }
}
