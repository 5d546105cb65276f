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

//! # Itinerary Cost Model
//!
//! An `Itinerary` is an ordered, non-empty path of flights, each paired with a
//! discount. Discounts depend on adjacency: a flight operated by the same
//! company as its neighbour costs 70 %, one operated by an alliance partner
//! 80 %, anything else full price. Because a later flight can still tighten
//! the discount of the flight before it, the exact price of a partial path is
//! not final; the itinerary therefore tracks a range:
//!
//! - `min_cost`: every flight at the best multiplier (0.7). No completion of
//!   the itinerary, by appending or by concatenation, can cost less.
//! - `max_cost`: every flight at its currently known multiplier. This is the
//!   exact price of the itinerary as it stands and only ever decreases when
//!   a neighbour tightens a boundary discount.
//!
//! `append` and `concatenate` are the only places where discounts are decided.
//! `junction_cost` prices a concatenation without materializing it, sharing
//! the same junction rule.

use crate::alliance::AllianceIndex;
use crate::flight::Flight;
use crate::index::LocationIndex;
use crate::time::{Seconds, Timestamp};
use smallvec::SmallVec;
use thiserror::Error;

/// Multiplier applied to a flight's base cost.
///
/// Variants are ordered from strictest to loosest, so `a < b` reads
/// "a is a better deal than b".
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Discount {
    /// Same company as an adjacent flight.
    SameCompany,
    /// Alliance partner of an adjacent flight.
    Alliance,
    /// No discount.
    Standard,
}

impl Discount {
    /// The best multiplier any flight can ever receive.
    pub const BEST_MULTIPLIER: f64 = 0.7;

    #[inline]
    pub const fn multiplier(self) -> f64 {
        match self {
            Discount::SameCompany => 0.7,
            Discount::Alliance => 0.8,
            Discount::Standard => 1.0,
        }
    }

    /// The multiplier as an integer percentage, as printed in reports.
    #[inline]
    pub const fn percent(self) -> u32 {
        match self {
            Discount::SameCompany => 70,
            Discount::Alliance => 80,
            Discount::Standard => 100,
        }
    }

    /// The discount earned by `next` when flown directly after `prev`.
    #[inline]
    pub fn between(prev: &Flight, next: &Flight, alliances: &AllianceIndex) -> Self {
        if prev.company() == next.company() {
            Discount::SameCompany
        } else if alliances.shares(prev.company(), next.company()) {
            Discount::Alliance
        } else {
            Discount::Standard
        }
    }
}

impl std::fmt::Display for Discount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Why two itineraries cannot be joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConcatenateError {
    #[error("itineraries do not meet: first ends at {end}, second starts at {start}")]
    Disconnected {
        end: LocationIndex,
        start: LocationIndex,
    },
    #[error("junction is not chronological: arrival {arrival} is not before departure {departure}")]
    NotChronological {
        arrival: Timestamp,
        departure: Timestamp,
    },
}

/// An ordered path of flights with adjacency-dependent discounts.
#[derive(Clone, Debug)]
pub struct Itinerary<'g> {
    flights: SmallVec<[&'g Flight; 6]>,
    discounts: SmallVec<[Discount; 6]>,
    min_cost: f64,
    max_cost: f64,
}

impl<'g> Itinerary<'g> {
    /// Creates a one-flight itinerary.
    #[inline]
    pub fn new(first: &'g Flight) -> Self {
        let mut flights = SmallVec::new();
        flights.push(first);
        let mut discounts = SmallVec::new();
        discounts.push(Discount::Standard);
        Self {
            flights,
            discounts,
            min_cost: first.cost() * Discount::BEST_MULTIPLIER,
            max_cost: first.cost(),
        }
    }

    /// Appends `flight`, pricing it against the current last flight and
    /// tightening that flight's discount if the new adjacency is better.
    ///
    /// The caller is responsible for temporal validity; see `LegSearch`.
    pub fn append(&mut self, flight: &'g Flight, alliances: &AllianceIndex) {
        let last = self.flights.len() - 1;
        let discount = Discount::between(self.flights[last], flight, alliances);
        self.tighten(last, discount);
        self.min_cost += flight.cost() * Discount::BEST_MULTIPLIER;
        self.max_cost += flight.cost() * discount.multiplier();
        self.flights.push(flight);
        self.discounts.push(discount);
    }

    /// Returns a copy of `self` with `flight` appended.
    #[inline]
    pub fn extended(&self, flight: &'g Flight, alliances: &AllianceIndex) -> Self {
        let mut next = self.clone();
        next.append(flight, alliances);
        next
    }

    /// Joins `other` after `self`. The junction discount is applied to both
    /// boundary flights where it is stricter than what they already carry.
    ///
    /// # Errors
    ///
    /// Fails if `other` does not start where `self` ends, or if `self` does
    /// not land strictly before `other` takes off.
    pub fn concatenate(
        mut self,
        mut other: Itinerary<'g>,
        alliances: &AllianceIndex,
    ) -> Result<Self, ConcatenateError> {
        self.check_junction(&other)?;

        let last = self.flights.len() - 1;
        let discount = Discount::between(self.flights[last], other.flights[0], alliances);
        self.tighten(last, discount);
        other.tighten(0, discount);

        self.flights.extend(other.flights);
        self.discounts.extend(other.discounts);
        self.min_cost += other.min_cost;
        self.max_cost += other.max_cost;
        Ok(self)
    }

    /// Exact price of `self.concatenate(other)` without building it.
    /// Does not check the junction.
    pub fn junction_cost(&self, other: &Itinerary<'g>, alliances: &AllianceIndex) -> f64 {
        let last = self.flights.len() - 1;
        let left = self.flights[last];
        let right = other.flights[0];
        let discount = Discount::between(left, right, alliances);

        let left_saving = saving(left, self.discounts[last], discount);
        let right_saving = saving(right, other.discounts[0], discount);
        self.max_cost - left_saving + other.max_cost - right_saving
    }

    /// Returns `true` if `other` can follow `self`: same junction city and
    /// strictly increasing time across the junction.
    #[inline]
    pub fn is_compatible_with(&self, other: &Itinerary<'g>) -> bool {
        self.check_junction(other).is_ok()
    }

    fn check_junction(&self, other: &Itinerary<'g>) -> Result<(), ConcatenateError> {
        if self.destination() != other.origin() {
            return Err(ConcatenateError::Disconnected {
                end: self.destination(),
                start: other.origin(),
            });
        }
        if self.arrival() >= other.departure() {
            return Err(ConcatenateError::NotChronological {
                arrival: self.arrival(),
                departure: other.departure(),
            });
        }
        Ok(())
    }

    #[inline]
    fn tighten(&mut self, position: usize, discount: Discount) {
        let current = self.discounts[position];
        if discount < current {
            self.max_cost -= saving(self.flights[position], current, discount);
            self.discounts[position] = discount;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Always `false`; itineraries hold at least one flight.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    #[inline]
    pub fn flights(&self) -> &[&'g Flight] {
        &self.flights
    }

    #[inline]
    pub fn discounts(&self) -> &[Discount] {
        &self.discounts
    }

    /// Iterates over `(flight, discount)` pairs in travel order.
    pub fn iter(&self) -> impl Iterator<Item = (&'g Flight, Discount)> + '_ {
        self.flights.iter().copied().zip(self.discounts.iter().copied())
    }

    #[inline]
    pub fn first(&self) -> &'g Flight {
        self.flights[0]
    }

    #[inline]
    pub fn last(&self) -> &'g Flight {
        self.flights[self.flights.len() - 1]
    }

    #[inline]
    pub fn origin(&self) -> LocationIndex {
        self.first().origin()
    }

    #[inline]
    pub fn destination(&self) -> LocationIndex {
        self.last().destination()
    }

    #[inline]
    pub fn departure(&self) -> Timestamp {
        self.first().takeoff()
    }

    #[inline]
    pub fn arrival(&self) -> Timestamp {
        self.last().landing()
    }

    /// Lower bound on the price of any completion of this itinerary.
    #[inline]
    pub fn min_cost(&self) -> f64 {
        self.min_cost
    }

    /// Price at the currently known discounts.
    #[inline]
    pub fn max_cost(&self) -> f64 {
        self.max_cost
    }

    /// Recomputes the price from the stored discounts.
    pub fn actual_cost(&self) -> f64 {
        self.iter().map(|(f, d)| f.cost() * d.multiplier()).sum()
    }

    /// Returns `true` if any flight departs from or lands at `location`.
    #[inline]
    pub fn visits(&self, location: LocationIndex) -> bool {
        self.flights.iter().any(|f| f.touches(location))
    }

    /// The longest ground time between two consecutive flights.
    pub fn longest_layover(&self) -> Option<Seconds> {
        self.flights
            .windows(2)
            .map(|w| w[1].takeoff() - w[0].landing())
            .max()
    }
}

#[inline]
fn saving(flight: &Flight, from: Discount, to: Discount) -> f64 {
    if to < from {
        (from.multiplier() - to.multiplier()) * flight.cost()
    } else {
        0.0
    }
}

impl std::fmt::Display for Itinerary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Itinerary([")?;
        for (i, (flight, discount)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}@{}", flight.id(), discount)?;
        }
        write!(f, "], min: {:.2}, max: {:.2})", self.min_cost, self.max_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::FlightRecord;
    use crate::graph::{FlightGraph, FlightGraphBuilder};

    const HOUR: i64 = 3600;
    const EPS: f64 = 1e-9;

    fn graph(records: Vec<FlightRecord>) -> FlightGraph {
        let mut b = FlightGraphBuilder::new();
        for r in records {
            b.insert_flight(r);
        }
        b.build()
    }

    fn by_id<'g>(g: &'g FlightGraph, id: &str) -> &'g Flight {
        g.flights().iter().find(|f| f.id() == id).unwrap()
    }

    fn chain(companies: [&str; 3]) -> FlightGraph {
        graph(vec![
            FlightRecord::new("1", "A", 0, "B", HOUR, 100.0, companies[0]),
            FlightRecord::new("2", "B", 3 * HOUR, "C", 4 * HOUR, 100.0, companies[1]),
            FlightRecord::new("3", "C", 6 * HOUR, "D", 7 * HOUR, 100.0, companies[2]),
        ])
    }

    #[test]
    fn test_single_flight_range() {
        let g = chain(["X", "X", "X"]);
        let it = Itinerary::new(by_id(&g, "1"));
        assert_eq!(it.len(), 1);
        assert_eq!(it.discounts(), &[Discount::Standard]);
        assert!((it.min_cost() - 70.0).abs() < EPS);
        assert!((it.max_cost() - 100.0).abs() < EPS);
    }

    #[test]
    fn test_same_company_tightens_previous_flight() {
        let g = chain(["X", "X", "X"]);
        let alliances = AllianceIndex::new(g.num_companies(), vec![]);
        let mut it = Itinerary::new(by_id(&g, "1"));
        it.append(by_id(&g, "2"), &alliances);

        assert_eq!(it.discounts(), &[Discount::SameCompany, Discount::SameCompany]);
        assert!((it.max_cost() - 140.0).abs() < EPS);
        assert!((it.min_cost() - 140.0).abs() < EPS);
        assert!((it.actual_cost() - it.max_cost()).abs() < EPS);
    }

    #[test]
    fn test_alliance_discount() {
        let g = chain(["X", "Y", "Z"]);
        let x = g.company("X").unwrap();
        let y = g.company("Y").unwrap();
        let alliances = AllianceIndex::new(g.num_companies(), vec![vec![x, y]]);

        let mut it = Itinerary::new(by_id(&g, "1"));
        it.append(by_id(&g, "2"), &alliances);
        it.append(by_id(&g, "3"), &alliances);

        assert_eq!(
            it.discounts(),
            &[Discount::Alliance, Discount::Alliance, Discount::Standard]
        );
        assert!((it.max_cost() - 260.0).abs() < EPS);
        assert!((it.min_cost() - 210.0).abs() < EPS);
    }

    #[test]
    fn test_stricter_discount_wins_on_shared_flight() {
        let g = chain(["X", "Y", "Y"]);
        let x = g.company("X").unwrap();
        let y = g.company("Y").unwrap();
        let alliances = AllianceIndex::new(g.num_companies(), vec![vec![x, y]]);

        let mut it = Itinerary::new(by_id(&g, "1"));
        it.append(by_id(&g, "2"), &alliances);
        it.append(by_id(&g, "3"), &alliances);

        assert_eq!(
            it.discounts(),
            &[Discount::Alliance, Discount::SameCompany, Discount::SameCompany]
        );
        assert!((it.max_cost() - 220.0).abs() < EPS);
        assert!((it.actual_cost() - 220.0).abs() < EPS);
    }

    #[test]
    fn test_no_discount_between_strangers() {
        let g = chain(["X", "Y", "Z"]);
        let alliances = AllianceIndex::new(g.num_companies(), vec![]);
        let it = Itinerary::new(by_id(&g, "1")).extended(by_id(&g, "2"), &alliances);
        assert_eq!(it.discounts(), &[Discount::Standard, Discount::Standard]);
        assert!((it.max_cost() - 200.0).abs() < EPS);
    }

    #[test]
    fn test_concatenate_matches_appending() {
        let g = chain(["X", "X", "Y"]);
        let alliances = AllianceIndex::new(g.num_companies(), vec![]);

        let left = Itinerary::new(by_id(&g, "1"));
        let right = Itinerary::new(by_id(&g, "2")).extended(by_id(&g, "3"), &alliances);
        let predicted = left.junction_cost(&right, &alliances);
        let joined = left.concatenate(right, &alliances).unwrap();

        let appended = Itinerary::new(by_id(&g, "1"))
            .extended(by_id(&g, "2"), &alliances)
            .extended(by_id(&g, "3"), &alliances);

        assert_eq!(joined.discounts(), appended.discounts());
        assert!((joined.max_cost() - appended.max_cost()).abs() < EPS);
        assert!((joined.min_cost() - appended.min_cost()).abs() < EPS);
        assert!((predicted - joined.max_cost()).abs() < EPS);
        assert_eq!(joined.len(), 3);
    }

    #[test]
    fn test_concatenate_rejects_disconnected() {
        let g = chain(["X", "X", "X"]);
        let alliances = AllianceIndex::new(g.num_companies(), vec![]);
        let left = Itinerary::new(by_id(&g, "1"));
        let right = Itinerary::new(by_id(&g, "3"));
        assert!(!left.is_compatible_with(&right));
        let err = left.concatenate(right, &alliances).unwrap_err();
        assert!(matches!(err, ConcatenateError::Disconnected { .. }));
    }

    #[test]
    fn test_concatenate_rejects_non_chronological() {
        let g = graph(vec![
            FlightRecord::new("1", "A", 0, "B", 5 * HOUR, 10.0, "X"),
            FlightRecord::new("2", "B", 5 * HOUR, "C", 6 * HOUR, 10.0, "X"),
        ]);
        let alliances = AllianceIndex::new(g.num_companies(), vec![]);
        let left = Itinerary::new(by_id(&g, "1"));
        let right = Itinerary::new(by_id(&g, "2"));
        let err = left.concatenate(right, &alliances).unwrap_err();
        assert_eq!(
            err,
            ConcatenateError::NotChronological {
                arrival: 5 * HOUR,
                departure: 5 * HOUR
            }
        );
    }

    #[test]
    fn test_endpoints_visits_and_layover() {
        let g = chain(["X", "X", "X"]);
        let alliances = AllianceIndex::new(g.num_companies(), vec![]);
        let it = Itinerary::new(by_id(&g, "1"))
            .extended(by_id(&g, "2"), &alliances)
            .extended(by_id(&g, "3"), &alliances);

        assert_eq!(it.origin(), g.location("A").unwrap());
        assert_eq!(it.destination(), g.location("D").unwrap());
        assert_eq!(it.departure(), 0);
        assert_eq!(it.arrival(), 7 * HOUR);
        assert!(it.visits(g.location("C").unwrap()));
        assert_eq!(it.longest_layover(), Some(2 * HOUR));
        assert_eq!(Itinerary::new(by_id(&g, "1")).longest_layover(), None);
    }

    #[test]
    fn test_discount_display_and_order() {
        assert!(Discount::SameCompany < Discount::Alliance);
        assert!(Discount::Alliance < Discount::Standard);
        assert_eq!(Discount::Alliance.to_string(), "80%");
    }
}
