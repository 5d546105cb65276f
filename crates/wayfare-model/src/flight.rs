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

//! Flight records.
//!
//! `FlightRecord` is what the loader produces from one input line: names are
//! still strings. `FlightGraphBuilder` interns the names and turns every record
//! into an immutable `Flight` that refers to cities and companies by index.

use crate::index::{CompanyIndex, LocationIndex};
use crate::time::Timestamp;

/// A raw flight as described by one line of the flight file.
#[derive(Clone, Debug, PartialEq)]
pub struct FlightRecord {
    pub id: String,
    pub origin: String,
    pub takeoff: Timestamp,
    pub destination: String,
    pub landing: Timestamp,
    pub cost: f64,
    pub company: String,
}

impl FlightRecord {
    /// Convenience constructor.
    pub fn new(
        id: impl Into<String>,
        origin: impl Into<String>,
        takeoff: Timestamp,
        destination: impl Into<String>,
        landing: Timestamp,
        cost: f64,
        company: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            origin: origin.into(),
            takeoff,
            destination: destination.into(),
            landing,
            cost,
            company: company.into(),
        }
    }
}

/// An immutable, interned flight owned by a `FlightGraph`.
#[derive(Clone, Debug, PartialEq)]
pub struct Flight {
    id: String,
    origin: LocationIndex,
    destination: LocationIndex,
    takeoff: Timestamp,
    landing: Timestamp,
    company: CompanyIndex,
    cost: f64,
}

impl Flight {
    #[inline]
    pub(crate) fn new(
        id: String,
        origin: LocationIndex,
        destination: LocationIndex,
        takeoff: Timestamp,
        landing: Timestamp,
        company: CompanyIndex,
        cost: f64,
    ) -> Self {
        Self {
            id,
            origin,
            destination,
            takeoff,
            landing,
            company,
            cost,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn origin(&self) -> LocationIndex {
        self.origin
    }

    #[inline]
    pub fn destination(&self) -> LocationIndex {
        self.destination
    }

    #[inline]
    pub fn takeoff(&self) -> Timestamp {
        self.takeoff
    }

    #[inline]
    pub fn landing(&self) -> Timestamp {
        self.landing
    }

    #[inline]
    pub fn company(&self) -> CompanyIndex {
        self.company
    }

    /// Base cost before any discount.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Returns `true` if the flight departs from or arrives at `location`.
    #[inline]
    pub fn touches(&self, location: LocationIndex) -> bool {
        self.origin == location || self.destination == location
    }
}

impl std::fmt::Display for Flight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Flight({}: {} @{} -> {} @{}, cost {})",
            self.id, self.origin, self.takeoff, self.destination, self.landing, self.cost
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touches_both_ends() {
        let f = Flight::new(
            "X1".to_string(),
            LocationIndex::new(0),
            LocationIndex::new(1),
            10,
            20,
            CompanyIndex::new(0),
            50.0,
        );
        assert!(f.touches(LocationIndex::new(0)));
        assert!(f.touches(LocationIndex::new(1)));
        assert!(!f.touches(LocationIndex::new(2)));
    }

    #[test]
    fn test_record_constructor() {
        let r = FlightRecord::new("AF1", "Paris", 1, "Rome", 2, 99.5, "AF");
        assert_eq!(r.id, "AF1");
        assert_eq!(r.destination, "Rome");
        assert_eq!(r.cost, 99.5);
    }
}
