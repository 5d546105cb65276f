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

//! # Parameters
//!
//! Everything a solve needs besides the flight graph and the alliances:
//! the two mandatory cities, the conference windows, layover and vacation
//! limits, the side-trip cities and the worker count.
//!
//! The leg windows of both propositions are derived here:
//!
//! | Leg | Window |
//! |---|---|
//! | home → conference, side → conference | departure window |
//! | conference → home, conference → side | arrival window |
//! | home → side | `[dep_min - vacation_max, dep_min - vacation_min]` |
//! | side → home | `[ar_max + vacation_min, ar_max + vacation_max]` |

use crate::error::SolverError;
use wayfare_model::time::{Seconds, TimeWindow, Timestamp};

/// Validated solve parameters. Built with `ParametersBuilder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    home: String,
    conference: String,
    departure: TimeWindow,
    arrival: TimeWindow,
    max_layover: Seconds,
    vacation_min: Seconds,
    vacation_max: Seconds,
    side_trips: Vec<String>,
    workers: usize,
}

impl Parameters {
    #[inline]
    pub fn home(&self) -> &str {
        &self.home
    }

    #[inline]
    pub fn conference(&self) -> &str {
        &self.conference
    }

    /// Window of the flights towards the conference.
    #[inline]
    pub fn departure_window(&self) -> TimeWindow {
        self.departure
    }

    /// Window of the flights leaving the conference.
    #[inline]
    pub fn arrival_window(&self) -> TimeWindow {
        self.arrival
    }

    #[inline]
    pub fn max_layover(&self) -> Seconds {
        self.max_layover
    }

    #[inline]
    pub fn vacation_min(&self) -> Seconds {
        self.vacation_min
    }

    #[inline]
    pub fn vacation_max(&self) -> Seconds {
        self.vacation_max
    }

    #[inline]
    pub fn side_trips(&self) -> &[String] {
        &self.side_trips
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Window of a vacation taken before the conference (home → side).
    pub fn vacation_before_window(&self) -> TimeWindow {
        let start = self.departure.earliest();
        TimeWindow::new(
            start.saturating_sub(self.vacation_max),
            start.saturating_sub(self.vacation_min),
        )
    }

    /// Window of a vacation taken after the conference (side → home).
    pub fn vacation_after_window(&self) -> TimeWindow {
        let end = self.arrival.latest();
        TimeWindow::new(
            end.saturating_add(self.vacation_min),
            end.saturating_add(self.vacation_max),
        )
    }

    /// Checks the invariants `ParametersBuilder::build` enforces.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.home.is_empty() || self.conference.is_empty() {
            return Err(SolverError::invalid("home and conference cities must be named"));
        }
        if self.home == self.conference {
            return Err(SolverError::invalid(format!(
                "home and conference are the same city `{}`",
                self.home
            )));
        }
        if self.departure.is_empty() {
            return Err(SolverError::invalid(format!(
                "departure window {} is empty",
                self.departure
            )));
        }
        if self.arrival.is_empty() {
            return Err(SolverError::invalid(format!(
                "arrival window {} is empty",
                self.arrival
            )));
        }
        if self.max_layover < 0 {
            return Err(SolverError::invalid("max layover must not be negative"));
        }
        if self.vacation_min < 0 || self.vacation_max < 0 {
            return Err(SolverError::invalid("vacation durations must not be negative"));
        }
        if self.vacation_min > self.vacation_max {
            return Err(SolverError::invalid(format!(
                "minimum vacation {}s exceeds maximum vacation {}s",
                self.vacation_min, self.vacation_max
            )));
        }
        if self.workers == 0 {
            return Err(SolverError::invalid("at least one worker thread is required"));
        }
        Ok(())
    }
}

impl std::fmt::Display for Parameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Parameters:")?;
        writeln!(f, "  Home:                 {}", self.home)?;
        writeln!(f, "  Conference:           {}", self.conference)?;
        writeln!(f, "  Departure window:     {}", self.departure)?;
        writeln!(f, "  Arrival window:       {}", self.arrival)?;
        writeln!(f, "  Max layover (s):      {}", self.max_layover)?;
        writeln!(
            f,
            "  Vacation (s):         [{}, {}]",
            self.vacation_min, self.vacation_max
        )?;
        writeln!(f, "  Side trips:           {}", self.side_trips.join(", "))?;
        writeln!(f, "  Workers:              {}", self.workers)
    }
}

/// Builder for `Parameters`.
#[derive(Debug, Clone)]
pub struct ParametersBuilder {
    home: String,
    conference: String,
    departure: Option<TimeWindow>,
    arrival: Option<TimeWindow>,
    max_layover: Seconds,
    vacation_min: Seconds,
    vacation_max: Seconds,
    side_trips: Vec<String>,
    workers: Option<usize>,
}

impl ParametersBuilder {
    /// Starts a parameter set for a trip from `home` to `conference`.
    pub fn new(home: impl Into<String>, conference: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            conference: conference.into(),
            departure: None,
            arrival: None,
            max_layover: 0,
            vacation_min: 0,
            vacation_max: 0,
            side_trips: Vec::new(),
            workers: None,
        }
    }

    #[inline]
    pub fn departure_window(mut self, earliest: Timestamp, latest: Timestamp) -> Self {
        self.departure = Some(TimeWindow::new(earliest, latest));
        self
    }

    #[inline]
    pub fn arrival_window(mut self, earliest: Timestamp, latest: Timestamp) -> Self {
        self.arrival = Some(TimeWindow::new(earliest, latest));
        self
    }

    #[inline]
    pub fn max_layover(mut self, max_layover: Seconds) -> Self {
        self.max_layover = max_layover;
        self
    }

    #[inline]
    pub fn vacation(mut self, min: Seconds, max: Seconds) -> Self {
        self.vacation_min = min;
        self.vacation_max = max;
        self
    }

    #[inline]
    pub fn side_trip(mut self, city: impl Into<String>) -> Self {
        self.side_trips.push(city.into());
        self
    }

    pub fn side_trips<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.side_trips.extend(cities.into_iter().map(Into::into));
        self
    }

    /// Worker threads of the solve pool. Defaults to rayon's global pool size.
    #[inline]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn build(self) -> Result<Parameters, SolverError> {
        let departure = self
            .departure
            .ok_or_else(|| SolverError::invalid("departure window is not set"))?;
        let arrival = self
            .arrival
            .ok_or_else(|| SolverError::invalid("arrival window is not set"))?;

        let parameters = Parameters {
            home: self.home,
            conference: self.conference,
            departure,
            arrival,
            max_layover: self.max_layover,
            vacation_min: self.vacation_min,
            vacation_max: self.vacation_max,
            side_trips: self.side_trips,
            workers: self.workers.unwrap_or_else(rayon::current_num_threads),
        };
        parameters.validate()?;
        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 3600;
    const DAY: i64 = 24 * HOUR;

    fn base() -> ParametersBuilder {
        ParametersBuilder::new("Paris", "Boston")
            .departure_window(10 * DAY, 11 * DAY)
            .arrival_window(14 * DAY, 15 * DAY)
            .max_layover(4 * HOUR)
            .vacation(2 * DAY, 5 * DAY)
            .workers(2)
    }

    #[test]
    fn test_build_keeps_values() {
        let p = base().side_trips(["Rio", "Lima"]).side_trip("Oslo").build().unwrap();
        assert_eq!(p.home(), "Paris");
        assert_eq!(p.conference(), "Boston");
        assert_eq!(p.departure_window(), TimeWindow::new(10 * DAY, 11 * DAY));
        assert_eq!(p.arrival_window(), TimeWindow::new(14 * DAY, 15 * DAY));
        assert_eq!(p.max_layover(), 4 * HOUR);
        assert_eq!(p.side_trips(), ["Rio", "Lima", "Oslo"]);
        assert_eq!(p.workers(), 2);
    }

    #[test]
    fn test_vacation_windows() {
        let p = base().build().unwrap();
        assert_eq!(p.vacation_before_window(), TimeWindow::new(5 * DAY, 8 * DAY));
        assert_eq!(p.vacation_after_window(), TimeWindow::new(17 * DAY, 20 * DAY));
    }

    #[test]
    fn test_vacation_windows_saturate() {
        let p = ParametersBuilder::new("A", "B")
            .departure_window(i64::MIN + 1, 0)
            .arrival_window(0, i64::MAX - 1)
            .vacation(0, 10)
            .workers(1)
            .build()
            .unwrap();
        assert_eq!(p.vacation_before_window().earliest(), i64::MIN);
        assert_eq!(p.vacation_after_window().latest(), i64::MAX);
    }

    #[test]
    fn test_missing_windows_are_rejected() {
        let err = ParametersBuilder::new("A", "B").workers(1).build().unwrap_err();
        assert!(err.to_string().contains("departure window"));

        let err = ParametersBuilder::new("A", "B")
            .departure_window(0, 1)
            .workers(1)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("arrival window"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let cases = [
            base().departure_window(5, 4),
            base().arrival_window(5, 4),
            base().vacation(10, 5),
            base().vacation(-1, 5),
            base().max_layover(-1),
            base().workers(0),
        ];
        for builder in cases {
            assert!(matches!(
                builder.build(),
                Err(SolverError::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn test_same_home_and_conference_rejected() {
        let err = ParametersBuilder::new("Paris", "Paris")
            .departure_window(0, 1)
            .arrival_window(2, 3)
            .workers(1)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("same city"));
    }

    #[test]
    fn test_default_workers_positive() {
        let p = ParametersBuilder::new("A", "B")
            .departure_window(0, 1)
            .arrival_window(2, 3)
            .build()
            .unwrap();
        assert!(p.workers() >= 1);
    }

    #[test]
    fn test_display() {
        let p = base().side_trip("Rio").build().unwrap();
        let rendered = p.to_string();
        assert!(rendered.contains("Home:                 Paris"));
        assert!(rendered.contains("Side trips:           Rio"));
    }
}
