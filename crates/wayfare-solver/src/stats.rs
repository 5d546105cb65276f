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

use wayfare_search::stats::{MergeStatistics, SearchStatistics};

/// Statistics of one complete solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Distinct legs searched.
    pub legs_searched: u64,
    /// Leg requests of all propositions, including the ones served by a
    /// shared leg.
    pub leg_requests: u64,
    /// Complete itineraries kept over all legs.
    pub itineraries_enumerated: u64,
    /// Side trips that were skipped without searching.
    pub side_trips_skipped: u64,
    /// Number of threads used during the solving process.
    pub used_threads: usize,
    /// Combined counters of every leg search.
    pub search: SearchStatistics,
    /// Combined counters of every merge.
    pub merge: MergeStatistics,
    /// Total duration of the solving process.
    pub solve_duration: std::time::Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Legs Searched: {}", self.legs_searched)?;
        writeln!(f, "  Leg Requests: {}", self.leg_requests)?;
        writeln!(f, "  Itineraries Enumerated: {}", self.itineraries_enumerated)?;
        writeln!(f, "  Side Trips Skipped: {}", self.side_trips_skipped)?;
        writeln!(f, "  Used Threads: {}", self.used_threads)?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )?;
        write!(f, "{}", self.search)?;
        write!(f, "{}", self.merge)
    }
}

/// Builder for `SolverStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatisticsBuilder {
    legs_searched: u64,
    leg_requests: u64,
    itineraries_enumerated: u64,
    side_trips_skipped: u64,
    used_threads: usize,
    search: SearchStatistics,
    merge: MergeStatistics,
    solve_duration: std::time::Duration,
}

impl Default for SolverStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverStatisticsBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            legs_searched: 0,
            leg_requests: 0,
            itineraries_enumerated: 0,
            side_trips_skipped: 0,
            used_threads: 1,
            search: SearchStatistics::default(),
            merge: MergeStatistics::default(),
            solve_duration: std::time::Duration::ZERO,
        }
    }

    #[inline]
    pub fn legs_searched(mut self, legs_searched: u64) -> Self {
        self.legs_searched = legs_searched;
        self
    }

    #[inline]
    pub fn leg_requests(mut self, leg_requests: u64) -> Self {
        self.leg_requests = leg_requests;
        self
    }

    #[inline]
    pub fn itineraries_enumerated(mut self, itineraries_enumerated: u64) -> Self {
        self.itineraries_enumerated = itineraries_enumerated;
        self
    }

    #[inline]
    pub fn side_trips_skipped(mut self, side_trips_skipped: u64) -> Self {
        self.side_trips_skipped = side_trips_skipped;
        self
    }

    #[inline]
    pub fn used_threads(mut self, used_threads: usize) -> Self {
        self.used_threads = used_threads;
        self
    }

    #[inline]
    pub fn search(mut self, search: SearchStatistics) -> Self {
        self.search = search;
        self
    }

    #[inline]
    pub fn merge(mut self, merge: MergeStatistics) -> Self {
        self.merge = merge;
        self
    }

    #[inline]
    pub fn solve_duration(mut self, solve_duration: std::time::Duration) -> Self {
        self.solve_duration = solve_duration;
        self
    }

    #[inline]
    pub fn build(self) -> SolverStatistics {
        SolverStatistics {
            legs_searched: self.legs_searched,
            leg_requests: self.leg_requests,
            itineraries_enumerated: self.itineraries_enumerated,
            side_trips_skipped: self.side_trips_skipped,
            used_threads: self.used_threads,
            search: self.search,
            merge: self.merge,
            solve_duration: self.solve_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn builder_constructs_expected_struct() {
        let stats = SolverStatisticsBuilder::new()
            .legs_searched(6)
            .leg_requests(8)
            .itineraries_enumerated(42)
            .side_trips_skipped(1)
            .used_threads(4)
            .solve_duration(Duration::from_millis(1234))
            .build();

        assert_eq!(stats.legs_searched, 6);
        assert_eq!(stats.leg_requests, 8);
        assert_eq!(stats.itineraries_enumerated, 42);
        assert_eq!(stats.side_trips_skipped, 1);
        assert_eq!(stats.used_threads, 4);
        assert_eq!(stats.search, SearchStatistics::default());
        assert_eq!(stats.solve_duration, Duration::from_millis(1234));
    }

    #[test]
    fn test_display_formats_all_fields() {
        let stats = SolverStatisticsBuilder::new()
            .legs_searched(2)
            .leg_requests(3)
            .used_threads(4)
            .solve_duration(Duration::from_millis(1234))
            .build();

        let rendered = stats.to_string();
        assert!(rendered.contains("Solver Statistics:"), "missing header");
        assert!(rendered.contains("Legs Searched: 2"));
        assert!(rendered.contains("Leg Requests: 3"));
        assert!(rendered.contains("Used Threads: 4"));
        assert!(
            rendered.contains("Solve Duration (secs): 1.234"),
            "duration not formatted to 3 decimals"
        );
        assert!(rendered.contains("Leg Search Statistics:"));
        assert!(rendered.contains("Merge Statistics:"));
    }
}
