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

use std::time::Duration;

/// Statistics collected by one leg search.
///
/// Workers accumulate into private copies which are combined with `merge`,
/// so counting never touches shared state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Breadth-first levels processed.
    pub levels: u64,
    /// Frontier itineraries whose continuations were enumerated.
    pub itineraries_expanded: u64,
    /// Itineraries created by appending a flight.
    pub itineraries_generated: u64,
    /// Itineraries that reached the destination.
    pub itineraries_completed: u64,
    /// Candidates rejected because their optimistic cost exceeded the bound.
    pub prunings_bound: u64,
    /// Completed itineraries dropped by the final bound filter.
    pub discarded_final: u64,
    /// Largest frontier seen.
    pub max_frontier: u64,
    /// Wall time of the search.
    pub time_total: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn on_level(&mut self, frontier: usize) {
        self.levels = self.levels.saturating_add(1);
        self.max_frontier = self.max_frontier.max(frontier as u64);
    }

    #[inline]
    pub fn on_expanded(&mut self) {
        self.itineraries_expanded = self.itineraries_expanded.saturating_add(1);
    }

    #[inline]
    pub fn on_generated(&mut self) {
        self.itineraries_generated = self.itineraries_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_completed(&mut self) {
        self.itineraries_completed = self.itineraries_completed.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_discarded_final(&mut self, count: usize) {
        self.discarded_final = self.discarded_final.saturating_add(count as u64);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Combines the counters of two workers or two searches.
    pub fn merge(mut self, other: &SearchStatistics) -> Self {
        self.levels = self.levels.max(other.levels);
        self.itineraries_expanded = self
            .itineraries_expanded
            .saturating_add(other.itineraries_expanded);
        self.itineraries_generated = self
            .itineraries_generated
            .saturating_add(other.itineraries_generated);
        self.itineraries_completed = self
            .itineraries_completed
            .saturating_add(other.itineraries_completed);
        self.prunings_bound = self.prunings_bound.saturating_add(other.prunings_bound);
        self.discarded_final = self.discarded_final.saturating_add(other.discarded_final);
        self.max_frontier = self.max_frontier.max(other.max_frontier);
        self.time_total = self.time_total.max(other.time_total);
        self
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Leg Search Statistics:")?;
        writeln!(f, "  Levels:               {}", self.levels)?;
        writeln!(f, "  Max frontier:         {}", self.max_frontier)?;
        writeln!(f, "  Expanded:             {}", self.itineraries_expanded)?;
        writeln!(f, "  Generated:            {}", self.itineraries_generated)?;
        writeln!(f, "  Completed:            {}", self.itineraries_completed)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Discarded (final):    {}", self.discarded_final)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

/// Statistics collected by one 2-way or 3-way merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStatistics {
    /// Leg combinations inspected.
    pub combinations: u64,
    /// Combinations rejected at a junction (wrong order in time).
    pub incompatible: u64,
    /// Combinations skipped because their optimistic cost exceeded the bound.
    pub prunings_bound: u64,
    /// Times a worker's cheapest candidate improved.
    pub improvements: u64,
    pub time_total: Duration,
}

impl MergeStatistics {
    #[inline]
    pub fn on_combination(&mut self) {
        self.combinations = self.combinations.saturating_add(1);
    }

    #[inline]
    pub fn on_incompatible(&mut self) {
        self.incompatible = self.incompatible.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_improvement(&mut self) {
        self.improvements = self.improvements.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    pub fn merge(mut self, other: &MergeStatistics) -> Self {
        self.combinations = self.combinations.saturating_add(other.combinations);
        self.incompatible = self.incompatible.saturating_add(other.incompatible);
        self.prunings_bound = self.prunings_bound.saturating_add(other.prunings_bound);
        self.improvements = self.improvements.saturating_add(other.improvements);
        self.time_total = self.time_total.max(other.time_total);
        self
    }
}

impl std::fmt::Display for MergeStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Merge Statistics:")?;
        writeln!(f, "  Combinations:         {}", self.combinations)?;
        writeln!(f, "  Incompatible:         {}", self.incompatible)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Improvements:         {}", self.improvements)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}
