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

use crate::bound::Corridor;
use crate::stats::{MergeStatistics, SearchStatistics};
use wayfare_model::itinerary::Itinerary;

/// The complete itineraries of one leg.
#[derive(Debug, Clone)]
pub struct LegOutcome<'g> {
    itineraries: Vec<Itinerary<'g>>,
    statistics: SearchStatistics,
    corridor: Corridor,
}

impl<'g> LegOutcome<'g> {
    #[inline]
    pub fn new(
        itineraries: Vec<Itinerary<'g>>,
        statistics: SearchStatistics,
        corridor: Corridor,
    ) -> Self {
        Self {
            itineraries,
            statistics,
            corridor,
        }
    }

    #[inline]
    pub fn itineraries(&self) -> &[Itinerary<'g>] {
        &self.itineraries
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// The bound corridor at the end of the search.
    #[inline]
    pub fn corridor(&self) -> Corridor {
        self.corridor
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.itineraries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.itineraries.is_empty()
    }
}

impl std::fmt::Display for LegOutcome<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LegOutcome(itineraries: {}, bound: {})",
            self.itineraries.len(),
            self.corridor
        )
    }
}

/// The cheapest combination produced by a merge, if any.
#[derive(Debug, Clone)]
pub struct MergeOutcome<'g> {
    best: Option<Itinerary<'g>>,
    statistics: MergeStatistics,
}

impl<'g> MergeOutcome<'g> {
    #[inline]
    pub fn new(best: Option<Itinerary<'g>>, statistics: MergeStatistics) -> Self {
        Self { best, statistics }
    }

    #[inline]
    pub fn best(&self) -> Option<&Itinerary<'g>> {
        self.best.as_ref()
    }

    #[inline]
    pub fn into_best(self) -> Option<Itinerary<'g>> {
        self.best
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.best.is_some()
    }

    #[inline]
    pub fn statistics(&self) -> &MergeStatistics {
        &self.statistics
    }
}

impl std::fmt::Display for MergeOutcome<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.best {
            Some(best) => write!(f, "MergeOutcome(best: {:.2})", best.max_cost()),
            None => write!(f, "MergeOutcome(no itinerary)"),
        }
    }
}
