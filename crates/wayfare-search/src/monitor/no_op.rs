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

use crate::leg::LegQuery;
use crate::monitor::search_monitor::SearchMonitor;
use crate::stats::SearchStatistics;
use wayfare_model::graph::FlightGraph;

/// A monitor that ignores every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpSearchMonitor;

impl NoOpSearchMonitor {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl std::fmt::Display for NoOpSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NoOpSearchMonitor")
    }
}

impl SearchMonitor for NoOpSearchMonitor {
    fn name(&self) -> &str {
        "NoOpSearchMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, _graph: &FlightGraph, _query: &LegQuery) {}

    #[inline(always)]
    fn on_level(&mut self, _level: u64, _frontier: usize, _stats: &SearchStatistics) {}

    #[inline(always)]
    fn on_exit_search(&mut self, _stats: &SearchStatistics) {}
}
