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
use std::time::Instant;
use wayfare_model::graph::FlightGraph;

/// Reports leg search progress through the `log` facade.
///
/// Level lines are emitted at `debug` every `level_interval` levels; the
/// summary on exit is emitted at `info`.
#[derive(Debug, Clone)]
pub struct LogSearchMonitor {
    start_time: Instant,
    level_interval: u64,
    label: String,
}

impl LogSearchMonitor {
    pub fn new(level_interval: u64) -> Self {
        Self {
            start_time: Instant::now(),
            level_interval: level_interval.max(1),
            label: String::new(),
        }
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for LogSearchMonitor {
    fn default() -> Self {
        Self::new(1)
    }
}

impl std::fmt::Display for LogSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogSearchMonitor(level_interval: {})", self.level_interval)
    }
}

impl SearchMonitor for LogSearchMonitor {
    fn name(&self) -> &str {
        "LogSearchMonitor"
    }

    fn on_enter_search(&mut self, graph: &FlightGraph, query: &LegQuery) {
        self.start_time = Instant::now();
        self.label = format!(
            "{} -> {}",
            graph.location_name(query.origin()),
            graph.location_name(query.destination())
        );
        log::debug!("leg {}: search started, window {}", self.label, query.window());
    }

    fn on_level(&mut self, level: u64, frontier: usize, stats: &SearchStatistics) {
        if level % self.level_interval == 0 {
            log::debug!(
                "leg {}: level {:<3} | frontier {:<8} | completed {:<8} | pruned {:<8} | {:.1}s",
                self.label,
                level,
                frontier,
                stats.itineraries_completed,
                stats.prunings_bound,
                self.start_time.elapsed().as_secs_f32()
            );
        }
    }

    fn on_exit_search(&mut self, stats: &SearchStatistics) {
        log::info!(
            "leg {}: {} itineraries kept ({} pruned, {} discarded) in {:.2?}",
            self.label,
            stats
                .itineraries_completed
                .saturating_sub(stats.discarded_final),
            stats.prunings_bound,
            stats.discarded_final,
            self.start_time.elapsed()
        );
    }
}
