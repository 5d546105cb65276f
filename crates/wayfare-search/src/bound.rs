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

//! # Cost Bound
//!
//! A shared pruning corridor for one leg search or one merge.
//!
//! ## Motivation
//!
//! Workers enumerating itineraries in parallel need a common answer to "can
//! this candidate still beat the best complete itinerary found so far?". The
//! price of a partial itinerary is only known as a range, so the bound is a
//! corridor of two integers:
//!
//! - `ceiling`: the best complete itinerary found so far costs at most this.
//!   A candidate whose `min_cost` exceeds it can never win and is pruned.
//! - `floor`: the optimistic cost of that same itinerary, kept for reporting.
//!
//! ## Highlights
//!
//! - Lock-free reads: the ceiling is mirrored in an `AtomicI64` so the hot
//!   path (`admits`) never takes the lock.
//! - Authoritative updates: `offer` performs its read-compare-write of both
//!   fields under a `Mutex`; this is the only contended critical section of
//!   a search.
//! - Outward rounding: costs are floating point, bounds are integers. The
//!   ceiling is rounded up and the floor down, each with `BOUND_SLACK`, and
//!   the ceiling never increases.
//! - Sentinel: both fields start at `i64::MAX`, meaning "nothing found yet".
//!
//! ## Usage
//!
//! ```rust
//! use wayfare_search::bound::CostBound;
//!
//! let bound = CostBound::new();
//! assert!(bound.admits(1e9));
//!
//! assert!(bound.offer_range(140.0, 170.0));
//! assert_eq!(bound.ceiling(), 171);
//! assert_eq!(bound.floor(), 139);
//! assert!(bound.admits(171.0));
//! assert!(!bound.admits(171.5));
//!
//! // A worse candidate does not move the corridor.
//! assert!(!bound.offer_range(150.0, 200.0));
//! assert_eq!(bound.ceiling(), 171);
//! ```

use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicI64, Ordering},
};
use wayfare_model::itinerary::Itinerary;

/// Margin added before rounding a cost outward to an integer bound.
pub const BOUND_SLACK: f64 = 1e-6;

/// The two bound fields, as read under the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corridor {
    pub floor: i64,
    pub ceiling: i64,
}

impl Corridor {
    pub const UNBOUNDED: Corridor = Corridor {
        floor: i64::MAX,
        ceiling: i64::MAX,
    };

    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.ceiling == i64::MAX
    }
}

impl std::fmt::Display for Corridor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unbounded() {
            write!(f, "[-, inf]")
        } else {
            write!(f, "[{}, {}]", self.floor, self.ceiling)
        }
    }
}

/// Shared best-known-cost corridor.
#[derive(Debug)]
pub struct CostBound {
    ceiling_hint: AtomicI64,
    corridor: Mutex<Corridor>,
}

impl Default for CostBound {
    fn default() -> Self {
        Self::new()
    }
}

impl CostBound {
    /// Creates an unbounded corridor.
    #[inline]
    pub fn new() -> Self {
        Self {
            ceiling_hint: AtomicI64::new(i64::MAX),
            corridor: Mutex::new(Corridor::UNBOUNDED),
        }
    }

    /// Current ceiling, read without locking.
    #[inline]
    pub fn ceiling(&self) -> i64 {
        self.ceiling_hint.load(Ordering::Relaxed)
    }

    /// Current floor.
    #[inline]
    pub fn floor(&self) -> i64 {
        self.corridor().floor
    }

    /// Consistent snapshot of both fields.
    #[inline]
    pub fn corridor(&self) -> Corridor {
        *self.corridor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` if a candidate whose cost cannot drop below `min_cost`
    /// may still match or beat the best complete itinerary.
    #[inline]
    pub fn admits(&self, min_cost: f64) -> bool {
        min_cost <= self.ceiling() as f64
    }

    /// Offers a complete itinerary. See `offer_range`.
    #[inline]
    pub fn offer(&self, itinerary: &Itinerary<'_>) -> bool {
        self.offer_range(itinerary.min_cost(), itinerary.max_cost())
    }

    /// Offers the cost range of a complete itinerary. The corridor is replaced
    /// when `max_cost` does not exceed the current ceiling. Returns `true` if
    /// it was.
    pub fn offer_range(&self, min_cost: f64, max_cost: f64) -> bool {
        if max_cost > self.ceiling() as f64 {
            return false;
        }

        let mut corridor = self.corridor.lock().unwrap_or_else(PoisonError::into_inner);
        if max_cost > corridor.ceiling as f64 {
            return false;
        }

        let ceiling = round_up(max_cost).min(corridor.ceiling);
        corridor.ceiling = ceiling;
        corridor.floor = round_down(min_cost).min(ceiling);
        self.ceiling_hint.store(ceiling, Ordering::Relaxed);
        true
    }
}

impl std::fmt::Display for CostBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CostBound{}", self.corridor())
    }
}

#[inline]
fn round_up(cost: f64) -> i64 {
    (cost + BOUND_SLACK).ceil() as i64
}

#[inline]
fn round_down(cost: f64) -> i64 {
    (cost - BOUND_SLACK).floor() as i64
}
