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

//! # Wayfare Search
//!
//! The parallel branch-and-bound core: bounded leg enumeration and leg
//! merging over a frozen `FlightGraph`.
//!
//! ## Modules
//!
//! - `bound`: `CostBound`, the shared pruning corridor of one search or merge.
//! - `leg`: `LegQuery` and `LegSearch`, the level-synchronous bounded BFS.
//! - `merge`: `PathMerge` (2-way and 3-way) and cheapest-selection helpers.
//! - `monitor`: observers of a leg search (`NoOpSearchMonitor`, `LogSearchMonitor`).
//! - `result`: `LegOutcome` and `MergeOutcome`.
//! - `stats`: per-search and per-merge counters.
//!
//! All parallel work is expressed with rayon and runs on whatever pool the
//! caller installs; the crate never creates threads of its own.

pub mod bound;
pub mod leg;
pub mod merge;
pub mod monitor;
pub mod result;
pub mod stats;
