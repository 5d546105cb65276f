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

//! # Wayfare Solver
//!
//! Orchestration of the two trip propositions on top of `wayfare-search`:
//!
//! - "work hard": the cheapest round trip home → conference → home.
//! - "play hard": for every side-trip city, the cheaper of the circuits
//!   home → side → conference → home and home → conference → side → home.
//!
//! ## Modules
//!
//! - `parameters`: validated solve parameters and derived leg windows.
//! - `solver`: the leg planner and parallel orchestrator, with its builder.
//! - `solution`: the work-hard slot and the per-city play-hard slots.
//! - `result`: `SolverOutcome`, a solution with its statistics.
//! - `stats`: solve-wide statistics and their builder.
//! - `report`: plain-text rendering of both propositions.
//! - `error`: the `SolverError` taxonomy.
//!
//! See `solver` for detailed APIs and examples.

pub mod error;
pub mod parameters;
pub mod report;
pub mod result;
pub mod solution;
pub mod solver;
pub mod stats;
