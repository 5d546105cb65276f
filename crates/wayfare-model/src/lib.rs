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

//! # Wayfare Model
//!
//! Immutable domain model for cheapest-itinerary search over a flight network.
//! Everything in this crate is built once, before any search starts, and is
//! afterwards shared by immutable reference across all worker threads.
//!
//! ## Modules
//!
//! - `index`: phantom-typed indices for locations, companies and flights.
//! - `time`: epoch timestamps, closed time windows and the `MMDDYYYYhhmmss` codec.
//! - `flight`: the immutable `Flight` record and the raw `FlightRecord`.
//! - `graph`: `FlightGraph` (frozen adjacency index) and its single-writer builder.
//! - `alliance`: `AllianceIndex`, a memoized company-pair lookup.
//! - `itinerary`: the adjacency-dependent discount and cost model.
//! - `loading`: parsers for the flight and alliance description files.
//! - `error`: the `ModelError` taxonomy.
//!
//! ## Usage
//!
//! ```rust
//! use wayfare_model::alliance::AllianceIndex;
//! use wayfare_model::loading::FlightLoader;
//!
//! let text = "AF1;Paris;01012025080000;Berlin;01012025100000;120;AF\n";
//! let graph = FlightLoader::new().from_str(text).unwrap();
//! let alliances = AllianceIndex::from_names(&graph, &[vec!["AF", "LH"]]);
//!
//! assert_eq!(graph.num_flights(), 1);
//! assert!(graph.neighbors("Paris").is_ok());
//! assert!(!alliances.shares_names(&graph, "AF", "LH"));
//! ```

pub mod alliance;
pub mod error;
pub mod flight;
pub mod graph;
pub mod index;
pub mod itinerary;
pub mod loading;
pub mod time;
