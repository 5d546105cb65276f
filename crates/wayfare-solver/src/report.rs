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

//! Plain-text reports of a `Solution`.
//!
//! Each itinerary renders as a block:
//!
//! ```text
//! Price : 219
//! X-hc-H (1/2 0h0min)/C (1/2 2h0min)-100$-100%
//! Y-cv-C (1/6 1h0min)/V (1/6 3h0min)-80$-70%
//! Y-vh-V (1/8 0h0min)/H (1/8 3h0min)-90$-70%
//!
//! ```
//!
//! Every flight line reads `company-id-origin (takeoff)/destination (landing)-cost$-discount%`,
//! where `cost` is the undiscounted price. An empty slot renders
//! `No itinerary found` instead of the block.

use crate::solution::Solution;
use std::io::{self, Write};
use wayfare_model::flight::Flight;
use wayfare_model::graph::FlightGraph;
use wayfare_model::itinerary::{Discount, Itinerary};
use wayfare_model::time::format_clock;

pub const WORK_HARD_HEADER: &str = "“Work Hard” Proposition :";
pub const NO_ITINERARY: &str = "No itinerary found";

/// Formats an amount rounded to cents, without trailing zeros.
pub fn format_amount(amount: f64) -> String {
    let rendered = format!("{:.2}", (amount * 100.0).round() / 100.0);
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Writes one flight line.
pub fn write_flight<W: Write>(
    out: &mut W,
    graph: &FlightGraph,
    flight: &Flight,
    discount: Discount,
) -> io::Result<()> {
    writeln!(
        out,
        "{}-{}-{} ({})/{} ({})-{}$-{}%",
        graph.company_name(flight.company()),
        flight.id(),
        graph.location_name(flight.origin()),
        format_clock(flight.takeoff()),
        graph.location_name(flight.destination()),
        format_clock(flight.landing()),
        format_amount(flight.cost()),
        discount.percent()
    )
}

/// Writes the price line, the flight lines and a blank line, or the
/// `No itinerary found` line for an empty slot.
pub fn write_itinerary<W: Write>(
    out: &mut W,
    graph: &FlightGraph,
    itinerary: Option<&Itinerary<'_>>,
) -> io::Result<()> {
    let Some(itinerary) = itinerary else {
        return writeln!(out, "{NO_ITINERARY}");
    };
    writeln!(out, "Price : {}", format_amount(itinerary.actual_cost()))?;
    for (flight, discount) in itinerary.iter() {
        write_flight(out, graph, flight, discount)?;
    }
    writeln!(out)
}

/// Writes the work-hard report.
pub fn write_work_hard<W: Write>(
    out: &mut W,
    graph: &FlightGraph,
    solution: &Solution<'_>,
) -> io::Result<()> {
    writeln!(out, "{WORK_HARD_HEADER}")?;
    write_itinerary(out, graph, solution.work_hard())
}

/// Writes the play-hard report: one numbered proposition per side-trip city,
/// in request order.
pub fn write_play_hard<W: Write>(
    out: &mut W,
    graph: &FlightGraph,
    solution: &Solution<'_>,
) -> io::Result<()> {
    for (i, trip) in solution.play_hard().iter().enumerate() {
        writeln!(out, "“Play Hard” Proposition {} : {}", i + 1, trip.city())?;
        write_itinerary(out, graph, trip.itinerary())?;
        writeln!(out)?;
    }
    Ok(())
}
