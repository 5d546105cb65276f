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

//! Loaders for the flight and alliance description files.
//!
//! The flight file holds one flight per line,
//! `id;origin;takeoff;destination;landing;cost;company`, with both instants in
//! the 14-character `MMDDYYYYhhmmss` form. Lines are parsed in parallel and
//! inserted into a `FlightGraphBuilder` by a single writer afterwards, so the
//! resulting graph does not depend on thread scheduling.
//!
//! By default a malformed line aborts loading with `MalformedRecord` naming
//! its 1-based line number. A lenient loader logs and skips such lines
//! instead. Blank lines are always ignored.
//!
//! The alliance file holds one alliance per line, as semicolon-separated
//! company names.

use crate::error::ModelError;
use crate::flight::FlightRecord;
use crate::graph::{FlightGraph, FlightGraphBuilder};
use crate::time::decode_timestamp;
use rayon::prelude::*;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

const FIELD_COUNT: usize = 7;

/// Parses one line of the flight file. `line` is the 1-based line number
/// used in error messages.
pub fn parse_flight_line(line: usize, text: &str) -> Result<FlightRecord, ModelError> {
    let malformed = |reason: String| ModelError::MalformedRecord { line, reason };

    let fields: Vec<&str> = text.trim_end_matches(['\r', '\n']).split(';').collect();
    if fields.len() != FIELD_COUNT {
        return Err(malformed(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            fields.len()
        )));
    }

    let id = required(&fields, 0, "id", line)?;
    let origin = required(&fields, 1, "origin", line)?;
    let takeoff = decode_timestamp(required(&fields, 2, "takeoff", line)?)
        .map_err(|e| malformed(e.to_string()))?;
    let destination = required(&fields, 3, "destination", line)?;
    let landing = decode_timestamp(required(&fields, 4, "landing", line)?)
        .map_err(|e| malformed(e.to_string()))?;
    let cost_text = required(&fields, 5, "cost", line)?;
    let cost: f64 = cost_text
        .parse()
        .map_err(|_| malformed(format!("invalid cost '{}'", cost_text)))?;
    if !cost.is_finite() || cost < 0.0 {
        return Err(malformed(format!(
            "cost '{}' must be finite and non-negative",
            cost_text
        )));
    }
    let company = required(&fields, 6, "company", line)?;

    Ok(FlightRecord::new(id, origin, takeoff, destination, landing, cost, company))
}

fn required<'a>(fields: &[&'a str], i: usize, name: &str, line: usize) -> Result<&'a str, ModelError> {
    let value = fields[i].trim();
    if value.is_empty() {
        Err(ModelError::MalformedRecord {
            line,
            reason: format!("empty {} field", name),
        })
    } else {
        Ok(value)
    }
}

/// Configurable loader for flight files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlightLoader {
    lenient: bool,
}

impl FlightLoader {
    /// Creates a strict loader.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// When enabled, malformed lines are logged and skipped.
    #[inline]
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    #[inline]
    pub fn is_lenient(&self) -> bool {
        self.lenient
    }

    /// Parses every line into a record, in line order.
    pub fn parse_records(&self, text: &str) -> Result<Vec<FlightRecord>, ModelError> {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(i, l)| (i + 1, l))
            .collect();

        let parsed: Vec<Result<FlightRecord, ModelError>> = lines
            .par_iter()
            .map(|&(line, l)| parse_flight_line(line, l))
            .collect();

        let mut records = Vec::with_capacity(parsed.len());
        let mut skipped = 0usize;
        for result in parsed {
            match result {
                Ok(record) => records.push(record),
                Err(e) if self.lenient => {
                    log::warn!("skipping flight record: {}", e);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        if skipped > 0 {
            log::warn!("{} malformed flight records skipped", skipped);
        }
        Ok(records)
    }

    /// Loads a graph from an in-memory string.
    pub fn from_str(&self, text: &str) -> Result<FlightGraph, ModelError> {
        let records = self.parse_records(text)?;
        let mut builder = FlightGraphBuilder::with_capacity(records.len());
        for record in records {
            builder.insert_flight(record);
        }
        let graph = builder.build();
        log::debug!("loaded {}", graph);
        Ok(graph)
    }

    /// Loads a graph from any reader.
    pub fn from_reader<R: Read>(&self, reader: R) -> Result<FlightGraph, ModelError> {
        let mut text = String::new();
        BufReader::new(reader).read_to_string(&mut text)?;
        self.from_str(&text)
    }

    /// Loads a graph from a file.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<FlightGraph, ModelError> {
        let file = File::open(path)?;
        self.from_reader(file)
    }
}

/// Parses alliance groups: one group per line, semicolon-separated names.
/// Blank lines and empty names are ignored.
pub fn parse_alliances(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(|line| {
            line.split(';')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|group| !group.is_empty())
        .collect()
}

/// Reads alliance groups from any buffered reader.
pub fn read_alliances<R: BufRead>(reader: R) -> Result<Vec<Vec<String>>, ModelError> {
    let mut groups = Vec::new();
    for line in reader.lines() {
        groups.extend(parse_alliances(&line?));
    }
    Ok(groups)
}

/// Reads alliance groups from a file.
pub fn load_alliances<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>, ModelError> {
    let file = File::open(path)?;
    read_alliances(BufReader::new(file))
}
