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

//! # Time
//!
//! Instants are plain epoch seconds (`Timestamp`). Time windows are closed
//! intervals `[earliest, latest]`. The input files encode instants as the
//! fixed 14-character string `MMDDYYYYhhmmss` interpreted in UTC; reports
//! print them back as `M/D HhMmin`.

use crate::error::ModelError;
use chrono::{DateTime, NaiveDateTime};

/// Seconds since the Unix epoch (UTC).
pub type Timestamp = i64;

/// A duration in seconds.
pub type Seconds = i64;

const TIMESTAMP_FORMAT: &str = "%m%d%Y%H%M%S";
const TIMESTAMP_LEN: usize = 14;

/// A closed time interval `[earliest, latest]`.
///
/// A window with `earliest > latest` is empty and admits nothing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TimeWindow {
    earliest: Timestamp,
    latest: Timestamp,
}

impl TimeWindow {
    #[inline]
    pub const fn new(earliest: Timestamp, latest: Timestamp) -> Self {
        Self { earliest, latest }
    }

    #[inline]
    pub const fn earliest(&self) -> Timestamp {
        self.earliest
    }

    #[inline]
    pub const fn latest(&self) -> Timestamp {
        self.latest
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.earliest > self.latest
    }

    /// Returns `true` if `t` lies inside the window, bounds included.
    #[inline]
    pub const fn contains(&self, t: Timestamp) -> bool {
        self.earliest <= t && t <= self.latest
    }

    /// Returns `true` if a flight taking off at `takeoff` and landing at
    /// `landing` happens entirely inside the window.
    #[inline]
    pub const fn admits(&self, takeoff: Timestamp, landing: Timestamp) -> bool {
        takeoff >= self.earliest && landing <= self.latest
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.earliest, self.latest)
    }
}

/// Decodes a `MMDDYYYYhhmmss` string (UTC) into epoch seconds.
///
/// # Errors
///
/// Returns `ModelError::InvalidTimestamp` if the string is not exactly
/// 14 ASCII digits or does not name a valid calendar instant.
pub fn decode_timestamp(text: &str) -> Result<Timestamp, ModelError> {
    let text = text.trim();
    if text.len() != TIMESTAMP_LEN || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModelError::InvalidTimestamp(text.to_string()));
    }

    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|_| ModelError::InvalidTimestamp(text.to_string()))
}

/// Encodes epoch seconds back into the `MMDDYYYYhhmmss` form.
pub fn encode_timestamp(ts: Timestamp) -> Option<String> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
}

/// Formats an instant the way itinerary reports print it: `M/D HhMmin`,
/// without zero padding.
pub fn format_clock(ts: Timestamp) -> String {
    match DateTime::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%-m/%-d %-Hh%-Mmin").to_string(),
        None => ts.to_string(),
    }
}
