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

//! Error taxonomy of the model layer.

use thiserror::Error;

/// Errors raised while building or querying the flight model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A city was requested that never appeared in any flight.
    #[error("unknown location '{0}'")]
    UnknownLocation(String),
    /// An input line could not be turned into a flight record.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
    /// A timestamp was not in the 14-character `MMDDYYYYhhmmss` format.
    #[error("invalid timestamp '{0}', expected MMDDYYYYhhmmss")]
    InvalidTimestamp(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelError {
    /// Returns `true` if the error names a city absent from the graph.
    #[inline]
    pub fn is_unknown_location(&self) -> bool {
        matches!(self, ModelError::UnknownLocation(_))
    }
}
