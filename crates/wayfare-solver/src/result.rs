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

use crate::solution::Solution;
use crate::stats::SolverStatistics;

/// A solution together with the statistics of the solve that produced it.
#[derive(Debug, Clone)]
pub struct SolverOutcome<'g> {
    solution: Solution<'g>,
    statistics: SolverStatistics,
}

impl<'g> SolverOutcome<'g> {
    #[inline]
    pub fn new(solution: Solution<'g>, statistics: SolverStatistics) -> Self {
        Self {
            solution,
            statistics,
        }
    }

    #[inline]
    pub fn solution(&self) -> &Solution<'g> {
        &self.solution
    }

    #[inline]
    pub fn into_solution(self) -> Solution<'g> {
        self.solution
    }

    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }
}

impl std::fmt::Display for SolverOutcome<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.solution)?;
        write!(f, "{}", self.statistics)
    }
}
