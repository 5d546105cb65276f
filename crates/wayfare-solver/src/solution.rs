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

use wayfare_model::itinerary::Itinerary;

/// The play-hard proposition for one side-trip city.
#[derive(Debug, Clone)]
pub struct SideTrip<'g> {
    city: String,
    itinerary: Option<Itinerary<'g>>,
}

impl<'g> SideTrip<'g> {
    #[inline]
    pub fn new(city: impl Into<String>, itinerary: Option<Itinerary<'g>>) -> Self {
        Self {
            city: city.into(),
            itinerary,
        }
    }

    #[inline]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// The cheaper of the two circuits through this city, or `None`.
    #[inline]
    pub fn itinerary(&self) -> Option<&Itinerary<'g>> {
        self.itinerary.as_ref()
    }
}

/// The answer of one solve: the work-hard round trip and one play-hard slot
/// per requested side-trip city, in request order.
#[derive(Debug, Clone)]
pub struct Solution<'g> {
    work_hard: Option<Itinerary<'g>>,
    play_hard: Vec<SideTrip<'g>>,
}

impl<'g> Solution<'g> {
    #[inline]
    pub fn new(work_hard: Option<Itinerary<'g>>, play_hard: Vec<SideTrip<'g>>) -> Self {
        Self {
            work_hard,
            play_hard,
        }
    }

    #[inline]
    pub fn work_hard(&self) -> Option<&Itinerary<'g>> {
        self.work_hard.as_ref()
    }

    #[inline]
    pub fn play_hard(&self) -> &[SideTrip<'g>] {
        &self.play_hard
    }

    /// The slot of `city`, if it was requested.
    pub fn side_trip(&self, city: &str) -> Option<&SideTrip<'g>> {
        self.play_hard.iter().find(|t| t.city == city)
    }
}

impl std::fmt::Display for Solution<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.work_hard {
            Some(it) => write!(f, "Solution(work hard: {:.2}", it.max_cost())?,
            None => write!(f, "Solution(work hard: none")?,
        }
        let found = self
            .play_hard
            .iter()
            .filter(|t| t.itinerary.is_some())
            .count();
        write!(f, ", play hard: {}/{})", found, self.play_hard.len())
    }
}
