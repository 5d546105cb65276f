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

//! # Alliance Index
//!
//! Memoized "do these two companies share an alliance?" lookup.
//!
//! Alliance groups are resolved against the company table of a `FlightGraph`
//! once. Answers are cached per unordered company pair, and only for pairs
//! that are actually asked about: the first query for a pair scans the groups
//! and records the answer, every later query is a map lookup under a read
//! lock. The cache is split into shards so concurrent searches rarely contend
//! on the same lock. A pair is written at most once; a racing second writer
//! keeps the value already present.

use crate::graph::FlightGraph;
use crate::index::CompanyIndex;
use rustc_hash::FxHashMap;
use std::sync::{PoisonError, RwLock};

const CACHE_SHARDS: usize = 16;

type CompanyPair = (CompanyIndex, CompanyIndex);

/// Company-pair alliance lookup with a write-once cache.
#[derive(Debug)]
pub struct AllianceIndex {
    num_companies: usize,
    groups: Vec<Vec<CompanyIndex>>,
    cache: Vec<RwLock<FxHashMap<CompanyPair, bool>>>,
}

impl AllianceIndex {
    /// Creates an index over `num_companies` companies and the given groups.
    pub fn new(num_companies: usize, groups: Vec<Vec<CompanyIndex>>) -> Self {
        debug_assert!(
            groups.iter().flatten().all(|c| c.get() < num_companies),
            "called `AllianceIndex::new` with a company index out of range"
        );
        let mut cache = Vec::with_capacity(CACHE_SHARDS);
        cache.resize_with(CACHE_SHARDS, Default::default);
        Self {
            num_companies,
            groups,
            cache,
        }
    }

    /// Resolves alliance groups given by company name against the companies
    /// of `graph`. Companies that operate no flight cannot influence a price
    /// and are dropped.
    pub fn from_names<S>(graph: &FlightGraph, groups: &[Vec<S>]) -> Self
    where
        S: AsRef<str>,
    {
        let resolved = groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .filter_map(|name| {
                        let name = name.as_ref();
                        let company = graph.company(name);
                        if company.is_none() {
                            log::debug!("alliance member '{}' operates no flight, ignored", name);
                        }
                        company
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|group| group.len() > 1)
            .collect();
        Self::new(graph.num_companies(), resolved)
    }

    #[inline]
    pub fn num_companies(&self) -> usize {
        self.num_companies
    }

    #[inline]
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if `a` and `b` are co-members of some alliance group.
    pub fn shares(&self, a: CompanyIndex, b: CompanyIndex) -> bool {
        let pair = if a <= b { (a, b) } else { (b, a) };
        debug_assert!(pair.1.get() < self.num_companies);
        let shard = &self.cache[(pair.0.get() ^ pair.1.get()) % CACHE_SHARDS];

        let cached = shard
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&pair)
            .copied();
        if let Some(shares) = cached {
            return shares;
        }

        let mut shard = shard.write().unwrap_or_else(PoisonError::into_inner);
        let shares = *shard.entry(pair).or_insert_with(|| self.scan(pair.0, pair.1));
        shares
    }

    /// Number of company pairs answered so far.
    pub fn num_cached_pairs(&self) -> usize {
        self.cache
            .iter()
            .map(|shard| shard.read().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }

    /// Name-based variant of `shares`; unknown companies share nothing.
    pub fn shares_names(&self, graph: &FlightGraph, a: &str, b: &str) -> bool {
        match (graph.company(a), graph.company(b)) {
            (Some(a), Some(b)) => self.shares(a, b),
            _ => false,
        }
    }

    fn scan(&self, a: CompanyIndex, b: CompanyIndex) -> bool {
        self.groups
            .iter()
            .any(|group| group.contains(&a) && group.contains(&b))
    }
}

impl std::fmt::Display for AllianceIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AllianceIndex(companies: {}, groups: {})",
            self.num_companies,
            self.groups.len()
        )
    }
}
