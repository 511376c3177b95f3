//! Memoisation of chart series between dashboard refreshes.
//!
//! Aggregation is cheap but runs on every refresh of the dashboard; the cache
//! skips it when neither the records nor the selected period have changed.

use std::{
    collections::HashMap,
    hash::{DefaultHasher, Hash, Hasher},
};

use time::{OffsetDateTime, UtcOffset};

use crate::{
    aggregation::{ChartPoint, aggregate_for_chart},
    period::{Period, local_date},
    record::TimestampedAmount,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    fingerprint: u64,
    period: Period,
    // Labels and the window depend on the local calendar at `now`, so a new
    // day, week, month or year must miss.
    window_start: Option<OffsetDateTime>,
    current_year: i32,
    local_offset: UtcOffset,
}

impl CacheKey {
    /// Whether `self` was cached for another window of the same chart as
    /// `current`.
    fn is_superseded_by(&self, current: &CacheKey) -> bool {
        self.period == current.period
            && self.local_offset == current.local_offset
            && (self.window_start != current.window_start
                || self.current_year != current.current_year)
    }
}

#[derive(Debug)]
struct CachedSeries {
    points: Vec<ChartPoint>,
    last_used: u64,
}

/// The number of series kept by [ChartCache::new].
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Caches [aggregate_for_chart] results keyed on the records' content and the
/// period.
///
/// A series expires as soon as its period's window moves on (a new day, week,
/// month or year). Beyond that, at most `capacity` series are kept and the
/// least recently used one is evicted first.
#[derive(Debug)]
pub struct ChartCache {
    entries: HashMap<CacheKey, CachedSeries>,
    capacity: usize,
    clock: u64,
    hits: u64,
    misses: u64,
}

impl Default for ChartCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl ChartCache {
    /// Create an empty cache holding up to [DEFAULT_CACHE_CAPACITY] series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache holding up to `capacity` series (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            clock: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Gets the chart series for `records`, aggregating only on a cache miss.
    pub fn get_or_aggregate(
        &mut self,
        records: &[TimestampedAmount],
        period: Period,
        now: OffsetDateTime,
        local_offset: UtcOffset,
    ) -> &[ChartPoint] {
        let key = CacheKey {
            fingerprint: fingerprint(records),
            period,
            window_start: period.window(now, local_offset).start(),
            current_year: local_date(now, local_offset).year(),
            local_offset,
        };

        self.clock += 1;
        let clock = self.clock;

        if self.entries.contains_key(&key) {
            self.hits += 1;
            tracing::trace!("Chart cache hit for {period:?}");
        } else {
            self.misses += 1;
            tracing::debug!(
                "Chart cache miss for {period:?}, aggregating {} records",
                records.len()
            );
            self.make_room_for(&key);
        }

        let series = self.entries.entry(key).or_insert_with(|| CachedSeries {
            points: aggregate_for_chart(records, period, now, local_offset),
            last_used: clock,
        });
        series.last_used = clock;

        &series.points
    }

    fn make_room_for(&mut self, key: &CacheKey) {
        let before = self.entries.len();
        self.entries.retain(|cached, _| !cached.is_superseded_by(key));

        let expired = before - self.entries.len();
        if expired > 0 {
            tracing::trace!("Dropped {expired} expired chart series");
        }

        if self.entries.len() < self.capacity {
            return;
        }

        let least_recently_used = self
            .entries
            .iter()
            .min_by_key(|(_, series)| series.last_used)
            .map(|(cached, _)| *cached);

        if let Some(cached) = least_recently_used {
            self.entries.remove(&cached);
        }
    }

    /// The number of cached series.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no series.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many lookups were answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// How many lookups had to aggregate.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drops every cached series.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Hashes the content of `records`.
///
/// Amounts are hashed by their bit pattern, so `0.0` and `-0.0` differ.
pub fn fingerprint(records: &[TimestampedAmount]) -> u64 {
    let mut hasher = DefaultHasher::new();
    records.len().hash(&mut hasher);

    for record in records {
        record.date.hash(&mut hasher);
        record.amount.to_bits().hash(&mut hasher);
    }

    hasher.finish()
}
