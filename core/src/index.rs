//! Probability index — per-strategy bucket tables for O(1) point lookup.
//!
//! Each award claims `round(rate * 100)` consecutive probability points,
//! walked in ascending rate order. Every point is scattered into a
//! 128-slot table by Fibonacci hashing. A later point landing on an
//! occupied slot overwrites it (last writer wins).
//!
//! RULES:
//!   - At most one table per strategy id, built on first access.
//!   - A built table is never mutated. Rebuilding requires evict().
//!   - Concurrent first access for one id runs the builder exactly once.

use crate::{
    model::AwardRateInfo,
    types::{AwardId, StrategyId},
};
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;

/// 32-bit fixed-point golden ratio: floor(2^32 * (√5 − 1) / 2).
pub const HASH_INCREMENT: u32 = 0x61c8_8647;

/// Slots per bucket table. Must stay a power of two.
pub const TABLE_SIZE: usize = 128;

/// Fibonacci hash of a probability point into `[0, TABLE_SIZE)`.
pub fn hash_idx(point: u32) -> usize {
    let hash = point
        .wrapping_mul(HASH_INCREMENT)
        .wrapping_add(HASH_INCREMENT);
    hash as usize & (TABLE_SIZE - 1)
}

/// The immutable lookup structure for one strategy.
#[derive(Debug)]
pub struct RateTable {
    strategy_id:    StrategyId,
    buckets:        [Option<AwardId>; TABLE_SIZE],
    source_rates:   Vec<AwardRateInfo>,
    claimed_points: u32,
}

impl RateTable {
    pub fn build(strategy_id: StrategyId, mut award_rates: Vec<AwardRateInfo>) -> Self {
        award_rates.sort_by_key(|a| a.rate);

        let mut buckets: [Option<AwardId>; TABLE_SIZE] = std::array::from_fn(|_| None);
        let mut cursor = 0u32;
        for info in &award_rates {
            let weight = info.rate.percent_points();
            for point in (cursor + 1)..=(cursor + weight) {
                buckets[hash_idx(point)] = Some(info.award_id.clone());
            }
            cursor += weight;
        }

        Self {
            strategy_id,
            buckets,
            source_rates: award_rates,
            claimed_points: cursor,
        }
    }

    pub fn strategy_id(&self) -> StrategyId {
        self.strategy_id
    }

    /// Award owning `point`, or None if the slot was never claimed.
    pub fn award_at(&self, point: u32) -> Option<&str> {
        self.buckets[hash_idx(point)].as_deref()
    }

    /// Source rates in ascending rate order.
    pub fn source_rates(&self) -> &[AwardRateInfo] {
        &self.source_rates
    }

    /// Total points claimed across all awards (the final cursor).
    pub fn claimed_points(&self) -> u32 {
        self.claimed_points
    }

    pub fn occupied_slots(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_some()).count()
    }
}

/// Process-wide cache of rate tables, keyed by strategy id.
#[derive(Debug, Default)]
pub struct ProbabilityIndex {
    tables: DashMap<StrategyId, Arc<RateTable>>,
}

impl ProbabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, strategy_id: StrategyId) -> bool {
        self.tables.contains_key(&strategy_id)
    }

    pub fn get(&self, strategy_id: StrategyId) -> Option<Arc<RateTable>> {
        self.tables.get(&strategy_id).map(|t| Arc::clone(t.value()))
    }

    /// Build the table for `strategy_id` unless one already exists.
    /// Returns true if this call performed the build.
    pub fn build(&self, strategy_id: StrategyId, award_rates: Vec<AwardRateInfo>) -> bool {
        match self.tables.entry(strategy_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Self::build_table(strategy_id, award_rates)));
                true
            }
        }
    }

    /// Return the table for `strategy_id`, building it from `award_rates`
    /// on first access. The shard lock is held for the whole build, so a
    /// concurrent reader never sees a partially filled table.
    pub fn get_or_build<F>(&self, strategy_id: StrategyId, award_rates: F) -> Arc<RateTable>
    where
        F: FnOnce() -> Vec<AwardRateInfo>,
    {
        if let Some(table) = self.get(strategy_id) {
            return table;
        }
        let entry = self
            .tables
            .entry(strategy_id)
            .or_insert_with(|| Arc::new(Self::build_table(strategy_id, award_rates())));
        Arc::clone(entry.value())
    }

    /// Drop the table so the next access rebuilds it. Readers holding
    /// the old Arc keep a consistent view.
    pub fn evict(&self, strategy_id: StrategyId) -> bool {
        self.tables.remove(&strategy_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    fn build_table(strategy_id: StrategyId, award_rates: Vec<AwardRateInfo>) -> RateTable {
        let table = RateTable::build(strategy_id, award_rates);
        log::debug!(
            "Built probability index for strategy {strategy_id}: {} awards, {} points, {} slots",
            table.source_rates().len(),
            table.claimed_points(),
            table.occupied_slots(),
        );
        table
    }
}
