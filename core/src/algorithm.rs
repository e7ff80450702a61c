//! Draw algorithms — the closed set of variants a strategy mode selects.
//!
//! RULES:
//!   - Every variant answers the same question: given the strategy's
//!     award rates and an exclusion set, which award (if any) wins.
//!   - Per-draw state lives on the stack. Variants share nothing
//!     mutable except the probability index, which is read-only once built.
//!   - Degenerate input never errors; it yields None (no win).

use crate::{
    index::ProbabilityIndex,
    model::{AwardRateInfo, Rate, StrategyMode},
    rng::{PointSource, POINT_RANGE},
    types::{AwardId, StrategyId},
};
use std::collections::HashSet;
use std::sync::Arc;

/// Ids that must not be returned by a draw.
pub type ExcludeSet = HashSet<AwardId>;

pub enum DrawAlgorithm {
    Dynamic(DynamicRateDraw),
    Precomputed(PrecomputedRateDraw),
}

impl DrawAlgorithm {
    pub fn dynamic(points: Arc<dyn PointSource>) -> Self {
        DrawAlgorithm::Dynamic(DynamicRateDraw::new(points))
    }

    pub fn precomputed(index: Arc<ProbabilityIndex>, points: Arc<dyn PointSource>) -> Self {
        DrawAlgorithm::Precomputed(PrecomputedRateDraw::new(index, points))
    }

    /// The strategy mode this variant serves.
    pub fn mode(&self) -> StrategyMode {
        match self {
            DrawAlgorithm::Dynamic(_)     => StrategyMode::Dynamic,
            DrawAlgorithm::Precomputed(_) => StrategyMode::Precomputed,
        }
    }

    pub fn draw(
        &self,
        strategy_id: StrategyId,
        award_rates: &[AwardRateInfo],
        exclude:     &ExcludeSet,
    ) -> Option<AwardId> {
        match self {
            DrawAlgorithm::Dynamic(alg)     => alg.draw(award_rates, exclude),
            DrawAlgorithm::Precomputed(alg) => alg.draw(strategy_id, exclude),
        }
    }
}

// ── Dynamic ────────────────────────────────────────────────────────

/// Re-normalises the eligible awards on every draw, so excluding an
/// award redistributes its mass over the rest by relative weight.
pub struct DynamicRateDraw {
    points: Arc<dyn PointSource>,
}

impl DynamicRateDraw {
    pub fn new(points: Arc<dyn PointSource>) -> Self {
        Self { points }
    }

    pub fn draw(&self, award_rates: &[AwardRateInfo], exclude: &ExcludeSet) -> Option<AwardId> {
        let mut available: Vec<&AwardRateInfo> = award_rates
            .iter()
            .filter(|a| !exclude.contains(&a.award_id))
            .collect();

        match available.as_slice() {
            []     => return None,
            [only] => return Some(only.award_id.clone()),
            _      => {}
        }

        let total: u32 = available.iter().map(|a| a.rate.ten_thousandths()).sum();
        if total == 0 {
            return None;
        }

        let point = self.points.next_point(POINT_RANGE);
        available.sort_by_key(|a| a.rate);

        let mut cursor = 0u32;
        for info in available {
            let share = rescaled_share(info.rate, total);
            if point <= cursor + share {
                return Some(info.award_id.clone());
            }
            cursor += share;
        }
        // Rounding left `point` past the last share.
        None
    }
}

/// Percentage points an award receives among the eligible set:
/// `round_up(rate / total, 2) * 100`, computed exactly.
pub fn rescaled_share(rate: Rate, total_ten_thousandths: u32) -> u32 {
    let scaled = rate.ten_thousandths() as u64 * POINT_RANGE as u64;
    let total = total_ten_thousandths as u64;
    scaled.div_ceil(total) as u32
}

// ── Precomputed ────────────────────────────────────────────────────

/// Reads the drawn point straight out of the strategy's bucket table.
/// An excluded or unclaimed bucket is a no-win; it is not re-drawn.
pub struct PrecomputedRateDraw {
    index:  Arc<ProbabilityIndex>,
    points: Arc<dyn PointSource>,
}

impl PrecomputedRateDraw {
    pub fn new(index: Arc<ProbabilityIndex>, points: Arc<dyn PointSource>) -> Self {
        Self { index, points }
    }

    pub fn draw(&self, strategy_id: StrategyId, exclude: &ExcludeSet) -> Option<AwardId> {
        let Some(table) = self.index.get(strategy_id) else {
            log::warn!("No probability index for strategy {strategy_id}; treating draw as no win");
            return None;
        };

        let point = self.points.next_point(POINT_RANGE);
        let award_id = table.award_at(point)?;
        if exclude.contains(award_id) {
            return None;
        }
        Some(award_id.to_string())
    }
}
