//! Exclusion policies — which awards a draw must skip.

use crate::{
    algorithm::ExcludeSet,
    error::LotteryResult,
    repository::StrategyRepository,
    types::StrategyId,
};

/// Computes the exclusion set for one draw. Blacklists or time-window
/// rules layer on top by wrapping another policy.
pub trait ExclusionPolicy: Send + Sync {
    fn exclude_award_ids(
        &self,
        repository:  &dyn StrategyRepository,
        strategy_id: StrategyId,
    ) -> LotteryResult<ExcludeSet>;
}

/// Excludes exactly the awards that are out of stock.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStockExclusion;

impl ExclusionPolicy for NoStockExclusion {
    fn exclude_award_ids(
        &self,
        repository:  &dyn StrategyRepository,
        strategy_id: StrategyId,
    ) -> LotteryResult<ExcludeSet> {
        let ids = repository.query_no_stock_strategy_award_list(strategy_id)?;
        Ok(ids.into_iter().collect())
    }
}
