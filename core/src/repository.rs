//! The persistence boundary the draw engine consumes.
//!
//! RULE: The engine never reads storage directly. Everything it needs
//! about strategies, awards and stock goes through StrategyRepository.

use crate::{
    error::LotteryResult,
    model::{Award, StrategyRich},
    types::{AwardId, StrategyId},
};

pub trait StrategyRepository: Send + Sync {
    /// Strategy config plus its full detail list, or None if unknown.
    fn query_strategy_rich(&self, strategy_id: StrategyId) -> LotteryResult<Option<StrategyRich>>;

    fn query_award_info(&self, award_id: &str) -> LotteryResult<Option<Award>>;

    /// Awards of the strategy with no remaining stock.
    fn query_no_stock_strategy_award_list(&self, strategy_id: StrategyId) -> LotteryResult<Vec<AwardId>>;

    /// Atomically claim one unit of stock. True iff exactly one unit
    /// was claimed; false when the award is sold out or unknown.
    fn deduct_stock(&self, strategy_id: StrategyId, award_id: &str) -> LotteryResult<bool>;
}
