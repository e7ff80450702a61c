//! The draw engine — the single entry point for executing a draw.
//!
//! EXECUTION ORDER (fixed, per request):
//!   1. Fetch the strategy and its full detail list from the repository.
//!   2. Build the probability index if the mode needs one and it is absent.
//!   3. Compute the exclusion set (out-of-stock awards by default).
//!   4. Dispatch to the algorithm registered for the strategy's mode.
//!   5. Resolve award metadata and assemble the DrawResult.
//!
//! RULES:
//!   - Stock is never deducted here. The caller sequences deduct_stock()
//!     after a win and owns the policy for a failed deduction.
//!   - Data problems (unknown strategy, unknown mode code, missing award
//!     metadata) produce NO_WIN. Only repository failures return Err.
//!   - Award rates are read fresh on every draw; only the index is cached.

use crate::{
    algorithm::ExcludeSet,
    error::{LotteryError, LotteryResult},
    exclusion::{ExclusionPolicy, NoStockExclusion},
    index::ProbabilityIndex,
    model::{AwardRateInfo, DrawAwardInfo, DrawRequest, DrawResult, StrategyConfig, StrategyRich},
    registry::AlgorithmRegistry,
    repository::StrategyRepository,
    rng::{PointSource, SecurePoints},
    types::{AwardId, StrategyId},
};
use std::sync::Arc;

pub struct DrawEngine {
    repository: Arc<dyn StrategyRepository>,
    index:      Arc<ProbabilityIndex>,
    registry:   AlgorithmRegistry,
    exclusion:  Box<dyn ExclusionPolicy>,
}

impl DrawEngine {
    pub fn new(
        repository: Arc<dyn StrategyRepository>,
        index:      Arc<ProbabilityIndex>,
        registry:   AlgorithmRegistry,
    ) -> Self {
        Self {
            repository,
            index,
            registry,
            exclusion: Box::new(NoStockExclusion),
        }
    }

    /// Build a fully wired engine drawing from the OS CSPRNG.
    /// Call this instead of new() + manual registry wiring.
    pub fn build(repository: Arc<dyn StrategyRepository>) -> LotteryResult<Self> {
        Self::build_with_points(repository, Arc::new(SecurePoints))
    }

    /// Fully wired engine over an explicit point source (seeded replays, tests).
    pub fn build_with_points(
        repository: Arc<dyn StrategyRepository>,
        points:     Arc<dyn PointSource>,
    ) -> LotteryResult<Self> {
        log::debug!("Wiring draw engine with '{}' point source", points.name());
        let index = Arc::new(ProbabilityIndex::new());
        let registry = AlgorithmRegistry::standard(Arc::clone(&index), points)?;
        Ok(Self::new(repository, index, registry))
    }

    /// Replace the exclusion policy (e.g. to layer a blacklist on top of stock).
    pub fn with_exclusion<P: ExclusionPolicy + 'static>(mut self, policy: P) -> Self {
        self.exclusion = Box::new(policy);
        self
    }

    pub fn index(&self) -> &ProbabilityIndex {
        &self.index
    }

    pub fn repository(&self) -> &dyn StrategyRepository {
        self.repository.as_ref()
    }

    /// Run one draw. Side-effect free with respect to stock.
    pub fn execute_draw(&self, req: &DrawRequest) -> LotteryResult<DrawResult> {
        let strategy_id = req.strategy_id;

        let Some(rich) = self.query_strategy_rich(strategy_id)? else {
            return Ok(DrawResult::no_win(req.user_id.clone(), strategy_id));
        };
        let award_rates = rich.award_rates();

        self.check_and_init_rate_data(&rich.strategy, &award_rates);

        let exclude: ExcludeSet = self
            .exclusion
            .exclude_award_ids(self.repository.as_ref(), strategy_id)?;

        let algorithm = self.registry.get(rich.strategy.mode);
        let award_id = algorithm.draw(strategy_id, &award_rates, &exclude);

        self.build_draw_result(req, award_id)
    }

    /// Claim one unit of stock for a won award. Passed straight to the
    /// repository; a false return is not retried here.
    pub fn deduct_stock(&self, strategy_id: StrategyId, award_id: &str) -> LotteryResult<bool> {
        let claimed = self.repository.deduct_stock(strategy_id, award_id)?;
        if !claimed {
            log::info!("Stock deduction lost for strategy {strategy_id} award {award_id}");
        }
        Ok(claimed)
    }

    fn query_strategy_rich(&self, strategy_id: StrategyId) -> LotteryResult<Option<StrategyRich>> {
        match self.repository.query_strategy_rich(strategy_id) {
            Ok(Some(rich)) => Ok(Some(rich)),
            Ok(None) => {
                log::warn!("Strategy {strategy_id} not found; draw degrades to no win");
                Ok(None)
            }
            Err(LotteryError::UnknownStrategyMode { code }) => {
                log::warn!("Strategy {strategy_id} has unknown mode code {code}; draw degrades to no win");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn check_and_init_rate_data(&self, strategy: &StrategyConfig, award_rates: &[AwardRateInfo]) {
        if !strategy.mode.uses_index() {
            return;
        }
        self.index
            .get_or_build(strategy.strategy_id, || award_rates.to_vec());
    }

    fn build_draw_result(
        &self,
        req:      &DrawRequest,
        award_id: Option<AwardId>,
    ) -> LotteryResult<DrawResult> {
        let user_id = req.user_id.clone();
        let strategy_id = req.strategy_id;

        let Some(award_id) = award_id else {
            log::info!("Draw finished [NO_WIN] user: {user_id} strategy: {strategy_id}");
            return Ok(DrawResult::no_win(user_id, strategy_id));
        };

        let Some(award) = self.repository.query_award_info(&award_id)? else {
            log::warn!(
                "Award {award_id} drawn for strategy {strategy_id} has no metadata; draw degrades to no win"
            );
            return Ok(DrawResult::no_win(user_id, strategy_id));
        };

        log::info!(
            "Draw finished [WIN] user: {user_id} strategy: {strategy_id} award: {} name: {}",
            award.award_id,
            award.award_name,
        );
        Ok(DrawResult::win(
            user_id,
            strategy_id,
            DrawAwardInfo {
                award_id:   award.award_id,
                award_name: award.award_name,
            },
        ))
    }
}
