//! Algorithm registry — strategy mode → draw algorithm.
//!
//! Built once at start-up by init(). A registry that exists is complete:
//! every StrategyMode has exactly one algorithm, so lookups never fail.

use crate::{
    algorithm::DrawAlgorithm,
    error::{LotteryError, LotteryResult},
    index::ProbabilityIndex,
    model::StrategyMode,
    rng::PointSource,
};
use std::sync::Arc;

pub struct AlgorithmRegistry {
    dynamic:     DrawAlgorithm,
    precomputed: DrawAlgorithm,
}

impl AlgorithmRegistry {
    /// Assemble the lookup table from the supplied implementations.
    /// Fails on a duplicate or a missing mode.
    pub fn init<I>(algorithms: I) -> LotteryResult<Self>
    where
        I: IntoIterator<Item = DrawAlgorithm>,
    {
        let mut dynamic = None;
        let mut precomputed = None;

        for algorithm in algorithms {
            let mode = algorithm.mode();
            let slot = match mode {
                StrategyMode::Dynamic     => &mut dynamic,
                StrategyMode::Precomputed => &mut precomputed,
            };
            if slot.replace(algorithm).is_some() {
                return Err(LotteryError::DuplicateAlgorithm { mode: mode.to_string() });
            }
        }

        let missing = |mode: StrategyMode| LotteryError::MissingAlgorithm { mode: mode.to_string() };
        let registry = Self {
            dynamic:     dynamic.ok_or_else(|| missing(StrategyMode::Dynamic))?,
            precomputed: precomputed.ok_or_else(|| missing(StrategyMode::Precomputed))?,
        };
        log::info!("Algorithm registry initialised: {:?}", StrategyMode::ALL);
        Ok(registry)
    }

    /// The standard wiring: one dynamic and one precomputed algorithm
    /// sharing `points`, the precomputed one reading `index`.
    pub fn standard(
        index:  Arc<ProbabilityIndex>,
        points: Arc<dyn PointSource>,
    ) -> LotteryResult<Self> {
        Self::init([
            DrawAlgorithm::dynamic(Arc::clone(&points)),
            DrawAlgorithm::precomputed(index, points),
        ])
    }

    pub fn get(&self, mode: StrategyMode) -> &DrawAlgorithm {
        match mode {
            StrategyMode::Dynamic     => &self.dynamic,
            StrategyMode::Precomputed => &self.precomputed,
        }
    }

    /// Lookup by persisted mode code.
    pub fn get_by_code(&self, code: i64) -> LotteryResult<&DrawAlgorithm> {
        StrategyMode::from_code(code).map(|mode| self.get(mode))
    }
}
