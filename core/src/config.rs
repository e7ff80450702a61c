//! Seed data for strategies and awards, loaded from the data/ directory.

use crate::{
    error::LotteryResult,
    model::{Award, Rate, StrategyConfig, StrategyDetail, StrategyMode, StrategyRich},
    types::{AwardId, StrategyId},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailSeed {
    pub award_id:            AwardId,
    pub award_count:         i64,
    pub award_surplus_count: i64,
    pub award_rate:          f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySeed {
    pub strategy_id:   StrategyId,
    #[serde(default)]
    pub strategy_desc: String,
    /// Persisted mode code: 1 = dynamic, 2 = precomputed.
    pub strategy_mode: i64,
    pub details:       Vec<DetailSeed>,
}

impl StrategySeed {
    pub fn to_strategy_rich(&self) -> LotteryResult<StrategyRich> {
        let strategy = StrategyConfig {
            strategy_id:   self.strategy_id,
            strategy_desc: self.strategy_desc.clone(),
            mode:          StrategyMode::from_code(self.strategy_mode)?,
        };
        let details = self
            .details
            .iter()
            .map(|d| {
                Ok(StrategyDetail {
                    strategy_id:         self.strategy_id,
                    award_id:            d.award_id.clone(),
                    award_count:         d.award_count,
                    award_surplus_count: d.award_surplus_count,
                    award_rate:          Rate::from_f64(&d.award_id, d.award_rate)?,
                })
            })
            .collect::<LotteryResult<Vec<_>>>()?;
        Ok(StrategyRich { strategy, details })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotteryConfig {
    pub awards:     Vec<Award>,
    pub strategies: Vec<StrategySeed>,
}

impl LotteryConfig {
    /// Load from the data/ directory.
    /// In tests, use LotteryConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/strategies.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: LotteryConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject seed data the engine could not draw against sensibly.
    pub fn validate(&self) -> LotteryResult<()> {
        let award_ids: HashSet<&str> = self.awards.iter().map(|a| a.award_id.as_str()).collect();
        if award_ids.len() != self.awards.len() {
            return Err(anyhow::anyhow!("Duplicate award id in seed data").into());
        }

        let mut strategy_ids = HashSet::new();
        for seed in &self.strategies {
            if !strategy_ids.insert(seed.strategy_id) {
                return Err(anyhow::anyhow!("Duplicate strategy id {}", seed.strategy_id).into());
            }
            // Parses the mode code and every rate.
            seed.to_strategy_rich()?;

            for d in &seed.details {
                if !award_ids.contains(d.award_id.as_str()) {
                    return Err(anyhow::anyhow!(
                        "Strategy {} references unknown award '{}'",
                        seed.strategy_id,
                        d.award_id
                    )
                    .into());
                }
                if d.award_surplus_count < 0 || d.award_surplus_count > d.award_count {
                    return Err(anyhow::anyhow!(
                        "Strategy {} award '{}': surplus {} outside [0, {}]",
                        seed.strategy_id,
                        d.award_id,
                        d.award_surplus_count,
                        d.award_count
                    )
                    .into());
                }
            }
        }
        Ok(())
    }

    pub fn strategy(&self, strategy_id: StrategyId) -> Option<&StrategySeed> {
        self.strategies.iter().find(|s| s.strategy_id == strategy_id)
    }

    /// Strategy 7 (dynamic) and 8 (precomputed), both over awards
    /// A = 0.10, B = 0.30, C = 0.60 with ample stock.
    pub fn default_test() -> Self {
        let award = |id: &str, name: &str| Award {
            award_id:      id.into(),
            award_type:    1,
            award_name:    name.into(),
            award_content: format!("{name} voucher"),
        };
        let details = || {
            vec![
                DetailSeed { award_id: "A".into(), award_count: 1_000_000, award_surplus_count: 1_000_000, award_rate: 0.10 },
                DetailSeed { award_id: "B".into(), award_count: 1_000_000, award_surplus_count: 1_000_000, award_rate: 0.30 },
                DetailSeed { award_id: "C".into(), award_count: 1_000_000, award_surplus_count: 1_000_000, award_rate: 0.60 },
            ]
        };
        Self {
            awards: vec![award("A", "Headphones"), award("B", "Coffee Mug"), award("C", "Sticker Pack")],
            strategies: vec![
                StrategySeed {
                    strategy_id:   7,
                    strategy_desc: "dynamic test strategy".into(),
                    strategy_mode: StrategyMode::Dynamic.code(),
                    details:       details(),
                },
                StrategySeed {
                    strategy_id:   8,
                    strategy_desc: "precomputed test strategy".into(),
                    strategy_mode: StrategyMode::Precomputed.code(),
                    details:       details(),
                },
            ],
        }
    }
}

