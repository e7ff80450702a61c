//! Domain records flowing between the repository, the algorithms
//! and the draw orchestrator.

use crate::{
    error::{LotteryError, LotteryResult},
    types::{AwardId, StrategyId, UserId},
};
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Rate ───────────────────────────────────────────────────────────

/// An award probability weight in `[0, 1]`, held as a fixed-point
/// count of ten-thousandths so share arithmetic stays exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(into = "f64")]
pub struct Rate(u32);

impl Rate {
    /// Fixed-point denominator: 1.0 == 10_000.
    pub const SCALE: u32 = 10_000;
    pub const ZERO: Rate = Rate(0);
    pub const ONE: Rate = Rate(Self::SCALE);

    pub const fn from_ten_thousandths(raw: u32) -> Self {
        Self(raw)
    }

    /// Parse a decimal fraction. Anything outside `[0, 1]` (or NaN) is
    /// rejected; finer precision than four places is rounded half-up.
    pub fn from_f64(award_id: &str, value: f64) -> LotteryResult<Self> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(LotteryError::InvalidRate {
                award_id: award_id.to_string(),
                rate: value,
            });
        }
        Ok(Self((value * Self::SCALE as f64).round() as u32))
    }

    pub const fn ten_thousandths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// Whole percentage points this rate claims in a 1..=100 range,
    /// i.e. `round(rate * 100)`.
    pub const fn percent_points(self) -> u32 {
        (self.0 + 50) / 100
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<Rate> for f64 {
    fn from(rate: Rate) -> f64 {
        rate.as_f64()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.as_f64())
    }
}

// ── Strategy ───────────────────────────────────────────────────────

/// Selects the algorithm variant serving a strategy, and whether that
/// variant needs a precomputed probability index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyMode {
    /// Rescales the remaining awards after exclusions on every draw.
    Dynamic,
    /// Looks the drawn point up in the per-strategy bucket table.
    Precomputed,
}

impl StrategyMode {
    pub const ALL: [StrategyMode; 2] = [StrategyMode::Dynamic, StrategyMode::Precomputed];

    /// Persisted integer code. NEVER renumber: stored rows depend on it.
    pub const fn code(self) -> i64 {
        match self {
            StrategyMode::Dynamic     => 1,
            StrategyMode::Precomputed => 2,
        }
    }

    pub fn from_code(code: i64) -> LotteryResult<Self> {
        match code {
            1 => Ok(StrategyMode::Dynamic),
            2 => Ok(StrategyMode::Precomputed),
            _ => Err(LotteryError::UnknownStrategyMode { code }),
        }
    }

    pub const fn uses_index(self) -> bool {
        matches!(self, StrategyMode::Precomputed)
    }

    pub const fn name(self) -> &'static str {
        match self {
            StrategyMode::Dynamic     => "dynamic",
            StrategyMode::Precomputed => "precomputed",
        }
    }
}

impl fmt::Display for StrategyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyConfig {
    pub strategy_id:   StrategyId,
    pub strategy_desc: String,
    pub mode:          StrategyMode,
}

/// One persisted (strategy, award) row, stock included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyDetail {
    pub strategy_id:         StrategyId,
    pub award_id:            AwardId,
    pub award_count:         i64,
    pub award_surplus_count: i64,
    pub award_rate:          Rate,
}

/// A strategy together with its full detail list, as read for one draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyRich {
    pub strategy: StrategyConfig,
    pub details:  Vec<StrategyDetail>,
}

impl StrategyRich {
    pub fn award_rates(&self) -> Vec<AwardRateInfo> {
        self.details
            .iter()
            .map(|d| AwardRateInfo::new(d.award_id.clone(), d.award_rate))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwardRateInfo {
    pub award_id: AwardId,
    pub rate:     Rate,
}

impl AwardRateInfo {
    pub fn new(award_id: impl Into<AwardId>, rate: Rate) -> Self {
        Self { award_id: award_id.into(), rate }
    }
}

/// Display metadata of an award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub award_id:      AwardId,
    pub award_type:    i64,
    pub award_name:    String,
    pub award_content: String,
}

// ── Draw request / result ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRequest {
    pub user_id:     UserId,
    pub strategy_id: StrategyId,
}

impl DrawRequest {
    pub fn new(user_id: impl Into<UserId>, strategy_id: StrategyId) -> Self {
        Self { user_id: user_id.into(), strategy_id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawState {
    NoWin,
    Win,
}

impl DrawState {
    pub const fn code(self) -> i64 {
        match self {
            DrawState::NoWin => 0,
            DrawState::Win   => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawAwardInfo {
    pub award_id:   AwardId,
    pub award_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub user_id:     UserId,
    pub strategy_id: StrategyId,
    pub state:       DrawState,
    pub award:       Option<DrawAwardInfo>,
}

impl DrawResult {
    pub fn no_win(user_id: UserId, strategy_id: StrategyId) -> Self {
        Self { user_id, strategy_id, state: DrawState::NoWin, award: None }
    }

    pub fn win(user_id: UserId, strategy_id: StrategyId, award: DrawAwardInfo) -> Self {
        Self { user_id, strategy_id, state: DrawState::Win, award: Some(award) }
    }

    pub fn is_win(&self) -> bool {
        self.state == DrawState::Win
    }

    pub fn award_id(&self) -> Option<&str> {
        self.award.as_ref().map(|a| a.award_id.as_str())
    }
}
