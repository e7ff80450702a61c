//! Shared primitive types used across the draw engine.

/// Identifier of a configured lottery campaign.
pub type StrategyId = i64;

/// Stable identifier of an award. Persisted as text.
pub type AwardId = String;

/// Identifier of the user a draw is performed for.
pub type UserId = String;
