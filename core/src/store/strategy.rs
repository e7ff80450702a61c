//! Store methods for strategies and their award stock.

use super::LotteryStore;
use crate::{
    error::LotteryResult,
    model::{Rate, StrategyConfig, StrategyDetail, StrategyMode},
    types::{AwardId, StrategyId},
};
use rusqlite::{params, OptionalExtension};

impl LotteryStore {
    // ── Strategy ──────────────────────────────────────────────────

    pub fn insert_strategy(&self, strategy: &StrategyConfig) -> LotteryResult<()> {
        self.conn().execute(
            "INSERT OR IGNORE INTO strategy (strategy_id, strategy_desc, strategy_mode)
             VALUES (?1, ?2, ?3)",
            params![
                strategy.strategy_id,
                &strategy.strategy_desc,
                strategy.mode.code()
            ],
        )?;
        Ok(())
    }

    /// Insert a strategy row with a raw mode code. Lets tests persist
    /// codes no StrategyMode maps to.
    pub fn insert_strategy_raw(
        &self,
        strategy_id:   StrategyId,
        strategy_desc: &str,
        mode_code:     i64,
    ) -> LotteryResult<()> {
        self.conn().execute(
            "INSERT OR IGNORE INTO strategy (strategy_id, strategy_desc, strategy_mode)
             VALUES (?1, ?2, ?3)",
            params![strategy_id, strategy_desc, mode_code],
        )?;
        Ok(())
    }

    /// Fails with UnknownStrategyMode if the stored code is not recognised.
    pub fn query_strategy(&self, strategy_id: StrategyId) -> LotteryResult<Option<StrategyConfig>> {
        let row: Option<(String, i64)> = self
            .conn()
            .query_row(
                "SELECT strategy_desc, strategy_mode FROM strategy WHERE strategy_id = ?1",
                params![strategy_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((strategy_desc, mode_code)) = row else {
            return Ok(None);
        };
        Ok(Some(StrategyConfig {
            strategy_id,
            strategy_desc,
            mode: StrategyMode::from_code(mode_code)?,
        }))
    }

    // ── Strategy detail ───────────────────────────────────────────

    pub fn insert_strategy_detail(&self, detail: &StrategyDetail) -> LotteryResult<()> {
        self.conn().execute(
            "INSERT OR IGNORE INTO strategy_detail (
                strategy_id, award_id, award_count, award_surplus_count, award_rate
            ) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                detail.strategy_id,
                &detail.award_id,
                detail.award_count,
                detail.award_surplus_count,
                detail.award_rate.as_f64()
            ],
        )?;
        Ok(())
    }

    /// Details in insertion order.
    pub fn query_strategy_detail_list(&self, strategy_id: StrategyId) -> LotteryResult<Vec<StrategyDetail>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT award_id, award_count, award_surplus_count, award_rate
             FROM strategy_detail WHERE strategy_id = ?1
             ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map(params![strategy_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, f64>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(award_id, award_count, award_surplus_count, rate)| {
                let award_rate = Rate::from_f64(&award_id, rate)?;
                Ok(StrategyDetail {
                    strategy_id,
                    award_id,
                    award_count,
                    award_surplus_count,
                    award_rate,
                })
            })
            .collect()
    }

    pub fn no_stock_award_ids(&self, strategy_id: StrategyId) -> LotteryResult<Vec<AwardId>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT award_id FROM strategy_detail
             WHERE strategy_id = ?1 AND award_surplus_count = 0
             ORDER BY id ASC",
        )?;
        let ids = stmt
            .query_map(params![strategy_id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }

    /// Conditional single-statement decrement. Returns rows changed (0 or 1).
    pub fn decrement_surplus(&self, strategy_id: StrategyId, award_id: &str) -> LotteryResult<usize> {
        let changed = self.conn().execute(
            "UPDATE strategy_detail SET award_surplus_count = award_surplus_count - 1
             WHERE strategy_id = ?1 AND award_id = ?2 AND award_surplus_count > 0",
            params![strategy_id, award_id],
        )?;
        Ok(changed)
    }

    /// Remaining stock, or None if the award is not part of the strategy.
    pub fn surplus_count(&self, strategy_id: StrategyId, award_id: &str) -> LotteryResult<Option<i64>> {
        let count = self
            .conn()
            .query_row(
                "SELECT award_surplus_count FROM strategy_detail
                 WHERE strategy_id = ?1 AND award_id = ?2",
                params![strategy_id, award_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(count)
    }
}
