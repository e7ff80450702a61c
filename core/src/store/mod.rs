//! SQLite persistence layer.
//!
//! RULE: Only store/ talks to the database.
//! The draw engine sees it through StrategyRepository and never
//! executes SQL directly.

use crate::{
    config::LotteryConfig,
    error::LotteryResult,
    model::{Award, StrategyRich},
    repository::StrategyRepository,
    types::{AwardId, StrategyId},
};
use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;

mod award;
mod strategy;

/// One SQLite connection shared by concurrent draws.
pub struct LotteryStore {
    conn: Mutex<Connection>,
}

impl LotteryStore {
    pub fn open(path: &str) -> LotteryResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> LotteryResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> LotteryResult<()> {
        self.conn()
            .execute_batch(include_str!("../../../migrations/001_lottery.sql"))?;
        Ok(())
    }

    /// Insert every award and strategy in `config`. Rows that already
    /// exist are left alone, so re-seeding never restores spent stock.
    pub fn seed(&self, config: &LotteryConfig) -> LotteryResult<()> {
        for award in &config.awards {
            self.insert_award(award)?;
        }
        for seed in &config.strategies {
            let rich = seed.to_strategy_rich()?;
            self.insert_strategy(&rich.strategy)?;
            for detail in &rich.details {
                self.insert_strategy_detail(detail)?;
            }
        }
        log::debug!(
            "Seeded {} awards and {} strategies",
            config.awards.len(),
            config.strategies.len()
        );
        Ok(())
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }
}

impl StrategyRepository for LotteryStore {
    fn query_strategy_rich(&self, strategy_id: StrategyId) -> LotteryResult<Option<StrategyRich>> {
        let Some(strategy) = self.query_strategy(strategy_id)? else {
            return Ok(None);
        };
        let details = self.query_strategy_detail_list(strategy_id)?;
        Ok(Some(StrategyRich { strategy, details }))
    }

    fn query_award_info(&self, award_id: &str) -> LotteryResult<Option<Award>> {
        self.award(award_id)
    }

    fn query_no_stock_strategy_award_list(&self, strategy_id: StrategyId) -> LotteryResult<Vec<AwardId>> {
        self.no_stock_award_ids(strategy_id)
    }

    fn deduct_stock(&self, strategy_id: StrategyId, award_id: &str) -> LotteryResult<bool> {
        let changed = self.decrement_surplus(strategy_id, award_id)?;
        Ok(changed == 1)
    }
}
