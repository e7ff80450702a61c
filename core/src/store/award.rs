use super::LotteryStore;
use crate::{error::LotteryResult, model::Award};
use rusqlite::{params, OptionalExtension};

impl LotteryStore {
    // ── Award ─────────────────────────────────────────────────────

    pub fn insert_award(&self, award: &Award) -> LotteryResult<()> {
        self.conn().execute(
            "INSERT OR IGNORE INTO award (award_id, award_type, award_name, award_content)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                &award.award_id,
                award.award_type,
                &award.award_name,
                &award.award_content
            ],
        )?;
        Ok(())
    }

    pub fn award(&self, award_id: &str) -> LotteryResult<Option<Award>> {
        let award = self
            .conn()
            .query_row(
                "SELECT award_id, award_type, award_name, award_content
                 FROM award WHERE award_id = ?1",
                params![award_id],
                |row| {
                    Ok(Award {
                        award_id:      row.get(0)?,
                        award_type:    row.get(1)?,
                        award_name:    row.get(2)?,
                        award_content: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(award)
    }
}
