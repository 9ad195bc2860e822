//! Correction log operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{CategoryCorrectionStats, Correction, CorrectionStats, NewCorrection};

fn correction_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Correction> {
    let created_at_str: String = row.get(7)?;

    Ok(Correction {
        id: row.get(0)?,
        description: row.get(1)?,
        predicted_category: row.get(2)?,
        correct_category: row.get(3)?,
        confidence: row.get(4)?,
        is_applied: row.get(5)?,
        applied_in_version: row.get(6)?,
        created_at: parse_datetime(&created_at_str),
    })
}

const CORRECTION_COLUMNS: &str = "id, description, predicted_category, correct_category, \
     confidence, is_applied, applied_in_version, created_at";

impl Database {
    /// Create a new correction record
    pub fn create_correction(&self, correction: &NewCorrection) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO corrections (
                description, predicted_category, correct_category, confidence
            ) VALUES (?, ?, ?, ?)
            "#,
            params![
                correction.description,
                correction.predicted_category,
                correction.correct_category,
                correction.confidence,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a correction by ID
    pub fn get_correction(&self, id: i64) -> Result<Correction> {
        let conn = self.conn()?;

        conn.query_row(
            &format!("SELECT {CORRECTION_COLUMNS} FROM corrections WHERE id = ?"),
            params![id],
            correction_from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                Error::NotFound(format!("Correction {} not found", id))
            }
            other => other.into(),
        })
    }

    /// List corrections, newest first, with optional category filter
    pub fn list_corrections(
        &self,
        category: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Correction>> {
        let conn = self.conn()?;

        let mut sql = format!("SELECT {CORRECTION_COLUMNS} FROM corrections WHERE 1=1");

        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(cat) = category {
            sql.push_str(" AND correct_category = ?");
            params_vec.push(Box::new(cat.to_string()));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?");
        params_vec.push(Box::new(limit));
        params_vec.push(Box::new(offset));

        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let corrections = stmt
            .query_map(params_refs.as_slice(), correction_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(corrections)
    }

    /// List corrections not yet consumed by a training run, oldest first
    ///
    /// Oldest-first ordering means that when a retrain caps the batch, the
    /// corrections that have waited longest are applied first.
    pub fn list_unused_corrections(&self, limit: i64) -> Result<Vec<Correction>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {CORRECTION_COLUMNS} FROM corrections \
             WHERE is_applied = 0 ORDER BY created_at ASC, id ASC LIMIT ?"
        ))?;

        let corrections = stmt
            .query_map(params![limit], correction_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(corrections)
    }

    /// List corrections already folded into the model, oldest first
    pub fn list_applied_corrections(&self) -> Result<Vec<Correction>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {CORRECTION_COLUMNS} FROM corrections \
             WHERE is_applied = 1 ORDER BY created_at ASC, id ASC"
        ))?;

        let corrections = stmt
            .query_map([], correction_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(corrections)
    }

    /// Mark every correction as unapplied again
    ///
    /// Used by a model reset: the log survives, and each correction becomes
    /// eligible for the next retrain.
    pub fn reset_correction_flags(&self) -> Result<usize> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE corrections SET is_applied = 0, applied_in_version = NULL WHERE is_applied = 1",
            [],
        )?;
        Ok(changed)
    }

    /// Mark a batch of corrections as applied in a model version
    ///
    /// Runs in a single transaction: either every correction in the batch is
    /// marked or none is.
    pub fn mark_corrections_applied(&self, ids: &[i64], version: i64) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        {
            let mut stmt = tx.prepare(
                "UPDATE corrections SET is_applied = 1, applied_in_version = ? WHERE id = ?",
            )?;
            for id in ids {
                stmt.execute(params![version, id])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Delete a correction by ID
    ///
    /// Deleting an already-applied correction does not untrain the model; its
    /// effect fades only when a later retrain runs without it.
    pub fn delete_correction(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        let deleted = conn.execute("DELETE FROM corrections WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Correction {} not found", id)));
        }

        Ok(())
    }

    /// Count corrections not yet consumed by a training run
    pub fn count_unused_corrections(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM corrections WHERE is_applied = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Get correction statistics with a per-category breakdown
    pub fn get_correction_stats(&self) -> Result<CorrectionStats> {
        let conn = self.conn()?;

        let (total, applied): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(is_applied), 0) FROM corrections",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let mut stmt = conn.prepare(
            r#"
            SELECT correct_category, COUNT(*), COALESCE(SUM(is_applied), 0)
            FROM corrections
            GROUP BY correct_category
            ORDER BY COUNT(*) DESC, correct_category ASC
            "#,
        )?;

        let by_category = stmt
            .query_map([], |row| {
                let total: i64 = row.get(1)?;
                let applied: i64 = row.get(2)?;
                Ok(CategoryCorrectionStats {
                    category: row.get(0)?,
                    total,
                    applied,
                    unused: total - applied,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(CorrectionStats {
            total,
            applied,
            unused: total - applied,
            by_category,
        })
    }
}
