//! Decision log: one row per classified profile.

use super::Store;
use async_trait::async_trait;
use cardsift_core::{error::SiftError, event::DecisionRecord, traits::DecisionRecorder};
use tracing::debug;
use uuid::Uuid;

/// A stored decision, as read back from the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRow {
    pub id: String,
    pub ts: String,
    pub source_bot: String,
    pub action: String,
    pub reason: String,
    pub matched_include: Vec<String>,
    pub matched_exclude: Vec<String>,
    pub text: String,
}

/// Per-action totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionCounts {
    pub like: i64,
    pub skip: i64,
    pub total: i64,
}

fn split_list(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(',').map(str::to_string).collect()
}

impl Store {
    /// Append a decision to the log.
    pub async fn store_decision(&self, record: &DecisionRecord) -> Result<(), SiftError> {
        let id = Uuid::new_v4().to_string();
        let ts = record.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string();

        sqlx::query(
            "INSERT INTO decisions \
             (id, ts, source_bot, action, reason, matched_include, matched_exclude, text) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&ts)
        .bind(&record.source)
        .bind(record.action.as_str())
        .bind(&record.reason)
        .bind(record.matched_include.join(","))
        .bind(record.matched_exclude.join(","))
        .bind(&record.text)
        .execute(&self.pool)
        .await
        .map_err(|e| SiftError::Memory(format!("decision write failed: {e}")))?;

        debug!(
            "decision: {} {} [{}]",
            record.source, record.action, record.reason
        );

        Ok(())
    }

    /// Most recent decisions, newest first.
    pub async fn recent_decisions(&self, limit: i64) -> Result<Vec<DecisionRow>, SiftError> {
        let rows: Vec<(String, String, String, String, String, String, String, String)> =
            sqlx::query_as(
                "SELECT id, ts, source_bot, action, reason, matched_include, matched_exclude, text \
                 FROM decisions ORDER BY ts DESC, rowid DESC LIMIT ?",
            )
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SiftError::Memory(format!("decision query failed: {e}")))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, ts, source_bot, action, reason, incl, excl, text)| DecisionRow {
                    id,
                    ts,
                    source_bot,
                    action,
                    reason,
                    matched_include: split_list(&incl),
                    matched_exclude: split_list(&excl),
                    text,
                },
            )
            .collect())
    }

    /// Totals per action across the whole log.
    pub async fn decision_counts(&self) -> Result<DecisionCounts, SiftError> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT action, COUNT(*) FROM decisions GROUP BY action")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| SiftError::Memory(format!("decision count failed: {e}")))?;

        let mut counts = DecisionCounts::default();
        for (action, n) in rows {
            match action.as_str() {
                "like" => counts.like = n,
                "skip" => counts.skip = n,
                _ => {}
            }
            counts.total += n;
        }
        Ok(counts)
    }
}

#[async_trait]
impl DecisionRecorder for Store {
    async fn record(&self, record: &DecisionRecord) -> Result<(), SiftError> {
        self.store_decision(record).await
    }
}
