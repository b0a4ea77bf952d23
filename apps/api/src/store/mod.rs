//! Record storage for résumés, job descriptions and match scores.
//!
//! Append-only: records are created and read, never updated or deleted.
//! `PgStore` is the production backend; `MemoryStore` backs handler tests.

use async_trait::async_trait;

use crate::models::resume::{JobDescriptionRow, MatchScoreRow, ResumeRow};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

/// Storage contract used by every handler. Carried in `AppState` as `Arc<dyn RecordStore>`.
///
/// Each `create_*` is a single insert: it either stores the whole record and
/// returns it with its assigned id, or stores nothing.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_resume(&self, content: &str) -> Result<ResumeRow, sqlx::Error>;

    async fn get_resume(&self, id: i32) -> Result<Option<ResumeRow>, sqlx::Error>;

    async fn create_job_description(&self, content: &str)
        -> Result<JobDescriptionRow, sqlx::Error>;

    async fn get_job_description(&self, id: i32)
        -> Result<Option<JobDescriptionRow>, sqlx::Error>;

    /// Fails with a foreign-key violation if either id does not exist.
    async fn create_match_score(
        &self,
        resume_id: i32,
        job_id: i32,
        score: f64,
    ) -> Result<MatchScoreRow, sqlx::Error>;

    /// All scores recorded for the pair, oldest first.
    async fn list_match_scores(
        &self,
        resume_id: i32,
        job_id: i32,
    ) -> Result<Vec<MatchScoreRow>, sqlx::Error>;
}

/// True when the error is the storage layer rejecting a dangling reference.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|e| e.is_foreign_key_violation())
}
