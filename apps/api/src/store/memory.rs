//! In-memory `RecordStore` with the same id and reference semantics as the
//! Postgres schema: 1-based auto-increment ids and a foreign-key check on
//! match scores.

use std::borrow::Cow;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

use crate::models::resume::{JobDescriptionRow, MatchScoreRow, ResumeRow};
use crate::store::RecordStore;

#[derive(Default)]
struct Tables {
    resumes: Vec<ResumeRow>,
    job_descriptions: Vec<JobDescriptionRow>,
    match_scores: Vec<MatchScoreRow>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn match_score_count(&self) -> usize {
        self.tables.lock().unwrap().match_scores.len()
    }
}

fn next_id(len: usize) -> i32 {
    i32::try_from(len + 1).expect("in-memory table exceeded i32 ids")
}

#[derive(Debug, Error)]
#[error("{message}")]
struct MissingReference {
    message: String,
}

impl DatabaseError for MissingReference {
    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("23503"))
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::ForeignKeyViolation
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create_resume(&self, content: &str) -> Result<ResumeRow, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let row = ResumeRow {
            id: next_id(tables.resumes.len()),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        tables.resumes.push(row.clone());
        Ok(row)
    }

    async fn get_resume(&self, id: i32) -> Result<Option<ResumeRow>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.resumes.iter().find(|r| r.id == id).cloned())
    }

    async fn create_job_description(
        &self,
        content: &str,
    ) -> Result<JobDescriptionRow, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let row = JobDescriptionRow {
            id: next_id(tables.job_descriptions.len()),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        tables.job_descriptions.push(row.clone());
        Ok(row)
    }

    async fn get_job_description(
        &self,
        id: i32,
    ) -> Result<Option<JobDescriptionRow>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.job_descriptions.iter().find(|j| j.id == id).cloned())
    }

    async fn create_match_score(
        &self,
        resume_id: i32,
        job_id: i32,
        score: f64,
    ) -> Result<MatchScoreRow, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let resume_exists = tables.resumes.iter().any(|r| r.id == resume_id);
        let job_exists = tables.job_descriptions.iter().any(|j| j.id == job_id);
        if !(resume_exists && job_exists) {
            return Err(sqlx::Error::Database(Box::new(MissingReference {
                message: format!(
                    "match_scores references missing resume {resume_id} or job {job_id}"
                ),
            })));
        }

        let row = MatchScoreRow {
            id: next_id(tables.match_scores.len()),
            resume_id,
            job_id,
            score,
            created_at: Utc::now(),
        };
        tables.match_scores.push(row.clone());
        Ok(row)
    }

    async fn list_match_scores(
        &self,
        resume_id: i32,
        job_id: i32,
    ) -> Result<Vec<MatchScoreRow>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .match_scores
            .iter()
            .filter(|m| m.resume_id == resume_id && m.job_id == job_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::is_foreign_key_violation;

    #[tokio::test]
    async fn test_ids_start_at_one_and_increment() {
        let store = MemoryStore::new();
        assert_eq!(store.create_resume("a").await.unwrap().id, 1);
        assert_eq!(store.create_resume("b").await.unwrap().id, 2);
        assert_eq!(store.create_job_description("c").await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_content_round_trips() {
        let store = MemoryStore::new();
        let text = "Rust • Go\n\tnaïve café 🚀";
        let created = store.create_resume(text).await.unwrap();
        let fetched = store.get_resume(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.content, text);
        assert!(store.get_resume(created.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_match_score_requires_existing_records() {
        let store = MemoryStore::new();
        store.create_resume("resume").await.unwrap();

        let err = store.create_match_score(1, 1, 0.5).await.unwrap_err();
        assert!(is_foreign_key_violation(&err), "{err:?}");
        assert_eq!(store.match_score_count(), 0);
    }

    #[tokio::test]
    async fn test_match_scores_append_without_dedup() {
        let store = MemoryStore::new();
        store.create_resume("resume").await.unwrap();
        store.create_job_description("job").await.unwrap();

        store.create_match_score(1, 1, 0.8).await.unwrap();
        store.create_match_score(1, 1, 0.8).await.unwrap();

        let rows = store.list_match_scores(1, 1).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[1].id, 2);
        assert!(store.list_match_scores(1, 2).await.unwrap().is_empty());
    }
}
