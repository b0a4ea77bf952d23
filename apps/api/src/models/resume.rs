use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobDescriptionRow {
    pub id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// One computed score. Rows are appended on every match; (resume_id, job_id) is not unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MatchScoreRow {
    pub id: i32,
    pub resume_id: i32,
    pub job_id: i32,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}
