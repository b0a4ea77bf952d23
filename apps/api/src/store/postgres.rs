use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::resume::{JobDescriptionRow, MatchScoreRow, ResumeRow};
use crate::store::RecordStore;

/// PostgreSQL-backed store. Each call checks a connection out of the pool and
/// returns it when the call completes, on success or failure.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn create_resume(&self, content: &str) -> Result<ResumeRow, sqlx::Error> {
        sqlx::query_as::<_, ResumeRow>(
            "INSERT INTO resumes (content) VALUES ($1) RETURNING id, content, created_at",
        )
        .bind(content)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_resume(&self, id: i32) -> Result<Option<ResumeRow>, sqlx::Error> {
        sqlx::query_as::<_, ResumeRow>("SELECT id, content, created_at FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_job_description(
        &self,
        content: &str,
    ) -> Result<JobDescriptionRow, sqlx::Error> {
        sqlx::query_as::<_, JobDescriptionRow>(
            "INSERT INTO job_descriptions (content) VALUES ($1) RETURNING id, content, created_at",
        )
        .bind(content)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_job_description(
        &self,
        id: i32,
    ) -> Result<Option<JobDescriptionRow>, sqlx::Error> {
        sqlx::query_as::<_, JobDescriptionRow>(
            "SELECT id, content, created_at FROM job_descriptions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_match_score(
        &self,
        resume_id: i32,
        job_id: i32,
        score: f64,
    ) -> Result<MatchScoreRow, sqlx::Error> {
        sqlx::query_as::<_, MatchScoreRow>(
            r#"
            INSERT INTO match_scores (resume_id, job_id, score)
            VALUES ($1, $2, $3)
            RETURNING id, resume_id, job_id, score, created_at
            "#,
        )
        .bind(resume_id)
        .bind(job_id)
        .bind(score)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_match_scores(
        &self,
        resume_id: i32,
        job_id: i32,
    ) -> Result<Vec<MatchScoreRow>, sqlx::Error> {
        sqlx::query_as::<_, MatchScoreRow>(
            r#"
            SELECT id, resume_id, job_id, score, created_at
            FROM match_scores
            WHERE resume_id = $1 AND job_id = $2
            ORDER BY id
            "#,
        )
        .bind(resume_id)
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }
}
