//! Match scorer: embeds a stored résumé and job description and records their cosine similarity.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::Embedder;
use crate::matching::similarity::cosine_similarity;
use crate::models::resume::MatchScoreRow;
use crate::store::{is_foreign_key_violation, RecordStore};

/// Computes and persists the score for `(resume_id, job_id)`.
///
/// 1. Both records are looked up before any provider call; a missing one is `NotFound`.
/// 2. Résumé then job text are embedded, one fresh provider call each.
/// 3. Cosine similarity in [-1, 1]; a degenerate embedding fails without writing.
/// 4. A new `match_scores` row is appended and returned.
pub async fn compute_match(
    store: &dyn RecordStore,
    embedder: &dyn Embedder,
    resume_id: i32,
    job_id: i32,
) -> Result<MatchScoreRow, AppError> {
    let resume = store
        .get_resume(resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    let job = store
        .get_job_description(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job description {job_id} not found")))?;

    let resume_embedding = embedder.embed(&resume.content).await?;
    let job_embedding = embedder.embed(&job.content).await?;

    let score = cosine_similarity(&resume_embedding, &job_embedding)?;

    let row = store
        .create_match_score(resume_id, job_id, score)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::NotFound(format!(
                    "Resume {resume_id} or job description {job_id} not found"
                ))
            } else {
                AppError::Database(e)
            }
        })?;

    info!(
        "Match score {} recorded for resume {} / job {} (row {})",
        row.score, resume_id, job_id, row.id
    );
    Ok(row)
}
