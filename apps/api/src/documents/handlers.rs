//! Axum route handlers for résumé and job-description uploads.

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::PathRejection, Multipart, Path, State,
    },
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::documents::upload::{read_text_upload, JD_FIELDS, RESUME_FIELDS};
use crate::errors::AppError;
use crate::llm_client::prompts::{render, JD_EXTRACT_PROMPT, RESUME_EXTRACT_PROMPT};
use crate::models::resume::{JobDescriptionRow, ResumeRow};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub resume_id: i32,
    pub parsed_data: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeJdResponse {
    pub job_id: i32,
    pub analyzed_data: String,
}

/// POST /parse-resume
///
/// Extracts skills and experience from an uploaded résumé and stores the raw text.
/// The extracted text is returned but not stored.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
    let content = read_text_upload(&mut multipart, RESUME_FIELDS).await?;

    let parsed_data = state
        .extractor
        .extract(&render(RESUME_EXTRACT_PROMPT, &content))
        .await?;

    let resume = state.store.create_resume(&content).await?;
    info!("Stored resume {} ({} bytes)", resume.id, content.len());

    Ok(Json(ParseResumeResponse {
        resume_id: resume.id,
        parsed_data,
    }))
}

/// POST /analyze-jd
///
/// Extracts key requirements from an uploaded job description and stores the raw text.
pub async fn handle_analyze_jd(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeJdResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
    let content = read_text_upload(&mut multipart, JD_FIELDS).await?;

    let analyzed_data = state
        .extractor
        .extract(&render(JD_EXTRACT_PROMPT, &content))
        .await?;

    let job = state.store.create_job_description(&content).await?;
    info!("Stored job description {} ({} bytes)", job.id, content.len());

    Ok(Json(AnalyzeJdResponse {
        job_id: job.id,
        analyzed_data,
    }))
}

/// GET /resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ResumeRow>, AppError> {
    let Path(id) = id.map_err(|e| AppError::Validation(e.body_text()))?;
    let resume = state
        .store
        .get_resume(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(resume))
}

/// GET /job-descriptions/:id
pub async fn handle_get_job_description(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<JobDescriptionRow>, AppError> {
    let Path(id) = id.map_err(|e| AppError::Validation(e.body_text()))?;
    let job = state
        .store
        .get_job_description(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job description {id} not found")))?;
    Ok(Json(job))
}
