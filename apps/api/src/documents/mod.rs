// Résumé and job-description intake: multipart upload, LLM extraction, raw-text storage.

pub mod handlers;
pub mod upload;
