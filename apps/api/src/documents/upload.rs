use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

/// Field names accepted for a résumé upload.
pub const RESUME_FIELDS: &[&str] = &["file", "resume"];
/// Field names accepted for a job-description upload.
pub const JD_FIELDS: &[&str] = &["file", "jd"];

/// Reads the first multipart field whose name is in `accepted` and decodes it as text.
/// Other fields are skipped.
pub async fn read_text_upload(
    multipart: &mut Multipart,
    accepted: &[&str],
) -> Result<String, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {}", e.body_text())))?
    {
        if !field.name().is_some_and(|name| accepted.contains(&name)) {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {}", e.body_text())))?;
        return decode_text(bytes);
    }

    Err(AppError::Validation(format!(
        "Missing file field (expected one of: {})",
        accepted.join(", ")
    )))
}

/// Uploads must be UTF-8 without NUL bytes (PostgreSQL TEXT cannot hold NUL).
pub fn decode_text(bytes: Bytes) -> Result<String, AppError> {
    let text = String::from_utf8(bytes.to_vec())
        .map_err(|e| AppError::Validation(format!("Upload is not valid UTF-8: {e}")))?;
    if text.contains('\0') {
        return Err(AppError::Validation(
            "Upload contains a NUL byte".to_string(),
        ));
    }
    Ok(text)
}
