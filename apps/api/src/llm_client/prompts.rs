// Prompt templates for the extraction endpoints.
// `{text}` is replaced with the uploaded document.

pub const EXTRACTION_SYSTEM: &str = "You are a precise recruiting assistant. \
    Summarize only what the document states. \
    Do NOT invent skills, employers, dates or requirements. \
    Respond in plain text, one item per line.";

pub const RESUME_EXTRACT_PROMPT: &str = "Extract skills and experience from this resume: {text}";

pub const JD_EXTRACT_PROMPT: &str =
    "Extract key requirements from this job description: {text}";

/// Fills a template's `{text}` placeholder.
pub fn render(template: &str, text: &str) -> String {
    template.replace("{text}", text)
}
