// Match scoring: cosine similarity over provider embeddings, persisted per request.

pub mod handlers;
pub mod scorer;
pub mod similarity;
