//! Quiz payload validation and canonicalization.
//!
//! Clients send quizzes either as a JSON string or as an embedded JSON value.
//! Stored documents always carry a top-level `questions` key; anything else is
//! wrapped as `{ "questions": <value> }`.

use lectern_model::QuizDocument;
use serde_json::{Map, Value};

use super::SyncError;

/// Normalize a descriptor's `quiz` value.
///
/// String values are parsed as JSON text first; any other value is taken as
/// already structured.
pub fn normalize(raw: &Value) -> Result<QuizDocument, SyncError> {
    match raw {
        Value::String(text) => normalize_str(text),
        other => canonicalize(other.clone()),
    }
}

/// Parse and normalize a raw JSON string.
pub fn normalize_str(text: &str) -> Result<QuizDocument, SyncError> {
    let parsed: Value = serde_json::from_str(text)
        .map_err(|err| SyncError::InvalidQuizPayload(err.to_string()))?;
    canonicalize(parsed)
}

fn canonicalize(value: Value) -> Result<QuizDocument, SyncError> {
    if value.is_null() {
        return Err(SyncError::InvalidQuizPayload(
            "quiz payload must not be null".into(),
        ));
    }

    if has_questions_array(&value) {
        return Ok(QuizDocument::from_canonical(value));
    }

    let mut wrapper = Map::new();
    wrapper.insert("questions".into(), value);
    Ok(QuizDocument::from_canonical(Value::Object(wrapper)))
}

fn has_questions_array(value: &Value) -> bool {
    value
        .get("questions")
        .map(Value::is_array)
        .unwrap_or(false)
}
