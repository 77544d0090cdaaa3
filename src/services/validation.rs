use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::domain::{Question, Segment};
use crate::models::domain::segment::SEGMENT_KINDS;

/// Checks one extracted candidate against the question invariants. A failed
/// check rejects the candidate as a whole; there is no partial repair beyond
/// the id leniency handled by `validate_batch`.
pub fn validate_candidate(candidate: &Value) -> Result<Question, String> {
    let object = candidate
        .as_object()
        .ok_or_else(|| "candidate is not an object".to_string())?;

    let raw_segments = object
        .get("questionText")
        .and_then(Value::as_array)
        .ok_or_else(|| "questionText must be an array of segments".to_string())?;
    if raw_segments.is_empty() {
        return Err("questionText must not be empty".to_string());
    }

    let mut question_text = Vec::with_capacity(raw_segments.len());
    for raw_segment in raw_segments {
        question_text.push(parse_segment(raw_segment)?);
    }
    if !question_text.iter().any(Segment::has_content) {
        return Err("questionText has no segment with non-empty content".to_string());
    }
    for segment in &question_text {
        if !segment.table_rows_consistent() {
            log::debug!("table segment has inconsistent cell counts, keeping it");
        }
    }

    let raw_options = object
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| "options must be an array".to_string())?;
    if raw_options.len() < 2 {
        return Err(format!(
            "expected at least 2 options, got {}",
            raw_options.len()
        ));
    }
    let mut options = Vec::with_capacity(raw_options.len());
    for raw_option in raw_options {
        let option = raw_option
            .as_str()
            .ok_or_else(|| "options must be strings".to_string())?;
        if option.trim().is_empty() {
            return Err("options cannot be empty".to_string());
        }
        options.push(option.to_string());
    }

    let correct_option = object
        .get("correctOption")
        .and_then(Value::as_i64)
        .ok_or_else(|| "correctOption must be an integer".to_string())?;
    if correct_option < 0 || correct_option as usize >= options.len() {
        return Err(format!(
            "correctOption {} is outside the range of {} options",
            correct_option,
            options.len()
        ));
    }

    let explanation = object
        .get("explanation")
        .and_then(Value::as_str)
        .ok_or_else(|| "explanation must be a string".to_string())?
        .to_string();

    // Identity is a convenience field; absence is resolved by the batch, not
    // by rejection.
    let id = object
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    // Model-authored content carries no marks; a well-formed non-negative
    // value is kept if one appears.
    let marks = object
        .get("marks")
        .and_then(Value::as_i64)
        .filter(|marks| *marks >= 0)
        .unwrap_or(0) as i32;

    Ok(Question {
        id,
        question_text,
        options,
        correct_option: correct_option as usize,
        explanation,
        marks,
    })
}

fn parse_segment(raw: &Value) -> Result<Segment, String> {
    let object = raw
        .as_object()
        .ok_or_else(|| "segment is not an object".to_string())?;

    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| "segment is missing a type".to_string())?;

    let content = object
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| format!("'{}' segment is missing content", kind))?
        .to_string();

    match kind {
        "text" => Ok(Segment::Text { content }),
        "code" => {
            let lang = object
                .get("lang")
                .and_then(Value::as_str)
                .ok_or_else(|| "code segment requires a lang".to_string())?
                .to_string();
            Ok(Segment::Code { content, lang })
        }
        "table" => Ok(Segment::Table { content }),
        "image" => Ok(Segment::Image { content }),
        "math" => Ok(Segment::Math { content }),
        other => Err(format!(
            "unknown segment type '{}', expected one of {:?}",
            other, SEGMENT_KINDS
        )),
    }
}

/// Validates every candidate independently, dropping rejects from the batch.
/// Accepted questions with a missing or colliding id get a freshly generated
/// one. Partial loss is preferred over failing the whole batch.
pub fn validate_batch(candidates: Vec<Value>) -> Vec<Question> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut accepted = Vec::with_capacity(candidates.len());

    for (index, candidate) in candidates.into_iter().enumerate() {
        match validate_candidate(&candidate) {
            Ok(mut question) => {
                if question.id.trim().is_empty() || seen_ids.contains(&question.id) {
                    question.id = Uuid::new_v4().to_string();
                }
                seen_ids.insert(question.id.clone());
                accepted.push(question);
            }
            Err(reason) => {
                log::debug!("dropping candidate {}: {}", index, reason);
            }
        }
    }

    accepted
}
