//! Normalizes whatever the generator webhook returns into one display string.
//!
//! The response shape is not contractually fixed, so the body is checked against
//! an ordered list of known shapes. Nothing here can fail: the last resort is a
//! fixed placeholder.

use serde::Serialize;
use serde_json::Value;

/// Shown when the body is JSON but carries no letter field.
pub const PENDING_PLACEHOLDER: &str = "Thank you for your submission. Your cover letter is being generated and will be available shortly.";

/// Shown when the body is empty.
pub const RECEIVED_PLACEHOLDER: &str = "Cover letter request received. Processing your request.";

/// JSON fields that may carry the letter, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LetterField {
    #[serde(rename = "coverLetter")]
    CoverLetter,
    #[serde(rename = "output")]
    Output,
}

impl LetterField {
    const PRIORITY: [LetterField; 2] = [LetterField::CoverLetter, LetterField::Output];

    pub fn key(&self) -> &'static str {
        match self {
            LetterField::CoverLetter => "coverLetter",
            LetterField::Output => "output",
        }
    }
}

/// The outcome of normalization, tagged by which shape matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LetterContent {
    StructuredField { field: LetterField, text: String },
    RawText { text: String },
    Placeholder { text: &'static str },
}

impl LetterContent {
    pub fn kind(&self) -> &'static str {
        match self {
            LetterContent::StructuredField { .. } => "structured_field",
            LetterContent::RawText { .. } => "raw_text",
            LetterContent::Placeholder { .. } => "placeholder",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            LetterContent::StructuredField { text, .. } | LetterContent::RawText { text } => text,
            LetterContent::Placeholder { text } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            LetterContent::StructuredField { text, .. } | LetterContent::RawText { text } => text,
            LetterContent::Placeholder { text } => text.to_string(),
        }
    }
}

pub fn normalize_response(body: &str) -> LetterContent {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => structured_field(&value).unwrap_or(LetterContent::Placeholder {
            text: PENDING_PLACEHOLDER,
        }),
        Err(_) if body.is_empty() => LetterContent::Placeholder {
            text: RECEIVED_PLACEHOLDER,
        },
        Err(_) => LetterContent::RawText {
            text: body.to_string(),
        },
    }
}

/// First known field holding a non-empty string. Non-object JSON never matches.
fn structured_field(value: &Value) -> Option<LetterContent> {
    LetterField::PRIORITY.into_iter().find_map(|field| {
        value
            .get(field.key())
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(|text| LetterContent::StructuredField {
                field,
                text: text.to_string(),
            })
    })
}
