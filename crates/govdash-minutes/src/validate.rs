//! Strict validation of model output
//!
//! The model is asked for bare JSON but often wraps it in a Markdown code
//! fence. The fence is stripped; the object inside must then match
//! [`MinutesDocument`] exactly, with no missing or extra keys.

use crate::error::{MinutesError, MinutesResult};
use serde::{Deserialize, Serialize};

/// Drafted minutes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MinutesDocument {
    pub executive_summary: String,
    pub structured_minutes: String,
    pub action_plan: Vec<ActionItem>,
}

/// One follow-up action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionItem {
    pub task: String,
    pub owner: String,
    pub deadline: String,
}

/// Remove a surrounding ```` ``` ```` / ```` ```json ```` fence, if any
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string (e.g. `json`) on the opening line
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse and validate a model response
///
/// # Errors
/// Returns [`MinutesError::Validation`] if the text is not exactly the
/// expected JSON object
pub fn validate_response(text: &str) -> MinutesResult<MinutesDocument> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(MinutesError::validation("empty response"));
    }
    serde_json::from_str(body).map_err(|e| MinutesError::validation(e.to_string()))
}
