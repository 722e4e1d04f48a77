//! Render -> model -> validate

use crate::error::MinutesResult;
use crate::model::GenerativeModel;
use crate::prompt::render_prompt;
use crate::request::MinutesRequest;
use crate::validate::{validate_response, MinutesDocument};
use std::sync::Arc;

/// Drafts minutes with any [`GenerativeModel`]
#[derive(Clone)]
pub struct MinuteGenerator {
    model: Arc<dyn GenerativeModel>,
}

impl MinuteGenerator {
    #[must_use]
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Draft and validate the minutes of one meeting
    ///
    /// # Errors
    /// Returns the model's error, or [`MinutesError::Validation`](crate::MinutesError::Validation)
    /// if the answer does not have the expected shape
    pub async fn generate(&self, request: &MinutesRequest) -> MinutesResult<MinutesDocument> {
        let prompt = render_prompt(request);
        let text = self.model.generate(&prompt).await?;
        match validate_response(&text) {
            Ok(document) => {
                tracing::info!(
                    meeting = %request.meeting.title,
                    actions = document.action_plan.len(),
                    "minutes generated"
                );
                Ok(document)
            }
            Err(e) => {
                tracing::warn!(meeting = %request.meeting.title, error = %e, "model returned invalid minutes");
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for MinuteGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinuteGenerator").finish_non_exhaustive()
    }
}
