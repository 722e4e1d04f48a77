//! Minutes request: transcript plus meeting context

use serde::{Deserialize, Serialize};

/// Meeting metadata embedded in the prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MeetingInfo {
    pub title: String,
    /// Free-form date as shown to participants
    pub date: String,
    #[serde(default)]
    pub committee: Option<String>,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl MeetingInfo {
    #[must_use]
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_committee(mut self, committee: impl Into<String>) -> Self {
        self.committee = Some(committee.into());
        self
    }

    #[must_use]
    pub fn with_participants(mut self, participants: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.participants = participants.into_iter().map(Into::into).collect();
        self
    }
}

/// Agenda entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub title: String,
    #[serde(default)]
    pub presenter: Option<String>,
}

impl AgendaItem {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            presenter: None,
        }
    }

    #[must_use]
    pub fn with_presenter(mut self, presenter: impl Into<String>) -> Self {
        self.presenter = Some(presenter.into());
        self
    }
}

/// Everything needed to draft the minutes of one meeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinutesRequest {
    pub transcript: String,
    pub meeting: MeetingInfo,
    #[serde(default)]
    pub agenda: Vec<AgendaItem>,
}

impl MinutesRequest {
    #[must_use]
    pub fn new(transcript: impl Into<String>, meeting: MeetingInfo) -> Self {
        Self {
            transcript: transcript.into(),
            meeting,
            agenda: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_agenda(mut self, agenda: Vec<AgendaItem>) -> Self {
        self.agenda = agenda;
        self
    }
}
