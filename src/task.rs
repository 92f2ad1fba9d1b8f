use serde::{Deserialize, Serialize};

pub type TaskId = u32;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub is_finished: bool,
    pub is_pinned: bool,
    #[serde(default)]
    pub created_at: String,
}

/// A task being composed before it is handed to the store.
///
/// Drafts carry no id; the store assigns one on create.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DraftTask {
    pub title: String,
    pub is_finished: bool,
    pub is_pinned: bool,
}

impl DraftTask {
    #[must_use]
    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_finished(self, is_finished: bool) -> Self {
        Self {
            is_finished,
            ..self
        }
    }

    #[must_use]
    pub fn with_pinned(self, is_pinned: bool) -> Self {
        Self { is_pinned, ..self }
    }
}
