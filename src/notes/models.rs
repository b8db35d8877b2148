//! Data models for Notes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted title/content record.
///
/// `id` is assigned by the store on insert and never reused. `created_at` is
/// written once; `updated_at` is refreshed on every successful update, so
/// `created_at <= updated_at` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Title/content pair supplied by a caller on create or update.
///
/// Missing fields deserialize as empty strings so they are reported by
/// [`NoteDraft::validate`] instead of being rejected by the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Check that both required fields are present and non-blank.
    pub fn validate(&self) -> Result<(), NoteError> {
        if self.title.trim().is_empty() {
            return Err(NoteError::Validation("Title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(NoteError::Validation("Content is required".to_string()));
        }
        Ok(())
    }
}

/// A note that has not been persisted yet (no id).
///
/// Built by the manager with both timestamps already set; the store assigns
/// the id when inserting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewNote {
    /// Stamp a draft with `now` for both timestamps.
    pub fn from_draft(draft: NoteDraft, now: DateTime<Utc>) -> Self {
        Self {
            title: draft.title,
            content: draft.content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the id handed out by the store.
    pub fn with_id(self, id: i64) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Errors produced by note operations.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("Note not found with id: {0}")]
    NotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Case-insensitive substring test used for title and content search.
///
/// Both sides are lowercased with full Unicode case mapping, so the predicate
/// behaves the same whether it runs inside SQLite or in memory. An empty
/// needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
