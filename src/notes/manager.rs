//! Note Manager - CRUD and search operations for Notes
//!
//! Owns timestamp management and the search merge. Persistence is delegated
//! to a [`NoteStore`].

use super::models::*;
use crate::store::NoteStore;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;

/// Manager for Note operations
pub struct NoteManager {
    store: Arc<dyn NoteStore>,
}

impl NoteManager {
    /// Create a new NoteManager
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// Access the underlying store (used by the health endpoint).
    pub fn store(&self) -> &Arc<dyn NoteStore> {
        &self.store
    }

    /// Every note, in store order.
    pub async fn list_all(&self) -> Result<Vec<Note>, NoteError> {
        Ok(self.store.list_notes().await?)
    }

    /// Get a note by id, or `NoteError::NotFound`.
    pub async fn get_by_id(&self, id: i64) -> Result<Note, NoteError> {
        self.store
            .get_note(id)
            .await?
            .ok_or(NoteError::NotFound(id))
    }

    /// Search titles and contents for `query`, ignoring case.
    ///
    /// Title matches come first, then content matches; a note matching both
    /// is dropped from the title group and appears only at its position in
    /// the content group.
    pub async fn search(&self, query: &str) -> Result<Vec<Note>, NoteError> {
        let title_matches = self.store.find_by_title_containing(query).await?;
        let content_matches = self.store.find_by_content_containing(query).await?;

        let results = merge_search_results(title_matches, content_matches);
        tracing::debug!(query = %query, hits = results.len(), "Note search");
        Ok(results)
    }

    /// Validate a draft, stamp both timestamps and persist it.
    pub async fn create(&self, draft: NoteDraft) -> Result<Note, NoteError> {
        draft.validate()?;

        let note = self
            .store
            .insert_note(NewNote::from_draft(draft, Utc::now()))
            .await?;

        tracing::info!(note_id = note.id, "Created note");
        Ok(note)
    }

    /// Replace title and content of an existing note and refresh `updated_at`.
    pub async fn update(&self, id: i64, draft: NoteDraft) -> Result<Note, NoteError> {
        draft.validate()?;

        let mut note = self.get_by_id(id).await?;
        note.title = draft.title;
        note.content = draft.content;
        // Never move updated_at backwards, even if the wall clock does.
        note.updated_at = Utc::now().max(note.updated_at);

        // The note can vanish between the read and the write.
        let saved = self
            .store
            .save_note(&note)
            .await?
            .ok_or(NoteError::NotFound(id))?;

        tracing::info!(note_id = id, "Updated note");
        Ok(saved)
    }

    /// Permanently remove a note.
    pub async fn delete(&self, id: i64) -> Result<(), NoteError> {
        if !self.store.delete_note(id).await? {
            return Err(NoteError::NotFound(id));
        }

        tracing::info!(note_id = id, "Deleted note");
        Ok(())
    }
}

/// Combine title and content matches as `(title - content) ++ content`.
///
/// Each group keeps the order it came in. Identity is the note id.
pub fn merge_search_results(title_matches: Vec<Note>, content_matches: Vec<Note>) -> Vec<Note> {
    let content_ids: HashSet<i64> = content_matches.iter().map(|n| n.id).collect();

    let mut results: Vec<Note> = title_matches
        .into_iter()
        .filter(|n| !content_ids.contains(&n.id))
        .collect();
    results.extend(content_matches);
    results
}
