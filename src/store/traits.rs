//! NoteStore trait definition
//!
//! Defines the abstract interface for note persistence. The note manager only
//! talks to this trait, so the SQLite adapter and the in-memory mock are
//! interchangeable behind `Arc<dyn NoteStore>`.

use crate::notes::{NewNote, Note};
use anyhow::Result;
use async_trait::async_trait;

/// Abstract interface for note persistence.
///
/// "Store order" below means ascending id, which is insertion order since ids
/// are handed out monotonically.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes in store order.
    async fn list_notes(&self) -> Result<Vec<Note>>;

    /// Get a note by id.
    async fn get_note(&self, id: i64) -> Result<Option<Note>>;

    /// Notes whose title contains `query`, ignoring case, in store order.
    async fn find_by_title_containing(&self, query: &str) -> Result<Vec<Note>>;

    /// Notes whose content contains `query`, ignoring case, in store order.
    async fn find_by_content_containing(&self, query: &str) -> Result<Vec<Note>>;

    /// Insert a new note and return it with its assigned id.
    async fn insert_note(&self, note: NewNote) -> Result<Note>;

    /// Overwrite title, content and timestamps of an existing note.
    ///
    /// Returns `None` when no note has that id.
    async fn save_note(&self, note: &Note) -> Result<Option<Note>>;

    /// Remove a note. Returns whether a row was deleted.
    async fn delete_note(&self, id: i64) -> Result<bool>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> Result<bool>;
}
