//! In-memory mock implementation of NoteStore for testing.
//!
//! Notes live in a `tokio::sync::RwLock<BTreeMap<i64, Note>>`, so iteration
//! order is ascending id just like the SQLite store.

use super::traits::NoteStore;
use crate::notes::{contains_ignore_case, NewNote, Note};
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use tokio::sync::RwLock;

/// In-memory mock implementation of NoteStore.
pub struct MockNoteStore {
    pub notes: RwLock<BTreeMap<i64, Note>>,
    next_id: AtomicI64,
    unavailable: AtomicBool,
}

impl MockNoteStore {
    /// Create a new empty MockNoteStore.
    pub fn new() -> Self {
        Self {
            notes: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail, as if the database went away.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            bail!("mock note store is unavailable");
        }
        Ok(())
    }

    async fn filter<P>(&self, predicate: P) -> Result<Vec<Note>>
    where
        P: Fn(&Note) -> bool,
    {
        self.check_available()?;
        Ok(self
            .notes
            .read()
            .await
            .values()
            .filter(|n| predicate(n))
            .cloned()
            .collect())
    }
}

impl Default for MockNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoteStore for MockNoteStore {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        self.filter(|_| true).await
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>> {
        self.check_available()?;
        Ok(self.notes.read().await.get(&id).cloned())
    }

    async fn find_by_title_containing(&self, query: &str) -> Result<Vec<Note>> {
        self.filter(|n| contains_ignore_case(&n.title, query)).await
    }

    async fn find_by_content_containing(&self, query: &str) -> Result<Vec<Note>> {
        self.filter(|n| contains_ignore_case(&n.content, query)).await
    }

    async fn insert_note(&self, note: NewNote) -> Result<Note> {
        self.check_available()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let note = note.with_id(id);
        self.notes.write().await.insert(id, note.clone());
        Ok(note)
    }

    async fn save_note(&self, note: &Note) -> Result<Option<Note>> {
        self.check_available()?;
        let mut notes = self.notes.write().await;
        match notes.get_mut(&note.id) {
            Some(existing) => {
                existing.title = note.title.clone();
                existing.content = note.content.clone();
                existing.updated_at = note.updated_at;
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_note(&self, id: i64) -> Result<bool> {
        self.check_available()?;
        Ok(self.notes.write().await.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.unavailable.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::NoteDraft;
    use chrono::Utc;

    #[tokio::test]
    async fn test_ids_are_monotonic_after_delete() {
        let store = MockNoteStore::new();
        let draft = || NewNote::from_draft(NoteDraft::new("t", "c"), Utc::now());

        let a = store.insert_note(draft()).await.unwrap();
        store.delete_note(a.id).await.unwrap();
        let b = store.insert_note(draft()).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let store = MockNoteStore::new();
        store.set_unavailable(true);
        assert!(store.list_notes().await.is_err());
        assert!(!store.health_check().await.unwrap());

        store.set_unavailable(false);
        assert!(store.list_notes().await.unwrap().is_empty());
        assert!(store.health_check().await.unwrap());
    }
}
