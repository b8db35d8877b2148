//! Note persistence
//!
//! Follows the project pattern (trait + impl + mock):
//! - `NoteStore` trait: async interface used by the note manager
//! - `SqliteNoteStore`: real implementation on an embedded SQLite database
//! - `MockNoteStore`: in-memory store for tests

pub mod mock;
pub mod sqlite;
pub mod traits;

pub use mock::MockNoteStore;
pub use sqlite::SqliteNoteStore;
pub use traits::NoteStore;
