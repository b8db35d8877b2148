//! SQLite implementation of NoteStore
//!
//! One `rusqlite::Connection` behind a mutex. Every call runs on the blocking
//! pool so the async runtime threads never wait on disk I/O.

use super::traits::NoteStore;
use crate::notes::{contains_ignore_case, NewNote, Note};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

/// Path value that selects a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

const NOTE_COLUMNS: &str = "id, title, content, created_at, updated_at";

/// SQLite-backed note store.
#[derive(Clone)]
pub struct SqliteNoteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteNoteStore {
    /// Open (or create) the database at `path` and bootstrap the schema.
    ///
    /// `":memory:"` opens a throwaway in-memory database.
    pub fn open(path: &str) -> Result<Self> {
        let conn = if path == IN_MEMORY {
            Connection::open_in_memory().context("Failed to open in-memory database")?
        } else {
            let conn = Connection::open(path)
                .with_context(|| format!("Failed to open note database at {}", path))?;
            conn.execute_batch("PRAGMA journal_mode=WAL;")?;
            conn
        };

        register_functions(&conn)?;
        init_schema(&conn)?;

        tracing::debug!(path = %path, "Note store ready");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| anyhow!("Note database mutex poisoned"))?;
            f(&guard)
        })
        .await
        .context("Note database task panicked")?
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    // AUTOINCREMENT guarantees ids of deleted notes are never handed out again.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create notes table")?;
    Ok(())
}

/// Expose the shared search predicate to SQL as `contains_ignore_case(haystack, needle)`.
///
/// SQLite's own `LIKE`/`lower()` only fold ASCII, so the Rust predicate is
/// used to keep both store implementations in agreement.
fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "contains_ignore_case",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack = ctx.get::<String>(0)?;
            let needle = ctx.get::<String>(1)?;
            Ok(contains_ignore_case(&haystack, &needle))
        },
    )
    .context("Failed to register contains_ignore_case")?;
    Ok(())
}

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

fn query_notes(conn: &Connection, sql: &str, query: Option<&str>) -> Result<Vec<Note>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = match query {
        Some(q) => stmt.query_map([q], row_to_note)?,
        None => stmt.query_map([], row_to_note)?,
    };
    let notes = rows.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(notes)
}

#[async_trait]
impl NoteStore for SqliteNoteStore {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        self.with_conn(|conn| {
            query_notes(
                conn,
                &format!("SELECT {} FROM notes ORDER BY id", NOTE_COLUMNS),
                None,
            )
        })
        .await
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>> {
        self.with_conn(move |conn| {
            let note = conn
                .query_row(
                    &format!("SELECT {} FROM notes WHERE id = ?1", NOTE_COLUMNS),
                    [id],
                    row_to_note,
                )
                .optional()?;
            Ok(note)
        })
        .await
    }

    async fn find_by_title_containing(&self, query: &str) -> Result<Vec<Note>> {
        let query = query.to_string();
        self.with_conn(move |conn| {
            query_notes(
                conn,
                &format!(
                    "SELECT {} FROM notes WHERE contains_ignore_case(title, ?1) ORDER BY id",
                    NOTE_COLUMNS
                ),
                Some(&query),
            )
        })
        .await
    }

    async fn find_by_content_containing(&self, query: &str) -> Result<Vec<Note>> {
        let query = query.to_string();
        self.with_conn(move |conn| {
            query_notes(
                conn,
                &format!(
                    "SELECT {} FROM notes WHERE contains_ignore_case(content, ?1) ORDER BY id",
                    NOTE_COLUMNS
                ),
                Some(&query),
            )
        })
        .await
    }

    async fn insert_note(&self, note: NewNote) -> Result<Note> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO notes (title, content, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![note.title, note.content, note.created_at, note.updated_at],
            )
            .context("Failed to insert note")?;
            let id = conn.last_insert_rowid();
            Ok(note.with_id(id))
        })
        .await
    }

    async fn save_note(&self, note: &Note) -> Result<Option<Note>> {
        let note = note.clone();
        self.with_conn(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE notes SET title = ?2, content = ?3, updated_at = ?4 WHERE id = ?1",
                    params![note.id, note.title, note.content, note.updated_at],
                )
                .context("Failed to update note")?;
            Ok((changed > 0).then_some(note))
        })
        .await
    }

    async fn delete_note(&self, id: i64) -> Result<bool> {
        self.with_conn(move |conn| {
            let changed = conn
                .execute("DELETE FROM notes WHERE id = ?1", [id])
                .context("Failed to delete note")?;
            Ok(changed > 0)
        })
        .await
    }

    async fn health_check(&self) -> Result<bool> {
        self.with_conn(|conn| {
            let one: i64 = conn.query_row("SELECT 1", [], |row| row.get(0))?;
            Ok(one == 1)
        })
        .await
    }
}
