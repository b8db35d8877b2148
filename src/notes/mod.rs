//! Notes module
//!
//! Short title/content notes with creation and update timestamps, plus the
//! title/content search used by the API.

pub mod manager;
pub mod models;

pub use manager::{merge_search_results, NoteManager};
pub use models::*;
