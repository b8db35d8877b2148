//! Test helper factories and mock state builders
#![allow(dead_code)]

use crate::api::{NotesState, ServerState};
use crate::completion::{BedrockConfig, MockCompletionClient};
use crate::notes::NewNote;
use crate::store::MockNoteStore;
use crate::{AppState, Config};
use chrono::Utc;
use std::sync::Arc;

// ============================================================================
// Mock state builders
// ============================================================================

/// Config used by mock states: in-memory database, CORS for the dev front end.
pub fn test_config() -> Config {
    Config {
        server_port: 0,
        allowed_origins: vec!["http://localhost:3000".to_string()],
        database_path: ":memory:".to_string(),
        bedrock: BedrockConfig::default(),
        config_yaml_path: None,
    }
}

/// Create a mock AppState with empty in-memory backends
pub fn mock_app_state() -> (AppState, Arc<MockNoteStore>, Arc<MockCompletionClient>) {
    let store = Arc::new(MockNoteStore::new());
    let completion = Arc::new(MockCompletionClient::new());
    let state = AppState {
        store: store.clone(),
        completion: completion.clone(),
        config: Arc::new(test_config()),
    };
    (state, store, completion)
}

/// Server state over mock backends, plus handles to both mocks
pub fn mock_server_state() -> (NotesState, Arc<MockNoteStore>, Arc<MockCompletionClient>) {
    let (app, store, completion) = mock_app_state();
    (Arc::new(ServerState::new(app)), store, completion)
}

// ============================================================================
// Factories
// ============================================================================

/// A not-yet-stored note stamped with the current time
pub fn test_new_note(title: &str, content: &str) -> NewNote {
    let now = Utc::now();
    NewNote {
        title: title.to_string(),
        content: content.to_string(),
        created_at: now,
        updated_at: now,
    }
}
