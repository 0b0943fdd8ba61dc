//! # Note Stores
//!
//! Where notes live. The UI only ever talks to a [`NoteStore`]; which one
//! is behind it is decided once at startup.
//!
//! - [`RemoteNoteStore`]: the HTTP note service (default).
//! - [`LegacyIndexStore`]: the flat-file `index.txt` used by the old
//!   local-only mode.
//!
//! All operations are synchronous and block the caller.

mod legacy;
mod remote;

pub use legacy::LegacyIndexStore;
pub use remote::RemoteNoteStore;

use std::fmt;
use std::io;

use crate::core::notes::{Note, NoteId};

/// Errors that can occur during store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The service returned a non-success response.
    Api { status: u16, message: String },
    /// Failed to parse the service's response.
    Parse(String),
    /// No note with this id.
    NotFound(NoteId),
    /// Local file operation failed.
    Io(io::Error),
    /// The legacy index file is malformed.
    Index(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Network(msg) => write!(f, "network error: {msg}"),
            StoreError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            StoreError::Parse(msg) => write!(f, "parse error: {msg}"),
            StoreError::NotFound(id) => write!(f, "note {id} not found"),
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Index(msg) => write!(f, "invalid note index: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

pub trait NoteStore {
    /// Short name for logs.
    fn name(&self) -> &str;

    fn list_notes(&mut self) -> Result<Vec<Note>, StoreError>;

    fn get_note(&mut self, id: NoteId) -> Result<Note, StoreError>;

    fn get_note_content(&mut self, id: NoteId) -> Result<Vec<u8>, StoreError>;

    fn create_note(&mut self, title: &str) -> Result<Note, StoreError>;

    fn update_note(&mut self, id: NoteId, title: &str) -> Result<(), StoreError>;

    fn update_note_content(&mut self, id: NoteId, content: &[u8]) -> Result<(), StoreError>;

    fn delete_note(&mut self, id: NoteId) -> Result<(), StoreError>;
}
