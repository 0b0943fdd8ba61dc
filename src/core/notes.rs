//! # Note List
//!
//! The in-memory, ordered copy of the notes known this session plus the
//! current selection. It is the only mutable source of truth for display
//! order and selection; everything else reads through it.
//!
//! ```text
//! NoteList
//! ├── notes: Vec<Note>   // display order
//! └── selection: usize   // always < notes.len() unless the list is empty
//! ```

use serde::{Deserialize, Serialize};

pub type NoteId = i64;

/// Reference to a note for list display. Content is fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
}

impl Note {
    pub fn new(id: NoteId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoteList {
    notes: Vec<Note>,
    selection: usize,
}

impl NoteList {
    pub fn new(notes: Vec<Note>) -> Self {
        Self {
            notes,
            selection: 0,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn selected(&self) -> Option<&Note> {
        self.notes.get(self.selection)
    }

    /// Set the selection, clamped into the valid range.
    pub fn select(&mut self, index: usize) {
        self.selection = index.min(self.notes.len().saturating_sub(1));
    }

    /// Move the selection up one row, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        if self.notes.is_empty() {
            return;
        }
        self.selection = if self.selection == 0 {
            self.notes.len() - 1
        } else {
            self.selection - 1
        };
    }

    /// Move the selection down one row, wrapping to the top.
    pub fn select_next(&mut self) {
        if self.notes.is_empty() {
            return;
        }
        self.selection = (self.selection + 1) % self.notes.len();
    }

    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Replace the note at `index`. Out-of-range indices are ignored.
    pub fn replace(&mut self, index: usize, note: Note) {
        if let Some(slot) = self.notes.get_mut(index) {
            *slot = note;
        }
    }

    pub fn set_title(&mut self, index: usize, title: impl Into<String>) {
        if let Some(note) = self.notes.get_mut(index) {
            note.title = title.into();
        }
    }

    /// Remove the note at `index`, keeping earlier notes in place and
    /// shifting later ones down. The selection is clamped afterwards.
    pub fn remove(&mut self, index: usize) -> Option<Note> {
        if index >= self.notes.len() {
            return None;
        }
        let removed = self.notes.remove(index);
        self.select(self.selection);
        Some(removed)
    }

}
