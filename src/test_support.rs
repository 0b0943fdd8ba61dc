//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`). The fakes
//! are cheap handles over shared state: hand one clone to the code under
//! test and keep another to inspect afterwards.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::core::editor::Editor;
use crate::core::notes::{Note, NoteId};
use crate::store::{NoteStore, StoreError};
use crate::tui::event::KeySource;

/// In-memory output sink for a `Screen`.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    /// How many error boxes were drawn.
    pub fn error_boxes(&self) -> usize {
        self.contents().matches("\x1b[41m").count()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Keypresses played back in order. Running out is an EOF error, so a
/// script that forgets to quit fails instead of hanging.
#[derive(Clone)]
pub struct ScriptedKeys {
    keys: Rc<RefCell<VecDeque<Vec<u8>>>>,
}

impl ScriptedKeys {
    pub fn new<S: AsRef<str>>(keys: &[S]) -> Self {
        Self {
            keys: Rc::new(RefCell::new(
                keys.iter().map(|k| k.as_ref().as_bytes().to_vec()).collect(),
            )),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.borrow().len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_raw(&mut self) -> io::Result<Vec<u8>> {
        self.keys
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted keys"))
    }
}

/// Each character of `text` as its own keypress.
pub fn typed(text: &str) -> Vec<String> {
    text.chars().map(String::from).collect()
}

#[derive(Default)]
struct FakeStoreState {
    notes: Vec<Note>,
    contents: HashMap<NoteId, Vec<u8>>,
    failing: HashSet<&'static str>,
    calls: Vec<String>,
    next_id: NoteId,
}

/// In-memory `NoteStore` with a call log and per-operation failures.
#[derive(Clone, Default)]
pub struct FakeStore {
    state: Rc<RefCell<FakeStoreState>>,
}

impl FakeStore {
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let next_id = notes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        let store = Self::default();
        {
            let mut state = store.state.borrow_mut();
            state.notes = notes;
            state.next_id = next_id;
        }
        store
    }

    /// Make every later call to `operation` fail with a network error.
    pub fn fail(&self, operation: &'static str) {
        self.state.borrow_mut().failing.insert(operation);
    }

    pub fn set_content(&self, id: NoteId, content: &[u8]) {
        self.state.borrow_mut().contents.insert(id, content.to_vec());
    }

    pub fn content(&self, id: NoteId) -> Option<Vec<u8>> {
        self.state.borrow().contents.get(&id).cloned()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.state.borrow().notes.clone()
    }

    /// Names of the operations called so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn called(&self, operation: &str) -> bool {
        self.state.borrow().calls.iter().any(|c| c == operation)
    }

    fn begin(&self, operation: &'static str) -> Result<(), StoreError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(operation.to_string());
        if state.failing.contains(operation) {
            return Err(StoreError::Network(format!("simulated {operation} failure")));
        }
        Ok(())
    }

    fn find(&self, id: NoteId) -> Result<Note, StoreError> {
        self.state
            .borrow()
            .notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }
}

impl NoteStore for FakeStore {
    fn name(&self) -> &str {
        "fake"
    }

    fn list_notes(&mut self) -> Result<Vec<Note>, StoreError> {
        self.begin("list_notes")?;
        Ok(self.notes())
    }

    fn get_note(&mut self, id: NoteId) -> Result<Note, StoreError> {
        self.begin("get_note")?;
        self.find(id)
    }

    fn get_note_content(&mut self, id: NoteId) -> Result<Vec<u8>, StoreError> {
        self.begin("get_note_content")?;
        self.find(id)?;
        Ok(self.content(id).unwrap_or_default())
    }

    fn create_note(&mut self, title: &str) -> Result<Note, StoreError> {
        self.begin("create_note")?;
        let mut state = self.state.borrow_mut();
        let note = Note::new(state.next_id, title);
        state.next_id += 1;
        state.notes.push(note.clone());
        Ok(note)
    }

    fn update_note(&mut self, id: NoteId, title: &str) -> Result<(), StoreError> {
        self.begin("update_note")?;
        let mut state = self.state.borrow_mut();
        let note = state
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::NotFound(id))?;
        note.title = title.to_string();
        Ok(())
    }

    fn update_note_content(&mut self, id: NoteId, content: &[u8]) -> Result<(), StoreError> {
        self.begin("update_note_content")?;
        self.find(id)?;
        self.set_content(id, content);
        Ok(())
    }

    fn delete_note(&mut self, id: NoteId) -> Result<(), StoreError> {
        self.begin("delete_note")?;
        let mut state = self.state.borrow_mut();
        let before = state.notes.len();
        state.notes.retain(|n| n.id != id);
        if state.notes.len() == before {
            return Err(StoreError::NotFound(id));
        }
        state.contents.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
struct FakeEditorState {
    /// Path and the file's content at the moment the editor opened it.
    opened: Vec<(PathBuf, Vec<u8>)>,
    edits: VecDeque<Vec<u8>>,
    fail_to_start: bool,
}

/// Editor that records what it was shown and optionally saves new content.
#[derive(Clone, Default)]
pub struct FakeEditor {
    state: Rc<RefCell<FakeEditorState>>,
}

impl FakeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `edit` call overwrites the file with `content`.
    pub fn will_write(&self, content: &[u8]) {
        self.state.borrow_mut().edits.push_back(content.to_vec());
    }

    pub fn fail_to_start(&self) {
        self.state.borrow_mut().fail_to_start = true;
    }

    pub fn opened(&self) -> Vec<(PathBuf, Vec<u8>)> {
        self.state.borrow().opened.clone()
    }
}

impl Editor for FakeEditor {
    fn edit(&mut self, path: &Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_to_start {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "could not start editor 'fake': not found",
            ));
        }
        state.opened.push((path.to_path_buf(), fs::read(path)?));
        if let Some(content) = state.edits.pop_front() {
            fs::write(path, content)?;
        }
        Ok(())
    }
}
