//! Legacy flat-file note store.
//!
//! The old local-only mode kept one file per note plus an `index.txt`
//! of title/path pairs under the notes root:
//!
//! ```text
//! title: Groceries
//! path: /home/me/.notes/note001700000000000.txt
//!
//! title: Ideas
//! path: /home/me/.notes/note001700000000123.txt
//! ```
//!
//! Ids are assigned in load order and stay stable for the session.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::{NoteStore, StoreError};
use crate::core::notes::{Note, NoteId};

const INDEX_FILE_NAME: &str = "index.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexEntry {
    id: NoteId,
    title: String,
    path: PathBuf,
}

pub struct LegacyIndexStore {
    root: PathBuf,
    entries: Vec<IndexEntry>,
    next_id: NoteId,
}

impl LegacyIndexStore {
    /// Open (creating if needed) the index under `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        crate::core::paths::create_dir_with_mode(&root, 0o700)?;
        let index_path = root.join(INDEX_FILE_NAME);
        let contents = match fs::read_to_string(&index_path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        let pairs = parse_index(&contents)?;
        let entries: Vec<IndexEntry> = pairs
            .into_iter()
            .zip(1..)
            .map(|((title, path), id)| IndexEntry { id, title, path })
            .collect();
        info!("Loaded {} legacy notes from {}", entries.len(), root.display());
        let next_id = entries.len() as NoteId + 1;
        Ok(Self {
            root,
            entries,
            next_id,
        })
    }

    fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE_NAME)
    }

    fn position(&self, id: NoteId) -> Result<usize, StoreError> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn entry(&self, id: NoteId) -> Result<&IndexEntry, StoreError> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Write `entries` as the new index. `self.entries` is only replaced by
    /// the caller once this succeeds.
    fn save_index(&self, entries: &[IndexEntry]) -> Result<(), StoreError> {
        let mut out = String::new();
        for entry in entries {
            out.push_str(&format!("title: {}\n", entry.title));
            out.push_str(&format!("path: {}\n", entry.path.display()));
            out.push('\n');
        }
        let tmp = self.index_path().with_extension("tmp");
        fs::write(&tmp, out)?;
        fs::rename(&tmp, self.index_path())?;
        debug!("Saved legacy index ({} entries)", entries.len());
        Ok(())
    }
}

impl NoteStore for LegacyIndexStore {
    fn name(&self) -> &str {
        "legacy-index"
    }

    fn list_notes(&mut self) -> Result<Vec<Note>, StoreError> {
        Ok(self
            .entries
            .iter()
            .map(|e| Note::new(e.id, e.title.clone()))
            .collect())
    }

    fn get_note(&mut self, id: NoteId) -> Result<Note, StoreError> {
        let entry = self.entry(id)?;
        Ok(Note::new(entry.id, entry.title.clone()))
    }

    fn get_note_content(&mut self, id: NoteId) -> Result<Vec<u8>, StoreError> {
        let path = &self.entry(id)?.path;
        match fs::read(path) {
            Ok(bytes) => Ok(bytes),
            // Created but never written
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn create_note(&mut self, title: &str) -> Result<Note, StoreError> {
        let path = create_note_file(&self.root)?;
        let id = self.next_id;
        let mut entries = self.entries.clone();
        entries.push(IndexEntry {
            id,
            title: title.to_string(),
            path: path.clone(),
        });
        if let Err(e) = self.save_index(&entries) {
            if let Err(cleanup) = fs::remove_file(&path) {
                warn!(
                    "Failed to remove unindexed note file {}: {}",
                    path.display(),
                    cleanup
                );
            }
            return Err(e);
        }
        self.entries = entries;
        self.next_id += 1;
        Ok(Note::new(id, title))
    }

    fn update_note(&mut self, id: NoteId, title: &str) -> Result<(), StoreError> {
        let position = self.position(id)?;
        let mut entries = self.entries.clone();
        entries[position].title = title.to_string();
        self.save_index(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn update_note_content(&mut self, id: NoteId, content: &[u8]) -> Result<(), StoreError> {
        let path = self.entry(id)?.path.clone();
        fs::write(path, content)?;
        Ok(())
    }

    /// The entry leaves the index first; a file that then cannot be removed
    /// is left behind as an orphan.
    fn delete_note(&mut self, id: NoteId) -> Result<(), StoreError> {
        let position = self.position(id)?;
        let mut entries = self.entries.clone();
        let removed = entries.remove(position);
        self.save_index(&entries)?;
        self.entries = entries;
        match fs::remove_file(&removed.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove note file {}: {}", removed.path.display(), e),
        }
        Ok(())
    }
}

/// Create an empty `note<millis>.txt`, bumping the name on collision.
fn create_note_file(root: &Path) -> Result<PathBuf, StoreError> {
    let mut millis = chrono::Utc::now().timestamp_millis();
    loop {
        let path = root.join(format!("note{millis:015}.txt"));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => return Ok(path),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => millis += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Parse `title:`/`path:` pairs, skipping blank lines between them.
fn parse_index(contents: &str) -> Result<Vec<(String, PathBuf)>, StoreError> {
    let mut lines = contents.lines().filter(|l| !l.trim().is_empty());
    let mut pairs = Vec::new();

    while let Some(title_line) = lines.next() {
        let title = title_line
            .strip_prefix("title:")
            .map(str::trim)
            .ok_or_else(|| StoreError::Index(format!("invalid title string: {title_line}")))?;

        let path_line = lines
            .next()
            .ok_or_else(|| StoreError::Index(format!("no matching path for title: {title}")))?;
        let path = path_line
            .strip_prefix("path:")
            .map(str::trim)
            .ok_or_else(|| StoreError::Index(format!("invalid path string: {path_line}")))?;

        pairs.push((title.to_string(), PathBuf::from(path)));
    }

    Ok(pairs)
}
