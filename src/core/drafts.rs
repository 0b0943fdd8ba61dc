//! # Draft Cache
//!
//! Local working copies of notes, keyed by the SHA-256 digest of the remote
//! content they were created from:
//!
//! ```text
//! <drafts-root>/note-<64 hex digits>.txt
//! ```
//!
//! Nothing is indexed in memory. A draft is found by probing its path, so
//! reopening unchanged remote content finds a draft left behind by an
//! earlier session, while edited content maps to a different path.
//!
//! When a draft already exists the caller decides what to do with it
//! (see [`DraftChoice`]); this module only carries out the decision.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, info, warn};
use sha2::{Digest, Sha256};

/// What to do with a draft that already exists for the content being opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftChoice {
    /// Keep editing the existing draft; the fetched content is not written.
    Edit,
    /// Open the existing draft, but never upload what comes back.
    ViewReadOnly,
    /// Delete the existing draft and start from the fetched content.
    Discard,
    /// Abort opening the note.
    Cancel,
}

impl DraftChoice {
    /// Labels offered to the user, in selection-index order.
    pub const LABELS: [&'static str; 4] = ["Edit", "View (read-only)", "Discard", "Cancel"];

    /// Map an option index to a choice. Anything unrecognized cancels.
    pub fn from_index(index: Option<usize>) -> Self {
        match index {
            Some(0) => DraftChoice::Edit,
            Some(1) => DraftChoice::ViewReadOnly,
            Some(2) => DraftChoice::Discard,
            _ => DraftChoice::Cancel,
        }
    }
}

/// A draft found on disk before the fresh copy was written.
#[derive(Debug, Clone)]
pub struct ExistingDraft {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl ExistingDraft {
    /// Prompt shown when asking the user what to do with this draft.
    pub fn prompt(&self) -> String {
        let modified: chrono::DateTime<chrono::Local> = self.modified.into();
        format!(
            "An unsaved draft for this note was found locally. Continue editing? (Last edited: {})",
            modified.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// A draft ready to be handed to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCopy {
    pub path: PathBuf,
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOutcome {
    Ready(LocalCopy),
    Cancelled,
}

/// Hex SHA-256 digest of `content`.
pub fn content_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone)]
pub struct DraftCache {
    root: PathBuf,
}

impl DraftCache {
    /// A cache rooted at `root`. The directory must already exist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// A cache rooted at `~/.notes-term/drafts`, creating it if needed.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::new(crate::core::paths::ensure_drafts_dir()?))
    }

    /// Deterministic draft path for `content`.
    pub fn path_for(&self, content: &[u8]) -> PathBuf {
        self.root.join(format!("note-{}.txt", content_digest(content)))
    }

    /// Look for a draft left behind for `content`.
    pub fn find_existing(&self, content: &[u8]) -> io::Result<Option<ExistingDraft>> {
        let path = self.path_for(content);
        match fs::metadata(&path) {
            Ok(meta) => Ok(Some(ExistingDraft {
                modified: meta.modified()?,
                path,
            })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Produce a local copy of `content` ready for editing.
    ///
    /// If a draft already exists, `resolve` decides what happens to it.
    /// Otherwise (or after a discard) a fresh copy is created exclusively:
    /// a file appearing at the path in between is an error, never
    /// overwritten.
    pub fn prepare<F>(&self, content: &[u8], resolve: F) -> io::Result<DraftOutcome>
    where
        F: FnOnce(&ExistingDraft) -> io::Result<DraftChoice>,
    {
        let path = self.path_for(content);

        if let Some(existing) = self.find_existing(content)? {
            let choice = resolve(&existing)?;
            info!("Existing draft {}: {:?}", existing.path.display(), choice);
            match choice {
                DraftChoice::Edit => {
                    return Ok(DraftOutcome::Ready(LocalCopy {
                        path,
                        read_only: false,
                    }));
                }
                DraftChoice::ViewReadOnly => {
                    return Ok(DraftOutcome::Ready(LocalCopy {
                        path,
                        read_only: true,
                    }));
                }
                DraftChoice::Discard => fs::remove_file(&path)?,
                DraftChoice::Cancel => return Ok(DraftOutcome::Cancelled),
            }
        }

        write_fresh_copy(&path, content)?;
        debug!("Wrote fresh draft {} ({} bytes)", path.display(), content.len());
        Ok(DraftOutcome::Ready(LocalCopy {
            path,
            read_only: false,
        }))
    }

    /// Remove a draft after its content was uploaded.
    pub fn remove(&self, copy: &LocalCopy) -> io::Result<()> {
        fs::remove_file(&copy.path)
    }
}

fn write_fresh_copy(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = create_exclusive(path)?;
    let written = file.write_all(content).and_then(|()| file.sync_all());
    drop(file);
    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(path) {
            warn!("Failed to remove partial draft {}: {}", path.display(), cleanup);
        }
        return Err(e);
    }
    Ok(())
}

#[cfg(unix)]
fn create_exclusive(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .mode(0o660)
        .open(path)
}

#[cfg(not(unix))]
fn create_exclusive(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn cache() -> (tempfile::TempDir, DraftCache) {
        let tmp = tempfile::tempdir().unwrap();
        let cache = DraftCache::new(tmp.path());
        (tmp, cache)
    }

    #[test]
    fn test_same_content_maps_to_same_path() {
        let (_tmp, cache) = cache();
        assert_eq!(cache.path_for(b"hello"), cache.path_for(b"hello"));
    }

    #[test]
    fn test_distinct_content_maps_to_distinct_paths() {
        let (_tmp, cache) = cache();
        assert_ne!(cache.path_for(b"hello"), cache.path_for(b"hello "));
        assert_ne!(cache.path_for(b""), cache.path_for(b"\0"));
        assert_ne!(cache.path_for(b"ab"), cache.path_for(b"ba"));
    }

    #[test]
    fn test_path_is_named_after_hex_digest() {
        let (tmp, cache) = cache();
        let path = cache.path_for(b"hello");
        assert_eq!(
            path,
            tmp.path().join(
                "note-2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824.txt"
            )
        );
    }

    #[test]
    fn test_prepare_without_draft_writes_fresh_copy() {
        let (_tmp, cache) = cache();
        let called = Cell::new(false);
        let outcome = cache
            .prepare(b"hello", |_| {
                called.set(true);
                Ok(DraftChoice::Edit)
            })
            .unwrap();

        assert!(!called.get(), "no conflict, resolver must not run");
        let DraftOutcome::Ready(copy) = outcome else {
            panic!("expected a ready copy");
        };
        assert!(!copy.read_only);
        assert_eq!(fs::read(&copy.path).unwrap(), b"hello");
    }

    #[test]
    fn test_edit_keeps_existing_draft_content() {
        let (_tmp, cache) = cache();
        let path = cache.path_for(b"hello");
        fs::write(&path, b"hello, with local edits").unwrap();

        let outcome = cache.prepare(b"hello", |_| Ok(DraftChoice::Edit)).unwrap();
        assert_eq!(
            outcome,
            DraftOutcome::Ready(LocalCopy {
                path: path.clone(),
                read_only: false
            })
        );
        assert_eq!(fs::read(&path).unwrap(), b"hello, with local edits");
    }

    #[test]
    fn test_view_read_only_keeps_existing_draft() {
        let (_tmp, cache) = cache();
        let path = cache.path_for(b"hello");
        fs::write(&path, b"draft").unwrap();

        let outcome = cache
            .prepare(b"hello", |_| Ok(DraftChoice::ViewReadOnly))
            .unwrap();
        assert_eq!(
            outcome,
            DraftOutcome::Ready(LocalCopy {
                path: path.clone(),
                read_only: true
            })
        );
        assert_eq!(fs::read(&path).unwrap(), b"draft");
    }

    #[test]
    fn test_discard_removes_draft_before_fresh_copy() {
        let (_tmp, cache) = cache();
        let path = cache.path_for(b"hello");
        fs::write(&path, b"stale draft").unwrap();

        let outcome = cache
            .prepare(b"hello", |existing| {
                assert_eq!(existing.path, path);
                Ok(DraftChoice::Discard)
            })
            .unwrap();

        let DraftOutcome::Ready(copy) = outcome else {
            panic!("expected a ready copy");
        };
        assert!(!copy.read_only);
        assert_eq!(fs::read(&copy.path).unwrap(), b"hello");
    }

    #[test]
    fn test_cancel_leaves_draft_untouched() {
        let (_tmp, cache) = cache();
        let path = cache.path_for(b"hello");
        fs::write(&path, b"draft").unwrap();

        let outcome = cache.prepare(b"hello", |_| Ok(DraftChoice::Cancel)).unwrap();
        assert_eq!(outcome, DraftOutcome::Cancelled);
        assert_eq!(fs::read(&path).unwrap(), b"draft");
    }

    #[test]
    fn test_resolver_error_propagates() {
        let (_tmp, cache) = cache();
        fs::write(cache.path_for(b"x"), b"draft").unwrap();
        let err = cache
            .prepare(b"x", |_| Err(io::Error::other("terminal gone")))
            .unwrap_err();
        assert_eq!(err.to_string(), "terminal gone");
    }

    #[test]
    fn test_exclusive_create_refuses_existing_file() {
        let (_tmp, cache) = cache();
        let path = cache.path_for(b"race");
        fs::write(&path, b"someone else").unwrap();
        let err = write_fresh_copy(&path, b"race").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&path).unwrap(), b"someone else");
    }

    #[test]
    fn test_choice_from_index() {
        assert_eq!(DraftChoice::from_index(Some(0)), DraftChoice::Edit);
        assert_eq!(DraftChoice::from_index(Some(1)), DraftChoice::ViewReadOnly);
        assert_eq!(DraftChoice::from_index(Some(2)), DraftChoice::Discard);
        assert_eq!(DraftChoice::from_index(Some(3)), DraftChoice::Cancel);
        assert_eq!(DraftChoice::from_index(Some(9)), DraftChoice::Cancel);
        assert_eq!(DraftChoice::from_index(None), DraftChoice::Cancel);
    }

    #[test]
    fn test_prompt_mentions_modification_time() {
        let draft = ExistingDraft {
            path: PathBuf::from("/tmp/x"),
            modified: SystemTime::now(),
        };
        assert!(draft.prompt().contains("Last edited: "));
    }
}
