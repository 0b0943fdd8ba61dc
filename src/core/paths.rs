//! # Local Paths
//!
//! Everything notes-term keeps on disk lives under `~/.notes-term/`:
//!
//! ```text
//! ~/.notes-term/
//! ├── config.toml      (user config, generated on first run)
//! ├── notes-term.log   (file logger output)
//! ├── token            (cached OIDC token, 0600)
//! └── drafts/          (content-addressed local drafts, 0700)
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const CACHE_DIR_NAME: &str = ".notes-term";
const DRAFTS_DIR_NAME: &str = "drafts";

/// Returns `~/.notes-term` without creating it.
pub fn cache_dir() -> io::Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    Ok(home.join(CACHE_DIR_NAME))
}

/// Returns `~/.notes-term`, creating it if needed.
pub fn ensure_cache_dir() -> io::Result<PathBuf> {
    let dir = cache_dir()?;
    create_dir_with_mode(&dir, 0o770)?;
    Ok(dir)
}

/// Returns `~/.notes-term/drafts`, creating it if needed.
pub fn ensure_drafts_dir() -> io::Result<PathBuf> {
    let dir = ensure_cache_dir()?.join(DRAFTS_DIR_NAME);
    create_dir_with_mode(&dir, 0o700)?;
    Ok(dir)
}

pub fn config_path() -> io::Result<PathBuf> {
    Ok(cache_dir()?.join("config.toml"))
}

pub fn token_path() -> io::Result<PathBuf> {
    Ok(cache_dir()?.join("token"))
}

pub fn log_path() -> io::Result<PathBuf> {
    Ok(cache_dir()?.join("notes-term.log"))
}

/// Default root of the legacy flat-file notes (`~/.notes`).
pub fn default_notes_root() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".notes"))
}

#[cfg(unix)]
pub(crate) fn create_dir_with_mode(dir: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(mode).create(dir)
}

#[cfg(not(unix))]
pub(crate) fn create_dir_with_mode(dir: &Path, _mode: u32) -> io::Result<()> {
    fs::create_dir_all(dir)
}
