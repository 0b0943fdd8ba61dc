//! On-disk token cache (`~/.notes-term/token`).
//!
//! Stored as JSON with the field names the OAuth2 ecosystem uses, so a
//! token written by another client of the same service loads fine.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use super::AuthError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl Token {
    /// Usable if it has an access token that has not expired yet.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty() && self.expiry.is_some_and(|e| e > now)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

/// Load the cached token. A missing file yields an empty (invalid) token.
pub fn load_token(path: &Path) -> Result<Token, AuthError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No token file at {}", path.display());
            return Ok(Token::default());
        }
        Err(e) => return Err(AuthError::Io(e)),
    };
    serde_json::from_str(&json).map_err(|e| AuthError::Parse(e.to_string()))
}

pub fn save_token(path: &Path, token: &Token) -> Result<(), AuthError> {
    let json = serde_json::to_string(token).map_err(|e| AuthError::Parse(e.to_string()))?;
    write_private(path, json.as_bytes()).map_err(AuthError::Io)
}

#[cfg(unix)]
fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(bytes)
}

#[cfg(not(unix))]
fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::write(path, bytes)
}
