//! # Authentication
//!
//! Obtains the bearer token for the note service before the UI starts.
//! Order of preference:
//!
//! 1. A pre-issued token (`NOTES_TOKEN`)
//! 2. A still-valid cached token (`~/.notes-term/token`)
//! 3. The OIDC device flow, whose result is cached for next time
//!
//! Login prints to stdout, so it must run before raw mode is entered.

mod device;
pub mod token;

pub use device::device_login;
pub use token::Token;

use std::fmt;
use std::io;
use std::path::PathBuf;

use log::{info, warn};

use crate::core::config::ResolvedConfig;
use crate::core::paths;

/// Errors that can occur while logging in.
#[derive(Debug)]
pub enum AuthError {
    /// Could not load the issuer's OIDC configuration.
    Discovery(String),
    /// Network-level failure talking to the issuer.
    Network(String),
    /// The user or the issuer refused the authorization.
    Denied(String),
    /// The device code expired before the user completed login.
    Expired,
    /// Reading or writing the token cache failed.
    Io(io::Error),
    /// A response or the token cache could not be parsed.
    Parse(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Discovery(msg) => write!(f, "could not load OIDC configuration: {msg}"),
            AuthError::Network(msg) => write!(f, "login network error: {msg}"),
            AuthError::Denied(msg) => write!(f, "login denied: {msg}"),
            AuthError::Expired => write!(f, "login expired before it was completed"),
            AuthError::Io(e) => write!(f, "token cache I/O error: {e}"),
            AuthError::Parse(msg) => write!(f, "login parse error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// What `login` needs from the resolved config.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub issuer: String,
    pub client_id: String,
    pub static_token: Option<String>,
    pub cache_path: PathBuf,
}

impl AuthSettings {
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, AuthError> {
        paths::ensure_cache_dir().map_err(AuthError::Io)?;
        Ok(Self {
            issuer: config.issuer.clone(),
            client_id: config.client_id.clone(),
            static_token: config.static_token.clone(),
            cache_path: paths::token_path().map_err(AuthError::Io)?,
        })
    }
}

/// Produce an access token, running the device flow if nothing usable is cached.
pub fn login(settings: &AuthSettings) -> Result<String, AuthError> {
    if let Some(token) = &settings.static_token {
        info!("Using pre-issued token from environment");
        return Ok(token.clone());
    }

    let cached = token::load_token(&settings.cache_path)?;
    if cached.is_valid() {
        info!("Using cached token");
        return Ok(cached.access_token);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AuthError::Io)?;
    let client = reqwest::Client::new();
    let fresh = runtime.block_on(device_login(
        &client,
        &settings.issuer,
        &settings.client_id,
        &mut io::stdout(),
    ))?;

    if let Err(e) = token::save_token(&settings.cache_path, &fresh) {
        warn!("Could not save token: {}", e);
    }
    Ok(fresh.access_token)
}
