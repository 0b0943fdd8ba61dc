//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.notes-term/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::paths;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NotesConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub local: LocalConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub editor: Option<String>,
    pub debug: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    pub enabled: Option<bool>,
    pub issuer: Option<String>,
    pub client_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocalConfig {
    pub notes_root: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:3333/";
pub const DEFAULT_EDITOR: &str = "nvim";
pub const DEFAULT_ISSUER: &str = "https://auth.notes.quemot.dev/realms/notes";
pub const DEFAULT_CLIENT_ID: &str = "notes-cli";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Where notes come from for this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// The remote note service at `base_url`.
    Remote,
    /// The legacy flat-file index under `notes_root`.
    Local,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend: Backend,
    pub base_url: String,
    pub editor: String,
    pub debug: bool,
    pub auth_enabled: bool,
    pub issuer: String,
    pub client_id: String,
    /// Pre-issued bearer token (`NOTES_TOKEN`); skips login entirely.
    pub static_token: Option<String>,
    pub notes_root: PathBuf,
}

/// Flags from the command line. `None`/`false` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub editor: Option<String>,
    pub notes_root: Option<PathBuf>,
    pub debug: bool,
    pub local: bool,
    pub no_auth: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Load config from `~/.notes-term/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NotesConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NotesConfig, ConfigError> {
    let path = match paths::config_path() {
        Ok(p) => p,
        Err(e) => {
            warn!("Could not determine config location ({}), using defaults", e);
            return Ok(NotesConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<NotesConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(NotesConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: NotesConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# notes-term configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# editor = "nvim"                    # Falls back to $VISUAL, then $EDITOR
# debug = false                      # Show the last-key panel, verbose log

# [server]
# base_url = "http://localhost:3333/"   # Or set NOTES_URL env var

# [auth]
# enabled = true
# issuer = "https://auth.notes.quemot.dev/realms/notes"
# client_id = "notes-cli"

# [local]
# notes_root = "/home/me/.notes"     # Used with --local, or set NOTES_ROOT
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = paths::create_dir_with_mode(parent, 0o770) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NotesConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading the environment through `env`.
pub fn resolve_with_env(
    config: &NotesConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .url
        .clone()
        .or_else(|| env("NOTES_URL"))
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Editor: CLI → config → $VISUAL → $EDITOR → default
    let editor = cli
        .editor
        .clone()
        .or_else(|| config.general.editor.clone())
        .or_else(|| env("VISUAL"))
        .or_else(|| env("EDITOR"))
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

    let notes_root = cli
        .notes_root
        .clone()
        .or_else(|| env("NOTES_ROOT").map(PathBuf::from))
        .or_else(|| config.local.notes_root.as_ref().map(PathBuf::from))
        .or_else(paths::default_notes_root)
        .unwrap_or_else(|| PathBuf::from(".notes"));

    let backend = if cli.local {
        Backend::Local
    } else {
        Backend::Remote
    };

    ResolvedConfig {
        backend,
        base_url,
        editor,
        debug: cli.debug || config.general.debug.unwrap_or(false),
        auth_enabled: !cli.no_auth && config.auth.enabled.unwrap_or(true),
        issuer: config
            .auth
            .issuer
            .clone()
            .unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
        client_id: config
            .auth
            .client_id
            .clone()
            .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
        static_token: env("NOTES_TOKEN").filter(|t| !t.is_empty()),
        notes_root,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = NotesConfig::default();
        assert!(config.general.editor.is_none());
        assert!(config.server.base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&NotesConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.editor, DEFAULT_EDITOR);
        assert_eq!(resolved.backend, Backend::Remote);
        assert_eq!(resolved.client_id, DEFAULT_CLIENT_ID);
        assert!(resolved.auth_enabled);
        assert!(!resolved.debug);
        assert!(resolved.static_token.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = NotesConfig {
            general: GeneralConfig {
                editor: Some("vim".to_string()),
                debug: Some(true),
            },
            server: ServerConfig {
                base_url: Some("https://notes.example.com/".to_string()),
            },
            auth: AuthConfig {
                enabled: Some(false),
                issuer: Some("https://id.example.com".to_string()),
                client_id: Some("other".to_string()),
            },
            local: LocalConfig {
                notes_root: Some("/tmp/notes".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.editor, "vim");
        assert!(resolved.debug);
        assert_eq!(resolved.base_url, "https://notes.example.com/");
        assert!(!resolved.auth_enabled);
        assert_eq!(resolved.issuer, "https://id.example.com");
        assert_eq!(resolved.client_id, "other");
        assert_eq!(resolved.notes_root, PathBuf::from("/tmp/notes"));
    }

    #[test]
    fn test_env_wins_over_config_and_cli_wins_over_env() {
        let config = NotesConfig {
            server: ServerConfig {
                base_url: Some("http://from-config/".to_string()),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "NOTES_URL" => Some("http://from-env/".to_string()),
            "NOTES_TOKEN" => Some("tok".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.base_url, "http://from-env/");
        assert_eq!(resolved.static_token.as_deref(), Some("tok"));

        let cli = CliOverrides {
            url: Some("http://from-cli/".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.base_url, "http://from-cli/");
    }

    #[test]
    fn test_editor_falls_back_to_visual_then_editor() {
        let env = |key: &str| match key {
            "EDITOR" => Some("nano".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&NotesConfig::default(), &CliOverrides::default(), env);
        assert_eq!(resolved.editor, "nano");

        let env = |key: &str| match key {
            "VISUAL" => Some("code".to_string()),
            "EDITOR" => Some("nano".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&NotesConfig::default(), &CliOverrides::default(), env);
        assert_eq!(resolved.editor, "code");
    }

    #[test]
    fn test_cli_flags_select_local_backend_and_disable_auth() {
        let cli = CliOverrides {
            local: true,
            no_auth: true,
            debug: true,
            ..Default::default()
        };
        let resolved = resolve_with_env(&NotesConfig::default(), &cli, no_env);
        assert_eq!(resolved.backend, Backend::Local);
        assert!(!resolved.auth_enabled);
        assert!(resolved.debug);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[server]
base_url = "http://10.0.0.5:3333/"
"#;
        let config: NotesConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.base_url.as_deref(), Some("http://10.0.0.5:3333/"));
        assert!(config.general.editor.is_none());
        assert!(config.auth.enabled.is_none());
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");
        let config = load_config_from(&path).unwrap();
        assert!(config.server.base_url.is_none());

        let generated = fs::read_to_string(&path).unwrap();
        assert!(generated.contains("# [server]"));
        // Everything is commented out, so it parses back to defaults
        let reparsed: NotesConfig = toml::from_str(&generated).unwrap();
        assert!(reparsed.general.editor.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[server\nbase_url = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
