//! # TUI Adapter
//!
//! A hand-rolled ANSI widget layer over a raw-mode terminal. crossterm is
//! only used to toggle raw mode and read the terminal size; everything on
//! screen is written as escape sequences by [`terminal::Screen`].
//!
//! ```text
//! tui
//! ├── terminal    Screen (cursor, color, text) + raw-mode guard
//! ├── event       raw bytes → Key
//! ├── dispatch    Key → action, per context
//! ├── selection   focus state of the modals
//! ├── geometry    boxes, borders, centering
//! ├── components  widgets: labels, inputs, buttons, modals, main window
//! ├── ui          Screen + KeySource, prompt helpers
//! └── app         the main loop
//! ```
//!
//! ## Startup Order
//!
//! Login may print device-flow instructions, so the store is built before
//! raw mode is entered. The note list is fetched after, with the screen
//! already owned by the guard; a failure there still restores the terminal
//! before the error is reported.

pub mod app;
pub mod component;
pub mod components;
pub mod dispatch;
pub mod event;
pub mod geometry;
pub mod palette;
pub mod selection;
pub mod terminal;
pub mod ui;

use std::fmt;
use std::io;

use log::info;

use crate::auth::{self, AuthError, AuthSettings};
use crate::core::config::{Backend, ResolvedConfig};
use crate::core::drafts::DraftCache;
use crate::core::editor::ExternalEditor;
use crate::store::{LegacyIndexStore, NoteStore, RemoteNoteStore, StoreError};

use app::App;
use components::main_window::MainWindow;
use event::StdinKeys;
use terminal::{Screen, TerminalGuard};
use ui::Ui;

/// Anything that ends the session before or outside the main loop.
#[derive(Debug)]
pub enum StartupError {
    Auth(AuthError),
    Store(StoreError),
    Io(io::Error),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Auth(e) => write!(f, "{e}"),
            StartupError::Store(e) => write!(f, "{e}"),
            StartupError::Io(e) => write!(f, "terminal error: {e}"),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<AuthError> for StartupError {
    fn from(e: AuthError) -> Self {
        StartupError::Auth(e)
    }
}

impl From<StoreError> for StartupError {
    fn from(e: StoreError) -> Self {
        StartupError::Store(e)
    }
}

impl From<io::Error> for StartupError {
    fn from(e: io::Error) -> Self {
        StartupError::Io(e)
    }
}

/// Pick the note store for this session, logging in first if needed.
pub fn build_store(config: &ResolvedConfig) -> Result<Box<dyn NoteStore>, StartupError> {
    match config.backend {
        Backend::Local => {
            let store = LegacyIndexStore::open(&config.notes_root)?;
            Ok(Box::new(store))
        }
        Backend::Remote => {
            let token = if config.auth_enabled {
                Some(auth::login(&AuthSettings::from_config(config)?)?)
            } else {
                info!("Authentication disabled");
                None
            };
            Ok(Box::new(RemoteNoteStore::new(&config.base_url, token)?))
        }
    }
}

/// Run a full session: build the store, take over the terminal, loop until
/// the user quits. The terminal is restored before this returns.
pub fn run(config: &ResolvedConfig) -> Result<(), StartupError> {
    let mut store = build_store(config)?;
    info!("Using {} store", store.name());
    let drafts = DraftCache::open_default()?;

    let _guard = TerminalGuard::enter()?;
    let (width, height) = terminal::size()?;
    let notes = store.list_notes()?;
    info!("Loaded {} notes, terminal {}x{}", notes.len(), width, height);

    let ui = Ui::new(Screen::stdout(), Box::new(StdinKeys::new()));
    let window = MainWindow::new(width, height, notes, config.debug);
    let editor = Box::new(ExternalEditor::new(&config.editor));
    let mut app = App::new(ui, window, store, drafts, editor);
    app.run()?;
    Ok(())
}
