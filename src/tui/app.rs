//! # Main Loop
//!
//! Read a key, act on it, redraw; until the user confirms quitting.
//!
//! Every action runs to completion before the next key is read, and
//! prompts (modals, error boxes) block inside the action. A failing store
//! call or file operation is shown in an error box and the loop carries
//! on; only terminal I/O errors end the session.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info, warn};

use crate::core::drafts::{DraftCache, DraftChoice, DraftOutcome, LocalCopy};
use crate::core::editor::Editor;
use crate::core::notes::Note;
use crate::store::NoteStore;
use crate::tui::component::Drawable;
use crate::tui::components::main_window::MainWindow;
use crate::tui::dispatch::{MainAction, main_action};
use crate::tui::palette::Palette;
use crate::tui::ui::Ui;

const DELETE_PROMPT_TITLE_CHARS: usize = 20;

enum Flow {
    Continue,
    Quit,
}

pub struct App {
    ui: Ui,
    window: MainWindow,
    store: Box<dyn NoteStore>,
    drafts: DraftCache,
    editor: Box<dyn Editor>,
}

impl App {
    pub fn new(
        ui: Ui,
        window: MainWindow,
        store: Box<dyn NoteStore>,
        drafts: DraftCache,
        editor: Box<dyn Editor>,
    ) -> Self {
        Self {
            ui,
            window,
            store,
            drafts,
            editor,
        }
    }

    pub fn window(&self) -> &MainWindow {
        &self.window
    }

    /// Run until the user quits. Returns early only on terminal I/O errors.
    pub fn run(&mut self) -> io::Result<()> {
        info!("Main loop started with {} notes", self.window.notes().len());
        self.redraw()?;
        loop {
            let press = self.ui.next_key()?;
            if let Some(action) = main_action(&press.key) {
                debug!("Action {:?}", action);
                if let Flow::Quit = self.handle(action)? {
                    info!("Quitting");
                    return Ok(());
                }
            }
            self.window.set_last_key(press.code());
            self.redraw()?;
        }
    }

    /// Repaint the main window from the default palette. Anything that ran
    /// in between (an editor, a modal) may have left other colors active.
    fn redraw(&mut self) -> io::Result<()> {
        self.window.scroll_to_selection();
        self.ui.screen.hide_cursor()?;
        self.ui.screen.apply_palette(Palette::DEFAULT)?;
        self.window.draw(&mut self.ui.screen)?;
        self.ui.screen.flush()
    }

    fn handle(&mut self, action: MainAction) -> io::Result<Flow> {
        match action {
            MainAction::Up => self.window.notes_mut().select_prev(),
            MainAction::Down => self.window.notes_mut().select_next(),
            MainAction::Create => self.create_note()?,
            MainAction::Rename => self.rename_note()?,
            MainAction::Delete => self.delete_note()?,
            MainAction::Import => self.import_note()?,
            MainAction::ToggleHelp => self.window.toggle_help(),
            MainAction::Open => self.open_note()?,
            MainAction::Quit => {
                let parent = self.window.bounds();
                if self
                    .ui
                    .request_confirmation(&parent, "Are you sure you want to leave?")?
                {
                    return Ok(Flow::Quit);
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Ask for one value, then redraw over the modal.
    fn prompt(&mut self, title: &str, field: &str, default: &str) -> io::Result<Option<String>> {
        let parent = self.window.bounds();
        let value = self.ui.request_value(&parent, title, field, default)?;
        self.redraw()?;
        Ok(value)
    }

    fn show_error(&mut self, message: &str) -> io::Result<()> {
        let parent = self.window.bounds();
        self.ui.show_error(&parent, message)
    }

    fn create_note(&mut self) -> io::Result<()> {
        let Some(title) = self.prompt("Create note", "Title", "")? else {
            return Ok(());
        };
        match self.store.create_note(&title) {
            Ok(note) => {
                info!("Created note {} '{}'", note.id, note.title);
                self.window.notes_mut().push(note);
                Ok(())
            }
            Err(e) => self.show_error(&e.to_string()),
        }
    }

    fn rename_note(&mut self) -> io::Result<()> {
        let Some(note) = self.window.notes().selected().cloned() else {
            return Ok(());
        };
        let index = self.window.notes().selection();
        let Some(title) = self.prompt("Rename note", "Title", &note.title)? else {
            return Ok(());
        };

        if let Err(e) = self.store.update_note(note.id, &title) {
            return self.show_error(&e.to_string());
        }
        info!("Renamed note {} to '{}'", note.id, title);

        match self.store.get_note(note.id) {
            Ok(updated) => self.window.notes_mut().replace(index, updated),
            Err(e) => {
                self.window.notes_mut().set_title(index, title);
                self.show_error(&e.to_string())?;
            }
        }
        Ok(())
    }

    fn delete_note(&mut self) -> io::Result<()> {
        let Some(note) = self.window.notes().selected().cloned() else {
            return Ok(());
        };
        let index = self.window.notes().selection();
        let short_title: String = note.title.chars().take(DELETE_PROMPT_TITLE_CHARS).collect();
        let parent = self.window.bounds();
        let confirmed = self
            .ui
            .request_confirmation(&parent, &format!("Delete note '{short_title}'?"))?;
        self.redraw()?;
        if !confirmed {
            return Ok(());
        }

        match self.store.delete_note(note.id) {
            Ok(()) => {
                info!("Deleted note {}", note.id);
                self.window.notes_mut().remove(index);
                Ok(())
            }
            Err(e) => self.show_error(&e.to_string()),
        }
    }

    fn import_note(&mut self) -> io::Result<()> {
        let Some(path) = self.prompt("Enter path to existing note", "Path", "")? else {
            return Ok(());
        };
        let default_title = Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(title) = self.prompt("New name", "Title", &default_title)? else {
            return Ok(());
        };

        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) => return self.show_error(&format!("could not read {path}: {e}")),
        };

        let note = match self.store.create_note(&title) {
            Ok(note) => note,
            Err(e) => return self.show_error(&e.to_string()),
        };

        match self.store.update_note_content(note.id, &content) {
            Ok(()) => {
                info!("Imported {} as note {}", path, note.id);
                self.window.notes_mut().push(note);
                Ok(())
            }
            Err(e) => {
                self.show_error(&format!("error while setting content; cleaning up: {e}"))?;
                self.clean_up_import(&note)
            }
        }
    }

    /// Delete a note whose content never made it to the store.
    fn clean_up_import(&mut self, note: &Note) -> io::Result<()> {
        match self.store.delete_note(note.id) {
            Ok(()) => {
                info!("Cleaned up partially imported note {}", note.id);
                Ok(())
            }
            Err(e) => self.show_error(&format!(
                "error while cleaning up; manually update content for note {}: {e}",
                note.id
            )),
        }
    }

    fn open_note(&mut self) -> io::Result<()> {
        let Some(note) = self.window.notes().selected().cloned() else {
            return Ok(());
        };
        let content = match self.store.get_note_content(note.id) {
            Ok(content) => content,
            Err(e) => return self.show_error(&e.to_string()),
        };

        let parent = self.window.bounds();
        let ui = &mut self.ui;
        let prepared = self.drafts.prepare(&content, |existing| {
            let choice = ui.request_option(&parent, &existing.prompt(), &DraftChoice::LABELS)?;
            Ok(DraftChoice::from_index(choice))
        });
        self.redraw()?;

        let copy = match prepared {
            Ok(DraftOutcome::Ready(copy)) => copy,
            Ok(DraftOutcome::Cancelled) => return Ok(()),
            Err(e) => return self.show_error(&format!("error when creating temp file: {e}")),
        };

        let edited = self.editor.edit(&copy.path);
        self.redraw()?;
        if let Err(e) = edited {
            return self.show_error(&e.to_string());
        }

        self.save_draft(&note, &copy)
    }

    /// Upload what the editor left behind, unless the draft was read-only.
    fn save_draft(&mut self, note: &Note, copy: &LocalCopy) -> io::Result<()> {
        let content = match fs::read(&copy.path) {
            Ok(content) => content,
            Err(e) => return self.show_error(&format!("could not read draft: {e}")),
        };

        if copy.read_only {
            let parent = self.window.bounds();
            return self
                .ui
                .show_info(&parent, "File was opened as read-only and so was not saved.");
        }

        if let Err(e) = self.store.update_note_content(note.id, &content) {
            return self.show_error(&e.to_string());
        }
        info!("Saved note {} ({} bytes)", note.id, content.len());
        if let Err(e) = self.drafts.remove(copy) {
            warn!("Could not remove draft {}: {}", copy.path.display(), e);
        }
        Ok(())
    }
}
