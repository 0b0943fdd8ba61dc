//! The screen and the keyboard, bundled so modals can own both while they
//! run, plus the prompt helpers the main loop uses.
//!
//! A prompt leaves its footprint on screen when it returns; the caller
//! redraws itself afterwards.

use std::io;

use log::info;

use super::components::input_modal::InputModal;
use super::components::message_box::MessageBox;
use super::components::option_modal::OptionModal;
use super::event::{KeyPress, KeySource};
use super::geometry::Geometry;
use super::terminal::Screen;

pub struct Ui {
    pub screen: Screen,
    keys: Box<dyn KeySource>,
}

impl Ui {
    pub fn new(screen: Screen, keys: Box<dyn KeySource>) -> Self {
        Self { screen, keys }
    }

    /// Flush pending output, then block for the next keypress.
    pub fn next_key(&mut self) -> io::Result<KeyPress> {
        self.screen.flush()?;
        self.keys.next_key()
    }

    /// Ask for one value per field. `None` if cancelled.
    pub fn request_input(
        &mut self,
        parent: &Geometry,
        title: &str,
        fields: &[(&str, &str)],
    ) -> io::Result<Option<Vec<String>>> {
        let mut modal = InputModal::new(parent, title, "OK", "Cancel", fields);
        let confirmed = modal.run(self)?;
        info!("Input '{}' {}", title, outcome(confirmed));
        Ok(confirmed.then(|| modal.values()))
    }

    /// Single-field convenience over [`Ui::request_input`].
    pub fn request_value(
        &mut self,
        parent: &Geometry,
        title: &str,
        field: &str,
        default: &str,
    ) -> io::Result<Option<String>> {
        let values = self.request_input(parent, title, &[(field, default)])?;
        Ok(values.and_then(|v| v.into_iter().next()))
    }

    pub fn request_confirmation(&mut self, parent: &Geometry, prompt: &str) -> io::Result<bool> {
        let confirmed = InputModal::confirmation(parent, prompt).run(self)?;
        info!("Confirmation '{}' {}", prompt, outcome(confirmed));
        Ok(confirmed)
    }

    /// Index of the chosen option, or `None` if cancelled.
    pub fn request_option(
        &mut self,
        parent: &Geometry,
        prompt: &str,
        options: &[&str],
    ) -> io::Result<Option<usize>> {
        OptionModal::new(parent, prompt, options).run(self)
    }

    pub fn show_error(&mut self, parent: &Geometry, message: &str) -> io::Result<()> {
        log::warn!("{}", message);
        MessageBox::error(parent, message).show(self)
    }

    pub fn show_info(&mut self, parent: &Geometry, message: &str) -> io::Result<()> {
        info!("{}", message);
        MessageBox::info(parent, message).show(self)
    }
}

fn outcome(confirmed: bool) -> &'static str {
    if confirmed { "confirmed" } else { "cancelled" }
}
