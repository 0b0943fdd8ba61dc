use std::io;

use crate::tui::component::{Drawable, draw_frame};
use crate::tui::geometry::Geometry;
use crate::tui::terminal::Screen;

/// Height of a bordered single-line input box.
pub const TEXT_INPUT_HEIGHT: u16 = 3;

/// Editable single-line text box.
///
/// The buffer is repainted in full on every draw and the rest of the row
/// is padded with spaces, so shortening the text leaves nothing behind.
/// When the text is wider than the box, its tail is shown so the end
/// (where the cursor sits) stays visible.
#[derive(Debug, Clone)]
pub struct TextInput {
    geometry: Geometry,
    text: String,
}

impl TextInput {
    pub fn new(x: u16, y: u16, width: u16, text: impl Into<String>) -> Self {
        Self {
            geometry: Geometry::bordered(x, y, width, TEXT_INPUT_HEIGHT),
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    /// Remove the last character. Returns false if there was nothing to remove.
    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    fn visible_text(&self) -> &str {
        let width = usize::from(self.geometry.text_bounds().width());
        let len = self.text.chars().count();
        if len <= width {
            return &self.text;
        }
        match self.text.char_indices().nth(len - width) {
            Some((start, _)) => &self.text[start..],
            None => &self.text,
        }
    }

    /// Where the cursor goes when this input has focus: just past the text.
    pub fn cursor_position(&self) -> (u16, u16) {
        let bounds = self.geometry.text_bounds();
        let len = u16::try_from(self.visible_text().chars().count()).unwrap_or(u16::MAX);
        let col = bounds.col_min.saturating_add(len).min(bounds.col_max);
        (bounds.row_min, col)
    }
}

impl Drawable for TextInput {
    fn bounds(&self) -> Geometry {
        self.geometry
    }

    fn draw(&self, screen: &mut Screen) -> io::Result<()> {
        draw_frame(screen, &self.geometry)?;
        let bounds = self.geometry.text_bounds();
        if bounds.is_empty() {
            return Ok(());
        }
        let width = usize::from(bounds.width());
        let row = format!("{:<width$}", self.visible_text());
        screen.put_str_at(bounds.row_min, bounds.col_min, &row)
    }
}
