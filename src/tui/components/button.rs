use std::io;

use crate::tui::component::{Drawable, clip, draw_frame};
use crate::tui::geometry::Geometry;
use crate::tui::palette::Palette;
use crate::tui::terminal::Screen;

pub const BUTTON_HEIGHT: u16 = 3;

/// Bordered button with centered text. Drawn in the highlight palette
/// while selected.
#[derive(Debug, Clone)]
pub struct Button {
    geometry: Geometry,
    text: String,
    selected: bool,
}

impl Button {
    pub fn new(x: u16, y: u16, width: u16, text: impl Into<String>) -> Self {
        Self {
            geometry: Geometry::bordered(x, y, width, BUTTON_HEIGHT),
            text: text.into(),
            selected: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn draw_plain(&self, screen: &mut Screen) -> io::Result<()> {
        draw_frame(screen, &self.geometry)?;
        let bounds = self.geometry.text_bounds();
        if bounds.is_empty() {
            return Ok(());
        }
        screen.put_str_at(bounds.row_min, bounds.col_min, &centered(&self.text, bounds.width()))
    }
}

impl Drawable for Button {
    fn bounds(&self) -> Geometry {
        self.geometry
    }

    fn draw(&self, screen: &mut Screen) -> io::Result<()> {
        if self.selected {
            screen.with_palette(Palette::HIGHLIGHT, |s| self.draw_plain(s))
        } else {
            self.draw_plain(screen)
        }
    }
}

/// `text` padded to `width`; an odd leftover space goes on the right.
fn centered(text: &str, width: u16) -> String {
    let text = clip(text, width);
    let pad = usize::from(width) - text.chars().count();
    let left = pad / 2;
    let right = pad - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}
