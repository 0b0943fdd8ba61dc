//! Blocking notice boxes.
//!
//! Every error the user sees mid-session comes through here: the message
//! is wrapped into a centered box, drawn in the error palette, and stays
//! up until any key is pressed. Info boxes look the same in the default
//! palette.

use std::io;

use crate::tui::component::{Drawable, wrap_lines};
use crate::tui::components::label::MultilineLabel;
use crate::tui::geometry::Geometry;
use crate::tui::palette::Palette;
use crate::tui::terminal::Screen;
use crate::tui::ui::Ui;

const MAX_WIDTH: u16 = 60;

pub struct MessageBox {
    label: MultilineLabel,
    palette: Palette,
}

impl MessageBox {
    pub fn new(parent: &Geometry, message: &str, palette: Palette) -> Self {
        let inner = parent.text_bounds();
        let width = MAX_WIDTH.min(inner.width()).max(3);
        let lines = wrap_lines(message, width - 2);
        let height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        Self {
            label: MultilineLabel::new(parent.centered(width, height), lines),
            palette,
        }
    }

    pub fn error(parent: &Geometry, message: &str) -> Self {
        Self::new(parent, message, Palette::ERROR)
    }

    pub fn info(parent: &Geometry, message: &str) -> Self {
        Self::new(parent, message, Palette::DEFAULT)
    }

    /// Draw the box and wait for any key.
    pub fn show(&self, ui: &mut Ui) -> io::Result<()> {
        ui.screen.hide_cursor()?;
        self.draw(&mut ui.screen)?;
        ui.next_key()?;
        Ok(())
    }
}

impl Drawable for MessageBox {
    fn bounds(&self) -> Geometry {
        self.label.bounds()
    }

    fn draw(&self, screen: &mut Screen) -> io::Result<()> {
        screen.with_palette(self.palette, |s| self.label.draw(s))
    }
}
