use std::io;

use crate::tui::component::{Drawable, clip, draw_frame};
use crate::tui::geometry::Geometry;
use crate::tui::terminal::Screen;

/// Static text on the first interior row.
#[derive(Debug, Clone)]
pub struct Label {
    geometry: Geometry,
    text: String,
}

impl Label {
    pub fn new(geometry: Geometry, text: impl Into<String>) -> Self {
        Self {
            geometry,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Drawable for Label {
    fn bounds(&self) -> Geometry {
        self.geometry
    }

    fn draw(&self, screen: &mut Screen) -> io::Result<()> {
        draw_frame(screen, &self.geometry)?;
        let bounds = self.geometry.text_bounds();
        if bounds.is_empty() {
            return Ok(());
        }
        screen.put_str_at(
            bounds.row_min,
            bounds.col_min,
            clip(&self.text, bounds.width()),
        )
    }
}

/// One line of text per interior row; lines past the bottom are dropped.
#[derive(Debug, Clone)]
pub struct MultilineLabel {
    geometry: Geometry,
    lines: Vec<String>,
}

impl MultilineLabel {
    pub fn new(geometry: Geometry, lines: Vec<String>) -> Self {
        Self { geometry, lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Drawable for MultilineLabel {
    fn bounds(&self) -> Geometry {
        self.geometry
    }

    fn draw(&self, screen: &mut Screen) -> io::Result<()> {
        draw_frame(screen, &self.geometry)?;
        let bounds = self.geometry.text_bounds();
        if bounds.is_empty() {
            return Ok(());
        }
        for (row, line) in (bounds.row_min..=bounds.row_max).zip(&self.lines) {
            screen.put_str_at(row, bounds.col_min, clip(line, bounds.width()))?;
        }
        Ok(())
    }
}
