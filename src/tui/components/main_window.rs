//! # MainWindow
//!
//! The full-screen note list.
//!
//! ```text
//! ╔══════════════════════════════════════════════╗
//! ║Groceries                                     ║  ← selected row highlighted
//! ║Ideas                                         ║
//! ║A very long title that does not fit on the... ║
//! ║                                              ║
//! ╠═══════════════════╗      ╔════════════════════╣
//! ║CTRL+H to open help║      ║ 0x6a               ║  ← debug panel (--debug)
//! ╚═══════════════════╩══════╩════════════════════╝
//! ```
//!
//! The help panel sits in the bottom-left corner, either expanded to the
//! full key list or collapsed to a one-line hint. The optional debug panel
//! in the bottom-right corner shows the last key's raw code. Both panels
//! share edges with the window, so their corner glyphs are T-junctions.
//!
//! Note rows fill the interior above the panels. When there are more notes
//! than rows, the list scrolls just enough to keep the selection visible.

use std::io;

use crate::core::notes::{Note, NoteList};
use crate::tui::component::{Drawable, draw_frame, truncate_with_ellipsis};
use crate::tui::components::label::{Label, MultilineLabel};
use crate::tui::geometry::{Corners, Geometry};
use crate::tui::palette::Palette;
use crate::tui::terminal::Screen;

pub const HELP_TEXT: [&str; 8] = [
    "j/k       Up/down",
    "CTRL+N    Create note",
    "CTRL+R    Rename note",
    "CTRL+D    Delete note",
    "CTRL+I    Import note",
    "Enter     Edit note",
    "CTRL+H    Toggle help",
    "q/CTRL+C  Exit",
];

pub const COLLAPSED_HELP: &str = "CTRL+H to open help";

const DEBUG_PANEL_WIDTH: u16 = 22;
const DEBUG_PANEL_HEIGHT: u16 = 3;

pub struct MainWindow {
    geometry: Geometry,
    notes: NoteList,
    scroll: usize,
    help: MultilineLabel,
    collapsed_help: Label,
    help_collapsed: bool,
    /// Present only in debug mode.
    last_key: Option<Label>,
}

impl MainWindow {
    pub fn new(width: u16, height: u16, notes: Vec<Note>, debug: bool) -> Self {
        let geometry = Geometry::bordered(1, 1, width, height);
        let bottom = geometry.bottom();

        let help_width = text_width(HELP_TEXT.iter().copied()) + 2;
        let help_height = HELP_TEXT.len() as u16 + 2;
        let help = MultilineLabel::new(
            Geometry::bordered(geometry.x, bottom.saturating_sub(help_height - 1), help_width, help_height)
                .with_corners(Corners::BOTTOM_LEFT_PANEL),
            HELP_TEXT.iter().map(|line| line.to_string()).collect(),
        );

        let collapsed_help = Label::new(
            Geometry::bordered(
                geometry.x,
                bottom.saturating_sub(2),
                text_width([COLLAPSED_HELP]) + 2,
                3,
            )
            .with_corners(Corners::BOTTOM_LEFT_PANEL),
            COLLAPSED_HELP,
        );

        let last_key = debug.then(|| {
            Label::new(
                Geometry::bordered(
                    geometry.right().saturating_sub(DEBUG_PANEL_WIDTH - 1),
                    bottom.saturating_sub(DEBUG_PANEL_HEIGHT - 1),
                    DEBUG_PANEL_WIDTH,
                    DEBUG_PANEL_HEIGHT,
                )
                .with_corners(Corners::BOTTOM_RIGHT_PANEL),
                "",
            )
        });

        Self {
            geometry,
            notes: NoteList::new(notes),
            scroll: 0,
            help,
            collapsed_help,
            help_collapsed: true,
            last_key,
        }
    }

    pub fn notes(&self) -> &NoteList {
        &self.notes
    }

    /// Mutable access to the list. Call [`MainWindow::scroll_to_selection`]
    /// before the next draw.
    pub fn notes_mut(&mut self) -> &mut NoteList {
        &mut self.notes
    }

    pub fn is_help_collapsed(&self) -> bool {
        self.help_collapsed
    }

    pub fn toggle_help(&mut self) {
        self.help_collapsed = !self.help_collapsed;
    }

    pub fn is_debug(&self) -> bool {
        self.last_key.is_some()
    }

    pub fn set_last_key(&mut self, code: u32) {
        if let Some(label) = &mut self.last_key {
            label.set_text(format!(" {code:#x}"));
        }
    }

    pub fn last_key(&self) -> Option<&str> {
        self.last_key.as_ref().map(|l| l.text())
    }

    fn help_panel(&self) -> &dyn Drawable {
        if self.help_collapsed {
            &self.collapsed_help
        } else {
            &self.help
        }
    }

    /// Number of note rows visible above the corner panels.
    pub fn list_rows(&self) -> usize {
        let bounds = self.geometry.text_bounds();
        let mut panel_top = self.help_panel().bounds().y;
        if let Some(label) = &self.last_key {
            panel_top = panel_top.min(label.bounds().y);
        }
        usize::from(panel_top.saturating_sub(bounds.row_min))
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Adjust the scroll offset so the selected note is on screen.
    pub fn scroll_to_selection(&mut self) {
        let rows = self.list_rows();
        let selection = self.notes.selection();
        if rows == 0 {
            self.scroll = selection;
            return;
        }
        if selection < self.scroll {
            self.scroll = selection;
        } else if selection >= self.scroll + rows {
            self.scroll = selection + 1 - rows;
        }
        self.scroll = self.scroll.min(self.notes.len().saturating_sub(rows));
    }

    fn draw_row(&self, screen: &mut Screen, row: u16, note: &Note) -> io::Result<()> {
        let bounds = self.geometry.text_bounds();
        let width = bounds.width();
        let text = truncate_with_ellipsis(&note.title, width);
        let line = format!("{:<width$}", text, width = usize::from(width));
        screen.put_str_at(row, bounds.col_min, &line)
    }
}

impl Drawable for MainWindow {
    fn bounds(&self) -> Geometry {
        self.geometry
    }

    fn draw(&self, screen: &mut Screen) -> io::Result<()> {
        draw_frame(screen, &self.geometry)?;
        if let Some(label) = &self.last_key {
            label.draw(screen)?;
        }
        self.help_panel().draw(screen)?;

        let bounds = self.geometry.text_bounds();
        let visible = self
            .notes
            .notes()
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(self.list_rows());
        for (row, (index, note)) in (bounds.row_min..).zip(visible) {
            if index == self.notes.selection() {
                screen.with_palette(Palette::HIGHLIGHT, |s| self.draw_row(s, row, note))?;
            } else {
                self.draw_row(screen, row, note)?;
            }
        }
        Ok(())
    }
}

fn text_width<'a>(lines: impl IntoIterator<Item = &'a str>) -> u16 {
    let widest = lines.into_iter().map(str::len).max().unwrap_or(0);
    u16::try_from(widest).unwrap_or(u16::MAX)
}
