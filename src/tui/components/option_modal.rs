//! # OptionModal
//!
//! A wrapped title over a grid of buttons, one per option, three to a row.
//! Tab and Shift-Tab move the highlight, Enter picks the highlighted
//! option, and Escape or Ctrl-C cancels.

use std::io;

use log::debug;

use crate::tui::component::{Drawable, draw_frame, wrap_lines};
use crate::tui::components::button::{BUTTON_HEIGHT, Button};
use crate::tui::components::label::MultilineLabel;
use crate::tui::dispatch::{OptionModalAction, option_modal_action};
use crate::tui::geometry::Geometry;
use crate::tui::selection::OptionSelection;
use crate::tui::terminal::Screen;
use crate::tui::ui::Ui;

const BUTTONS_PER_ROW: usize = 3;
// Border plus one blank cell on each side of the label.
const BUTTON_PADDING: u16 = 4;
const BUTTON_GAP: u16 = 2;
const ROW_PITCH: u16 = BUTTON_HEIGHT + 1;
const MIN_WIDTH: u16 = 40;

pub struct OptionModal {
    geometry: Geometry,
    title: MultilineLabel,
    options: Vec<Button>,
    selection: OptionSelection,
}

impl OptionModal {
    pub fn new(parent: &Geometry, title: &str, options: &[&str]) -> Self {
        let button_width = match options.iter().map(|o| o.len()).max() {
            Some(widest) => to_u16(widest) + BUTTON_PADDING,
            None => to_u16(title.len()),
        };
        let columns = to_u16(options.len().clamp(1, BUTTONS_PER_ROW));
        let rows = to_u16(options.len().div_ceil(BUTTONS_PER_ROW));
        let grid_width = columns * button_width + (columns - 1) * BUTTON_GAP;

        let width = (grid_width + 6)
            .max(MIN_WIDTH)
            .min(parent.text_bounds().width());
        let title_lines = wrap_lines(title, width.saturating_sub(4));
        let title_height = to_u16(title_lines.len());
        let height = title_height + 3 + rows * ROW_PITCH;

        let geometry = parent.centered(width, height);
        let (x, y) = (geometry.x, geometry.y);

        let title = MultilineLabel::new(
            Geometry::plain(x + 2, y + 1, geometry.width.saturating_sub(4), title_height),
            title_lines,
        );

        let left = x + geometry.width.saturating_sub(grid_width) / 2;
        let top = y + title_height + 2;
        let options = options
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let column = to_u16(i % BUTTONS_PER_ROW);
                let row = to_u16(i / BUTTONS_PER_ROW);
                Button::new(
                    left + column * (button_width + BUTTON_GAP),
                    top + row * ROW_PITCH,
                    button_width,
                    *text,
                )
            })
            .collect::<Vec<_>>();

        let selection = OptionSelection::new(options.len());
        Self {
            geometry,
            title,
            options,
            selection,
        }
    }

    fn refresh(&mut self, screen: &mut Screen) -> io::Result<()> {
        let current = self.selection.current();
        for (i, button) in self.options.iter_mut().enumerate() {
            button.set_selected(i == current);
        }
        self.draw(screen)
    }

    /// Run until an option is picked (`Some(index)`) or the prompt is
    /// cancelled (`None`). With no options, Enter also yields `None`.
    pub fn run(&mut self, ui: &mut Ui) -> io::Result<Option<usize>> {
        self.selection.reset();
        ui.screen.hide_cursor()?;
        self.refresh(&mut ui.screen)?;
        loop {
            let press = ui.next_key()?;
            let Some(action) = option_modal_action(&press.key) else {
                continue;
            };
            match action {
                OptionModalAction::Cancel => {
                    debug!("Option modal cancelled");
                    return Ok(None);
                }
                OptionModalAction::Choose => {
                    if self.options.is_empty() {
                        return Ok(None);
                    }
                    let choice = self.selection.current();
                    debug!("Option {} ({}) chosen", choice, self.options[choice].text());
                    return Ok(Some(choice));
                }
                OptionModalAction::Next => {
                    self.selection.select_next();
                    self.refresh(&mut ui.screen)?;
                }
                OptionModalAction::Prev => {
                    self.selection.select_prev();
                    self.refresh(&mut ui.screen)?;
                }
            }
        }
    }
}

impl Drawable for OptionModal {
    fn bounds(&self) -> Geometry {
        self.geometry
    }

    fn draw(&self, screen: &mut Screen) -> io::Result<()> {
        draw_frame(screen, &self.geometry)?;
        self.title.draw(screen)?;
        for button in &self.options {
            button.draw(screen)?;
        }
        Ok(())
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
