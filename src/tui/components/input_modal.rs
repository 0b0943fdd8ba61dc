//! # InputModal
//!
//! A titled form of named text fields with OK and Cancel buttons, used for
//! every free-text prompt and (with no fields) for yes/no confirmations.
//!
//! ## Layout
//!
//! ```text
//! ╔══════════════════════════════════════════╗  y
//! ║                                          ║
//! ║ Title                                    ║  y+2
//! ║                                          ║
//! ║  Field name                              ║  y+4+6i
//! ║  ╔════════════════════════════════════╗  ║
//! ║  ║value                               ║  ║
//! ║  ╚════════════════════════════════════╝  ║
//! ║                                          ║
//! ║                                          ║
//! ║    ╔════════╗              ╔════════╗    ║  y+4+6n
//! ║    ║   OK   ║              ║ Cancel ║    ║
//! ║    ╚════════╝              ╚════════╝    ║
//! ║                                          ║
//! ╚══════════════════════════════════════════╝  y+6n+8
//! ```
//!
//! Each field takes six rows, the button row takes another six, and three
//! rows of chrome make up the rest. The box is centered in its parent.
//!
//! ## Input
//!
//! The modal owns the keyboard until it returns. Enter on a field or on
//! OK validates (every field must be non-empty) and then runs the save
//! callback; a failure of either shows an error box and sends focus back
//! to its starting position. Enter on Cancel, Escape and Ctrl-C all
//! cancel.

use std::io;

use log::{debug, info};

use crate::tui::component::{Drawable, draw_frame};
use crate::tui::components::button::Button;
use crate::tui::components::label::Label;
use crate::tui::components::message_box::MessageBox;
use crate::tui::components::text_input::TextInput;
use crate::tui::dispatch::{InputModalAction, input_modal_action};
use crate::tui::geometry::Geometry;
use crate::tui::selection::{InputFocus, InputSelection};
use crate::tui::terminal::Screen;
use crate::tui::ui::Ui;

const MIN_WIDTH: u16 = 80;
const ROWS_PER_FIELD: u16 = 6;
const CHROME_ROWS: u16 = 3;
const BUTTON_WIDTH: u16 = 20;
const BUTTON_MARGIN: u16 = 5;

struct InputField {
    label: Label,
    input: TextInput,
}

pub struct InputModal {
    geometry: Geometry,
    title: Label,
    fields: Vec<InputField>,
    ok: Button,
    cancel: Button,
    selection: InputSelection,
}

impl InputModal {
    /// `fields` are `(name, default value)` pairs, shown in order.
    pub fn new(
        parent: &Geometry,
        title: &str,
        ok_label: &str,
        cancel_label: &str,
        fields: &[(&str, &str)],
    ) -> Self {
        let widest_name = fields.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        let wanted_width = MIN_WIDTH
            .max(to_u16(widest_name + 6))
            .max(to_u16(title.len() + 4));
        let field_count = to_u16(fields.len());
        let wanted_height = (field_count + 1) * ROWS_PER_FIELD + CHROME_ROWS;

        let geometry = parent.centered(wanted_width, wanted_height);
        let (x, y, width) = (geometry.x, geometry.y, geometry.width);

        let title = Label::new(Geometry::plain(x + 2, y + 2, width.saturating_sub(4), 1), title);

        let fields = fields
            .iter()
            .zip(0u16..)
            .map(|((name, value), i)| {
                let row = y + 4 + ROWS_PER_FIELD * i;
                InputField {
                    label: Label::new(Geometry::plain(x + 3, row, width.saturating_sub(6), 1), *name),
                    input: TextInput::new(x + 3, row + 1, width.saturating_sub(6), *value),
                }
            })
            .collect();

        let button_row = y + 4 + ROWS_PER_FIELD * field_count;
        let ok = Button::new(x + BUTTON_MARGIN, button_row, BUTTON_WIDTH, ok_label);
        let cancel_x = (x + width)
            .saturating_sub(BUTTON_WIDTH + BUTTON_MARGIN)
            .max(x + 1);
        let cancel = Button::new(cancel_x, button_row, BUTTON_WIDTH, cancel_label);

        Self {
            geometry,
            title,
            fields,
            ok,
            cancel,
            selection: InputSelection::new(field_count.into()),
        }
    }

    /// A yes/no prompt: no fields, OK and Cancel.
    pub fn confirmation(parent: &Geometry, prompt: &str) -> Self {
        Self::new(parent, prompt, "OK", "Cancel", &[])
    }

    pub fn selection(&self) -> &InputSelection {
        &self.selection
    }

    /// Current field values, in field order.
    pub fn values(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| f.input.text().to_string())
            .collect()
    }

    /// Every field must hold something; the first empty one is named.
    pub fn validate(&self) -> Result<(), String> {
        match self.fields.iter().find(|f| f.input.text().is_empty()) {
            Some(field) => Err(format!(
                "non-empty value required for field {}",
                field.label.text()
            )),
            None => Ok(()),
        }
    }

    /// Redraw everything and put the cursor where the focus is.
    fn refresh(&mut self, screen: &mut Screen) -> io::Result<()> {
        let focus = self.selection.focus();
        self.ok.set_selected(focus == InputFocus::Ok);
        self.cancel.set_selected(focus == InputFocus::Cancel);
        self.draw(screen)?;

        match self.selection.current_field() {
            Some(i) => {
                let (row, col) = self.fields[i].input.cursor_position();
                screen.move_to(row, col)?;
                screen.show_cursor()
            }
            None => screen.hide_cursor(),
        }
    }

    /// Run until confirmed (`true`) or cancelled (`false`) with no save step.
    pub fn run(&mut self, ui: &mut Ui) -> io::Result<bool> {
        self.run_with(ui, |_| Ok(()))
    }

    /// Run until confirmed or cancelled. `save` gets the field values after
    /// they validate; an `Err` from it is shown like a validation error.
    pub fn run_with<F>(&mut self, ui: &mut Ui, mut save: F) -> io::Result<bool>
    where
        F: FnMut(&[String]) -> Result<(), String>,
    {
        self.refresh(&mut ui.screen)?;
        loop {
            let press = ui.next_key()?;
            let Some(action) = input_modal_action(&press.key) else {
                continue;
            };

            match action {
                InputModalAction::Cancel => {
                    debug!("Input modal cancelled");
                    return Ok(false);
                }
                InputModalAction::Activate if self.selection.focus() == InputFocus::Cancel => {
                    debug!("Input modal cancelled");
                    return Ok(false);
                }
                InputModalAction::Activate => {
                    let outcome = self.validate().and_then(|()| save(&self.values()));
                    match outcome {
                        Ok(()) => return Ok(true),
                        Err(message) => {
                            info!("Input rejected: {}", message);
                            MessageBox::error(&self.geometry, &message).show(ui)?;
                            self.selection.reset();
                            self.refresh(&mut ui.screen)?;
                        }
                    }
                }
                InputModalAction::Next => {
                    self.selection.select_next();
                    self.refresh(&mut ui.screen)?;
                }
                InputModalAction::Prev => {
                    self.selection.select_prev();
                    self.refresh(&mut ui.screen)?;
                }
                InputModalAction::Backspace => {
                    if let Some(i) = self.selection.current_field() {
                        if self.fields[i].input.backspace() {
                            self.refresh(&mut ui.screen)?;
                        }
                    }
                }
                InputModalAction::Insert(c) => {
                    if let Some(i) = self.selection.current_field() {
                        self.fields[i].input.push(c);
                        self.refresh(&mut ui.screen)?;
                    }
                }
            }
        }
    }
}

impl Drawable for InputModal {
    fn bounds(&self) -> Geometry {
        self.geometry
    }

    fn draw(&self, screen: &mut Screen) -> io::Result<()> {
        draw_frame(screen, &self.geometry)?;
        self.title.draw(screen)?;
        for field in &self.fields {
            field.label.draw(screen)?;
            field.input.draw(screen)?;
        }
        self.ok.draw(screen)?;
        self.cancel.draw(screen)
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedKeys, SharedBuffer};
    use std::cell::Cell;

    const TAB: &str = "\t";
    const SHIFT_TAB: &str = "\x1b[Z";
    const ENTER: &str = "\r";
    const ESC: &str = "\x1b";
    const BACKSPACE: &str = "\x7f";

    fn parent() -> Geometry {
        Geometry::bordered(1, 1, 120, 40)
    }

    fn scripted_ui(keys: &[&str]) -> (Ui, SharedBuffer) {
        let buf = SharedBuffer::new();
        let ui = Ui::new(
            Screen::new(Box::new(buf.clone())),
            Box::new(ScriptedKeys::new(keys)),
        );
        (ui, buf)
    }

    #[test]
    fn test_layout() {
        let modal = InputModal::new(&parent(), "Create note", "OK", "Cancel", &[("Title", "")]);
        let g = modal.bounds();
        assert_eq!((g.width, g.height), (80, 2 * 6 + 3));
        // Centered in the 118x38 interior starting at (2, 2)
        assert_eq!((g.x, g.y), (2 + (118 - 80) / 2, 2 + (38 - 15) / 2));
        assert_eq!(modal.fields[0].label.bounds().y, g.y + 4);
        assert_eq!(modal.fields[0].input.bounds().y, g.y + 5);
        assert_eq!(modal.ok.bounds().y, g.y + 10);
        assert_eq!(modal.ok.bounds().x, g.x + 5);
        assert_eq!(modal.cancel.bounds().right(), g.right() - 5);
    }

    #[test]
    fn test_long_field_name_widens_modal() {
        let name = "n".repeat(100);
        let modal = InputModal::new(&parent(), "t", "OK", "Cancel", &[(&name, "")]);
        assert_eq!(modal.bounds().width, 106);
    }

    #[test]
    fn test_typing_then_enter_confirms_with_values() {
        let (mut ui, _) = scripted_ui(&["h", "i", ENTER]);
        let mut modal = InputModal::new(&parent(), "Create note", "OK", "Cancel", &[("Title", "")]);
        assert!(modal.run(&mut ui).unwrap());
        assert_eq!(modal.values(), vec!["hi"]);
    }

    #[test]
    fn test_backspace_and_non_ascii() {
        let (mut ui, _) = scripted_ui(&["a", "b", BACKSPACE, "é", "c", ENTER]);
        let mut modal = InputModal::new(&parent(), "t", "OK", "Cancel", &[("Title", "")]);
        assert!(modal.run(&mut ui).unwrap());
        assert_eq!(modal.values(), vec!["ac"]);
    }

    #[test]
    fn test_defaults_are_prefilled() {
        let (mut ui, _) = scripted_ui(&["!", ENTER]);
        let mut modal = InputModal::new(&parent(), "Rename note", "OK", "Cancel", &[("Title", "Old")]);
        assert!(modal.run(&mut ui).unwrap());
        assert_eq!(modal.values(), vec!["Old!"]);
    }

    #[test]
    fn test_escape_and_ctrl_c_cancel() {
        for key in [ESC, "\x03"] {
            let (mut ui, _) = scripted_ui(&["x", key]);
            let mut modal = InputModal::new(&parent(), "t", "OK", "Cancel", &[("Title", "")]);
            assert!(!modal.run(&mut ui).unwrap());
        }
    }

    #[test]
    fn test_enter_on_cancel_cancels() {
        let (mut ui, _) = scripted_ui(&["x", SHIFT_TAB, ENTER]);
        let mut modal = InputModal::new(&parent(), "t", "OK", "Cancel", &[("Title", "")]);
        assert!(!modal.run(&mut ui).unwrap());
    }

    #[test]
    fn test_enter_on_ok_confirms() {
        let (mut ui, _) = scripted_ui(&["x", TAB, ENTER]);
        let mut modal = InputModal::new(&parent(), "t", "OK", "Cancel", &[("Title", "")]);
        assert!(modal.run(&mut ui).unwrap());
    }

    #[test]
    fn test_typing_on_a_button_is_ignored() {
        let (mut ui, _) = scripted_ui(&["a", TAB, "b", BACKSPACE, ENTER]);
        let mut modal = InputModal::new(&parent(), "t", "OK", "Cancel", &[("Title", "")]);
        assert!(modal.run(&mut ui).unwrap());
        assert_eq!(modal.values(), vec!["a"]);
    }

    #[test]
    fn test_validation_names_empty_field_and_skips_save() {
        // Fill only the first field, submit, dismiss the error, then cancel
        let (mut ui, buf) = scripted_ui(&["a", ENTER, " ", ESC]);
        let mut modal = InputModal::new(
            &parent(),
            "Import",
            "OK",
            "Cancel",
            &[("Path", ""), ("Title", "")],
        );
        let saves = Cell::new(0);
        let confirmed = modal
            .run_with(&mut ui, |_| {
                saves.set(saves.get() + 1);
                Ok(())
            })
            .unwrap();

        assert!(!confirmed);
        assert_eq!(saves.get(), 0);
        let out = buf.contents();
        assert!(out.contains("non-empty value required for field Title"));
        assert!(out.contains("\x1b[41m"));
    }

    #[test]
    fn test_failed_validation_resets_focus_to_first_field() {
        let (mut ui, _) = scripted_ui(&[TAB, TAB, ENTER, " ", "z", TAB, "y", ENTER]);
        let mut modal = InputModal::new(
            &parent(),
            "t",
            "OK",
            "Cancel",
            &[("A", ""), ("B", "")],
        );
        assert!(modal.run(&mut ui).unwrap());
        assert_eq!(modal.values(), vec!["z", "y"]);
    }

    #[test]
    fn test_save_error_is_shown_and_modal_stays_open() {
        let (mut ui, buf) = scripted_ui(&["a", ENTER, " ", ENTER]);
        let mut modal = InputModal::new(&parent(), "t", "OK", "Cancel", &[("Title", "")]);
        let attempts = Cell::new(0);
        let confirmed = modal
            .run_with(&mut ui, |values| {
                attempts.set(attempts.get() + 1);
                assert_eq!(values, ["a"]);
                if attempts.get() == 1 {
                    Err("server said no".to_string())
                } else {
                    Ok(())
                }
            })
            .unwrap();
        assert!(confirmed);
        assert_eq!(attempts.get(), 2);
        assert!(buf.contents().contains("server said no"));
    }

    #[test]
    fn test_confirmation_has_no_fields() {
        let (mut ui, _) = scripted_ui(&[ENTER]);
        let mut modal = InputModal::confirmation(&parent(), "Are you sure you want to leave?");
        assert_eq!(modal.selection().focus(), InputFocus::Ok);
        assert!(modal.run(&mut ui).unwrap());

        let (mut ui, _) = scripted_ui(&[TAB, ENTER]);
        let mut modal = InputModal::confirmation(&parent(), "Are you sure you want to leave?");
        assert!(!modal.run(&mut ui).unwrap());
    }

    #[test]
    fn test_focused_field_shows_cursor_and_buttons_hide_it() {
        let (mut ui, buf) = scripted_ui(&[TAB, ESC]);
        let mut modal = InputModal::new(&parent(), "t", "OK", "Cancel", &[("Title", "")]);
        modal.run(&mut ui).unwrap();
        assert!(modal.ok.is_selected());
        assert!(!modal.cancel.is_selected());
        let out = buf.contents();
        let shown = out.find("\x1b[?25h").unwrap();
        let hidden = out.rfind("\x1b[?25l").unwrap();
        assert!(shown < hidden);
    }
}
