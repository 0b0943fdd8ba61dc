//! Key tables. The main window and each modal kind read keys the same
//! way but map them to disjoint sets of actions.

use super::event::{ControlKey, EscapeSequence, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    Up,
    Down,
    Create,
    Rename,
    Delete,
    Import,
    ToggleHelp,
    Open,
    Quit,
}

pub fn main_action(key: &Key) -> Option<MainAction> {
    let action = match key {
        Key::Printable('k') | Key::Sequence(EscapeSequence::Up) => MainAction::Up,
        Key::Printable('j') | Key::Sequence(EscapeSequence::Down) => MainAction::Down,
        Key::Control(ControlKey::CtrlN) => MainAction::Create,
        Key::Control(ControlKey::CtrlR) => MainAction::Rename,
        Key::Control(ControlKey::CtrlD) => MainAction::Delete,
        Key::Control(ControlKey::Tab) => MainAction::Import,
        Key::Control(ControlKey::CtrlH) => MainAction::ToggleHelp,
        Key::Control(ControlKey::Enter) => MainAction::Open,
        Key::Printable('q') | Key::Control(ControlKey::CtrlC) => MainAction::Quit,
        _ => return None,
    };
    Some(action)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputModalAction {
    Cancel,
    /// Enter: submit or cancel depending on focus.
    Activate,
    Next,
    Prev,
    Backspace,
    Insert(char),
}

pub fn input_modal_action(key: &Key) -> Option<InputModalAction> {
    let action = match key {
        Key::Control(ControlKey::Escape | ControlKey::CtrlC) => InputModalAction::Cancel,
        Key::Control(ControlKey::Enter) => InputModalAction::Activate,
        Key::Control(ControlKey::Tab) => InputModalAction::Next,
        Key::Sequence(EscapeSequence::ShiftTab) => InputModalAction::Prev,
        Key::Control(ControlKey::Backspace) => InputModalAction::Backspace,
        Key::Printable(c) => InputModalAction::Insert(*c),
        _ => return None,
    };
    Some(action)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionModalAction {
    Cancel,
    Choose,
    Next,
    Prev,
}

pub fn option_modal_action(key: &Key) -> Option<OptionModalAction> {
    let action = match key {
        Key::Control(ControlKey::Escape | ControlKey::CtrlC) => OptionModalAction::Cancel,
        Key::Control(ControlKey::Enter) => OptionModalAction::Choose,
        Key::Control(ControlKey::Tab) => OptionModalAction::Next,
        Key::Sequence(EscapeSequence::ShiftTab) => OptionModalAction::Prev,
        _ => return None,
    };
    Some(action)
}
