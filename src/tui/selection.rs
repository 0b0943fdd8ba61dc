//! Focus state machines for the two modal kinds.
//!
//! Input modal focus cycles through a fixed ring, forward on Tab and
//! backward on Shift-Tab:
//!
//! ```text
//! Field(0) → Field(1) → … → Field(n-1) → Ok → Cancel ─┐
//!    ▲                                                  │
//!    └──────────────────────────────────────────────────┘
//! ```
//!
//! With no fields the ring is just `Ok ↔ Cancel`. Option modals always
//! have exactly one highlighted option and wrap modulo the option count.

/// What currently has focus in an input modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFocus {
    Field(usize),
    Ok,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSelection {
    field_count: usize,
    focus: InputFocus,
}

impl InputSelection {
    pub fn new(field_count: usize) -> Self {
        Self {
            field_count,
            focus: Self::initial_focus(field_count),
        }
    }

    fn initial_focus(field_count: usize) -> InputFocus {
        if field_count > 0 {
            InputFocus::Field(0)
        } else {
            InputFocus::Ok
        }
    }

    pub fn focus(&self) -> InputFocus {
        self.focus
    }

    /// Index of the focused field, if a field has focus.
    pub fn current_field(&self) -> Option<usize> {
        match self.focus {
            InputFocus::Field(i) => Some(i),
            _ => None,
        }
    }

    /// Back to the first field, or OK when there are no fields.
    pub fn reset(&mut self) {
        self.focus = Self::initial_focus(self.field_count);
    }

    pub fn select_next(&mut self) {
        self.focus = match self.focus {
            InputFocus::Field(i) if i + 1 < self.field_count => InputFocus::Field(i + 1),
            InputFocus::Field(_) => InputFocus::Ok,
            InputFocus::Ok => InputFocus::Cancel,
            InputFocus::Cancel => Self::initial_focus(self.field_count),
        };
    }

    pub fn select_prev(&mut self) {
        self.focus = match self.focus {
            InputFocus::Field(0) => InputFocus::Cancel,
            InputFocus::Field(i) => InputFocus::Field(i - 1),
            InputFocus::Cancel => InputFocus::Ok,
            InputFocus::Ok if self.field_count > 0 => InputFocus::Field(self.field_count - 1),
            InputFocus::Ok => InputFocus::Cancel,
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSelection {
    option_count: usize,
    current: usize,
}

impl OptionSelection {
    pub fn new(option_count: usize) -> Self {
        Self {
            option_count,
            current: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn select_next(&mut self) {
        if self.option_count > 0 {
            self.current = (self.current + 1) % self.option_count;
        }
    }

    pub fn select_prev(&mut self) {
        if self.option_count > 0 {
            self.current = (self.current + self.option_count - 1) % self.option_count;
        }
    }
}
