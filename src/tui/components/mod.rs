//! Widgets. Each owns its geometry and draws itself through
//! [`Drawable`](crate::tui::component::Drawable); the modals also own a
//! small key loop.

pub mod button;
pub mod input_modal;
pub mod label;
pub mod main_window;
pub mod message_box;
pub mod option_modal;
pub mod text_input;
