//! notes-term library exports for testing

pub mod auth;
pub mod core;
pub mod store;
pub mod tui;

#[cfg(test)]
pub mod test_support;
