//! # Core Application Logic
//!
//! Everything the note browser does that is not tied to the terminal or
//! to a particular note backend.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • NoteList (model)     │
//!                    │  • DraftCache           │
//!                    │  • Config / paths       │
//!                    │  • Editor launcher      │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Store    │      │    Auth    │
//!     │ (escapes)  │      │ (HTTP or   │      │  (device   │
//!     │            │      │  index)    │      │   flow)    │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`notes`]: `Note` and the ordered `NoteList` with its selection
//! - [`drafts`]: content-addressed local working copies and the conflict choices
//! - [`editor`]: the `Editor` seam and the external-process implementation
//! - [`config`]: config file, environment and CLI layering
//! - [`paths`]: where local state lives

pub mod config;
pub mod drafts;
pub mod editor;
pub mod notes;
pub mod paths;
