//! Core library modules.
//!
//! - **config**: server and client settings, with environment overrides
//! - **data_storage**: per-user data directory
//! - **formatter**: date display and deadline parsing
//! - **messages**: every user-facing text and the output macros
//! - **tagged**: date-preserving JSON envelope used on the wire
//! - **task**: the task record, drafts, and partial updates
//! - **view**: list and item view state, and table output

pub mod config;
pub mod data_storage;
pub mod formatter;
pub mod messages;
pub mod tagged;
pub mod task;
pub mod view;
