//! # Tasklist
//!
//! A small task tracker: an HTTP service over SQLite and a command-line client
//! for it.
//!
//! ## Features
//!
//! - **Task API**: list, sort by deadline, create, partially update, delete
//! - **Tagged values**: responses keep dates as dates across the wire
//! - **Views**: list and item state with optimistic updates
//! - **Migrations**: versioned schema upgrades on open
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasklist::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
