//! Macros for printing application messages.
//!
//! Every macro routes its output in one of two ways:
//!
//! ```text
//! msg_info!(..) ──▶ TASKLIST_DEBUG or RUST_LOG set? ──yes──▶ tracing::info!
//!                                                   └─no───▶ println!
//! ```
//!
//! so terminal users get plain lines. The server installs a `tracing`
//! subscriber and then calls [`use_tracing_output`], so all of its messages
//! become structured events.
//!
//! ## Macros
//!
//! - **`msg_print!`**: plain message
//! - **`msg_success!`**: ✅ prefix
//! - **`msg_info!`**: ℹ️ prefix
//! - **`msg_warning!`**: ⚠️ prefix
//! - **`msg_error!`**: ❌ prefix, stderr
//! - **`msg_debug!`**: debug mode only
//! - **`msg_error_anyhow!`** / **`msg_bail_anyhow!`**: build or return an `anyhow::Error`
//!
//! ```rust
//! use tasklist::{msg_info, msg_error_anyhow};
//! use tasklist::libs::messages::Message;
//!
//! msg_info!(Message::TasksHeader);
//! let error = msg_error_anyhow!(Message::TaskNotFoundWithId(7));
//! assert!(error.to_string().contains("7"));
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Returns `true` when `TASKLIST_DEBUG` or `RUST_LOG` is set.
///
/// The environment is inspected once; later calls read the cached value.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("TASKLIST_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Sends every later message to `tracing`, as once a subscriber is installed.
///
/// Returns `false` when the mode was already fixed to plain output by an
/// earlier message.
pub fn use_tracing_output() -> bool {
    DEBUG_MODE.set(true).is_ok() || is_debug_mode()
}

/// Prints a message, optionally surrounded by blank lines.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n✅ {}\n", $msg);
        } else {
            println!("\n✅ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\nℹ️ {}\n", $msg);
        } else {
            println!("\nℹ️ {}\n", $msg);
        }
    };
}

/// Emits a debug event; silent unless debug mode is on.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Builds an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

/// Returns early with an `anyhow::Error` built from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
