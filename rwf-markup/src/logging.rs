//! Logging through `tracing_subscriber`.
//!
//! Rendering logs at `debug` (dispatch mode, layouts, template loads) and `warn` (closed
//! streams). [`Logger::init`] sends them to stderr, filtered by `RUST_LOG`, `INFO` if unset.
//! Applications that install their own subscriber don't need it; theirs is kept.
//!
//! ### Example
//!
//! ```rust
//! use rwf_markup::prelude::*;
//!
//! Logger::init();
//! ```
use once_cell::sync::OnceCell;
use tracing::debug;
use tracing_subscriber::{filter::LevelFilter, fmt, util::SubscriberInitExt, EnvFilter};

use crate::config::get_config;

static INSTALLED: OnceCell<bool> = OnceCell::new();

pub struct Logger;

impl Logger {
    /// Install the stderr subscriber, once per process.
    ///
    /// Returns `false` if another subscriber was already installed.
    pub fn init() -> bool {
        *INSTALLED.get_or_init(|| {
            let installed = install();
            get_config().log_info();
            installed
        })
    }
}

fn install() -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let result = fmt()
        .with_env_filter(filter)
        .with_ansi(get_config().general.tty)
        .with_target(false)
        .finish()
        .try_init();

    match result {
        Ok(()) => true,
        Err(err) => {
            debug!("keeping existing subscriber: {}", err);
            false
        }
    }
}
