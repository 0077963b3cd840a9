//! Rwf Markup renders component views from request handlers.
//!
//! Views are plain Rust types that write HTML (or SVG) through a small markup builder. A handler
//! renders them with a content type, an optional layout template, or streams them straight into
//! the response, chunk by chunk.
//!
//! # Getting started
//!
//! Include the most used types with one import:
//!
//! ```
//! use rwf_markup::prelude::*;
//! ```
//!
//! ### Views
//!
//! A view implements the [`View`] trait:
//!
//! ```rust
//! use rwf_markup::prelude::*;
//!
//! struct Hello;
//!
//! impl View for Hello {
//!     fn view_template(&self, markup: &mut Markup<'_>) -> Result<(), Error> {
//!         markup.h1(&[], |m| m.text("Hello from Rwf!"));
//!         Ok(())
//!     }
//! }
//! ```
//!
//! ### Rendering
//!
//! Requests are handled inside a [`Scope`], which renders views into the response:
//!
//! ```rust
//! use std::sync::Arc;
//! # use rwf_markup::prelude::*;
//! # struct Hello;
//! # impl View for Hello {
//! #     fn view_template(&self, markup: &mut Markup<'_>) -> Result<(), Error> {
//! #         markup.h1(&[], |m| m.text("Hello from Rwf!"));
//! #         Ok(())
//! #     }
//! # }
//! let settings = Arc::new(Settings::default().template("layout", "<body><%= yield %></body>"));
//! let scope = Scope::new(Request::get("/"), settings);
//!
//! let response = scope
//!     .respond(&Hello, RenderOptions::new().layout(true))
//!     .unwrap();
//! ```
//!
//! ### Streaming
//!
//! Views rendered with `stream(true)` are sent as they are written. Call [`Markup::flush`] to
//! send what's been written so far. Streamed responses don't have a `Content-Length`
//! and are sent with chunked transfer encoding. [`Scope::pending_stream`] hands the response to
//! the server when streaming starts, so chunks go out while the view is still rendering.
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod prelude;
pub mod render;
pub mod scope;
pub mod template;
pub mod view;

pub use error::Error;
pub use render::{render, Host, Layout, RenderOptions, Rendered};
pub use scope::{PendingResponse, Scope, Settings};
pub use view::{Context, Helpers, Markup, View};

/// Serde is used for (de)serialization.
pub use serde;
/// Tokio is an asynchronous runtime for Rust.
pub use tokio;

/// Escape text printed inside HTML.
pub fn escape(string: &str) -> String {
    let mut result = String::with_capacity(string.len());

    for c in string.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            c => result.push(c),
        }
    }

    result
}
