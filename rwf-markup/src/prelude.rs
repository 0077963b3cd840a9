//! Types and traits used in almost every handler and view.
//!
//! ```
//! use rwf_markup::prelude::*;
//! ```
pub use crate::config::Config;
pub use crate::http::{Method, Request, Response};
pub use crate::logging::Logger;
pub use crate::render::{Layout, RenderOptions, Rendered};
pub use crate::scope::{PendingResponse, Scope, Settings};
pub use crate::template::TemplateOptions;
pub use crate::view::{Context, Helpers, Inspect, Kind, Markup, View, ViewType};
pub use crate::Error;

pub use serde::{Deserialize, Serialize};
pub use tokio;
