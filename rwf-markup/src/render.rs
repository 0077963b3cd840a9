//! Rendering views from a request handler.
//!
//! [`render`] takes a value that should be a view, checks the options, picks the content type
//! and renders the view either into a string, optionally wrapped in a layout, or straight into
//! the response stream.
//!
//! The handler side is abstracted by the [`Host`] trait. [`crate::Scope`] implements it.
use tracing::debug;

use crate::template::TemplateOptions;
use crate::view::{Channel, Context, Helpers, Inspect, Kind};
use crate::{config::get_config, Error};

/// Which layout to wrap a view in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Layout {
    /// No layout.
    #[default]
    None,
    /// The host's default layout.
    Default,
    /// A layout template by name.
    Named(String),
}

impl Layout {
    pub fn is_set(&self) -> bool {
        !matches!(self, Layout::None)
    }
}

impl From<bool> for Layout {
    fn from(layout: bool) -> Self {
        if layout {
            Layout::Default
        } else {
            Layout::None
        }
    }
}

impl From<&str> for Layout {
    fn from(name: &str) -> Self {
        Layout::Named(name.to_string())
    }
}

impl From<String> for Layout {
    fn from(name: String) -> Self {
        Layout::Named(name)
    }
}

/// How to render a view.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Content type of the response. MIME type or short name like `xml`.
    pub content_type: Option<String>,
    pub layout: Layout,
    /// Engine the layout template is written for.
    pub layout_engine: String,
    /// Write the view directly into the response as it renders.
    pub stream: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            content_type: None,
            layout: Layout::None,
            layout_engine: get_config().views.layout_engine.clone(),
            stream: false,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_type(mut self, content_type: impl ToString) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// `true` for the default layout, `false` for none, or a layout name.
    pub fn layout(mut self, layout: impl Into<Layout>) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn layout_engine(mut self, engine: impl ToString) -> Self {
        self.layout_engine = engine.to_string();
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }
}

/// Result of rendering a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// The complete response body.
    Body(String),
    /// The view was written to the response stream.
    Streaming,
}

impl Rendered {
    pub fn body(&self) -> Option<&str> {
        match self {
            Rendered::Body(body) => Some(body),
            Rendered::Streaming => None,
        }
    }
}

/// What a request handler provides to render views.
pub trait Host {
    /// Set the response content type. Accepts MIME types and short names.
    fn set_content_type(&mut self, content_type: &str);

    /// Switch the response to streaming and return the channel to write it with.
    fn stream(&mut self) -> Box<dyn Channel>;

    /// Render a named template with an engine.
    fn render_template(
        &mut self,
        engine: &str,
        name: &str,
        options: &TemplateOptions,
        content: &str,
    ) -> Result<String, Error>;

    /// Name of the layout used when the layout is requested with `true`.
    fn default_layout(&self) -> &str;

    /// Helpers exposed to views.
    fn helpers(&self) -> &dyn Helpers;
}

/// Render a view.
///
/// Fails with [`Error::Type`] if `candidate` isn't a view, and with
/// [`Error::IncompatibleOption`] if both a layout and streaming are requested. Both are checked
/// before the host is touched.
pub fn render<T: Inspect + ?Sized>(
    host: &mut dyn Host,
    candidate: &T,
    options: RenderOptions,
) -> Result<Rendered, Error> {
    let view = candidate
        .as_view()
        .ok_or_else(|| Error::not_a_view(candidate.preview(), candidate.type_name()))?;

    if options.layout.is_set() && options.stream {
        return Err(Error::IncompatibleOption(
            "streaming is not compatible with layout",
        ));
    }

    let content_type = match options.content_type {
        Some(content_type) => Some(content_type),
        None if view.kind() == Kind::Svg && !options.layout.is_set() => Some("svg".to_string()),
        None => None,
    };

    if let Some(ref content_type) = content_type {
        host.set_content_type(content_type);
    }

    let layout = match options.layout {
        Layout::None => None,
        Layout::Default => Some(host.default_layout().to_string()),
        Layout::Named(name) => Some(name),
    };

    debug!(
        "rendering {} (stream: {}, layout: {})",
        candidate.type_name(),
        options.stream,
        layout.as_deref().unwrap_or("none")
    );

    if options.stream {
        let mut channel = host.stream();
        let context = Context::with_helpers(host.helpers());
        view.call_into(channel.as_mut(), &context)?;

        return Ok(Rendered::Streaming);
    }

    let output = view.call(&Context::with_helpers(host.helpers()))?;

    match layout {
        Some(layout) => {
            let html = host.render_template(
                &options.layout_engine,
                &layout,
                &TemplateOptions::without_layout(),
                &output,
            )?;

            Ok(Rendered::Body(html))
        }

        None => Ok(Rendered::Body(output)),
    }
}
