//! Request scope, the handler-side instance views are rendered from.
//!
//! A [`Scope`] holds the request being handled and the response being built, plus the
//! application [`Settings`]. Handlers call [`Scope::markup`] to render a view, then
//! [`Scope::finish`] to get the response.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rwf_markup::prelude::*;
//!
//! struct Link;
//!
//! impl View for Link {
//!     fn view_template(&self, markup: &mut Markup<'_>) -> Result<(), Error> {
//!         let href = markup.url("/bar", false)?;
//!         markup.a(&[("href", href.as_str())], |m| m.text("link"));
//!         Ok(())
//!     }
//! }
//!
//! let settings = Arc::new(Settings::default());
//! let request = Request::get("/link").with_mount_path("/foo");
//!
//! let mut scope = Scope::new(request, settings);
//! let rendered = scope.markup(&Link, RenderOptions::new()).unwrap();
//!
//! assert_eq!(rendered.body(), Some("<a href=\"/foo/bar\">link</a>"));
//! ```
//!
//! # Streaming
//!
//! Views render synchronously. To send a streamed view while it's still rendering, take a
//! [`PendingResponse`] before rendering, render on a blocking thread, and send the response
//! as soon as it's handed over:
//!
//! ```rust,ignore
//! let pending = scope.pending_stream();
//! let render = tokio::task::spawn_blocking(move || {
//!     scope.respond(&view, RenderOptions::new().stream(true))
//! });
//!
//! pending.wait().await?.send(&mut socket).await?;
//! render.await??;
//! ```
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::config::get_config;
use crate::http::{Body, Request, Response};
use crate::render::{render, Host, RenderOptions, Rendered};
use crate::template::{Engine, Engines, TemplateOptions, Templates};
use crate::view::{Channel, Helpers, Inspect};
use crate::Error;

/// Application settings shared by all requests.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory with template files.
    pub views: PathBuf,
    pub default_layout: String,
    pub cache_templates: bool,
    /// Content type of responses unless changed by the handler.
    pub content_type: String,
    engines: Engines,
    templates: HashMap<String, Arc<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        let views = &get_config().views;

        Self {
            views: views.path.clone(),
            default_layout: views.default_layout.clone(),
            cache_templates: views.cache_templates,
            content_type: views.content_type.clone(),
            engines: Engines::default(),
            templates: HashMap::new(),
        }
    }
}

impl Settings {
    /// Register an inline template. Inline templates take precedence over files.
    pub fn template(mut self, name: &str, source: &str) -> Self {
        self.templates
            .insert(name.to_string(), Arc::new(source.to_string()));
        self
    }

    /// Register a template engine.
    pub fn engine(mut self, engine: impl Engine + 'static) -> Self {
        self.engines.register(engine);
        self
    }

    pub fn views(mut self, path: impl Into<PathBuf>) -> Self {
        self.views = path.into();
        self
    }

    pub fn default_layout(mut self, name: &str) -> Self {
        self.default_layout = name.to_string();
        self
    }

    pub fn engines(&self) -> &Engines {
        &self.engines
    }

    /// Template source by name, inline first, then `<views>/<name>.<extension>`.
    pub fn source(&self, name: &str, extension: &str) -> Result<Arc<String>, Error> {
        if let Some(source) = self.templates.get(name) {
            return Ok(source.clone());
        }

        let path = self.views.join(format!("{}.{}", name, extension));
        Templates::cache().get(&path, self.cache_templates)
    }
}

/// A streamed response, handed over when the view starts streaming.
#[derive(Debug)]
pub struct PendingResponse {
    rx: oneshot::Receiver<Response>,
}

impl PendingResponse {
    /// Wait for the response. Headers are final, the body is filled while the view renders.
    ///
    /// Fails with [`Error::StreamClosed`] if the scope finished without streaming.
    pub async fn wait(self) -> Result<Response, Error> {
        self.rx.await.map_err(|_| Error::StreamClosed)
    }
}

/// The request being handled.
pub struct Scope {
    request: Request,
    response: Response,
    settings: Arc<Settings>,
    pending: Option<oneshot::Sender<Response>>,
}

impl Scope {
    pub fn new(request: Request, settings: Arc<Settings>) -> Self {
        let mut response = Response::new();
        response.set_content_type(&settings.content_type);

        Self {
            request,
            response,
            settings,
            pending: None,
        }
    }

    /// Hand the response over as soon as a view starts streaming into it.
    pub fn pending_stream(&mut self) -> PendingResponse {
        let (tx, rx) = oneshot::channel();
        self.pending = Some(tx);
        PendingResponse { rx }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    /// The response built so far.
    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set the response content type. Accepts MIME types and short names like `svg`.
    pub fn content_type(&mut self, content_type: &str) {
        self.response.set_content_type(content_type);
    }

    /// Render a view.
    ///
    /// See [`crate::render::render`].
    pub fn markup<T: Inspect + ?Sized>(
        &mut self,
        view: &T,
        options: RenderOptions,
    ) -> Result<Rendered, Error> {
        render(self, view, options)
    }

    /// Render a named template, e.g. a page that doesn't have a view.
    pub fn template(
        &mut self,
        engine: &str,
        name: &str,
        options: &TemplateOptions,
    ) -> Result<String, Error> {
        self.render_template(engine, name, options, "")
    }

    /// Finish handling the request.
    ///
    /// A response already handed over through [`Scope::pending_stream`] isn't returned again;
    /// the response returned instead is empty.
    pub fn finish(mut self, rendered: Rendered) -> Response {
        if let Rendered::Body(body) = rendered {
            self.response.set_body(Body::Html(body));
        }

        self.response
    }

    /// Render a view and finish the request.
    pub fn respond<T: Inspect + ?Sized>(
        mut self,
        view: &T,
        options: RenderOptions,
    ) -> Result<Response, Error> {
        let rendered = self.markup(view, options)?;
        Ok(self.finish(rendered))
    }
}

impl Helpers for Scope {
    fn request(&self) -> &Request {
        &self.request
    }
}

impl Host for Scope {
    fn set_content_type(&mut self, content_type: &str) {
        self.content_type(content_type);
    }

    fn stream(&mut self) -> Box<dyn Channel> {
        let sender = self.response.stream();

        if let Some(pending) = self.pending.take() {
            let response = std::mem::take(&mut self.response);

            if let Err(response) = pending.send(response) {
                warn!("streamed response no longer awaited, keeping it in scope");
                self.response = response;
            }
        }

        Box::new(sender)
    }

    fn render_template(
        &mut self,
        engine: &str,
        name: &str,
        options: &TemplateOptions,
        content: &str,
    ) -> Result<String, Error> {
        let engine = self.settings.engines.get(engine)?;
        let source = self.settings.source(name, engine.extension())?;

        debug!("rendering template \"{}\" with {}", name, engine.name());

        let html = engine.render(name, &source, content)?;

        let layout = &self.settings.default_layout;
        if !options.layout || layout == name {
            return Ok(html);
        }

        // The default layout is optional.
        match self.settings.source(layout, engine.extension()) {
            Ok(source) => engine.render(layout, &source, &html),
            Err(Error::TemplateDoesNotExist(_)) => Ok(html),
            Err(err) => Err(err),
        }
    }

    fn default_layout(&self) -> &str {
        &self.settings.default_layout
    }

    fn helpers(&self) -> &dyn Helpers {
        self
    }
}
