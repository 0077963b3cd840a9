//! Layout templates.
//!
//! Layouts wrap a rendered view. They are written for a template engine, identified by name,
//! e.g. `erb` or `jinja`, and looked up by template name in the application settings (inline
//! templates) or the views directory (`<views>/<name>.<extension>`).
pub mod cache;
pub mod erb;
pub mod jinja;

pub use cache::Templates;
pub use erb::Erb;
pub use jinja::Jinja;

use std::collections::HashMap;
use std::sync::Arc;

use crate::Error;

/// A template engine.
pub trait Engine: Send + Sync {
    /// Name used to select this engine, e.g. `erb`.
    fn name(&self) -> &str;

    /// Extension of template files written for this engine.
    fn extension(&self) -> &str {
        self.name()
    }

    /// Render a template, embedding `content` where the template yields.
    fn render(&self, name: &str, source: &str, content: &str) -> Result<String, Error>;
}

/// Options for rendering a named template.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateOptions {
    /// Wrap the template in the default layout.
    pub layout: bool,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self { layout: true }
    }
}

impl TemplateOptions {
    /// Render the template without a layout.
    pub fn without_layout() -> Self {
        Self { layout: false }
    }
}

/// Registered template engines.
#[derive(Clone)]
pub struct Engines {
    engines: HashMap<String, Arc<dyn Engine>>,
}

impl Default for Engines {
    fn default() -> Self {
        let mut engines = Self::empty();
        engines.register(Erb);
        engines.register(Jinja::new());
        engines
    }
}

impl std::fmt::Debug for Engines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.engines.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_list().entries(names).finish()
    }
}

impl Engines {
    /// No engines registered.
    pub fn empty() -> Self {
        Self {
            engines: HashMap::new(),
        }
    }

    pub fn register(&mut self, engine: impl Engine + 'static) -> &mut Self {
        self.engines
            .insert(engine.name().to_string(), Arc::new(engine));
        self
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Engine>, Error> {
        self.engines
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownEngine(name.to_string()))
    }
}
