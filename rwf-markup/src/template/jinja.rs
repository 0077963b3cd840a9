//! Jinja layouts, rendered with `minijinja`.
//!
//! The wrapped content is available as `{{ content }}` and isn't escaped.
use minijinja::{context, value::Value, Environment};

use super::Engine;
use crate::Error;

pub struct Jinja {
    env: Environment<'static>,
}

impl Default for Jinja {
    fn default() -> Self {
        Self::new()
    }
}

impl Jinja {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| minijinja::AutoEscape::Html);
        Self { env }
    }
}

impl Engine for Jinja {
    fn name(&self) -> &str {
        "jinja"
    }

    fn render(&self, name: &str, source: &str, content: &str) -> Result<String, Error> {
        let html = self.env.render_named_str(
            name,
            source,
            context! {
                content => Value::from_safe_string(content.to_string()),
            },
        )?;

        Ok(html)
    }
}
