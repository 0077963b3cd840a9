//! ERB-style layouts.
//!
//! Supports the one tag a layout needs: `<%= yield %>`, replaced by the wrapped content.
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use super::Engine;
use crate::Error;

static YIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"<%=\s*yield\s*%>").expect("yield regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct Erb;

impl Engine for Erb {
    fn name(&self) -> &str {
        "erb"
    }

    fn render(&self, _name: &str, source: &str, content: &str) -> Result<String, Error> {
        Ok(YIELD.replace_all(source, NoExpand(content)).into_owned())
    }
}
