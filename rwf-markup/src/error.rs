//! Global error type.
//!
//! Both dispatch errors, [`Error::Type`] and [`Error::IncompatibleOption`], are raised
//! before anything is written to the response.
use std::path::PathBuf;
use thiserror::Error;

/// Longest preview of a rejected value included in [`Error::Type`].
pub const MAX_PREVIEW: usize = 32;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Expected a view instance, received {0}")]
    Type(String),

    #[error("{0}")]
    IncompatibleOption(&'static str),

    #[error("view context is not available, render the view through a scope")]
    MissingContext,

    #[error("template \"{0}\" does not exist")]
    TemplateDoesNotExist(PathBuf),

    #[error("layout engine \"{0}\" is not registered")]
    UnknownEngine(String),

    #[error("stream closed by the client")]
    StreamClosed,

    #[error("malformed request: {0}")]
    MalformedRequest(&'static str),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] crate::config::Error),

    #[error("fmt error: {0}")]
    FmtError(#[from] std::fmt::Error),
}

impl Error {
    /// Reject a value that isn't a view.
    ///
    /// The preview is the value's text representation, cut at [`MAX_PREVIEW`] characters,
    /// or its type name when it has none.
    pub fn not_a_view(preview: Option<String>, type_name: &str) -> Self {
        let preview = match preview {
            Some(text) if text.chars().count() > MAX_PREVIEW => {
                let mut cut = text.chars().take(MAX_PREVIEW).collect::<String>();
                cut.push('…');
                cut
            }
            Some(text) => text,
            None => type_name.to_string(),
        };

        Error::Type(preview)
    }

    /// HTTP status code the host should answer with.
    pub fn code(&self) -> u16 {
        match self {
            Self::MalformedRequest(_) => 400,
            Self::TemplateDoesNotExist(_) => 404,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_short_preview() {
        let err = Error::not_a_view(Some("\"<p>foo</p>\"".into()), "alloc::string::String");
        assert_eq!(
            err.to_string(),
            "Expected a view instance, received \"<p>foo</p>\""
        );
    }

    #[test]
    fn test_long_preview() {
        let text = format!("{:?}", "<p>a b c d e f g h i j k l m n o p q r s t u v w x y z</p>");
        let err = Error::not_a_view(Some(text), "&str");
        assert_eq!(
            err.to_string(),
            "Expected a view instance, received \"<p>a b c d e f g h i j k l m n …"
        );
    }

    #[test]
    fn test_exactly_max() {
        let text = "a".repeat(MAX_PREVIEW);
        let err = Error::not_a_view(Some(text.clone()), "String");
        assert_eq!(err.to_string(), format!("Expected a view instance, received {}", text));
    }

    #[test]
    fn test_type_name_preview() {
        let err = Error::not_a_view(None, "app::views::FooView");
        assert!(err.to_string().ends_with("app::views::FooView"));
    }
}
