//! What a view can see of the request it's rendered for.
use crate::http::{Params, Request};

/// Per-request helpers reachable from inside a view.
///
/// Everything has a default built on top of [`Helpers::request`].
pub trait Helpers {
    fn request(&self) -> &Request;

    fn params(&self) -> &Params {
        self.request().params()
    }

    /// Path the application is mounted at, e.g. `/blog`. Empty if mounted at the root.
    fn mount_path(&self) -> &str {
        self.request().mount_path()
    }

    fn host(&self) -> &str {
        self.request().host()
    }

    fn scheme(&self) -> &str {
        self.request().scheme()
    }

    /// Build a URL to a path of this application.
    ///
    /// The mount path is prepended and the result always starts with `/`. If `absolute` is set,
    /// the scheme and host are prepended too.
    /// URLs that already have a scheme, e.g. `https://example.com`, are returned as-is.
    /// An empty path is the current request's path.
    fn url(&self, path: &str, absolute: bool) -> String {
        if has_scheme(path) {
            return path.to_string();
        }

        let path = if path.is_empty() {
            self.request().path()
        } else {
            path
        };

        let mut url = String::new();

        if absolute {
            url.push_str(self.scheme());
            url.push_str("://");
            url.push_str(self.host());
        }

        let mount_path = self.mount_path().trim_end_matches('/');
        url.push_str(mount_path);

        if !path.starts_with('/') {
            url.push('/');
        }
        url.push_str(path);

        url
    }
}

impl Helpers for Request {
    fn request(&self) -> &Request {
        self
    }
}

fn has_scheme(path: &str) -> bool {
    match path.split_once(':') {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().map(|c| c.is_ascii_alphabetic()) == Some(true)
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// View rendering context.
///
/// Carries the request helpers when the view is rendered from a request.
#[derive(Default, Clone, Copy)]
pub struct Context<'a> {
    helpers: Option<&'a dyn Helpers>,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("helpers", &self.helpers.is_some())
            .finish()
    }
}

impl<'a> Context<'a> {
    /// Context without request helpers.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_helpers(helpers: &'a dyn Helpers) -> Self {
        Self {
            helpers: Some(helpers),
        }
    }

    pub fn helpers(&self) -> Option<&'a dyn Helpers> {
        self.helpers
    }
}
