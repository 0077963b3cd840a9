//! Global template cache.
//!
//! Using the cache ensures that template files are only read from disk once.
//! The cache is enabled by default in production (`release`), and disabled
//! in development (`debug`), so templates can be edited without restarting the app.
use std::collections::HashMap;
use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard};
use tracing::debug;

use crate::Error;

static TEMPLATES: Lazy<Mutex<Templates>> = Lazy::new(|| Mutex::new(Templates::new()));

/// Templates cache.
#[derive(Default)]
pub struct Templates {
    templates: HashMap<PathBuf, Arc<String>>,
}

impl Templates {
    /// Create new empty template cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve a template from the cache. If `cache` isn't set, or the template isn't cached,
    /// it will be read from disk, and cached if `cache` is set.
    ///
    /// Holding the global lock while reading the template from disk
    /// prevents the thundering herd problem.
    pub fn get(&mut self, path: impl AsRef<Path>, cache: bool) -> Result<Arc<String>, Error> {
        let path = path.as_ref();

        if cache {
            if let Some(template) = self.templates.get(path) {
                return Ok(template.clone());
            }
        }

        let template = match read_to_string(path) {
            Ok(text) => Arc::new(text),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(Error::TemplateDoesNotExist(path.to_owned()))
            }
            Err(err) => return Err(err.into()),
        };

        debug!("loaded template \"{}\"", path.display());

        if cache {
            self.templates.insert(path.to_owned(), template.clone());
        }

        Ok(template)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Obtain a lock to the global template cache.
    pub fn cache() -> MutexGuard<'static, Templates> {
        TEMPLATES.lock()
    }
}
