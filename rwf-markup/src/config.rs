//! Global configuration.
//!
//! Loaded once from `rwf.toml` (or `Rwf.toml`) in the working directory. If neither exists,
//! or the file can't be parsed, defaults are used.
//!
//! ```toml
//! [views]
//! path = "views"
//! default_layout = "layout"
//! layout_engine = "erb"
//! cache_templates = true
//! ```
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Error, Debug)]
pub enum Error {
    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config file not found")]
    Io(#[from] std::io::Error),

    #[error("config not found")]
    NoConfig,
}

/// Global configuration.
#[derive(Debug, Clone)]
pub struct Config {
    path: Option<PathBuf>,
    pub general: General,
    pub views: Views,
}

#[derive(Debug, Clone)]
pub struct General {
    /// Colored log output.
    pub tty: bool,
}

/// Where templates live and how views are rendered by default.
#[derive(Debug, Clone)]
pub struct Views {
    pub path: PathBuf,
    pub default_layout: String,
    pub layout_engine: String,
    pub cache_templates: bool,
    pub content_type: String,
}

impl Default for General {
    fn default() -> Self {
        Self {
            tty: std::io::stderr().is_terminal(),
        }
    }
}

impl Default for Views {
    fn default() -> Self {
        Self {
            path: PathBuf::from("views"),
            default_layout: "layout".into(),
            layout_engine: "erb".into(),
            cache_templates: ViewsConfig::default_cache_templates(),
            content_type: "text/html;charset=utf-8".into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: None,
            general: General::default(),
            views: Views::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Config, Error> {
        let path = ["rwf.toml", "Rwf.toml"]
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
            .ok_or(Error::NoConfig)?;

        Self::load_from(&path)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Config, Error> {
        let file = ConfigFile::load(path.as_ref())?;
        let mut config = Config::default();

        config.path = Some(path.as_ref().to_owned());

        if let Some(tty) = file.general.tty {
            config.general.tty = tty;
        }

        let views = file.views;
        if let Some(path) = views.path {
            config.views.path = path;
        }
        if let Some(layout) = views.default_layout {
            config.views.default_layout = layout;
        }
        if let Some(engine) = views.layout_engine {
            config.views.layout_engine = engine;
        }
        if let Some(content_type) = views.content_type {
            config.views.content_type = content_type;
        }
        config.views.cache_templates = views.cache_templates;

        Ok(config)
    }

    pub fn get() -> &'static Config {
        get_config()
    }

    /// Path to the file the configuration was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn log_info(&self) {
        match self.path {
            Some(ref path) => info!("Configuration file \"{}\" loaded", path.display()),
            None => info!("Configuration file missing, using defaults"),
        }
    }
}

pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().unwrap_or_default())
}

#[derive(Serialize, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    general: GeneralConfig,
    #[serde(default)]
    views: ViewsConfig,
}

impl ConfigFile {
    fn load(path: &Path) -> Result<ConfigFile, Error> {
        let file = read_to_string(path)?;
        let config: Self = toml::from_str(&file)?;

        Ok(config)
    }
}

#[derive(Serialize, Deserialize, Default)]
struct GeneralConfig {
    tty: Option<bool>,
}

#[derive(Serialize, Deserialize)]
struct ViewsConfig {
    path: Option<PathBuf>,
    default_layout: Option<String>,
    layout_engine: Option<String>,
    content_type: Option<String>,
    #[serde(default = "ViewsConfig::default_cache_templates")]
    cache_templates: bool,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            path: None,
            default_layout: None,
            layout_engine: None,
            content_type: None,
            cache_templates: Self::default_cache_templates(),
        }
    }
}

impl ViewsConfig {
    fn default_cache_templates() -> bool {
        #[cfg(debug_assertions)]
        return false;
        #[cfg(not(debug_assertions))]
        return true;
    }
}
