//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/refnet/refnet.toml`
//! 3. Local config: `./.refnet.toml`, or the file given with `--config`
//! 4. Environment variables: `REFNET_*` prefix, `__` between section and key
//!    (e.g. `REFNET_API__BASE_URL`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::session::DEFAULT_INITIAL_DEPTH;
use crate::application::ApplicationError;
use crate::domain::{ContainerSize, ViewportConfig};

/// Referral service connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, `/referrals/{userId}` is appended
    pub base_url: String,
    /// User whose referral network is shown
    pub user_id: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".into(),
            user_id: None,
            timeout_secs: 30,
        }
    }
}

/// Initial container and zoom behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: f64,
    pub height: f64,
    /// Vertical position of the root
    pub top_offset: f64,
    pub zoom_step: f64,
    /// Zoom out stops once the factor reaches this value
    pub zoom_floor: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        let defaults = ViewportConfig::default();
        Self {
            width: defaults.initial_size.width(),
            height: defaults.initial_size.height(),
            top_offset: defaults.top_offset,
            zoom_step: defaults.zoom_step,
            zoom_floor: defaults.zoom_floor,
        }
    }
}

impl ViewportSettings {
    pub fn to_viewport_config(&self) -> Result<ViewportConfig, ApplicationError> {
        Ok(ViewportConfig {
            zoom_step: self.zoom_step,
            zoom_floor: self.zoom_floor,
            top_offset: self.top_offset,
            initial_size: ContainerSize::new(self.width, self.height)?,
        })
    }
}

/// Layout and palette of the rendered tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderSettings {
    /// Nodes at this depth or deeper start collapsed
    pub initial_depth: usize,
    pub node_width: f64,
    pub node_height: f64,
    /// Horizontal gap between leaves, in node widths
    pub sibling_separation: f64,
    pub root_color: String,
    pub highlight_color: String,
    pub default_color: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            initial_depth: DEFAULT_INITIAL_DEPTH,
            node_width: 140.0,
            node_height: 140.0,
            sibling_separation: 2.0,
            root_color: "#FF5722".into(),
            highlight_color: "#FF9800".into(),
            default_color: "#4CAF50".into(),
        }
    }
}

/// Unified configuration for refnet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    pub api: ApiConfig,
    pub viewport: ViewportSettings,
    pub render: RenderSettings,
}

/// Get the XDG config directory for refnet.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "refnet").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("refnet.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".refnet.toml")
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Explicit local config file. When None, `./.refnet.toml` is
    ///   used if it exists. An explicit file must exist.
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            builder = builder.add_source(File::from(global_path).required(false));
        }

        builder = match local {
            Some(path) => builder.add_source(File::from(path).format(FileFormat::Toml).required(true)),
            None => builder.add_source(File::from(local_config_path(Path::new("."))).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("REFNET")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.api.base_url = settings.api.base_url.trim_end_matches('/').to_string();
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the controllers cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.viewport.to_viewport_config()?;
        if !(self.viewport.zoom_step.is_finite() && self.viewport.zoom_step > 0.0) {
            return Err(ApplicationError::Config {
                message: format!("viewport.zoom_step must be positive, got {}", self.viewport.zoom_step),
            });
        }
        if !(self.viewport.zoom_floor.is_finite() && self.viewport.zoom_floor >= 0.0) {
            return Err(ApplicationError::Config {
                message: format!("viewport.zoom_floor must not be negative, got {}", self.viewport.zoom_floor),
            });
        }
        if !(self.render.sibling_separation.is_finite() && self.render.sibling_separation > 0.0) {
            return Err(ApplicationError::Config {
                message: format!(
                    "render.sibling_separation must be positive, got {}",
                    self.render.sibling_separation
                ),
            });
        }
        if self.render.node_width <= 0.0 || self.render.node_height <= 0.0 {
            return Err(ApplicationError::Config {
                message: "render.node_width and render.node_height must be positive".into(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# refnet configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/refnet/refnet.toml
#   Local:  ./.refnet.toml (or --config <file>)
#   Env:    REFNET_<SECTION>__<KEY>, e.g. REFNET_API__USER_ID

[api]
# Referral service base URL; /referrals/{userId} is appended
# base_url = "http://localhost:5000/api"
# Default user whose network is shown (overridden by --user)
# user_id = "66f69bfea34d00c7e5915adc"
# timeout_secs = 30

[viewport]
# width = 1000.0
# height = 600.0
# top_offset = 50.0
# zoom_step = 0.2
# zoom_floor = 0.4

[render]
# Nodes at this depth or deeper start collapsed
# initial_depth = 2
# node_width = 140.0
# node_height = 140.0
# sibling_separation = 2.0
# root_color = "#FF5722"
# highlight_color = "#FF9800"
# default_color = "#4CAF50"
"##
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
