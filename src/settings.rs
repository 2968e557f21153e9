//! Layered configuration.
//!
//! Precedence (highest to lowest):
//! 1. Command-line flags (applied by the CLI after loading)
//! 2. `WEATHER_API_*` environment variables, `__` between nested keys
//!    (e.g. `WEATHER_API_SERVER__BIND_ADDR=0.0.0.0:8080`)
//! 3. Configuration file (`weather-yield-api.toml` or `--config FILE`)
//! 4. Default values

use crate::error::Result;
use crate::utils::constants::{
    CONFIG_FILE_STEM, DEFAULT_BIND_ADDR, DEFAULT_DATABASE_FILE, DEFAULT_MAX_CONNECTIONS, DEFAULT_PAGE,
    DEFAULT_PER_PAGE, DEFAULT_WEATHER_DIR, DEFAULT_YIELD_FILE, ENV_PREFIX, MAX_PER_PAGE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub ingest: IngestSettings,
    pub server: ServerSettings,

    #[validate(nested)]
    pub pagination: PaginationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: PathBuf,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_FILE),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    pub weather_dir: PathBuf,
    pub yield_file: PathBuf,

    /// Read station files through a memory map instead of buffered I/O
    pub use_mmap: bool,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            weather_dir: PathBuf::from(DEFAULT_WEATHER_DIR),
            yield_file: PathBuf::from(DEFAULT_YIELD_FILE),
            use_mmap: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_page_sizes"))]
pub struct PaginationSettings {
    #[validate(range(min = 1))]
    pub default_page: u32,

    #[validate(range(min = 1))]
    pub default_per_page: u32,

    #[validate(range(min = 1))]
    pub max_per_page: u32,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_page: DEFAULT_PAGE,
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: MAX_PER_PAGE,
        }
    }
}

fn validate_page_sizes(settings: &PaginationSettings) -> std::result::Result<(), validator::ValidationError> {
    if settings.default_per_page > settings.max_per_page {
        return Err(validator::ValidationError::new("default_per_page_exceeds_max"));
    }
    Ok(())
}

impl Settings {
    /// Load defaults, the optional config file in the working directory,
    /// then environment overrides
    pub fn load() -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(
                config::File::with_name(CONFIG_FILE_STEM)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        Self::finish(builder)
    }

    /// Same as [`Settings::load`] but with an explicit, required config file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::from(path).format(config::FileFormat::Toml));
        Self::finish(builder)
    }

    fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let settings: Settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }
}
