//! Application configuration for contentindex.
//!
//! User config lives at `~/.contentindex/contentindex.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ContentIndexError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "contentindex.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".contentindex";

/// Default breadcrumb key prefix (`lvl0`, `lvl1`, ...).
pub const DEFAULT_LEVEL_PREFIX: &str = "lvl";

/// Default separator between breadcrumb names.
pub const DEFAULT_SEPARATOR: &str = " > ";

// ---------------------------------------------------------------------------
// Config structs (matching contentindex.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Element keys the record assembler reads.
    #[serde(default)]
    pub fields: FieldsConfig,

    /// Breadcrumb formatting for hierarchical categories.
    #[serde(default)]
    pub hierarchy: HierarchyConfig,
}

/// `[fields]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldsConfig {
    /// Element key that marks an item as an independent page.
    #[serde(default = "default_slug_field")]
    pub slug: String,

    /// Term element holding the asset class (required).
    #[serde(default = "default_asset_class_field")]
    pub asset_class: String,

    /// Term element holding the category (optional).
    #[serde(default = "default_category_field")]
    pub category: String,

    /// Term element holding the investment type (required).
    #[serde(default = "default_investment_type_field")]
    pub investment_type: String,

    /// Text element holding the ticker symbol (required).
    #[serde(default = "default_symbol_field")]
    pub symbol: String,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            slug: default_slug_field(),
            asset_class: default_asset_class_field(),
            category: default_category_field(),
            investment_type: default_investment_type_field(),
            symbol: default_symbol_field(),
        }
    }
}

fn default_slug_field() -> String {
    "url".into()
}
fn default_asset_class_field() -> String {
    "asset_class".into()
}
fn default_category_field() -> String {
    "category".into()
}
fn default_investment_type_field() -> String {
    "type".into()
}
fn default_symbol_field() -> String {
    "symbol".into()
}

/// `[hierarchy]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Key prefix for each breadcrumb level (`lvl0`, `lvl1`, ...).
    #[serde(default = "default_level_prefix")]
    pub level_prefix: String,

    /// Separator placed between category names in a breadcrumb.
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            level_prefix: default_level_prefix(),
            separator: default_separator(),
        }
    }
}

fn default_level_prefix() -> String {
    DEFAULT_LEVEL_PREFIX.into()
}
fn default_separator() -> String {
    DEFAULT_SEPARATOR.into()
}

// ---------------------------------------------------------------------------
// Convert settings (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime conversion settings, merged from config file and CLI flags.
#[derive(Debug, Clone)]
pub struct ConvertSettings {
    /// Element key marking an item as independently indexable.
    pub slug_field: String,
    /// Required asset-class term element.
    pub asset_class_field: String,
    /// Optional category term element.
    pub category_field: String,
    /// Required investment-type term element.
    pub investment_type_field: String,
    /// Required symbol text element.
    pub symbol_field: String,
    /// Breadcrumb key prefix.
    pub level_prefix: String,
    /// Breadcrumb separator.
    pub separator: String,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ConvertSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            slug_field: config.fields.slug.clone(),
            asset_class_field: config.fields.asset_class.clone(),
            category_field: config.fields.category.clone(),
            investment_type_field: config.fields.investment_type.clone(),
            symbol_field: config.fields.symbol.clone(),
            level_prefix: config.hierarchy.level_prefix.clone(),
            separator: config.hierarchy.separator.clone(),
        }
    }
}

impl ConvertSettings {
    /// Override the slug field (e.g. from a CLI flag).
    pub fn with_slug_field(mut self, slug_field: impl Into<String>) -> Self {
        self.slug_field = slug_field.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.contentindex/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ContentIndexError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.contentindex/contentindex.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ContentIndexError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        ContentIndexError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_config(&config)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ContentIndexError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ContentIndexError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ContentIndexError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Reject configs whose field keys are blank.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let fields = [
        ("fields.slug", &config.fields.slug),
        ("fields.asset_class", &config.fields.asset_class),
        ("fields.category", &config.fields.category),
        ("fields.investment_type", &config.fields.investment_type),
        ("fields.symbol", &config.fields.symbol),
        ("hierarchy.level_prefix", &config.hierarchy.level_prefix),
    ];

    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(ContentIndexError::config(format!("{name} must not be empty")));
        }
    }

    Ok(())
}
