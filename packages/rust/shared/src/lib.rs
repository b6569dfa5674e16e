//! Shared types, error model, and configuration for contentindex.
//!
//! This crate is the foundation depended on by all other contentindex crates.
//! It provides:
//! - [`ContentIndexError`] is the unified error type
//! - Domain types ([`ContentItem`], [`Element`], [`ContentBlock`], [`SearchRecord`])
//! - Configuration ([`AppConfig`], [`ConvertSettings`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ConvertSettings, DEFAULT_LEVEL_PREFIX, DEFAULT_SEPARATOR, FieldsConfig,
    HierarchyConfig, config_dir, config_file_path, init_config, load_config, load_config_from,
    validate_config,
};
pub use error::{ContentIndexError, Result};
pub use types::{
    CategoryHierarchy, ContentBlock, ContentItem, Element, Elements, ItemSystem, ItemUniverse,
    LinkedItemsElement, RichTextElement, SearchRecord, Term, TermsElement, TextElement,
    element_type, item_universe,
};
