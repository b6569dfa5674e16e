//! Search record assembler.
//!
//! Combines an item's system metadata, its category facets, the fund
//! scalars (investment type, symbol), its URL slug and its flattened content
//! into one [`SearchRecord`].
//!
//! Required elements are checked up front by [`RequiredFields::extract`], so
//! a malformed item fails with [`ContentIndexError::MissingField`] before any
//! traversal happens.

use tracing::{debug, instrument};

use contentindex_shared::{
    ContentIndexError, ContentItem, ConvertSettings, Element, Result, SearchRecord,
};

use crate::flatten::flatten;
use crate::hierarchy::{build_breadcrumb, category_names};

/// Values a search record cannot be built without, plus the optional category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFields {
    /// First term of the investment-type element.
    pub investment_type: String,
    /// Value of the symbol text element.
    pub symbol: String,
    /// First term of the asset-class element.
    pub asset_class: String,
    /// First term of the category element, if there is one.
    pub category: Option<String>,
}

impl RequiredFields {
    /// Read the record's required and optional fields from `item`.
    pub fn extract(item: &ContentItem, settings: &ConvertSettings) -> Result<Self> {
        let codename = item.codename();

        let investment_type = first_term(item, &settings.investment_type_field)
            .ok_or_else(|| ContentIndexError::missing_field(codename, &settings.investment_type_field))?;

        let symbol = item
            .element(&settings.symbol_field)
            .and_then(Element::text_value)
            .ok_or_else(|| ContentIndexError::missing_field(codename, &settings.symbol_field))?;

        let asset_class = first_term(item, &settings.asset_class_field)
            .ok_or_else(|| ContentIndexError::missing_field(codename, &settings.asset_class_field))?;

        let category = first_term(item, &settings.category_field).filter(|name| !name.is_empty());

        Ok(Self {
            investment_type: investment_type.to_string(),
            symbol: symbol.to_string(),
            asset_class: asset_class.to_string(),
            category: category.map(str::to_string),
        })
    }
}

fn first_term<'a>(item: &'a ContentItem, key: &str) -> Option<&'a str> {
    item.element(key).and_then(Element::first_term_name)
}

/// Composite record id: `<codename>_<language>`.
pub fn object_id(codename: &str, language: &str) -> String {
    format!("{codename}_{language}")
}

/// Value of the item's first `url_slug` element, or an empty string.
pub fn find_slug(item: &ContentItem) -> String {
    item.elements
        .values()
        .find_map(|element| match element {
            Element::UrlSlug(el) => Some(el.value.clone().unwrap_or_default()),
            _ => None,
        })
        .unwrap_or_default()
}

/// Assemble the search record for a top-level item.
#[instrument(skip_all, fields(codename = %item.codename(), language = %item.system.language))]
pub fn assemble(item: &ContentItem, settings: &ConvertSettings) -> Result<SearchRecord> {
    let fields = RequiredFields::extract(item, settings)?;

    let categories = category_names(&fields.asset_class, fields.category.as_deref());
    let hierarchical_categories =
        build_breadcrumb(&categories, &settings.level_prefix, &settings.separator);

    let content = flatten(item, &[], &settings.slug_field);

    debug!(
        blocks = content.len(),
        categories = categories.len(),
        "record assembled"
    );

    Ok(SearchRecord {
        id: item.system.id.clone(),
        categories,
        hierarchical_categories,
        item_type: item.system.item_type.clone(),
        codename: item.system.codename.clone(),
        collection: item.system.collection.clone(),
        name: item.system.name.clone(),
        elements: item.elements.clone(),
        investment_type: fields.investment_type,
        symbol: fields.symbol,
        language: item.system.language.clone(),
        object_id: object_id(&item.system.codename, &item.system.language),
        slug: find_slug(item),
        content,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
