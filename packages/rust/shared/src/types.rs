//! Content-item data model and search-record output types.
//!
//! Items arrive as the delivery SDK shapes them: a `system` block plus an
//! `elements` object whose values carry a `type` tag. Linked items are
//! resolved in place (`linkedItems`), so the graph is walked without
//! further lookups.

use indexmap::IndexMap;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Element `type` tags understood by the converter.
pub mod element_type {
    pub const TEXT: &str = "text";
    pub const RICH_TEXT: &str = "rich_text";
    pub const MODULAR_CONTENT: &str = "modular_content";
    pub const URL_SLUG: &str = "url_slug";
    pub const TAXONOMY: &str = "taxonomy";
    pub const MULTIPLE_CHOICE: &str = "multiple_choice";
}

// ---------------------------------------------------------------------------
// ContentItem
// ---------------------------------------------------------------------------

/// Element mapping of a content item, in source order.
pub type Elements = IndexMap<String, Element>;

/// A single structured content item from the CMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub system: ItemSystem,
    #[serde(default)]
    pub elements: Elements,
}

/// System metadata shared by every content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSystem {
    /// Globally stable item id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unique within a language.
    pub codename: String,
    /// Language codename (e.g. `en`).
    pub language: String,
    /// Content type codename.
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub collection: String,
}

impl ContentItem {
    pub fn codename(&self) -> &str {
        &self.system.codename
    }

    /// Element under `key`, ignoring explicit JSON `null`s.
    pub fn element(&self, key: &str) -> Option<&Element> {
        self.elements.get(key).filter(|el| !el.is_null())
    }
}

/// The snapshot of every fetched item, keyed by codename in load order.
pub type ItemUniverse = IndexMap<String, ContentItem>;

/// Key items by codename. A repeated codename replaces the earlier item and
/// keeps its position.
pub fn item_universe(items: impl IntoIterator<Item = ContentItem>) -> ItemUniverse {
    items
        .into_iter()
        .map(|item| (item.system.codename.clone(), item))
        .collect()
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// One typed field of a content item, dispatched on its `type` tag.
///
/// Kinds the converter does not read are kept verbatim in [`Element::Other`]
/// so the raw element mapping survives into the search record.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextElement),
    RichText(RichTextElement),
    LinkedItems(LinkedItemsElement),
    UrlSlug(TextElement),
    Taxonomy(TermsElement),
    MultipleChoice(TermsElement),
    Other(Value),
}

/// Plain string element (`text`, `url_slug`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// HTML-like string with the items embedded in it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextElement {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub linked_items: Vec<ContentItem>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Ordered list of linked items (`modular_content`); has no text of its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedItemsElement {
    #[serde(default)]
    pub name: String,
    /// Codenames of the linked items.
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub linked_items: Vec<ContentItem>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Term-bearing element (`taxonomy`, `multiple_choice`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermsElement {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: Vec<Term>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A single taxonomy term or choice option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub name: String,
    #[serde(default)]
    pub codename: String,
}

/// Read an explicit JSON `null` as the empty default.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Element {
    /// The wire `type` tag of this element.
    pub fn type_tag(&self) -> &str {
        match self {
            Element::Text(_) => element_type::TEXT,
            Element::RichText(_) => element_type::RICH_TEXT,
            Element::LinkedItems(_) => element_type::MODULAR_CONTENT,
            Element::UrlSlug(_) => element_type::URL_SLUG,
            Element::Taxonomy(_) => element_type::TAXONOMY,
            Element::MultipleChoice(_) => element_type::MULTIPLE_CHOICE,
            Element::Other(raw) => raw.get("type").and_then(Value::as_str).unwrap_or(""),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Element::Other(Value::Null))
    }

    /// Items embedded in rich text or linked through a linked-items element.
    pub fn linked_items(&self) -> &[ContentItem] {
        match self {
            Element::RichText(el) => &el.linked_items,
            Element::LinkedItems(el) => &el.linked_items,
            _ => &[],
        }
    }

    /// String value of a `text` or `url_slug` element.
    pub fn text_value(&self) -> Option<&str> {
        match self {
            Element::Text(el) | Element::UrlSlug(el) => el.value.as_deref(),
            _ => None,
        }
    }

    /// Terms of a taxonomy or multiple-choice element; `None` for other kinds.
    pub fn terms(&self) -> Option<&[Term]> {
        match self {
            Element::Taxonomy(el) | Element::MultipleChoice(el) => Some(&el.value),
            _ => None,
        }
    }

    pub fn first_term_name(&self) -> Option<&str> {
        self.terms()?.first().map(|term| term.name.as_str())
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let tag = raw
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let parsed = match tag.as_str() {
            element_type::TEXT => serde_json::from_value(raw).map(Element::Text),
            element_type::RICH_TEXT => serde_json::from_value(raw).map(Element::RichText),
            element_type::MODULAR_CONTENT => serde_json::from_value(raw).map(Element::LinkedItems),
            element_type::URL_SLUG => serde_json::from_value(raw).map(Element::UrlSlug),
            element_type::TAXONOMY => serde_json::from_value(raw).map(Element::Taxonomy),
            element_type::MULTIPLE_CHOICE => {
                serde_json::from_value(raw).map(Element::MultipleChoice)
            }
            _ => return Ok(Element::Other(raw)),
        };

        parsed.map_err(de::Error::custom)
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let body = match self {
            Element::Text(el) | Element::UrlSlug(el) => serde_json::to_value(el),
            Element::RichText(el) => serde_json::to_value(el),
            Element::LinkedItems(el) => serde_json::to_value(el),
            Element::Taxonomy(el) | Element::MultipleChoice(el) => serde_json::to_value(el),
            Element::Other(raw) => return raw.serialize(serializer),
        }
        .map_err(<S::Error as serde::ser::Error>::custom)?;

        // The `type` tag leads, as it does on the wire.
        let mut tagged = Map::new();
        tagged.insert("type".to_string(), Value::String(self.type_tag().to_string()));
        if let Value::Object(fields) = body {
            tagged.extend(fields);
        }
        tagged.serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Flattened text of one visited item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: String,
    pub codename: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub language: String,
    pub collection: String,
    /// Ancestor codenames, nearest first.
    pub parents: Vec<String>,
    pub contents: String,
}

/// Level-indexed breadcrumb (`lvl0`, `lvl1`, ...).
pub type CategoryHierarchy = IndexMap<String, String>;

/// One search-index record. Field names are the index schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: String,
    pub categories: Vec<String>,
    #[serde(rename = "hierarchicalCategories")]
    pub hierarchical_categories: CategoryHierarchy,
    #[serde(rename = "type")]
    pub item_type: String,
    pub codename: String,
    pub collection: String,
    pub name: String,
    pub elements: Elements,
    #[serde(rename = "investmentType")]
    pub investment_type: String,
    pub symbol: String,
    pub language: String,
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub slug: String,
    pub content: Vec<ContentBlock>,
}
