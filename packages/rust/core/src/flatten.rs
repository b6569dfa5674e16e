//! Record flattener.
//!
//! Walks an item and the items linked from its rich-text and linked-items
//! elements, producing one [`ContentBlock`] per visited item in pre-order
//! (parent before descendants).
//!
//! Two things stop the descent:
//! - a linked item whose codename is already on the ancestor chain
//!   (per-path cycle guard, not a global visited set);
//! - a linked item that is a page of its own (see [`crate::eligibility`]).

use tracing::{debug, trace};

use contentindex_richtext::{join_contents, strip_markup};
use contentindex_shared::{ContentBlock, ContentItem, Element};

use crate::eligibility::is_convertible;

/// Flatten `item` and its inlined descendants into content blocks.
///
/// `parents` is the ancestor chain of `item`, nearest first. It is copied
/// unchanged into the item's own block; children see it with `item`'s
/// codename prepended.
pub fn flatten(item: &ContentItem, parents: &[String], slug_field: &str) -> Vec<ContentBlock> {
    let mut blocks = vec![content_block(item, parents)];

    let mut chain = Vec::with_capacity(parents.len() + 1);
    chain.push(item.system.codename.clone());
    chain.extend_from_slice(parents);

    for element in item.elements.values() {
        for child in element.linked_items() {
            if parents.iter().any(|p| p == child.codename()) {
                trace!(
                    parent = %item.codename(),
                    child = %child.codename(),
                    "linked item already on ancestor chain, skipping"
                );
                continue;
            }

            if is_convertible(slug_field, child) {
                debug!(
                    parent = %item.codename(),
                    child = %child.codename(),
                    "linked item is a page of its own, not inlining"
                );
                continue;
            }

            blocks.extend(flatten(child, &chain, slug_field));
        }
    }

    blocks
}

/// Build the block for a single item, without descending.
pub fn content_block(item: &ContentItem, parents: &[String]) -> ContentBlock {
    ContentBlock {
        id: item.system.id.clone(),
        codename: item.system.codename.clone(),
        name: item.system.name.clone(),
        item_type: item.system.item_type.clone(),
        language: item.system.language.clone(),
        collection: item.system.collection.clone(),
        parents: parents.to_vec(),
        contents: item_contents(item),
    }
}

/// Searchable text of an item's own elements, one contribution per element.
pub fn item_contents(item: &ContentItem) -> String {
    let parts: Vec<String> = item.elements.values().map(element_text).collect();
    join_contents(&parts)
}

fn element_text(element: &Element) -> String {
    match element {
        Element::Text(el) => el.value.clone().unwrap_or_default(),
        Element::RichText(el) => el.value.as_deref().map(strip_markup).unwrap_or_default(),
        Element::LinkedItems(_)
        | Element::UrlSlug(_)
        | Element::Taxonomy(_)
        | Element::MultipleChoice(_)
        | Element::Other(_) => String::new(),
    }
}
