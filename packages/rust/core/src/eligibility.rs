//! Page eligibility: which items become their own search record.
//!
//! An item carrying the slug element is a page in its own right. It gets
//! its own record, and is never inlined into another page's content.

use contentindex_shared::ContentItem;

/// Whether `item` has a non-null element under `slug_field`.
pub fn is_convertible(slug_field: &str, item: &ContentItem) -> bool {
    item.element(slug_field).is_some()
}

/// Predicate form of [`is_convertible`], for use with iterator adapters.
pub fn convertible(slug_field: &str) -> impl Fn(&ContentItem) -> bool + '_ {
    move |item: &ContentItem| is_convertible(slug_field, item)
}
