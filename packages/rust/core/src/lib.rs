//! Content-item to search-record conversion for contentindex.
//!
//! This crate turns a snapshot of CMS content items into flat search-index
//! records: it picks the items that are pages of their own, flattens each
//! page's linked content into text blocks, and builds category breadcrumbs.

pub mod assembler;
pub mod eligibility;
pub mod flatten;
pub mod hierarchy;
pub mod pipeline;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_support;

pub use assembler::{RequiredFields, assemble, find_slug, object_id};
pub use eligibility::{convertible, is_convertible};
pub use flatten::{content_block, flatten, item_contents};
pub use hierarchy::{build_breadcrumb, category_names};
pub use pipeline::{
    ConvertFailure, ConvertReport, ProgressReporter, SilentProgress, convert_all, flatten_item,
};
pub use snapshot::{Snapshot, load_snapshot, parse_snapshot, write_records};
