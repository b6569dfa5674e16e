//! Reading item snapshots and writing search records.
//!
//! A snapshot is the already-fetched item universe as JSON: either a bare
//! array of items or a listing object with an `items` array. Linked items are
//! expected to be resolved in place.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use contentindex_shared::{
    ContentIndexError, ContentItem, ItemUniverse, Result, SearchRecord, item_universe,
};

use crate::pipeline::ConvertFailure;

/// A decoded snapshot.
#[derive(Debug)]
pub struct Snapshot {
    /// Every item that decoded, keyed by codename in file order.
    pub universe: ItemUniverse,
    /// Entries that could not be decoded as content items.
    pub rejected: Vec<ConvertFailure>,
}

/// Load an item universe from a snapshot file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path).map_err(|e| ContentIndexError::io(path, e))?;
    let snapshot = parse_snapshot(&content)?;
    info!(
        items = snapshot.universe.len(),
        rejected = snapshot.rejected.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Parse snapshot JSON into an item universe.
///
/// Only the outer shape is fatal. Each entry is decoded on its own, and an
/// entry that is not a valid content item is recorded in
/// [`Snapshot::rejected`] while the rest still load.
pub fn parse_snapshot(json: &str) -> Result<Snapshot> {
    let raw: Value = serde_json::from_str(json)
        .map_err(|e| ContentIndexError::Snapshot(format!("invalid JSON: {e}")))?;

    let entries = match raw {
        Value::Array(entries) => entries,
        Value::Object(mut listing) => match listing.remove("items") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(ContentIndexError::Snapshot(
                    "expected an `items` array in snapshot object".into(),
                ));
            }
        },
        _ => {
            return Err(ContentIndexError::Snapshot(
                "expected an array of items or an object with `items`".into(),
            ));
        }
    };

    let mut items = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let codename = system_field(&entry, "codename");
        let language = system_field(&entry, "language");

        match serde_json::from_value::<ContentItem>(entry) {
            Ok(item) => items.push(item),
            Err(e) => {
                warn!(index, %codename, error = %e, "invalid content item, skipping");
                rejected.push(ConvertFailure {
                    codename,
                    language,
                    reason: format!("invalid content item: {e}"),
                });
            }
        }
    }

    debug!(count = items.len(), rejected = rejected.len(), "snapshot items parsed");
    Ok(Snapshot {
        universe: item_universe(items),
        rejected,
    })
}

/// Best-effort `system.<field>` of an undecoded entry, for failure reports.
fn system_field(entry: &Value, field: &str) -> String {
    entry
        .get("system")
        .and_then(|system| system.get(field))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Write records as a pretty JSON array.
///
/// The file is written to a hidden temp sibling first and renamed into place.
#[instrument(skip_all, fields(path = %path.display(), records = records.len()))]
pub fn write_records(path: &Path, records: &[SearchRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| ContentIndexError::Snapshot(format!("JSON serialization failed: {e}")))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ContentIndexError::io(parent, e))?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| ContentIndexError::validation(format!("not a file path: {}", path.display())))?;
    let temp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    std::fs::write(&temp, json).map_err(|e| ContentIndexError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| ContentIndexError::io(path, e))?;

    debug!("records written");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::assembler::assemble;
    use crate::flatten::flatten;
    use contentindex_shared::ConvertSettings;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "contentindex-snapshot-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn fixture_path(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(name)
    }

    const MINIMAL_ITEM: &str = r#"{
        "system": { "id": "1", "name": "One", "codename": "one", "language": "en", "type": "t" },
        "elements": {}
    }"#;

    #[test]
    fn parses_bare_array() {
        let snapshot = parse_snapshot(&format!("[{MINIMAL_ITEM}]")).unwrap();
        assert_eq!(snapshot.universe.len(), 1);
        assert!(snapshot.universe.contains_key("one"));
        assert!(snapshot.rejected.is_empty());
    }

    #[test]
    fn parses_listing_object() {
        let json = format!(r#"{{ "items": [{MINIMAL_ITEM}], "pagination": {{ "skip": 0 }} }}"#);
        let snapshot = parse_snapshot(&json).unwrap();
        assert_eq!(snapshot.universe.len(), 1);
    }

    #[test]
    fn rejects_object_without_items() {
        let err = parse_snapshot(r#"{ "data": [] }"#).unwrap_err();
        assert!(matches!(err, ContentIndexError::Snapshot(_)));

        let err = parse_snapshot(r#"{ "items": {} }"#).unwrap_err();
        assert!(matches!(err, ContentIndexError::Snapshot(_)));
    }

    #[test]
    fn rejects_scalar_snapshot() {
        assert!(parse_snapshot("42").is_err());
        assert!(parse_snapshot("not json").is_err());
    }

    #[test]
    fn bad_entry_is_reported_and_the_rest_load() {
        let json = format!(
            r#"[
                {MINIMAL_ITEM},
                {{
                    "system": {{ "id": "2", "name": "Two", "codename": "two", "language": "de", "type": "t" }},
                    "elements": {{ "title": {{ "type": "text", "value": 42 }} }}
                }},
                {{ "elements": {{}} }},
                {{
                    "system": {{ "id": "3", "name": "Three", "codename": "three", "language": "en", "type": "t" }},
                    "elements": {{ "category": {{ "type": "taxonomy", "value": null }} }}
                }}
            ]"#
        );
        let snapshot = parse_snapshot(&json).unwrap();

        let loaded: Vec<&str> = snapshot.universe.keys().map(String::as_str).collect();
        assert_eq!(loaded, ["one", "three"]);

        assert_eq!(snapshot.rejected.len(), 2);
        assert_eq!(snapshot.rejected[0].codename, "two");
        assert_eq!(snapshot.rejected[0].language, "de");
        assert!(snapshot.rejected[0].reason.contains("invalid content item"));
        assert_eq!(snapshot.rejected[1].codename, "");
    }

    #[test]
    fn element_order_survives_parsing_at_every_depth() {
        let json = r#"[{
            "system": { "id": "1", "name": "Root", "codename": "root", "language": "en", "type": "page" },
            "elements": {
                "zeta": { "type": "text", "value": "first" },
                "alpha": { "type": "text", "value": "second" },
                "mid": {
                    "type": "modular_content",
                    "value": ["kid"],
                    "linkedItems": [{
                        "system": { "id": "2", "name": "Kid", "codename": "kid", "language": "en", "type": "part" },
                        "elements": {
                            "zz": { "type": "text", "value": "one" },
                            "aa": { "type": "text", "value": "two" }
                        }
                    }]
                }
            }
        }]"#;
        let snapshot = parse_snapshot(json).unwrap();
        let root = snapshot.universe.get("root").expect("root item");

        let blocks = flatten(root, &[], "url");
        let contents: Vec<&str> = blocks.iter().map(|b| b.contents.as_str()).collect();
        assert_eq!(contents, ["first second ", "one two"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_snapshot(Path::new("/nonexistent/items.json")).unwrap_err();
        assert!(matches!(err, ContentIndexError::Io { .. }));
    }

    #[test]
    fn fixture_snapshot_converts() {
        let snapshot = load_snapshot(&fixture_path("json/items.fixture.json")).expect("load fixture");
        assert_eq!(snapshot.universe.len(), 3);
        assert!(snapshot.rejected.is_empty());

        let settings = ConvertSettings::default();
        let fund = snapshot.universe.get("acme_growth_fund").expect("fund item");
        let record = assemble(fund, &settings).expect("assemble fund");

        assert_eq!(record.object_id, "acme_growth_fund_en");
        assert_eq!(record.slug, "acme-growth-fund");
        assert_eq!(record.categories, ["Equity", "Large Cap"]);
        assert_eq!(record.investment_type, "ETF");

        let element_keys: Vec<&str> = record.elements.keys().map(String::as_str).collect();
        assert_eq!(
            element_keys,
            ["title", "url", "symbol", "type", "asset_class", "category", "inception", "body"]
        );

        // The FAQ fragment is inlined, the linked sibling fund is not.
        let blocks: Vec<(&str, &str)> = record
            .content
            .iter()
            .map(|b| (b.codename.as_str(), b.contents.as_str()))
            .collect();
        assert_eq!(
            blocks,
            [
                (
                    "acme_growth_fund",
                    "Acme Growth Fund  ACMG     Invest in growth companies.  See also Acme Income Fund.",
                ),
                ("fees_faq", "What does it cost? Fees are 0.2% per year."),
            ]
        );
        assert_eq!(record.content[1].parents, ["acme_growth_fund"]);
    }

    #[test]
    fn write_records_leaves_no_temp_file() {
        let tmp = temp_dir();
        let out = tmp.join("out").join("records.json");

        let snapshot = load_snapshot(&fixture_path("json/items.fixture.json")).unwrap();
        let fund = snapshot.universe.get("acme_growth_fund").unwrap();
        let record = assemble(fund, &ConvertSettings::default()).unwrap();

        write_records(&out, std::slice::from_ref(&record)).unwrap();

        let written: Vec<SearchRecord> =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].object_id, record.object_id);

        for entry in std::fs::read_dir(out.parent().unwrap()).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.starts_with('.'), "temp file left behind: {name}");
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
