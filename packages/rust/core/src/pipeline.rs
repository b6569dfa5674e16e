//! Batch conversion: item universe → search records.
//!
//! Every eligible item is converted independently. A failure on one item is
//! logged and recorded in the report, and the remaining items still convert.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use contentindex_shared::{
    ContentBlock, ContentIndexError, ConvertSettings, ItemUniverse, Result, SearchRecord,
};

use crate::assembler::assemble;
use crate::eligibility::convertible;
use crate::flatten::flatten;

/// A single item that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertFailure {
    pub codename: String,
    pub language: String,
    pub reason: String,
}

/// Result of a batch conversion.
#[derive(Debug)]
pub struct ConvertReport {
    /// Records for every item that converted, in universe order.
    pub records: Vec<SearchRecord>,
    /// Items that were eligible but failed to convert.
    pub failures: Vec<ConvertFailure>,
    /// Items that were not pages of their own.
    pub skipped: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting conversion status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each eligible item, whether it converted or not.
    fn item_converted(&self, codename: &str, current: usize, total: usize);
    /// Called when the batch completes.
    fn done(&self, report: &ConvertReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn item_converted(&self, _codename: &str, _current: usize, _total: usize) {}
    fn done(&self, _report: &ConvertReport) {}
}

/// Convert every eligible item in `universe` into a search record.
#[instrument(skip_all, fields(items = universe.len(), slug_field = %settings.slug_field))]
pub fn convert_all(
    universe: &ItemUniverse,
    settings: &ConvertSettings,
    progress: &dyn ProgressReporter,
) -> ConvertReport {
    let start = Instant::now();

    progress.phase("Selecting pages");
    let is_page = convertible(&settings.slug_field);
    let roots: Vec<_> = universe.values().filter(|item| is_page(*item)).collect();
    let skipped = universe.len() - roots.len();
    debug!(roots = roots.len(), skipped, "eligible items selected");

    progress.phase("Converting items");
    let mut records = Vec::with_capacity(roots.len());
    let mut failures = Vec::new();

    for (index, item) in roots.iter().enumerate() {
        match assemble(item, settings) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(
                    codename = %item.codename(),
                    language = %item.system.language,
                    error = %e,
                    "item conversion failed, skipping"
                );
                failures.push(ConvertFailure {
                    codename: item.system.codename.clone(),
                    language: item.system.language.clone(),
                    reason: e.to_string(),
                });
            }
        }
        progress.item_converted(item.codename(), index + 1, roots.len());
    }

    let report = ConvertReport {
        records,
        failures,
        skipped,
        elapsed: start.elapsed(),
    };

    info!(
        records = report.records.len(),
        failures = report.failures.len(),
        skipped = report.skipped,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "conversion complete"
    );

    progress.done(&report);
    report
}

/// Flatten one item from the universe by codename, as a debugging aid.
pub fn flatten_item(
    universe: &ItemUniverse,
    codename: &str,
    settings: &ConvertSettings,
) -> Result<Vec<ContentBlock>> {
    let item = universe.get(codename).ok_or_else(|| {
        ContentIndexError::validation(format!("no item with codename '{codename}'"))
    })?;
    Ok(flatten(item, &[], &settings.slug_field))
}
