//! Log lines for reading diagnosis files and reporting per-source problems.

use std::path::Path;
use std::time::Duration;

/// Announce that a diagnosis file is about to be read
pub fn log_read_start(path: &Path) {
    log::info!("Reading diagnoses from {}", path.display());
}

/// Report how many rows a diagnosis file produced
pub fn log_read_complete(path: &Path, rows: usize, elapsed: Duration) {
    log::info!("Read {rows} rows from {} in {elapsed:?}", path.display());
}

/// Message for a problem found in one named source
#[must_use]
pub fn source_message(source_name: &str, message: &str) -> String {
    format!("{source_name}: {message}")
}

/// Warn about a problem found in one named source
///
/// Used for conditions that do not stop a load, such as skipped empty code
/// cells or codes matched only by their chapter family.
pub fn log_source_warning(source_name: &str, message: &str) {
    log::warn!("{}", source_message(source_name, message));
}
