use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub mod dates;
pub mod sentiment;
pub mod table;
pub mod trades;

/// Resolve an input to the configured path, falling back to the bare
/// filename in the working directory.
pub fn resolve_input_path(
    label: &str,
    configured: &Path,
    fallback: &str,
) -> Result<PathBuf, String> {
    if configured.exists() {
        return Ok(configured.to_path_buf());
    }
    let fallback = Path::new(fallback);
    if fallback.exists() {
        return Ok(fallback.to_path_buf());
    }
    Err(format!(
        "could not find {}: checked {} and {}",
        label,
        configured.display(),
        fallback.display()
    ))
}

pub fn ranges_overlap(a: (NaiveDate, NaiveDate), b: (NaiveDate, NaiveDate)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}
