//! Reading criteria and answers from disk.

use std::path::Path;

use anyhow::{Context, Result};
use evalcrit_core::EvaluationCriteria;
use tracing::debug;

/// Load criteria from a `.toml` file, or JSON for any other extension, and
/// check their invariants.
pub fn load_criteria(path: &Path) -> Result<EvaluationCriteria> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read criteria file: {:?}", path))?;

    let criteria: EvaluationCriteria = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&text)
            .with_context(|| format!("Criteria file is not valid TOML: {:?}", path))?,
        _ => serde_json::from_str(&text)
            .with_context(|| format!("Criteria file is not valid JSON: {:?}", path))?,
    };
    criteria
        .validate()
        .with_context(|| format!("Invalid criteria in {:?}", path))?;

    debug!(path = ?path, criteria = criteria.len(), "criteria loaded");
    Ok(criteria)
}

/// Load raw answers: a JSON array of strings, one per criterion.
pub fn load_raw_answers(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file: {:?}", path))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Answers file is not a JSON array of strings: {:?}", path))
}
