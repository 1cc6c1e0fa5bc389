//! Plain-text lists of tracking IDs already in use
//!
//! One ID per line, as exported from the document store. Blank lines and
//! lines starting with `#` are skipped; grouped IDs (`1234-5678-9012`) are
//! accepted and stored ungrouped.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::tracking_id::unformat;

/// Reads the set of taken IDs from `path`
pub fn load_existing_ids(path: &Path, separator: &str) -> Result<HashSet<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ID list: {}", path.display()))?;
    Ok(parse_id_list(&content, separator))
}

/// Parses an ID list from text
pub fn parse_id_list(content: &str, separator: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| unformat(line, separator))
        .collect()
}
