//! Reference-table loading.
//!
//! The engine consumes an ordered, read-only collection of `Section`
//! records. This crate loads it from a JSON dataset file and provides a
//! small built-in table for running without one. A table that fails to
//! load degrades to an empty table; the engine then returns the defined
//! empty-match report rather than crashing.

use fira_model::Section;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors from dataset loading.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One row of the dataset file. Accepts both the capitalized column
/// names of the source CSV export and lowercase field names.
#[derive(Debug, Deserialize)]
struct SectionRow {
    #[serde(alias = "Section")]
    section: String,

    #[serde(alias = "Title")]
    title: String,

    #[serde(default, alias = "Description")]
    description: String,
}

impl From<SectionRow> for Section {
    fn from(row: SectionRow) -> Self {
        Section::new(row.section, row.title, row.description)
    }
}

/// Load the reference table from a JSON array of rows.
pub fn load_sections(path: &Path) -> Result<Vec<Section>, DatasetError> {
    let raw = std::fs::read_to_string(path)?;
    let rows: Vec<SectionRow> = serde_json::from_str(&raw)?;
    Ok(rows.into_iter().map(Section::from).collect())
}

/// Load the reference table, degrading to an empty table on failure.
///
/// A missing or malformed dataset is not fatal for the host system; the
/// engine treats an empty table as "no qualifying matches".
pub fn load_sections_or_empty(path: &Path) -> Vec<Section> {
    match load_sections(path) {
        Ok(sections) => {
            tracing::info!(path = %path.display(), count = sections.len(), "loaded reference table");
            sections
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to load reference table, using empty table");
            Vec::new()
        }
    }
}

/// Built-in fallback table covering the common offence categories.
/// Used by the CLI when no dataset file is supplied.
pub fn builtin_sections() -> Vec<Section> {
    [
        ("302", "Punishment for murder", "Death or life imprisonment"),
        ("378", "Theft", "Imprisonment up to 3 years or fine or both"),
        ("392", "Punishment for robbery", "Rigorous imprisonment up to 10 years and fine"),
        ("323", "Voluntarily causing hurt", "Imprisonment up to 1 year or fine up to Rs.1000 or both"),
        ("376", "Rape", "Rigorous imprisonment not less than 10 years, may extend to life"),
        ("363", "Kidnapping", "Imprisonment up to 7 years and fine"),
        ("420", "Cheating and dishonestly inducing delivery of property", "Imprisonment up to 7 years and fine"),
        ("395", "Dacoity", "Rigorous imprisonment for life or up to 10 years and fine"),
        ("147", "Rioting", "Imprisonment up to 2 years or fine or both"),
        ("304B", "Dowry death", "Imprisonment not less than 7 years, may extend to life"),
        ("498A", "Cruelty by husband or relatives", "Imprisonment up to 3 years and fine"),
        ("66", "Computer related offences", "Imprisonment up to 3 years or fine up to Rs.5 lakh"),
        ("20", "Possession of narcotic drugs", "Rigorous imprisonment up to 10 years and fine"),
        ("7", "Bribery by public servant", "Imprisonment from 6 months to 5 years and fine"),
    ]
    .into_iter()
    .map(|(code, title, description)| Section::new(code, title, description))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_lowercase_fields() {
        let path = write_temp(
            "fira_dataset_lower.json",
            r#"[{"section": "302", "title": "Punishment for murder", "description": "whoever commits murder..."}]"#,
        );
        let sections = load_sections(&path).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].code, "302");
    }

    #[test]
    fn test_load_capitalized_columns() {
        let path = write_temp(
            "fira_dataset_caps.json",
            r#"[{"Section": "420", "Title": "Cheating", "Description": "dishonest inducement"}]"#,
        );
        let sections = load_sections(&path).unwrap();
        assert_eq!(sections[0].code, "420");
        assert_eq!(sections[0].title, "Cheating");
    }

    #[test]
    fn test_missing_description_defaults_empty() {
        let path = write_temp(
            "fira_dataset_nodesc.json",
            r#"[{"Section": "147", "Title": "Rioting"}]"#,
        );
        let sections = load_sections(&path).unwrap();
        assert_eq!(sections[0].description, "");
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let sections = load_sections_or_empty(Path::new("/nonexistent/fira.json"));
        assert!(sections.is_empty());
    }

    #[test]
    fn test_malformed_file_degrades_to_empty() {
        let path = write_temp("fira_dataset_bad.json", "not json at all");
        let sections = load_sections_or_empty(&path);
        assert!(sections.is_empty());
    }

    #[test]
    fn test_builtin_table_codes_unique() {
        let sections = builtin_sections();
        let mut codes: Vec<String> = sections.iter().map(|s| s.normalized_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), sections.len());
    }
}
