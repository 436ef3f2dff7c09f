//! Core domain model for the FIR analyser.
//!
//! This crate defines the fundamental types used throughout the system:
//! - `Section`: A penal-code provision from the reference table
//! - `MatchCandidate`: A scored pairing of narrative text and a section
//! - `MatchTier`: Which scoring strategy produced a match
//! - `AnalysisReport`: The final result returned to the caller

use serde::{Deserialize, Serialize};

/// Severity classification for an analysed incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Capital or otherwise grave offences
    High,
    /// Property and economic offences
    Medium,
    /// Minor hurt and nuisance offences
    Low,
    /// No sections matched at all
    Unknown,
}

impl Default for Severity {
    fn default() -> Self {
        Self::Unknown
    }
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unknown => "Unknown",
        }
    }
}

/// Investigation priority for an analysed incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Urgent,
    Normal,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Normal => "Normal",
        }
    }
}

/// A penal-code section from the reference table.
///
/// Immutable for the engine's lifetime. The table is loaded once at startup
/// and shared read-only across analysis calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Short alphanumeric identifier (e.g. "302", "304B")
    pub code: String,

    /// Short human-readable name of the offence
    pub title: String,

    /// Longer descriptive text; also serves as the punishment text,
    /// since the dataset guarantees no separate punishment column
    #[serde(default)]
    pub description: String,
}

impl Section {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// Code as used for matching: trimmed and lowercased.
    /// Display keeps the original casing.
    pub fn normalized_code(&self) -> String {
        self.code.trim().to_lowercase()
    }

    /// Punishment text falls back to the description; the reference
    /// dataset has no dedicated punishment column.
    pub fn punishment_text(&self) -> &str {
        &self.description
    }

    /// Title and description combined and lowercased, the form the
    /// severity/priority keyword maps are tested against.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }
}

/// Which scoring tier produced a match. The tiers are mutually
/// exclusive per section; the first one that fires wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tier", content = "detail")]
pub enum MatchTier {
    /// The narrative cites the section explicitly ("Section 302", "u/s 302")
    ExplicitCitation,

    /// The bare code appears in the text, corroborated by title keywords
    NumberKeyword {
        /// Title keywords found in the narrative
        keywords: Vec<String>,
    },

    /// No number at all; title keywords and crime anchors only
    KeywordOnly {
        /// Title keywords found in the narrative
        keywords: Vec<String>,
        /// Anchor terms present in both title and narrative
        anchors: Vec<String>,
    },
}

impl MatchTier {
    /// Stable tag for display and serialized reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ExplicitCitation => "explicit-citation",
            Self::NumberKeyword { .. } => "number+keyword",
            Self::KeywordOnly { .. } => "keyword-only",
        }
    }
}

/// A scored candidate section.
///
/// Created during scoring, consumed by ranking, discarded after top-N
/// selection. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// The matched section
    pub section: Section,

    /// Non-negative confidence score; candidates below the admission
    /// threshold are dropped before ranking
    pub score: u32,

    /// Which tier(s) fired, in evaluation order
    pub reasons: Vec<MatchTier>,
}

/// Structured fields from the incident collection form.
///
/// All fields are optional; when an analysis is run from pasted text
/// alone, no form exists. The serialized form is appended to the
/// narrative before scoring, so field content participates in matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complainant_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complainant_phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complainant_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accused_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accused_details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub witness_details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stolen_property: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_description: Option<String>,
}

/// Placeholder when a form field was left blank.
pub const NOT_PROVIDED: &str = "Not provided";
/// Placeholder for an unknown accused.
pub const NOT_IDENTIFIED: &str = "Not identified";

/// Echo of caller-supplied structured fields, with placeholders
/// substituted for anything absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedInfo {
    pub complainant: String,
    pub location: String,
    pub date: String,
    pub accused: String,
}

impl ExtractedInfo {
    pub fn from_form(form: Option<&IncidentForm>) -> Self {
        fn field(value: Option<&Option<String>>, placeholder: &str) -> String {
            value
                .and_then(|v| v.as_deref())
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(placeholder)
                .to_string()
        }

        Self {
            complainant: field(form.map(|f| &f.complainant_name), NOT_PROVIDED),
            location: field(form.map(|f| &f.incident_location), NOT_PROVIDED),
            date: field(form.map(|f| &f.incident_date), NOT_PROVIDED),
            accused: field(form.map(|f| &f.accused_name), NOT_IDENTIFIED),
        }
    }
}

impl Default for ExtractedInfo {
    fn default() -> Self {
        Self::from_form(None)
    }
}

/// Crime label reported when no section qualified.
pub const NO_CRIME_LABEL: &str = "NO SPECIFIC CRIME DETECTED";

/// The final analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Up to 5 short crime-type names, deduplicated, first-seen order
    pub crime_labels: Vec<String>,

    /// Up to 8 candidates, unique by section code, score descending
    pub matched_sections: Vec<MatchCandidate>,

    pub severity: Severity,

    pub priority: Priority,

    /// Display heuristic in [0, 99]; 0 reserved for "no match"
    pub confidence: u8,

    /// Fixed investigative actions, not derived from the input
    pub suggestions: Vec<String>,

    pub extracted_info: ExtractedInfo,
}

impl AnalysisReport {
    /// The report shape for "no qualifying sections". This is the
    /// defined result for empty or non-matching input, not an error.
    pub fn empty(form: Option<&IncidentForm>) -> Self {
        Self {
            crime_labels: vec![NO_CRIME_LABEL.to_string()],
            matched_sections: Vec::new(),
            severity: Severity::Unknown,
            priority: Priority::Normal,
            confidence: 0,
            suggestions: Vec::new(),
            extracted_info: ExtractedInfo::from_form(form),
        }
    }

    pub fn is_empty_match(&self) -> bool {
        self.matched_sections.is_empty()
    }
}
