//! The analysis engine: narrative in, report out.
//!
//! `Analyser` wires the pipeline together: citation extraction and
//! scoring against the reference table, ranking, severity/priority
//! classification, confidence estimation, and report assembly. Each
//! call is a pure function of (narrative, form, table snapshot); the
//! table is loaded once and shared read-only, so an `Analyser` can be
//! used from concurrent requests without coordination.

use fira_classify::{classify, crime_labels, ClassifyConfig};
use fira_model::{AnalysisReport, ExtractedInfo, IncidentForm, Section};
use fira_score::{rank, score_sections, ScoreConfig};
use rand::Rng;

/// Source of the confidence jitter.
///
/// The displayed confidence carries a small random term. It has no
/// correctness meaning, so it is injectable: production uses the
/// thread RNG, tests pin a fixed value for determinism.
pub trait Jitter: Send + Sync {
    /// Draw a value in `0..=upper`.
    fn sample(&self, upper: u8) -> u8;
}

/// Default jitter backed by the thread-local RNG.
#[derive(Debug, Default)]
pub struct ThreadRngJitter;

impl Jitter for ThreadRngJitter {
    fn sample(&self, upper: u8) -> u8 {
        rand::thread_rng().gen_range(0..=upper)
    }
}

/// Jitter pinned to a constant, for deterministic tests.
#[derive(Debug)]
pub struct FixedJitter(pub u8);

impl Jitter for FixedJitter {
    fn sample(&self, upper: u8) -> u8 {
        self.0.min(upper)
    }
}

/// Base of the displayed confidence value.
const CONFIDENCE_BASE: u8 = 85;
/// Confidence never reaches 100; 0 is reserved for "no match".
const CONFIDENCE_CAP: u8 = 99;
/// Upper bound of the random jitter term.
const JITTER_MAX: u8 = 5;

/// Fixed investigative suggestions attached to every non-empty report.
const SUGGESTIONS: [&str; 5] = [
    "Immediate investigation required",
    "Collect forensic evidence from crime scene",
    "Record witness statements",
    "Verify accused identity and background",
    "Check for prior criminal records in CCTNS database",
];

/// The matching-and-scoring engine.
pub struct Analyser {
    table: Vec<Section>,
    score_config: ScoreConfig,
    classify_config: ClassifyConfig,
    jitter: Box<dyn Jitter>,
}

impl Analyser {
    /// Create an analyser over a reference-table snapshot. An empty
    /// table is valid: every analysis then yields the empty-match
    /// report.
    pub fn new(table: Vec<Section>) -> Self {
        Self {
            table,
            score_config: ScoreConfig::default(),
            classify_config: ClassifyConfig::default(),
            jitter: Box::new(ThreadRngJitter),
        }
    }

    pub fn with_score_config(mut self, config: ScoreConfig) -> Self {
        self.score_config = config;
        self
    }

    pub fn with_classify_config(mut self, config: ClassifyConfig) -> Self {
        self.classify_config = config;
        self
    }

    pub fn with_jitter(mut self, jitter: impl Jitter + 'static) -> Self {
        self.jitter = Box::new(jitter);
        self
    }

    /// Analyse a narrative, optionally with structured form fields.
    ///
    /// Never fails: empty or non-linguistic input yields the defined
    /// empty-match report, not an error.
    pub fn analyse(&self, narrative: &str, form: Option<&IncidentForm>) -> AnalysisReport {
        let full_text = self.full_text(narrative, form);

        let candidates = score_sections(&full_text, &self.table, &self.score_config);
        let matched = rank(candidates, self.score_config.max_results);

        if matched.is_empty() {
            tracing::debug!("no qualifying sections, returning empty-match report");
            return AnalysisReport::empty(form);
        }

        let (severity, priority) = classify(&matched, &self.classify_config);
        let labels = crime_labels(&matched, &self.classify_config);
        let confidence = self.estimate_confidence(matched.len());

        tracing::debug!(
            matched = matched.len(),
            severity = severity.label(),
            priority = priority.label(),
            confidence,
            "analysis complete"
        );

        AnalysisReport {
            crime_labels: labels,
            matched_sections: matched,
            severity,
            priority,
            confidence,
            suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            extracted_info: ExtractedInfo::from_form(form),
        }
    }

    /// The text the scorer sees: the narrative, with the serialized
    /// form appended so field content (dates, descriptions) also
    /// participates in matching.
    fn full_text(&self, narrative: &str, form: Option<&IncidentForm>) -> String {
        let mut full_text = narrative.to_string();
        if let Some(form) = form {
            if let Ok(serialized) = serde_json::to_string(form) {
                full_text.push(' ');
                full_text.push_str(&serialized);
            }
        }
        full_text
    }

    /// Display heuristic, not a calibrated probability: base 85 plus
    /// the match count plus jitter, capped at 99. More matches means a
    /// generally higher displayed value and nothing more.
    fn estimate_confidence(&self, matched_count: usize) -> u8 {
        let raw = CONFIDENCE_BASE as u32
            + matched_count as u32
            + self.jitter.sample(JITTER_MAX) as u32;
        raw.min(CONFIDENCE_CAP as u32) as u8
    }
}
