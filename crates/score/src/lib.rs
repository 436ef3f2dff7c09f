//! Candidate scoring and ranking for penal-code sections.
//!
//! Takes narrative text and the reference table and produces ranked
//! match candidates. The scorer is an ordered-tier evaluator, not a
//! weighted sum: for each section the first tier that fires decides the
//! score, so the hand-tuned thresholds behave exactly as documented.

use fira_extract::{bare_codes, extract_citations, matched_keywords, title_keywords};
use fira_model::{MatchCandidate, MatchTier, Section};
use std::collections::HashSet;

/// Configuration for the three-tier scorer.
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Score for an explicitly cited section
    pub citation_score: u32,
    /// Base score for a corroborated bare-number match
    pub number_base: u32,
    /// Score contribution per matched title keyword
    pub keyword_weight: u32,
    /// Boost when a crime anchor appears in both title and narrative
    pub anchor_boost: u32,
    /// Admission threshold; candidates below it are silently excluded
    pub min_score: u32,
    /// Maximum entries after ranking
    pub max_results: usize,
    /// Minimum keyword length for tier 2 (exclusive)
    pub number_keyword_min_len: usize,
    /// Minimum keyword length for tier 3 (exclusive, stricter)
    pub pure_keyword_min_len: usize,
    /// Anchor terms for very specific crimes
    pub crime_anchors: Vec<String>,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            citation_score: 50,
            number_base: 20,
            keyword_weight: 5,
            anchor_boost: 15,
            min_score: 15,
            max_results: 8,
            number_keyword_min_len: 3,
            pure_keyword_min_len: 4,
            crime_anchors: vec![
                "murder".to_string(),
                "rape".to_string(),
                "dacoity".to_string(),
            ],
        }
    }
}

/// Purely numeric codes in this range read as years, not sections.
const YEAR_MIN: u32 = 1950;
const YEAR_MAX: u32 = 2030;
/// Purely numeric codes below this read as ordinary small counts.
const SMALL_COUNT_LIMIT: u32 = 11;

/// A bare number that is probably a year ("since 1995") rather than a
/// section reference. Only explicit citations override this.
fn is_year_like(code: &str) -> bool {
    code.parse::<u32>()
        .map(|n| n > YEAR_MIN && n < YEAR_MAX)
        .unwrap_or(false)
}

/// A bare number too small to be a plausible section reference.
fn is_small_count(code: &str) -> bool {
    code.parse::<u32>().map(|n| n < SMALL_COUNT_LIMIT).unwrap_or(false)
}

/// Score every section of the table against the narrative.
///
/// Returns one candidate per section that clears the admission
/// threshold, in table order. Callers pass the result to [`rank`].
pub fn score_sections(text: &str, table: &[Section], config: &ScoreConfig) -> Vec<MatchCandidate> {
    let text_lower = text.to_lowercase();
    let citations = extract_citations(text);
    let numbers = bare_codes(text);

    tracing::debug!(
        citations = citations.len(),
        bare_numbers = numbers.len(),
        sections = table.len(),
        "scoring narrative against reference table"
    );

    table
        .iter()
        .filter_map(|section| score_one(section, &text_lower, &citations, &numbers, config))
        .collect()
}

/// Evaluate the tier cascade for a single section. Tiers are mutually
/// exclusive; the first that applies decides the score.
fn score_one(
    section: &Section,
    text_lower: &str,
    citations: &HashSet<String>,
    numbers: &HashSet<String>,
    config: &ScoreConfig,
) -> Option<MatchCandidate> {
    let code = section.normalized_code();
    let mut score = 0u32;
    let mut reasons = Vec::new();

    if citations.contains(&code) {
        // Tier 1: explicit citation, highest confidence.
        score += config.citation_score;
        reasons.push(MatchTier::ExplicitCitation);
    } else if numbers.contains(&code) {
        // Tier 2: bare number, needs keyword corroboration. Year-like
        // and small numbers never qualify here regardless of keywords.
        if !is_year_like(&code) && !is_small_count(&code) {
            let keywords = title_keywords(&section.title, config.number_keyword_min_len);
            let found = matched_keywords(&keywords, text_lower);
            if !found.is_empty() {
                score += config.number_base + config.keyword_weight * found.len() as u32;
                reasons.push(MatchTier::NumberKeyword { keywords: found });
            }
        }
    } else {
        // Tier 3: pure keyword match, stricter token length and a
        // two-keyword minimum before any score accrues.
        let keywords = title_keywords(&section.title, config.pure_keyword_min_len);
        let found = matched_keywords(&keywords, text_lower);
        let mut tier_score = 0u32;
        if found.len() >= 2 {
            tier_score += config.keyword_weight * found.len() as u32;
        }

        // Anchor boosts apply independently of the two-keyword minimum.
        let title_lower = section.title.to_lowercase();
        let anchors: Vec<String> = config
            .crime_anchors
            .iter()
            .filter(|a| title_lower.contains(a.as_str()) && text_lower.contains(a.as_str()))
            .cloned()
            .collect();
        tier_score += config.anchor_boost * anchors.len() as u32;

        if tier_score > 0 {
            score += tier_score;
            reasons.push(MatchTier::KeywordOnly {
                keywords: found,
                anchors,
            });
        }
    }

    if score >= config.min_score {
        Some(MatchCandidate {
            section: section.clone(),
            score,
            reasons,
        })
    } else {
        None
    }
}

/// Rank candidates: stable sort by score descending (ties keep table
/// encounter order), keep the first occurrence of each normalized code,
/// truncate to `max_results`.
pub fn rank(mut candidates: Vec<MatchCandidate>, max_results: usize) -> Vec<MatchCandidate> {
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    let mut seen: HashSet<String> = HashSet::new();
    let mut ranked = Vec::new();
    for candidate in candidates {
        if ranked.len() >= max_results {
            break;
        }
        if seen.insert(candidate.section.normalized_code()) {
            ranked.push(candidate);
        }
    }
    ranked
}
