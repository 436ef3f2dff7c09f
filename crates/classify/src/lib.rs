//! Severity/priority classification and crime-label derivation.
//!
//! Works over the ranked match candidates: each matched section's
//! combined title+description is tested against fixed keyword maps.
//! The maps are immutable configuration built once and passed by
//! reference, never module-level mutable state.

use fira_model::{MatchCandidate, Priority, Severity};

/// Ordered keyword maps for severity and priority.
///
/// Keys are domain terms and bare section codes, tested as substrings
/// of the lowercased title+description. Order matters for crime-label
/// derivation (first matching key wins), so these are kept as ordered
/// pairs rather than hash maps.
#[derive(Debug, Clone)]
pub struct ClassifyConfig {
    pub severity_map: Vec<(String, Severity)>,
    pub priority_map: Vec<(String, Priority)>,
    /// Boilerplate prefixes stripped from titles used as labels
    pub title_prefixes: Vec<String>,
    /// Maximum number of crime labels reported
    pub max_labels: usize,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        let sev = |k: &str, v: Severity| (k.to_string(), v);
        let pri = |k: &str, v: Priority| (k.to_string(), v);
        Self {
            severity_map: vec![
                sev("murder", Severity::High),
                sev("kill", Severity::High),
                sev("death", Severity::High),
                sev("rape", Severity::High),
                sev("302", Severity::High),
                sev("376", Severity::High),
                sev("dacoity", Severity::High),
                sev("kidnapping", Severity::High),
                sev("395", Severity::High),
                sev("363", Severity::High),
                sev("robbery", Severity::Medium),
                sev("theft", Severity::Medium),
                sev("fraud", Severity::Medium),
                sev("420", Severity::Medium),
                sev("assault", Severity::Medium),
                sev("hurt", Severity::Low),
                sev("323", Severity::Low),
                sev("forgery", Severity::Medium),
            ],
            priority_map: vec![
                pri("murder", Priority::Urgent),
                pri("rape", Priority::Urgent),
                pri("dacoity", Priority::Urgent),
                pri("kidnapping", Priority::Urgent),
                pri("robbery", Priority::Urgent),
                pri("assault", Priority::Normal),
                pri("theft", Priority::Normal),
            ],
            title_prefixes: vec![
                "Punishment for ".to_string(),
                "Punishment of ".to_string(),
            ],
            max_labels: 5,
        }
    }
}

/// Derive severity and priority from the matched sections.
///
/// Resolution is highest-wins: any High-tier key pins severity to High,
/// Medium only applies while no High has been seen; any Urgent key pins
/// priority. Sections that match no map key at all leave the initial
/// Low/Normal in place, which is distinct from the empty-match case
/// (no sections ⇒ Unknown).
pub fn classify(matches: &[MatchCandidate], config: &ClassifyConfig) -> (Severity, Priority) {
    if matches.is_empty() {
        return (Severity::Unknown, Priority::Normal);
    }

    let mut severity = Severity::Low;
    let mut priority = Priority::Normal;

    for candidate in matches {
        let combined = candidate.section.combined_text();

        for (key, tier) in &config.severity_map {
            if combined.contains(key.as_str()) {
                match tier {
                    Severity::High => severity = Severity::High,
                    Severity::Medium if severity != Severity::High => {
                        severity = Severity::Medium
                    }
                    _ => {}
                }
            }
        }

        for (key, tier) in &config.priority_map {
            if combined.contains(key.as_str()) && *tier == Priority::Urgent {
                priority = Priority::Urgent;
            }
        }
    }

    (severity, priority)
}

/// Derive short crime labels from the matched sections.
///
/// Best-effort presentation logic: per section, the first severity-map
/// key found in the combined text that is not a bare code becomes the
/// label (uppercased, underscores to spaces); otherwise the title with
/// boilerplate prefixes stripped. Deduplicated in first-seen order,
/// capped at `max_labels`.
pub fn crime_labels(matches: &[MatchCandidate], config: &ClassifyConfig) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();

    for candidate in matches {
        let combined = candidate.section.combined_text();

        let keyword = config
            .severity_map
            .iter()
            .map(|(key, _)| key)
            .find(|key| combined.contains(key.as_str()) && !key.chars().all(|c| c.is_ascii_digit()));

        let label = match keyword {
            Some(key) => key.replace('_', " ").to_uppercase(),
            None => {
                let mut title = candidate.section.title.trim().to_string();
                for prefix in &config.title_prefixes {
                    if let Some(stripped) = title.strip_prefix(prefix.as_str()) {
                        title = stripped.trim().to_string();
                    }
                }
                title
            }
        };

        if !labels.contains(&label) {
            labels.push(label);
        }
        if labels.len() >= config.max_labels {
            break;
        }
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use fira_model::Section;

    fn candidate(code: &str, title: &str, description: &str) -> MatchCandidate {
        MatchCandidate {
            section: Section::new(code, title, description),
            score: 50,
            reasons: vec![],
        }
    }

    #[test]
    fn test_empty_matches_unknown() {
        let (severity, priority) = classify(&[], &ClassifyConfig::default());
        assert_eq!(severity, Severity::Unknown);
        assert_eq!(priority, Priority::Normal);
    }

    #[test]
    fn test_high_pins_severity() {
        let matches = vec![
            candidate("378", "Theft", "dishonest taking"),
            candidate("302", "Punishment for murder", "whoever commits murder..."),
        ];
        let (severity, priority) = classify(&matches, &ClassifyConfig::default());
        assert_eq!(severity, Severity::High);
        assert_eq!(priority, Priority::Urgent);
    }

    #[test]
    fn test_high_wins_regardless_of_order() {
        let matches = vec![
            candidate("302", "Punishment for murder", ""),
            candidate("378", "Theft", ""),
        ];
        let (severity, _) = classify(&matches, &ClassifyConfig::default());
        assert_eq!(severity, Severity::High);
    }

    #[test]
    fn test_medium_only_without_high() {
        let matches = vec![candidate("378", "Theft", "dishonest taking")];
        let (severity, priority) = classify(&matches, &ClassifyConfig::default());
        assert_eq!(severity, Severity::Medium);
        assert_eq!(priority, Priority::Normal);
    }

    #[test]
    fn test_no_map_key_stays_low() {
        let matches = vec![candidate("188", "Disobedience to order of public servant", "")];
        let (severity, priority) = classify(&matches, &ClassifyConfig::default());
        assert_eq!(severity, Severity::Low);
        assert_eq!(priority, Priority::Normal);
    }

    #[test]
    fn test_bare_code_key_matches_description() {
        // "302" appearing in the description text is enough for High
        let matches = vec![candidate("34", "Common intention", "read with section 302")];
        let (severity, _) = classify(&matches, &ClassifyConfig::default());
        assert_eq!(severity, Severity::High);
    }

    #[test]
    fn test_label_prefers_keyword_over_title() {
        let matches = vec![candidate("302", "Punishment for murder", "")];
        let labels = crime_labels(&matches, &ClassifyConfig::default());
        assert_eq!(labels, vec!["MURDER".to_string()]);
    }

    #[test]
    fn test_label_never_a_bare_code() {
        // combined text contains "420" but no word key
        let matches = vec![candidate("420", "Cheating and dishonestly inducing delivery", "see 420")];
        let labels = crime_labels(&matches, &ClassifyConfig::default());
        assert_eq!(labels, vec!["Cheating and dishonestly inducing delivery".to_string()]);
    }

    #[test]
    fn test_label_strips_title_boilerplate() {
        let matches = vec![candidate("193", "Punishment for false evidence", "")];
        let labels = crime_labels(&matches, &ClassifyConfig::default());
        assert_eq!(labels, vec!["false evidence".to_string()]);
    }

    #[test]
    fn test_labels_dedup_and_cap() {
        let matches: Vec<MatchCandidate> = (0..7)
            .map(|i| candidate(&format!("30{i}"), "Punishment for murder", ""))
            .collect();
        let labels = crime_labels(&matches, &ClassifyConfig::default());
        assert_eq!(labels, vec!["MURDER".to_string()]);

        let matches = vec![
            candidate("302", "Punishment for murder", ""),
            candidate("376", "Rape", ""),
            candidate("378", "Theft", ""),
            candidate("392", "Robbery", ""),
            candidate("420", "Fraud and cheating", ""),
            candidate("363", "Kidnapping", ""),
        ];
        let labels = crime_labels(&matches, &ClassifyConfig::default());
        assert_eq!(labels.len(), 5);
    }
}
