//! Discipline detection from naming-convention tokens.
//!
//! Appended model files carry discipline identifiers in their names
//! (e.g. "L01_ARCH_Model"). Only root-level names are inspected;
//! descendants never contribute disciplines.

use std::collections::BTreeSet;

use crate::domain::entities::DisciplineTag;

/// Fixed ordered pattern list. Order matters: a name matching several
/// patterns is credited to the first one only.
pub const DISCIPLINE_PATTERNS: [&str; 11] = [
    "_ARCH_", "_STRC_", "_MEP_", "_MECH_", "_ELEC_", "_PLUM_", "_HVAC_", "_FIRE_", "_CIVIL_",
    "_SITE_", "_LAND_",
];

/// Scan root item names for discipline tokens.
///
/// Case-insensitive substring search against each pattern in list order;
/// the first matching pattern wins for a given name. Never fails; an
/// empty result is the caller's error condition.
pub fn classify<'a>(root_names: impl IntoIterator<Item = &'a str>) -> BTreeSet<DisciplineTag> {
    let mut found = BTreeSet::new();

    for name in root_names {
        let lowered = name.to_lowercase();
        for pattern in DISCIPLINE_PATTERNS {
            if lowered.contains(&pattern.to_lowercase()) {
                found.insert(DisciplineTag::from_pattern(pattern));
                break;
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        classify(names.iter().copied())
            .into_iter()
            .map(|t| t.as_str().to_string())
            .collect()
    }

    #[test]
    fn given_mixed_root_names_when_classifying_then_only_matching_tags() {
        let result = tags(&["L01_ARCH_Model", "L01_STRC_Model", "Misc"]);
        assert_eq!(result, vec!["ARCH", "STRC"]);
    }

    #[test]
    fn given_lowercase_token_when_classifying_then_matched_case_insensitively() {
        let result = tags(&["l01_arch_model"]);
        assert_eq!(result, vec!["ARCH"]);
    }

    #[test]
    fn given_name_matching_multiple_patterns_when_classifying_then_first_pattern_wins() {
        // _ARCH_ precedes _MEP_ in the pattern list
        let result = tags(&["X_MEP_Y_ARCH_Z"]);
        assert_eq!(result, vec!["ARCH"]);
    }

    #[test]
    fn given_duplicate_tokens_when_classifying_then_deduplicated() {
        let result = tags(&["A_MEP_1", "B_MEP_2"]);
        assert_eq!(result, vec!["MEP"]);
    }

    #[test]
    fn given_no_matching_names_when_classifying_then_empty() {
        assert!(tags(&["Misc", "Other"]).is_empty());
    }

    #[test]
    fn given_no_roots_when_classifying_then_empty() {
        assert!(tags(&[]).is_empty());
    }

    #[test]
    fn given_all_patterns_when_classifying_then_lexical_iteration_order() {
        let names: Vec<String> = DISCIPLINE_PATTERNS
            .iter()
            .map(|p| format!("file{p}model"))
            .collect();
        let result = tags(&names.iter().map(|s| s.as_str()).collect::<Vec<_>>());
        let mut sorted = result.clone();
        sorted.sort();
        assert_eq!(result, sorted);
        assert_eq!(result.len(), DISCIPLINE_PATTERNS.len());
    }
}
