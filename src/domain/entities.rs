//! Domain entities: core data structures

use std::fmt;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Name of the folder holding discipline search sets.
pub const DISCIPLINES_FOLDER: &str = "1. DISCIPLINES";

/// Name of the folder holding per-discipline clash sets.
pub const CLASH_SETS_FOLDER: &str = "2. CLASH SETS";

/// Discipline identifier derived from a naming-convention token,
/// e.g. "ARCH" from "_ARCH_".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DisciplineTag(String);

impl DisciplineTag {
    /// Derive a tag from a matched pattern by trimming `_` delimiters.
    pub fn from_pattern(pattern: &str) -> Self {
        Self(pattern.trim_matches('_').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wildcard pattern matching any item name carrying this tag.
    pub fn wildcard(&self) -> String {
        format!("*_{}_*", self.0)
    }
}

impl fmt::Display for DisciplineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Element attribute the clash-set pass groups by.
///
/// Closed enumeration: unknown selectors are unrepresentable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeSelector {
    #[default]
    Category,
    SystemName,
    SystemClassification,
    Workset,
    FamilyType,
}

impl AttributeSelector {
    /// Resolve to the fixed (category, property) key pair the host exposes.
    pub fn keys(self) -> (&'static str, &'static str) {
        match self {
            Self::Category => ("Element", "Category"),
            Self::SystemName => ("Element", "System Name"),
            Self::SystemClassification => ("Element", "System Classification"),
            Self::Workset => ("Element", "Workset"),
            Self::FamilyType => ("Element", "Type"),
        }
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (_, property) = self.keys();
        write!(f, "{}", property)
    }
}

/// Glob-style name pattern (`*` = any substring).
///
/// Stored as the raw pattern; compiled to an anchored case-insensitive
/// regex for evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wildcard(String);

impl Wildcard {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compile to a regex matching the whole name, case-insensitively.
    pub fn compile(&self) -> Result<Regex, DomainError> {
        let mut re = String::with_capacity(self.0.len() + 8);
        re.push_str("(?i)^");
        for part in self.0.split('*') {
            if !part.is_empty() {
                re.push_str(&regex::escape(part));
            }
            re.push_str(".*");
        }
        // split() yields n+1 parts for n separators, so one ".*" too many
        re.truncate(re.len() - 2);
        re.push('$');
        Regex::new(&re).map_err(|_| DomainError::InvalidPattern(self.0.clone()))
    }
}

impl fmt::Display for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declarative, re-evaluable filter backing a leaf group.
///
/// Groups are lazy views: membership is recomputed against the current
/// tree whenever a filter is resolved, never frozen at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FilterSpec {
    /// Items anywhere in the model whose name matches the pattern,
    /// descendants-and-self.
    NameWildcard { pattern: Wildcard },

    /// Items within the base filter's membership (descendants-and-self)
    /// whose resolved attribute equals `value`.
    AttributeEquals {
        category: String,
        property: String,
        value: String,
        base: Box<FilterSpec>,
    },
}

impl FilterSpec {
    pub fn name_wildcard(pattern: impl Into<String>) -> Self {
        Self::NameWildcard {
            pattern: Wildcard::new(pattern),
        }
    }

    pub fn attribute_equals(
        selector: AttributeSelector,
        value: impl Into<String>,
        base: FilterSpec,
    ) -> Self {
        let (category, property) = selector.keys();
        Self::AttributeEquals {
            category: category.to_string(),
            property: property.to_string(),
            value: value.into(),
            base: Box::new(base),
        }
    }
}

/// The persisted unit: a named leaf group backed by a filter, or a named
/// folder of child groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GroupSpec {
    Leaf {
        name: String,
        filter: FilterSpec,
    },
    Folder {
        name: String,
        children: Vec<GroupSpec>,
    },
}

impl GroupSpec {
    /// Build a leaf group, validating the name.
    ///
    /// Names must be non-empty after trimming and free of control
    /// characters; the host set panel cannot display anything else.
    pub fn leaf(name: impl Into<String>, filter: FilterSpec) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidGroupName {
                name,
                reason: "empty after trimming".to_string(),
            });
        }
        if name.chars().any(|c| c.is_control()) {
            return Err(DomainError::InvalidGroupName {
                name,
                reason: "contains control characters".to_string(),
            });
        }
        Ok(Self::Leaf { name, filter })
    }

    pub fn folder(name: impl Into<String>, children: Vec<GroupSpec>) -> Self {
        Self::Folder {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Leaf { name, .. } | Self::Folder { name, .. } => name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder { .. })
    }

    /// Leaf children of a folder; empty for leaves.
    pub fn leaf_children(&self) -> Vec<&GroupSpec> {
        match self {
            Self::Folder { children, .. } => {
                children.iter().filter(|c| !c.is_folder()).collect()
            }
            Self::Leaf { .. } => Vec::new(),
        }
    }

    /// Total number of leaf groups in this subtree (explicit stack, the
    /// hierarchy depth is caller-controlled).
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(spec) = stack.pop() {
            match spec {
                Self::Leaf { .. } => count += 1,
                Self::Folder { children, .. } => stack.extend(children.iter()),
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_pattern_when_deriving_tag_then_delimiters_are_trimmed() {
        let tag = DisciplineTag::from_pattern("_ARCH_");
        assert_eq!(tag.as_str(), "ARCH");
        assert_eq!(tag.wildcard(), "*_ARCH_*");
    }

    #[test]
    fn given_selector_when_resolving_keys_then_mapping_is_total() {
        assert_eq!(AttributeSelector::Category.keys(), ("Element", "Category"));
        assert_eq!(
            AttributeSelector::SystemName.keys(),
            ("Element", "System Name")
        );
        assert_eq!(
            AttributeSelector::SystemClassification.keys(),
            ("Element", "System Classification")
        );
        assert_eq!(AttributeSelector::Workset.keys(), ("Element", "Workset"));
        assert_eq!(AttributeSelector::FamilyType.keys(), ("Element", "Type"));
    }

    #[test]
    fn given_wildcard_when_compiled_then_matches_case_insensitively() {
        let re = Wildcard::new("*_ARCH_*").compile().unwrap();
        assert!(re.is_match("L01_ARCH_Model"));
        assert!(re.is_match("l01_arch_model"));
        assert!(!re.is_match("L01_STRC_Model"));
    }

    #[test]
    fn given_wildcard_with_regex_metachars_when_compiled_then_escaped() {
        let re = Wildcard::new("*Duct (Main)*").compile().unwrap();
        assert!(re.is_match("MEP Duct (Main) Level 1"));
        assert!(!re.is_match("MEP Duct Main Level 1"));
    }

    #[test]
    fn given_exact_wildcard_when_compiled_then_anchored() {
        let re = Wildcard::new("ARCH").compile().unwrap();
        assert!(re.is_match("ARCH"));
        assert!(re.is_match("arch"));
        assert!(!re.is_match("L01_ARCH_Model"));
    }

    #[test]
    fn given_empty_name_when_building_leaf_then_errors() {
        let result = GroupSpec::leaf("   ", FilterSpec::name_wildcard("*"));
        assert!(matches!(
            result,
            Err(DomainError::InvalidGroupName { .. })
        ));
    }

    #[test]
    fn given_control_chars_when_building_leaf_then_errors() {
        let result = GroupSpec::leaf("Duct\u{0007}", FilterSpec::name_wildcard("*"));
        assert!(matches!(
            result,
            Err(DomainError::InvalidGroupName { .. })
        ));
    }

    #[test]
    fn given_nested_folders_when_counting_leaves_then_all_levels_counted() {
        let leaf = |n: &str| GroupSpec::leaf(n, FilterSpec::name_wildcard("*")).unwrap();
        let folder = GroupSpec::folder(
            "top",
            vec![
                GroupSpec::folder("mid", vec![leaf("a"), leaf("b")]),
                leaf("c"),
            ],
        );
        assert_eq!(folder.leaf_count(), 3);
        assert_eq!(folder.leaf_children().len(), 1);
    }
}
