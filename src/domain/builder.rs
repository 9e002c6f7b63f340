//! Pure construction of group hierarchies.
//!
//! Builds [`GroupSpec`] trees from classification and discovery results.
//! No I/O here: persistence and membership resolution happen behind the
//! infrastructure traits.

use std::collections::BTreeSet;

use crate::domain::entities::{
    AttributeSelector, DisciplineTag, FilterSpec, GroupSpec, DISCIPLINES_FOLDER,
};
use crate::domain::error::DomainError;

/// Build the flat "1. DISCIPLINES" folder: one wildcard-filtered leaf per
/// tag, in lexical order.
///
/// Tags are never empty and carry no control characters, so leaf
/// construction cannot fail here.
pub fn discipline_folder(tags: &BTreeSet<DisciplineTag>) -> GroupSpec {
    let children = tags
        .iter()
        .filter_map(|tag| {
            GroupSpec::leaf(tag.as_str(), FilterSpec::name_wildcard(tag.wildcard())).ok()
        })
        .collect();
    GroupSpec::folder(DISCIPLINES_FOLDER, children)
}

/// Build one clash-set leaf: named by the discovered value, filtered to
/// items within the discipline's membership whose attribute equals it.
///
/// Fails with [`DomainError::InvalidGroupName`] for values that cannot be
/// persisted as group names; callers skip such values.
pub fn attribute_leaf(
    value: &str,
    selector: AttributeSelector,
    base: &FilterSpec,
) -> Result<GroupSpec, DomainError> {
    GroupSpec::leaf(
        value,
        FilterSpec::attribute_equals(selector, value, base.clone()),
    )
}
