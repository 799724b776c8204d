//! Tag helper completion candidates
//! Provides element and attribute candidates that can be used by the LSP server
//!
//! Candidates carry only a [`CandidateDescription`]; the tooltip itself is
//! built on resolution.

use std::collections::BTreeMap;

use crate::description::{AttributeDescriptionInfo, ElementDescriptionInfo};
use crate::resolution::CandidateDescription;
use crate::signatures::reduce;
use crate::store::DescriptorStore;

/// A completion candidate with its deferred description
#[derive(Clone, Debug)]
pub struct CompletionEntry {
    pub label: String,
    pub kind: CompletionKind,
    pub detail: String,
    pub description: CandidateDescription,
}

/// The kind of completion candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Element,
    Attribute,
}

/// One candidate per element name that some tag helper targets.
///
/// Elements reference their tag helpers by type name only, so documentation
/// is fetched from the store when the candidate is resolved.
pub fn element_completions(store: &DescriptorStore) -> Vec<CompletionEntry> {
    store
        .tag_names()
        .into_iter()
        .filter_map(|tag_name| {
            let descriptors = store.descriptors_for_tag(&tag_name);
            if descriptors.is_empty() {
                return None;
            }

            let detail = descriptors
                .iter()
                .map(|d| reduce(&d.type_name))
                .collect::<Vec<_>>()
                .join(", ");
            let entries = descriptors
                .iter()
                .map(|d| ElementDescriptionInfo::by_type_name(d.type_name.clone()))
                .collect();

            Some(CompletionEntry {
                label: tag_name,
                kind: CompletionKind::Element,
                detail,
                description: CandidateDescription::Element(entries),
            })
        })
        .collect()
}

/// One candidate per attribute bound on `tag_name`, merging tag helpers that
/// bind the same attribute name.
pub fn attribute_completions(store: &DescriptorStore, tag_name: &str) -> Vec<CompletionEntry> {
    let mut by_name: BTreeMap<String, Vec<AttributeDescriptionInfo>> = BTreeMap::new();

    for descriptor in store.descriptors_for_tag(tag_name) {
        for attribute in &descriptor.bound_attributes {
            by_name
                .entry(attribute.name.clone())
                .or_default()
                .push(AttributeDescriptionInfo::from(attribute));
        }
    }

    by_name
        .into_iter()
        .map(|(name, entries)| {
            let detail = entries
                .first()
                .map(|e| e.return_type_display().to_string())
                .unwrap_or_default();

            CompletionEntry {
                label: name,
                kind: CompletionKind::Attribute,
                detail,
                description: CandidateDescription::Attribute(entries),
            }
        })
        .collect()
}
