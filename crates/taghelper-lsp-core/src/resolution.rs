//! Lazy tooltip resolution
//!
//! Completion runs in two phases. Generating the candidate list is cheap and
//! only attaches a [`CandidateDescription`] to each item. The Markdown
//! tooltip is built later, when the editor asks to resolve the highlighted
//! item. Resolution reads nothing but the attached description and the
//! descriptor lookup, so repeated or speculative requests always produce the
//! same text.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::description::{synthesize, AttributeDescriptionInfo, ElementDescriptionInfo};
use crate::error::{Error, Result};
use crate::store::DescriptorLookup;

/// Reserved `data` key for element candidates
pub const ELEMENT_DATA_KEY: &str = "_TagHelperElementData_";
/// Reserved `data` key for attribute candidates
pub const ATTRIBUTE_DATA_KEY: &str = "_TagHelperAttributeData_";

/// Description payload attached to a completion candidate.
///
/// On the wire this is a JSON object holding a reserved key that names the
/// variant; candidates without one are [`CandidateDescription::Untyped`].
/// Other keys in the same object are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateDescription {
    /// Not a tag helper candidate
    #[default]
    #[serde(skip)]
    Untyped,
    #[serde(rename = "_TagHelperElementData_")]
    Element(Vec<ElementDescriptionInfo>),
    #[serde(rename = "_TagHelperAttributeData_")]
    Attribute(Vec<AttributeDescriptionInfo>),
}

impl CandidateDescription {
    /// Decode the payload carried in a completion item's `data` field
    pub fn classify(data: Option<&Value>) -> Self {
        let Some(data) = data else {
            return Self::Untyped;
        };

        let decoded = if let Some(entries) = data.get(ELEMENT_DATA_KEY) {
            Vec::deserialize(entries).map(Self::Element)
        } else if let Some(entries) = data.get(ATTRIBUTE_DATA_KEY) {
            Vec::deserialize(entries).map(Self::Attribute)
        } else {
            return Self::Untyped;
        };

        match decoded {
            Ok(description) => description,
            Err(err) => {
                tracing::debug!("malformed tag helper payload: {}", err);
                Self::Untyped
            }
        }
    }

    /// Encode for a completion item's `data` field
    pub fn to_data(&self) -> Option<Value> {
        if matches!(self, Self::Untyped) {
            return None;
        }

        match serde_json::to_value(self) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("failed to encode completion data: {}", err);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Untyped => true,
            Self::Element(entries) => entries.is_empty(),
            Self::Attribute(entries) => entries.is_empty(),
        }
    }
}

/// Turns candidate descriptions into Markdown tooltips
#[derive(Clone)]
pub struct DescriptionResolver {
    lookup: Arc<dyn DescriptorLookup>,
}

/// Assembles a [`DescriptionResolver`], rejecting a missing lookup up front
#[derive(Default)]
pub struct DescriptionResolverBuilder {
    lookup: Option<Arc<dyn DescriptorLookup>>,
}

impl DescriptionResolverBuilder {
    pub fn lookup(mut self, lookup: Arc<dyn DescriptorLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn build(self) -> Result<DescriptionResolver> {
        let lookup = self.lookup.ok_or(Error::MissingLookup)?;
        Ok(DescriptionResolver { lookup })
    }
}

impl DescriptionResolver {
    pub fn builder() -> DescriptionResolverBuilder {
        DescriptionResolverBuilder::default()
    }

    pub fn new(lookup: Arc<dyn DescriptorLookup>) -> Self {
        Self { lookup }
    }

    /// Build the tooltip for `description`, or `None` if there is nothing to show
    pub fn resolve(&self, description: &CandidateDescription) -> Option<String> {
        if description.is_empty() {
            return None;
        }

        match description {
            CandidateDescription::Untyped => None,
            CandidateDescription::Element(entries) => {
                let entries: Vec<ElementDescriptionInfo> =
                    entries.iter().map(|entry| self.with_documentation(entry)).collect();
                synthesize(&entries)
            }
            CandidateDescription::Attribute(entries) => synthesize(entries),
        }
    }

    /// Classify raw completion data and resolve it
    pub fn resolve_data(&self, data: Option<&Value>) -> Option<String> {
        self.resolve(&CandidateDescription::classify(data))
    }

    /// Fill in documentation for entries that only carry a type name
    fn with_documentation(&self, entry: &ElementDescriptionInfo) -> ElementDescriptionInfo {
        if entry.documentation.is_some() {
            return entry.clone();
        }

        match self.lookup.lookup(&entry.tag_helper_type_name) {
            Some(descriptor) => ElementDescriptionInfo::from(&descriptor),
            None => {
                tracing::debug!(
                    type_name = %entry.tag_helper_type_name,
                    "no descriptor cached for tag helper"
                );
                entry.clone()
            }
        }
    }
}
