//! Markdown tooltips for tag helper completions
//!
//! A completion candidate can stand for several tag helpers at once (two
//! helpers targeting `<input>`, say), so a tooltip is a sequence of blocks:
//!
//! ```text
//! **InputTagHelper**
//!
//! Summary text with `CrefValues` in code.
//!
//! ---
//!
//! **OtherTagHelper**
//! ```

use serde::{Deserialize, Serialize};

use crate::crefs::{extract_summary, rewrite_cross_references};
use crate::error::{Error, Result};
use crate::signatures::{display_type_name, reduce};
use crate::store::{BoundAttributeDescriptor, TagHelperDescriptor};

const ENTRY_SEPARATOR: &str = "\n\n---\n\n";

/// One block of a tooltip
pub trait DescriptionEntry {
    /// Bold header line naming the described type or property
    fn header(&self) -> String;

    /// Raw doc-comment block, if any
    fn documentation(&self) -> Option<&str>;
}

/// Description data for an element (tag name) candidate
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptionInfo {
    pub tag_helper_type_name: String,
    #[serde(default)]
    pub documentation: Option<String>,
}

impl ElementDescriptionInfo {
    /// Reference by type name only; documentation is looked up on resolution
    pub fn by_type_name(type_name: impl Into<String>) -> Self {
        Self {
            tag_helper_type_name: type_name.into(),
            documentation: None,
        }
    }
}

impl From<&TagHelperDescriptor> for ElementDescriptionInfo {
    fn from(descriptor: &TagHelperDescriptor) -> Self {
        Self {
            tag_helper_type_name: descriptor.type_name.clone(),
            documentation: descriptor.documentation.clone(),
        }
    }
}

impl DescriptionEntry for ElementDescriptionInfo {
    fn header(&self) -> String {
        format!("**{}**", reduce(&self.tag_helper_type_name))
    }

    fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }
}

/// Description data for an attribute candidate
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptionInfo {
    pub return_type_name: String,
    /// `"<return type> <owner type>.<property>"`
    pub display_name: String,
    pub property_name: String,
    #[serde(default)]
    pub documentation: Option<String>,
}

impl AttributeDescriptionInfo {
    /// Reduced return type with built-in scalars shown by their alias
    pub fn return_type_display(&self) -> &str {
        reduce(display_type_name(&self.return_type_name))
    }

    /// Recover the owning tag helper's type name from the display name.
    ///
    /// The owner is not stored separately: it is whatever lies between the
    /// `"<return type> "` prefix and the `".<property>"` suffix, measured by
    /// length against the displayed return type.
    pub fn owner_type_name(&self) -> Result<&str> {
        let prefix = self.return_type_display().len() + 1;
        let suffix = self.property_name.len() + 1;

        self.display_name
            .len()
            .checked_sub(suffix)
            .filter(|&end| end >= prefix)
            .and_then(|end| self.display_name.get(prefix..end))
            .ok_or_else(|| Error::DisplayNameMismatch {
                display_name: self.display_name.clone(),
                return_type: self.return_type_display().to_string(),
                property: self.property_name.clone(),
            })
    }
}

impl From<&BoundAttributeDescriptor> for AttributeDescriptionInfo {
    fn from(attribute: &BoundAttributeDescriptor) -> Self {
        Self {
            return_type_name: attribute.type_name.clone(),
            display_name: attribute.display_name.clone(),
            property_name: attribute.property_name.clone(),
            documentation: attribute.documentation.clone(),
        }
    }
}

impl DescriptionEntry for AttributeDescriptionInfo {
    fn header(&self) -> String {
        let return_type = self.return_type_display();

        match self.owner_type_name() {
            Ok(owner) => {
                if !self.display_name.starts_with(return_type) {
                    tracing::debug!(
                        display_name = %self.display_name,
                        return_type,
                        "display name does not start with displayed return type"
                    );
                }
                format!(
                    "**{}** {}.**{}**",
                    return_type,
                    reduce(owner),
                    self.property_name
                )
            }
            Err(err) => {
                tracing::warn!("{}", err);
                format!("**{}** **{}**", return_type, self.property_name)
            }
        }
    }

    fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }
}

/// Compose the Markdown tooltip for `entries`.
///
/// Returns `None` when there is nothing to describe.
pub fn synthesize<E: DescriptionEntry>(entries: &[E]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }

    let blocks: Vec<String> = entries.iter().map(describe_entry).collect();
    Some(blocks.join(ENTRY_SEPARATOR))
}

fn describe_entry<E: DescriptionEntry>(entry: &E) -> String {
    let mut block = entry.header();

    if let Some(summary) = extract_summary(entry.documentation()) {
        let prose = rewrite_cross_references(summary);
        let prose = prose.trim_matches('\n');
        if !prose.is_empty() {
            block.push_str("\n\n");
            block.push_str(prose);
        }
    }

    block
}
