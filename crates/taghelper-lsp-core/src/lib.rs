//! Core tooltip engine for tag helper completions
//!
//! This crate turns compiler metadata about tag helpers (fully qualified
//! signatures and XML doc comments) into the short Markdown shown in an
//! editor's completion tooltip. It is shared by the LSP server and its tests.
//!
//! # Features
//!
//! - **Signatures**: reduce `Ns.Outer<Ns.Arg>.Member` style signatures to the displayed name
//! - **Cross-references**: extract `<summary>` text and rewrite `<see cref="..."/>` markers
//! - **Descriptions**: compose element and attribute tooltips
//! - **Resolution**: the payload attached to candidates and its lazy resolution
//! - **Store**: the descriptor cache consulted while resolving
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use taghelper_lsp_core::{
//!     CandidateDescription, DescriptionResolver, DescriptorStore, ElementDescriptionInfo,
//! };
//!
//! let resolver = DescriptionResolver::new(Arc::new(DescriptorStore::new()));
//! let description = CandidateDescription::Element(vec![ElementDescriptionInfo {
//!     tag_helper_type_name: "Microsoft.AspNetCore.Mvc.TagHelpers.AnchorTagHelper".to_string(),
//!     documentation: Some("<summary>Targets <see cref=\"T:System.Uri\"/>.</summary>".to_string()),
//! }]);
//!
//! assert_eq!(
//!     resolver.resolve(&description).as_deref(),
//!     Some("**AnchorTagHelper**\n\nTargets `Uri`.")
//! );
//! ```

pub mod completion;
pub mod crefs;
pub mod description;
pub mod error;
pub mod resolution;
pub mod signatures;
pub mod store;

// Re-export main types for convenience
pub use completion::{attribute_completions, element_completions, CompletionEntry, CompletionKind};
pub use crefs::{extract_summary, rewrite_cross_references};
pub use description::{
    synthesize, AttributeDescriptionInfo, DescriptionEntry, ElementDescriptionInfo,
};
pub use error::{Error, Result};
pub use resolution::{
    CandidateDescription, DescriptionResolver, DescriptionResolverBuilder, ATTRIBUTE_DATA_KEY,
    ELEMENT_DATA_KEY,
};
pub use signatures::{display_type_name, reduce, reduce_from, reduce_member};
pub use store::{
    BoundAttributeDescriptor, DescriptorLookup, DescriptorStore, ProjectChange, ProjectRemoved,
    TagHelperDescriptor,
};
