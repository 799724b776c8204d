use taghelper_lsp_core::{
    CandidateDescription, DescriptionResolver, DescriptorStore, ElementDescriptionInfo,
};
use tower_lsp::lsp_types::*;

use crate::document::Document;

/// Get hover information for a tag name in the document
pub fn get_hover(
    doc: &Document,
    position: Position,
    store: &DescriptorStore,
    resolver: &DescriptionResolver,
) -> Option<Hover> {
    let tag_name = doc.tag_name_at_position(position.line, position.character)?;

    let entries: Vec<ElementDescriptionInfo> = store
        .descriptors_for_tag(&tag_name)
        .iter()
        .map(ElementDescriptionInfo::from)
        .collect();

    let value = resolver.resolve(&CandidateDescription::Element(entries))?;

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: None,
    })
}
