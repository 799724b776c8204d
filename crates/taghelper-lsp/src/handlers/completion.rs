use taghelper_lsp_core::{
    attribute_completions, element_completions, CompletionEntry, CompletionKind,
    DescriptionResolver, DescriptorStore,
};
use tower_lsp::lsp_types::*;

use crate::document::{is_tag_name_char, Document};

/// Convert a core completion entry to an LSP completion item.
///
/// Documentation is left empty; it is filled in by [`resolve_completion`].
fn convert_to_lsp_completion(entry: &CompletionEntry) -> CompletionItem {
    let kind = match entry.kind {
        CompletionKind::Element => CompletionItemKind::CLASS,
        CompletionKind::Attribute => CompletionItemKind::PROPERTY,
    };

    CompletionItem {
        label: entry.label.clone(),
        kind: Some(kind),
        detail: Some(entry.detail.clone()),
        data: entry.description.to_data(),
        ..Default::default()
    }
}

/// Get completion items for a position in the document
pub fn get_completions(
    doc: &Document,
    position: Position,
    store: &DescriptorStore,
) -> Vec<CompletionItem> {
    let entries = match analyze_completion_context(doc, position) {
        CompletionContext::TagName => element_completions(store),
        CompletionContext::Attribute { tag_name } => attribute_completions(store, &tag_name),
        CompletionContext::None => Vec::new(),
    };

    entries.iter().map(convert_to_lsp_completion).collect()
}

/// Attach the Markdown tooltip described by the item's data.
///
/// The tooltip is recomputed from `data` on every call; items without a tag
/// helper payload are returned unchanged.
pub fn resolve_completion(mut item: CompletionItem, resolver: &DescriptionResolver) -> CompletionItem {
    if let Some(value) = resolver.resolve_data(item.data.as_ref()) {
        item.documentation = Some(Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }));
    }
    item
}

/// Context for completion
#[derive(Debug, PartialEq)]
enum CompletionContext {
    /// Typing an element name after `<`
    TagName,
    /// Inside the start tag of `tag_name`, between attributes
    Attribute { tag_name: String },
    None,
}

/// Analyze the text before the cursor on the current line
fn analyze_completion_context(doc: &Document, position: Position) -> CompletionContext {
    let Some(before_cursor) = doc.line_prefix(position.line, position.character) else {
        return CompletionContext::None;
    };

    let Some(open) = before_cursor.rfind('<') else {
        return CompletionContext::None;
    };

    let in_tag = &before_cursor[open + 1..];

    // Closed tags, end tags and comments
    if in_tag.contains('>') || in_tag.starts_with('/') || in_tag.starts_with('!') {
        return CompletionContext::None;
    }

    // Inside a quoted attribute value
    if in_tag.matches('"').count() % 2 == 1 || in_tag.matches('\'').count() % 2 == 1 {
        return CompletionContext::None;
    }

    let tag_name: String = in_tag.chars().take_while(|c| is_tag_name_char(*c)).collect();
    if tag_name.len() == in_tag.len() {
        return CompletionContext::TagName;
    }

    if tag_name.is_empty() {
        return CompletionContext::None;
    }

    CompletionContext::Attribute { tag_name }
}
