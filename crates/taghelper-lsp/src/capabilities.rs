use tower_lsp::lsp_types::*;

/// Define the server capabilities for the tag helper LSP
pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        // Full text sync - completion context only needs the current line
        text_document_sync: Some(TextDocumentSyncCapability::Kind(
            TextDocumentSyncKind::FULL,
        )),

        // Hover on tag names shows the element tooltip
        hover_provider: Some(HoverProviderCapability::Simple(true)),

        // Tooltips are built in completionItem/resolve
        completion_provider: Some(CompletionOptions {
            resolve_provider: Some(true),
            trigger_characters: Some(vec!["<".to_string(), " ".to_string()]),
            ..Default::default()
        }),

        ..Default::default()
    }
}
