use std::sync::Arc;

use dashmap::DashMap;
use taghelper_lsp_core::{DescriptionResolver, DescriptorStore, ProjectChange, ProjectRemoved};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::capabilities;
use crate::config::InitializationOptions;
use crate::document::Document;
use crate::handlers;

/// Custom notification carrying a project's refreshed descriptors
pub const PROJECT_CHANGED_METHOD: &str = "taghelper/projectChanged";
/// Custom notification sent when a project is unloaded
pub const PROJECT_REMOVED_METHOD: &str = "taghelper/projectRemoved";

pub struct Backend {
    client: Client,
    documents: DashMap<Url, Document>,
    store: Arc<DescriptorStore>,
    resolver: DescriptionResolver,
    debug: bool,
}

impl Backend {
    pub fn new(
        client: Client,
        store: Arc<DescriptorStore>,
        resolver: DescriptionResolver,
        debug: bool,
    ) -> Self {
        Self {
            client,
            documents: DashMap::new(),
            store,
            resolver,
            debug,
        }
    }

    async fn log_debug(&self, message: &str) {
        tracing::debug!("{}", message);
        if self.debug {
            self.client
                .log_message(MessageType::INFO, format!("[DEBUG] {}", message))
                .await;
        }
    }

    /// Handle `taghelper/projectChanged`
    pub async fn project_changed(&self, params: ProjectChange) {
        let project = params.project.clone();
        let count = self.store.apply(params);
        self.log_debug(&format!(
            "Project {} now provides {} tag helpers",
            project, count
        ))
        .await;
    }

    /// Handle `taghelper/projectRemoved`
    pub async fn project_removed(&self, params: ProjectRemoved) {
        let count = self.store.remove_project(&params.project);
        self.log_debug(&format!(
            "Project {} removed, dropping {} tag helpers",
            params.project, count
        ))
        .await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        self.log_debug("Initializing tag helper LSP server").await;

        let options = InitializationOptions::from_value(params.initialization_options);
        for path in &options.descriptor_files {
            match self.store.load_file(path) {
                Ok(count) => {
                    self.log_debug(&format!(
                        "Loaded {} tag helpers from {}",
                        count,
                        path.display()
                    ))
                    .await
                }
                Err(err) => {
                    tracing::warn!("{}", err);
                    self.client
                        .log_message(MessageType::WARNING, err.to_string())
                        .await;
                }
            }
        }

        Ok(InitializeResult {
            capabilities: capabilities::server_capabilities(),
            server_info: Some(ServerInfo {
                name: "taghelper-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        tracing::info!(descriptors = self.store.len(), "server initialized");
        self.client
            .log_message(MessageType::INFO, "Tag helper LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.log_debug("Shutting down server").await;
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        self.log_debug(&format!("Document opened: {}", uri)).await;
        self.documents
            .insert(uri, Document::new(params.text_document.text));
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        self.log_debug(&format!("Document changed: {}", uri)).await;

        if let Some(mut doc) = self.documents.get_mut(&uri) {
            // Apply changes (for full sync, we just replace the entire text)
            for change in params.content_changes {
                doc.update_text(change.text);
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.log_debug(&format!("Document closed: {}", uri)).await;
        self.documents.remove(&uri);
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        self.log_debug(&format!("Hover request at {:?}", position))
            .await;

        if let Some(doc) = self.documents.get(uri) {
            Ok(handlers::hover::get_hover(
                &doc,
                position,
                &self.store,
                &self.resolver,
            ))
        } else {
            Ok(None)
        }
    }

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        self.log_debug(&format!("Completion request at {:?}", position))
            .await;

        if let Some(doc) = self.documents.get(uri) {
            let items = handlers::completion::get_completions(&doc, position, &self.store);
            Ok(Some(CompletionResponse::Array(items)))
        } else {
            Ok(None)
        }
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        self.log_debug(&format!("Resolving completion: {}", item.label))
            .await;

        Ok(handlers::completion::resolve_completion(
            item,
            &self.resolver,
        ))
    }
}
