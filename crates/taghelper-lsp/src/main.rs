use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use taghelper_lsp_core::{DescriptionResolver, DescriptorStore};
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

mod capabilities;
mod config;
mod document;
mod handlers;
mod server;

#[derive(Parser)]
#[command(name = "taghelper-lsp")]
#[command(about = "Language Server for tag helper completions")]
struct Cli {
    /// Use stdio for communication (required)
    #[arg(long)]
    stdio: bool,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// Tag helper descriptor JSON file to load at startup (repeatable)
    #[arg(long = "descriptors", value_name = "FILE")]
    descriptors: Vec<PathBuf>,
}

/// Log to stderr; stdout carries the protocol.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    init_tracing(args.debug);

    if !args.stdio {
        eprintln!("Error: --stdio flag is required");
        std::process::exit(1);
    }

    let store = Arc::new(DescriptorStore::new());
    for path in &args.descriptors {
        match store.load_file(path) {
            Ok(count) => tracing::info!(path = %path.display(), count, "loaded descriptors"),
            Err(err) => tracing::error!("{}", err),
        }
    }

    let resolver = match DescriptionResolver::builder().lookup(store.clone()).build() {
        Ok(resolver) => resolver,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) =
        LspService::build(|client| server::Backend::new(client, store, resolver, args.debug))
            .custom_method(
                server::PROJECT_CHANGED_METHOD,
                server::Backend::project_changed,
            )
            .custom_method(
                server::PROJECT_REMOVED_METHOD,
                server::Backend::project_removed,
            )
            .finish();

    Server::new(stdin, stdout, socket).serve(service).await;
}
