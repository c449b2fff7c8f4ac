//! HTTP serving layer around a fitted [`Corpus`].
//!
//! # Endpoints
//!
//! - `GET /ls` - document names in corpus order
//! - `GET /search?q=<text>[&limit=N]` - ranked documents with similarities
//! - `GET /content?name=<doc>` - original text of one document
//! - `GET /vector` - every `(word, document, score)` TF-IDF entry
//! - `GET /health` - health check

pub mod config;
pub mod errors;
pub mod handlers;
pub mod loader;

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use indexmap::IndexMap;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::error::Result;
use crate::{Corpus, Document};
use handlers::AppState;

/// Build the route table.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ls", get(handlers::list_documents))
        .route("/search", get(handlers::search))
        .route("/content", get(handlers::content))
        .route("/vector", get(handlers::vector))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Turn `name -> text` pairs into a fitted corpus.
pub fn build_corpus(library: IndexMap<String, String>) -> Corpus {
    let mut corpus = Corpus::new();
    let docs: Vec<Document> = library
        .into_iter()
        .map(|(name, text)| Document::new(name, text))
        .collect();
    corpus.fit_transform(docs);
    corpus
}

/// Load `dir` and fit a corpus over it.
pub fn load_corpus(dir: impl AsRef<Path>) -> Result<Corpus> {
    let dir = dir.as_ref();
    let library = loader::load_library(dir)?;
    tracing::info!(library = %dir.display(), documents = library.len(), "Loading documents index...");
    let corpus = build_corpus(library);
    tracing::info!(
        documents = corpus.len(),
        vocabulary = corpus.vocabulary().len(),
        "Documents index ready"
    );
    Ok(corpus)
}

/// Serve `state` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}

/// Resolve on SIGINT or SIGTERM.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}

/// Fitted corpus shared with the handlers.
pub fn app_state(corpus: Corpus, max_results: usize) -> AppState {
    AppState {
        corpus: Arc::new(corpus),
        max_results,
    }
}
