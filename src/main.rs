//! Moogle HTTP server
//!
//! Loads every file of a library directory, fits a TF-IDF corpus over them
//! once, then answers search requests until interrupted.
//!
//! # Example
//!
//! ```bash
//! moogle --library ./library --listen 0.0.0.0:9090
//! curl 'http://localhost:9090/search?q=cat+sat'
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use moogle::server::{self, config};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Moogle search server
#[derive(Parser, Debug)]
#[command(name = "moogle")]
#[command(about = "TF-IDF document search over a directory of text files")]
struct Args {
    /// Directory whose files are indexed at startup
    #[arg(long, default_value = config::DEFAULT_LIBRARY_DIR, env = "MOOGLE_LIBRARY")]
    library: PathBuf,

    /// Listen address
    #[arg(long, default_value = config::DEFAULT_LISTEN, env = "MOOGLE_LISTEN")]
    listen: SocketAddr,

    /// Maximum number of results per search
    #[arg(long, default_value_t = config::DEFAULT_MAX_RESULTS, env = "MOOGLE_MAX_RESULTS")]
    max_results: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut filter = EnvFilter::from_default_env();
    for directive in config::DEFAULT_LOG_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    info!(library = %args.library.display(), listen = %args.listen, "Hello Moogle!");

    let library = args.library.clone();
    let corpus = tokio::task::spawn_blocking(move || server::load_corpus(library)).await??;
    let state = server::app_state(corpus, args.max_results);

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    info!(address = %args.listen, "Server listening");

    server::serve(listener, state, server::wait_for_signal()).await?;

    info!("Bye Bye Moogle!");
    Ok(())
}
