//! Server defaults.
//!
//! Runtime configuration is handled via CLI arguments and environment
//! variables in `main.rs`; these constants are their defaults.

/// Directory scanned for documents at startup.
pub const DEFAULT_LIBRARY_DIR: &str = "./library";

/// Default listen address.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:9090";

/// Default upper bound on results returned by `/search`.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Log directives added on top of `RUST_LOG`.
pub const DEFAULT_LOG_DIRECTIVES: &[&str] = &["moogle=info", "tower_http=info"];
