use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the corpus and the library loader.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Ranking or vector access on a corpus without fitted TF-IDF matrices.
    /// Call `fit_transform` (or `transform`) after the last `add`.
    #[error("corpus is not fitted; call fit_transform before scoring")]
    NotFitted,

    /// A library path could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A library file is not UTF-8 text.
    #[error("{} is not valid UTF-8 text", .path.display())]
    InvalidUtf8 { path: PathBuf },
}
