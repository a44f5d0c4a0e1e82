use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Release request to {url} returned {status}")]
    Status { url: String, status: StatusCode },

    #[error("Failed to parse release metadata from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Couldn't find a release tarball containing binaries for {version}")]
    NoMatchingAsset { version: String },

    #[error("The release tarball for {version} has no download URL")]
    MissingDownloadUrl { version: String },
}

impl ResolveError {
    /// The metadata URL the failing request was sent to, if one was made.
    pub fn url(&self) -> Option<&str> {
        match self {
            ResolveError::Transport { url, .. }
            | ResolveError::Status { url, .. }
            | ResolveError::Parse { url, .. } => Some(url),
            ResolveError::Client(_)
            | ResolveError::NoMatchingAsset { .. }
            | ResolveError::MissingDownloadUrl { .. } => None,
        }
    }
}
