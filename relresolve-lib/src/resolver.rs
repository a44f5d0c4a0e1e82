use crate::config::DEFAULT_USER_AGENT;
use crate::error::ResolveError;
use crate::github::HttpReleaseSource;
use crate::release_source::ReleaseSource;
use futures_util::future::try_join_all;
use std::fmt;
use tracing::instrument;

/// Requested version that selects the most recent release.
pub const LATEST: &str = "latest";

/// Which release a requested version refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReleaseSelector {
    Latest,
    Tag(String),
}

impl ReleaseSelector {
    /// Only the exact string `latest` is special; everything else is a tag, used verbatim.
    pub fn parse(version: &str) -> Self {
        if version == LATEST {
            ReleaseSelector::Latest
        } else {
            ReleaseSelector::Tag(version.to_string())
        }
    }

    pub fn metadata_url(&self, endpoint: &str) -> String {
        match self {
            ReleaseSelector::Latest => format!("{endpoint}/latest"),
            ReleaseSelector::Tag(tag) => format!("{endpoint}/tags/{tag}"),
        }
    }
}

impl From<&str> for ReleaseSelector {
    fn from(version: &str) -> Self {
        Self::parse(version)
    }
}

impl fmt::Display for ReleaseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseSelector::Latest => write!(f, "{LATEST}"),
            ReleaseSelector::Tag(tag) => write!(f, "{tag}"),
        }
    }
}

/// URL of the metadata document describing `version` under `endpoint`.
pub fn metadata_url(endpoint: &str, version: &str) -> String {
    ReleaseSelector::parse(version).metadata_url(endpoint)
}

/// Maps a requested version to the download URL of its gzip tarball.
///
/// Holds no state besides the source, so a single resolver can serve any
/// number of concurrent lookups.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    source: S,
}

impl<S: ReleaseSource> Resolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches the release metadata for `version` and returns the
    /// `browser_download_url` of its first `application/gzip` asset, unchanged.
    #[instrument(skip(self))]
    pub async fn resolve(&self, endpoint: &str, version: &str) -> Result<String, ResolveError> {
        let url = metadata_url(endpoint, version);
        tracing::debug!("Fetching release metadata from {}", url);

        let release = self.source.fetch_release(&url).await?;

        let asset = release
            .find_tarball_asset()
            .ok_or_else(|| ResolveError::NoMatchingAsset {
                version: version.to_string(),
            })?;

        tracing::debug!(
            "Selected asset {} from release {}",
            asset.name.as_deref().unwrap_or("<unnamed>"),
            release.tag_name.as_deref().unwrap_or(version)
        );

        asset
            .browser_download_url
            .clone()
            .ok_or_else(|| ResolveError::MissingDownloadUrl {
                version: version.to_string(),
            })
    }

    /// Resolves every version concurrently, one request each.
    /// URLs come back in the order the versions were given; the first failure wins.
    pub async fn resolve_all<V: AsRef<str>>(
        &self,
        endpoint: &str,
        versions: &[V],
    ) -> Result<Vec<String>, ResolveError> {
        try_join_all(
            versions
                .iter()
                .map(|version| self.resolve(endpoint, version.as_ref())),
        )
        .await
    }
}

/// Resolves a single version with a default HTTP client.
pub async fn resolve_download_url(endpoint: &str, version: &str) -> Result<String, ResolveError> {
    let source = HttpReleaseSource::new(DEFAULT_USER_AGENT)?;
    Resolver::new(source).resolve(endpoint, version).await
}
