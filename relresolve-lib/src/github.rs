use crate::config::Config;
use crate::error::ResolveError;
use crate::logging::spinner_style;
use crate::release_source::ReleaseSource;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// Content type GitHub reports for `.tar.gz` release assets.
pub const TARBALL_CONTENT_TYPE: &str = "application/gzip";

/// Matches the GitHub API JSON response for a single release.
/// Fields other than these are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub tag_name: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// Matches the GitHub API JSON response for a single release asset
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Asset {
    pub name: Option<String>,
    pub content_type: Option<String>,
    pub browser_download_url: Option<String>,
}

impl ReleaseInfo {
    /// First asset, in listing order, whose content type is exactly [TARBALL_CONTENT_TYPE].
    pub fn find_tarball_asset(&self) -> Option<&Asset> {
        self.assets
            .iter()
            .find(|asset| asset.content_type.as_deref() == Some(TARBALL_CONTENT_TYPE))
    }
}

/// Parses a release metadata body fetched from `url`.
pub fn parse_release(url: &str, body: &str) -> Result<ReleaseInfo, ResolveError> {
    serde_json::from_str(body).map_err(|source| ResolveError::Parse {
        url: url.to_string(),
        source,
    })
}

#[derive(Debug, Clone)]
pub struct HttpReleaseSource {
    client: Client,
}

impl HttpReleaseSource {
    pub fn new(user_agent: &str) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(ResolveError::Client)?;
        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> Result<Self, ResolveError> {
        Self::new(&config.user_agent)
    }
}

impl ReleaseSource for HttpReleaseSource {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch_release(&self, url: &str) -> Result<ReleaseInfo, ResolveError> {
        let current_span = tracing::Span::current();
        if let Ok(style) = spinner_style("{msg}") {
            current_span.pb_set_style(&style);
        }
        current_span.pb_set_message("Fetching release metadata...");
        current_span.pb_set_finish_message("Fetching release metadata... Done");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ResolveError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ResolveError::Transport {
                url: url.to_string(),
                source,
            })?;
        tracing::debug!("Received {} bytes of release metadata", body.len());

        parse_release(url, &body)
    }
}
