use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::{Context, Result};
use clap::Args;
use futures_util::future::try_join_all;
use relresolve_lib::ResolveError;
use relresolve_lib::config::Config;
use relresolve_lib::github::{HttpReleaseSource, TARBALL_CONTENT_TYPE};
use relresolve_lib::resolver::{LATEST, Resolver};
use std::io::Write;

#[derive(Args)]
pub struct ResolveCommand {
    /// Release tags to resolve, or `latest` for the most recent release
    #[arg(default_value = LATEST)]
    pub versions: Vec<String>,

    /// Releases endpoint, used as-is (e.g. https://api.github.com/repos/OWNER/REPO/releases)
    #[arg(long, conflicts_with = "repo")]
    pub endpoint: Option<String>,

    /// GitHub repository as OWNER/REPO, expanded to its releases endpoint
    #[arg(long)]
    pub repo: Option<String>,
}

impl ResolveCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = Config::setup(self.endpoint.as_deref(), self.repo.as_deref())?;
        self.write_urls(&config, global_args.verbose, &mut std::io::stdout())
            .await
    }

    /// Resolves every requested version and writes one URL per line, in request order.
    /// Nothing is written unless every version resolves.
    async fn write_urls<W: Write>(&self, config: &Config, verbose: bool, out: &mut W) -> Result<()> {
        let resolver = Resolver::new(HttpReleaseSource::from_config(config)?);
        let endpoint = config.endpoint.as_str();

        if verbose {
            ui::info(&format!("Using release endpoint {endpoint}"));
        }

        let lookups = self.versions.iter().map(|version| {
            let resolver = &resolver;
            async move {
                resolver
                    .resolve(endpoint, version)
                    .await
                    .with_context(|| {
                        format!("Failed to resolve a download URL for {version} from {endpoint}")
                    })
            }
        });

        let urls = match try_join_all(lookups).await {
            Ok(urls) => urls,
            Err(err) => {
                if matches!(
                    err.downcast_ref::<ResolveError>(),
                    Some(ResolveError::NoMatchingAsset { .. })
                ) {
                    ui::tip(&format!(
                        "Only assets uploaded with content type {TARBALL_CONTENT_TYPE} are considered."
                    ));
                }
                return Err(err);
            }
        };

        for (version, url) in self.versions.iter().zip(&urls) {
            tracing::debug!("{} -> {}", version, url);
            writeln!(out, "{url}")?;
        }

        if verbose {
            ui::success(&format!("Resolved {} release(s)", urls.len()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn command(versions: &[&str]) -> ResolveCommand {
        ResolveCommand {
            versions: versions.iter().map(|v| v.to_string()).collect(),
            endpoint: None,
            repo: None,
        }
    }

    #[tokio::test]
    async fn test_writes_one_url_per_line_in_request_order() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/releases/latest")
            .with_status(200)
            .with_body(
                r#"{"assets":[{"content_type":"application/gzip","browser_download_url":"https://x/v2.0.0.tar.gz"}]}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/releases/tags/v1.2.0")
            .with_status(200)
            .with_body(
                r#"{"assets":[{"content_type":"text/plain","browser_download_url":"https://x/readme.txt"},{"content_type":"application/gzip","browser_download_url":"https://x/v1.2.0.tar.gz"}]}"#,
            )
            .create_async()
            .await;

        let config = Config::new(&format!("{}/releases", server.url()));
        let mut out = Vec::new();
        command(&["v1.2.0", "latest"])
            .write_urls(&config, false, &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "https://x/v1.2.0.tar.gz\nhttps://x/v2.0.0.tar.gz\n"
        );
    }

    #[tokio::test]
    async fn test_failure_names_the_failing_version() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/releases/tags/v1.2.0")
            .with_status(200)
            .with_body(
                r#"{"assets":[{"content_type":"application/gzip","browser_download_url":"https://x/v1.2.0.tar.gz"}]}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/releases/tags/v9.9.9")
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let config = Config::new(&format!("{}/releases", server.url()));
        let mut out = Vec::new();
        let err = command(&["v1.2.0", "v9.9.9"])
            .write_urls(&config, false, &mut out)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("v9.9.9"), "got: {err}");
        assert!(matches!(
            err.downcast_ref::<ResolveError>(),
            Some(ResolveError::Status { .. })
        ));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_release_without_tarball_is_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/releases/latest")
            .with_status(200)
            .with_body(r#"{"assets":[]}"#)
            .create_async()
            .await;

        let config = Config::new(&format!("{}/releases", server.url()));
        let mut out = Vec::new();
        let err = command(&["latest"])
            .write_urls(&config, false, &mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ResolveError>(),
            Some(ResolveError::NoMatchingAsset { .. })
        ));
        assert!(format!("{err:#}").contains("latest"));
    }
}
