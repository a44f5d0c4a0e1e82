use anyhow::{Result, bail};

/// Environment variable consulted when no endpoint is given explicitly.
pub const ENDPOINT_ENV_VAR: &str = "RELRESOLVE_ENDPOINT";

pub const DEFAULT_USER_AGENT: &str = concat!("relresolve/", env!("CARGO_PKG_VERSION"));

const GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the releases collection, used verbatim when building metadata URLs
    pub endpoint: String,

    /// User-Agent sent with every request (GitHub rejects requests without one)
    pub user_agent: String,
}

impl Config {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Sets up a Config from command line input, falling back to [ENDPOINT_ENV_VAR].
    /// An explicit endpoint wins over a repository shorthand.
    pub fn setup(endpoint: Option<&str>, repo: Option<&str>) -> Result<Self> {
        let env_endpoint = std::env::var(ENDPOINT_ENV_VAR).ok();
        Self::from_sources(endpoint, repo, env_endpoint.as_deref())
    }

    fn from_sources(
        endpoint: Option<&str>,
        repo: Option<&str>,
        env_endpoint: Option<&str>,
    ) -> Result<Self> {
        if let Some(endpoint) = endpoint {
            return Ok(Self::new(endpoint));
        }

        if let Some(repo) = repo {
            return Ok(Self::new(&Self::github_endpoint(repo)?));
        }

        match env_endpoint.filter(|s| !s.is_empty()) {
            Some(endpoint) => Ok(Self::new(endpoint)),
            None => bail!(
                "No release endpoint configured. Pass --endpoint <URL>, --repo <OWNER/REPO>, or set {}.",
                ENDPOINT_ENV_VAR
            ),
        }
    }

    /// Releases endpoint of a GitHub repository given as `owner/repo`.
    pub fn github_endpoint(repo: &str) -> Result<String> {
        match repo.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(format!("{GITHUB_API_URL}/repos/{owner}/{name}/releases"))
            }
            _ => bail!("Invalid repository '{}', expected OWNER/REPO", repo),
        }
    }
}
