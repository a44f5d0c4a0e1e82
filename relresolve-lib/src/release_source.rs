use crate::error::ResolveError;
use crate::github::ReleaseInfo;

pub trait ReleaseSource: Send + Sync {
    /// Fetches the release metadata document at `url` and parses it.
    /// Implementations issue at most one request per call and never retry.
    fn fetch_release(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<ReleaseInfo, ResolveError>> + Send;
}
