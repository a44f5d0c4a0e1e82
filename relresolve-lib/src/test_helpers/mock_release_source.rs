use crate::error::ResolveError;
use crate::github::{ReleaseInfo, parse_release};
use crate::release_source::ReleaseSource;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned metadata bodies keyed by URL and records every request.
/// Unknown URLs answer with a 404 status error.
#[derive(Debug, Default)]
pub struct MockReleaseSource {
    bodies: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl MockReleaseSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl ReleaseSource for MockReleaseSource {
    async fn fetch_release(&self, url: &str) -> Result<ReleaseInfo, ResolveError> {
        self.requested.lock().unwrap().push(url.to_string());

        match self.bodies.get(url) {
            Some(body) => parse_release(url, body),
            None => Err(ResolveError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            }),
        }
    }
}
