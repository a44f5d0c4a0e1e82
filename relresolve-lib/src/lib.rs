pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod release_source;
pub mod resolver;

#[cfg(test)]
pub mod test_helpers;

pub use error::ResolveError;
pub use resolver::{Resolver, resolve_download_url};
