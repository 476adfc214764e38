//! Page sources
//!
//! A page source turns a URL into the HTML of the loaded document.
//! - `browser`: headless Chromium, one fresh browser per fetch
//! - `http`: plain HTTP GET, no script execution

pub mod browser;
pub mod http;

use async_trait::async_trait;

use crate::error::Result;

pub use browser::BrowserSource;
pub use http::HttpSource;

/// Something that can load a page and hand back its document HTML
///
/// Implementations hold no per-fetch state: every call starts from scratch
/// and must release whatever it acquired before returning.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Load `url` and return the document's HTML.
    ///
    /// # Errors
    /// - `TimetableError::SourceUnavailable` if the page cannot be loaded
    /// - `TimetableError::Internal` if the source itself fails
    async fn fetch_document(&self, url: &str) -> Result<String>;
}
