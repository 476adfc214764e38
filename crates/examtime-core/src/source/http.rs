//! Plain HTTP page source
//!
//! Fetches the timetable with a single GET. The timetable page is static
//! markup, so this returns the same rows the browser would see without the
//! cost of launching one. No retries: a failed fetch fails the lookup.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::HttpSettings;
use crate::error::{Result, TimetableError};

use super::PageSource;

/// HTTP page source backed by `reqwest`
pub struct HttpSource {
    /// Underlying HTTP client
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a new source with default settings
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_settings(HttpSettings::default())
    }

    /// Create a new source with custom settings
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_settings(settings: HttpSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| TimetableError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch_document(&self, url: &str) -> Result<String> {
        debug!(url, "fetching timetable over HTTP");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(url, %status, "timetable request returned non-success status");
            return Err(TimetableError::SourceUnavailable(format!(
                "{} responded with {}",
                url, status
            )));
        }

        Ok(response.text().await?)
    }
}
