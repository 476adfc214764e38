//! Main timetable lookup API
//!
//! Combines a page source with the table parser: load the timetable, walk
//! its rows and return the name/time of every row matching the query.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{BrowserSettings, ExtractorConfig, HttpSettings};
use crate::error::{Result, TimetableError};
use crate::parser::{extract_matches, parse_rows};
use crate::request::ExtractRequest;
use crate::source::{BrowserSource, HttpSource, PageSource};
use crate::types::{MatchResult, Query};

/// Exam timetable extractor
///
/// Holds no per-lookup state, so one instance can serve any number of
/// concurrent lookups. Each lookup re-fetches the timetable.
///
/// # Example
/// ```no_run
/// use examtime_core::{BrowserSettings, Query, QueryKind, TimetableExtractor};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let extractor = TimetableExtractor::with_browser(BrowserSettings::default());
///     let query = Query::new(QueryKind::Code, vec!["CS101".to_string()])?;
///
///     for exam in extractor.extract(&query).await? {
///         println!("{}: {}", exam.name, exam.time);
///     }
///     Ok(())
/// }
/// ```
pub struct TimetableExtractor {
    source: Arc<dyn PageSource>,
    config: ExtractorConfig,
}

impl TimetableExtractor {
    /// Create an extractor over any page source.
    pub fn new(source: Arc<dyn PageSource>, config: ExtractorConfig) -> Self {
        Self { source, config }
    }

    /// Create an extractor that renders the timetable in headless Chromium.
    pub fn with_browser(settings: BrowserSettings) -> Self {
        Self::new(Arc::new(BrowserSource::new(settings)), ExtractorConfig::default())
    }

    /// Create an extractor that fetches the timetable with a plain GET.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_http(settings: HttpSettings) -> Result<Self> {
        let source = HttpSource::with_settings(settings)?;
        Ok(Self::new(Arc::new(source), ExtractorConfig::default()))
    }

    /// Replace the configuration, keeping the source.
    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn source_url(&self) -> &str {
        &self.config.source_url
    }

    /// Look up exam times for a query.
    ///
    /// # Returns
    /// * `Ok(Vec<MatchResult>)` in timetable row order, never empty
    /// * `Err(TimetableError::NoMatches)` if no row matched
    /// * `Err(TimetableError::SourceUnavailable)` if the page could not be loaded
    /// * `Err(TimetableError::Internal)` if the page source failed
    pub async fn extract(&self, query: &Query) -> Result<Vec<MatchResult>> {
        let url = self.source_url();
        let html = self.source.fetch_document(url).await?;

        let rows = parse_rows(&html);
        if rows.is_empty() {
            warn!(url, "timetable page contains no table rows; layout may have changed");
        }

        let total = rows.len();
        let results = extract_matches(rows, query);

        info!(
            kind = ?query.kind(),
            terms = query.terms().len(),
            rows = total,
            matches = results.len(),
            "timetable lookup finished"
        );

        if results.is_empty() {
            return Err(TimetableError::NoMatches(query.kind()));
        }
        Ok(results)
    }

    /// Validate a raw request, then look it up.
    ///
    /// Validation failures return before anything is fetched.
    pub async fn extract_request(&self, request: ExtractRequest) -> Result<Vec<MatchResult>> {
        let query = request.into_query()?;
        self.extract(&query).await
    }
}
