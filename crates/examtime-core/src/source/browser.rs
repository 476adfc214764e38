//! Headless Chromium page source
//!
//! Every fetch launches its own browser with its own profile directory,
//! loads the page, serialises the DOM and shuts the browser down again.
//! Nothing survives between fetches.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::BrowserSettings;
use crate::error::{Result, TimetableError};

use super::PageSource;

/// Distinguishes profile directories of sessions in the same process
static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Page source that renders the page in headless Chromium
pub struct BrowserSource {
    settings: BrowserSettings,
}

impl BrowserSource {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }
}

#[async_trait]
impl PageSource for BrowserSource {
    async fn fetch_document(&self, url: &str) -> Result<String> {
        let session = BrowserSession::launch(&self.settings).await?;
        let result = session.render(url, self.settings.navigation_timeout).await;
        session.close().await;
        result
    }
}

/// Translate settings into a chromiumoxide launch configuration.
fn build_config(settings: &BrowserSettings, profile_dir: &Path) -> Result<BrowserConfig> {
    let mut builder = BrowserConfig::builder()
        .user_data_dir(profile_dir)
        .request_timeout(settings.navigation_timeout)
        .args(settings.args.iter().map(String::as_str));

    if !settings.headless {
        builder = builder.with_head();
    }
    if settings.no_sandbox {
        builder = builder.no_sandbox();
    }
    if !settings.ignore_https_errors {
        builder = builder.respect_https_errors();
    }
    if let Some(path) = &settings.executable_path {
        builder = builder.chrome_executable(path);
    }

    builder
        .build()
        .map_err(|e| TimetableError::Internal(format!("invalid browser configuration: {}", e)))
}

/// One running browser plus the task driving its CDP connection
///
/// Call `close` on every path. If the session is dropped instead (the
/// caller's future was cancelled), the handler task is aborted and
/// chromiumoxide kills the child process when `Browser` drops.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    profile_dir: PathBuf,
}

impl BrowserSession {
    async fn launch(settings: &BrowserSettings) -> Result<Self> {
        let profile_dir = std::env::temp_dir().join(format!(
            "examtime-{}-{}",
            std::process::id(),
            SESSION_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        Self::launch_in(settings, profile_dir).await
    }

    async fn launch_in(settings: &BrowserSettings, profile_dir: PathBuf) -> Result<Self> {
        let launched = match build_config(settings, &profile_dir) {
            Ok(config) => Browser::launch(config)
                .await
                .map_err(|e| TimetableError::Internal(format!("failed to launch browser: {}", e))),
            Err(e) => Err(e),
        };

        let (browser, mut handler) = match launched {
            Ok(launched) => launched,
            Err(e) => {
                // Chromium may have created the profile before failing
                remove_profile(&profile_dir).await;
                return Err(e);
            }
        };

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP handler error: {}", e);
                }
            }
        });

        debug!(profile = %profile_dir.display(), "browser session started");
        Ok(Self {
            browser,
            handler,
            profile_dir,
        })
    }

    /// Navigate to `url` and return the serialised DOM once loading finishes.
    async fn render(&self, url: &str, timeout: Duration) -> Result<String> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| TimetableError::Internal(format!("failed to open page: {}", e)))?;

        debug!(url, "navigating");
        let navigation = async {
            page.goto(url).await.map_err(|e| unavailable(url, e))?;
            page.wait_for_navigation_response()
                .await
                .map_err(|e| unavailable(url, e))
        };

        let request = tokio::time::timeout(timeout, navigation)
            .await
            .map_err(|_| {
                TimetableError::SourceUnavailable(format!(
                    "navigation to {} timed out after {}s",
                    url,
                    timeout.as_secs()
                ))
            })??;

        if let Some(request) = request {
            if let Some(failure) = &request.failure_text {
                return Err(unavailable(url, failure));
            }
            if let Some(response) = &request.response {
                if !(200..300).contains(&response.status) {
                    warn!(url, status = response.status, "navigation returned non-success status");
                    return Err(TimetableError::SourceUnavailable(format!(
                        "{} responded with {}",
                        url, response.status
                    )));
                }
            }
        }

        page.content()
            .await
            .map_err(|e| TimetableError::Internal(format!("failed to read document: {}", e)))
    }

    /// Shut the browser down. Errors are logged, not returned: the lookup
    /// result is already decided by the time the session closes.
    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("failed to close browser: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("failed to reap browser process: {}", e);
        }
        if let Err(e) = (&mut self.handler).await {
            debug!("CDP handler task ended abnormally: {}", e);
        }
        let profile_dir = std::mem::take(&mut self.profile_dir);
        remove_profile(&profile_dir).await;
        debug!("browser session closed");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        // Empty once `close` has cleaned up
        if self.profile_dir.as_os_str().is_empty() {
            return;
        }
        let profile_dir = std::mem::take(&mut self.profile_dir);
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn_blocking(move || {
                let _ = std::fs::remove_dir_all(profile_dir);
            });
        }
    }
}

/// Delete a session's profile directory, if it exists.
async fn remove_profile(profile_dir: &Path) {
    match tokio::fs::remove_dir_all(profile_dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => debug!(profile = %profile_dir.display(), "failed to remove browser profile: {}", e),
    }
}

fn unavailable(url: &str, err: impl Display) -> TimetableError {
    warn!(url, "navigation failed: {}", err);
    TimetableError::SourceUnavailable(format!("failed to load {}: {}", url, err))
}
