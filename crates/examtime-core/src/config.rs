//! Configuration for the extractor and its page sources
//!
//! Everything here is resolved once by whoever constructs the extractor;
//! nothing reads the environment at lookup time.

use std::path::PathBuf;
use std::time::Duration;

/// Published exam timetable fetched by every lookup
pub const DEFAULT_SOURCE_URL: &str = "http://www.sci.p.alexu.edu.eg/ar/Academics/ExamTableTime/2018/";

/// Default User-Agent for plain HTTP fetches
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default navigation / request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Extra Chromium flags used when running inside a serverless function
const SERVERLESS_ARGS: &[&str] = &["--hide-scrollbars", "--disable-web-security"];

/// Configuration for the extractor
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Page holding the timetable
    pub source_url: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
        }
    }
}

/// How to launch the headless browser
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// Chromium binary; auto-detected when `None`
    pub executable_path: Option<PathBuf>,
    /// Run without a visible window (default: true)
    pub headless: bool,
    /// Launch with the Chromium sandbox disabled
    pub no_sandbox: bool,
    /// Ignore certificate errors on navigation
    pub ignore_https_errors: bool,
    /// Extra command-line flags passed to Chromium
    pub args: Vec<String>,
    /// Upper bound on a single navigation (default: 30s)
    pub navigation_timeout: Duration,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            executable_path: None,
            headless: true,
            no_sandbox: false,
            ignore_https_errors: false,
            args: Vec::new(),
            navigation_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl BrowserSettings {
    /// Settings for a hosted function runtime: headless, no sandbox,
    /// certificate errors ignored and scrollbars hidden.
    pub fn serverless(executable_path: Option<PathBuf>) -> Self {
        Self {
            executable_path,
            headless: true,
            no_sandbox: true,
            ignore_https_errors: true,
            args: SERVERLESS_ARGS.iter().map(|a| a.to_string()).collect(),
            ..Self::default()
        }
    }
}

/// Configuration for the plain HTTP page source
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Request timeout (default: 30s)
    pub timeout: Duration,
    /// User-Agent header
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_config_default() {
        let config = ExtractorConfig::default();
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
    }

    #[test]
    fn test_browser_settings_default() {
        let settings = BrowserSettings::default();
        assert!(settings.headless);
        assert!(!settings.no_sandbox);
        assert!(settings.executable_path.is_none());
        assert!(settings.args.is_empty());
        assert_eq!(settings.navigation_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_browser_settings_serverless() {
        let settings = BrowserSettings::serverless(Some(PathBuf::from("/opt/chromium")));
        assert!(settings.headless);
        assert!(settings.no_sandbox);
        assert!(settings.ignore_https_errors);
        assert_eq!(settings.executable_path, Some(PathBuf::from("/opt/chromium")));
        assert_eq!(settings.args, vec!["--hide-scrollbars", "--disable-web-security"]);
    }

    #[test]
    fn test_http_settings_default() {
        let settings = HttpSettings::default();
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert!(settings.user_agent.starts_with("Mozilla/5.0"));
    }
}
