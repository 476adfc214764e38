//! Command-line and environment configuration
//!
//! Resolved once at start-up; the extractor receives plain settings structs.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use examtime_core::{
    BrowserSettings, ExtractorConfig, HttpSettings, TimetableExtractor, DEFAULT_SOURCE_URL,
};

/// Environment variable set by AWS Lambda in every function instance
const LAMBDA_ENV: &str = "AWS_LAMBDA_FUNCTION_VERSION";

/// How the timetable page is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Render in headless Chromium
    Browser,
    /// Plain HTTP GET, no scripts
    Http,
}

/// Exam timetable lookup server
#[derive(Debug, Parser)]
#[command(name = "examtime", version, about)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "EXAMTIME_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Page loading backend
    #[arg(long, value_enum, env = "EXAMTIME_BACKEND", default_value_t = Backend::Browser)]
    pub backend: Backend,

    /// Chromium executable (auto-detected if omitted)
    #[arg(long, env = "EXAMTIME_CHROME_PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,

    /// Use serverless launch flags (implied when running on AWS Lambda)
    #[arg(long, env = "EXAMTIME_SERVERLESS")]
    pub serverless: bool,

    /// Navigation / request timeout in seconds
    #[arg(long, env = "EXAMTIME_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Timetable page URL
    #[arg(long, env = "EXAMTIME_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,
}

impl Cli {
    /// Whether to launch the browser with serverless flags.
    pub fn is_serverless(&self) -> bool {
        self.serverless || std::env::var_os(LAMBDA_ENV).is_some()
    }

    pub fn browser_settings(&self) -> BrowserSettings {
        self.browser_settings_for(self.is_serverless())
    }

    /// Browser settings with the serverless decision made by the caller.
    fn browser_settings_for(&self, serverless: bool) -> BrowserSettings {
        let mut settings = if serverless {
            BrowserSettings::serverless(self.chrome_path.clone())
        } else {
            BrowserSettings {
                executable_path: self.chrome_path.clone(),
                headless: !self.headful,
                ..BrowserSettings::default()
            }
        };
        settings.navigation_timeout = Duration::from_secs(self.timeout_secs);
        settings
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            timeout: Duration::from_secs(self.timeout_secs),
            ..HttpSettings::default()
        }
    }

    /// Build the extractor described by these options.
    ///
    /// # Errors
    /// Returns an error if the HTTP backend's client cannot be created.
    pub fn build_extractor(&self) -> examtime_core::Result<TimetableExtractor> {
        let extractor = match self.backend {
            Backend::Browser => TimetableExtractor::with_browser(self.browser_settings()),
            Backend::Http => TimetableExtractor::with_http(self.http_settings())?,
        };
        Ok(extractor.with_config(ExtractorConfig {
            source_url: self.source_url.clone(),
        }))
    }
}
