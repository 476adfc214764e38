//! Exam Timetable Core Library
//!
//! This crate looks up exam times in a published HTML timetable.
//!
//! # Features
//! - Match rows by course code or by course name
//! - Render the timetable in headless Chromium, or fetch it over plain HTTP
//! - Request validation with caller-facing error messages

pub mod config;
pub mod error;
pub mod extractor;
pub mod parser;
pub mod request;
pub mod source;
pub mod types;

// Re-export main types for convenience
pub use config::{BrowserSettings, ExtractorConfig, HttpSettings, DEFAULT_SOURCE_URL};
pub use error::{Result, TimetableError};
pub use extractor::TimetableExtractor;
pub use request::ExtractRequest;
pub use source::{BrowserSource, HttpSource, PageSource};
pub use types::{MatchResult, Query, QueryKind, TimetableRow};
