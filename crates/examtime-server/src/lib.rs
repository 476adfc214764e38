//! Exam Timetable HTTP Server
//!
//! This crate exposes [`examtime_core::TimetableExtractor`] over HTTP.
//!
//! # Usage
//!
//! ```rust,ignore
//! use examtime_core::{BrowserSettings, TimetableExtractor};
//! use examtime_server::{serve, AppState};
//!
//! let state = AppState::new(TimetableExtractor::with_browser(BrowserSettings::default()));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! serve(listener, state, async { let _ = tokio::signal::ctrl_c().await; }).await?;
//! ```
//!
//! # Endpoints
//! - `POST /api` - Look up exam times by course code or name

pub mod config;
pub mod handlers;

use std::future::Future;
use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;

use examtime_core::TimetableExtractor;

/// Shared state for all requests.
///
/// The extractor keeps no per-lookup state, so requests share it without
/// locking and run concurrently.
#[derive(Clone)]
pub struct AppState {
    extractor: Arc<TimetableExtractor>,
}

impl AppState {
    pub fn new(extractor: TimetableExtractor) -> Self {
        Self {
            extractor: Arc::new(extractor),
        }
    }

    /// Get a reference to the inner extractor.
    pub fn extractor(&self) -> &TimetableExtractor {
        &self.extractor
    }
}

/// Build the application router.
///
/// Methods other than POST on `/api` get 405 from the method router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api", post(handlers::lookup))
        .route("/api/", post(handlers::lookup))
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .with_state(state)
}

/// Serve the router on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
