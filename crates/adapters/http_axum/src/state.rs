//! Shared application state for axum handlers.

use std::sync::Arc;

use gridgate_app::ports::ChartBackend;
use gridgate_app::services::chart_service::ChartService;

/// Application state shared across all axum handlers.
///
/// Generic over the backend type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the backend itself does not need to be
/// `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<B> {
    /// Chart query dispatcher.
    pub chart_service: Arc<ChartService<B>>,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            chart_service: Arc::clone(&self.chart_service),
        }
    }
}

impl<B> AppState<B>
where
    B: ChartBackend + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(chart_service: ChartService<B>) -> Self {
        Self {
            chart_service: Arc::new(chart_service),
        }
    }
}
