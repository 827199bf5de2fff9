//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod chart;

use axum::Router;
use axum::routing::get;

use gridgate_app::ports::ChartBackend;

use crate::state::AppState;

/// Build the chart routes.
///
/// The query-string endpoint lives under `/data/chart/`, the path-segment
/// endpoints under `/{location}/data/chart/`. The query-string endpoint also
/// answers without its trailing slash.
pub fn routes<B>() -> Router<AppState<B>>
where
    B: ChartBackend + Send + Sync + 'static,
{
    Router::new()
        .route("/data/chart/{location}/", get(chart::query::<B>))
        .route("/data/chart/{location}", get(chart::query::<B>))
        .route("/{location}/data/chart/last/all/", get(chart::last::<B>))
        .route(
            "/{location}/data/chart/year/all/{year}",
            get(chart::year::<B>),
        )
        .route(
            "/{location}/data/chart/month/all/{year}/{month}",
            get(chart::month::<B>),
        )
        .route(
            "/{location}/data/chart/day/all/{date}",
            get(chart::day::<B>),
        )
}
