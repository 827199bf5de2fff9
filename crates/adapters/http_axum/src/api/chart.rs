//! JSON REST handlers for chart data.
//!
//! Every handler validates its inputs, builds a [`TimeSelector`] and hands it
//! to the chart service. Backend failures are already folded into the result,
//! so a dispatched request always answers `200`.

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer, de};

use gridgate_app::ports::ChartBackend;
use gridgate_domain::location::Location;
use gridgate_domain::outcome::ChartResult;
use gridgate_domain::selector::{DAYS, MONTHS, PATH_YEARS, QUERY_YEARS, TimeSelector, check_range};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters of the query-string endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    /// Fetch the last known value; wins over any date fields.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub last: Option<bool>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// Parse a query-string flag.
///
/// Accepts `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`, `t`/`f` and
/// `y`/`n`, ignoring case.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_flag(&raw)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("'{raw}' is not a valid boolean")))
}

/// Possible responses from the chart endpoints.
pub enum ChartResponse {
    /// 200 OK with the backend payload, or an array of payloads for `ALL`.
    Ok(Json<ChartResult>),
}

impl IntoResponse for ChartResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

fn parse_location(raw: &str) -> Result<Location, ApiError> {
    raw.parse::<Location>().map_err(ApiError::from)
}

async fn dispatch<B>(state: &AppState<B>, location: Location, selector: TimeSelector) -> ChartResponse
where
    B: ChartBackend + Send + Sync + 'static,
{
    let result = state.chart_service.query(location, selector).await;
    ChartResponse::Ok(Json(result))
}

/// `GET /data/chart/:location/?last=&year=&month=&day=`
pub async fn query<B>(
    State(state): State<AppState<B>>,
    location: Result<Path<String>, PathRejection>,
    params: Result<Query<ChartQuery>, QueryRejection>,
) -> Result<ChartResponse, ApiError>
where
    B: ChartBackend + Send + Sync + 'static,
{
    let Path(location) = location?;
    let Query(params) = params?;
    let location = parse_location(&location)?;
    if let Some(year) = params.year {
        check_range("year", year, &QUERY_YEARS)?;
    }
    if let Some(month) = params.month {
        check_range("month", month, &MONTHS)?;
    }
    if let Some(day) = params.day {
        check_range("day", day, &DAYS)?;
    }

    let selector = TimeSelector::from_parts(
        params.last.unwrap_or(false),
        params.year,
        params.month,
        params.day,
    )?;
    Ok(dispatch(&state, location, selector).await)
}

/// `GET /:location/data/chart/last/all/`
pub async fn last<B>(
    State(state): State<AppState<B>>,
    location: Result<Path<String>, PathRejection>,
) -> Result<ChartResponse, ApiError>
where
    B: ChartBackend + Send + Sync + 'static,
{
    let Path(location) = location?;
    let location = parse_location(&location)?;
    Ok(dispatch(&state, location, TimeSelector::Last).await)
}

/// `GET /:location/data/chart/year/all/:year`
pub async fn year<B>(
    State(state): State<AppState<B>>,
    params: Result<Path<(String, i32)>, PathRejection>,
) -> Result<ChartResponse, ApiError>
where
    B: ChartBackend + Send + Sync + 'static,
{
    let Path((location, year)) = params?;
    let location = parse_location(&location)?;
    check_range("year", year, &PATH_YEARS)?;
    Ok(dispatch(&state, location, TimeSelector::Year { year }).await)
}

/// `GET /:location/data/chart/month/all/:year/:month`
pub async fn month<B>(
    State(state): State<AppState<B>>,
    params: Result<Path<(String, i32, u32)>, PathRejection>,
) -> Result<ChartResponse, ApiError>
where
    B: ChartBackend + Send + Sync + 'static,
{
    let Path((location, year, month)) = params?;
    let location = parse_location(&location)?;
    check_range("year", year, &PATH_YEARS)?;
    check_range("month", month, &MONTHS)?;
    Ok(dispatch(&state, location, TimeSelector::Month { year, month }).await)
}

/// `GET /:location/data/chart/day/all/:date` with `date` as `YYYY-MM-DD`.
pub async fn day<B>(
    State(state): State<AppState<B>>,
    params: Result<Path<(String, String)>, PathRejection>,
) -> Result<ChartResponse, ApiError>
where
    B: ChartBackend + Send + Sync + 'static,
{
    let Path((location, date)) = params?;
    let location = parse_location(&location)?;
    let selector = TimeSelector::from_iso_date(&date)?;
    if let Some(year) = selector.year() {
        check_range("year", year, &PATH_YEARS)?;
    }
    Ok(dispatch(&state, location, selector).await)
}
