//! Renders a calendar feed into day-grouped occurrences for one period.

use salvo::{Depot, Request, Router, handler, writing::Json};
use serde::{Deserialize, Serialize};

use printcal_service::expand::render;
use printcal_service::fetch::fetch_calendar;
use printcal_service::occurrence::{OccurrenceMap, group_by_date};
use printcal_service::range::{Interval, resolve};

use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult};
use crate::fetch_handler::get_client_from_depot;

/// Largest calendar body accepted by POST.
const MAX_CALENDAR_BYTES: usize = 16 * 1024 * 1024;

/// ## Summary
/// Render response payload
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub interval: Interval,
    /// Non-recurring events overlapping the interval that span several days.
    pub multi_day_count: usize,
    pub days: OccurrenceMap,
}

impl RenderResponse {
    fn build(calendar_text: &str, interval: Interval) -> AppResult<Self> {
        let expansion = render(calendar_text, &interval)?;
        Ok(Self {
            interval,
            multi_day_count: expansion.multi_day_count,
            days: group_by_date(expansion.records),
        })
    }
}

fn required_query<'de, T: Deserialize<'de>>(req: &'de Request, name: &str) -> AppResult<T> {
    req.query::<T>(name)
        .ok_or_else(|| AppError::BadRequest(format!("missing or invalid query parameter {name}")))
}

/// Resolves the `year` and `period` query parameters.
fn requested_interval(req: &Request) -> AppResult<Interval> {
    let year = required_query::<i32>(req, "year")?;
    let period = required_query::<String>(req, "period")?;
    Ok(resolve(year, &period)?)
}

/// ## Summary
/// POST /calendar/render?year=&period= - Renders the iCalendar text in the
/// request body.
///
/// ## Errors
/// Returns HTTP 400 for a bad query or unreadable body, and HTTP 422 if the
/// body is not valid calendar data.
#[handler]
async fn render_posted(req: &mut Request) -> AppResult<Json<RenderResponse>> {
    let interval = requested_interval(req)?;

    let body = req
        .payload_with_max_size(MAX_CALENDAR_BYTES)
        .await
        .map_err(|e| AppError::BadRequest(format!("cannot read body: {e}")))?;
    let text = std::str::from_utf8(body)
        .map_err(|e| AppError::BadRequest(format!("body is not UTF-8: {e}")))?;
    tracing::debug!(bytes = text.len(), "Rendering posted calendar");

    Ok(Json(RenderResponse::build(text, interval)?))
}

/// ## Summary
/// GET /calendar/render?year=&period=&url= - Fetches the calendar at `url`
/// and renders it.
///
/// ## Errors
/// Returns HTTP 400 for a bad query or URL, HTTP 502 if the calendar cannot
/// be fetched, and HTTP 422 if it is not valid calendar data.
#[handler]
async fn render_remote(req: &mut Request, depot: &mut Depot) -> AppResult<Json<RenderResponse>> {
    let interval = requested_interval(req)?;
    let url = required_query::<String>(req, "url")?;

    let settings = get_config_from_depot(depot)?;
    let client = get_client_from_depot(depot)?;
    let text = fetch_calendar(&client, &url, settings.fetch.proxy_url.as_deref()).await?;

    Ok(Json(RenderResponse::build(&text, interval)?))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("render")
        .post(render_posted)
        .get(render_remote)
}
