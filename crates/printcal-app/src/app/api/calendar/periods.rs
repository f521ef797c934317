use salvo::{Router, handler, writing::Json};

use printcal_service::range::period_names;

/// ## Summary
/// GET /calendar/periods - Lists the period names accepted by `render`.
#[handler]
async fn list_periods() -> Json<Vec<&'static str>> {
    Json(period_names().collect())
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("periods").get(list_periods)
}
