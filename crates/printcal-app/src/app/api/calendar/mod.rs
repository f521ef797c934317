//! Calendar rendering API.

use salvo::Router;

use super::CALENDAR_ROUTE_COMPONENT;

mod periods;
mod render;


#[must_use]
pub fn routes() -> Router {
    Router::with_path(CALENDAR_ROUTE_COMPONENT)
        .push(periods::routes())
        .push(render::routes())
}
