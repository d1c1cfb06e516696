use std::future::Future;
use std::sync::Arc;

use dioxus::prelude::*;
use tracing::debug;

use crate::domain::entities::grid::{FetchParams, GridState};
use crate::domain::entities::report::{PageResult, Row};
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::api::ApiError;
use crate::usecase::services::session_service::SessionService;

/// Issues a page request for the grid's current query. Only the response for the
/// latest ticket lands in `rows`; older ones are dropped.
pub fn start_page_load<F, Fut>(
    mut grid: Signal<GridState>,
    mut rows: Signal<Vec<Row>>,
    mut app_state: AppState,
    session: Arc<SessionService>,
    source: &'static str,
    fetch: F,
) where
    F: FnOnce(FetchParams) -> Fut,
    Fut: Future<Output = Result<PageResult, ApiError>> + 'static,
{
    let (ticket, params) = {
        let mut state = grid.write();
        let ticket = state.begin_request();
        (ticket, state.fetch_params())
    };
    let request = fetch(params);

    spawn(async move {
        match request.await {
            Ok(page) => {
                let row_ids = page.row_ids();
                if grid.write().apply_page(ticket, row_ids, page.total_count) {
                    rows.set(page.rows);
                } else {
                    debug!(source, ticket = ticket.0, "stale page response dropped");
                }
            }
            Err(err) => {
                if session.handle_api_error(&err) {
                    app_state.signed_out();
                    app_state.error("Session expired, please sign in again");
                    return;
                }
                let message = err.to_string();
                if grid.write().apply_failure(ticket, message.clone()) {
                    app_state.error(format!("Failed to load {source}: {message}"));
                }
            }
        }
    });
}
