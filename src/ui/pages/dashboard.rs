use dioxus::prelude::*;
use tracing::warn;

use crate::app::AppContext;
use crate::domain::entities::grid::GridState;
use crate::domain::entities::report::{ReportFilter, ReportKind, Row};
use crate::domain::entities::session::FeatureFlags;
use crate::ui::components::data_table::DataTable;
use crate::ui::render::{page_subtotals, render_rows};
use crate::ui::state::app_state::{AppState, Screen};
use crate::ui::state::grid_loader::start_page_load;
use crate::ui::styles::button_style;

#[component]
pub fn Dashboard() -> Element {
    let ctx = use_context::<AppContext>();
    let mut app_state = use_context::<AppState>();
    let kind = ReportKind::Summary;
    let columns = kind.columns();
    let page_size = ctx.config.page_size;
    let grid = use_signal(move || GridState::new(page_size).unwrap_or_default());
    let rows = use_signal(Vec::<Row>::new);

    let reports = ctx.reports.clone();
    let session = ctx.session.clone();
    let load = use_callback(move |_: ()| {
        let reports = reports.clone();
        let filter = ReportFilter::default_for(kind, chrono::Local::now().date_naive());
        start_page_load(
            grid,
            rows,
            app_state,
            session.clone(),
            kind.path(),
            move |params| async move { reports.fetch(kind, params, &filter).await },
        );
    });
    use_effect(move || load.call(()));

    let user = (app_state.user)();
    let flags = ctx.session.feature_flags().unwrap_or_else(|err| {
        warn!(error = %err, "failed to read feature flags");
        FeatureFlags::default()
    });
    let page_rows = rows();
    let rendered = render_rows(&columns, &page_rows);
    let subtotals = page_subtotals(&columns, &page_rows);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 12px; flex: 1; min-height: 0;",
            h2 { style: "margin: 0;", "Dashboard" }
            if let Some(user) = user {
                p { style: "margin: 0;", "Signed in as {user.username} ({user.role}) against {ctx.config.api_base_url}" }
            }
            div {
                style: "display: flex; gap: 8px; flex-wrap: wrap; align-items: center;",
                strong { "Feature flags:" }
                if flags.0.is_empty() {
                    span { "none" }
                }
                for (name, enabled) in flags.0.clone() {
                    span {
                        key: "{name}",
                        style: if enabled { "padding: 2px 8px; border-radius: 10px; background: #e3f4e3;" } else { "padding: 2px 8px; border-radius: 10px; background: #eee; color: #777;" },
                        "{name}"
                    }
                }
            }
            div {
                style: "display: flex; align-items: center; gap: 8px;",
                h3 { style: "margin: 0;", "{kind.title()}, last 7 days" }
                button {
                    style: button_style(),
                    onclick: move |_| app_state.screen.set(Screen::Report(kind)),
                    "Open report"
                }
            }
            DataTable {
                columns: columns.clone(),
                rows: rendered,
                subtotals,
                grid,
                on_query_change: move |_| load.call(()),
            }
        }
    }
}
