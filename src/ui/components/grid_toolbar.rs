use dioxus::prelude::*;
use tracing::{info, warn};

use crate::domain::entities::column::ColumnDef;
use crate::domain::entities::grid::GridState;
use crate::domain::entities::report::Row;
use crate::infra::export::csv::export_page_csv;
use crate::platform::desktop::dialogs::{export_file_name, pick_export_path};
use crate::ui::components::dropdown::ColumnVisibilityDropdown;
use crate::ui::input::clipboard_script;
use crate::ui::render::{page_subtotals, render_rows, visible_columns};
use crate::ui::state::app_state::AppState;
use crate::ui::styles::{button_style, toolbar_style};

/// Column picker, CSV export of the loaded page and copy of the selected row ids.
#[component]
pub fn GridToolbar(
    menu_id: &'static str,
    title: String,
    columns: Vec<ColumnDef>,
    rows: Signal<Vec<Row>>,
    mut grid: Signal<GridState>,
) -> Element {
    let mut app_state = use_context::<AppState>();
    let state = grid();
    let hidden: Vec<String> = state
        .column_visibility()
        .iter()
        .filter(|(_, visible)| !**visible)
        .map(|(key, _)| key.clone())
        .collect();
    let selected_count = state.selection().len();

    let export_columns = columns.clone();
    let export = move |_: MouseEvent| {
        let visible = visible_columns(&export_columns, &grid.peek());
        let page_rows = rows.peek();
        if page_rows.is_empty() {
            app_state.info("Nothing to export on this page");
            return;
        }
        let today = chrono::Local::now().date_naive();
        let Some(path) = pick_export_path(&export_file_name(&title, today)) else {
            return;
        };
        let rendered = render_rows(&visible, &page_rows);
        let subtotals = page_subtotals(&visible, &page_rows);
        match export_page_csv(&path, &visible, &rendered, subtotals.as_deref()) {
            Ok(written) => {
                info!(path = %path.display(), rows = written, "page exported");
                app_state.info(format!("Exported {written} rows to {}", path.display()));
            }
            Err(err) => {
                warn!(error = %err, "csv export failed");
                app_state.error(format!("Export failed: {err:#}"));
            }
        }
    };

    let copy_selection = move |_: MouseEvent| {
        let ids: Vec<String> = grid
            .peek()
            .selection()
            .iter()
            .map(|id| id.to_string())
            .collect();
        if ids.is_empty() {
            return;
        }
        let script = clipboard_script(&ids.join("\n"));
        spawn(async move {
            match dioxus::document::eval(&script).join::<bool>().await {
                Ok(true) => app_state.info(format!("Copied {} ids", ids.len())),
                Ok(false) => app_state.error("Clipboard is unavailable, nothing was copied"),
                Err(err) => {
                    warn!(error = ?err, "clipboard script failed");
                    app_state.error("Copy failed, nothing was copied");
                }
            }
        });
    };

    rsx! {
        div {
            style: toolbar_style(),
            ColumnVisibilityDropdown {
                menu_id,
                columns,
                hidden,
                on_toggle: move |(key, visible): (String, bool)| {
                    grid.write().set_column_visible(&key, visible);
                },
            }
            button { style: button_style(), onclick: export, "Export CSV" }
            button {
                style: button_style(),
                disabled: selected_count == 0,
                onclick: copy_selection,
                "Copy selected ids ({selected_count})"
            }
        }
    }
}
