use dioxus::prelude::*;

use crate::domain::entities::column::ColumnDef;
use crate::domain::entities::grid::{GridState, LoadState, RowId};
use crate::ui::render::{column_alignment, header_label, RenderedRow, PAGE_SUBTOTAL_LABEL};
use crate::ui::styles::{
    button_style, table_cell_style, table_container_style, table_footer_cell_style,
    table_header_cell_style,
};

#[component]
pub fn DataTable(
    columns: Vec<ColumnDef>,
    rows: Vec<RenderedRow>,
    subtotals: Option<Vec<String>>,
    mut grid: Signal<GridState>,
    on_query_change: EventHandler<()>,
    on_edit: Option<EventHandler<RowId>>,
    on_delete: Option<EventHandler<RowId>>,
) -> Element {
    let state = grid();
    let sort = state.sort().cloned();
    let all_selected = state.is_all_selected();
    let has_actions = on_edit.is_some() || on_delete.is_some();
    let span = columns.len() + 1 + usize::from(has_actions);
    let status_line = match state.load_state() {
        LoadState::Loading if rows.is_empty() => Some("Loading…".to_string()),
        LoadState::Failed(message) if rows.is_empty() => Some(format!("Error: {message}")),
        LoadState::Idle if rows.is_empty() => Some("No rows".to_string()),
        _ => None,
    };

    rsx! {
        div {
            style: table_container_style(),
            table {
                style: "border-collapse: separate; border-spacing: 0; width: 100%;",
                thead {
                    tr {
                        th {
                            style: table_header_cell_style(),
                            input {
                                r#type: "checkbox",
                                checked: all_selected,
                                disabled: state.loaded_ids().is_empty(),
                                onclick: move |_| {
                                    let mut state = grid.write();
                                    if state.is_all_selected() {
                                        state.clear_selection();
                                    } else {
                                        state.select_all();
                                    }
                                },
                            }
                        }
                        for column in columns.iter().cloned() {
                            th {
                                key: "{column.id}",
                                style: format!(
                                    "{} text-align: {}; cursor: {};",
                                    table_header_cell_style(),
                                    column_alignment(&column),
                                    if column.sortable { "pointer" } else { "default" },
                                ),
                                onclick: move |_| {
                                    if !column.sortable {
                                        return;
                                    }
                                    grid.write().toggle_sort(column.id);
                                    on_query_change.call(());
                                },
                                "{header_label(&column, sort.as_ref())}"
                            }
                        }
                        if has_actions {
                            th { style: table_header_cell_style(), "" }
                        }
                    }
                }
                tbody {
                    if let Some(line) = status_line {
                        tr {
                            td {
                                colspan: "{span}",
                                style: "padding: 16px; text-align: center; color: #666;",
                                "{line}"
                            }
                        }
                    }
                    for row in rows.iter().cloned() {
                        tr {
                            key: "{row.id}",
                            style: if state.is_selected(&row.id) { "background: #eef4ff;" } else { "" },
                            td {
                                style: table_cell_style("center", 0),
                                if row.depth == 0 {
                                    input {
                                        r#type: "checkbox",
                                        checked: state.is_selected(&row.id),
                                        onclick: {
                                            let row_id = row.id.clone();
                                            move |_| grid.write().toggle_selection(&row_id)
                                        },
                                    }
                                }
                            }
                            for (idx, (column, cell)) in columns.iter().zip(row.cells.iter()).enumerate() {
                                td {
                                    key: "{column.id}",
                                    style: table_cell_style(
                                        column_alignment(column),
                                        if idx == 0 { row.depth } else { 0 },
                                    ),
                                    "{cell}"
                                }
                            }
                            if has_actions {
                                td {
                                    style: table_cell_style("right", 0),
                                    if row.depth == 0 {
                                        if let Some(on_edit) = on_edit {
                                            button {
                                                style: button_style(),
                                                disabled: !row.addressable,
                                                title: if row.addressable { "" } else { "Row has no server id" },
                                                onclick: {
                                                    let row_id = row.id.clone();
                                                    move |_| on_edit.call(row_id.clone())
                                                },
                                                "Edit"
                                            }
                                        }
                                        if let Some(on_delete) = on_delete {
                                            button {
                                                style: format!("{} margin-left: 6px; color: #c0392b;", button_style()),
                                                disabled: !row.addressable,
                                                title: if row.addressable { "" } else { "Row has no server id" },
                                                onclick: {
                                                    let row_id = row.id.clone();
                                                    move |_| on_delete.call(row_id.clone())
                                                },
                                                "Delete"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                if let Some(subtotals) = subtotals.filter(|_| !rows.is_empty()) {
                    tfoot {
                        tr {
                            td { style: table_footer_cell_style("left"), "" }
                            for (idx, (column, value)) in columns.iter().zip(subtotals.iter()).enumerate() {
                                td {
                                    key: "{column.id}",
                                    style: table_footer_cell_style(column_alignment(column)),
                                    if idx == 0 && value.is_empty() {
                                        "{PAGE_SUBTOTAL_LABEL}"
                                    } else if idx == 0 {
                                        "{PAGE_SUBTOTAL_LABEL}: {value}"
                                    } else {
                                        "{value}"
                                    }
                                }
                            }
                            if has_actions {
                                td { style: table_footer_cell_style("left"), "" }
                            }
                        }
                    }
                }
            }
        }
    }
}
