use dioxus::prelude::*;

use crate::app::AppContext;
use crate::domain::entities::admin::{form_values_from_row, AdminResource};
use crate::domain::entities::form::{FieldKind, FormErrors, FormValues};
use crate::domain::entities::grid::{GridState, RowId};
use crate::domain::entities::report::Row;
use crate::platform::desktop::dialogs::confirm;
use crate::ui::components::data_table::DataTable;
use crate::ui::components::form_field::FormField;
use crate::ui::components::grid_toolbar::GridToolbar;
use crate::ui::components::pagination_footer::PaginationFooter;
use crate::ui::input::{Debounce, SEARCH_DEBOUNCE};
use crate::ui::render::{render_rows, visible_columns};
use crate::ui::state::app_state::AppState;
use crate::ui::state::grid_loader::start_page_load;
use crate::ui::styles::{button_style, input_style, primary_button_style, toolbar_style};
use crate::usecase::services::admin_service::AdminError;

#[derive(Debug, Clone, PartialEq)]
enum FormMode {
    Closed,
    Create,
    Edit(RowId),
}

fn blank_values(resource: AdminResource) -> FormValues {
    resource
        .form_fields()
        .into_iter()
        .map(|field| {
            let value = if field.kind == FieldKind::Toggle { "true" } else { "" };
            (field.key.to_string(), value.to_string())
        })
        .collect()
}

#[component]
pub fn AdminPage(resource: AdminResource) -> Element {
    let ctx = use_context::<AppContext>();
    let mut app_state = use_context::<AppState>();
    let columns = resource.columns();
    let fields = resource.form_fields();

    let page_size = ctx.config.page_size;
    let column_keys: Vec<&'static str> = columns.iter().map(|column| column.id).collect();
    let mut grid = use_signal(move || {
        let mut grid = GridState::new(page_size).unwrap_or_default();
        grid.normalize_column_visibility(column_keys);
        grid
    });
    let rows = use_signal(Vec::<Row>::new);
    let mut search = use_signal(String::new);
    let debounce = use_hook(Debounce::new);
    let mut mode = use_signal(|| FormMode::Closed);
    let mut values = use_signal(FormValues::new);
    let mut errors = use_signal(FormErrors::new);
    let mut saving = use_signal(|| false);

    let admin = ctx.admin.clone();
    let session = ctx.session.clone();
    let load = use_callback(move |_: ()| {
        let admin = admin.clone();
        let term = search.peek().clone();
        start_page_load(
            grid,
            rows,
            app_state,
            session.clone(),
            resource.path(),
            move |params| async move { admin.list(resource, params, &term).await },
        );
    });

    use_effect(move || load.call(()));

    let on_search = move |event: FormEvent| {
        search.set(event.value());
        let debounce = debounce.clone();
        spawn(async move {
            if debounce.settle(SEARCH_DEBOUNCE).await {
                grid.write().reset_page();
                load.call(());
            }
        });
    };

    let on_edit = move |row_id: RowId| {
        let Some(row) = rows
            .peek()
            .iter()
            .find(|row| row.id == row_id && row.is_addressable())
            .cloned()
        else {
            return;
        };
        values.set(form_values_from_row(&resource.form_fields(), &row));
        errors.set(FormErrors::new());
        mode.set(FormMode::Edit(row_id));
    };

    let delete_admin = ctx.admin.clone();
    let delete_session = ctx.session.clone();
    let on_delete = move |row_id: RowId| {
        if !rows.peek().iter().any(|row| row.id == row_id && row.is_addressable()) {
            return;
        }
        let question = format!("Delete {} {row_id}?", resource.singular());
        if !confirm(&format!("Delete {}", resource.singular()), &question) {
            return;
        }
        let admin = delete_admin.clone();
        let session = delete_session.clone();
        spawn(async move {
            match admin.delete(resource, row_id.clone()).await {
                Ok(()) => {
                    app_state.info(format!("{} {row_id} deleted", resource.singular()));
                    load.call(());
                }
                Err(err) if session.handle_api_error(&err) => app_state.signed_out(),
                Err(err) => app_state.error(format!("Delete failed: {err}")),
            }
        });
    };

    let save_admin = ctx.admin.clone();
    let save_session = ctx.session.clone();
    let save = move |_: MouseEvent| {
        if saving() {
            return;
        }
        let admin = save_admin.clone();
        let session = save_session.clone();
        let current = mode.peek().clone();
        let submitted = values.peek().clone();
        saving.set(true);
        spawn(async move {
            let result = match current {
                FormMode::Edit(row_id) => admin.update(resource, row_id, submitted).await,
                FormMode::Create => admin.create(resource, submitted).await,
                FormMode::Closed => Ok(()),
            };
            match result {
                Ok(()) => {
                    errors.set(FormErrors::new());
                    mode.set(FormMode::Closed);
                    app_state.info(format!("{} saved", resource.singular()));
                    load.call(());
                }
                Err(AdminError::Invalid(field_errors)) => errors.set(field_errors),
                Err(AdminError::Api(err)) if session.handle_api_error(&err) => {
                    app_state.signed_out()
                }
                Err(err) => app_state.error(format!("Save failed: {err}")),
            }
            saving.set(false);
        });
    };

    let state = grid();
    let visible = visible_columns(&columns, &state);
    let rendered = render_rows(&visible, &rows());
    let form_mode = mode();
    let form_values = values();
    let form_errors = errors();
    let form_title = match &form_mode {
        FormMode::Edit(row_id) => format!("Edit {} {row_id}", resource.singular()),
        _ => format!("New {}", resource.singular()),
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 10px; flex: 1; min-height: 0;",
            h2 { style: "margin: 0;", "{resource.title()}" }
            div {
                style: toolbar_style(),
                input {
                    style: input_style(),
                    placeholder: "Search",
                    value: "{search}",
                    oninput: on_search,
                }
                button {
                    style: primary_button_style(),
                    onclick: move |_| {
                        values.set(blank_values(resource));
                        errors.set(FormErrors::new());
                        mode.set(FormMode::Create);
                    },
                    "New {resource.singular()}"
                }
            }
            if form_mode != FormMode::Closed {
                div {
                    style: "border: 1px solid #ddd; border-radius: 8px; padding: 12px; display: flex; flex-direction: column; gap: 8px;",
                    h3 { style: "margin: 0;", "{form_title}" }
                    for field in fields.iter() {
                        FormField {
                            key: "{field.key}",
                            value: form_values.get(field.key).cloned().unwrap_or_default(),
                            error: form_errors.get(field.key).cloned(),
                            field: field.clone(),
                            on_input: move |(key, value): (String, String)| {
                                errors.write().remove(&key);
                                values.write().insert(key, value);
                            },
                        }
                    }
                    div {
                        style: toolbar_style(),
                        button {
                            style: primary_button_style(),
                            disabled: saving(),
                            onclick: save,
                            "Save"
                        }
                        button {
                            style: button_style(),
                            onclick: move |_| mode.set(FormMode::Closed),
                            "Cancel"
                        }
                    }
                }
            }
            GridToolbar {
                menu_id: "admin-columns",
                title: resource.title().to_string(),
                columns: columns.clone(),
                rows,
                grid,
            }
            DataTable {
                columns: visible,
                rows: rendered,
                grid,
                on_query_change: move |_| load.call(()),
                on_edit,
                on_delete,
            }
            PaginationFooter { grid, on_query_change: move |_| load.call(()) }
        }
    }
}
