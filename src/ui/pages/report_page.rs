use std::time::Instant;

use chrono::NaiveDate;
use dioxus::prelude::*;

use crate::app::AppContext;
use crate::domain::entities::grid::GridState;
use crate::domain::entities::report::{FilterField, ReportFilter, ReportKind, Row};
use crate::ui::components::data_table::DataTable;
use crate::ui::components::dropdown::{DropdownOption, DropdownSelect};
use crate::ui::components::grid_toolbar::GridToolbar;
use crate::ui::components::pagination_footer::PaginationFooter;
use crate::ui::input::{Debounce, Throttle, REFRESH_THROTTLE, SEARCH_DEBOUNCE};
use crate::ui::render::{page_subtotals, render_rows, visible_columns};
use crate::ui::state::app_state::AppState;
use crate::ui::state::grid_loader::start_page_load;
use crate::ui::styles::{button_style, input_style, primary_button_style, toolbar_style};

const CURRENCIES: [&str; 3] = ["USD", "EUR", "PTS"];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[component]
pub fn ReportPage(kind: ReportKind) -> Element {
    let ctx = use_context::<AppContext>();
    let mut app_state = use_context::<AppState>();
    let columns = kind.columns();
    let fields = kind.filter_fields();

    let page_size = ctx.config.page_size;
    let column_keys: Vec<&'static str> = columns.iter().map(|column| column.id).collect();
    let mut grid = use_signal(move || {
        let mut grid = GridState::new(page_size).unwrap_or_default();
        grid.normalize_column_visibility(column_keys);
        grid
    });
    let rows = use_signal(Vec::<Row>::new);
    let mut draft =
        use_signal(|| ReportFilter::default_for(kind, chrono::Local::now().date_naive()));
    let mut applied = use_signal(move || draft.peek().clone());
    let debounce = use_hook(Debounce::new);
    let mut refresh_throttle = use_signal(|| Throttle::new(REFRESH_THROTTLE));

    let reports = ctx.reports.clone();
    let session = ctx.session.clone();
    let load = use_callback(move |_: ()| {
        let reports = reports.clone();
        let filter = applied.peek().clone();
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

    let mut apply = move || {
        let filter = draft.peek().clone();
        if !filter.date_range_is_valid() {
            app_state.error("Date from must not be after date to");
            return;
        }
        applied.set(filter);
        grid.write().reset_page();
        load.call(());
    };

    let on_search = {
        let debounce = debounce.clone();
        move |event: FormEvent| {
            draft.write().search = event.value();
            let debounce = debounce.clone();
            spawn(async move {
                if debounce.settle(SEARCH_DEBOUNCE).await {
                    apply();
                }
            });
        }
    };

    let refresh = move |_: MouseEvent| {
        if refresh_throttle.write().try_acquire(Instant::now()) {
            load.call(());
        }
    };

    let state = grid();
    let visible = visible_columns(&columns, &state);
    let page_rows = rows();
    let rendered = render_rows(&visible, &page_rows);
    let subtotals = page_subtotals(&visible, &page_rows);
    let filter = draft();
    let currency_options: Vec<DropdownOption> = std::iter::once(DropdownOption {
        value: String::new(),
        label: "All currencies".to_string(),
    })
    .chain(CURRENCIES.iter().map(|code| DropdownOption {
        value: code.to_string(),
        label: code.to_string(),
    }))
    .collect();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 10px; flex: 1; min-height: 0;",
            h2 { style: "margin: 0;", "{kind.title()}" }
            div {
                style: toolbar_style(),
                for field in fields.iter().copied() {
                    {match field {
                        FilterField::DateRange => rsx! {
                            label { "From" }
                            input {
                                style: input_style(),
                                r#type: "date",
                                value: "{date_value(filter.date_from)}",
                                onchange: move |event| draft.write().date_from = parse_date(&event.value()),
                            }
                            label { "To" }
                            input {
                                style: input_style(),
                                r#type: "date",
                                value: "{date_value(filter.date_to)}",
                                onchange: move |event| draft.write().date_to = parse_date(&event.value()),
                            }
                        },
                        FilterField::Provider => rsx! {
                            input {
                                style: input_style(),
                                placeholder: "Provider",
                                value: "{filter.provider}",
                                oninput: move |event| draft.write().provider = event.value(),
                            }
                        },
                        FilterField::Search => rsx! {
                            input {
                                style: input_style(),
                                placeholder: "Search",
                                value: "{filter.search}",
                                oninput: on_search.clone(),
                            }
                        },
                        FilterField::Currency => rsx! {
                            DropdownSelect {
                                menu_id: "report-currency",
                                label: "Currency",
                                options: currency_options.clone(),
                                selected: Some(filter.currency.clone()),
                                on_select: move |value: String| draft.write().currency = value,
                            }
                        },
                        FilterField::PlayerId => rsx! {
                            input {
                                style: input_style(),
                                placeholder: "Player id",
                                value: "{filter.player_id}",
                                oninput: move |event| draft.write().player_id = event.value(),
                            }
                        },
                        FilterField::RoundId => rsx! {
                            input {
                                style: input_style(),
                                placeholder: "Round id",
                                value: "{filter.round_id}",
                                oninput: move |event| draft.write().round_id = event.value(),
                            }
                        },
                    }}
                }
                button { style: primary_button_style(), onclick: move |_| apply(), "Apply" }
                button { style: button_style(), disabled: state.is_loading(), onclick: refresh, "Refresh" }
            }
            GridToolbar {
                menu_id: "report-columns",
                title: kind.title().to_string(),
                columns: columns.clone(),
                rows,
                grid,
            }
            DataTable {
                columns: visible,
                rows: rendered,
                subtotals,
                grid,
                on_query_change: move |_| load.call(()),
            }
            PaginationFooter { grid, on_query_change: move |_| load.call(()) }
        }
    }
}
