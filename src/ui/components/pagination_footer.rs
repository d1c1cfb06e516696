use dioxus::prelude::*;

use crate::config::PAGE_SIZE_OPTIONS;
use crate::domain::entities::grid::GridState;
use crate::ui::pagination::PaginationView;
use crate::ui::styles::{button_style, input_style, toolbar_style};

#[component]
pub fn PaginationFooter(mut grid: Signal<GridState>, on_query_change: EventHandler<()>) -> Element {
    let view = PaginationView::from_grid(&grid());
    let mut options: Vec<usize> = PAGE_SIZE_OPTIONS.to_vec();
    if !options.contains(&view.page_size) {
        options.push(view.page_size);
        options.sort_unstable();
    }

    rsx! {
        div {
            style: format!("{} justify-content: space-between;", toolbar_style()),
            span { "{view.range_label()}" }
            div {
                style: toolbar_style(),
                label { "Rows per page" }
                select {
                    style: input_style(),
                    value: "{view.page_size}",
                    onchange: move |event| {
                        let Ok(page_size) = event.value().parse::<usize>() else {
                            return;
                        };
                        if grid.write().set_page_size(page_size).is_ok() {
                            on_query_change.call(());
                        }
                    },
                    for size in options {
                        option { key: "{size}", value: "{size}", selected: size == view.page_size, "{size}" }
                    }
                }
                button {
                    style: button_style(),
                    disabled: !view.can_previous,
                    onclick: move |_| {
                        if grid.write().previous_page() {
                            on_query_change.call(());
                        }
                    },
                    "Previous"
                }
                span { "{view.page_label()}" }
                button {
                    style: button_style(),
                    disabled: !view.can_next,
                    onclick: move |_| {
                        if grid.write().next_page() {
                            on_query_change.call(());
                        }
                    },
                    "Next"
                }
            }
        }
    }
}
