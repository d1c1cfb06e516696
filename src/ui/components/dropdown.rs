use dioxus::prelude::*;

use crate::domain::entities::column::ColumnDef;
use crate::ui::state::app_state::AppState;
use crate::ui::styles::button_style;

#[derive(Clone, Debug, PartialEq)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

pub fn dropdown_label(options: &[DropdownOption], selected: Option<&str>) -> String {
    selected
        .and_then(|value| options.iter().find(|opt| opt.value == value))
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| "(none)".to_string())
}

/// Only one menu is open at a time; a click on the shell closes it.
#[component]
pub fn DropdownSelect(
    menu_id: &'static str,
    label: &'static str,
    options: Vec<DropdownOption>,
    selected: Option<String>,
    on_select: EventHandler<String>,
) -> Element {
    let mut open_menu = use_context::<AppState>().open_menu;
    let is_open = open_menu().as_deref() == Some(menu_id);
    let selected_label = dropdown_label(&options, selected.as_deref());

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            button {
                style: button_style(),
                onclick: move |event| {
                    event.stop_propagation();
                    open_menu.set(if is_open { None } else { Some(menu_id.to_string()) });
                },
                "{selected_label}"
            }
            if is_open {
                div {
                    style: "position: absolute; left: 0; top: 100%; min-width: 200px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200;",
                    onclick: move |event| event.stop_propagation(),
                    for opt in options.iter().cloned() {
                        div {
                            key: "{opt.value}",
                            style: if selected.as_deref() == Some(opt.value.as_str()) {
                                "padding: 8px 10px; cursor: pointer; background: #eef4ff;"
                            } else {
                                "padding: 8px 10px; cursor: pointer;"
                            },
                            onclick: move |_| {
                                on_select.call(opt.value.clone());
                                open_menu.set(None);
                            },
                            "{opt.label}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ColumnVisibilityDropdown(
    menu_id: &'static str,
    columns: Vec<ColumnDef>,
    hidden: Vec<String>,
    on_toggle: EventHandler<(String, bool)>,
) -> Element {
    let mut open_menu = use_context::<AppState>().open_menu;
    let is_open = open_menu().as_deref() == Some(menu_id);

    rsx! {
        div {
            style: "position: relative; display: inline-flex;",
            button {
                style: button_style(),
                onclick: move |event| {
                    event.stop_propagation();
                    open_menu.set(if is_open { None } else { Some(menu_id.to_string()) });
                },
                "Columns"
            }
            if is_open {
                div {
                    style: "position: absolute; right: 0; top: 100%; min-width: 220px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 6px;",
                    onclick: move |event| event.stop_propagation(),
                    for column in columns.iter().cloned() {
                        label {
                            key: "{column.id}",
                            style: "display: flex; align-items: center; gap: 8px; padding: 6px 4px; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked: !hidden.iter().any(|key| key == column.id),
                                onclick: {
                                    let visible = !hidden.iter().any(|key| key == column.id);
                                    move |_| on_toggle.call((column.id.to_string(), !visible))
                                },
                            }
                            span { "{column.header}" }
                        }
                    }
                }
            }
        }
    }
}
