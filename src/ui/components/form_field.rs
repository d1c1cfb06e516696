use dioxus::prelude::*;

use crate::domain::entities::form::{FieldKind, FieldSpec};
use crate::ui::styles::{field_error_style, input_style};

#[component]
pub fn FormField(
    field: FieldSpec,
    value: String,
    error: Option<String>,
    on_input: EventHandler<(String, String)>,
) -> Element {
    let key = field.key;
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.to_string()
    };

    let control = match field.kind.clone() {
        FieldKind::Select(choices) => rsx! {
            select {
                style: input_style(),
                value: "{value}",
                onchange: move |event| on_input.call((key.to_string(), event.value())),
                option { value: "", selected: value.is_empty(), "(select)" }
                for choice in choices {
                    option { key: "{choice}", value: "{choice}", selected: value == choice, "{choice}" }
                }
            }
        },
        FieldKind::Toggle => rsx! {
            input {
                r#type: "checkbox",
                checked: value == "true",
                onchange: move |event| {
                    let next = if event.checked() { "true" } else { "false" };
                    on_input.call((key.to_string(), next.to_string()));
                },
            }
        },
        kind => {
            let input_type = match kind {
                FieldKind::Email => "email",
                FieldKind::Password => "password",
                FieldKind::Number => "number",
                _ => "text",
            };
            rsx! {
                input {
                    style: input_style(),
                    r#type: input_type,
                    value: "{value}",
                    oninput: move |event| on_input.call((key.to_string(), event.value())),
                }
            }
        }
    };

    rsx! {
        label {
            style: "display: flex; flex-direction: column; gap: 4px; max-width: 360px;",
            span { "{label}" }
            {control}
            if let Some(error) = error {
                span { style: field_error_style(), "{error}" }
            }
        }
    }
}
