use dioxus::prelude::*;

use crate::app::AppContext;
use crate::ui::state::app_state::AppState;
use crate::ui::styles::{field_error_style, input_style, primary_button_style};

#[component]
pub fn Login() -> Element {
    let ctx = use_context::<AppContext>();
    let mut app_state = use_context::<AppState>();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |_: FormEvent| {
        if busy() {
            return;
        }
        let auth = ctx.auth.clone();
        let name = username();
        let secret = password();
        busy.set(true);
        error.set(None);
        spawn(async move {
            match auth.login(&name, &secret).await {
                Ok(user) => {
                    password.set(String::new());
                    app_state.user.set(Some(user));
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    };

    rsx! {
        div {
            style: "height: 100vh; display: flex; align-items: center; justify-content: center; font-family: sans-serif; background: #f4f6f8;",
            form {
                style: "background: #fff; padding: 24px; border-radius: 10px; box-shadow: 0 10px 24px rgba(0,0,0,0.1); display: flex; flex-direction: column; gap: 10px; width: 300px;",
                onsubmit: submit,
                h2 { style: "margin: 0 0 8px;", "Sign in" }
                input {
                    style: input_style(),
                    placeholder: "Username",
                    value: "{username}",
                    oninput: move |event| username.set(event.value()),
                }
                input {
                    style: input_style(),
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |event| password.set(event.value()),
                }
                if let Some(message) = error() {
                    span { style: field_error_style(), "{message}" }
                }
                button {
                    style: primary_button_style(),
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Signing in…" } else { "Sign in" }
                }
            }
        }
    }
}
