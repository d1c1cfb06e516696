use dioxus::prelude::*;

use crate::ui::state::app_state::{AppState, NoticeLevel};
use crate::ui::styles::{button_style, notice_style};

#[component]
pub fn Notifications() -> Element {
    let mut app_state = use_context::<AppState>();
    let notices = (app_state.notices)();

    rsx! {
        if !notices.is_empty() {
            div {
                style: "display: flex; flex-direction: column; gap: 6px;",
                for notice in notices {
                    div {
                        key: "{notice.id}",
                        style: notice_style(notice.level == NoticeLevel::Error),
                        span { style: "flex: 1;", "{notice.message}" }
                        button {
                            style: button_style(),
                            onclick: move |_| app_state.dismiss(notice.id),
                            "Dismiss"
                        }
                    }
                }
            }
        }
    }
}
