use dioxus::prelude::*;

use crate::app::AppContext;
use crate::domain::entities::bet::{BetRecord, BetStatus};
use crate::ui::components::dropdown::{DropdownOption, DropdownSelect};
use crate::ui::render::format_number;
use crate::ui::state::app_state::AppState;
use crate::ui::styles::{field_error_style, input_style, primary_button_style, toolbar_style};
use crate::usecase::services::bet_service::BetError;

#[component]
pub fn BetStatusPage() -> Element {
    let ctx = use_context::<AppContext>();
    let mut app_state = use_context::<AppState>();
    let mut bet_id = use_signal(String::new);
    let mut bet = use_signal(|| None::<BetRecord>);
    let mut target = use_signal(|| None::<BetStatus>);
    let mut reason = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let find_bets = ctx.bets.clone();
    let find_session = ctx.session.clone();
    let lookup = move |_: MouseEvent| {
        if busy() {
            return;
        }
        let bets = find_bets.clone();
        let session = find_session.clone();
        let id = bet_id();
        busy.set(true);
        error.set(None);
        spawn(async move {
            match bets.find(&id).await {
                Ok(Some(found)) => {
                    target.set(None);
                    bet.set(Some(found));
                }
                Ok(None) => {
                    bet.set(None);
                    error.set(Some(format!("Bet {} not found", id.trim())));
                }
                Err(BetError::Api(err)) if session.handle_api_error(&err) => {
                    app_state.signed_out()
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    };

    let change_bets = ctx.bets.clone();
    let change_session = ctx.session.clone();
    let apply_change = move |_: MouseEvent| {
        let Some(current) = bet.peek().clone() else {
            return;
        };
        let Some(next) = *target.peek() else {
            error.set(Some("Choose a new status".to_string()));
            return;
        };
        let bets = change_bets.clone();
        let session = change_session.clone();
        let note = reason();
        busy.set(true);
        error.set(None);
        spawn(async move {
            match bets.change_status(&current, next, &note).await {
                Ok(updated) => {
                    app_state.info(format!(
                        "Bet {} is now {}",
                        updated.bet_id,
                        updated.status.label()
                    ));
                    reason.set(String::new());
                    target.set(None);
                    bet.set(Some(updated));
                }
                Err(BetError::Api(err)) if session.handle_api_error(&err) => {
                    app_state.signed_out()
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    };

    let record = bet();
    let status_options: Vec<DropdownOption> = record
        .as_ref()
        .map(|record| {
            record
                .status
                .allowed_transitions()
                .iter()
                .map(|status| DropdownOption {
                    value: status.label().to_string(),
                    label: status.label().to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 12px;",
            h2 { style: "margin: 0;", "Bet status" }
            div {
                style: toolbar_style(),
                input {
                    style: input_style(),
                    placeholder: "Bet id",
                    value: "{bet_id}",
                    oninput: move |event| bet_id.set(event.value()),
                }
                button {
                    style: primary_button_style(),
                    disabled: busy(),
                    onclick: lookup,
                    "Look up"
                }
            }
            if let Some(message) = error() {
                span { style: field_error_style(), "{message}" }
            }
            if let Some(record) = record {
                table {
                    style: "border-collapse: collapse; max-width: 520px;",
                    tbody {
                        tr { th { style: "text-align: left; padding: 4px 12px 4px 0;", "Bet" } td { "{record.bet_id}" } }
                        tr { th { style: "text-align: left; padding: 4px 12px 4px 0;", "Round" } td { "{record.round_id}" } }
                        tr { th { style: "text-align: left; padding: 4px 12px 4px 0;", "Player" } td { "{record.player_id}" } }
                        tr { th { style: "text-align: left; padding: 4px 12px 4px 0;", "Game" } td { "{record.game_name}" } }
                        tr { th { style: "text-align: left; padding: 4px 12px 4px 0;", "Amount" } td { "{format_number(record.amount, 2)} {record.currency}" } }
                        tr { th { style: "text-align: left; padding: 4px 12px 4px 0;", "Payout" } td { "{format_number(record.payout, 2)} {record.currency}" } }
                        tr { th { style: "text-align: left; padding: 4px 12px 4px 0;", "Status" } td { "{record.status.label()}" } }
                        if let Some(created_at) = record.created_at.clone() {
                            tr { th { style: "text-align: left; padding: 4px 12px 4px 0;", "Placed" } td { "{created_at}" } }
                        }
                    }
                }
                if status_options.is_empty() {
                    p { "{record.status.label()} is final; no further changes are allowed." }
                } else {
                    div {
                        style: toolbar_style(),
                        DropdownSelect {
                            menu_id: "bet-status",
                            label: "New status",
                            options: status_options,
                            selected: target().map(|status| status.label().to_string()),
                            on_select: move |value: String| target.set(BetStatus::parse(&value)),
                        }
                        input {
                            style: format!("{} min-width: 260px;", input_style()),
                            placeholder: "Reason",
                            value: "{reason}",
                            oninput: move |event| reason.set(event.value()),
                        }
                        button {
                            style: primary_button_style(),
                            disabled: busy(),
                            onclick: apply_change,
                            "Change status"
                        }
                    }
                }
            }
        }
    }
}
