use dioxus::prelude::*;
use tracing::warn;

use crate::app::AppContext;
use crate::domain::entities::admin::AdminResource;
use crate::domain::entities::wizard::{provider_onboarding_steps, MultiStepForm};
use crate::ui::components::form_field::FormField;
use crate::ui::state::app_state::{AppState, Screen};
use crate::ui::styles::{button_style, primary_button_style, toolbar_style};
use crate::usecase::services::admin_service::AdminError;
use crate::usecase::services::session_service::SessionService;

fn persist(session: &SessionService, form: &MultiStepForm) {
    if let Err(err) = session.save_draft(&form.draft()) {
        warn!(error = %err, "failed to save wizard draft");
    }
}

fn restore(session: &SessionService) -> MultiStepForm {
    match session.load_draft() {
        Ok(Some(draft)) => MultiStepForm::from_draft(provider_onboarding_steps(), draft),
        Ok(None) => {
            let mut form = MultiStepForm::new(provider_onboarding_steps());
            form.set_value("active", "true");
            form
        }
        Err(err) => {
            warn!(error = %err, "failed to load wizard draft");
            MultiStepForm::new(provider_onboarding_steps())
        }
    }
}

#[component]
pub fn ProviderWizard() -> Element {
    let ctx = use_context::<AppContext>();
    let mut app_state = use_context::<AppState>();
    let session = ctx.session.clone();
    let mut form = use_signal(move || restore(&session));
    let mut submitting = use_signal(|| false);

    let input_session = ctx.session.clone();
    let on_input = move |(key, value): (String, String)| {
        let mut state = form.write();
        state.set_value(&key, value);
        persist(&input_session, &state);
    };

    let next_session = ctx.session.clone();
    let next = move |_: MouseEvent| {
        let mut state = form.write();
        if state.next() {
            persist(&next_session, &state);
        }
    };

    let back_session = ctx.session.clone();
    let back = move |_: MouseEvent| {
        let mut state = form.write();
        if state.back() {
            persist(&back_session, &state);
        }
    };

    let cancel_session = ctx.session.clone();
    let cancel = move |_: MouseEvent| {
        if let Err(err) = cancel_session.clear_draft() {
            warn!(error = %err, "failed to clear wizard draft");
        }
        form.set(restore(&cancel_session));
    };

    let finish_admin = ctx.admin.clone();
    let finish_session = ctx.session.clone();
    let finish = move |_: MouseEvent| {
        if submitting() {
            return;
        }
        let values = {
            let mut state = form.write();
            let result = state.finish();
            persist(&finish_session, &state);
            match result {
                Ok(values) => values,
                Err(_) => return,
            }
        };
        let admin = finish_admin.clone();
        let session = finish_session.clone();
        submitting.set(true);
        spawn(async move {
            match admin.create(AdminResource::Providers, values).await {
                Ok(()) => {
                    if let Err(err) = session.clear_draft() {
                        warn!(error = %err, "failed to clear wizard draft");
                    }
                    app_state.info("Provider created");
                    app_state.screen.set(Screen::Admin(AdminResource::Providers));
                }
                Err(AdminError::Api(err)) if session.handle_api_error(&err) => {
                    app_state.signed_out()
                }
                Err(err) => app_state.error(format!("Provider not created: {err}")),
            }
            submitting.set(false);
        });
    };

    let state = form();
    let step_count = state.steps().len();
    let current = state.current_index();
    let step = state.current_step().cloned();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 12px; max-width: 520px;",
            h2 { style: "margin: 0;", "New provider" }
            div {
                style: "display: flex; gap: 12px;",
                for (idx, item) in state.steps().iter().enumerate() {
                    span {
                        key: "{idx}",
                        style: if idx == current { "font-weight: 700;" } else { "color: #888;" },
                        "{idx + 1}. {item.title}"
                    }
                }
            }
            if let Some(step) = step {
                for field in step.fields.iter() {
                    FormField {
                        key: "{field.key}",
                        value: state.value(field.key).to_string(),
                        error: state.errors().get(field.key).cloned(),
                        field: field.clone(),
                        on_input: on_input.clone(),
                    }
                }
            }
            div {
                style: toolbar_style(),
                button {
                    style: button_style(),
                    disabled: current == 0,
                    onclick: back,
                    "Back"
                }
                if current + 1 < step_count {
                    button { style: primary_button_style(), onclick: next, "Next" }
                } else {
                    button {
                        style: primary_button_style(),
                        disabled: submitting(),
                        onclick: finish,
                        "Create provider"
                    }
                }
                button { style: button_style(), onclick: cancel, "Discard draft" }
            }
        }
    }
}
