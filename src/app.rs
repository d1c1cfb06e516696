use std::sync::Arc;

use anyhow::{Context, Result};
use dioxus::prelude::*;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::infra::http::client::ApiClient;
use crate::infra::sqlite::session_store::SqliteSessionStore;
use crate::ui::components::notifications::Notifications;
use crate::ui::pages::admin_page::AdminPage;
use crate::ui::pages::bet_status_page::BetStatusPage;
use crate::ui::pages::dashboard::Dashboard;
use crate::ui::pages::login::Login;
use crate::ui::pages::provider_wizard::ProviderWizard;
use crate::ui::pages::report_page::ReportPage;
use crate::ui::state::app_state::{AppState, Screen};
use crate::ui::styles::{
    button_style, main_panel_style, root_container_style, sidebar_link_style, sidebar_style,
};
use crate::usecase::services::admin_service::AdminService;
use crate::usecase::services::auth_service::AuthService;
use crate::usecase::services::bet_service::BetService;
use crate::usecase::services::report_service::ReportService;
use crate::usecase::services::session_service::SessionService;

pub const PROVIDER_WIZARD_FLAG: &str = "provider_wizard";

/// Services shared with every screen through the Dioxus context.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub session: Arc<SessionService>,
    pub auth: Arc<AuthService>,
    pub reports: Arc<ReportService>,
    pub admin: Arc<AdminService>,
    pub bets: Arc<BetService>,
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.session, &other.session)
    }
}

#[derive(Clone)]
pub enum Startup {
    Ready(AppContext),
    Failed(String),
}

pub fn bootstrap(config: AppConfig) -> Result<AppContext> {
    let store = Arc::new(SqliteSessionStore::new(config.session_db_path()));
    let session = Arc::new(SessionService::new(store, config.feature_flags.clone()));
    session.restore().with_context(|| {
        format!(
            "failed to open session store: {}",
            config.session_db_path().display()
        )
    })?;

    let client = Arc::new(
        ApiClient::new(&config.api_base_url, config.http_timeout, session.clone())
            .context("failed to build API client")?
            .with_retry_policy(config.retry),
    );
    info!(api = %config.api_base_url, page_size = config.page_size, "console ready");

    Ok(AppContext {
        auth: Arc::new(AuthService::new(client.clone(), session.clone())),
        reports: Arc::new(ReportService::new(client.clone())),
        admin: Arc::new(AdminService::new(client.clone(), client.clone())),
        bets: Arc::new(BetService::new(client)),
        session,
        config: Arc::new(config),
    })
}

#[component]
pub fn App() -> Element {
    match use_context::<Startup>() {
        Startup::Ready(ctx) => rsx! { Console { ctx } },
        Startup::Failed(message) => rsx! {
            div {
                style: "padding: 24px; font-family: sans-serif;",
                h2 { "Back-office console failed to start" }
                p { "{message}" }
            }
        },
    }
}

#[component]
fn Console(ctx: AppContext) -> Element {
    let restored_user = if ctx.session.is_authenticated() {
        ctx.session.user().unwrap_or_else(|err| {
            warn!(error = %err, "failed to read stored user");
            None
        })
    } else {
        None
    };
    use_context_provider(|| ctx.clone());
    let app_state = use_context_provider(|| AppState::new(restored_user));

    if (app_state.user)().is_none() {
        return rsx! { Login {} };
    }
    rsx! { Shell {} }
}

#[component]
fn Shell() -> Element {
    let ctx = use_context::<AppContext>();
    let mut app_state = use_context::<AppState>();
    let screen = (app_state.screen)();
    let username = (app_state.user)()
        .map(|user| user.username)
        .unwrap_or_default();
    let wizard_enabled = ctx.session.flag_enabled(PROVIDER_WIZARD_FLAG);
    let navigation: Vec<Screen> = Screen::navigation()
        .into_iter()
        .filter(|item| *item != Screen::ProviderWizard || wizard_enabled)
        .collect();

    let content = match screen {
        Screen::Dashboard => rsx! { Dashboard {} },
        Screen::Report(kind) => rsx! { ReportPage { key: "{kind:?}", kind } },
        Screen::BetStatus => rsx! { BetStatusPage {} },
        Screen::Admin(resource) => rsx! { AdminPage { key: "{resource:?}", resource } },
        Screen::ProviderWizard => rsx! { ProviderWizard {} },
    };

    rsx! {
        div {
            style: root_container_style(),
            onclick: move |_| app_state.close_menus(),
            nav {
                style: sidebar_style(),
                div {
                    style: "padding: 0 16px 12px; font-weight: 600;",
                    "Back office"
                }
                for item in navigation {
                    div {
                        key: "{item:?}",
                        style: sidebar_link_style(item == screen),
                        onclick: move |_| app_state.screen.set(item),
                        "{item.label()}"
                    }
                }
                div { style: "flex: 1;" }
                div {
                    style: "padding: 8px 16px; display: flex; flex-direction: column; gap: 6px;",
                    span { "{username}" }
                    button {
                        style: button_style(),
                        onclick: {
                            let auth = ctx.auth.clone();
                            move |_| {
                                if let Err(err) = auth.logout() {
                                    warn!(error = %err, "failed to clear session on logout");
                                }
                                app_state.signed_out();
                            }
                        },
                        "Sign out"
                    }
                }
            }
            main {
                style: main_panel_style(),
                Notifications {}
                {content}
            }
        }
    }
}
