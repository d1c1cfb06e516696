use dioxus::prelude::*;

use crate::domain::entities::admin::AdminResource;
use crate::domain::entities::report::ReportKind;
use crate::domain::entities::session::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Report(ReportKind),
    BetStatus,
    Admin(AdminResource),
    ProviderWizard,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Report(kind) => kind.title(),
            Screen::BetStatus => "Bet status",
            Screen::Admin(resource) => resource.title(),
            Screen::ProviderWizard => "New provider",
        }
    }

    pub fn navigation() -> Vec<Screen> {
        let mut screens = vec![Screen::Dashboard];
        screens.extend(ReportKind::all().into_iter().map(Screen::Report));
        screens.push(Screen::BetStatus);
        screens.extend(AdminResource::all().into_iter().map(Screen::Admin));
        screens.push(Screen::ProviderWizard);
        screens
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// UI-wide signals, provided once by `App` through the context.
#[derive(Clone, Copy)]
pub struct AppState {
    pub screen: Signal<Screen>,
    pub user: Signal<Option<User>>,
    pub notices: Signal<Vec<Notice>>,
    pub next_notice_id: Signal<u64>,
    pub open_menu: Signal<Option<String>>,
}

impl AppState {
    pub fn new(user: Option<User>) -> Self {
        Self {
            screen: use_signal(|| Screen::Dashboard),
            user: use_signal(move || user),
            notices: use_signal(Vec::<Notice>::new),
            next_notice_id: use_signal(|| 0_u64),
            open_menu: use_signal(|| None::<String>),
        }
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let id = *self.next_notice_id.peek() + 1;
        self.next_notice_id.set(id);
        let mut notices = self.notices.write();
        notices.push(Notice {
            id,
            level,
            message: message.into(),
        });
        let overflow = notices.len().saturating_sub(5);
        notices.drain(..overflow);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notify(NoticeLevel::Info, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(NoticeLevel::Error, message);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.write().retain(|notice| notice.id != id);
    }

    pub fn close_menus(&mut self) {
        if self.open_menu.peek().is_some() {
            self.open_menu.set(None);
        }
    }

    pub fn signed_out(&mut self) {
        self.user.set(None);
        self.screen.set(Screen::Dashboard);
    }
}
