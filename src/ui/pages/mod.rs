pub mod admin_page;
pub mod bet_status_page;
pub mod dashboard;
pub mod login;
pub mod provider_wizard;
pub mod report_page;
