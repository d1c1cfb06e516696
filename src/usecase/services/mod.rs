pub mod admin_service;
pub mod auth_service;
pub mod bet_service;
pub mod report_service;
pub mod session_service;
