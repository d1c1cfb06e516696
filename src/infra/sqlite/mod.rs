pub mod schema;
pub mod queries;
pub mod session_store;
