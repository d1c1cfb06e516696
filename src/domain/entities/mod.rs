pub mod admin;
pub mod bet;
pub mod column;
pub mod form;
pub mod grid;
pub mod report;
pub mod session;
pub mod wizard;
