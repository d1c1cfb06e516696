pub mod components;
pub mod input;
pub mod pages;
pub mod pagination;
pub mod render;
pub mod state;
pub mod styles;
