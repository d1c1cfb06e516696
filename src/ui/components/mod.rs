pub mod data_table;
pub mod dropdown;
pub mod form_field;
pub mod grid_toolbar;
pub mod notifications;
pub mod pagination_footer;
