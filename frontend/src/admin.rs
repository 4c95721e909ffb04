pub mod api;
pub mod components;
pub mod errors;
pub mod forms;
pub mod pages;
pub mod search;
pub mod sidebar;
