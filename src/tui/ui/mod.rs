pub mod app_state;
pub mod browser;
pub mod commands;
pub mod components;
pub mod events;
pub mod overlay;
pub mod renderer;
pub mod toast;
