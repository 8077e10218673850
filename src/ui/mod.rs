//! egui/eframe user interface

mod app;
pub mod components;
mod state;
mod theme;

pub use app::ParleyApp;
pub use state::{AppState, DirectoryForm};
pub use theme::Theme;
