//! User Interface module
//!
//! Terminal dashboard using ratatui.

pub mod app;
pub mod banner;
pub mod theme;

pub use app::{App, Screen};
pub use banner::Banners;
pub use theme::Theme;
