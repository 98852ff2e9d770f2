pub mod app;
pub mod board_widget;
pub mod theme;

pub use app::{run_app, App, AppAction};
pub use board_widget::BoardWidget;
pub use theme::Theme;
