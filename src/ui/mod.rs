//! UI components and views.
//!
//! The gpui-based interface for the back-office console, organized into:
//! - `theme`: color schemes and styling
//! - `components`: reusable UI primitives
//! - `views`: the resource screens and the main window

pub mod components;
pub mod theme;
pub mod views;

pub use theme::{Theme, ThemeColors, ThemeMode};
pub use views::MainWindow;
