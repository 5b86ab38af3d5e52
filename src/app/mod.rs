//! Application shell and lifecycle management.
//!
//! This module contains:
//! - Navigation state (`state.rs`)
//! - The command/event buses wiring the UI to the request worker
//!   (`events.rs`)
//! - Action definitions (inline via `gpui::actions!`)
//! - Keybinding registration and the gpui entry point

pub mod events;
pub mod state;

pub use events::{AppEvent, Command, CommandBus, EventBus, RequestKind, Resource};
pub use state::{NavSection, ResourceView};

use gpui::{actions, AppContext, Application, KeyBinding, WindowOptions};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::ui::MainWindow;

// Define application actions
actions!(
    karwan,
    [
        Quit,
        OpenCommandPalette,
        GoToBanks,
        GoToAirlines,
        GoToSectors,
        GoToFlights,
        GoToFlightPackages,
        GoToRoles,
        GoToUsers,
        GoToTestimonials,
        GoToTours,
        GoToVisas,
        GoToVouchers,
    ]
);

/// Main application entry point.
pub struct App;

impl App {
    /// Runs the gpui application. The command bus and event receiver come
    /// from the request worker started in `main`.
    pub fn run(commands: CommandBus, events: UnboundedReceiver<AppEvent>) -> anyhow::Result<()> {
        Application::new().run(move |cx: &mut gpui::App| {
            Self::register_keybindings(cx);

            cx.open_window(WindowOptions::default(), |window, cx| {
                cx.new(|cx| MainWindow::new(window, cx, commands, events))
            })
            .expect("Failed to open window");
        });

        Ok(())
    }

    /// Register global keybindings.
    fn register_keybindings(cx: &mut gpui::App) {
        // Navigation chords are only active while no form, confirm dialog
        // or search box owns the keyboard.
        let screens_ctx = Some("Screens");

        cx.bind_keys([
            // Always available
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("ctrl-q", Quit, None),
            KeyBinding::new("cmd-k", OpenCommandPalette, None),
            KeyBinding::new("ctrl-k", OpenCommandPalette, None),
            // Screen navigation chords
            KeyBinding::new("g b", GoToBanks, screens_ctx),
            KeyBinding::new("g a", GoToAirlines, screens_ctx),
            KeyBinding::new("g s", GoToSectors, screens_ctx),
            KeyBinding::new("g f", GoToFlights, screens_ctx),
            KeyBinding::new("g p", GoToFlightPackages, screens_ctx),
            KeyBinding::new("g r", GoToRoles, screens_ctx),
            KeyBinding::new("g u", GoToUsers, screens_ctx),
            KeyBinding::new("g t", GoToTestimonials, screens_ctx),
            KeyBinding::new("g o", GoToTours, screens_ctx),
            KeyBinding::new("g v", GoToVisas, screens_ctx),
            KeyBinding::new("g y", GoToVouchers, screens_ctx),
        ]);
    }
}
