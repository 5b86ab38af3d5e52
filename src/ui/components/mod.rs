//! Reusable UI components.
//!
//! This module contains atomic UI components used throughout the console.
//! Components are stateless renderers; draft values and focus markers live
//! in the owning views, and keyboard input is interpreted by [`TextBuffer`].

pub mod button;
pub mod input;
pub mod list;
pub mod text_buffer;

pub use button::{Button, ButtonSize, ButtonVariant, IconButton};
pub use input::{CheckField, FileField, InputSize, SelectField, TextField};
pub use list::{Badge, BadgeTone, EmptyState, ListHeader, LoadingState, VirtualizedListState};
pub use text_buffer::{InputMask, KeyInputResult, TextBuffer};
