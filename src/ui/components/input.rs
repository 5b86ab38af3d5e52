//! Form field components.
//!
//! Labeled inputs rendered inside the modal forms. All fields are
//! stateless renderers: the owning form holds the draft values and the
//! active-field marker, and keyboard input is processed by the parent
//! view's key handler.

use gpui::{
    div, prelude::FluentBuilder, px, ElementId, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, SharedString, Styled,
};

use crate::ui::theme::ThemeColors;

/// Input height options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputSize {
    /// Small input (28px height).
    Small,
    /// Medium input (32px height).
    #[default]
    Medium,
    /// Large input (40px height).
    Large,
}

impl InputSize {
    fn height(self) -> f32 {
        match self {
            InputSize::Small => 28.0,
            InputSize::Medium => 32.0,
            InputSize::Large => 40.0,
        }
    }
}

/// A labeled single-line text field.
#[derive(IntoElement)]
pub struct TextField {
    id: ElementId,
    label: SharedString,
    value: SharedString,
    placeholder: SharedString,
    size: InputSize,
    active: bool,
    error: bool,
    /// Render the value as bullets (passwords).
    concealed: bool,
}

impl TextField {
    /// Create a new text field.
    pub fn new(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: SharedString::default(),
            placeholder: SharedString::default(),
            size: InputSize::Medium,
            active: false,
            error: false,
            concealed: false,
        }
    }

    /// Set the current value.
    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the placeholder text.
    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the input size.
    pub fn size(mut self, size: InputSize) -> Self {
        self.size = size;
        self
    }

    /// Mark as the field currently receiving keystrokes.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Show error state.
    pub fn error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    /// Render the value concealed.
    pub fn concealed(mut self, concealed: bool) -> Self {
        self.concealed = concealed;
        self
    }
}

impl RenderOnce for TextField {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        let colors = ThemeColors::dark();

        let border_color = if self.error {
            colors.error
        } else if self.active {
            colors.accent
        } else {
            colors.border
        };

        let is_empty = self.value.is_empty();
        let display: SharedString = if is_empty {
            self.placeholder.clone()
        } else if self.concealed {
            SharedString::from("•".repeat(self.value.chars().count()))
        } else {
            self.value.clone()
        };

        let text_color = if is_empty {
            colors.text_muted
        } else {
            colors.text_primary
        };

        div()
            .flex()
            .flex_col()
            .gap(px(4.0))
            .child(
                div()
                    .text_xs()
                    .text_color(colors.text_secondary)
                    .child(self.label),
            )
            .child(
                div()
                    .id(self.id)
                    .h(px(self.size.height()))
                    .w_full()
                    .px(px(12.0))
                    .flex()
                    .items_center()
                    .bg(colors.surface)
                    .border_1()
                    .border_color(border_color)
                    .rounded(px(6.0))
                    .text_sm()
                    .text_color(text_color)
                    .cursor_text()
                    .child(display)
                    .when(self.active, |this| {
                        this.child(
                            div()
                                .text_color(colors.accent)
                                .child(SharedString::from("▏")),
                        )
                    }),
            )
    }
}

/// A labeled selector cycled with left/right keys.
#[derive(IntoElement)]
pub struct SelectField {
    id: ElementId,
    label: SharedString,
    value: SharedString,
    active: bool,
    error: bool,
}

impl SelectField {
    /// Create a new select field.
    pub fn new(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: SharedString::default(),
            active: false,
            error: false,
        }
    }

    /// Set the displayed selection.
    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.value = value.into();
        self
    }

    /// Mark as the active field.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Show error state.
    pub fn error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }
}

impl RenderOnce for SelectField {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        let colors = ThemeColors::dark();

        let border_color = if self.error {
            colors.error
        } else if self.active {
            colors.accent
        } else {
            colors.border
        };

        let is_empty = self.value.is_empty();
        let display: SharedString = if is_empty {
            SharedString::from("Select…")
        } else {
            self.value.clone()
        };

        div()
            .flex()
            .flex_col()
            .gap(px(4.0))
            .child(
                div()
                    .text_xs()
                    .text_color(colors.text_secondary)
                    .child(self.label),
            )
            .child(
                div()
                    .id(self.id)
                    .h(px(32.0))
                    .w_full()
                    .px(px(12.0))
                    .flex()
                    .items_center()
                    .justify_between()
                    .bg(colors.surface)
                    .border_1()
                    .border_color(border_color)
                    .rounded(px(6.0))
                    .cursor_pointer()
                    .child(
                        div()
                            .text_sm()
                            .text_color(if is_empty {
                                colors.text_muted
                            } else {
                                colors.text_primary
                            })
                            .child(display),
                    )
                    .child(
                        div()
                            .text_xs()
                            .text_color(colors.text_muted)
                            .child(SharedString::from(if self.active { "◂ ▸" } else { "▾" })),
                    ),
            )
    }
}

/// A labeled file picker display for logo uploads.
#[derive(IntoElement)]
pub struct FileField {
    id: ElementId,
    label: SharedString,
    file_name: Option<SharedString>,
    file_size: Option<usize>,
    active: bool,
    error: bool,
}

impl FileField {
    /// Create a new file field.
    pub fn new(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            file_name: None,
            file_size: None,
            active: false,
            error: false,
        }
    }

    /// Set the selected file.
    pub fn file(mut self, name: impl Into<SharedString>, size: usize) -> Self {
        self.file_name = Some(name.into());
        self.file_size = Some(size);
        self
    }

    /// Mark as the active field.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Show error state.
    pub fn error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }
}

impl RenderOnce for FileField {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        let colors = ThemeColors::dark();

        let border_color = if self.error {
            colors.error
        } else if self.active {
            colors.accent
        } else {
            colors.border
        };

        let display: SharedString = match (&self.file_name, self.file_size) {
            (Some(name), Some(size)) => {
                SharedString::from(format!("{} ({} KB)", name, size.div_ceil(1024)))
            }
            _ => SharedString::from("No file selected"),
        };

        let has_file = self.file_name.is_some();

        div()
            .flex()
            .flex_col()
            .gap(px(4.0))
            .child(
                div()
                    .text_xs()
                    .text_color(colors.text_secondary)
                    .child(self.label),
            )
            .child(
                div()
                    .id(self.id)
                    .h(px(32.0))
                    .w_full()
                    .px(px(12.0))
                    .flex()
                    .items_center()
                    .gap(px(8.0))
                    .bg(colors.surface)
                    .border_1()
                    .border_color(border_color)
                    .rounded(px(6.0))
                    .cursor_pointer()
                    .child(
                        div()
                            .text_xs()
                            .text_color(colors.text_muted)
                            .child(SharedString::from("⌲")),
                    )
                    .child(
                        div()
                            .flex_1()
                            .text_sm()
                            .truncate()
                            .text_color(if has_file {
                                colors.text_primary
                            } else {
                                colors.text_muted
                            })
                            .child(display),
                    ),
            )
    }
}

/// A toggleable checkbox row (role permissions, featured flags).
#[derive(IntoElement)]
pub struct CheckField {
    id: ElementId,
    label: SharedString,
    checked: bool,
    active: bool,
}

impl CheckField {
    /// Create a new check field.
    pub fn new(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            checked: false,
            active: false,
        }
    }

    /// Set the checked state.
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Mark as the focused row.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl RenderOnce for CheckField {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        let colors = ThemeColors::dark();

        div()
            .id(self.id)
            .h(px(28.0))
            .px(px(8.0))
            .flex()
            .items_center()
            .gap(px(8.0))
            .rounded(px(4.0))
            .cursor_pointer()
            .when(self.active, |this| this.bg(colors.surface_elevated))
            .child(
                div()
                    .size(px(14.0))
                    .flex()
                    .items_center()
                    .justify_center()
                    .border_1()
                    .border_color(if self.checked {
                        colors.accent
                    } else {
                        colors.border
                    })
                    .rounded(px(3.0))
                    .when(self.checked, |this| this.bg(colors.accent))
                    .child(
                        div()
                            .text_xs()
                            .text_color(colors.background)
                            .child(SharedString::from(if self.checked { "✓" } else { "" })),
                    ),
            )
            .child(
                div()
                    .text_sm()
                    .text_color(colors.text_primary)
                    .child(self.label),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_field_builder() {
        let field = TextField::new("name", "Bank Name")
            .value("Meezan")
            .placeholder("Enter bank name")
            .size(InputSize::Large)
            .active(true)
            .error(false);

        assert_eq!(field.value.as_ref(), "Meezan");
        assert_eq!(field.size, InputSize::Large);
        assert!(field.active);
        assert!(!field.error);
    }

    #[test]
    fn input_sizes() {
        assert_eq!(InputSize::Small.height(), 28.0);
        assert_eq!(InputSize::Medium.height(), 32.0);
        assert_eq!(InputSize::Large.height(), 40.0);
    }

    #[test]
    fn file_field_builder() {
        let field = FileField::new("logo", "Logo").file("meezan.png", 2048);
        assert_eq!(field.file_name.as_ref().unwrap().as_ref(), "meezan.png");
        assert_eq!(field.file_size, Some(2048));
    }

    #[test]
    fn check_field_builder() {
        let field = CheckField::new("perm", "flights:write")
            .checked(true)
            .active(true);
        assert!(field.checked);
        assert!(field.active);
    }
}
