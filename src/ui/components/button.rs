//! Button components.

use gpui::{
    div, prelude::FluentBuilder, px, ElementId, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, SharedString, Styled,
};

use crate::ui::theme::ThemeColors;

/// Visual weight of a button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Accent-colored call to action.
    #[default]
    Primary,
    /// Neutral surface button.
    Secondary,
    /// Destructive action.
    Danger,
    /// Borderless, text only.
    Ghost,
}

/// Button height options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    /// 24px height, used inside table rows.
    Small,
    /// 32px height.
    #[default]
    Medium,
}

/// A labeled push button.
#[derive(IntoElement)]
pub struct Button {
    id: ElementId,
    label: SharedString,
    variant: ButtonVariant,
    size: ButtonSize,
    disabled: bool,
    shortcut: Option<SharedString>,
}

impl Button {
    /// Create a new button.
    pub fn new(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            variant: ButtonVariant::Primary,
            size: ButtonSize::Medium,
            disabled: false,
            shortcut: None,
        }
    }

    /// Set the variant.
    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the size.
    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    /// Disable the button.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Show a keyboard shortcut hint.
    pub fn shortcut(mut self, shortcut: impl Into<SharedString>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    fn height(&self) -> f32 {
        match self.size {
            ButtonSize::Small => 24.0,
            ButtonSize::Medium => 32.0,
        }
    }
}

impl RenderOnce for Button {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        let colors = ThemeColors::dark();

        let (bg, text_color) = match self.variant {
            ButtonVariant::Primary => (colors.accent, colors.background),
            ButtonVariant::Secondary => (colors.surface_elevated, colors.text_primary),
            ButtonVariant::Danger => (colors.error, colors.background),
            ButtonVariant::Ghost => (gpui::Hsla::transparent_black(), colors.text_secondary),
        };

        let opacity = if self.disabled { 0.5 } else { 1.0 };
        let height = self.height();

        div()
            .id(self.id)
            .h(px(height))
            .px(px(12.0))
            .flex()
            .items_center()
            .gap(px(8.0))
            .bg(bg)
            .rounded(px(6.0))
            .opacity(opacity)
            .cursor_pointer()
            .text_sm()
            .text_color(text_color)
            .child(self.label)
            .when_some(self.shortcut, |this, shortcut| {
                this.child(
                    div()
                        .px(px(4.0))
                        .rounded(px(3.0))
                        .bg(gpui::rgba(0x00000033))
                        .text_xs()
                        .child(shortcut),
                )
            })
    }
}

/// A square icon-only button (glyph rendered as text).
#[derive(IntoElement)]
pub struct IconButton {
    id: ElementId,
    glyph: SharedString,
    danger: bool,
}

impl IconButton {
    /// Create a new icon button.
    pub fn new(id: impl Into<ElementId>, glyph: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            glyph: glyph.into(),
            danger: false,
        }
    }

    /// Tint the glyph with the error color.
    pub fn danger(mut self, danger: bool) -> Self {
        self.danger = danger;
        self
    }
}

impl RenderOnce for IconButton {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        let colors = ThemeColors::dark();
        let text_color = if self.danger {
            colors.error
        } else {
            colors.text_secondary
        };

        div()
            .id(self.id)
            .size(px(24.0))
            .flex()
            .items_center()
            .justify_center()
            .rounded(px(4.0))
            .cursor_pointer()
            .hover(|style| style.bg(ThemeColors::dark().surface_elevated))
            .text_sm()
            .text_color(text_color)
            .child(self.glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_builder() {
        let button = Button::new("save", "Save")
            .variant(ButtonVariant::Danger)
            .size(ButtonSize::Small)
            .disabled(true)
            .shortcut("enter");

        assert_eq!(button.label.as_ref(), "Save");
        assert_eq!(button.variant, ButtonVariant::Danger);
        assert_eq!(button.height(), 24.0);
        assert!(button.disabled);
        assert!(button.shortcut.is_some());
    }

    #[test]
    fn default_button_is_medium_primary() {
        let button = Button::new("ok", "OK");
        assert_eq!(button.variant, ButtonVariant::Primary);
        assert_eq!(button.height(), 32.0);
    }
}
