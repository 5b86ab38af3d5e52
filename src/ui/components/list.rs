//! List primitives shared by the table screens.
//!
//! [`VirtualizedListState`] tracks scroll position and computes the range
//! of rows worth rendering; the state components cover the loading/empty
//! cases every list screen shares.

use gpui::{
    div, px, IntoElement, ParentElement, RenderOnce, SharedString, Styled,
};

use crate::ui::theme::ThemeColors;

/// Scroll/viewport bookkeeping for a fixed-row-height list.
#[derive(Debug, Clone)]
pub struct VirtualizedListState {
    /// Number of items in the list.
    pub item_count: usize,
    /// Height of one row in pixels.
    pub item_height: f32,
    /// Current scroll offset from the top.
    pub scroll_offset: f32,
    /// Visible viewport height.
    pub viewport_height: f32,
    /// Extra rows rendered above and below the viewport.
    pub buffer: usize,
}

impl VirtualizedListState {
    /// Creates state for `item_count` rows.
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            item_height: 40.0,
            scroll_offset: 0.0,
            viewport_height: 600.0,
            buffer: 4,
        }
    }

    /// Sets the row height.
    pub fn with_item_height(mut self, height: f32) -> Self {
        self.item_height = height;
        self
    }

    /// Sets the viewport height.
    pub fn with_viewport_height(mut self, height: f32) -> Self {
        self.viewport_height = height;
        self
    }

    /// Sets the render buffer.
    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    /// Total scrollable height.
    pub fn total_height(&self) -> f32 {
        self.item_count as f32 * self.item_height
    }

    /// Pixel offset of the row at `index`.
    pub fn item_offset(&self, index: usize) -> f32 {
        index as f32 * self.item_height
    }

    /// Scrolls by a pixel delta, clamped to content bounds.
    pub fn scroll_by(&mut self, delta: f32) {
        let max = (self.total_height() - self.viewport_height).max(0.0);
        self.scroll_offset = (self.scroll_offset + delta).clamp(0.0, max);
    }

    /// Scrolls the minimum amount needed to bring `index` into view.
    pub fn scroll_to_item(&mut self, index: usize) {
        let top = self.item_offset(index);
        let bottom = top + self.item_height;

        if top < self.scroll_offset {
            self.scroll_offset = top;
        } else if bottom > self.scroll_offset + self.viewport_height {
            self.scroll_offset = bottom - self.viewport_height;
        }
    }

    /// Range of row indices worth rendering, buffer included.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        if self.item_count == 0 || self.item_height <= 0.0 {
            return 0..0;
        }

        let first = (self.scroll_offset / self.item_height) as usize;
        let visible = (self.viewport_height / self.item_height).ceil() as usize + 1;

        let start = first.saturating_sub(self.buffer);
        let end = (first + visible + self.buffer).min(self.item_count);
        start..end
    }
}

/// Header row above a table: screen title plus a record count.
#[derive(IntoElement)]
pub struct ListHeader {
    title: SharedString,
    count: usize,
    refreshing: bool,
}

impl ListHeader {
    /// Creates a header.
    pub fn new(title: impl Into<SharedString>, count: usize) -> Self {
        Self {
            title: title.into(),
            count,
            refreshing: false,
        }
    }

    /// Shows a refresh-in-progress hint.
    pub fn refreshing(mut self, refreshing: bool) -> Self {
        self.refreshing = refreshing;
        self
    }
}

impl RenderOnce for ListHeader {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        let colors = ThemeColors::dark();
        let count_text = if self.refreshing {
            "refreshing…".to_string()
        } else {
            format!("{} records", self.count)
        };

        div()
            .px(px(16.0))
            .py(px(12.0))
            .flex()
            .items_center()
            .justify_between()
            .border_b_1()
            .border_color(colors.border)
            .child(
                div()
                    .text_color(colors.text_primary)
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .child(self.title),
            )
            .child(
                div()
                    .text_sm()
                    .text_color(colors.text_muted)
                    .child(SharedString::from(count_text)),
            )
    }
}

/// Centered empty-list placeholder.
#[derive(IntoElement)]
pub struct EmptyState {
    title: SharedString,
    hint: SharedString,
}

impl EmptyState {
    /// Creates an empty state.
    pub fn new(title: impl Into<SharedString>, hint: impl Into<SharedString>) -> Self {
        Self {
            title: title.into(),
            hint: hint.into(),
        }
    }
}

impl RenderOnce for EmptyState {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        let colors = ThemeColors::dark();

        div().flex_1().flex().items_center().justify_center().child(
            div()
                .flex()
                .flex_col()
                .items_center()
                .gap(px(8.0))
                .child(div().text_color(colors.text_primary).child(self.title))
                .child(
                    div()
                        .text_sm()
                        .text_color(colors.text_muted)
                        .child(self.hint),
                ),
        )
    }
}

/// Centered loading placeholder.
#[derive(IntoElement)]
pub struct LoadingState;

impl RenderOnce for LoadingState {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        let colors = ThemeColors::dark();

        div().flex_1().flex().items_center().justify_center().child(
            div()
                .text_color(colors.text_muted)
                .child(SharedString::from("Loading…")),
        )
    }
}

/// Tone of a [`Badge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Positive,
    Negative,
    Warning,
    Neutral,
}

/// Small status pill used in table rows.
#[derive(IntoElement)]
pub struct Badge {
    label: SharedString,
    tone: BadgeTone,
}

impl Badge {
    /// Creates a badge.
    pub fn new(label: impl Into<SharedString>, tone: BadgeTone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }
}

impl RenderOnce for Badge {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        let colors = ThemeColors::dark();
        let color = match self.tone {
            BadgeTone::Positive => colors.success,
            BadgeTone::Negative => colors.error,
            BadgeTone::Warning => colors.warning,
            BadgeTone::Neutral => colors.text_muted,
        };

        div()
            .px(px(6.0))
            .py(px(1.0))
            .rounded(px(4.0))
            .border_1()
            .border_color(color)
            .text_xs()
            .text_color(color)
            .child(self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_empty_range() {
        let state = VirtualizedListState::new(0);
        assert_eq!(state.visible_range(), 0..0);
        assert_eq!(state.total_height(), 0.0);
    }

    #[test]
    fn visible_range_tracks_scroll() {
        let mut state = VirtualizedListState::new(100)
            .with_item_height(40.0)
            .with_viewport_height(400.0)
            .with_buffer(2);

        let range = state.visible_range();
        assert_eq!(range.start, 0);
        assert!(range.end >= 10 && range.end <= 14);

        state.scroll_by(400.0);
        let range = state.visible_range();
        assert!(range.contains(&10));
        assert!(range.start >= 8);
    }

    #[test]
    fn scroll_clamps_to_bounds() {
        let mut state = VirtualizedListState::new(10)
            .with_item_height(40.0)
            .with_viewport_height(400.0);

        state.scroll_by(-100.0);
        assert_eq!(state.scroll_offset, 0.0);

        // Content fits in the viewport; no scrolling possible.
        state.scroll_by(10_000.0);
        assert_eq!(state.scroll_offset, 0.0);
    }

    #[test]
    fn scroll_to_item_brings_row_into_view() {
        let mut state = VirtualizedListState::new(50)
            .with_item_height(40.0)
            .with_viewport_height(200.0);

        state.scroll_to_item(20);
        let range = state.visible_range();
        assert!(range.contains(&20));

        state.scroll_to_item(0);
        assert_eq!(state.scroll_offset, 0.0);
    }
}
