//! Visas screen.
//!
//! View-only, like tours: visa offerings are maintained elsewhere and the
//! console only lists them with a read-only detail pane.

use gpui::{
    div, prelude::FluentBuilder, px, ClickEvent, Context, FontWeight, InteractiveElement,
    IntoElement, ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::app::events::{Command, CommandBus};
use crate::domain::Visa;
use crate::ui::components::{
    Badge, BadgeTone, EmptyState, KeyInputResult, ListHeader, LoadingState, TextBuffer,
    VirtualizedListState,
};
use crate::ui::theme::ThemeColors;

const ROW_HEIGHT: f32 = 40.0;

/// The visas list screen.
pub struct VisasScreen {
    colors: ThemeColors,
    commands: CommandBus,
    rows: Vec<Visa>,
    loading: bool,
    search: TextBuffer,
    search_active: bool,
    selected: usize,
    list_state: VirtualizedListState,
}

impl VisasScreen {
    /// Creates the screen.
    pub fn new(commands: CommandBus) -> Self {
        Self {
            colors: ThemeColors::dark(),
            commands,
            rows: Vec::new(),
            loading: false,
            search: TextBuffer::new(),
            search_active: false,
            selected: 0,
            list_state: VirtualizedListState::new(0).with_item_height(ROW_HEIGHT),
        }
    }

    /// Marks a fetch as in flight.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Replaces the rows after a successful fetch.
    pub fn set_rows(&mut self, rows: Vec<Visa>) {
        self.rows = rows;
        self.loading = false;
        self.clamp_selection();
    }

    /// A fetch failed: keep prior rows.
    pub fn fetch_failed(&mut self) {
        self.loading = false;
    }

    /// Rows passing the search filter (country or visa type).
    pub fn filtered_rows(&self) -> Vec<&Visa> {
        let needle = self.search.trimmed().to_lowercase();
        self.rows
            .iter()
            .filter(|visa| {
                needle.is_empty()
                    || visa.country.to_lowercase().contains(&needle)
                    || visa.visa_type.to_lowercase().contains(&needle)
            })
            .collect()
    }

    fn clamp_selection(&mut self) {
        let count = self.filtered_rows().len();
        self.list_state = VirtualizedListState::new(count).with_item_height(ROW_HEIGHT);
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    /// The visa shown in the detail pane.
    pub fn selected_visa(&self) -> Option<&Visa> {
        self.filtered_rows().get(self.selected).copied()
    }

    /// Re-runs the collection fetch.
    pub fn refresh(&mut self) {
        self.loading = true;
        self.commands.dispatch(Command::FetchVisas);
    }

    /// Whether the search box owns the keyboard right now.
    pub fn capture_keys(&self) -> bool {
        self.search_active
    }

    /// Routes a key press.
    pub fn handle_key(&mut self, key: &str, shift: bool, ctrl: bool, cmd: bool) -> bool {
        if self.search_active {
            match self.search.process_key(key, shift, ctrl, cmd) {
                KeyInputResult::TextChanged => {
                    self.selected = 0;
                    self.clamp_selection();
                    return true;
                }
                KeyInputResult::Consumed => return true,
                KeyInputResult::Submit => {
                    self.search_active = false;
                    return true;
                }
                KeyInputResult::Cancel => {
                    self.search.clear();
                    self.search_active = false;
                    self.clamp_selection();
                    return true;
                }
                KeyInputResult::Ignored => {}
            }
        }

        match key {
            "j" | "down" => {
                let count = self.filtered_rows().len();
                if self.selected + 1 < count {
                    self.selected += 1;
                    self.list_state.scroll_to_item(self.selected);
                }
                true
            }
            "k" | "up" => {
                if self.selected > 0 {
                    self.selected -= 1;
                    self.list_state.scroll_to_item(self.selected);
                }
                true
            }
            "r" => {
                self.refresh();
                true
            }
            "/" => {
                self.search_active = true;
                true
            }
            _ => false,
        }
    }

    fn render_detail(&self) -> impl IntoElement {
        let colors = self.colors;

        let content = match self.selected_visa() {
            Some(visa) => div()
                .p(px(16.0))
                .flex()
                .flex_col()
                .gap(px(12.0))
                .child(
                    div()
                        .font_weight(FontWeight::SEMIBOLD)
                        .text_color(colors.text_primary)
                        .child(SharedString::from(format!(
                            "{} — {}",
                            visa.country, visa.visa_type
                        ))),
                )
                .child(
                    div()
                        .flex()
                        .flex_col()
                        .gap(px(6.0))
                        .child(
                            div()
                                .text_sm()
                                .text_color(colors.text_secondary)
                                .child(SharedString::from(format!("Price: {:.0}", visa.price))),
                        )
                        .child(
                            div()
                                .text_sm()
                                .text_color(colors.text_secondary)
                                .child(SharedString::from(format!(
                                    "Processing: {} days",
                                    visa.processing_days
                                ))),
                        ),
                )
                .child(Badge::new(
                    visa.status.label(),
                    if visa.status.is_active() {
                        BadgeTone::Positive
                    } else {
                        BadgeTone::Negative
                    },
                ))
                .child(
                    div()
                        .pt(px(8.0))
                        .text_xs()
                        .text_color(colors.text_muted)
                        .child("Visa offerings are managed by the content pipeline."),
                )
                .into_any_element(),
            None => div()
                .p(px(16.0))
                .text_sm()
                .text_color(colors.text_muted)
                .child(SharedString::from("Select a visa to see its details"))
                .into_any_element(),
        };

        div()
            .w(px(300.0))
            .h_full()
            .border_l_1()
            .border_color(colors.border)
            .bg(colors.surface)
            .child(content)
    }
}

impl Render for VisasScreen {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let filtered: Vec<Visa> = self.filtered_rows().into_iter().cloned().collect();
        self.list_state.item_count = filtered.len();

        let visible_range = self.list_state.visible_range();
        let total_height = self.list_state.total_height();
        let colors = self.colors;
        let selected = self.selected;

        let rows: Vec<_> = filtered
            .iter()
            .enumerate()
            .filter(|(idx, _)| visible_range.contains(idx))
            .map(|(idx, visa)| {
                let offset = self.list_state.item_offset(idx);
                let index = idx;
                let hover_bg = colors.surface;
                let click_handler = cx.listener(move |this, _: &ClickEvent, _window, cx| {
                    this.selected = index;
                    cx.notify();
                });

                div()
                    .id(SharedString::from(format!("visa-{idx}")))
                    .absolute()
                    .left_0()
                    .right_0()
                    .top(px(offset))
                    .h(px(ROW_HEIGHT))
                    .px(px(16.0))
                    .flex()
                    .items_center()
                    .gap(px(12.0))
                    .bg(if idx == selected {
                        colors.surface_elevated
                    } else {
                        gpui::Hsla::transparent_black()
                    })
                    .border_b_1()
                    .border_color(colors.border)
                    .cursor_pointer()
                    .hover(move |style| style.bg(hover_bg))
                    .on_click(click_handler)
                    .child(
                        div()
                            .w(px(180.0))
                            .truncate()
                            .font_weight(FontWeight::MEDIUM)
                            .text_sm()
                            .text_color(colors.text_primary)
                            .child(SharedString::from(visa.country.clone())),
                    )
                    .child(
                        div()
                            .flex_1()
                            .truncate()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(visa.visa_type.clone())),
                    )
                    .child(
                        div()
                            .w(px(90.0))
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(format!("{:.0}", visa.price))),
                    )
                    .child(
                        div()
                            .w(px(80.0))
                            .text_sm()
                            .text_color(colors.text_muted)
                            .child(SharedString::from(format!("{}d", visa.processing_days))),
                    )
                    .child(div().w(px(90.0)).child(Badge::new(
                        visa.status.label(),
                        if visa.status.is_active() {
                            BadgeTone::Positive
                        } else {
                            BadgeTone::Negative
                        },
                    )))
                    .into_any_element()
            })
            .collect();

        let show_loading = self.loading && self.rows.is_empty();
        let show_empty = !self.loading && filtered.is_empty();
        let search_text = if self.search.is_empty() {
            "Search visas…".to_string()
        } else {
            self.search.text().to_string()
        };

        div()
            .id("visas-screen")
            .size_full()
            .flex()
            .child(
                div()
                    .flex_1()
                    .h_full()
                    .flex()
                    .flex_col()
                    .bg(colors.background)
                    .child(ListHeader::new("Visas", filtered.len()).refreshing(self.loading))
                    .child(
                        div()
                            .px(px(16.0))
                            .py(px(8.0))
                            .flex()
                            .items_center()
                            .gap(px(8.0))
                            .border_b_1()
                            .border_color(colors.border)
                            .child(
                                div()
                                    .id("visas-search")
                                    .w(px(260.0))
                                    .h(px(28.0))
                                    .px(px(10.0))
                                    .flex()
                                    .items_center()
                                    .gap(px(6.0))
                                    .bg(colors.surface)
                                    .border_1()
                                    .border_color(if self.search_active {
                                        colors.accent
                                    } else {
                                        colors.border
                                    })
                                    .rounded(px(6.0))
                                    .cursor_text()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.search_active = true;
                                        cx.notify();
                                    }))
                                    .child(
                                        div().text_xs().text_color(colors.text_muted).child("/"),
                                    )
                                    .child(
                                        div()
                                            .flex_1()
                                            .text_sm()
                                            .truncate()
                                            .text_color(if self.search.is_empty() {
                                                colors.text_muted
                                            } else {
                                                colors.text_primary
                                            })
                                            .child(SharedString::from(search_text)),
                                    ),
                            )
                            .child(div().flex_1())
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(colors.text_muted)
                                    .child("read-only"),
                            ),
                    )
                    .child(
                        div()
                            .flex_1()
                            .overflow_y_hidden()
                            .when(show_loading, |this| this.child(LoadingState))
                            .when(show_empty, |this| {
                                this.child(EmptyState::new(
                                    "No visas",
                                    "Visa offerings appear once published",
                                ))
                            })
                            .when(!show_loading && !show_empty, |this| {
                                this.child(
                                    div()
                                        .relative()
                                        .h(px(total_height))
                                        .w_full()
                                        .children(rows),
                                )
                            }),
                    ),
            )
            .child(self.render_detail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::CommandBus;
    use crate::domain::RecordStatus;
    use pretty_assertions::assert_eq;

    fn make_visa(id: &str, country: &str, visa_type: &str) -> Visa {
        Visa {
            id: crate::domain::VisaId::from(id),
            country: country.to_string(),
            visa_type: visa_type.to_string(),
            price: 45_000.0,
            processing_days: 10,
            status: RecordStatus::Active,
        }
    }

    fn screen() -> (VisasScreen, tokio::sync::mpsc::UnboundedReceiver<Command>) {
        let (bus, rx) = CommandBus::channel();
        (VisasScreen::new(bus), rx)
    }

    #[test]
    fn screen_is_read_only() {
        let (mut screen, mut rx) = screen();
        screen.set_rows(vec![make_visa("v-1", "Saudi Arabia", "Umrah")]);

        assert!(!screen.handle_key("n", false, false, false));
        assert!(!screen.handle_key("d", false, false, false));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn search_matches_type_and_country() {
        let (mut screen, _rx) = screen();
        screen.set_rows(vec![
            make_visa("v-1", "Saudi Arabia", "Umrah"),
            make_visa("v-2", "Turkey", "Visit"),
        ]);

        screen.search.set_text("umrah");
        assert_eq!(screen.filtered_rows().len(), 1);
        assert_eq!(screen.filtered_rows()[0].country, "Saudi Arabia");
    }

    #[test]
    fn failed_fetch_preserves_rows() {
        let (mut screen, _rx) = screen();
        screen.set_rows(vec![make_visa("v-1", "Saudi Arabia", "Umrah")]);
        screen.set_loading(true);
        screen.fetch_failed();
        assert_eq!(screen.filtered_rows().len(), 1);
    }
}
