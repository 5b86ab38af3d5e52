//! Testimonials moderation screen.
//!
//! Customer reviews arrive as Pending and are approved or rejected with
//! one-key actions; approved entries can be featured on the public site
//! and given a company response. All transitions are backend-driven: the
//! screen only requests them and re-fetches.

use gpui::{
    div, prelude::FluentBuilder, px, ClickEvent, Context, FontWeight, InteractiveElement,
    IntoElement, ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::app::events::{Command, CommandBus, RequestKind};
use crate::domain::{ModerationStatus, Testimonial, TestimonialId, TestimonialPayload};
use crate::ui::components::{
    Badge, BadgeTone, Button, ButtonVariant, EmptyState, KeyInputResult, ListHeader, LoadingState,
    TextBuffer, VirtualizedListState,
};
use crate::ui::theme::ThemeColors;
use crate::ui::views::form::FormPhase;

const ROW_HEIGHT: f32 = 56.0;

fn status_tone(status: ModerationStatus) -> BadgeTone {
    match status {
        ModerationStatus::Pending => BadgeTone::Warning,
        ModerationStatus::Approved => BadgeTone::Positive,
        ModerationStatus::Rejected => BadgeTone::Negative,
    }
}

/// Star rating rendered as text.
fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Company-response editor for one testimonial.
pub struct ResponseForm {
    id: TestimonialId,
    phase: FormPhase,
    response: TextBuffer,
    error: Option<String>,
}

impl ResponseForm {
    fn open(testimonial: &Testimonial) -> Self {
        Self {
            id: testimonial.id.clone(),
            phase: FormPhase::Ready,
            response: TextBuffer::with_text(
                testimonial.company_response.clone().unwrap_or_default(),
            ),
            error: None,
        }
    }

    /// Moves to `Submitting` and returns the save command. An empty
    /// response clears the stored one.
    pub fn submit(&mut self) -> Option<Command> {
        if self.phase != FormPhase::Ready {
            return None;
        }

        self.phase = FormPhase::Submitting;
        self.error = None;
        let text = self.response.trimmed().to_string();
        Some(Command::SaveTestimonialResponse {
            id: self.id.clone(),
            payload: TestimonialPayload {
                company_response: (!text.is_empty()).then_some(text),
            },
        })
    }

    /// Reopens the form after a rejected save.
    pub fn save_failed(&mut self, message: String) {
        self.phase = FormPhase::Ready;
        self.error = Some(message);
    }
}

/// The testimonials moderation screen.
pub struct TestimonialsScreen {
    colors: ThemeColors,
    commands: CommandBus,
    rows: Vec<Testimonial>,
    loading: bool,
    status_filter: Option<ModerationStatus>,
    selected: usize,
    list_state: VirtualizedListState,
    form: Option<ResponseForm>,
    pending_delete: Option<TestimonialId>,
}

impl TestimonialsScreen {
    /// Creates the screen.
    pub fn new(commands: CommandBus) -> Self {
        Self {
            colors: ThemeColors::dark(),
            commands,
            rows: Vec::new(),
            loading: false,
            status_filter: None,
            selected: 0,
            list_state: VirtualizedListState::new(0).with_item_height(ROW_HEIGHT),
            form: None,
            pending_delete: None,
        }
    }

    /// Marks a fetch as in flight.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Replaces the rows after a successful fetch.
    pub fn set_rows(&mut self, rows: Vec<Testimonial>) {
        self.rows = rows;
        self.loading = false;
        self.clamp_selection();
    }

    /// A fetch failed: keep prior rows.
    pub fn fetch_failed(&mut self) {
        self.loading = false;
    }

    /// A mutation went through.
    pub fn on_mutation(&mut self, kind: RequestKind) {
        if kind == RequestKind::Save {
            self.form = None;
        }
    }

    /// A save was rejected.
    pub fn save_failed(&mut self, message: String) {
        if let Some(form) = &mut self.form {
            form.save_failed(message);
        }
    }

    /// Rows passing the status filter.
    pub fn filtered_rows(&self) -> Vec<&Testimonial> {
        self.rows
            .iter()
            .filter(|t| {
                self.status_filter
                    .map(|status| t.status == status)
                    .unwrap_or(true)
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

    fn selected_testimonial(&self) -> Option<&Testimonial> {
        self.filtered_rows().get(self.selected).copied()
    }

    /// Re-runs the collection fetch.
    pub fn refresh(&mut self) {
        self.loading = true;
        self.commands.dispatch(Command::FetchTestimonials);
    }

    /// Requests approval for the selected testimonial.
    pub fn approve_selected(&mut self) {
        self.request_status(ModerationStatus::Approved);
    }

    /// Requests rejection for the selected testimonial.
    pub fn reject_selected(&mut self) {
        self.request_status(ModerationStatus::Rejected);
    }

    fn request_status(&mut self, status: ModerationStatus) {
        if let Some(t) = self.selected_testimonial() {
            if t.status != status {
                self.commands.dispatch(Command::SetTestimonialStatus {
                    id: t.id.clone(),
                    status,
                });
            }
        }
    }

    /// Requests the opposite featured flag for the selected testimonial.
    pub fn toggle_featured(&mut self) {
        if let Some(t) = self.selected_testimonial() {
            self.commands.dispatch(Command::SetTestimonialFeatured {
                id: t.id.clone(),
                featured: !t.featured,
            });
        }
    }

    /// Opens the company-response editor for the selected testimonial.
    pub fn open_response(&mut self) {
        if let Some(t) = self.selected_testimonial() {
            self.form = Some(ResponseForm::open(t));
        }
    }

    /// Asks for delete confirmation.
    pub fn request_delete(&mut self) {
        self.pending_delete = self.selected_testimonial().map(|t| t.id.clone());
    }

    /// Confirms the pending delete.
    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.commands.dispatch(Command::DeleteTestimonial(id));
        }
    }

    /// Declines the pending delete.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Cycles the status filter: all -> pending -> approved -> rejected.
    pub fn cycle_status_filter(&mut self) {
        self.status_filter = match self.status_filter {
            None => Some(ModerationStatus::Pending),
            Some(ModerationStatus::Pending) => Some(ModerationStatus::Approved),
            Some(ModerationStatus::Approved) => Some(ModerationStatus::Rejected),
            Some(ModerationStatus::Rejected) => None,
        };
        self.selected = 0;
        self.clamp_selection();
    }

    /// Whether an overlay owns the keyboard right now.
    pub fn capture_keys(&self) -> bool {
        self.form.is_some() || self.pending_delete.is_some()
    }

    /// Routes a key press.
    pub fn handle_key(&mut self, key: &str, shift: bool, ctrl: bool, cmd: bool) -> bool {
        if self.pending_delete.is_some() {
            return match key {
                "enter" | "y" => {
                    self.confirm_delete();
                    true
                }
                "escape" | "n" => {
                    self.cancel_delete();
                    true
                }
                _ => true,
            };
        }

        if let Some(form) = &mut self.form {
            return match key {
                "escape" => {
                    self.form = None;
                    true
                }
                "enter" if ctrl || cmd => {
                    if let Some(command) = form.submit() {
                        self.commands.dispatch(command);
                    }
                    true
                }
                "enter" => {
                    form.response.insert_char('\n');
                    true
                }
                _ => !matches!(
                    form.response.process_key(key, shift, ctrl, cmd),
                    KeyInputResult::Ignored
                ),
            };
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
            "a" => {
                self.approve_selected();
                true
            }
            "x" => {
                self.reject_selected();
                true
            }
            "s" => {
                self.toggle_featured();
                true
            }
            "enter" | "e" => {
                self.open_response();
                true
            }
            "d" => {
                self.request_delete();
                true
            }
            "f" => {
                self.cycle_status_filter();
                true
            }
            "r" => {
                self.refresh();
                true
            }
            _ => false,
        }
    }

    fn render_form(&self, form: &ResponseForm, _cx: &mut Context<Self>) -> impl IntoElement {
        let colors = self.colors;
        let submitting = form.phase == FormPhase::Submitting;
        let text = if form.response.is_empty() {
            "Write a public reply…".to_string()
        } else {
            form.response.text().to_string()
        };

        div()
            .id("testimonial-form-overlay")
            .absolute()
            .inset_0()
            .bg(gpui::rgba(0x00000080))
            .flex()
            .items_start()
            .justify_center()
            .pt(px(80.0))
            .child(
                div()
                    .w(px(520.0))
                    .bg(colors.surface)
                    .border_1()
                    .border_color(colors.border)
                    .rounded(px(12.0))
                    .overflow_hidden()
                    .child(
                        div()
                            .px(px(16.0))
                            .py(px(12.0))
                            .border_b_1()
                            .border_color(colors.border)
                            .font_weight(FontWeight::SEMIBOLD)
                            .text_color(colors.text_primary)
                            .child(SharedString::from("Company Response")),
                    )
                    .child(
                        div()
                            .p(px(16.0))
                            .child(
                                div()
                                    .min_h(px(96.0))
                                    .p(px(12.0))
                                    .bg(colors.background)
                                    .border_1()
                                    .border_color(colors.accent)
                                    .rounded(px(6.0))
                                    .text_sm()
                                    .text_color(if form.response.is_empty() {
                                        colors.text_muted
                                    } else {
                                        colors.text_primary
                                    })
                                    .child(SharedString::from(text)),
                            )
                            .when_some(form.error.clone(), |this, error| {
                                this.child(
                                    div()
                                        .pt(px(8.0))
                                        .text_sm()
                                        .text_color(colors.error)
                                        .child(SharedString::from(error)),
                                )
                            }),
                    )
                    .child(
                        div()
                            .px(px(16.0))
                            .py(px(12.0))
                            .flex()
                            .justify_between()
                            .border_t_1()
                            .border_color(colors.border)
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(colors.text_muted)
                                    .child("empty reply clears the response · esc: discard"),
                            )
                            .child(
                                Button::new(
                                    "testimonial-form-save",
                                    if submitting { "Saving…" } else { "Save" },
                                )
                                .disabled(submitting)
                                .shortcut("ctrl-enter"),
                            ),
                    ),
            )
    }

    fn render_confirm(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let colors = self.colors;
        let customer = self
            .pending_delete
            .as_ref()
            .and_then(|id| self.rows.iter().find(|t| t.id == *id))
            .map(|t| t.customer_name.clone())
            .unwrap_or_default();

        div()
            .id("testimonial-confirm-overlay")
            .absolute()
            .inset_0()
            .bg(gpui::rgba(0x00000080))
            .flex()
            .items_center()
            .justify_center()
            .child(
                div()
                    .w(px(380.0))
                    .p(px(16.0))
                    .bg(colors.surface)
                    .border_1()
                    .border_color(colors.border)
                    .rounded(px(12.0))
                    .flex()
                    .flex_col()
                    .gap(px(12.0))
                    .child(
                        div()
                            .font_weight(FontWeight::SEMIBOLD)
                            .text_color(colors.text_primary)
                            .child(SharedString::from("Delete testimonial?")),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(format!(
                                "The review from {customer} will be permanently removed."
                            ))),
                    )
                    .child(
                        div()
                            .flex()
                            .justify_between()
                            .child(
                                div()
                                    .id("testimonial-confirm-cancel")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.cancel_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("testimonial-confirm-cancel-button", "Cancel")
                                            .variant(ButtonVariant::Secondary)
                                            .shortcut("esc"),
                                    ),
                            )
                            .child(
                                div()
                                    .id("testimonial-confirm-delete")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.confirm_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("testimonial-confirm-delete-button", "Delete")
                                            .variant(ButtonVariant::Danger)
                                            .shortcut("enter"),
                                    ),
                            ),
                    ),
            )
    }
}

impl Render for TestimonialsScreen {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let filtered: Vec<Testimonial> = self.filtered_rows().into_iter().cloned().collect();
        self.list_state.item_count = filtered.len();

        let visible_range = self.list_state.visible_range();
        let total_height = self.list_state.total_height();
        let colors = self.colors;
        let selected = self.selected;

        let rows: Vec<_> = filtered
            .iter()
            .enumerate()
            .filter(|(idx, _)| visible_range.contains(idx))
            .map(|(idx, t)| {
                let offset = self.list_state.item_offset(idx);
                let index = idx;
                let hover_bg = colors.surface;
                let click_handler = cx.listener(move |this, _: &ClickEvent, _window, cx| {
                    this.selected = index;
                    cx.notify();
                });

                div()
                    .id(SharedString::from(format!("testimonial-{idx}")))
                    .absolute()
                    .left_0()
                    .right_0()
                    .top(px(offset))
                    .h(px(ROW_HEIGHT))
                    .px(px(16.0))
                    .py(px(8.0))
                    .flex()
                    .flex_col()
                    .gap(px(4.0))
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
                            .flex()
                            .items_center()
                            .gap(px(8.0))
                            .child(
                                div()
                                    .font_weight(FontWeight::MEDIUM)
                                    .text_sm()
                                    .text_color(colors.text_primary)
                                    .child(SharedString::from(t.customer_name.clone())),
                            )
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(colors.warning)
                                    .child(SharedString::from(stars(t.rating))),
                            )
                            .when(t.featured, |this| {
                                this.child(Badge::new("Featured", BadgeTone::Warning))
                            })
                            .child(div().flex_1())
                            .when(t.company_response.is_some(), |this| {
                                this.child(
                                    div()
                                        .text_xs()
                                        .text_color(colors.text_muted)
                                        .child(SharedString::from("replied")),
                                )
                            })
                            .child(Badge::new(t.status.label(), status_tone(t.status))),
                    )
                    .child(
                        div()
                            .text_sm()
                            .truncate()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(t.content.clone())),
                    )
                    .into_any_element()
            })
            .collect();

        let show_loading = self.loading && self.rows.is_empty();
        let show_empty = !self.loading && filtered.is_empty();
        let filter_label = match self.status_filter {
            None => "All",
            Some(status) => status.label(),
        };

        div()
            .id("testimonials-screen")
            .relative()
            .size_full()
            .flex()
            .flex_col()
            .bg(colors.background)
            .child(ListHeader::new("Testimonials", filtered.len()).refreshing(self.loading))
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
                            .id("testimonials-filter")
                            .h(px(28.0))
                            .px(px(10.0))
                            .flex()
                            .items_center()
                            .gap(px(6.0))
                            .bg(colors.surface)
                            .border_1()
                            .border_color(colors.border)
                            .rounded(px(6.0))
                            .cursor_pointer()
                            .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                this.cycle_status_filter();
                                cx.notify();
                            }))
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(colors.text_muted)
                                    .child("Status:"),
                            )
                            .child(
                                div()
                                    .text_sm()
                                    .text_color(colors.text_primary)
                                    .child(SharedString::from(filter_label.to_string())),
                            ),
                    )
                    .child(div().flex_1())
                    .child(
                        div()
                            .text_xs()
                            .text_color(colors.text_muted)
                            .child("a: approve · x: reject · s: feature · e: respond"),
                    ),
            )
            .child(
                div()
                    .flex_1()
                    .overflow_y_hidden()
                    .when(show_loading, |this| this.child(LoadingState))
                    .when(show_empty, |this| {
                        this.child(EmptyState::new(
                            "No testimonials",
                            "Customer reviews will appear here for moderation",
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
            )
            .when(self.form.is_some(), |this| {
                let form = self.form.as_ref().unwrap();
                this.child(self.render_form(form, cx))
            })
            .when(self.pending_delete.is_some(), |this| {
                this.child(self.render_confirm(cx))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::CommandBus;
    use pretty_assertions::assert_eq;

    fn make_testimonial(id: &str, status: ModerationStatus, featured: bool) -> Testimonial {
        Testimonial {
            id: TestimonialId::from(id),
            customer_name: "Sana".to_string(),
            rating: 5,
            content: "Smooth Umrah booking, highly recommended".to_string(),
            status,
            featured,
            company_response: None,
        }
    }

    fn screen() -> (
        TestimonialsScreen,
        tokio::sync::mpsc::UnboundedReceiver<Command>,
    ) {
        let (bus, rx) = CommandBus::channel();
        (TestimonialsScreen::new(bus), rx)
    }

    #[test]
    fn approve_requests_backend_transition() {
        let (mut screen, mut rx) = screen();
        screen.set_rows(vec![make_testimonial("t-1", ModerationStatus::Pending, false)]);

        screen.handle_key("a", false, false, false);
        match rx.try_recv().unwrap() {
            Command::SetTestimonialStatus { id, status } => {
                assert_eq!(id.as_str(), "t-1");
                assert_eq!(status, ModerationStatus::Approved);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn approving_an_approved_entry_sends_nothing() {
        let (mut screen, mut rx) = screen();
        screen.set_rows(vec![make_testimonial(
            "t-1",
            ModerationStatus::Approved,
            false,
        )]);

        screen.handle_key("a", false, false, false);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn featured_toggle_inverts_flag() {
        let (mut screen, mut rx) = screen();
        screen.set_rows(vec![make_testimonial("t-1", ModerationStatus::Approved, true)]);

        screen.handle_key("s", false, false, false);
        match rx.try_recv().unwrap() {
            Command::SetTestimonialFeatured { featured, .. } => assert!(!featured),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn response_form_clears_on_empty_text() {
        let (mut screen, mut rx) = screen();
        let mut t = make_testimonial("t-1", ModerationStatus::Approved, false);
        t.company_response = Some("Thank you!".to_string());
        screen.set_rows(vec![t]);

        screen.handle_key("e", false, false, false);
        {
            let form = screen.form.as_mut().unwrap();
            form.response.clear();
        }
        screen.handle_key("enter", false, true, false);

        match rx.try_recv().unwrap() {
            Command::SaveTestimonialResponse { payload, .. } => {
                assert_eq!(payload.company_response, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn status_filter_cycles_through_all_states() {
        let (mut screen, _rx) = screen();
        screen.set_rows(vec![
            make_testimonial("t-1", ModerationStatus::Pending, false),
            make_testimonial("t-2", ModerationStatus::Approved, false),
            make_testimonial("t-3", ModerationStatus::Rejected, false),
        ]);

        screen.cycle_status_filter();
        assert_eq!(screen.filtered_rows().len(), 1);
        assert_eq!(screen.filtered_rows()[0].status, ModerationStatus::Pending);

        screen.cycle_status_filter();
        assert_eq!(screen.filtered_rows()[0].status, ModerationStatus::Approved);

        screen.cycle_status_filter();
        assert_eq!(screen.filtered_rows()[0].status, ModerationStatus::Rejected);

        screen.cycle_status_filter();
        assert_eq!(screen.filtered_rows().len(), 3);
    }

    #[test]
    fn stars_render_out_of_five() {
        assert_eq!(stars(5), "★★★★★");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(0), "☆☆☆☆☆");
    }

    #[test]
    fn delete_needs_confirmation() {
        let (mut screen, mut rx) = screen();
        screen.set_rows(vec![make_testimonial("t-1", ModerationStatus::Rejected, false)]);

        screen.handle_key("d", false, false, false);
        screen.handle_key("escape", false, false, false);
        assert!(rx.try_recv().is_err());
    }
}
