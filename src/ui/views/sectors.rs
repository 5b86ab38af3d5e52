//! Sectors screen.
//!
//! Sector titles are normalized to the canonical `XXX-XXX` form before
//! submission, whatever shape the operator types them in.

use gpui::{
    div, prelude::FluentBuilder, px, ClickEvent, Context, FontWeight, InteractiveElement,
    IntoElement, ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::app::events::{Command, CommandBus, RequestKind};
use crate::domain::{
    sector::{is_valid_title, normalize_title},
    Sector, SectorId, SectorPayload,
};
use crate::ui::components::{
    Button, ButtonVariant, EmptyState, KeyInputResult, ListHeader, LoadingState, TextBuffer,
    TextField, VirtualizedListState,
};
use crate::ui::theme::ThemeColors;
use crate::ui::views::form::{require, FieldError, FormMode, FormPhase};

const ROW_HEIGHT: f32 = 40.0;

/// Fields of the sector form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectorField {
    Title,
    Name,
}

impl SectorField {
    fn other(self) -> Self {
        match self {
            SectorField::Title => SectorField::Name,
            SectorField::Name => SectorField::Title,
        }
    }
}

/// Draft state of the sector form.
pub struct SectorForm {
    mode: FormMode<SectorId>,
    phase: FormPhase,
    title: TextBuffer,
    name: TextBuffer,
    active_field: SectorField,
    error: Option<String>,
}

impl SectorForm {
    fn create() -> Self {
        Self {
            mode: FormMode::Create,
            phase: FormPhase::Ready,
            title: TextBuffer::new(),
            name: TextBuffer::new(),
            active_field: SectorField::Title,
            error: None,
        }
    }

    fn edit(id: SectorId) -> Self {
        Self {
            mode: FormMode::Edit(id),
            phase: FormPhase::Loading,
            ..Self::create()
        }
    }

    /// Loads the fetched record, normalizing the stored title.
    pub fn prefill(&mut self, sector: &Sector) {
        self.title.set_text(normalize_title(&sector.title));
        self.name.set_text(sector.name.clone());
        self.phase = FormPhase::Ready;
        self.active_field = SectorField::Title;
    }

    /// The normalized form of whatever is currently typed.
    pub fn normalized_title(&self) -> String {
        normalize_title(self.title.text())
    }

    fn validate(&self) -> Result<SectorPayload, FieldError> {
        require("Sector title", self.title.text())?;
        let title = self.normalized_title();
        if !is_valid_title(&title) {
            return Err(FieldError::new(
                "Sector title",
                "needs six letters, e.g. DXBJED becomes DXB-JED",
            ));
        }
        let name = require("Sector name", self.name.text())?;
        Ok(SectorPayload { title, name })
    }

    /// Validates, normalizes and moves to `Submitting` on success.
    pub fn submit(&mut self) -> Option<Command> {
        if self.phase != FormPhase::Ready {
            return None;
        }

        match self.validate() {
            Ok(payload) => {
                self.phase = FormPhase::Submitting;
                self.error = None;
                // The draft reflects what will actually be sent.
                self.title.set_text(payload.title.clone());
                Some(Command::SaveSector {
                    id: self.mode.record_id(),
                    payload,
                })
            }
            Err(err) => {
                self.error = Some(err.display());
                None
            }
        }
    }

    /// Reopens the form after a rejected save.
    pub fn save_failed(&mut self, message: String) {
        self.phase = FormPhase::Ready;
        self.error = Some(message);
    }

    fn active_buffer(&mut self) -> &mut TextBuffer {
        match self.active_field {
            SectorField::Title => &mut self.title,
            SectorField::Name => &mut self.name,
        }
    }
}

/// The sectors list screen.
pub struct SectorsScreen {
    colors: ThemeColors,
    commands: CommandBus,
    rows: Vec<Sector>,
    loading: bool,
    search: TextBuffer,
    search_active: bool,
    selected: usize,
    list_state: VirtualizedListState,
    form: Option<SectorForm>,
    pending_delete: Option<SectorId>,
}

impl SectorsScreen {
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
            form: None,
            pending_delete: None,
        }
    }

    /// Marks a fetch as in flight.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Replaces the rows after a successful fetch.
    pub fn set_rows(&mut self, rows: Vec<Sector>) {
        self.rows = rows;
        self.loading = false;
        self.clamp_selection();
    }

    /// A fetch failed: keep prior rows.
    pub fn fetch_failed(&mut self) {
        self.loading = false;
    }

    /// Applies the record detail an edit form is waiting for.
    pub fn apply_detail(&mut self, sector: &Sector) {
        if let Some(form) = &mut self.form {
            if form.phase == FormPhase::Loading
                && form.mode.record_id().as_ref() == Some(&sector.id)
            {
                form.prefill(sector);
            }
        }
    }

    /// The detail fetch failed; drop the half-open form.
    pub fn detail_failed(&mut self) {
        if self
            .form
            .as_ref()
            .is_some_and(|form| form.phase == FormPhase::Loading)
        {
            self.form = None;
        }
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

    /// Rows passing the search filter.
    pub fn filtered_rows(&self) -> Vec<&Sector> {
        let needle = self.search.trimmed().to_lowercase();
        self.rows
            .iter()
            .filter(|sector| {
                needle.is_empty()
                    || sector.title.to_lowercase().contains(&needle)
                    || sector.name.to_lowercase().contains(&needle)
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

    fn selected_sector(&self) -> Option<&Sector> {
        self.filtered_rows().get(self.selected).copied()
    }

    /// Re-runs the collection fetch.
    pub fn refresh(&mut self) {
        self.loading = true;
        self.commands.dispatch(Command::FetchSectors);
    }

    /// Opens an empty create form.
    pub fn open_create(&mut self) {
        self.form = Some(SectorForm::create());
    }

    /// Opens an edit form and fetches the record detail.
    pub fn open_edit(&mut self) {
        if let Some(sector) = self.selected_sector() {
            let id = sector.id.clone();
            self.form = Some(SectorForm::edit(id.clone()));
            self.commands.dispatch(Command::FetchSectorDetail(id));
        }
    }

    /// Asks for delete confirmation.
    pub fn request_delete(&mut self) {
        self.pending_delete = self.selected_sector().map(|sector| sector.id.clone());
    }

    /// Confirms the pending delete.
    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.commands.dispatch(Command::DeleteSector(id));
        }
    }

    /// Declines the pending delete.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Whether an overlay or search owns the keyboard right now.
    pub fn capture_keys(&self) -> bool {
        self.form.is_some() || self.pending_delete.is_some() || self.search_active
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
            if form.phase == FormPhase::Loading {
                if key == "escape" {
                    self.form = None;
                }
                return true;
            }

            return match key {
                "escape" => {
                    self.form = None;
                    true
                }
                "tab" => {
                    form.active_field = form.active_field.other();
                    true
                }
                "enter" if ctrl || cmd => {
                    if let Some(command) = form.submit() {
                        self.commands.dispatch(command);
                    }
                    true
                }
                "enter" => {
                    form.active_field = form.active_field.other();
                    true
                }
                _ => !matches!(
                    form.active_buffer().process_key(key, shift, ctrl, cmd),
                    KeyInputResult::Ignored
                ),
            };
        }

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
            "enter" => {
                self.open_edit();
                true
            }
            "n" => {
                self.open_create();
                true
            }
            "d" => {
                self.request_delete();
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

    fn render_form(&self, form: &SectorForm, _cx: &mut Context<Self>) -> impl IntoElement {
        let colors = self.colors;
        let title = if form.mode.is_edit() {
            "Edit Sector"
        } else {
            "New Sector"
        };
        let preview = form.normalized_title();

        let body = if form.phase == FormPhase::Loading {
            div()
                .p(px(24.0))
                .flex()
                .justify_center()
                .child(
                    div()
                        .text_color(colors.text_muted)
                        .child(SharedString::from("Loading record…")),
                )
                .into_any_element()
        } else {
            div()
                .p(px(16.0))
                .flex()
                .flex_col()
                .gap(px(12.0))
                .child(
                    TextField::new("sector-title", "Sector Title")
                        .value(form.title.text().to_string())
                        .placeholder("dxbjed")
                        .active(form.active_field == SectorField::Title),
                )
                .when(!preview.is_empty(), |this| {
                    this.child(
                        div()
                            .flex()
                            .items_center()
                            .gap(px(6.0))
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(colors.text_muted)
                                    .child("Will be saved as"),
                            )
                            .child(
                                div()
                                    .text_sm()
                                    .font_weight(FontWeight::SEMIBOLD)
                                    .text_color(colors.accent)
                                    .child(SharedString::from(preview)),
                            ),
                    )
                })
                .child(
                    TextField::new("sector-name", "Sector Name")
                        .value(form.name.text().to_string())
                        .placeholder("e.g. Dubai to Jeddah")
                        .active(form.active_field == SectorField::Name),
                )
                .when_some(form.error.clone(), |this, error| {
                    this.child(
                        div()
                            .text_sm()
                            .text_color(colors.error)
                            .child(SharedString::from(error)),
                    )
                })
                .into_any_element()
        };

        let submitting = form.phase == FormPhase::Submitting;

        div()
            .id("sector-form-overlay")
            .absolute()
            .inset_0()
            .bg(gpui::rgba(0x00000080))
            .flex()
            .items_start()
            .justify_center()
            .pt(px(60.0))
            .child(
                div()
                    .w(px(440.0))
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
                            .child(SharedString::from(title)),
                    )
                    .child(body)
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
                                    .child("tab: switch field · esc: discard"),
                            )
                            .child(
                                Button::new(
                                    "sector-form-save",
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
        let title = self
            .pending_delete
            .as_ref()
            .and_then(|id| self.rows.iter().find(|sector| sector.id == *id))
            .map(|sector| sector.title.clone())
            .unwrap_or_default();

        div()
            .id("sector-confirm-overlay")
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
                            .child(SharedString::from("Delete sector?")),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(format!(
                                "\"{title}\" will be permanently removed."
                            ))),
                    )
                    .child(
                        div()
                            .flex()
                            .justify_between()
                            .child(
                                div()
                                    .id("sector-confirm-cancel")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.cancel_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("sector-confirm-cancel-button", "Cancel")
                                            .variant(ButtonVariant::Secondary)
                                            .shortcut("esc"),
                                    ),
                            )
                            .child(
                                div()
                                    .id("sector-confirm-delete")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.confirm_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("sector-confirm-delete-button", "Delete")
                                            .variant(ButtonVariant::Danger)
                                            .shortcut("enter"),
                                    ),
                            ),
                    ),
            )
    }
}

impl Render for SectorsScreen {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let filtered: Vec<Sector> = self.filtered_rows().into_iter().cloned().collect();
        self.list_state.item_count = filtered.len();

        let visible_range = self.list_state.visible_range();
        let total_height = self.list_state.total_height();

        let colors = self.colors;
        let selected = self.selected;

        let rows: Vec<_> = filtered
            .iter()
            .enumerate()
            .filter(|(idx, _)| visible_range.contains(idx))
            .map(|(idx, sector)| {
                let offset = self.list_state.item_offset(idx);
                let index = idx;
                let hover_bg = colors.surface;
                let click_handler = cx.listener(move |this, _: &ClickEvent, _window, cx| {
                    this.selected = index;
                    cx.notify();
                });

                div()
                    .id(SharedString::from(format!("sector-{idx}")))
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
                            .w(px(110.0))
                            .font_weight(FontWeight::SEMIBOLD)
                            .text_sm()
                            .text_color(colors.accent)
                            .child(SharedString::from(sector.title.clone())),
                    )
                    .child(
                        div()
                            .flex_1()
                            .truncate()
                            .text_sm()
                            .text_color(colors.text_primary)
                            .child(SharedString::from(sector.name.clone())),
                    )
                    .into_any_element()
            })
            .collect();

        let show_loading = self.loading && self.rows.is_empty();
        let show_empty = !self.loading && filtered.is_empty();
        let search_text = if self.search.is_empty() {
            "Search sectors…".to_string()
        } else {
            self.search.text().to_string()
        };

        div()
            .id("sectors-screen")
            .relative()
            .size_full()
            .flex()
            .flex_col()
            .bg(colors.background)
            .child(ListHeader::new("Sectors", filtered.len()).refreshing(self.loading))
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
                            .id("sectors-search")
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
                            .child(div().text_xs().text_color(colors.text_muted).child("/"))
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
                            .id("sectors-new")
                            .cursor_pointer()
                            .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                this.open_create();
                                cx.notify();
                            }))
                            .child(Button::new("sectors-new-button", "New Sector").shortcut("n")),
                    ),
            )
            .child(
                div()
                    .h(px(28.0))
                    .px(px(16.0))
                    .flex()
                    .items_center()
                    .gap(px(12.0))
                    .border_b_1()
                    .border_color(colors.border)
                    .text_xs()
                    .text_color(colors.text_muted)
                    .child(div().w(px(110.0)).child("TITLE"))
                    .child(div().flex_1().child("NAME")),
            )
            .child(
                div()
                    .flex_1()
                    .overflow_y_hidden()
                    .when(show_loading, |this| this.child(LoadingState))
                    .when(show_empty, |this| {
                        this.child(EmptyState::new(
                            "No sectors",
                            "Press n to add the first sector",
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

    fn make_sector(id: &str, title: &str, name: &str) -> Sector {
        Sector {
            id: SectorId::from(id),
            title: title.to_string(),
            name: name.to_string(),
        }
    }

    fn screen() -> (SectorsScreen, tokio::sync::mpsc::UnboundedReceiver<Command>) {
        let (bus, rx) = CommandBus::channel();
        (SectorsScreen::new(bus), rx)
    }

    #[test]
    fn typed_title_normalizes_before_submission() {
        let (mut screen, mut rx) = screen();
        screen.open_create();

        {
            let form = screen.form.as_mut().unwrap();
            form.title.set_text("dxbjed");
            form.name.set_text("Dubai to Jeddah");
        }

        screen.handle_key("enter", false, true, false);
        match rx.try_recv().unwrap() {
            Command::SaveSector { payload, .. } => assert_eq!(payload.title, "DXB-JED"),
            other => panic!("unexpected command: {other:?}"),
        }

        // The draft now shows the normalized value too.
        let form = screen.form.as_ref().unwrap();
        assert_eq!(form.title.text(), "DXB-JED");
    }

    #[test]
    fn short_title_blocks_submission() {
        let (mut screen, mut rx) = screen();
        screen.open_create();

        {
            let form = screen.form.as_mut().unwrap();
            form.title.set_text("dxb");
            form.name.set_text("Dubai");
        }

        screen.handle_key("enter", false, true, false);
        assert!(screen.form.as_ref().unwrap().error.is_some());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn prefill_normalizes_legacy_titles() {
        let (mut screen, _rx) = screen();
        let sector = make_sector("s-1", "khijed", "Karachi to Jeddah");
        screen.set_rows(vec![sector.clone()]);

        screen.open_edit();
        screen.apply_detail(&sector);

        let form = screen.form.as_ref().unwrap();
        assert_eq!(form.title.text(), "KHI-JED");
    }

    #[test]
    fn search_matches_title() {
        let (mut screen, _rx) = screen();
        screen.set_rows(vec![
            make_sector("s-1", "DXB-JED", "Dubai to Jeddah"),
            make_sector("s-2", "KHI-MED", "Karachi to Madinah"),
        ]);

        screen.search.set_text("khi");
        assert_eq!(screen.filtered_rows().len(), 1);
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut screen, mut rx) = screen();
        screen.set_rows(vec![make_sector("s-1", "DXB-JED", "Dubai to Jeddah")]);

        screen.handle_key("d", false, false, false);
        assert!(rx.try_recv().is_err());

        screen.handle_key("y", false, false, false);
        assert!(matches!(
            rx.try_recv().unwrap(),
            Command::DeleteSector(id) if id.as_str() == "s-1"
        ));
    }
}
