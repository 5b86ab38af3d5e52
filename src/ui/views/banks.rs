//! Banks screen.
//!
//! Lists the platform's payment banks and manages them through a modal
//! form. Bank logos are uploaded as a multipart file part; the status
//! column is a two-state toggle.

use gpui::{
    div, prelude::FluentBuilder, px, ClickEvent, Context, FontWeight, InteractiveElement,
    IntoElement, ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::app::events::{Command, CommandBus, RequestKind};
use crate::domain::{Bank, BankId, BankPayload, LogoUpload, RecordStatus};
use crate::ui::components::{
    Badge, BadgeTone, Button, ButtonVariant, EmptyState, FileField, KeyInputResult, ListHeader,
    LoadingState, TextBuffer, TextField, VirtualizedListState,
};
use crate::ui::theme::ThemeColors;
use crate::ui::views::form::{require, require_len, FieldError, FormMode, FormPhase};

const ROW_HEIGHT: f32 = 40.0;

/// Fields of the bank form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BankField {
    Name,
    AccountTitle,
    AccountNumber,
    Iban,
    Address,
    LogoPath,
}

impl BankField {
    fn next(self) -> Self {
        match self {
            BankField::Name => BankField::AccountTitle,
            BankField::AccountTitle => BankField::AccountNumber,
            BankField::AccountNumber => BankField::Iban,
            BankField::Iban => BankField::Address,
            BankField::Address => BankField::LogoPath,
            BankField::LogoPath => BankField::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            BankField::Name => BankField::LogoPath,
            BankField::AccountTitle => BankField::Name,
            BankField::AccountNumber => BankField::AccountTitle,
            BankField::Iban => BankField::AccountNumber,
            BankField::Address => BankField::Iban,
            BankField::LogoPath => BankField::Address,
        }
    }
}

/// Draft state of the bank form.
pub struct BankForm {
    mode: FormMode<BankId>,
    phase: FormPhase,
    name: TextBuffer,
    account_title: TextBuffer,
    account_number: TextBuffer,
    iban: TextBuffer,
    address: TextBuffer,
    /// Path typed by the operator; read and validated on submit.
    logo_path: TextBuffer,
    status: RecordStatus,
    active_field: BankField,
    error: Option<String>,
}

impl BankForm {
    /// Empty create-mode draft.
    fn create() -> Self {
        Self {
            mode: FormMode::Create,
            phase: FormPhase::Ready,
            name: TextBuffer::new(),
            account_title: TextBuffer::new(),
            account_number: TextBuffer::new(),
            iban: TextBuffer::new(),
            address: TextBuffer::new(),
            logo_path: TextBuffer::new(),
            status: RecordStatus::Active,
            active_field: BankField::Name,
            error: None,
        }
    }

    /// Edit-mode draft awaiting the record detail.
    fn edit(id: BankId) -> Self {
        Self {
            mode: FormMode::Edit(id),
            phase: FormPhase::Loading,
            ..Self::create()
        }
    }

    /// Loads the fetched record into the draft.
    pub fn prefill(&mut self, bank: &Bank) {
        self.name.set_text(bank.name.clone());
        self.account_title.set_text(bank.account_title.clone());
        self.account_number.set_text(bank.account_number.clone());
        self.iban.set_text(bank.iban.clone());
        self.address.set_text(bank.address.clone());
        self.status = bank.status;
        self.phase = FormPhase::Ready;
        self.active_field = BankField::Name;
    }

    fn validate(&self) -> Result<(BankPayload, Option<LogoUpload>), FieldError> {
        let payload = BankPayload {
            name: require("Bank name", self.name.text())?,
            account_title: require("Account title", self.account_title.text())?,
            account_number: require("Account number", self.account_number.text())?,
            iban: require_len("IBAN", self.iban.text(), 16, 34)?,
            address: require("Address", self.address.text())?,
            status: self.status,
        };

        let logo = if self.logo_path.is_empty() {
            None
        } else {
            let path = std::path::PathBuf::from(self.logo_path.trimmed());
            Some(
                LogoUpload::from_path(&path)
                    .map_err(|err| FieldError::new("Logo", err.to_string()))?,
            )
        };

        Ok((payload, logo))
    }

    /// Validates the draft. On success, moves to `Submitting` and returns
    /// the save command; otherwise records the first violated rule.
    pub fn submit(&mut self) -> Option<Command> {
        if self.phase != FormPhase::Ready {
            return None;
        }

        match self.validate() {
            Ok((payload, logo)) => {
                self.phase = FormPhase::Submitting;
                self.error = None;
                Some(Command::SaveBank {
                    id: self.mode.record_id(),
                    payload,
                    logo,
                })
            }
            Err(err) => {
                self.error = Some(err.display());
                None
            }
        }
    }

    /// Reopens the form after a rejected save, draft intact.
    pub fn save_failed(&mut self, message: String) {
        self.phase = FormPhase::Ready;
        self.error = Some(message);
    }

    fn active_buffer(&mut self) -> &mut TextBuffer {
        match self.active_field {
            BankField::Name => &mut self.name,
            BankField::AccountTitle => &mut self.account_title,
            BankField::AccountNumber => &mut self.account_number,
            BankField::Iban => &mut self.iban,
            BankField::Address => &mut self.address,
            BankField::LogoPath => &mut self.logo_path,
        }
    }
}

/// The banks list screen.
pub struct BanksScreen {
    colors: ThemeColors,
    commands: CommandBus,
    rows: Vec<Bank>,
    loading: bool,
    search: TextBuffer,
    search_active: bool,
    status_filter: Option<RecordStatus>,
    selected: usize,
    list_state: VirtualizedListState,
    form: Option<BankForm>,
    pending_delete: Option<BankId>,
}

impl BanksScreen {
    /// Creates the screen; rows arrive via [`Self::set_rows`].
    pub fn new(commands: CommandBus) -> Self {
        Self {
            colors: ThemeColors::dark(),
            commands,
            rows: Vec::new(),
            loading: false,
            search: TextBuffer::new(),
            search_active: false,
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
    pub fn set_rows(&mut self, rows: Vec<Bank>) {
        self.rows = rows;
        self.loading = false;
        self.clamp_selection();
    }

    /// A fetch failed: keep whatever was shown before.
    pub fn fetch_failed(&mut self) {
        self.loading = false;
    }

    /// Applies the record detail an edit form is waiting for.
    pub fn apply_detail(&mut self, bank: &Bank) {
        if let Some(form) = &mut self.form {
            if form.phase == FormPhase::Loading
                && form.mode.record_id().as_ref() == Some(&bank.id)
            {
                form.prefill(bank);
            }
        }
    }

    /// The edit-mode detail fetch failed; drop the half-open form.
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

    /// A save was rejected; keep the form open with the message.
    pub fn save_failed(&mut self, message: String) {
        if let Some(form) = &mut self.form {
            form.save_failed(message);
        }
    }

    /// Rows passing the search and status filters.
    pub fn filtered_rows(&self) -> Vec<&Bank> {
        let needle = self.search.trimmed().to_lowercase();
        self.rows
            .iter()
            .filter(|bank| {
                self.status_filter
                    .map(|status| bank.status == status)
                    .unwrap_or(true)
            })
            .filter(|bank| {
                needle.is_empty()
                    || bank.name.to_lowercase().contains(&needle)
                    || bank.account_title.to_lowercase().contains(&needle)
                    || bank.iban.to_lowercase().contains(&needle)
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

    fn selected_bank(&self) -> Option<&Bank> {
        self.filtered_rows().get(self.selected).copied()
    }

    fn select_next(&mut self) {
        let count = self.filtered_rows().len();
        if self.selected + 1 < count {
            self.selected += 1;
            self.list_state.scroll_to_item(self.selected);
        }
    }

    fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.list_state.scroll_to_item(self.selected);
        }
    }

    /// Re-runs the collection fetch.
    pub fn refresh(&mut self) {
        self.loading = true;
        self.commands.dispatch(Command::FetchBanks);
    }

    /// Opens an empty create form.
    pub fn open_create(&mut self) {
        self.form = Some(BankForm::create());
    }

    /// Opens an edit form and fetches the record detail.
    pub fn open_edit(&mut self) {
        if let Some(bank) = self.selected_bank() {
            let id = bank.id.clone();
            self.form = Some(BankForm::edit(id.clone()));
            self.commands.dispatch(Command::FetchBankDetail(id));
        }
    }

    /// Asks for delete confirmation. No request is issued yet.
    pub fn request_delete(&mut self) {
        self.pending_delete = self.selected_bank().map(|bank| bank.id.clone());
    }

    /// Confirms the pending delete and issues the request.
    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.commands.dispatch(Command::DeleteBank(id));
        }
    }

    /// Declines the pending delete. Nothing is sent.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Requests the opposite status for the selected bank.
    pub fn toggle_status(&mut self) {
        if let Some(bank) = self.selected_bank() {
            self.commands.dispatch(Command::SetBankStatus {
                id: bank.id.clone(),
                status: bank.status.toggled(),
            });
        }
    }

    /// Cycles the status filter: all -> active -> de-active.
    pub fn cycle_status_filter(&mut self) {
        self.status_filter = match self.status_filter {
            None => Some(RecordStatus::Active),
            Some(RecordStatus::Active) => Some(RecordStatus::DeActive),
            Some(RecordStatus::DeActive) => None,
        };
        self.selected = 0;
        self.clamp_selection();
    }

    /// Whether an overlay or search owns the keyboard right now.
    pub fn capture_keys(&self) -> bool {
        self.form.is_some() || self.pending_delete.is_some() || self.search_active
    }

    /// Routes a key press. Returns whether it was consumed.
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
                _ => true, // Swallow everything while the dialog is up
            };
        }

        if self.form.is_some() {
            return self.handle_form_key(key, shift, ctrl, cmd);
        }

        if self.search_active {
            let result = self.search.process_key(key, shift, ctrl, cmd);
            match result {
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
                self.select_next();
                true
            }
            "k" | "up" => {
                self.select_previous();
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
            "t" => {
                self.toggle_status();
                true
            }
            "r" => {
                self.refresh();
                true
            }
            "f" => {
                self.cycle_status_filter();
                true
            }
            "/" => {
                self.search_active = true;
                true
            }
            _ => false,
        }
    }

    fn handle_form_key(&mut self, key: &str, shift: bool, ctrl: bool, cmd: bool) -> bool {
        let Some(form) = &mut self.form else {
            return false;
        };

        if form.phase == FormPhase::Loading {
            if key == "escape" {
                self.form = None;
            }
            return true;
        }

        match key {
            "escape" => {
                // Closing discards the draft unconditionally.
                self.form = None;
                return true;
            }
            "tab" => {
                form.active_field = if shift {
                    form.active_field.previous()
                } else {
                    form.active_field.next()
                };
                return true;
            }
            "enter" if ctrl || cmd => {
                if let Some(command) = form.submit() {
                    self.commands.dispatch(command);
                }
                return true;
            }
            "enter" => {
                form.active_field = form.active_field.next();
                return true;
            }
            _ => {}
        }

        if key == "s" && (ctrl || cmd) {
            form.status = form.status.toggled();
            return true;
        }

        !matches!(
            form.active_buffer().process_key(key, shift, ctrl, cmd),
            KeyInputResult::Ignored
        )
    }

    fn render_toolbar(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let colors = self.colors;
        let search_text = if self.search.is_empty() {
            "Search banks…".to_string()
        } else {
            self.search.text().to_string()
        };
        let search_color = if self.search.is_empty() {
            colors.text_muted
        } else {
            colors.text_primary
        };
        let filter_label = match self.status_filter {
            None => "All",
            Some(status) => status.label(),
        };

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
                    .id("banks-search")
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
                            .text_color(search_color)
                            .child(SharedString::from(search_text)),
                    ),
            )
            .child(
                div()
                    .id("banks-filter")
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
                    .id("banks-new")
                    .cursor_pointer()
                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                        this.open_create();
                        cx.notify();
                    }))
                    .child(Button::new("banks-new-button", "New Bank").shortcut("n")),
            )
    }

    fn render_table_header(&self) -> impl IntoElement {
        let colors = self.colors;
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
            .child(div().w(px(180.0)).child("BANK"))
            .child(div().w(px(160.0)).child("ACCOUNT TITLE"))
            .child(div().w(px(220.0)).child("IBAN"))
            .child(div().flex_1().child("ADDRESS"))
            .child(div().w(px(90.0)).child("STATUS"))
    }

    fn render_row(
        &self,
        bank: &Bank,
        index: usize,
        top_offset: f32,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let colors = self.colors;
        let is_selected = index == self.selected;
        let hover_bg = colors.surface;

        let bg = if is_selected {
            colors.surface_elevated
        } else {
            gpui::Hsla::transparent_black()
        };

        let tone = if bank.status.is_active() {
            BadgeTone::Positive
        } else {
            BadgeTone::Negative
        };

        let click_handler = cx.listener(move |this, _: &ClickEvent, _window, cx| {
            this.selected = index;
            cx.notify();
        });

        div()
            .id(SharedString::from(format!("bank-{index}")))
            .absolute()
            .left_0()
            .right_0()
            .top(px(top_offset))
            .h(px(ROW_HEIGHT))
            .px(px(16.0))
            .flex()
            .items_center()
            .gap(px(12.0))
            .bg(bg)
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
                    .text_color(colors.text_primary)
                    .text_sm()
                    .child(SharedString::from(bank.name.clone())),
            )
            .child(
                div()
                    .w(px(160.0))
                    .truncate()
                    .text_sm()
                    .text_color(colors.text_secondary)
                    .child(SharedString::from(bank.account_title.clone())),
            )
            .child(
                div()
                    .w(px(220.0))
                    .truncate()
                    .text_sm()
                    .text_color(colors.text_secondary)
                    .child(SharedString::from(bank.iban.clone())),
            )
            .child(
                div()
                    .flex_1()
                    .truncate()
                    .text_sm()
                    .text_color(colors.text_muted)
                    .child(SharedString::from(bank.address.clone())),
            )
            .child(
                div()
                    .w(px(90.0))
                    .child(Badge::new(bank.status.label(), tone)),
            )
    }

    fn render_form(&self, form: &BankForm, _cx: &mut Context<Self>) -> impl IntoElement {
        let colors = self.colors;
        let title = if form.mode.is_edit() {
            "Edit Bank"
        } else {
            "New Bank"
        };

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
                    TextField::new("bank-name", "Bank Name")
                        .value(form.name.text().to_string())
                        .placeholder("e.g. Meezan Bank")
                        .active(form.active_field == BankField::Name),
                )
                .child(
                    TextField::new("bank-account-title", "Account Title")
                        .value(form.account_title.text().to_string())
                        .active(form.active_field == BankField::AccountTitle),
                )
                .child(
                    TextField::new("bank-account-number", "Account Number")
                        .value(form.account_number.text().to_string())
                        .active(form.active_field == BankField::AccountNumber),
                )
                .child(
                    TextField::new("bank-iban", "IBAN")
                        .value(form.iban.text().to_string())
                        .placeholder("PK__________________")
                        .active(form.active_field == BankField::Iban),
                )
                .child(
                    TextField::new("bank-address", "Address")
                        .value(form.address.text().to_string())
                        .active(form.active_field == BankField::Address),
                )
                .child(
                    FileField::new("bank-logo", "Logo (path, optional)")
                        .active(form.active_field == BankField::LogoPath)
                        .when(!form.logo_path.is_empty(), |field| {
                            field.file(form.logo_path.text().to_string(), 0)
                        }),
                )
                .child(
                    div()
                        .flex()
                        .items_center()
                        .gap(px(8.0))
                        .child(
                            div()
                                .text_xs()
                                .text_color(colors.text_secondary)
                                .child("Status (ctrl-s):"),
                        )
                        .child(Badge::new(
                            form.status.label(),
                            if form.status.is_active() {
                                BadgeTone::Positive
                            } else {
                                BadgeTone::Negative
                            },
                        )),
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
            .id("bank-form-overlay")
            .absolute()
            .inset_0()
            .bg(gpui::rgba(0x00000080))
            .flex()
            .items_start()
            .justify_center()
            .pt(px(60.0))
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
                            .child(SharedString::from(title)),
                    )
                    .child(body)
                    .child(
                        div()
                            .px(px(16.0))
                            .py(px(12.0))
                            .flex()
                            .items_center()
                            .justify_between()
                            .border_t_1()
                            .border_color(colors.border)
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(colors.text_muted)
                                    .child("tab: next field · esc: discard"),
                            )
                            .child(
                                Button::new(
                                    "bank-form-save",
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
        let name = self
            .pending_delete
            .as_ref()
            .and_then(|id| self.rows.iter().find(|bank| bank.id == *id))
            .map(|bank| bank.name.clone())
            .unwrap_or_default();

        div()
            .id("bank-confirm-overlay")
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
                            .child(SharedString::from("Delete bank?")),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(format!(
                                "\"{name}\" will be permanently removed."
                            ))),
                    )
                    .child(
                        div()
                            .flex()
                            .justify_between()
                            .child(
                                div()
                                    .id("bank-confirm-cancel")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.cancel_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("bank-confirm-cancel-button", "Cancel")
                                            .variant(ButtonVariant::Secondary)
                                            .shortcut("esc"),
                                    ),
                            )
                            .child(
                                div()
                                    .id("bank-confirm-delete")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.confirm_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("bank-confirm-delete-button", "Delete")
                                            .variant(ButtonVariant::Danger)
                                            .shortcut("enter"),
                                    ),
                            ),
                    ),
            )
    }
}

impl Render for BanksScreen {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let filtered: Vec<Bank> = self.filtered_rows().into_iter().cloned().collect();
        self.list_state.item_count = filtered.len();

        let visible_range = self.list_state.visible_range();
        let total_height = self.list_state.total_height();

        let rows: Vec<_> = filtered
            .iter()
            .enumerate()
            .filter(|(idx, _)| visible_range.contains(idx))
            .map(|(idx, bank)| {
                let offset = self.list_state.item_offset(idx);
                self.render_row(bank, idx, offset, cx).into_any_element()
            })
            .collect();

        let show_loading = self.loading && self.rows.is_empty();
        let show_empty = !self.loading && filtered.is_empty();

        div()
            .id("banks-screen")
            .relative()
            .size_full()
            .flex()
            .flex_col()
            .bg(self.colors.background)
            .child(ListHeader::new("Banks", filtered.len()).refreshing(self.loading))
            .child(self.render_toolbar(cx))
            .child(self.render_table_header())
            .child(
                div()
                    .flex_1()
                    .overflow_y_hidden()
                    .when(show_loading, |this| this.child(LoadingState))
                    .when(show_empty, |this| {
                        this.child(EmptyState::new(
                            "No banks",
                            "Press n to add the first bank",
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

    fn make_bank(id: &str, name: &str, status: RecordStatus) -> Bank {
        Bank {
            id: BankId::from(id),
            name: name.to_string(),
            account_title: "Karwan Travels".to_string(),
            account_number: "0101".to_string(),
            iban: format!("PK36MEZN00000{id}"),
            address: "Karachi".to_string(),
            logo_url: None,
            status,
        }
    }

    fn screen() -> (BanksScreen, tokio::sync::mpsc::UnboundedReceiver<Command>) {
        let (bus, rx) = CommandBus::channel();
        (BanksScreen::new(bus), rx)
    }

    #[test]
    fn rows_replace_on_successful_fetch() {
        let (mut screen, _rx) = screen();
        screen.set_loading(true);
        screen.set_rows(vec![
            make_bank("b-1", "Meezan", RecordStatus::Active),
            make_bank("b-2", "HBL", RecordStatus::DeActive),
        ]);

        assert!(!screen.loading);
        assert_eq!(screen.filtered_rows().len(), 2);
    }

    #[test]
    fn failed_fetch_keeps_prior_rows() {
        let (mut screen, _rx) = screen();
        screen.set_rows(vec![make_bank("b-1", "Meezan", RecordStatus::Active)]);

        screen.set_loading(true);
        screen.fetch_failed();

        assert!(!screen.loading);
        assert_eq!(screen.filtered_rows().len(), 1);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let (mut screen, _rx) = screen();
        screen.set_rows(vec![
            make_bank("b-1", "Meezan Bank", RecordStatus::Active),
            make_bank("b-2", "Habib Bank", RecordStatus::Active),
        ]);

        screen.search.set_text("meez");
        assert_eq!(screen.filtered_rows().len(), 1);
        assert_eq!(screen.filtered_rows()[0].name, "Meezan Bank");
    }

    #[test]
    fn status_filter_cycles() {
        let (mut screen, _rx) = screen();
        screen.set_rows(vec![
            make_bank("b-1", "Meezan", RecordStatus::Active),
            make_bank("b-2", "HBL", RecordStatus::DeActive),
        ]);

        screen.cycle_status_filter();
        assert_eq!(screen.filtered_rows().len(), 1);
        assert_eq!(screen.filtered_rows()[0].name, "Meezan");

        screen.cycle_status_filter();
        assert_eq!(screen.filtered_rows()[0].name, "HBL");

        screen.cycle_status_filter();
        assert_eq!(screen.filtered_rows().len(), 2);
    }

    #[test]
    fn toggle_requests_opposite_status() {
        let (mut screen, mut rx) = screen();
        screen.set_rows(vec![make_bank("b-1", "Meezan", RecordStatus::Active)]);

        screen.toggle_status();
        match rx.try_recv().unwrap() {
            Command::SetBankStatus { id, status } => {
                assert_eq!(id.as_str(), "b-1");
                assert_eq!(status, RecordStatus::DeActive);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let (mut screen, mut rx) = screen();
        screen.set_rows(vec![make_bank("b-1", "Meezan", RecordStatus::Active)]);

        screen.handle_key("d", false, false, false);
        assert!(screen.pending_delete.is_some());

        screen.handle_key("escape", false, false, false);
        assert!(screen.pending_delete.is_none());
        assert!(rx.try_recv().is_err(), "no DELETE without confirmation");
    }

    #[test]
    fn confirmed_delete_sends_one_command() {
        let (mut screen, mut rx) = screen();
        screen.set_rows(vec![make_bank("b-1", "Meezan", RecordStatus::Active)]);

        screen.handle_key("d", false, false, false);
        screen.handle_key("enter", false, false, false);

        assert!(matches!(rx.try_recv().unwrap(), Command::DeleteBank(id) if id.as_str() == "b-1"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn empty_required_field_blocks_submission() {
        let (mut screen, mut rx) = screen();
        screen.open_create();

        let form = screen.form.as_mut().unwrap();
        form.name.set_text("Meezan");
        // account title left empty

        assert!(form.submit().is_none());
        let form = screen.form.as_ref().unwrap();
        assert!(form.error.as_ref().unwrap().contains("Account title"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn valid_draft_submits_exactly_once() {
        let (mut screen, mut rx) = screen();
        screen.open_create();

        {
            let form = screen.form.as_mut().unwrap();
            form.name.set_text("Meezan");
            form.account_title.set_text("Karwan Travels");
            form.account_number.set_text("0101");
            form.iban.set_text("PK36MEZN0000000101");
            form.address.set_text("Karachi");
        }

        screen.handle_key("enter", false, true, false);
        match rx.try_recv().unwrap() {
            Command::SaveBank { id, payload, logo } => {
                assert_eq!(id, None);
                assert_eq!(payload.name, "Meezan");
                assert!(logo.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }

        // Submitting again while in flight is ignored.
        screen.handle_key("enter", false, true, false);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn prefill_is_idempotent() {
        let (mut screen, _rx) = screen();
        let bank = make_bank("b-1", "Meezan", RecordStatus::DeActive);
        screen.set_rows(vec![bank.clone()]);

        screen.open_edit();
        screen.apply_detail(&bank);

        let form = screen.form.as_mut().unwrap();
        assert_eq!(form.phase, FormPhase::Ready);
        let (payload, _) = form.validate().unwrap();
        assert_eq!(payload.name, bank.name);
        assert_eq!(payload.account_title, bank.account_title);
        assert_eq!(payload.account_number, bank.account_number);
        assert_eq!(payload.iban, bank.iban);
        assert_eq!(payload.address, bank.address);
        assert_eq!(payload.status, bank.status);
    }

    #[test]
    fn rejected_save_keeps_draft() {
        let (mut screen, mut rx) = screen();
        screen.open_create();

        {
            let form = screen.form.as_mut().unwrap();
            form.name.set_text("Meezan");
            form.account_title.set_text("Karwan Travels");
            form.account_number.set_text("0101");
            form.iban.set_text("PK36MEZN0000000101");
            form.address.set_text("Karachi");
        }

        screen.handle_key("enter", false, true, false);
        assert!(rx.try_recv().is_ok());

        screen.save_failed("IBAN already registered".to_string());
        let form = screen.form.as_ref().unwrap();
        assert_eq!(form.phase, FormPhase::Ready);
        assert_eq!(form.name.text(), "Meezan");
        assert_eq!(form.error.as_deref(), Some("IBAN already registered"));
    }

    #[test]
    fn mutation_success_closes_form() {
        let (mut screen, _rx) = screen();
        screen.open_create();
        screen.on_mutation(RequestKind::Save);
        assert!(screen.form.is_none());
    }

    #[test]
    fn selection_stays_in_bounds_after_refetch() {
        let (mut screen, _rx) = screen();
        screen.set_rows(vec![
            make_bank("b-1", "A", RecordStatus::Active),
            make_bank("b-2", "B", RecordStatus::Active),
            make_bank("b-3", "C", RecordStatus::Active),
        ]);
        screen.handle_key("j", false, false, false);
        screen.handle_key("j", false, false, false);
        assert_eq!(screen.selected, 2);

        screen.set_rows(vec![make_bank("b-1", "A", RecordStatus::Active)]);
        assert_eq!(screen.selected, 0);
    }
}
