//! Payment vouchers screen.
//!
//! Vouchers record agency payments. Non-cash methods settle through a
//! bank account, so the bank selector is required exactly when the chosen
//! method needs one.

use gpui::{
    div, prelude::FluentBuilder, px, ClickEvent, Context, FontWeight, InteractiveElement,
    IntoElement, ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::app::events::{Command, CommandBus, RequestKind};
use crate::domain::{
    Bank, BankId, PaymentMethod, User, UserId, Voucher, VoucherId, VoucherPayload, VoucherStatus,
};
use crate::ui::components::{
    Badge, BadgeTone, Button, ButtonVariant, EmptyState, InputMask, KeyInputResult, ListHeader,
    LoadingState, SelectField, TextBuffer, TextField, VirtualizedListState,
};
use crate::ui::theme::ThemeColors;
use crate::ui::views::form::{parse_amount, parse_date, FieldError, FormMode, FormPhase};

const ROW_HEIGHT: f32 = 40.0;

fn status_tone(status: VoucherStatus) -> BadgeTone {
    match status {
        VoucherStatus::Pending => BadgeTone::Warning,
        VoucherStatus::Posted => BadgeTone::Positive,
        VoucherStatus::Cancelled => BadgeTone::Neutral,
    }
}

/// Fields of the voucher form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VoucherField {
    User,
    Amount,
    Method,
    Bank,
    IssuedOn,
    Notes,
}

impl VoucherField {
    fn next(self) -> Self {
        use VoucherField::*;
        match self {
            User => Amount,
            Amount => Method,
            Method => Bank,
            Bank => IssuedOn,
            IssuedOn => Notes,
            Notes => User,
        }
    }

    fn previous(self) -> Self {
        use VoucherField::*;
        match self {
            User => Notes,
            Amount => User,
            Method => Amount,
            Bank => Method,
            IssuedOn => Bank,
            Notes => IssuedOn,
        }
    }
}

/// Draft state of the voucher form.
pub struct VoucherForm {
    mode: FormMode<VoucherId>,
    phase: FormPhase,
    user_index: Option<usize>,
    amount: TextBuffer,
    method: PaymentMethod,
    bank_index: Option<usize>,
    issued_on: TextBuffer,
    notes: TextBuffer,
    active_field: VoucherField,
    error: Option<String>,
}

impl VoucherForm {
    fn create() -> Self {
        Self {
            mode: FormMode::Create,
            phase: FormPhase::Ready,
            user_index: None,
            amount: TextBuffer::masked(InputMask::Decimal),
            method: PaymentMethod::Cash,
            bank_index: None,
            issued_on: TextBuffer::new(),
            notes: TextBuffer::new(),
            active_field: VoucherField::User,
            error: None,
        }
    }

    fn edit(id: VoucherId) -> Self {
        Self {
            mode: FormMode::Edit(id),
            phase: FormPhase::Loading,
            ..Self::create()
        }
    }

    /// Loads the fetched record, resolving references against the lists.
    pub fn prefill(&mut self, voucher: &Voucher, users: &[User], banks: &[Bank]) {
        self.user_index = users.iter().position(|u| u.id == voucher.user_id);
        self.amount.set_text(voucher.amount.to_string());
        self.method = voucher.method;
        self.bank_index = voucher
            .bank_id
            .as_ref()
            .and_then(|id| banks.iter().position(|b| b.id == *id));
        self.issued_on
            .set_text(voucher.issued_on.format("%Y-%m-%d").to_string());
        self.notes.set_text(voucher.notes.clone());
        self.phase = FormPhase::Ready;
        self.active_field = VoucherField::User;
    }

    fn validate(&self, users: &[User], banks: &[Bank]) -> Result<VoucherPayload, FieldError> {
        let user_id: UserId = self
            .user_index
            .and_then(|i| users.get(i))
            .map(|u| u.id.clone())
            .ok_or_else(|| FieldError::new("Agency", "is required"))?;
        let amount = parse_amount("Amount", self.amount.text())?;
        if amount == 0.0 {
            return Err(FieldError::new("Amount", "must be greater than zero"));
        }

        let bank_id: Option<BankId> = if self.method.requires_bank() {
            Some(
                self.bank_index
                    .and_then(|i| banks.get(i))
                    .map(|b| b.id.clone())
                    .ok_or_else(|| {
                        FieldError::new("Bank", "is required for non-cash payments")
                    })?,
            )
        } else {
            None
        };

        let issued_on = parse_date("Issued on", self.issued_on.text())?;

        Ok(VoucherPayload {
            user_id,
            amount,
            method: self.method,
            bank_id,
            issued_on,
            notes: self.notes.trimmed().to_string(),
        })
    }

    /// Validates and moves to `Submitting` on success.
    pub fn submit(&mut self, users: &[User], banks: &[Bank]) -> Option<Command> {
        if self.phase != FormPhase::Ready {
            return None;
        }

        match self.validate(users, banks) {
            Ok(payload) => {
                self.phase = FormPhase::Submitting;
                self.error = None;
                Some(Command::SaveVoucher {
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

    fn cycle(&mut self, forward: bool, user_count: usize, bank_count: usize) {
        let step = |index: Option<usize>, count: usize| -> Option<usize> {
            if count == 0 {
                return None;
            }
            Some(match index {
                None => {
                    if forward {
                        0
                    } else {
                        count - 1
                    }
                }
                Some(i) if forward => (i + 1) % count,
                Some(i) => (i + count - 1) % count,
            })
        };

        match self.active_field {
            VoucherField::User => self.user_index = step(self.user_index, user_count),
            VoucherField::Bank => self.bank_index = step(self.bank_index, bank_count),
            VoucherField::Method => {
                let all = PaymentMethod::all();
                let current = all.iter().position(|m| *m == self.method).unwrap_or(0);
                let next = if forward {
                    (current + 1) % all.len()
                } else {
                    (current + all.len() - 1) % all.len()
                };
                self.method = all[next];
            }
            _ => {}
        }
    }

    fn active_buffer(&mut self) -> Option<&mut TextBuffer> {
        match self.active_field {
            VoucherField::Amount => Some(&mut self.amount),
            VoucherField::IssuedOn => Some(&mut self.issued_on),
            VoucherField::Notes => Some(&mut self.notes),
            VoucherField::User | VoucherField::Method | VoucherField::Bank => None,
        }
    }
}

/// The payment vouchers screen.
pub struct VouchersScreen {
    colors: ThemeColors,
    commands: CommandBus,
    rows: Vec<Voucher>,
    users: Vec<User>,
    banks: Vec<Bank>,
    loading: bool,
    search: TextBuffer,
    search_active: bool,
    selected: usize,
    list_state: VirtualizedListState,
    form: Option<VoucherForm>,
    pending_delete: Option<VoucherId>,
}

impl VouchersScreen {
    /// Creates the screen.
    pub fn new(commands: CommandBus) -> Self {
        Self {
            colors: ThemeColors::dark(),
            commands,
            rows: Vec::new(),
            users: Vec::new(),
            banks: Vec::new(),
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
    pub fn set_rows(&mut self, rows: Vec<Voucher>) {
        self.rows = rows;
        self.loading = false;
        self.clamp_selection();
    }

    /// A fetch failed: keep prior rows.
    pub fn fetch_failed(&mut self) {
        self.loading = false;
    }

    /// Updates the user reference list.
    pub fn set_users(&mut self, users: Vec<User>) {
        self.users = users;
    }

    /// Updates the bank reference list.
    pub fn set_banks(&mut self, banks: Vec<Bank>) {
        self.banks = banks;
    }

    /// Applies the record detail an edit form is waiting for.
    pub fn apply_detail(&mut self, voucher: &Voucher) {
        if let Some(form) = &mut self.form {
            if form.phase == FormPhase::Loading
                && form.mode.record_id().as_ref() == Some(&voucher.id)
            {
                form.prefill(voucher, &self.users, &self.banks);
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

    fn user_name(&self, id: &UserId) -> String {
        self.users
            .iter()
            .find(|u| u.id == *id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "—".to_string())
    }

    /// Rows passing the search filter (voucher number or agency name).
    pub fn filtered_rows(&self) -> Vec<&Voucher> {
        let needle = self.search.trimmed().to_lowercase();
        self.rows
            .iter()
            .filter(|voucher| {
                needle.is_empty()
                    || voucher.voucher_no.to_lowercase().contains(&needle)
                    || self
                        .user_name(&voucher.user_id)
                        .to_lowercase()
                        .contains(&needle)
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

    fn selected_voucher(&self) -> Option<&Voucher> {
        self.filtered_rows().get(self.selected).copied()
    }

    /// Re-runs the collection fetch.
    pub fn refresh(&mut self) {
        self.loading = true;
        self.commands.dispatch(Command::FetchVouchers);
    }

    /// Opens an empty create form.
    pub fn open_create(&mut self) {
        self.form = Some(VoucherForm::create());
    }

    /// Opens an edit form and fetches the record detail.
    pub fn open_edit(&mut self) {
        if let Some(voucher) = self.selected_voucher() {
            let id = voucher.id.clone();
            self.form = Some(VoucherForm::edit(id.clone()));
            self.commands.dispatch(Command::FetchVoucherDetail(id));
        }
    }

    /// Asks for delete confirmation.
    pub fn request_delete(&mut self) {
        self.pending_delete = self.selected_voucher().map(|voucher| voucher.id.clone());
    }

    /// Confirms the pending delete.
    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.commands.dispatch(Command::DeleteVoucher(id));
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

        if self.form.is_some() {
            return self.handle_form_key(key, shift, ctrl, cmd);
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

    fn handle_form_key(&mut self, key: &str, shift: bool, ctrl: bool, cmd: bool) -> bool {
        let user_count = self.users.len();
        let bank_count = self.banks.len();

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
                if let Some(command) = form.submit(&self.users, &self.banks) {
                    self.commands.dispatch(command);
                }
                return true;
            }
            "enter" => {
                form.active_field = form.active_field.next();
                return true;
            }
            "left" => {
                form.cycle(false, user_count, bank_count);
                return true;
            }
            "right" => {
                form.cycle(true, user_count, bank_count);
                return true;
            }
            _ => {}
        }

        match form.active_buffer() {
            Some(buffer) => !matches!(
                buffer.process_key(key, shift, ctrl, cmd),
                KeyInputResult::Ignored
            ),
            None => true,
        }
    }

    fn render_form(&self, form: &VoucherForm, _cx: &mut Context<Self>) -> impl IntoElement {
        let colors = self.colors;
        let title = if form.mode.is_edit() {
            "Edit Voucher"
        } else {
            "New Voucher"
        };

        let user_label = form
            .user_index
            .and_then(|i| self.users.get(i))
            .map(|u| u.name.clone())
            .unwrap_or_default();
        let bank_label = form
            .bank_index
            .and_then(|i| self.banks.get(i))
            .map(|b| b.name.clone())
            .unwrap_or_default();

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
                    div()
                        .flex()
                        .gap(px(12.0))
                        .child(
                            div().flex_1().child(
                                SelectField::new("voucher-user", "Agency")
                                    .value(user_label)
                                    .active(form.active_field == VoucherField::User),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                TextField::new("voucher-amount", "Amount")
                                    .value(form.amount.text().to_string())
                                    .placeholder("0.00")
                                    .active(form.active_field == VoucherField::Amount),
                            ),
                        ),
                )
                .child(
                    div()
                        .flex()
                        .gap(px(12.0))
                        .child(
                            div().flex_1().child(
                                SelectField::new("voucher-method", "Payment Method")
                                    .value(form.method.label())
                                    .active(form.active_field == VoucherField::Method),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                SelectField::new("voucher-bank", "Bank")
                                    .value(if form.method.requires_bank() {
                                        bank_label
                                    } else {
                                        "n/a for cash".to_string()
                                    })
                                    .active(form.active_field == VoucherField::Bank),
                            ),
                        ),
                )
                .child(
                    div()
                        .flex()
                        .gap(px(12.0))
                        .child(
                            div().flex_1().child(
                                TextField::new("voucher-date", "Issued On")
                                    .value(form.issued_on.text().to_string())
                                    .placeholder("2025-03-14")
                                    .active(form.active_field == VoucherField::IssuedOn),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                TextField::new("voucher-notes", "Notes")
                                    .value(form.notes.text().to_string())
                                    .active(form.active_field == VoucherField::Notes),
                            ),
                        ),
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
            .id("voucher-form-overlay")
            .absolute()
            .inset_0()
            .bg(gpui::rgba(0x00000080))
            .flex()
            .items_start()
            .justify_center()
            .pt(px(60.0))
            .child(
                div()
                    .w(px(560.0))
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
                                    .child("◂ ▸: pick · tab: next field · esc: discard"),
                            )
                            .child(
                                Button::new(
                                    "voucher-form-save",
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
        let number = self
            .pending_delete
            .as_ref()
            .and_then(|id| self.rows.iter().find(|voucher| voucher.id == *id))
            .map(|voucher| voucher.voucher_no.clone())
            .unwrap_or_default();

        div()
            .id("voucher-confirm-overlay")
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
                            .child(SharedString::from("Delete voucher?")),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(format!(
                                "Voucher {number} will be permanently removed."
                            ))),
                    )
                    .child(
                        div()
                            .flex()
                            .justify_between()
                            .child(
                                div()
                                    .id("voucher-confirm-cancel")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.cancel_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("voucher-confirm-cancel-button", "Cancel")
                                            .variant(ButtonVariant::Secondary)
                                            .shortcut("esc"),
                                    ),
                            )
                            .child(
                                div()
                                    .id("voucher-confirm-delete")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.confirm_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("voucher-confirm-delete-button", "Delete")
                                            .variant(ButtonVariant::Danger)
                                            .shortcut("enter"),
                                    ),
                            ),
                    ),
            )
    }
}

impl Render for VouchersScreen {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let filtered: Vec<Voucher> = self.filtered_rows().into_iter().cloned().collect();
        self.list_state.item_count = filtered.len();

        let visible_range = self.list_state.visible_range();
        let total_height = self.list_state.total_height();
        let colors = self.colors;
        let selected = self.selected;

        let rows: Vec<_> = filtered
            .iter()
            .enumerate()
            .filter(|(idx, _)| visible_range.contains(idx))
            .map(|(idx, voucher)| {
                let offset = self.list_state.item_offset(idx);
                let index = idx;
                let hover_bg = colors.surface;
                let agency = self.user_name(&voucher.user_id);
                let click_handler = cx.listener(move |this, _: &ClickEvent, _window, cx| {
                    this.selected = index;
                    cx.notify();
                });

                div()
                    .id(SharedString::from(format!("voucher-{idx}")))
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
                            .w(px(130.0))
                            .font_weight(FontWeight::SEMIBOLD)
                            .text_sm()
                            .text_color(colors.text_primary)
                            .child(SharedString::from(voucher.voucher_no.clone())),
                    )
                    .child(
                        div()
                            .flex_1()
                            .truncate()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(agency)),
                    )
                    .child(
                        div()
                            .w(px(100.0))
                            .text_sm()
                            .text_color(colors.text_primary)
                            .child(SharedString::from(format!("{:.0}", voucher.amount))),
                    )
                    .child(
                        div()
                            .w(px(110.0))
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(voucher.method.label())),
                    )
                    .child(
                        div()
                            .w(px(90.0))
                            .text_xs()
                            .text_color(colors.text_muted)
                            .child(SharedString::from(
                                voucher.issued_on.format("%Y-%m-%d").to_string(),
                            )),
                    )
                    .child(
                        div()
                            .w(px(90.0))
                            .child(Badge::new(voucher.status.label(), status_tone(voucher.status))),
                    )
                    .into_any_element()
            })
            .collect();

        let show_loading = self.loading && self.rows.is_empty();
        let show_empty = !self.loading && filtered.is_empty();
        let search_text = if self.search.is_empty() {
            "Search vouchers…".to_string()
        } else {
            self.search.text().to_string()
        };

        div()
            .id("vouchers-screen")
            .relative()
            .size_full()
            .flex()
            .flex_col()
            .bg(colors.background)
            .child(ListHeader::new("Payment Vouchers", filtered.len()).refreshing(self.loading))
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
                            .id("vouchers-search")
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
                            .id("vouchers-new")
                            .cursor_pointer()
                            .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                this.open_create();
                                cx.notify();
                            }))
                            .child(Button::new("vouchers-new-button", "New Voucher").shortcut("n")),
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
                    .child(div().w(px(130.0)).child("VOUCHER"))
                    .child(div().flex_1().child("AGENCY"))
                    .child(div().w(px(100.0)).child("AMOUNT"))
                    .child(div().w(px(110.0)).child("METHOD"))
                    .child(div().w(px(90.0)).child("ISSUED"))
                    .child(div().w(px(90.0)).child("STATUS")),
            )
            .child(
                div()
                    .flex_1()
                    .overflow_y_hidden()
                    .when(show_loading, |this| this.child(LoadingState))
                    .when(show_empty, |this| {
                        this.child(EmptyState::new(
                            "No vouchers",
                            "Press n to record the first payment",
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
    use crate::domain::{MarginType, RecordStatus};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn make_user(id: &str, name: &str) -> User {
        User {
            id: UserId::from(id),
            name: name.to_string(),
            email: format!("{id}@karwan.pk"),
            phone: String::new(),
            company: String::new(),
            address: String::new(),
            city: String::new(),
            country: String::new(),
            margin_type: MarginType::Percentage,
            margin_value: 5.0,
            credit: 0.0,
            status: RecordStatus::Active,
            role_ids: vec![],
        }
    }

    fn make_bank(id: &str, name: &str) -> Bank {
        Bank {
            id: BankId::from(id),
            name: name.to_string(),
            account_title: String::new(),
            account_number: String::new(),
            iban: String::new(),
            address: String::new(),
            logo_url: None,
            status: RecordStatus::Active,
        }
    }

    fn screen() -> (VouchersScreen, tokio::sync::mpsc::UnboundedReceiver<Command>) {
        let (bus, rx) = CommandBus::channel();
        let mut screen = VouchersScreen::new(bus);
        screen.set_users(vec![make_user("u-1", "Karwan Travels")]);
        screen.set_banks(vec![make_bank("b-1", "Meezan")]);
        (screen, rx)
    }

    fn fill_valid(form: &mut VoucherForm) {
        form.user_index = Some(0);
        form.amount.set_text("25000");
        form.issued_on.set_text("2025-03-14");
    }

    #[test]
    fn cash_voucher_needs_no_bank() {
        let (mut screen, mut rx) = screen();
        screen.open_create();
        fill_valid(screen.form.as_mut().unwrap());

        screen.handle_key("enter", false, true, false);
        match rx.try_recv().unwrap() {
            Command::SaveVoucher { payload, .. } => {
                assert_eq!(payload.method, PaymentMethod::Cash);
                assert_eq!(payload.bank_id, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bank_transfer_requires_bank() {
        let (mut screen, mut rx) = screen();
        screen.open_create();
        {
            let form = screen.form.as_mut().unwrap();
            fill_valid(form);
            form.method = PaymentMethod::BankTransfer;
        }

        screen.handle_key("enter", false, true, false);
        assert!(screen
            .form
            .as_ref()
            .unwrap()
            .error
            .as_ref()
            .unwrap()
            .contains("Bank"));
        assert!(rx.try_recv().is_err());

        {
            let form = screen.form.as_mut().unwrap();
            form.bank_index = Some(0);
        }
        screen.handle_key("enter", false, true, false);
        match rx.try_recv().unwrap() {
            Command::SaveVoucher { payload, .. } => {
                assert_eq!(payload.bank_id.unwrap().as_str(), "b-1");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn zero_amount_is_rejected() {
        let (mut screen, mut rx) = screen();
        screen.open_create();
        {
            let form = screen.form.as_mut().unwrap();
            fill_valid(form);
            form.amount.set_text("0");
        }

        screen.handle_key("enter", false, true, false);
        assert!(screen
            .form
            .as_ref()
            .unwrap()
            .error
            .as_ref()
            .unwrap()
            .contains("Amount"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn method_cycles_through_all_options() {
        let (mut screen, _rx) = screen();
        screen.open_create();
        {
            let form = screen.form.as_mut().unwrap();
            form.active_field = VoucherField::Method;
        }

        screen.handle_key("right", false, false, false);
        assert_eq!(
            screen.form.as_ref().unwrap().method,
            PaymentMethod::BankTransfer
        );
        screen.handle_key("right", false, false, false);
        assert_eq!(screen.form.as_ref().unwrap().method, PaymentMethod::Cheque);
        screen.handle_key("right", false, false, false);
        assert_eq!(screen.form.as_ref().unwrap().method, PaymentMethod::Cash);
    }

    #[test]
    fn prefill_restores_bank_reference() {
        let (mut screen, _rx) = screen();
        let voucher = Voucher {
            id: VoucherId::from("pv-1"),
            voucher_no: "PV-2025-0931".to_string(),
            user_id: UserId::from("u-1"),
            amount: 50_000.0,
            method: PaymentMethod::Cheque,
            bank_id: Some(BankId::from("b-1")),
            issued_on: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            notes: "Group booking deposit".to_string(),
            status: VoucherStatus::Posted,
        };
        screen.set_rows(vec![voucher.clone()]);

        screen.open_edit();
        screen.apply_detail(&voucher);

        let form = screen.form.as_ref().unwrap();
        assert_eq!(form.user_index, Some(0));
        assert_eq!(form.bank_index, Some(0));
        assert_eq!(form.method, PaymentMethod::Cheque);
        assert_eq!(form.issued_on.text(), "2025-03-14");
    }
}
