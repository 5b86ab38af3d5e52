//! Users screen.
//!
//! Console users and agency accounts: contact details, margin terms,
//! credit, status and role assignment. The agency role is managed through
//! its own onboarding flow and never offered here.

use gpui::{
    div, prelude::FluentBuilder, px, ClickEvent, Context, FontWeight, InteractiveElement,
    IntoElement, ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::app::events::{Command, CommandBus, RequestKind};
use crate::domain::{
    MarginType, RecordStatus, Role, RoleId, User, UserId, UserPayload, AGENT_ROLE_SLUG,
};
use crate::ui::components::{
    Badge, BadgeTone, Button, ButtonVariant, CheckField, EmptyState, InputMask, KeyInputResult,
    ListHeader, LoadingState, SelectField, TextBuffer, TextField, VirtualizedListState,
};
use crate::ui::theme::ThemeColors;
use crate::ui::views::form::{
    parse_amount, require, require_email, require_len, FieldError, FormMode, FormPhase,
};

const ROW_HEIGHT: f32 = 44.0;

/// Roles offered in the user form: everything except the agency role.
pub fn selectable_roles(roles: &[Role]) -> Vec<&Role> {
    roles
        .iter()
        .filter(|role| !role.name.eq_ignore_ascii_case(AGENT_ROLE_SLUG))
        .collect()
}

/// Fields of the user form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserField {
    Name,
    Email,
    Phone,
    Company,
    Address,
    City,
    Country,
    MarginType,
    MarginValue,
    Credit,
    Password,
    Roles,
}

impl UserField {
    fn next(self) -> Self {
        use UserField::*;
        match self {
            Name => Email,
            Email => Phone,
            Phone => Company,
            Company => Address,
            Address => City,
            City => Country,
            Country => MarginType,
            MarginType => MarginValue,
            MarginValue => Credit,
            Credit => Password,
            Password => Roles,
            Roles => Name,
        }
    }

    fn previous(self) -> Self {
        use UserField::*;
        match self {
            Name => Roles,
            Email => Name,
            Phone => Email,
            Company => Phone,
            Address => Company,
            City => Address,
            Country => City,
            MarginType => Country,
            MarginValue => MarginType,
            Credit => MarginValue,
            Password => Credit,
            Roles => Password,
        }
    }
}

/// Draft state of the user form.
pub struct UserForm {
    mode: FormMode<UserId>,
    phase: FormPhase,
    name: TextBuffer,
    email: TextBuffer,
    phone: TextBuffer,
    company: TextBuffer,
    address: TextBuffer,
    city: TextBuffer,
    country: TextBuffer,
    margin_type: MarginType,
    margin_value: TextBuffer,
    credit: TextBuffer,
    password: TextBuffer,
    status: RecordStatus,
    assigned: Vec<RoleId>,
    focused_role: usize,
    active_field: UserField,
    error: Option<String>,
}

impl UserForm {
    fn create() -> Self {
        Self {
            mode: FormMode::Create,
            phase: FormPhase::Ready,
            name: TextBuffer::new(),
            email: TextBuffer::new(),
            phone: TextBuffer::new(),
            company: TextBuffer::new(),
            address: TextBuffer::new(),
            city: TextBuffer::new(),
            country: TextBuffer::new(),
            margin_type: MarginType::Percentage,
            margin_value: TextBuffer::masked(InputMask::Decimal),
            credit: TextBuffer::masked(InputMask::Decimal),
            password: TextBuffer::new(),
            status: RecordStatus::Active,
            assigned: Vec::new(),
            focused_role: 0,
            active_field: UserField::Name,
            error: None,
        }
    }

    fn edit(id: UserId) -> Self {
        Self {
            mode: FormMode::Edit(id),
            phase: FormPhase::Loading,
            ..Self::create()
        }
    }

    /// Loads the fetched record into the draft. The password stays empty;
    /// it is only sent when the operator types a new one.
    pub fn prefill(&mut self, user: &User) {
        self.name.set_text(user.name.clone());
        self.email.set_text(user.email.clone());
        self.phone.set_text(user.phone.clone());
        self.company.set_text(user.company.clone());
        self.address.set_text(user.address.clone());
        self.city.set_text(user.city.clone());
        self.country.set_text(user.country.clone());
        self.margin_type = user.margin_type;
        self.margin_value.set_text(user.margin_value.to_string());
        self.credit.set_text(user.credit.to_string());
        self.status = user.status;
        self.assigned = user.role_ids.clone();
        self.phase = FormPhase::Ready;
        self.active_field = UserField::Name;
    }

    /// Returns whether a role is assigned in the draft.
    pub fn is_assigned(&self, id: &RoleId) -> bool {
        self.assigned.contains(id)
    }

    /// Toggles the focused role among the selectable ones.
    pub fn toggle_focused_role(&mut self, roles: &[Role]) {
        let selectable = selectable_roles(roles);
        if let Some(role) = selectable.get(self.focused_role) {
            if let Some(pos) = self.assigned.iter().position(|id| *id == role.id) {
                self.assigned.remove(pos);
            } else {
                self.assigned.push(role.id.clone());
            }
        }
    }

    fn validate(&self) -> Result<UserPayload, FieldError> {
        let name = require("Name", self.name.text())?;
        let email = require_email("Email", self.email.text())?;
        let phone = require("Phone", self.phone.text())?;
        let margin_value = parse_amount("Margin value", self.margin_value.text())?;
        let credit = if self.credit.is_empty() {
            0.0
        } else {
            parse_amount("Credit", self.credit.text())?
        };

        let password = if self.password.is_empty() {
            if !self.mode.is_edit() {
                return Err(FieldError::new("Password", "is required"));
            }
            None
        } else {
            Some(require_len("Password", self.password.text(), 8, 64)?)
        };

        if self.assigned.is_empty() {
            return Err(FieldError::new("Roles", "assign at least one role"));
        }

        Ok(UserPayload {
            name,
            email,
            phone,
            company: self.company.trimmed().to_string(),
            address: self.address.trimmed().to_string(),
            city: self.city.trimmed().to_string(),
            country: self.country.trimmed().to_string(),
            margin_type: self.margin_type,
            margin_value,
            credit,
            status: self.status,
            role_ids: self.assigned.clone(),
            password,
        })
    }

    /// Validates and moves to `Submitting` on success.
    pub fn submit(&mut self) -> Option<Command> {
        if self.phase != FormPhase::Ready {
            return None;
        }

        match self.validate() {
            Ok(payload) => {
                self.phase = FormPhase::Submitting;
                self.error = None;
                Some(Command::SaveUser {
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

    fn active_buffer(&mut self) -> Option<&mut TextBuffer> {
        use UserField::*;
        match self.active_field {
            Name => Some(&mut self.name),
            Email => Some(&mut self.email),
            Phone => Some(&mut self.phone),
            Company => Some(&mut self.company),
            Address => Some(&mut self.address),
            City => Some(&mut self.city),
            Country => Some(&mut self.country),
            MarginValue => Some(&mut self.margin_value),
            Credit => Some(&mut self.credit),
            Password => Some(&mut self.password),
            MarginType | Roles => None,
        }
    }
}

/// The users list screen.
pub struct UsersScreen {
    colors: ThemeColors,
    commands: CommandBus,
    rows: Vec<User>,
    roles: Vec<Role>,
    loading: bool,
    search: TextBuffer,
    search_active: bool,
    status_filter: Option<RecordStatus>,
    selected: usize,
    list_state: VirtualizedListState,
    form: Option<UserForm>,
    pending_delete: Option<UserId>,
}

impl UsersScreen {
    /// Creates the screen.
    pub fn new(commands: CommandBus) -> Self {
        Self {
            colors: ThemeColors::dark(),
            commands,
            rows: Vec::new(),
            roles: Vec::new(),
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
    pub fn set_rows(&mut self, rows: Vec<User>) {
        self.rows = rows;
        self.loading = false;
        self.clamp_selection();
    }

    /// A fetch failed: keep prior rows.
    pub fn fetch_failed(&mut self) {
        self.loading = false;
    }

    /// Updates the role reference list used by the form.
    pub fn set_roles(&mut self, roles: Vec<Role>) {
        self.roles = roles;
    }

    /// Applies the record detail an edit form is waiting for.
    pub fn apply_detail(&mut self, user: &User) {
        if let Some(form) = &mut self.form {
            if form.phase == FormPhase::Loading
                && form.mode.record_id().as_ref() == Some(&user.id)
            {
                form.prefill(user);
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

    /// Rows passing the search and status filters.
    pub fn filtered_rows(&self) -> Vec<&User> {
        let needle = self.search.trimmed().to_lowercase();
        self.rows
            .iter()
            .filter(|user| {
                self.status_filter
                    .map(|status| user.status == status)
                    .unwrap_or(true)
            })
            .filter(|user| {
                needle.is_empty()
                    || user.name.to_lowercase().contains(&needle)
                    || user.email.to_lowercase().contains(&needle)
                    || user.company.to_lowercase().contains(&needle)
                    || user.city.to_lowercase().contains(&needle)
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

    fn selected_user(&self) -> Option<&User> {
        self.filtered_rows().get(self.selected).copied()
    }

    /// Re-runs the collection fetch.
    pub fn refresh(&mut self) {
        self.loading = true;
        self.commands.dispatch(Command::FetchUsers);
    }

    /// Opens an empty create form.
    pub fn open_create(&mut self) {
        self.form = Some(UserForm::create());
    }

    /// Opens an edit form and fetches the record detail.
    pub fn open_edit(&mut self) {
        if let Some(user) = self.selected_user() {
            let id = user.id.clone();
            self.form = Some(UserForm::edit(id.clone()));
            self.commands.dispatch(Command::FetchUserDetail(id));
        }
    }

    /// Asks for delete confirmation.
    pub fn request_delete(&mut self) {
        self.pending_delete = self.selected_user().map(|user| user.id.clone());
    }

    /// Confirms the pending delete.
    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.commands.dispatch(Command::DeleteUser(id));
        }
    }

    /// Declines the pending delete.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Requests the opposite status for the selected user.
    pub fn toggle_status(&mut self) {
        if let Some(user) = self.selected_user() {
            self.commands.dispatch(Command::SetUserStatus {
                id: user.id.clone(),
                status: user.status.toggled(),
            });
        }
    }

    /// Cycles the status filter.
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
            "t" => {
                self.toggle_status();
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
            "/" => {
                self.search_active = true;
                true
            }
            _ => false,
        }
    }

    fn handle_form_key(&mut self, key: &str, shift: bool, ctrl: bool, cmd: bool) -> bool {
        let selectable_count = selectable_roles(&self.roles).len();
        let roles = &self.roles;

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

        match form.active_field {
            UserField::MarginType => {
                if matches!(key, "left" | "right" | "space") {
                    form.margin_type = match form.margin_type {
                        MarginType::Percentage => MarginType::Fixed,
                        MarginType::Fixed => MarginType::Percentage,
                    };
                }
                true
            }
            UserField::Roles => match key {
                "j" | "down" => {
                    if form.focused_role + 1 < selectable_count {
                        form.focused_role += 1;
                    }
                    true
                }
                "k" | "up" => {
                    if form.focused_role > 0 {
                        form.focused_role -= 1;
                    }
                    true
                }
                "space" => {
                    form.toggle_focused_role(roles);
                    true
                }
                _ => true,
            },
            _ => match form.active_buffer() {
                Some(buffer) => !matches!(
                    buffer.process_key(key, shift, ctrl, cmd),
                    KeyInputResult::Ignored
                ),
                None => true,
            },
        }
    }

    fn render_form(&self, form: &UserForm, _cx: &mut Context<Self>) -> impl IntoElement {
        let colors = self.colors;
        let title = if form.mode.is_edit() {
            "Edit User"
        } else {
            "New User"
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
            let role_list = selectable_roles(&self.roles)
                .into_iter()
                .enumerate()
                .map(|(idx, role)| {
                    CheckField::new(
                        SharedString::from(format!("user-role-{idx}")),
                        role.name.clone(),
                    )
                    .checked(form.is_assigned(&role.id))
                    .active(form.active_field == UserField::Roles && form.focused_role == idx)
                    .into_any_element()
                })
                .collect::<Vec<_>>();

            div()
                .p(px(16.0))
                .flex()
                .flex_col()
                .gap(px(10.0))
                .child(
                    div()
                        .flex()
                        .gap(px(12.0))
                        .child(
                            div().flex_1().child(
                                TextField::new("user-name", "Name")
                                    .value(form.name.text().to_string())
                                    .active(form.active_field == UserField::Name),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                TextField::new("user-email", "Email")
                                    .value(form.email.text().to_string())
                                    .placeholder("ops@agency.pk")
                                    .active(form.active_field == UserField::Email),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                TextField::new("user-phone", "Phone")
                                    .value(form.phone.text().to_string())
                                    .placeholder("+92-300-0000000")
                                    .active(form.active_field == UserField::Phone),
                            ),
                        ),
                )
                .child(
                    div()
                        .flex()
                        .gap(px(12.0))
                        .child(
                            div().flex_1().child(
                                TextField::new("user-company", "Company")
                                    .value(form.company.text().to_string())
                                    .active(form.active_field == UserField::Company),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                TextField::new("user-address", "Address")
                                    .value(form.address.text().to_string())
                                    .active(form.active_field == UserField::Address),
                            ),
                        ),
                )
                .child(
                    div()
                        .flex()
                        .gap(px(12.0))
                        .child(
                            div().flex_1().child(
                                TextField::new("user-city", "City")
                                    .value(form.city.text().to_string())
                                    .active(form.active_field == UserField::City),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                TextField::new("user-country", "Country")
                                    .value(form.country.text().to_string())
                                    .active(form.active_field == UserField::Country),
                            ),
                        ),
                )
                .child(
                    div()
                        .flex()
                        .gap(px(12.0))
                        .child(
                            div().flex_1().child(
                                SelectField::new("user-margin-type", "Margin Type")
                                    .value(form.margin_type.label())
                                    .active(form.active_field == UserField::MarginType),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                TextField::new("user-margin-value", "Margin Value")
                                    .value(form.margin_value.text().to_string())
                                    .placeholder("5.0")
                                    .active(form.active_field == UserField::MarginValue),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                TextField::new("user-credit", "Credit")
                                    .value(form.credit.text().to_string())
                                    .placeholder("0")
                                    .active(form.active_field == UserField::Credit),
                            ),
                        ),
                )
                .child(
                    div()
                        .flex()
                        .gap(px(12.0))
                        .items_end()
                        .child(
                            div().flex_1().child(
                                TextField::new("user-password", "Password")
                                    .value(form.password.text().to_string())
                                    .placeholder(if form.mode.is_edit() {
                                        "leave blank to keep current"
                                    } else {
                                        "min 8 characters"
                                    })
                                    .concealed(true)
                                    .active(form.active_field == UserField::Password),
                            ),
                        )
                        .child(
                            div()
                                .pb(px(6.0))
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
                        ),
                )
                .child(
                    div()
                        .text_xs()
                        .text_color(colors.text_muted)
                        .child("ROLES (space to toggle — agencies are onboarded separately)"),
                )
                .child(
                    div()
                        .max_h(px(160.0))
                        .overflow_hidden()
                        .border_1()
                        .border_color(colors.border)
                        .rounded(px(6.0))
                        .p(px(4.0))
                        .flex()
                        .flex_col()
                        .children(role_list),
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
            .id("user-form-overlay")
            .absolute()
            .inset_0()
            .bg(gpui::rgba(0x00000080))
            .flex()
            .items_start()
            .justify_center()
            .pt(px(32.0))
            .child(
                div()
                    .w(px(680.0))
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
                                    .child("tab: next field · esc: discard"),
                            )
                            .child(
                                Button::new(
                                    "user-form-save",
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
            .and_then(|id| self.rows.iter().find(|user| user.id == *id))
            .map(|user| user.name.clone())
            .unwrap_or_default();

        div()
            .id("user-confirm-overlay")
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
                            .child(SharedString::from("Delete user?")),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(format!(
                                "\"{name}\" will lose access immediately."
                            ))),
                    )
                    .child(
                        div()
                            .flex()
                            .justify_between()
                            .child(
                                div()
                                    .id("user-confirm-cancel")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.cancel_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("user-confirm-cancel-button", "Cancel")
                                            .variant(ButtonVariant::Secondary)
                                            .shortcut("esc"),
                                    ),
                            )
                            .child(
                                div()
                                    .id("user-confirm-delete")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.confirm_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("user-confirm-delete-button", "Delete")
                                            .variant(ButtonVariant::Danger)
                                            .shortcut("enter"),
                                    ),
                            ),
                    ),
            )
    }
}

impl Render for UsersScreen {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let filtered: Vec<User> = self.filtered_rows().into_iter().cloned().collect();
        self.list_state.item_count = filtered.len();

        let visible_range = self.list_state.visible_range();
        let total_height = self.list_state.total_height();
        let colors = self.colors;
        let selected = self.selected;

        let rows: Vec<_> = filtered
            .iter()
            .enumerate()
            .filter(|(idx, _)| visible_range.contains(idx))
            .map(|(idx, user)| {
                let offset = self.list_state.item_offset(idx);
                let index = idx;
                let hover_bg = colors.surface;
                let margin = match user.margin_type {
                    MarginType::Percentage => format!("{}%", user.margin_value),
                    MarginType::Fixed => format!("{} flat", user.margin_value),
                };
                let tone = if user.status.is_active() {
                    BadgeTone::Positive
                } else {
                    BadgeTone::Negative
                };
                let click_handler = cx.listener(move |this, _: &ClickEvent, _window, cx| {
                    this.selected = index;
                    cx.notify();
                });

                div()
                    .id(SharedString::from(format!("user-{idx}")))
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
                            .w(px(160.0))
                            .truncate()
                            .font_weight(FontWeight::MEDIUM)
                            .text_sm()
                            .text_color(colors.text_primary)
                            .child(SharedString::from(user.name.clone())),
                    )
                    .child(
                        div()
                            .w(px(200.0))
                            .truncate()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(user.email.clone())),
                    )
                    .child(
                        div()
                            .flex_1()
                            .truncate()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(user.company.clone())),
                    )
                    .child(
                        div()
                            .w(px(90.0))
                            .text_sm()
                            .text_color(colors.text_muted)
                            .child(SharedString::from(margin)),
                    )
                    .child(
                        div()
                            .w(px(90.0))
                            .child(Badge::new(user.status.label(), tone)),
                    )
                    .into_any_element()
            })
            .collect();

        let show_loading = self.loading && self.rows.is_empty();
        let show_empty = !self.loading && filtered.is_empty();
        let search_text = if self.search.is_empty() {
            "Search users…".to_string()
        } else {
            self.search.text().to_string()
        };
        let filter_label = match self.status_filter {
            None => "All",
            Some(status) => status.label(),
        };

        div()
            .id("users-screen")
            .relative()
            .size_full()
            .flex()
            .flex_col()
            .bg(colors.background)
            .child(ListHeader::new("Users", filtered.len()).refreshing(self.loading))
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
                            .id("users-search")
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
                    .child(
                        div()
                            .id("users-filter")
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
                            .id("users-new")
                            .cursor_pointer()
                            .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                this.open_create();
                                cx.notify();
                            }))
                            .child(Button::new("users-new-button", "New User").shortcut("n")),
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
                    .child(div().w(px(160.0)).child("NAME"))
                    .child(div().w(px(200.0)).child("EMAIL"))
                    .child(div().flex_1().child("COMPANY"))
                    .child(div().w(px(90.0)).child("MARGIN"))
                    .child(div().w(px(90.0)).child("STATUS")),
            )
            .child(
                div()
                    .flex_1()
                    .overflow_y_hidden()
                    .when(show_loading, |this| this.child(LoadingState))
                    .when(show_empty, |this| {
                        this.child(EmptyState::new(
                            "No users",
                            "Press n to invite the first user",
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

    fn make_role(id: &str, name: &str) -> Role {
        Role {
            id: RoleId::from(id),
            name: name.to_string(),
            description: String::new(),
            permission_ids: vec![],
        }
    }

    fn make_user(id: &str, name: &str, status: RecordStatus) -> User {
        User {
            id: UserId::from(id),
            name: name.to_string(),
            email: format!("{id}@karwan.pk"),
            phone: "+92-300-1234567".to_string(),
            company: "Karwan Travels".to_string(),
            address: String::new(),
            city: "Karachi".to_string(),
            country: "Pakistan".to_string(),
            margin_type: MarginType::Percentage,
            margin_value: 5.0,
            credit: 10_000.0,
            status,
            role_ids: vec![RoleId::from("r-1")],
        }
    }

    fn screen() -> (UsersScreen, tokio::sync::mpsc::UnboundedReceiver<Command>) {
        let (bus, rx) = CommandBus::channel();
        let mut screen = UsersScreen::new(bus);
        screen.set_roles(vec![
            make_role("r-1", "Operations"),
            make_role("r-2", "Agent"),
            make_role("r-3", "Finance"),
        ]);
        (screen, rx)
    }

    #[test]
    fn agent_role_is_never_offered() {
        let roles = vec![
            make_role("r-1", "Operations"),
            make_role("r-2", "Agent"),
            make_role("r-3", "agent"),
        ];
        let selectable = selectable_roles(&roles);
        assert_eq!(selectable.len(), 1);
        assert_eq!(selectable[0].name, "Operations");
    }

    #[test]
    fn toggling_skips_agent_role_indices() {
        let (mut screen, _rx) = screen();
        screen.open_create();

        {
            let form = screen.form.as_mut().unwrap();
            form.active_field = UserField::Roles;
        }
        // Focused index 1 is "Finance" (Agent filtered out).
        screen.handle_key("j", false, false, false);
        screen.handle_key("space", false, false, false);

        let form = screen.form.as_ref().unwrap();
        assert!(form.is_assigned(&RoleId::from("r-3")));
        assert!(!form.is_assigned(&RoleId::from("r-2")));
    }

    #[test]
    fn create_requires_password() {
        let (mut screen, mut rx) = screen();
        screen.open_create();

        {
            let form = screen.form.as_mut().unwrap();
            form.name.set_text("Amir");
            form.email.set_text("amir@karwan.pk");
            form.phone.set_text("+92-300-1234567");
            form.margin_value.set_text("5");
            form.assigned = vec![RoleId::from("r-1")];
        }

        screen.handle_key("enter", false, true, false);
        assert!(screen
            .form
            .as_ref()
            .unwrap()
            .error
            .as_ref()
            .unwrap()
            .contains("Password"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn edit_sends_password_only_when_typed() {
        let (mut screen, mut rx) = screen();
        let user = make_user("u-1", "Amir", RecordStatus::Active);
        screen.set_rows(vec![user.clone()]);

        screen.open_edit();
        screen.apply_detail(&user);

        screen.handle_key("enter", false, true, false);
        match rx.try_recv().unwrap() {
            Command::SaveUser { id, payload } => {
                assert_eq!(id.unwrap().as_str(), "u-1");
                assert_eq!(payload.password, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bad_email_blocks_submission() {
        let (mut screen, mut rx) = screen();
        screen.open_create();

        {
            let form = screen.form.as_mut().unwrap();
            form.name.set_text("Amir");
            form.email.set_text("amir-at-karwan");
            form.phone.set_text("+92-300-1234567");
            form.margin_value.set_text("5");
            form.password.set_text("hunter2hunter2");
            form.assigned = vec![RoleId::from("r-1")];
        }

        screen.handle_key("enter", false, true, false);
        assert!(screen
            .form
            .as_ref()
            .unwrap()
            .error
            .as_ref()
            .unwrap()
            .contains("Email"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn status_toggle_is_involutive_over_two_requests() {
        let (mut screen, mut rx) = screen();
        screen.set_rows(vec![make_user("u-1", "Amir", RecordStatus::Active)]);

        screen.toggle_status();
        let first = match rx.try_recv().unwrap() {
            Command::SetUserStatus { status, .. } => status,
            other => panic!("unexpected command: {other:?}"),
        };
        assert_eq!(first, RecordStatus::DeActive);

        // Simulate the re-fetch reflecting the new status, then toggle back.
        screen.set_rows(vec![make_user("u-1", "Amir", RecordStatus::DeActive)]);
        screen.toggle_status();
        let second = match rx.try_recv().unwrap() {
            Command::SetUserStatus { status, .. } => status,
            other => panic!("unexpected command: {other:?}"),
        };
        assert_eq!(second, RecordStatus::Active);
    }

    #[test]
    fn margin_type_cycles_with_arrows() {
        let (mut screen, _rx) = screen();
        screen.open_create();
        {
            let form = screen.form.as_mut().unwrap();
            form.active_field = UserField::MarginType;
        }

        screen.handle_key("right", false, false, false);
        assert_eq!(
            screen.form.as_ref().unwrap().margin_type,
            MarginType::Fixed
        );
        screen.handle_key("right", false, false, false);
        assert_eq!(
            screen.form.as_ref().unwrap().margin_type,
            MarginType::Percentage
        );
    }
}
