//! Roles screen.
//!
//! Roles bundle permissions from the backend's catalog. The form exposes
//! the catalog as a keyboard-driven checklist; space toggles the focused
//! permission.

use gpui::{
    div, prelude::FluentBuilder, px, ClickEvent, Context, FontWeight, InteractiveElement,
    IntoElement, ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::app::events::{Command, CommandBus, RequestKind};
use crate::domain::{Permission, PermissionId, Role, RoleId, RolePayload};
use crate::ui::components::{
    Button, ButtonVariant, CheckField, EmptyState, KeyInputResult, ListHeader, LoadingState,
    TextBuffer, TextField, VirtualizedListState,
};
use crate::ui::theme::ThemeColors;
use crate::ui::views::form::{require, FieldError, FormMode, FormPhase};

const ROW_HEIGHT: f32 = 40.0;

/// Fields of the role form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleField {
    Name,
    Description,
    Permissions,
}

impl RoleField {
    fn next(self) -> Self {
        match self {
            RoleField::Name => RoleField::Description,
            RoleField::Description => RoleField::Permissions,
            RoleField::Permissions => RoleField::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            RoleField::Name => RoleField::Permissions,
            RoleField::Description => RoleField::Name,
            RoleField::Permissions => RoleField::Description,
        }
    }
}

/// Draft state of the role form.
pub struct RoleForm {
    mode: FormMode<RoleId>,
    phase: FormPhase,
    name: TextBuffer,
    description: TextBuffer,
    granted: Vec<PermissionId>,
    /// Index into the permission catalog for keyboard focus.
    focused_permission: usize,
    active_field: RoleField,
    error: Option<String>,
}

impl RoleForm {
    fn create() -> Self {
        Self {
            mode: FormMode::Create,
            phase: FormPhase::Ready,
            name: TextBuffer::new(),
            description: TextBuffer::new(),
            granted: Vec::new(),
            focused_permission: 0,
            active_field: RoleField::Name,
            error: None,
        }
    }

    fn edit(id: RoleId) -> Self {
        Self {
            mode: FormMode::Edit(id),
            phase: FormPhase::Loading,
            ..Self::create()
        }
    }

    /// Loads the fetched record into the draft.
    pub fn prefill(&mut self, role: &Role) {
        self.name.set_text(role.name.clone());
        self.description.set_text(role.description.clone());
        self.granted = role.permission_ids.clone();
        self.phase = FormPhase::Ready;
        self.active_field = RoleField::Name;
    }

    /// Returns whether a permission is granted in the draft.
    pub fn is_granted(&self, id: &PermissionId) -> bool {
        self.granted.contains(id)
    }

    /// Toggles the focused permission.
    pub fn toggle_focused(&mut self, catalog: &[Permission]) {
        if let Some(permission) = catalog.get(self.focused_permission) {
            if let Some(pos) = self.granted.iter().position(|id| *id == permission.id) {
                self.granted.remove(pos);
            } else {
                self.granted.push(permission.id.clone());
            }
        }
    }

    fn validate(&self) -> Result<RolePayload, FieldError> {
        let name = require("Role name", self.name.text())?;
        if self.granted.is_empty() {
            return Err(FieldError::new(
                "Permissions",
                "grant at least one permission",
            ));
        }
        Ok(RolePayload {
            name,
            description: self.description.trimmed().to_string(),
            permission_ids: self.granted.clone(),
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
                Some(Command::SaveRole {
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
}

/// The roles list screen.
pub struct RolesScreen {
    colors: ThemeColors,
    commands: CommandBus,
    rows: Vec<Role>,
    permissions: Vec<Permission>,
    loading: bool,
    search: TextBuffer,
    search_active: bool,
    selected: usize,
    list_state: VirtualizedListState,
    form: Option<RoleForm>,
    pending_delete: Option<RoleId>,
}

impl RolesScreen {
    /// Creates the screen.
    pub fn new(commands: CommandBus) -> Self {
        Self {
            colors: ThemeColors::dark(),
            commands,
            rows: Vec::new(),
            permissions: Vec::new(),
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
    pub fn set_rows(&mut self, rows: Vec<Role>) {
        self.rows = rows;
        self.loading = false;
        self.clamp_selection();
    }

    /// A fetch failed: keep prior rows.
    pub fn fetch_failed(&mut self) {
        self.loading = false;
    }

    /// Updates the permission catalog used by the form.
    pub fn set_permissions(&mut self, permissions: Vec<Permission>) {
        self.permissions = permissions;
    }

    /// Applies the record detail an edit form is waiting for.
    pub fn apply_detail(&mut self, role: &Role) {
        if let Some(form) = &mut self.form {
            if form.phase == FormPhase::Loading
                && form.mode.record_id().as_ref() == Some(&role.id)
            {
                form.prefill(role);
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
    pub fn filtered_rows(&self) -> Vec<&Role> {
        let needle = self.search.trimmed().to_lowercase();
        self.rows
            .iter()
            .filter(|role| {
                needle.is_empty()
                    || role.name.to_lowercase().contains(&needle)
                    || role.description.to_lowercase().contains(&needle)
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

    fn selected_role(&self) -> Option<&Role> {
        self.filtered_rows().get(self.selected).copied()
    }

    /// Re-runs the collection fetch.
    pub fn refresh(&mut self) {
        self.loading = true;
        self.commands.dispatch(Command::FetchRoles);
    }

    /// Opens an empty create form.
    pub fn open_create(&mut self) {
        self.form = Some(RoleForm::create());
    }

    /// Opens an edit form and fetches the record detail.
    pub fn open_edit(&mut self) {
        if let Some(role) = self.selected_role() {
            let id = role.id.clone();
            self.form = Some(RoleForm::edit(id.clone()));
            self.commands.dispatch(Command::FetchRoleDetail(id));
        }
    }

    /// Asks for delete confirmation.
    pub fn request_delete(&mut self) {
        self.pending_delete = self.selected_role().map(|role| role.id.clone());
    }

    /// Confirms the pending delete.
    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.commands.dispatch(Command::DeleteRole(id));
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
        let catalog_len = self.permissions.len();
        let permissions = &self.permissions;

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

        if form.active_field == RoleField::Permissions {
            return match key {
                "j" | "down" => {
                    if form.focused_permission + 1 < catalog_len {
                        form.focused_permission += 1;
                    }
                    true
                }
                "k" | "up" => {
                    if form.focused_permission > 0 {
                        form.focused_permission -= 1;
                    }
                    true
                }
                "space" => {
                    form.toggle_focused(permissions);
                    true
                }
                _ => true,
            };
        }

        let buffer = match form.active_field {
            RoleField::Name => &mut form.name,
            RoleField::Description => &mut form.description,
            RoleField::Permissions => unreachable!(),
        };
        !matches!(
            buffer.process_key(key, shift, ctrl, cmd),
            KeyInputResult::Ignored
        )
    }

    fn render_form(&self, form: &RoleForm, _cx: &mut Context<Self>) -> impl IntoElement {
        let colors = self.colors;
        let title = if form.mode.is_edit() {
            "Edit Role"
        } else {
            "New Role"
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
            let checklist = self
                .permissions
                .iter()
                .enumerate()
                .map(|(idx, permission)| {
                    CheckField::new(
                        SharedString::from(format!("role-perm-{idx}")),
                        format!("{} · {}", permission.module, permission.label),
                    )
                    .checked(form.is_granted(&permission.id))
                    .active(
                        form.active_field == RoleField::Permissions
                            && form.focused_permission == idx,
                    )
                    .into_any_element()
                })
                .collect::<Vec<_>>();

            div()
                .p(px(16.0))
                .flex()
                .flex_col()
                .gap(px(12.0))
                .child(
                    TextField::new("role-name", "Role Name")
                        .value(form.name.text().to_string())
                        .placeholder("e.g. Operations")
                        .active(form.active_field == RoleField::Name),
                )
                .child(
                    TextField::new("role-description", "Description")
                        .value(form.description.text().to_string())
                        .active(form.active_field == RoleField::Description),
                )
                .child(
                    div()
                        .text_xs()
                        .text_color(colors.text_muted)
                        .child("PERMISSIONS (space to toggle)"),
                )
                .child(
                    div()
                        .max_h(px(220.0))
                        .overflow_hidden()
                        .border_1()
                        .border_color(colors.border)
                        .rounded(px(6.0))
                        .p(px(4.0))
                        .flex()
                        .flex_col()
                        .children(checklist),
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
            .id("role-form-overlay")
            .absolute()
            .inset_0()
            .bg(gpui::rgba(0x00000080))
            .flex()
            .items_start()
            .justify_center()
            .pt(px(48.0))
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
                                    "role-form-save",
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
            .and_then(|id| self.rows.iter().find(|role| role.id == *id))
            .map(|role| role.name.clone())
            .unwrap_or_default();

        div()
            .id("role-confirm-overlay")
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
                            .child(SharedString::from("Delete role?")),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(format!(
                                "Users assigned \"{name}\" will lose its permissions."
                            ))),
                    )
                    .child(
                        div()
                            .flex()
                            .justify_between()
                            .child(
                                div()
                                    .id("role-confirm-cancel")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.cancel_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("role-confirm-cancel-button", "Cancel")
                                            .variant(ButtonVariant::Secondary)
                                            .shortcut("esc"),
                                    ),
                            )
                            .child(
                                div()
                                    .id("role-confirm-delete")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.confirm_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("role-confirm-delete-button", "Delete")
                                            .variant(ButtonVariant::Danger)
                                            .shortcut("enter"),
                                    ),
                            ),
                    ),
            )
    }
}

impl Render for RolesScreen {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let filtered: Vec<Role> = self.filtered_rows().into_iter().cloned().collect();
        self.list_state.item_count = filtered.len();

        let visible_range = self.list_state.visible_range();
        let total_height = self.list_state.total_height();
        let colors = self.colors;
        let selected = self.selected;

        let rows: Vec<_> = filtered
            .iter()
            .enumerate()
            .filter(|(idx, _)| visible_range.contains(idx))
            .map(|(idx, role)| {
                let offset = self.list_state.item_offset(idx);
                let index = idx;
                let hover_bg = colors.surface;
                let click_handler = cx.listener(move |this, _: &ClickEvent, _window, cx| {
                    this.selected = index;
                    cx.notify();
                });

                div()
                    .id(SharedString::from(format!("role-{idx}")))
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
                            .child(SharedString::from(role.name.clone())),
                    )
                    .child(
                        div()
                            .flex_1()
                            .truncate()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(role.description.clone())),
                    )
                    .child(
                        div()
                            .w(px(120.0))
                            .text_xs()
                            .text_color(colors.text_muted)
                            .child(SharedString::from(format!(
                                "{} permissions",
                                role.permission_ids.len()
                            ))),
                    )
                    .into_any_element()
            })
            .collect();

        let show_loading = self.loading && self.rows.is_empty();
        let show_empty = !self.loading && filtered.is_empty();
        let search_text = if self.search.is_empty() {
            "Search roles…".to_string()
        } else {
            self.search.text().to_string()
        };

        div()
            .id("roles-screen")
            .relative()
            .size_full()
            .flex()
            .flex_col()
            .bg(colors.background)
            .child(ListHeader::new("Roles", filtered.len()).refreshing(self.loading))
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
                            .id("roles-search")
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
                            .id("roles-new")
                            .cursor_pointer()
                            .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                this.open_create();
                                cx.notify();
                            }))
                            .child(Button::new("roles-new-button", "New Role").shortcut("n")),
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
                    .child(div().w(px(180.0)).child("ROLE"))
                    .child(div().flex_1().child("DESCRIPTION"))
                    .child(div().w(px(120.0)).child("GRANTS")),
            )
            .child(
                div()
                    .flex_1()
                    .overflow_y_hidden()
                    .when(show_loading, |this| this.child(LoadingState))
                    .when(show_empty, |this| {
                        this.child(EmptyState::new(
                            "No roles",
                            "Press n to define the first role",
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

    fn make_permission(id: &str, slug: &str) -> Permission {
        Permission {
            id: PermissionId::from(id),
            slug: slug.to_string(),
            label: slug.replace(':', " "),
            module: "CATALOG".to_string(),
        }
    }

    fn screen() -> (RolesScreen, tokio::sync::mpsc::UnboundedReceiver<Command>) {
        let (bus, rx) = CommandBus::channel();
        let mut screen = RolesScreen::new(bus);
        screen.set_permissions(vec![
            make_permission("p-1", "flights:read"),
            make_permission("p-2", "flights:write"),
        ]);
        (screen, rx)
    }

    #[test]
    fn space_toggles_focused_permission() {
        let (mut screen, _rx) = screen();
        screen.open_create();

        {
            let form = screen.form.as_mut().unwrap();
            form.active_field = RoleField::Permissions;
        }
        screen.handle_key("space", false, false, false);
        assert!(screen
            .form
            .as_ref()
            .unwrap()
            .is_granted(&PermissionId::from("p-1")));

        screen.handle_key("space", false, false, false);
        assert!(!screen
            .form
            .as_ref()
            .unwrap()
            .is_granted(&PermissionId::from("p-1")));
    }

    #[test]
    fn role_without_permissions_is_blocked() {
        let (mut screen, mut rx) = screen();
        screen.open_create();
        {
            let form = screen.form.as_mut().unwrap();
            form.name.set_text("Viewer");
        }

        screen.handle_key("enter", false, true, false);
        assert!(screen
            .form
            .as_ref()
            .unwrap()
            .error
            .as_ref()
            .unwrap()
            .contains("Permissions"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn granted_permissions_serialize_into_payload() {
        let (mut screen, mut rx) = screen();
        screen.open_create();

        {
            let form = screen.form.as_mut().unwrap();
            form.name.set_text("Operations");
            form.active_field = RoleField::Permissions;
        }
        screen.handle_key("space", false, false, false);
        screen.handle_key("j", false, false, false);
        screen.handle_key("space", false, false, false);

        screen.handle_key("enter", false, true, false);
        match rx.try_recv().unwrap() {
            Command::SaveRole { payload, .. } => {
                assert_eq!(payload.permission_ids.len(), 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn prefill_restores_grants() {
        let (mut screen, _rx) = screen();
        let role = Role {
            id: RoleId::from("r-1"),
            name: "Finance".to_string(),
            description: "Vouchers and banks".to_string(),
            permission_ids: vec![PermissionId::from("p-2")],
        };
        screen.set_rows(vec![role.clone()]);

        screen.open_edit();
        screen.apply_detail(&role);

        let form = screen.form.as_ref().unwrap();
        assert!(form.is_granted(&PermissionId::from("p-2")));
        assert!(!form.is_granted(&PermissionId::from("p-1")));
    }
}
