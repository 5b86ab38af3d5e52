//! Flight-package links screen.
//!
//! The join entity between flights and tour packages: each link carries a
//! remaining-seat allotment and an availability status. The row-level
//! status action steps through the four availability states.

use gpui::{
    div, prelude::FluentBuilder, px, ClickEvent, Context, FontWeight, InteractiveElement,
    IntoElement, ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::app::events::{Command, CommandBus, RequestKind};
use crate::domain::{
    Flight, FlightId, FlightPackage, FlightPackageId, FlightPackagePayload, LinkStatus, Package,
    PackageId,
};
use crate::ui::components::{
    Badge, BadgeTone, Button, ButtonVariant, EmptyState, InputMask, KeyInputResult, ListHeader,
    LoadingState, SelectField, TextBuffer, TextField, VirtualizedListState,
};
use crate::ui::theme::ThemeColors;
use crate::ui::views::form::{parse_count, FieldError, FormMode, FormPhase};

const ROW_HEIGHT: f32 = 40.0;

fn status_tone(status: LinkStatus) -> BadgeTone {
    match status {
        LinkStatus::Active => BadgeTone::Positive,
        LinkStatus::SoldOut => BadgeTone::Negative,
        LinkStatus::Upcoming => BadgeTone::Warning,
        LinkStatus::Inactive => BadgeTone::Neutral,
    }
}

/// Next status in the row-action cycle.
fn next_status(status: LinkStatus) -> LinkStatus {
    match status {
        LinkStatus::Active => LinkStatus::SoldOut,
        LinkStatus::SoldOut => LinkStatus::Upcoming,
        LinkStatus::Upcoming => LinkStatus::Inactive,
        LinkStatus::Inactive => LinkStatus::Active,
    }
}

/// Fields of the link form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkField {
    Flight,
    Package,
    Seats,
    Status,
}

impl LinkField {
    fn next(self) -> Self {
        match self {
            LinkField::Flight => LinkField::Package,
            LinkField::Package => LinkField::Seats,
            LinkField::Seats => LinkField::Status,
            LinkField::Status => LinkField::Flight,
        }
    }

    fn previous(self) -> Self {
        match self {
            LinkField::Flight => LinkField::Status,
            LinkField::Package => LinkField::Flight,
            LinkField::Seats => LinkField::Package,
            LinkField::Status => LinkField::Seats,
        }
    }
}

/// Draft state of the link form.
pub struct LinkForm {
    mode: FormMode<FlightPackageId>,
    phase: FormPhase,
    flight_index: Option<usize>,
    package_index: Option<usize>,
    seats: TextBuffer,
    status: LinkStatus,
    active_field: LinkField,
    error: Option<String>,
}

impl LinkForm {
    fn create() -> Self {
        Self {
            mode: FormMode::Create,
            phase: FormPhase::Ready,
            flight_index: None,
            package_index: None,
            seats: TextBuffer::masked(InputMask::Digits),
            status: LinkStatus::Active,
            active_field: LinkField::Flight,
            error: None,
        }
    }

    fn edit(id: FlightPackageId) -> Self {
        Self {
            mode: FormMode::Edit(id),
            phase: FormPhase::Loading,
            ..Self::create()
        }
    }

    /// Loads the fetched record, resolving references against the lists.
    pub fn prefill(&mut self, link: &FlightPackage, flights: &[Flight], packages: &[Package]) {
        self.flight_index = flights.iter().position(|f| f.id == link.flight_id);
        self.package_index = packages.iter().position(|p| p.id == link.package_id);
        self.seats.set_text(link.remaining_seats.to_string());
        self.status = link.status;
        self.phase = FormPhase::Ready;
        self.active_field = LinkField::Flight;
    }

    fn validate(
        &self,
        flights: &[Flight],
        packages: &[Package],
    ) -> Result<FlightPackagePayload, FieldError> {
        let flight_id: FlightId = self
            .flight_index
            .and_then(|i| flights.get(i))
            .map(|f| f.id.clone())
            .ok_or_else(|| FieldError::new("Flight", "is required"))?;
        let package_id: PackageId = self
            .package_index
            .and_then(|i| packages.get(i))
            .map(|p| p.id.clone())
            .ok_or_else(|| FieldError::new("Package", "is required"))?;
        let remaining_seats = parse_count("Remaining seats", self.seats.text())?;

        Ok(FlightPackagePayload {
            flight_id,
            package_id,
            remaining_seats,
            status: self.status,
        })
    }

    /// Validates and moves to `Submitting` on success.
    pub fn submit(&mut self, flights: &[Flight], packages: &[Package]) -> Option<Command> {
        if self.phase != FormPhase::Ready {
            return None;
        }

        match self.validate(flights, packages) {
            Ok(payload) => {
                self.phase = FormPhase::Submitting;
                self.error = None;
                Some(Command::SaveFlightPackage {
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

    fn cycle(&mut self, forward: bool, flight_count: usize, package_count: usize) {
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
            LinkField::Flight => self.flight_index = step(self.flight_index, flight_count),
            LinkField::Package => self.package_index = step(self.package_index, package_count),
            LinkField::Status => {
                let all = LinkStatus::all();
                let current = all.iter().position(|s| *s == self.status).unwrap_or(0);
                let next = if forward {
                    (current + 1) % all.len()
                } else {
                    (current + all.len() - 1) % all.len()
                };
                self.status = all[next];
            }
            LinkField::Seats => {}
        }
    }
}

/// The flight-package links screen.
pub struct FlightPackagesScreen {
    colors: ThemeColors,
    commands: CommandBus,
    rows: Vec<FlightPackage>,
    flights: Vec<Flight>,
    packages: Vec<Package>,
    loading: bool,
    status_filter: Option<LinkStatus>,
    selected: usize,
    list_state: VirtualizedListState,
    form: Option<LinkForm>,
    pending_delete: Option<FlightPackageId>,
}

impl FlightPackagesScreen {
    /// Creates the screen.
    pub fn new(commands: CommandBus) -> Self {
        Self {
            colors: ThemeColors::dark(),
            commands,
            rows: Vec::new(),
            flights: Vec::new(),
            packages: Vec::new(),
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
    pub fn set_rows(&mut self, rows: Vec<FlightPackage>) {
        self.rows = rows;
        self.loading = false;
        self.clamp_selection();
    }

    /// A fetch failed: keep prior rows.
    pub fn fetch_failed(&mut self) {
        self.loading = false;
    }

    /// Updates the flight reference list.
    pub fn set_flights(&mut self, flights: Vec<Flight>) {
        self.flights = flights;
    }

    /// Updates the package reference list.
    pub fn set_packages(&mut self, packages: Vec<Package>) {
        self.packages = packages;
    }

    /// Applies the record detail an edit form is waiting for.
    pub fn apply_detail(&mut self, link: &FlightPackage) {
        if let Some(form) = &mut self.form {
            if form.phase == FormPhase::Loading
                && form.mode.record_id().as_ref() == Some(&link.id)
            {
                form.prefill(link, &self.flights, &self.packages);
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

    fn flight_number(&self, id: &FlightId) -> String {
        self.flights
            .iter()
            .find(|f| f.id == *id)
            .map(|f| f.number.clone())
            .unwrap_or_else(|| "—".to_string())
    }

    fn package_title(&self, id: &PackageId) -> String {
        self.packages
            .iter()
            .find(|p| p.id == *id)
            .map(|p| p.title.clone())
            .unwrap_or_else(|| "—".to_string())
    }

    /// Rows passing the status filter.
    pub fn filtered_rows(&self) -> Vec<&FlightPackage> {
        self.rows
            .iter()
            .filter(|link| {
                self.status_filter
                    .map(|status| link.status == status)
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

    fn selected_link(&self) -> Option<&FlightPackage> {
        self.filtered_rows().get(self.selected).copied()
    }

    /// Re-runs the collection fetch.
    pub fn refresh(&mut self) {
        self.loading = true;
        self.commands.dispatch(Command::FetchFlightPackages);
    }

    /// Opens an empty create form.
    pub fn open_create(&mut self) {
        self.form = Some(LinkForm::create());
    }

    /// Opens an edit form and fetches the record detail.
    pub fn open_edit(&mut self) {
        if let Some(link) = self.selected_link() {
            let id = link.id.clone();
            self.form = Some(LinkForm::edit(id.clone()));
            self.commands.dispatch(Command::FetchFlightPackageDetail(id));
        }
    }

    /// Asks for delete confirmation.
    pub fn request_delete(&mut self) {
        self.pending_delete = self.selected_link().map(|link| link.id.clone());
    }

    /// Confirms the pending delete.
    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.commands.dispatch(Command::DeleteFlightPackage(id));
        }
    }

    /// Declines the pending delete.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Requests the next availability status for the selected link.
    pub fn step_status(&mut self) {
        if let Some(link) = self.selected_link() {
            self.commands.dispatch(Command::SetFlightPackageStatus {
                id: link.id.clone(),
                status: next_status(link.status),
            });
        }
    }

    /// Cycles the status filter through all states.
    pub fn cycle_status_filter(&mut self) {
        self.status_filter = match self.status_filter {
            None => Some(LinkStatus::Active),
            Some(LinkStatus::Active) => Some(LinkStatus::SoldOut),
            Some(LinkStatus::SoldOut) => Some(LinkStatus::Upcoming),
            Some(LinkStatus::Upcoming) => Some(LinkStatus::Inactive),
            Some(LinkStatus::Inactive) => None,
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

        if self.form.is_some() {
            return self.handle_form_key(key, shift, ctrl, cmd);
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
                self.step_status();
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

    fn handle_form_key(&mut self, key: &str, shift: bool, ctrl: bool, cmd: bool) -> bool {
        let flight_count = self.flights.len();
        let package_count = self.packages.len();

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
                if let Some(command) = form.submit(&self.flights, &self.packages) {
                    self.commands.dispatch(command);
                }
                return true;
            }
            "enter" => {
                form.active_field = form.active_field.next();
                return true;
            }
            "left" => {
                form.cycle(false, flight_count, package_count);
                return true;
            }
            "right" => {
                form.cycle(true, flight_count, package_count);
                return true;
            }
            _ => {}
        }

        if form.active_field == LinkField::Seats {
            return !matches!(
                form.seats.process_key(key, shift, ctrl, cmd),
                KeyInputResult::Ignored
            );
        }
        true
    }

    fn render_form(&self, form: &LinkForm, _cx: &mut Context<Self>) -> impl IntoElement {
        let colors = self.colors;
        let title = if form.mode.is_edit() {
            "Edit Flight Package"
        } else {
            "New Flight Package"
        };

        let flight_label = form
            .flight_index
            .and_then(|i| self.flights.get(i))
            .map(|f| f.number.clone())
            .unwrap_or_default();
        let package_label = form
            .package_index
            .and_then(|i| self.packages.get(i))
            .map(|p| p.title.clone())
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
                    SelectField::new("link-flight", "Flight")
                        .value(flight_label)
                        .active(form.active_field == LinkField::Flight),
                )
                .child(
                    SelectField::new("link-package", "Package")
                        .value(package_label)
                        .active(form.active_field == LinkField::Package),
                )
                .child(
                    TextField::new("link-seats", "Remaining Seats")
                        .value(form.seats.text().to_string())
                        .placeholder("0")
                        .active(form.active_field == LinkField::Seats),
                )
                .child(
                    SelectField::new("link-status", "Status")
                        .value(form.status.label())
                        .active(form.active_field == LinkField::Status),
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
            .id("link-form-overlay")
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
                                    .child("◂ ▸: pick · tab: next field · esc: discard"),
                            )
                            .child(
                                Button::new(
                                    "link-form-save",
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

        div()
            .id("link-confirm-overlay")
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
                            .child(SharedString::from("Remove flight-package link?")),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(
                                "The package will no longer be bookable on this flight.",
                            )),
                    )
                    .child(
                        div()
                            .flex()
                            .justify_between()
                            .child(
                                div()
                                    .id("link-confirm-cancel")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.cancel_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("link-confirm-cancel-button", "Cancel")
                                            .variant(ButtonVariant::Secondary)
                                            .shortcut("esc"),
                                    ),
                            )
                            .child(
                                div()
                                    .id("link-confirm-delete")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.confirm_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("link-confirm-delete-button", "Remove")
                                            .variant(ButtonVariant::Danger)
                                            .shortcut("enter"),
                                    ),
                            ),
                    ),
            )
    }
}

impl Render for FlightPackagesScreen {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let filtered: Vec<FlightPackage> = self.filtered_rows().into_iter().cloned().collect();
        self.list_state.item_count = filtered.len();

        let visible_range = self.list_state.visible_range();
        let total_height = self.list_state.total_height();
        let colors = self.colors;
        let selected = self.selected;

        let rows: Vec<_> = filtered
            .iter()
            .enumerate()
            .filter(|(idx, _)| visible_range.contains(idx))
            .map(|(idx, link)| {
                let offset = self.list_state.item_offset(idx);
                let index = idx;
                let hover_bg = colors.surface;
                let flight_number = self.flight_number(&link.flight_id);
                let package_title = self.package_title(&link.package_id);
                let click_handler = cx.listener(move |this, _: &ClickEvent, _window, cx| {
                    this.selected = index;
                    cx.notify();
                });

                div()
                    .id(SharedString::from(format!("link-{idx}")))
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
                            .w(px(100.0))
                            .font_weight(FontWeight::SEMIBOLD)
                            .text_sm()
                            .text_color(colors.text_primary)
                            .child(SharedString::from(flight_number)),
                    )
                    .child(
                        div()
                            .flex_1()
                            .truncate()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(package_title)),
                    )
                    .child(
                        div()
                            .w(px(90.0))
                            .text_sm()
                            .text_color(if link.remaining_seats == 0 {
                                colors.error
                            } else {
                                colors.text_primary
                            })
                            .child(SharedString::from(format!("{} seats", link.remaining_seats))),
                    )
                    .child(
                        div()
                            .w(px(90.0))
                            .child(Badge::new(link.status.label(), status_tone(link.status))),
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
            .id("flight-packages-screen")
            .relative()
            .size_full()
            .flex()
            .flex_col()
            .bg(colors.background)
            .child(ListHeader::new("Flight Packages", filtered.len()).refreshing(self.loading))
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
                            .id("links-filter")
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
                            .id("links-new")
                            .cursor_pointer()
                            .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                this.open_create();
                                cx.notify();
                            }))
                            .child(Button::new("links-new-button", "New Link").shortcut("n")),
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
                    .child(div().w(px(100.0)).child("FLIGHT"))
                    .child(div().flex_1().child("PACKAGE"))
                    .child(div().w(px(90.0)).child("SEATS"))
                    .child(div().w(px(90.0)).child("STATUS")),
            )
            .child(
                div()
                    .flex_1()
                    .overflow_y_hidden()
                    .when(show_loading, |this| this.child(LoadingState))
                    .when(show_empty, |this| {
                        this.child(EmptyState::new(
                            "No flight packages",
                            "Press n to link a flight to a package",
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
    use crate::domain::FlightStop;
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    fn make_flight(id: &str, number: &str) -> Flight {
        Flight {
            id: FlightId::from(id),
            number: number.to_string(),
            airline_id: crate::domain::AirlineId::from("a-1"),
            sector_id: crate::domain::SectorId::from("s-1"),
            departure: FlightStop {
                city: "Karachi".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
                time: NaiveTime::from_hms_opt(22, 30, 0).unwrap(),
            },
            arrival: FlightStop {
                city: "Jeddah".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
                time: NaiveTime::from_hms_opt(1, 45, 0).unwrap(),
            },
        }
    }

    fn make_link(id: &str, seats: u32, status: LinkStatus) -> FlightPackage {
        FlightPackage {
            id: FlightPackageId::from(id),
            flight_id: FlightId::from("f-1"),
            package_id: PackageId::from("p-1"),
            remaining_seats: seats,
            status,
        }
    }

    fn screen() -> (
        FlightPackagesScreen,
        tokio::sync::mpsc::UnboundedReceiver<Command>,
    ) {
        let (bus, rx) = CommandBus::channel();
        let mut screen = FlightPackagesScreen::new(bus);
        screen.set_flights(vec![make_flight("f-1", "PK-741")]);
        screen.set_packages(vec![Package {
            id: PackageId::from("p-1"),
            title: "Umrah Economy 14 Days".to_string(),
        }]);
        (screen, rx)
    }

    #[test]
    fn status_cycle_covers_all_states() {
        assert_eq!(next_status(LinkStatus::Active), LinkStatus::SoldOut);
        assert_eq!(next_status(LinkStatus::SoldOut), LinkStatus::Upcoming);
        assert_eq!(next_status(LinkStatus::Upcoming), LinkStatus::Inactive);
        assert_eq!(next_status(LinkStatus::Inactive), LinkStatus::Active);
    }

    #[test]
    fn row_status_action_requests_next_state() {
        let (mut screen, mut rx) = screen();
        screen.set_rows(vec![make_link("l-1", 20, LinkStatus::Active)]);

        screen.handle_key("t", false, false, false);
        match rx.try_recv().unwrap() {
            Command::SetFlightPackageStatus { id, status } => {
                assert_eq!(id.as_str(), "l-1");
                assert_eq!(status, LinkStatus::SoldOut);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn seats_field_rejects_non_digits() {
        let (mut screen, _rx) = screen();
        screen.open_create();

        {
            let form = screen.form.as_mut().unwrap();
            form.active_field = LinkField::Seats;
        }
        screen.handle_key("4", false, false, false);
        screen.handle_key("x", false, false, false);
        screen.handle_key("2", false, false, false);

        assert_eq!(screen.form.as_ref().unwrap().seats.text(), "42");
    }

    #[test]
    fn missing_references_block_submission() {
        let (mut screen, mut rx) = screen();
        screen.open_create();
        {
            let form = screen.form.as_mut().unwrap();
            form.seats.set_text("10");
        }

        screen.handle_key("enter", false, true, false);
        assert!(screen.form.as_ref().unwrap().error.is_some());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn complete_draft_submits_once() {
        let (mut screen, mut rx) = screen();
        screen.open_create();

        {
            let form = screen.form.as_mut().unwrap();
            form.flight_index = Some(0);
            form.package_index = Some(0);
            form.seats.set_text("15");
            form.status = LinkStatus::Upcoming;
        }

        screen.handle_key("enter", false, true, false);
        match rx.try_recv().unwrap() {
            Command::SaveFlightPackage { payload, .. } => {
                assert_eq!(payload.remaining_seats, 15);
                assert_eq!(payload.status, LinkStatus::Upcoming);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn status_filter_narrows_rows() {
        let (mut screen, _rx) = screen();
        screen.set_rows(vec![
            make_link("l-1", 20, LinkStatus::Active),
            make_link("l-2", 0, LinkStatus::SoldOut),
        ]);

        screen.cycle_status_filter();
        assert_eq!(screen.filtered_rows().len(), 1);
        assert_eq!(screen.filtered_rows()[0].status, LinkStatus::Active);
    }
}
