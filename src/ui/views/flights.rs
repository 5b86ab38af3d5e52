//! Flights screen.
//!
//! Flights reference airlines and sectors by id; the form offers both as
//! cycling selectors over the already-fetched reference lists. Dates are
//! entered as `YYYY-MM-DD`, times as `HH:MM`.

use gpui::{
    div, prelude::FluentBuilder, px, ClickEvent, Context, FontWeight, InteractiveElement,
    IntoElement, ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::app::events::{Command, CommandBus, RequestKind};
use crate::domain::{
    Airline, AirlineId, Flight, FlightId, FlightPayload, FlightStop, Sector, SectorId,
};
use crate::ui::components::{
    Button, ButtonVariant, EmptyState, KeyInputResult, ListHeader, LoadingState, SelectField,
    TextBuffer, TextField, VirtualizedListState,
};
use crate::ui::theme::ThemeColors;
use crate::ui::views::form::{parse_date, parse_time, require, FieldError, FormMode, FormPhase};

const ROW_HEIGHT: f32 = 44.0;

/// Fields of the flight form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlightField {
    Number,
    Airline,
    Sector,
    DepartureCity,
    DepartureDate,
    DepartureTime,
    ArrivalCity,
    ArrivalDate,
    ArrivalTime,
}

impl FlightField {
    fn next(self) -> Self {
        use FlightField::*;
        match self {
            Number => Airline,
            Airline => Sector,
            Sector => DepartureCity,
            DepartureCity => DepartureDate,
            DepartureDate => DepartureTime,
            DepartureTime => ArrivalCity,
            ArrivalCity => ArrivalDate,
            ArrivalDate => ArrivalTime,
            ArrivalTime => Number,
        }
    }

    fn previous(self) -> Self {
        use FlightField::*;
        match self {
            Number => ArrivalTime,
            Airline => Number,
            Sector => Airline,
            DepartureCity => Sector,
            DepartureDate => DepartureCity,
            DepartureTime => DepartureDate,
            ArrivalCity => DepartureTime,
            ArrivalDate => ArrivalCity,
            ArrivalTime => ArrivalDate,
        }
    }
}

/// Draft state of the flight form.
pub struct FlightForm {
    mode: FormMode<FlightId>,
    phase: FormPhase,
    number: TextBuffer,
    /// Index into the screen's airline reference list.
    airline_index: Option<usize>,
    /// Index into the screen's sector reference list.
    sector_index: Option<usize>,
    departure_city: TextBuffer,
    departure_date: TextBuffer,
    departure_time: TextBuffer,
    arrival_city: TextBuffer,
    arrival_date: TextBuffer,
    arrival_time: TextBuffer,
    active_field: FlightField,
    error: Option<String>,
}

impl FlightForm {
    fn create() -> Self {
        Self {
            mode: FormMode::Create,
            phase: FormPhase::Ready,
            number: TextBuffer::new(),
            airline_index: None,
            sector_index: None,
            departure_city: TextBuffer::new(),
            departure_date: TextBuffer::new(),
            departure_time: TextBuffer::new(),
            arrival_city: TextBuffer::new(),
            arrival_date: TextBuffer::new(),
            arrival_time: TextBuffer::new(),
            active_field: FlightField::Number,
            error: None,
        }
    }

    fn edit(id: FlightId) -> Self {
        Self {
            mode: FormMode::Edit(id),
            phase: FormPhase::Loading,
            ..Self::create()
        }
    }

    /// Loads the fetched record, resolving references against the lists.
    pub fn prefill(&mut self, flight: &Flight, airlines: &[Airline], sectors: &[Sector]) {
        self.number.set_text(flight.number.clone());
        self.airline_index = airlines.iter().position(|a| a.id == flight.airline_id);
        self.sector_index = sectors.iter().position(|s| s.id == flight.sector_id);
        self.departure_city.set_text(flight.departure.city.clone());
        self.departure_date
            .set_text(flight.departure.date.format("%Y-%m-%d").to_string());
        self.departure_time
            .set_text(flight.departure.time.format("%H:%M").to_string());
        self.arrival_city.set_text(flight.arrival.city.clone());
        self.arrival_date
            .set_text(flight.arrival.date.format("%Y-%m-%d").to_string());
        self.arrival_time
            .set_text(flight.arrival.time.format("%H:%M").to_string());
        self.phase = FormPhase::Ready;
        self.active_field = FlightField::Number;
    }

    fn validate(
        &self,
        airlines: &[Airline],
        sectors: &[Sector],
    ) -> Result<FlightPayload, FieldError> {
        let number = require("Flight number", self.number.text())?;
        let airline_id: AirlineId = self
            .airline_index
            .and_then(|i| airlines.get(i))
            .map(|a| a.id.clone())
            .ok_or_else(|| FieldError::new("Airline", "is required"))?;
        let sector_id: SectorId = self
            .sector_index
            .and_then(|i| sectors.get(i))
            .map(|s| s.id.clone())
            .ok_or_else(|| FieldError::new("Sector", "is required"))?;

        let departure = FlightStop {
            city: require("Departure city", self.departure_city.text())?,
            date: parse_date("Departure date", self.departure_date.text())?,
            time: parse_time("Departure time", self.departure_time.text())?,
        };
        let arrival = FlightStop {
            city: require("Arrival city", self.arrival_city.text())?,
            date: parse_date("Arrival date", self.arrival_date.text())?,
            time: parse_time("Arrival time", self.arrival_time.text())?,
        };

        Ok(FlightPayload {
            number,
            airline_id,
            sector_id,
            departure,
            arrival,
        })
    }

    /// Validates and moves to `Submitting` on success.
    pub fn submit(&mut self, airlines: &[Airline], sectors: &[Sector]) -> Option<Command> {
        if self.phase != FormPhase::Ready {
            return None;
        }

        match self.validate(airlines, sectors) {
            Ok(payload) => {
                self.phase = FormPhase::Submitting;
                self.error = None;
                Some(Command::SaveFlight {
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

    fn cycle_selection(&mut self, forward: bool, airline_count: usize, sector_count: usize) {
        let cycle = |index: Option<usize>, count: usize| -> Option<usize> {
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
            FlightField::Airline => self.airline_index = cycle(self.airline_index, airline_count),
            FlightField::Sector => self.sector_index = cycle(self.sector_index, sector_count),
            _ => {}
        }
    }

    fn active_buffer(&mut self) -> Option<&mut TextBuffer> {
        match self.active_field {
            FlightField::Number => Some(&mut self.number),
            FlightField::Airline | FlightField::Sector => None,
            FlightField::DepartureCity => Some(&mut self.departure_city),
            FlightField::DepartureDate => Some(&mut self.departure_date),
            FlightField::DepartureTime => Some(&mut self.departure_time),
            FlightField::ArrivalCity => Some(&mut self.arrival_city),
            FlightField::ArrivalDate => Some(&mut self.arrival_date),
            FlightField::ArrivalTime => Some(&mut self.arrival_time),
        }
    }
}

/// The flights list screen.
pub struct FlightsScreen {
    colors: ThemeColors,
    commands: CommandBus,
    rows: Vec<Flight>,
    airlines: Vec<Airline>,
    sectors: Vec<Sector>,
    loading: bool,
    search: TextBuffer,
    search_active: bool,
    selected: usize,
    list_state: VirtualizedListState,
    form: Option<FlightForm>,
    pending_delete: Option<FlightId>,
}

impl FlightsScreen {
    /// Creates the screen.
    pub fn new(commands: CommandBus) -> Self {
        Self {
            colors: ThemeColors::dark(),
            commands,
            rows: Vec::new(),
            airlines: Vec::new(),
            sectors: Vec::new(),
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
    pub fn set_rows(&mut self, rows: Vec<Flight>) {
        self.rows = rows;
        self.loading = false;
        self.clamp_selection();
    }

    /// A fetch failed: keep prior rows.
    pub fn fetch_failed(&mut self) {
        self.loading = false;
    }

    /// Updates the airline reference list used by the form.
    pub fn set_airlines(&mut self, airlines: Vec<Airline>) {
        self.airlines = airlines;
    }

    /// Updates the sector reference list used by the form.
    pub fn set_sectors(&mut self, sectors: Vec<Sector>) {
        self.sectors = sectors;
    }

    /// Applies the record detail an edit form is waiting for.
    pub fn apply_detail(&mut self, flight: &Flight) {
        if let Some(form) = &mut self.form {
            if form.phase == FormPhase::Loading
                && form.mode.record_id().as_ref() == Some(&flight.id)
            {
                form.prefill(flight, &self.airlines, &self.sectors);
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

    fn airline_code(&self, id: &AirlineId) -> String {
        self.airlines
            .iter()
            .find(|a| a.id == *id)
            .map(|a| a.short_code.clone())
            .unwrap_or_else(|| "—".to_string())
    }

    fn sector_title(&self, id: &SectorId) -> String {
        self.sectors
            .iter()
            .find(|s| s.id == *id)
            .map(|s| s.title.clone())
            .unwrap_or_else(|| "—".to_string())
    }

    /// Rows passing the search filter (number, airline code, sector).
    pub fn filtered_rows(&self) -> Vec<&Flight> {
        let needle = self.search.trimmed().to_lowercase();
        self.rows
            .iter()
            .filter(|flight| {
                needle.is_empty()
                    || flight.number.to_lowercase().contains(&needle)
                    || flight.departure.city.to_lowercase().contains(&needle)
                    || flight.arrival.city.to_lowercase().contains(&needle)
                    || self
                        .airline_code(&flight.airline_id)
                        .to_lowercase()
                        .contains(&needle)
                    || self
                        .sector_title(&flight.sector_id)
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

    fn selected_flight(&self) -> Option<&Flight> {
        self.filtered_rows().get(self.selected).copied()
    }

    /// Re-runs the collection fetch.
    pub fn refresh(&mut self) {
        self.loading = true;
        self.commands.dispatch(Command::FetchFlights);
    }

    /// Opens an empty create form.
    pub fn open_create(&mut self) {
        self.form = Some(FlightForm::create());
    }

    /// Opens an edit form and fetches the record detail.
    pub fn open_edit(&mut self) {
        if let Some(flight) = self.selected_flight() {
            let id = flight.id.clone();
            self.form = Some(FlightForm::edit(id.clone()));
            self.commands.dispatch(Command::FetchFlightDetail(id));
        }
    }

    /// Asks for delete confirmation.
    pub fn request_delete(&mut self) {
        self.pending_delete = self.selected_flight().map(|flight| flight.id.clone());
    }

    /// Confirms the pending delete.
    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.commands.dispatch(Command::DeleteFlight(id));
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
        let airline_count = self.airlines.len();
        let sector_count = self.sectors.len();

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
                if let Some(command) = form.submit(&self.airlines, &self.sectors) {
                    self.commands.dispatch(command);
                }
                return true;
            }
            "enter" => {
                form.active_field = form.active_field.next();
                return true;
            }
            "left" => {
                if matches!(form.active_field, FlightField::Airline | FlightField::Sector) {
                    form.cycle_selection(false, airline_count, sector_count);
                    return true;
                }
            }
            "right" => {
                if matches!(form.active_field, FlightField::Airline | FlightField::Sector) {
                    form.cycle_selection(true, airline_count, sector_count);
                    return true;
                }
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

    fn render_form(&self, form: &FlightForm, _cx: &mut Context<Self>) -> impl IntoElement {
        let colors = self.colors;
        let title = if form.mode.is_edit() {
            "Edit Flight"
        } else {
            "New Flight"
        };

        let airline_label = form
            .airline_index
            .and_then(|i| self.airlines.get(i))
            .map(|a| format!("{} ({})", a.name, a.short_code))
            .unwrap_or_default();
        let sector_label = form
            .sector_index
            .and_then(|i| self.sectors.get(i))
            .map(|s| s.title.clone())
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
                                TextField::new("flight-number", "Flight Number")
                                    .value(form.number.text().to_string())
                                    .placeholder("PK-741")
                                    .active(form.active_field == FlightField::Number),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                SelectField::new("flight-airline", "Airline")
                                    .value(airline_label)
                                    .active(form.active_field == FlightField::Airline),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                SelectField::new("flight-sector", "Sector")
                                    .value(sector_label)
                                    .active(form.active_field == FlightField::Sector),
                            ),
                        ),
                )
                .child(
                    div()
                        .text_xs()
                        .text_color(colors.text_muted)
                        .child("DEPARTURE"),
                )
                .child(
                    div()
                        .flex()
                        .gap(px(12.0))
                        .child(
                            div().flex_1().child(
                                TextField::new("flight-dep-city", "City")
                                    .value(form.departure_city.text().to_string())
                                    .active(form.active_field == FlightField::DepartureCity),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                TextField::new("flight-dep-date", "Date")
                                    .value(form.departure_date.text().to_string())
                                    .placeholder("2025-03-14")
                                    .active(form.active_field == FlightField::DepartureDate),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                TextField::new("flight-dep-time", "Time")
                                    .value(form.departure_time.text().to_string())
                                    .placeholder("22:30")
                                    .active(form.active_field == FlightField::DepartureTime),
                            ),
                        ),
                )
                .child(
                    div()
                        .text_xs()
                        .text_color(colors.text_muted)
                        .child("ARRIVAL"),
                )
                .child(
                    div()
                        .flex()
                        .gap(px(12.0))
                        .child(
                            div().flex_1().child(
                                TextField::new("flight-arr-city", "City")
                                    .value(form.arrival_city.text().to_string())
                                    .active(form.active_field == FlightField::ArrivalCity),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                TextField::new("flight-arr-date", "Date")
                                    .value(form.arrival_date.text().to_string())
                                    .placeholder("2025-03-15")
                                    .active(form.active_field == FlightField::ArrivalDate),
                            ),
                        )
                        .child(
                            div().flex_1().child(
                                TextField::new("flight-arr-time", "Time")
                                    .value(form.arrival_time.text().to_string())
                                    .placeholder("01:45")
                                    .active(form.active_field == FlightField::ArrivalTime),
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
            .id("flight-form-overlay")
            .absolute()
            .inset_0()
            .bg(gpui::rgba(0x00000080))
            .flex()
            .items_start()
            .justify_center()
            .pt(px(48.0))
            .child(
                div()
                    .w(px(640.0))
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
                            .child(div().text_xs().text_color(colors.text_muted).child(
                                "tab: next field · ◂ ▸: pick airline/sector · esc: discard",
                            ))
                            .child(
                                Button::new(
                                    "flight-form-save",
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
            .and_then(|id| self.rows.iter().find(|flight| flight.id == *id))
            .map(|flight| flight.number.clone())
            .unwrap_or_default();

        div()
            .id("flight-confirm-overlay")
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
                            .child(SharedString::from("Delete flight?")),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(format!(
                                "Flight {number} will be permanently removed."
                            ))),
                    )
                    .child(
                        div()
                            .flex()
                            .justify_between()
                            .child(
                                div()
                                    .id("flight-confirm-cancel")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.cancel_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("flight-confirm-cancel-button", "Cancel")
                                            .variant(ButtonVariant::Secondary)
                                            .shortcut("esc"),
                                    ),
                            )
                            .child(
                                div()
                                    .id("flight-confirm-delete")
                                    .cursor_pointer()
                                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                        this.confirm_delete();
                                        cx.notify();
                                    }))
                                    .child(
                                        Button::new("flight-confirm-delete-button", "Delete")
                                            .variant(ButtonVariant::Danger)
                                            .shortcut("enter"),
                                    ),
                            ),
                    ),
            )
    }
}

impl Render for FlightsScreen {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let filtered: Vec<Flight> = self.filtered_rows().into_iter().cloned().collect();
        self.list_state.item_count = filtered.len();

        let visible_range = self.list_state.visible_range();
        let total_height = self.list_state.total_height();
        let colors = self.colors;
        let selected = self.selected;

        let rows: Vec<_> = filtered
            .iter()
            .enumerate()
            .filter(|(idx, _)| visible_range.contains(idx))
            .map(|(idx, flight)| {
                let offset = self.list_state.item_offset(idx);
                let index = idx;
                let hover_bg = colors.surface;
                let airline_code = self.airline_code(&flight.airline_id);
                let sector_title = self.sector_title(&flight.sector_id);
                let departure = format!(
                    "{} {} {}",
                    flight.departure.city,
                    flight.departure.date.format("%d %b"),
                    flight.departure.time.format("%H:%M"),
                );
                let arrival = format!(
                    "{} {} {}",
                    flight.arrival.city,
                    flight.arrival.date.format("%d %b"),
                    flight.arrival.time.format("%H:%M"),
                );
                let click_handler = cx.listener(move |this, _: &ClickEvent, _window, cx| {
                    this.selected = index;
                    cx.notify();
                });

                div()
                    .id(SharedString::from(format!("flight-{idx}")))
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
                            .w(px(90.0))
                            .font_weight(FontWeight::SEMIBOLD)
                            .text_sm()
                            .text_color(colors.text_primary)
                            .child(SharedString::from(flight.number.clone())),
                    )
                    .child(
                        div()
                            .w(px(60.0))
                            .text_sm()
                            .text_color(colors.accent)
                            .child(SharedString::from(airline_code)),
                    )
                    .child(
                        div()
                            .w(px(100.0))
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(sector_title)),
                    )
                    .child(
                        div()
                            .flex_1()
                            .truncate()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(departure)),
                    )
                    .child(
                        div()
                            .flex_1()
                            .truncate()
                            .text_sm()
                            .text_color(colors.text_secondary)
                            .child(SharedString::from(arrival)),
                    )
                    .into_any_element()
            })
            .collect();

        let show_loading = self.loading && self.rows.is_empty();
        let show_empty = !self.loading && filtered.is_empty();
        let search_text = if self.search.is_empty() {
            "Search flights…".to_string()
        } else {
            self.search.text().to_string()
        };

        div()
            .id("flights-screen")
            .relative()
            .size_full()
            .flex()
            .flex_col()
            .bg(colors.background)
            .child(ListHeader::new("Flights", filtered.len()).refreshing(self.loading))
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
                            .id("flights-search")
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
                            .id("flights-new")
                            .cursor_pointer()
                            .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                                this.open_create();
                                cx.notify();
                            }))
                            .child(Button::new("flights-new-button", "New Flight").shortcut("n")),
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
                    .child(div().w(px(90.0)).child("FLIGHT"))
                    .child(div().w(px(60.0)).child("AIRLINE"))
                    .child(div().w(px(100.0)).child("SECTOR"))
                    .child(div().flex_1().child("DEPARTURE"))
                    .child(div().flex_1().child("ARRIVAL")),
            )
            .child(
                div()
                    .flex_1()
                    .overflow_y_hidden()
                    .when(show_loading, |this| this.child(LoadingState))
                    .when(show_empty, |this| {
                        this.child(EmptyState::new(
                            "No flights",
                            "Press n to schedule the first flight",
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
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    fn make_airline(id: &str, code: &str) -> Airline {
        Airline {
            id: AirlineId::from(id),
            country: "Pakistan".to_string(),
            name: format!("Airline {code}"),
            short_code: code.to_string(),
            logo_url: None,
        }
    }

    fn make_sector(id: &str, title: &str) -> Sector {
        Sector {
            id: SectorId::from(id),
            title: title.to_string(),
            name: title.to_string(),
        }
    }

    fn make_flight(id: &str, number: &str) -> Flight {
        Flight {
            id: FlightId::from(id),
            number: number.to_string(),
            airline_id: AirlineId::from("a-1"),
            sector_id: SectorId::from("s-1"),
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

    fn screen() -> (FlightsScreen, tokio::sync::mpsc::UnboundedReceiver<Command>) {
        let (bus, rx) = CommandBus::channel();
        let mut screen = FlightsScreen::new(bus);
        screen.set_airlines(vec![make_airline("a-1", "PK"), make_airline("a-2", "EK")]);
        screen.set_sectors(vec![make_sector("s-1", "KHI-JED")]);
        (screen, rx)
    }

    #[test]
    fn missing_airline_reference_blocks_submission() {
        let (mut screen, mut rx) = screen();
        screen.open_create();

        {
            let form = screen.form.as_mut().unwrap();
            form.number.set_text("PK-741");
            form.departure_city.set_text("Karachi");
            form.departure_date.set_text("2025-03-14");
            form.departure_time.set_text("22:30");
            form.arrival_city.set_text("Jeddah");
            form.arrival_date.set_text("2025-03-15");
            form.arrival_time.set_text("01:45");
        }

        screen.handle_key("enter", false, true, false);
        assert!(screen
            .form
            .as_ref()
            .unwrap()
            .error
            .as_ref()
            .unwrap()
            .contains("Airline"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn selector_cycling_resolves_reference_ids() {
        let (mut screen, mut rx) = screen();
        screen.open_create();

        {
            let form = screen.form.as_mut().unwrap();
            form.number.set_text("EK-601");
            form.departure_city.set_text("Karachi");
            form.departure_date.set_text("2025-03-14");
            form.departure_time.set_text("22:30");
            form.arrival_city.set_text("Dubai");
            form.arrival_date.set_text("2025-03-15");
            form.arrival_time.set_text("01:45");
            form.active_field = FlightField::Airline;
        }

        // Cycle to the second airline.
        screen.handle_key("right", false, false, false);
        screen.handle_key("right", false, false, false);
        {
            let form = screen.form.as_mut().unwrap();
            form.active_field = FlightField::Sector;
        }
        screen.handle_key("right", false, false, false);

        screen.handle_key("enter", false, true, false);
        match rx.try_recv().unwrap() {
            Command::SaveFlight { payload, .. } => {
                assert_eq!(payload.airline_id.as_str(), "a-2");
                assert_eq!(payload.sector_id.as_str(), "s-1");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bad_date_format_blocks_submission() {
        let (mut screen, mut rx) = screen();
        screen.open_create();

        {
            let form = screen.form.as_mut().unwrap();
            form.number.set_text("PK-741");
            form.airline_index = Some(0);
            form.sector_index = Some(0);
            form.departure_city.set_text("Karachi");
            form.departure_date.set_text("14/03/2025");
            form.departure_time.set_text("22:30");
            form.arrival_city.set_text("Jeddah");
            form.arrival_date.set_text("2025-03-15");
            form.arrival_time.set_text("01:45");
        }

        screen.handle_key("enter", false, true, false);
        assert!(screen
            .form
            .as_ref()
            .unwrap()
            .error
            .as_ref()
            .unwrap()
            .contains("Departure date"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn prefill_resolves_reference_indices() {
        let (mut screen, _rx) = screen();
        let flight = make_flight("f-1", "PK-741");
        screen.set_rows(vec![flight.clone()]);

        screen.open_edit();
        screen.apply_detail(&flight);

        let form = screen.form.as_ref().unwrap();
        assert_eq!(form.airline_index, Some(0));
        assert_eq!(form.sector_index, Some(0));
        assert_eq!(form.departure_date.text(), "2025-03-14");
        assert_eq!(form.arrival_time.text(), "01:45");
    }

    #[test]
    fn search_matches_airline_code() {
        let (mut screen, _rx) = screen();
        screen.set_rows(vec![make_flight("f-1", "PK-741")]);

        screen.search.set_text("pk");
        assert_eq!(screen.filtered_rows().len(), 1);

        screen.search.set_text("qr");
        assert_eq!(screen.filtered_rows().len(), 0);
    }
}
