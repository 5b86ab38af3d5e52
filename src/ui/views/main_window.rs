//! Main application window.
//!
//! Composes the sidebar, the active resource screen, the command palette
//! and the toast area, and owns the two sides of the request plumbing:
//! commands go out on the bus, events come back through an async pump and
//! are applied to the owning screen. Mutation successes trigger the
//! owning screen's re-fetch here, keeping the resynchronization contract
//! in one place.

use std::collections::HashSet;

use gpui::{
    div, prelude::FluentBuilder, px, AppContext, ClickEvent, Context, Entity, FocusHandle, Focusable,
    FontWeight, InteractiveElement, IntoElement, KeyDownEvent, ParentElement, Render,
    SharedString, StatefulInteractiveElement, Styled, Window,
};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::events::{AppEvent, CommandBus, RequestKind, Resource};
use crate::app::state::{NavSection, ResourceView};
use crate::app::{
    GoToAirlines, GoToBanks, GoToFlightPackages, GoToFlights, GoToRoles, GoToSectors,
    GoToTestimonials, GoToTours, GoToUsers, GoToVisas, GoToVouchers, OpenCommandPalette, Quit,
};
use crate::services::{NoticeLevel, NotificationService};
use crate::ui::components::{KeyInputResult, TextBuffer};
use crate::ui::theme::Theme;
use crate::ui::views::{
    AirlinesScreen, BanksScreen, FlightPackagesScreen, FlightsScreen, RolesScreen, SectorsScreen,
    TestimonialsScreen, ToursScreen, UsersScreen, VisasScreen, VouchersScreen,
};

/// Command palette entries (label, shortcut hint).
const COMMANDS: &[(&str, &str)] = &[
    ("Go to Airlines", "g a"),
    ("Go to Sectors", "g s"),
    ("Go to Flights", "g f"),
    ("Go to Flight Packages", "g p"),
    ("Go to Roles", "g r"),
    ("Go to Users", "g u"),
    ("Go to Testimonials", "g t"),
    ("Go to Tours", "g o"),
    ("Go to Visas", "g v"),
    ("Go to Banks", "g b"),
    ("Go to Payment Vouchers", "g y"),
    ("Refresh Current Screen", "r"),
];

/// Main window view containing the primary application layout.
pub struct MainWindow {
    theme: Theme,
    focus_handle: FocusHandle,
    commands: CommandBus,

    current_view: ResourceView,
    /// Screens that have issued their activation fetch.
    activated: HashSet<ResourceView>,

    // Command palette state
    palette_open: bool,
    palette_buffer: TextBuffer,
    palette_selected: usize,

    notifications: NotificationService,

    // One entity per resource screen
    banks: Entity<BanksScreen>,
    airlines: Entity<AirlinesScreen>,
    sectors: Entity<SectorsScreen>,
    flights: Entity<FlightsScreen>,
    flight_packages: Entity<FlightPackagesScreen>,
    roles: Entity<RolesScreen>,
    users: Entity<UsersScreen>,
    testimonials: Entity<TestimonialsScreen>,
    tours: Entity<ToursScreen>,
    visas: Entity<VisasScreen>,
    vouchers: Entity<VouchersScreen>,
}

impl MainWindow {
    pub fn new(
        _window: &mut Window,
        cx: &mut Context<Self>,
        commands: CommandBus,
        events: UnboundedReceiver<AppEvent>,
    ) -> Self {
        let focus_handle = cx.focus_handle();

        let banks = cx.new(|_| BanksScreen::new(commands.clone()));
        let airlines = cx.new(|_| AirlinesScreen::new(commands.clone()));
        let sectors = cx.new(|_| SectorsScreen::new(commands.clone()));
        let flights = cx.new(|_| FlightsScreen::new(commands.clone()));
        let flight_packages = cx.new(|_| FlightPackagesScreen::new(commands.clone()));
        let roles = cx.new(|_| RolesScreen::new(commands.clone()));
        let users = cx.new(|_| UsersScreen::new(commands.clone()));
        let testimonials = cx.new(|_| TestimonialsScreen::new(commands.clone()));
        let tours = cx.new(|_| ToursScreen::new(commands.clone()));
        let visas = cx.new(|_| VisasScreen::new(commands.clone()));
        let vouchers = cx.new(|_| VouchersScreen::new(commands.clone()));

        let mut this = Self {
            theme: Theme::dark(),
            focus_handle,
            commands,
            current_view: ResourceView::Banks,
            activated: HashSet::new(),
            palette_open: false,
            palette_buffer: TextBuffer::new(),
            palette_selected: 0,
            notifications: NotificationService::new(),
            banks,
            airlines,
            sectors,
            flights,
            flight_packages,
            roles,
            users,
            testimonials,
            tours,
            visas,
            vouchers,
        };

        // Pump worker events onto the UI thread.
        cx.spawn(async move |this, cx| {
            let mut events = events;
            while let Some(event) = events.recv().await {
                let applied = this.update(cx, |window, cx| {
                    window.apply_event(event, cx);
                    cx.notify();
                });
                if applied.is_err() {
                    break;
                }
            }
        })
        .detach();

        this.navigate_to(ResourceView::Banks, cx);
        this
    }

    /// Switches the content area, fetching the screen's data on first
    /// activation.
    pub fn navigate_to(&mut self, view: ResourceView, cx: &mut Context<Self>) {
        self.current_view = view;
        self.close_palette();

        if self.activated.insert(view) {
            self.set_owner_loading(view, cx);
            for command in view.fetch_commands() {
                self.commands.dispatch(command);
            }
        }
        cx.notify();
    }

    /// Re-fetches the current screen's collection.
    fn refresh_current(&mut self, cx: &mut Context<Self>) {
        let view = self.current_view;
        self.set_owner_loading(view, cx);
        self.commands.dispatch(view.refetch_command());
        cx.notify();
    }

    fn set_owner_loading(&mut self, view: ResourceView, cx: &mut Context<Self>) {
        match view {
            ResourceView::Banks => self.banks.update(cx, |s, cx| {
                s.set_loading(true);
                cx.notify();
            }),
            ResourceView::Airlines => self.airlines.update(cx, |s, cx| {
                s.set_loading(true);
                cx.notify();
            }),
            ResourceView::Sectors => self.sectors.update(cx, |s, cx| {
                s.set_loading(true);
                cx.notify();
            }),
            ResourceView::Flights => self.flights.update(cx, |s, cx| {
                s.set_loading(true);
                cx.notify();
            }),
            ResourceView::FlightPackages => self.flight_packages.update(cx, |s, cx| {
                s.set_loading(true);
                cx.notify();
            }),
            ResourceView::Roles => self.roles.update(cx, |s, cx| {
                s.set_loading(true);
                cx.notify();
            }),
            ResourceView::Users => self.users.update(cx, |s, cx| {
                s.set_loading(true);
                cx.notify();
            }),
            ResourceView::Testimonials => self.testimonials.update(cx, |s, cx| {
                s.set_loading(true);
                cx.notify();
            }),
            ResourceView::Tours => self.tours.update(cx, |s, cx| {
                s.set_loading(true);
                cx.notify();
            }),
            ResourceView::Visas => self.visas.update(cx, |s, cx| {
                s.set_loading(true);
                cx.notify();
            }),
            ResourceView::Vouchers => self.vouchers.update(cx, |s, cx| {
                s.set_loading(true);
                cx.notify();
            }),
        }
    }

    /// Applies one worker event to the owning screen(s) and the toast
    /// queue.
    pub fn apply_event(&mut self, event: AppEvent, cx: &mut Context<Self>) {
        match event {
            AppEvent::BanksLoaded(banks) => {
                self.vouchers.update(cx, |s, cx| {
                    s.set_banks(banks.clone());
                    cx.notify();
                });
                self.banks.update(cx, |s, cx| {
                    s.set_rows(banks);
                    cx.notify();
                });
            }
            AppEvent::BankDetailLoaded(bank) => self.banks.update(cx, |s, cx| {
                s.apply_detail(&bank);
                cx.notify();
            }),
            AppEvent::AirlinesLoaded(airlines) => {
                self.flights.update(cx, |s, cx| {
                    s.set_airlines(airlines.clone());
                    cx.notify();
                });
                self.airlines.update(cx, |s, cx| {
                    s.set_rows(airlines);
                    cx.notify();
                });
            }
            AppEvent::AirlineDetailLoaded(airline) => self.airlines.update(cx, |s, cx| {
                s.apply_detail(&airline);
                cx.notify();
            }),
            AppEvent::SectorsLoaded(sectors) => {
                self.flights.update(cx, |s, cx| {
                    s.set_sectors(sectors.clone());
                    cx.notify();
                });
                self.sectors.update(cx, |s, cx| {
                    s.set_rows(sectors);
                    cx.notify();
                });
            }
            AppEvent::SectorDetailLoaded(sector) => self.sectors.update(cx, |s, cx| {
                s.apply_detail(&sector);
                cx.notify();
            }),
            AppEvent::FlightsLoaded(flights) => {
                self.flight_packages.update(cx, |s, cx| {
                    s.set_flights(flights.clone());
                    cx.notify();
                });
                self.flights.update(cx, |s, cx| {
                    s.set_rows(flights);
                    cx.notify();
                });
            }
            AppEvent::FlightDetailLoaded(flight) => self.flights.update(cx, |s, cx| {
                s.apply_detail(&flight);
                cx.notify();
            }),
            AppEvent::PackagesLoaded(packages) => self.flight_packages.update(cx, |s, cx| {
                s.set_packages(packages);
                cx.notify();
            }),
            AppEvent::FlightPackagesLoaded(links) => self.flight_packages.update(cx, |s, cx| {
                s.set_rows(links);
                cx.notify();
            }),
            AppEvent::FlightPackageDetailLoaded(link) => {
                self.flight_packages.update(cx, |s, cx| {
                    s.apply_detail(&link);
                    cx.notify();
                })
            }
            AppEvent::PermissionsLoaded(permissions) => self.roles.update(cx, |s, cx| {
                s.set_permissions(permissions);
                cx.notify();
            }),
            AppEvent::RolesLoaded(roles) => {
                self.users.update(cx, |s, cx| {
                    s.set_roles(roles.clone());
                    cx.notify();
                });
                self.roles.update(cx, |s, cx| {
                    s.set_rows(roles);
                    cx.notify();
                });
            }
            AppEvent::RoleDetailLoaded(role) => self.roles.update(cx, |s, cx| {
                s.apply_detail(&role);
                cx.notify();
            }),
            AppEvent::UsersLoaded(users) => {
                self.vouchers.update(cx, |s, cx| {
                    s.set_users(users.clone());
                    cx.notify();
                });
                self.users.update(cx, |s, cx| {
                    s.set_rows(users);
                    cx.notify();
                });
            }
            AppEvent::UserDetailLoaded(user) => self.users.update(cx, |s, cx| {
                s.apply_detail(&user);
                cx.notify();
            }),
            AppEvent::TestimonialsLoaded(testimonials) => {
                self.testimonials.update(cx, |s, cx| {
                    s.set_rows(testimonials);
                    cx.notify();
                })
            }
            AppEvent::ToursLoaded(tours) => self.tours.update(cx, |s, cx| {
                s.set_rows(tours);
                cx.notify();
            }),
            AppEvent::VisasLoaded(visas) => self.visas.update(cx, |s, cx| {
                s.set_rows(visas);
                cx.notify();
            }),
            AppEvent::VouchersLoaded(vouchers) => self.vouchers.update(cx, |s, cx| {
                s.set_rows(vouchers);
                cx.notify();
            }),
            AppEvent::VoucherDetailLoaded(voucher) => self.vouchers.update(cx, |s, cx| {
                s.apply_detail(&voucher);
                cx.notify();
            }),

            AppEvent::MutationSucceeded { resource, kind } => {
                self.notifications
                    .success(Self::success_message(resource, kind));
                self.owner_on_mutation(resource, kind, cx);
                if let Some(owner) = ResourceView::owner_of(resource) {
                    self.set_owner_loading(owner, cx);
                    self.commands.dispatch(owner.refetch_command());
                }
            }
            AppEvent::RequestFailed {
                resource,
                kind,
                message,
            } => {
                self.notifications.error(message.clone());
                match kind {
                    RequestKind::List => self.owner_fetch_failed(resource, cx),
                    RequestKind::Detail => self.owner_detail_failed(resource, cx),
                    RequestKind::Save => self.owner_save_failed(resource, message, cx),
                    RequestKind::Status | RequestKind::Delete => {}
                }
            }
        }
    }

    fn success_message(resource: Resource, kind: RequestKind) -> String {
        let noun = resource.singular();
        match kind {
            RequestKind::Save => format!("{noun} saved"),
            RequestKind::Status => format!("{noun} status updated"),
            RequestKind::Delete => format!("{noun} deleted"),
            RequestKind::List | RequestKind::Detail => format!("{noun} loaded"),
        }
    }

    fn owner_on_mutation(&mut self, resource: Resource, kind: RequestKind, cx: &mut Context<Self>) {
        match resource {
            Resource::Banks => self.banks.update(cx, |s, cx| {
                s.on_mutation(kind);
                cx.notify();
            }),
            Resource::Airlines => self.airlines.update(cx, |s, cx| {
                s.on_mutation(kind);
                cx.notify();
            }),
            Resource::Sectors => self.sectors.update(cx, |s, cx| {
                s.on_mutation(kind);
                cx.notify();
            }),
            Resource::Flights => self.flights.update(cx, |s, cx| {
                s.on_mutation(kind);
                cx.notify();
            }),
            Resource::FlightPackages => self.flight_packages.update(cx, |s, cx| {
                s.on_mutation(kind);
                cx.notify();
            }),
            Resource::Roles => self.roles.update(cx, |s, cx| {
                s.on_mutation(kind);
                cx.notify();
            }),
            Resource::Users => self.users.update(cx, |s, cx| {
                s.on_mutation(kind);
                cx.notify();
            }),
            Resource::Testimonials => self.testimonials.update(cx, |s, cx| {
                s.on_mutation(kind);
                cx.notify();
            }),
            Resource::Vouchers => self.vouchers.update(cx, |s, cx| {
                s.on_mutation(kind);
                cx.notify();
            }),
            Resource::Tours | Resource::Visas | Resource::Packages | Resource::Permissions => {}
        }
    }

    fn owner_fetch_failed(&mut self, resource: Resource, cx: &mut Context<Self>) {
        match resource {
            Resource::Banks => self.banks.update(cx, |s, cx| {
                s.fetch_failed();
                cx.notify();
            }),
            Resource::Airlines => self.airlines.update(cx, |s, cx| {
                s.fetch_failed();
                cx.notify();
            }),
            Resource::Sectors => self.sectors.update(cx, |s, cx| {
                s.fetch_failed();
                cx.notify();
            }),
            Resource::Flights => self.flights.update(cx, |s, cx| {
                s.fetch_failed();
                cx.notify();
            }),
            Resource::FlightPackages => self.flight_packages.update(cx, |s, cx| {
                s.fetch_failed();
                cx.notify();
            }),
            Resource::Roles => self.roles.update(cx, |s, cx| {
                s.fetch_failed();
                cx.notify();
            }),
            Resource::Users => self.users.update(cx, |s, cx| {
                s.fetch_failed();
                cx.notify();
            }),
            Resource::Testimonials => self.testimonials.update(cx, |s, cx| {
                s.fetch_failed();
                cx.notify();
            }),
            Resource::Tours => self.tours.update(cx, |s, cx| {
                s.fetch_failed();
                cx.notify();
            }),
            Resource::Visas => self.visas.update(cx, |s, cx| {
                s.fetch_failed();
                cx.notify();
            }),
            Resource::Vouchers => self.vouchers.update(cx, |s, cx| {
                s.fetch_failed();
                cx.notify();
            }),
            // Reference data failures: the owning form simply keeps its
            // current (possibly empty) options.
            Resource::Packages | Resource::Permissions => {}
        }
    }

    fn owner_detail_failed(&mut self, resource: Resource, cx: &mut Context<Self>) {
        match resource {
            Resource::Banks => self.banks.update(cx, |s, cx| {
                s.detail_failed();
                cx.notify();
            }),
            Resource::Airlines => self.airlines.update(cx, |s, cx| {
                s.detail_failed();
                cx.notify();
            }),
            Resource::Sectors => self.sectors.update(cx, |s, cx| {
                s.detail_failed();
                cx.notify();
            }),
            Resource::Flights => self.flights.update(cx, |s, cx| {
                s.detail_failed();
                cx.notify();
            }),
            Resource::FlightPackages => self.flight_packages.update(cx, |s, cx| {
                s.detail_failed();
                cx.notify();
            }),
            Resource::Roles => self.roles.update(cx, |s, cx| {
                s.detail_failed();
                cx.notify();
            }),
            Resource::Users => self.users.update(cx, |s, cx| {
                s.detail_failed();
                cx.notify();
            }),
            Resource::Vouchers => self.vouchers.update(cx, |s, cx| {
                s.detail_failed();
                cx.notify();
            }),
            _ => {}
        }
    }

    fn owner_save_failed(&mut self, resource: Resource, message: String, cx: &mut Context<Self>) {
        match resource {
            Resource::Banks => self.banks.update(cx, |s, cx| {
                s.save_failed(message);
                cx.notify();
            }),
            Resource::Airlines => self.airlines.update(cx, |s, cx| {
                s.save_failed(message);
                cx.notify();
            }),
            Resource::Sectors => self.sectors.update(cx, |s, cx| {
                s.save_failed(message);
                cx.notify();
            }),
            Resource::Flights => self.flights.update(cx, |s, cx| {
                s.save_failed(message);
                cx.notify();
            }),
            Resource::FlightPackages => self.flight_packages.update(cx, |s, cx| {
                s.save_failed(message);
                cx.notify();
            }),
            Resource::Roles => self.roles.update(cx, |s, cx| {
                s.save_failed(message);
                cx.notify();
            }),
            Resource::Users => self.users.update(cx, |s, cx| {
                s.save_failed(message);
                cx.notify();
            }),
            Resource::Testimonials => self.testimonials.update(cx, |s, cx| {
                s.save_failed(message);
                cx.notify();
            }),
            Resource::Vouchers => self.vouchers.update(cx, |s, cx| {
                s.save_failed(message);
                cx.notify();
            }),
            _ => {}
        }
    }

    /// Whether the active screen is in a typing context (form, confirm
    /// dialog or search box). Navigation chords are suspended then.
    fn screen_captures_keys(&self, cx: &Context<Self>) -> bool {
        match self.current_view {
            ResourceView::Banks => self.banks.read(cx).capture_keys(),
            ResourceView::Airlines => self.airlines.read(cx).capture_keys(),
            ResourceView::Sectors => self.sectors.read(cx).capture_keys(),
            ResourceView::Flights => self.flights.read(cx).capture_keys(),
            ResourceView::FlightPackages => self.flight_packages.read(cx).capture_keys(),
            ResourceView::Roles => self.roles.read(cx).capture_keys(),
            ResourceView::Users => self.users.read(cx).capture_keys(),
            ResourceView::Testimonials => self.testimonials.read(cx).capture_keys(),
            ResourceView::Tours => self.tours.read(cx).capture_keys(),
            ResourceView::Visas => self.visas.read(cx).capture_keys(),
            ResourceView::Vouchers => self.vouchers.read(cx).capture_keys(),
        }
    }

    fn route_to_screen(
        &mut self,
        key: &str,
        shift: bool,
        ctrl: bool,
        cmd: bool,
        cx: &mut Context<Self>,
    ) -> bool {
        match self.current_view {
            ResourceView::Banks => self.banks.update(cx, |s, cx| {
                let consumed = s.handle_key(key, shift, ctrl, cmd);
                if consumed {
                    cx.notify();
                }
                consumed
            }),
            ResourceView::Airlines => self.airlines.update(cx, |s, cx| {
                let consumed = s.handle_key(key, shift, ctrl, cmd);
                if consumed {
                    cx.notify();
                }
                consumed
            }),
            ResourceView::Sectors => self.sectors.update(cx, |s, cx| {
                let consumed = s.handle_key(key, shift, ctrl, cmd);
                if consumed {
                    cx.notify();
                }
                consumed
            }),
            ResourceView::Flights => self.flights.update(cx, |s, cx| {
                let consumed = s.handle_key(key, shift, ctrl, cmd);
                if consumed {
                    cx.notify();
                }
                consumed
            }),
            ResourceView::FlightPackages => self.flight_packages.update(cx, |s, cx| {
                let consumed = s.handle_key(key, shift, ctrl, cmd);
                if consumed {
                    cx.notify();
                }
                consumed
            }),
            ResourceView::Roles => self.roles.update(cx, |s, cx| {
                let consumed = s.handle_key(key, shift, ctrl, cmd);
                if consumed {
                    cx.notify();
                }
                consumed
            }),
            ResourceView::Users => self.users.update(cx, |s, cx| {
                let consumed = s.handle_key(key, shift, ctrl, cmd);
                if consumed {
                    cx.notify();
                }
                consumed
            }),
            ResourceView::Testimonials => self.testimonials.update(cx, |s, cx| {
                let consumed = s.handle_key(key, shift, ctrl, cmd);
                if consumed {
                    cx.notify();
                }
                consumed
            }),
            ResourceView::Tours => self.tours.update(cx, |s, cx| {
                let consumed = s.handle_key(key, shift, ctrl, cmd);
                if consumed {
                    cx.notify();
                }
                consumed
            }),
            ResourceView::Visas => self.visas.update(cx, |s, cx| {
                let consumed = s.handle_key(key, shift, ctrl, cmd);
                if consumed {
                    cx.notify();
                }
                consumed
            }),
            ResourceView::Vouchers => self.vouchers.update(cx, |s, cx| {
                let consumed = s.handle_key(key, shift, ctrl, cmd);
                if consumed {
                    cx.notify();
                }
                consumed
            }),
        }
    }

    // Command palette

    fn open_palette(&mut self, cx: &mut Context<Self>) {
        self.palette_open = true;
        self.palette_buffer.clear();
        self.palette_selected = 0;
        cx.notify();
    }

    fn close_palette(&mut self) {
        self.palette_open = false;
        self.palette_buffer.clear();
        self.palette_selected = 0;
    }

    fn filtered_commands(&self) -> Vec<(&'static str, &'static str)> {
        let query = self.palette_buffer.text().to_lowercase();
        if query.is_empty() {
            COMMANDS.to_vec()
        } else {
            COMMANDS
                .iter()
                .filter(|(label, _)| label.to_lowercase().contains(&query))
                .copied()
                .collect()
        }
    }

    fn handle_palette_key(
        &mut self,
        key: &str,
        shift: bool,
        ctrl: bool,
        cmd: bool,
        cx: &mut Context<Self>,
    ) {
        match key {
            "up" => {
                if self.palette_selected > 0 {
                    self.palette_selected -= 1;
                }
                cx.notify();
                return;
            }
            "down" => {
                let max = self.filtered_commands().len();
                if self.palette_selected + 1 < max {
                    self.palette_selected += 1;
                }
                cx.notify();
                return;
            }
            _ => {}
        }

        match self.palette_buffer.process_key(key, shift, ctrl, cmd) {
            KeyInputResult::TextChanged => {
                self.palette_selected = 0;
                cx.notify();
            }
            KeyInputResult::Consumed => cx.notify(),
            KeyInputResult::Submit => {
                let filtered = self.filtered_commands();
                if let Some((label, _)) = filtered.get(self.palette_selected) {
                    let label = *label;
                    self.execute_command(label, cx);
                } else {
                    self.close_palette();
                    cx.notify();
                }
            }
            KeyInputResult::Cancel => {
                self.close_palette();
                cx.notify();
            }
            KeyInputResult::Ignored => {}
        }
    }

    fn execute_command(&mut self, label: &str, cx: &mut Context<Self>) {
        match label {
            "Go to Banks" => self.navigate_to(ResourceView::Banks, cx),
            "Go to Airlines" => self.navigate_to(ResourceView::Airlines, cx),
            "Go to Sectors" => self.navigate_to(ResourceView::Sectors, cx),
            "Go to Flights" => self.navigate_to(ResourceView::Flights, cx),
            "Go to Flight Packages" => self.navigate_to(ResourceView::FlightPackages, cx),
            "Go to Roles" => self.navigate_to(ResourceView::Roles, cx),
            "Go to Users" => self.navigate_to(ResourceView::Users, cx),
            "Go to Testimonials" => self.navigate_to(ResourceView::Testimonials, cx),
            "Go to Tours" => self.navigate_to(ResourceView::Tours, cx),
            "Go to Visas" => self.navigate_to(ResourceView::Visas, cx),
            "Go to Payment Vouchers" => self.navigate_to(ResourceView::Vouchers, cx),
            "Refresh Current Screen" => {
                self.close_palette();
                self.refresh_current(cx);
            }
            _ => {
                self.close_palette();
                cx.notify();
            }
        }
    }

    fn on_key(&mut self, event: &KeyDownEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let key = event.keystroke.key.clone();
        let shift = event.keystroke.modifiers.shift;
        let ctrl = event.keystroke.modifiers.control;
        let cmd = event.keystroke.modifiers.platform;

        if self.palette_open {
            self.handle_palette_key(&key, shift, ctrl, cmd, cx);
            return;
        }

        if self.route_to_screen(&key, shift, ctrl, cmd, cx) {
            cx.notify();
        }
    }

    fn nav_hint(view: ResourceView) -> &'static str {
        match view {
            ResourceView::Banks => "g b",
            ResourceView::Airlines => "g a",
            ResourceView::Sectors => "g s",
            ResourceView::Flights => "g f",
            ResourceView::FlightPackages => "g p",
            ResourceView::Roles => "g r",
            ResourceView::Users => "g u",
            ResourceView::Testimonials => "g t",
            ResourceView::Tours => "g o",
            ResourceView::Visas => "g v",
            ResourceView::Vouchers => "g y",
        }
    }

    fn render_title_bar(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let colors = &self.theme.colors;

        div()
            .id("title-bar")
            .h(px(40.0))
            .w_full()
            .flex()
            .items_center()
            .px(px(16.0))
            .bg(colors.surface)
            .border_b_1()
            .border_color(colors.border)
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap(px(8.0))
                    .font_weight(FontWeight::SEMIBOLD)
                    .child(SharedString::from("Karwan Back Office")),
            )
            .child(
                div().flex_1().flex().justify_center().mx(px(48.0)).child(
                    div()
                        .id("title-palette")
                        .w(px(360.0))
                        .px(px(12.0))
                        .py(px(6.0))
                        .rounded(px(6.0))
                        .bg(colors.surface_elevated)
                        .border_1()
                        .border_color(colors.border)
                        .cursor_pointer()
                        .flex()
                        .items_center()
                        .gap(px(8.0))
                        .on_click(cx.listener(|this, _: &ClickEvent, _, cx| {
                            this.open_palette(cx);
                        }))
                        .child(
                            div()
                                .flex_1()
                                .text_sm()
                                .text_color(colors.text_muted)
                                .child(SharedString::from("Jump to…")),
                        )
                        .child(
                            div()
                                .text_xs()
                                .text_color(colors.text_muted)
                                .child(SharedString::from("cmd-k")),
                        ),
                ),
            )
            .child(
                div()
                    .text_xs()
                    .text_color(colors.text_muted)
                    .child(SharedString::from(self.current_view.title())),
            )
    }

    fn render_sidebar(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let colors = self.theme.colors;
        let sections = [
            NavSection::Catalog,
            NavSection::Access,
            NavSection::Content,
            NavSection::Finance,
        ];

        let mut sidebar = div()
            .id("sidebar")
            .w(px(200.0))
            .h_full()
            .flex()
            .flex_col()
            .py(px(8.0))
            .bg(colors.surface)
            .border_r_1()
            .border_color(colors.border);

        for section in sections {
            sidebar = sidebar.child(
                div()
                    .px(px(12.0))
                    .py(px(6.0))
                    .mt(px(6.0))
                    .text_xs()
                    .font_weight(FontWeight::MEDIUM)
                    .text_color(colors.text_muted)
                    .child(SharedString::from(section.title())),
            );

            for view in ResourceView::all()
                .iter()
                .copied()
                .filter(|view| view.section() == section)
            {
                let is_active = view == self.current_view;
                let hover_bg = colors.surface_elevated;

                sidebar = sidebar.child(
                    div()
                        .id(SharedString::from(format!("nav-{}", view.title())))
                        .mx(px(8.0))
                        .px(px(8.0))
                        .py(px(5.0))
                        .rounded(px(6.0))
                        .flex()
                        .items_center()
                        .justify_between()
                        .cursor_pointer()
                        .when(is_active, |this| this.bg(colors.surface_elevated))
                        .hover(move |style| style.bg(hover_bg))
                        .on_click(cx.listener(move |this, _: &ClickEvent, _, cx| {
                            this.navigate_to(view, cx);
                        }))
                        .child(
                            div()
                                .text_sm()
                                .text_color(if is_active {
                                    colors.text_primary
                                } else {
                                    colors.text_secondary
                                })
                                .child(SharedString::from(view.title())),
                        )
                        .child(
                            div()
                                .text_xs()
                                .text_color(colors.text_muted)
                                .child(SharedString::from(Self::nav_hint(view))),
                        ),
                );
            }
        }

        sidebar
    }

    fn render_content(&self) -> gpui::AnyElement {
        match self.current_view {
            ResourceView::Banks => self.banks.clone().into_any_element(),
            ResourceView::Airlines => self.airlines.clone().into_any_element(),
            ResourceView::Sectors => self.sectors.clone().into_any_element(),
            ResourceView::Flights => self.flights.clone().into_any_element(),
            ResourceView::FlightPackages => self.flight_packages.clone().into_any_element(),
            ResourceView::Roles => self.roles.clone().into_any_element(),
            ResourceView::Users => self.users.clone().into_any_element(),
            ResourceView::Testimonials => self.testimonials.clone().into_any_element(),
            ResourceView::Tours => self.tours.clone().into_any_element(),
            ResourceView::Visas => self.visas.clone().into_any_element(),
            ResourceView::Vouchers => self.vouchers.clone().into_any_element(),
        }
    }

    fn render_palette(&self, _cx: &mut Context<Self>) -> impl IntoElement {
        let colors = self.theme.colors;
        let query = if self.palette_buffer.is_empty() {
            "Type a command…".to_string()
        } else {
            self.palette_buffer.text().to_string()
        };
        let filtered = self.filtered_commands();
        let selected = self.palette_selected;

        div()
            .id("palette-overlay")
            .absolute()
            .inset_0()
            .bg(gpui::rgba(0x00000080))
            .flex()
            .items_start()
            .justify_center()
            .pt(px(80.0))
            .child(
                div()
                    .w(px(480.0))
                    .bg(colors.surface)
                    .rounded(px(12.0))
                    .border_1()
                    .border_color(colors.border)
                    .overflow_hidden()
                    .child(
                        div()
                            .h(px(44.0))
                            .px(px(16.0))
                            .flex()
                            .items_center()
                            .border_b_1()
                            .border_color(colors.border)
                            .child(
                                div()
                                    .flex_1()
                                    .text_sm()
                                    .text_color(if self.palette_buffer.is_empty() {
                                        colors.text_muted
                                    } else {
                                        colors.text_primary
                                    })
                                    .child(SharedString::from(query)),
                            )
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(colors.text_muted)
                                    .child(SharedString::from("esc")),
                            ),
                    )
                    .children(filtered.iter().enumerate().map(|(idx, (label, hint))| {
                        div()
                            .h(px(32.0))
                            .px(px(16.0))
                            .flex()
                            .items_center()
                            .justify_between()
                            .when(idx == selected, |this| this.bg(colors.surface_elevated))
                            .child(
                                div()
                                    .text_sm()
                                    .text_color(colors.text_primary)
                                    .child(SharedString::from(*label)),
                            )
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(colors.text_muted)
                                    .child(SharedString::from(*hint)),
                            )
                    })),
            )
    }

    fn render_toast(&mut self) -> Option<gpui::AnyElement> {
        let colors = self.theme.colors;
        let notice = self.notifications.current()?;
        let (border, label) = match notice.level {
            NoticeLevel::Success => (colors.success, "OK"),
            NoticeLevel::Error => (colors.error, "!"),
            NoticeLevel::Info => (colors.accent, "i"),
        };
        let message = notice.message.clone();

        Some(
            div()
                .absolute()
                .bottom(px(16.0))
                .right(px(16.0))
                .max_w(px(420.0))
                .px(px(12.0))
                .py(px(8.0))
                .bg(colors.surface_elevated)
                .border_1()
                .border_color(border)
                .rounded(px(8.0))
                .flex()
                .items_center()
                .gap(px(8.0))
                .child(
                    div()
                        .text_xs()
                        .text_color(border)
                        .child(SharedString::from(label)),
                )
                .child(
                    div()
                        .text_sm()
                        .text_color(colors.text_primary)
                        .child(SharedString::from(message)),
                )
                .into_any_element(),
        )
    }
}

impl Focusable for MainWindow {
    fn focus_handle(&self, _cx: &gpui::App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for MainWindow {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let colors = self.theme.colors;
        let chords_active = !self.palette_open && !self.screen_captures_keys(cx);
        let toast = self.render_toast();

        div()
            .id("main-window")
            .relative()
            .size_full()
            .flex()
            .flex_col()
            .bg(colors.background)
            .text_color(colors.text_primary)
            .track_focus(&self.focus_handle)
            .when(chords_active, |this| this.key_context("Screens"))
            .on_key_down(cx.listener(Self::on_key))
            .on_action(cx.listener(|_this, _: &Quit, _, cx| cx.quit()))
            .on_action(cx.listener(|this, _: &OpenCommandPalette, _, cx| {
                this.open_palette(cx);
            }))
            .on_action(cx.listener(|this, _: &GoToBanks, _, cx| {
                this.navigate_to(ResourceView::Banks, cx);
            }))
            .on_action(cx.listener(|this, _: &GoToAirlines, _, cx| {
                this.navigate_to(ResourceView::Airlines, cx);
            }))
            .on_action(cx.listener(|this, _: &GoToSectors, _, cx| {
                this.navigate_to(ResourceView::Sectors, cx);
            }))
            .on_action(cx.listener(|this, _: &GoToFlights, _, cx| {
                this.navigate_to(ResourceView::Flights, cx);
            }))
            .on_action(cx.listener(|this, _: &GoToFlightPackages, _, cx| {
                this.navigate_to(ResourceView::FlightPackages, cx);
            }))
            .on_action(cx.listener(|this, _: &GoToRoles, _, cx| {
                this.navigate_to(ResourceView::Roles, cx);
            }))
            .on_action(cx.listener(|this, _: &GoToUsers, _, cx| {
                this.navigate_to(ResourceView::Users, cx);
            }))
            .on_action(cx.listener(|this, _: &GoToTestimonials, _, cx| {
                this.navigate_to(ResourceView::Testimonials, cx);
            }))
            .on_action(cx.listener(|this, _: &GoToTours, _, cx| {
                this.navigate_to(ResourceView::Tours, cx);
            }))
            .on_action(cx.listener(|this, _: &GoToVisas, _, cx| {
                this.navigate_to(ResourceView::Visas, cx);
            }))
            .on_action(cx.listener(|this, _: &GoToVouchers, _, cx| {
                this.navigate_to(ResourceView::Vouchers, cx);
            }))
            .child(self.render_title_bar(cx))
            .child(
                div()
                    .flex_1()
                    .flex()
                    .overflow_hidden()
                    .child(self.render_sidebar(cx))
                    .child(div().flex_1().h_full().child(self.render_content())),
            )
            .when(self.palette_open, |this| {
                this.child(self.render_palette(cx))
            })
            .children(toast)
    }
}
