//! Application views.
//!
//! One view per REST resource, plus the main window shell. Each resource
//! view owns its rows, filters, selection, modal form and confirm dialog,
//! and talks to the backend only by enqueuing commands.

mod airlines;
mod banks;
mod flight_packages;
mod flights;
pub mod form;
mod main_window;
mod roles;
mod sectors;
mod testimonials;
mod tours;
mod users;
mod visas;
mod vouchers;

pub use airlines::{AirlineForm, AirlinesScreen};
pub use banks::{BankForm, BanksScreen};
pub use flight_packages::{FlightPackagesScreen, LinkForm};
pub use flights::{FlightForm, FlightsScreen};
pub use main_window::MainWindow;
pub use roles::{RoleForm, RolesScreen};
pub use sectors::{SectorForm, SectorsScreen};
pub use testimonials::{ResponseForm, TestimonialsScreen};
pub use tours::ToursScreen;
pub use users::{selectable_roles, UserForm, UsersScreen};
pub use visas::VisasScreen;
pub use vouchers::{VoucherForm, VouchersScreen};
