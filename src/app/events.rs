//! Command and event buses connecting the UI to the request worker.
//!
//! Views never touch the network. They enqueue [`Command`]s; the request
//! worker executes them against the backend and publishes [`AppEvent`]s,
//! which the main window applies back to the owning view. This keeps the
//! re-fetch-after-mutation contract explicit: a `MutationSucceeded` event
//! is what triggers the owning screen's next fetch.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::domain::{
    Airline, AirlineId, AirlinePayload, Bank, BankId, BankPayload, Flight, FlightId,
    FlightPackage, FlightPackageId, FlightPackagePayload, FlightPayload, LinkStatus, LogoUpload,
    ModerationStatus, Package, Permission, RecordStatus, Role, RoleId, RolePayload, Sector,
    SectorId, SectorPayload, Testimonial, TestimonialId, TestimonialPayload, Tour, User, UserId,
    UserPayload, Visa, Voucher, VoucherId, VoucherPayload,
};

/// The REST resources the console manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Banks,
    Airlines,
    Sectors,
    Flights,
    Packages,
    FlightPackages,
    Permissions,
    Roles,
    Users,
    Testimonials,
    Tours,
    Visas,
    Vouchers,
}

impl Resource {
    /// Singular display name used in notifications.
    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Banks => "Bank",
            Resource::Airlines => "Airline",
            Resource::Sectors => "Sector",
            Resource::Flights => "Flight",
            Resource::Packages => "Package",
            Resource::FlightPackages => "Flight package",
            Resource::Permissions => "Permission",
            Resource::Roles => "Role",
            Resource::Users => "User",
            Resource::Testimonials => "Testimonial",
            Resource::Tours => "Tour",
            Resource::Visas => "Visa",
            Resource::Vouchers => "Voucher",
        }
    }
}

/// What a request was doing when it succeeded or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Collection fetch.
    List,
    /// Single-record fetch for edit pre-population.
    Detail,
    /// Create or update.
    Save,
    /// Status/featured toggle.
    Status,
    /// Record deletion.
    Delete,
}

/// A unit of work for the request worker. One command maps to exactly one
/// REST call; nothing is retried.
#[derive(Debug, Clone)]
pub enum Command {
    // Banks
    FetchBanks,
    FetchBankDetail(BankId),
    SaveBank {
        id: Option<BankId>,
        payload: BankPayload,
        logo: Option<LogoUpload>,
    },
    SetBankStatus {
        id: BankId,
        status: RecordStatus,
    },
    DeleteBank(BankId),

    // Airlines
    FetchAirlines,
    FetchAirlineDetail(AirlineId),
    SaveAirline {
        id: Option<AirlineId>,
        payload: AirlinePayload,
        logo: Option<LogoUpload>,
    },
    DeleteAirline(AirlineId),

    // Sectors
    FetchSectors,
    FetchSectorDetail(SectorId),
    SaveSector {
        id: Option<SectorId>,
        payload: SectorPayload,
    },
    DeleteSector(SectorId),

    // Flights
    FetchFlights,
    FetchFlightDetail(FlightId),
    SaveFlight {
        id: Option<FlightId>,
        payload: FlightPayload,
    },
    DeleteFlight(FlightId),

    // Packages
    FetchPackages,

    // Flight-package links
    FetchFlightPackages,
    FetchFlightPackageDetail(FlightPackageId),
    SaveFlightPackage {
        id: Option<FlightPackageId>,
        payload: FlightPackagePayload,
    },
    SetFlightPackageStatus {
        id: FlightPackageId,
        status: LinkStatus,
    },
    DeleteFlightPackage(FlightPackageId),

    // Roles and permissions
    FetchPermissions,
    FetchRoles,
    FetchRoleDetail(RoleId),
    SaveRole {
        id: Option<RoleId>,
        payload: RolePayload,
    },
    DeleteRole(RoleId),

    // Users
    FetchUsers,
    FetchUserDetail(UserId),
    SaveUser {
        id: Option<UserId>,
        payload: UserPayload,
    },
    SetUserStatus {
        id: UserId,
        status: RecordStatus,
    },
    DeleteUser(UserId),

    // Testimonials
    FetchTestimonials,
    SaveTestimonialResponse {
        id: TestimonialId,
        payload: TestimonialPayload,
    },
    SetTestimonialStatus {
        id: TestimonialId,
        status: ModerationStatus,
    },
    SetTestimonialFeatured {
        id: TestimonialId,
        featured: bool,
    },
    DeleteTestimonial(TestimonialId),

    // Tours and visas
    FetchTours,
    FetchVisas,

    // Vouchers
    FetchVouchers,
    FetchVoucherDetail(VoucherId),
    SaveVoucher {
        id: Option<VoucherId>,
        payload: VoucherPayload,
    },
    DeleteVoucher(VoucherId),
}

/// A completed unit of work, applied on the UI thread.
#[derive(Debug, Clone)]
pub enum AppEvent {
    BanksLoaded(Vec<Bank>),
    BankDetailLoaded(Bank),
    AirlinesLoaded(Vec<Airline>),
    AirlineDetailLoaded(Airline),
    SectorsLoaded(Vec<Sector>),
    SectorDetailLoaded(Sector),
    FlightsLoaded(Vec<Flight>),
    FlightDetailLoaded(Flight),
    PackagesLoaded(Vec<Package>),
    FlightPackagesLoaded(Vec<FlightPackage>),
    FlightPackageDetailLoaded(FlightPackage),
    PermissionsLoaded(Vec<Permission>),
    RolesLoaded(Vec<Role>),
    RoleDetailLoaded(Role),
    UsersLoaded(Vec<User>),
    UserDetailLoaded(User),
    TestimonialsLoaded(Vec<Testimonial>),
    ToursLoaded(Vec<Tour>),
    VisasLoaded(Vec<Visa>),
    VouchersLoaded(Vec<Voucher>),
    VoucherDetailLoaded(Voucher),

    /// A create/update, status change or delete went through.
    MutationSucceeded {
        resource: Resource,
        kind: RequestKind,
    },
    /// Any request was rejected or never completed. Exactly one event is
    /// published per failed command.
    RequestFailed {
        resource: Resource,
        kind: RequestKind,
        message: String,
    },
}

/// Sender handle views use to enqueue work.
#[derive(Debug, Clone)]
pub struct CommandBus {
    tx: UnboundedSender<Command>,
}

impl CommandBus {
    /// Creates a bus and its worker-side receiver.
    pub fn channel() -> (Self, UnboundedReceiver<Command>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Enqueues a command. A closed worker is ignored; the app is shutting
    /// down at that point.
    pub fn dispatch(&self, command: Command) {
        if self.tx.send(command).is_err() {
            tracing::warn!("request worker is gone; dropping command");
        }
    }
}

/// Sender handle the request worker publishes results on.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: UnboundedSender<AppEvent>,
}

impl EventBus {
    /// Creates a bus and its UI-side receiver.
    pub fn channel() -> (Self, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Publishes an event. A closed UI is ignored.
    pub fn publish(&self, event: AppEvent) {
        if self.tx.send(event).is_err() {
            tracing::warn!("event receiver is gone; dropping event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_bus_delivers_in_order() {
        let (bus, mut rx) = CommandBus::channel();
        bus.dispatch(Command::FetchBanks);
        bus.dispatch(Command::FetchAirlines);

        assert!(matches!(rx.try_recv().unwrap(), Command::FetchBanks));
        assert!(matches!(rx.try_recv().unwrap(), Command::FetchAirlines));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn event_bus_round_trip() {
        let (bus, mut rx) = EventBus::channel();
        bus.publish(AppEvent::MutationSucceeded {
            resource: Resource::Banks,
            kind: RequestKind::Save,
        });

        match rx.try_recv().unwrap() {
            AppEvent::MutationSucceeded { resource, kind } => {
                assert_eq!(resource, Resource::Banks);
                assert_eq!(kind, RequestKind::Save);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn dispatch_after_receiver_drop_does_not_panic() {
        let (bus, rx) = CommandBus::channel();
        drop(rx);
        bus.dispatch(Command::FetchTours);
    }
}
