//! Domain types for the back-office console.
//!
//! Everything here mirrors records owned by the platform backend: entities
//! as they are read, `*Payload` types as they are written, and the pure
//! helpers (normalization, format checks) the forms rely on. Nothing in
//! this module performs I/O.

pub mod airline;
pub mod bank;
pub mod flight;
pub mod ids;
pub mod rbac;
pub mod sector;
pub mod status;
pub mod testimonial;
pub mod travel;
pub mod upload;
pub mod user;
pub mod voucher;

pub use airline::{Airline, AirlinePayload};
pub use bank::{Bank, BankPayload};
pub use flight::{
    Flight, FlightPackage, FlightPackagePayload, FlightPayload, FlightStop, LinkStatus, Package,
};
pub use ids::{
    AirlineId, BankId, FlightId, FlightPackageId, PackageId, PermissionId, RoleId, SectorId,
    TestimonialId, TourId, UserId, VisaId, VoucherId,
};
pub use rbac::{Permission, Role, RolePayload, AGENT_ROLE_SLUG};
pub use sector::{Sector, SectorPayload};
pub use status::RecordStatus;
pub use testimonial::{ModerationStatus, Testimonial, TestimonialPayload};
pub use travel::{Tour, Visa};
pub use upload::{LogoUpload, UploadError, MAX_LOGO_BYTES};
pub use user::{MarginType, User, UserPayload};
pub use voucher::{PaymentMethod, Voucher, VoucherPayload, VoucherStatus};
