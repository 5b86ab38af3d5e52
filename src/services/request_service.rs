//! The request worker.
//!
//! Drains [`Command`]s sequentially, performs exactly one REST call per
//! command through the [`AdminApi`] seam, and publishes one [`AppEvent`]
//! per command — a loaded collection/record, a mutation acknowledgement,
//! or a single failure. Nothing is retried and nothing is cancelled; the
//! backend owns all state and ordering beats throughput here.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::{AdminApi, ApiError, ApiResult};
use crate::app::events::{AppEvent, Command, EventBus, RequestKind, Resource};

/// Executes commands against the backend and reports results.
pub struct RequestService<A: AdminApi> {
    api: Arc<A>,
    events: EventBus,
}

impl<A: AdminApi> RequestService<A> {
    /// Creates a worker over the given API implementation.
    pub fn new(api: Arc<A>, events: EventBus) -> Self {
        Self { api, events }
    }

    /// Runs until the command channel closes.
    pub async fn run(self, mut commands: UnboundedReceiver<Command>) {
        tracing::info!("request worker started");
        while let Some(command) = commands.recv().await {
            self.execute(command).await;
        }
        tracing::info!("request worker stopped");
    }

    /// Executes one command, publishing exactly one event.
    pub async fn execute(&self, command: Command) {
        match command {
            // Banks
            Command::FetchBanks => {
                self.list(self.api.list_banks().await, Resource::Banks, AppEvent::BanksLoaded)
            }
            Command::FetchBankDetail(id) => self.detail(
                self.api.get_bank(id).await,
                Resource::Banks,
                AppEvent::BankDetailLoaded,
            ),
            Command::SaveBank { id, payload, logo } => {
                let result = match id {
                    Some(id) => self.api.update_bank(id, payload, logo).await,
                    None => self.api.create_bank(payload, logo).await,
                };
                self.mutation(result, Resource::Banks, RequestKind::Save);
            }
            Command::SetBankStatus { id, status } => self.mutation(
                self.api.set_bank_status(id, status).await,
                Resource::Banks,
                RequestKind::Status,
            ),
            Command::DeleteBank(id) => self.mutation(
                self.api.delete_bank(id).await,
                Resource::Banks,
                RequestKind::Delete,
            ),

            // Airlines
            Command::FetchAirlines => self.list(
                self.api.list_airlines().await,
                Resource::Airlines,
                AppEvent::AirlinesLoaded,
            ),
            Command::FetchAirlineDetail(id) => self.detail(
                self.api.get_airline(id).await,
                Resource::Airlines,
                AppEvent::AirlineDetailLoaded,
            ),
            Command::SaveAirline { id, payload, logo } => {
                let result = match id {
                    Some(id) => self.api.update_airline(id, payload, logo).await,
                    None => self.api.create_airline(payload, logo).await,
                };
                self.mutation(result, Resource::Airlines, RequestKind::Save);
            }
            Command::DeleteAirline(id) => self.mutation(
                self.api.delete_airline(id).await,
                Resource::Airlines,
                RequestKind::Delete,
            ),

            // Sectors
            Command::FetchSectors => self.list(
                self.api.list_sectors().await,
                Resource::Sectors,
                AppEvent::SectorsLoaded,
            ),
            Command::FetchSectorDetail(id) => self.detail(
                self.api.get_sector(id).await,
                Resource::Sectors,
                AppEvent::SectorDetailLoaded,
            ),
            Command::SaveSector { id, payload } => {
                let result = match id {
                    Some(id) => self.api.update_sector(id, payload).await,
                    None => self.api.create_sector(payload).await,
                };
                self.mutation(result, Resource::Sectors, RequestKind::Save);
            }
            Command::DeleteSector(id) => self.mutation(
                self.api.delete_sector(id).await,
                Resource::Sectors,
                RequestKind::Delete,
            ),

            // Flights
            Command::FetchFlights => self.list(
                self.api.list_flights().await,
                Resource::Flights,
                AppEvent::FlightsLoaded,
            ),
            Command::FetchFlightDetail(id) => self.detail(
                self.api.get_flight(id).await,
                Resource::Flights,
                AppEvent::FlightDetailLoaded,
            ),
            Command::SaveFlight { id, payload } => {
                let result = match id {
                    Some(id) => self.api.update_flight(id, payload).await,
                    None => self.api.create_flight(payload).await,
                };
                self.mutation(result, Resource::Flights, RequestKind::Save);
            }
            Command::DeleteFlight(id) => self.mutation(
                self.api.delete_flight(id).await,
                Resource::Flights,
                RequestKind::Delete,
            ),

            // Packages
            Command::FetchPackages => self.list(
                self.api.list_packages().await,
                Resource::Packages,
                AppEvent::PackagesLoaded,
            ),

            // Flight-package links
            Command::FetchFlightPackages => self.list(
                self.api.list_flight_packages().await,
                Resource::FlightPackages,
                AppEvent::FlightPackagesLoaded,
            ),
            Command::FetchFlightPackageDetail(id) => self.detail(
                self.api.get_flight_package(id).await,
                Resource::FlightPackages,
                AppEvent::FlightPackageDetailLoaded,
            ),
            Command::SaveFlightPackage { id, payload } => {
                let result = match id {
                    Some(id) => self.api.update_flight_package(id, payload).await,
                    None => self.api.create_flight_package(payload).await,
                };
                self.mutation(result, Resource::FlightPackages, RequestKind::Save);
            }
            Command::SetFlightPackageStatus { id, status } => self.mutation(
                self.api.set_flight_package_status(id, status).await,
                Resource::FlightPackages,
                RequestKind::Status,
            ),
            Command::DeleteFlightPackage(id) => self.mutation(
                self.api.delete_flight_package(id).await,
                Resource::FlightPackages,
                RequestKind::Delete,
            ),

            // Roles and permissions
            Command::FetchPermissions => self.list(
                self.api.list_permissions().await,
                Resource::Permissions,
                AppEvent::PermissionsLoaded,
            ),
            Command::FetchRoles => self.list(
                self.api.list_roles().await,
                Resource::Roles,
                AppEvent::RolesLoaded,
            ),
            Command::FetchRoleDetail(id) => self.detail(
                self.api.get_role(id).await,
                Resource::Roles,
                AppEvent::RoleDetailLoaded,
            ),
            Command::SaveRole { id, payload } => {
                let result = match id {
                    Some(id) => self.api.update_role(id, payload).await,
                    None => self.api.create_role(payload).await,
                };
                self.mutation(result, Resource::Roles, RequestKind::Save);
            }
            Command::DeleteRole(id) => self.mutation(
                self.api.delete_role(id).await,
                Resource::Roles,
                RequestKind::Delete,
            ),

            // Users
            Command::FetchUsers => self.list(
                self.api.list_users().await,
                Resource::Users,
                AppEvent::UsersLoaded,
            ),
            Command::FetchUserDetail(id) => self.detail(
                self.api.get_user(id).await,
                Resource::Users,
                AppEvent::UserDetailLoaded,
            ),
            Command::SaveUser { id, payload } => {
                let result = match id {
                    Some(id) => self.api.update_user(id, payload).await,
                    None => self.api.create_user(payload).await,
                };
                self.mutation(result, Resource::Users, RequestKind::Save);
            }
            Command::SetUserStatus { id, status } => self.mutation(
                self.api.set_user_status(id, status).await,
                Resource::Users,
                RequestKind::Status,
            ),
            Command::DeleteUser(id) => self.mutation(
                self.api.delete_user(id).await,
                Resource::Users,
                RequestKind::Delete,
            ),

            // Testimonials
            Command::FetchTestimonials => self.list(
                self.api.list_testimonials().await,
                Resource::Testimonials,
                AppEvent::TestimonialsLoaded,
            ),
            Command::SaveTestimonialResponse { id, payload } => self.mutation(
                self.api.update_testimonial(id, payload).await,
                Resource::Testimonials,
                RequestKind::Save,
            ),
            Command::SetTestimonialStatus { id, status } => self.mutation(
                self.api.set_testimonial_status(id, status).await,
                Resource::Testimonials,
                RequestKind::Status,
            ),
            Command::SetTestimonialFeatured { id, featured } => self.mutation(
                self.api.set_testimonial_featured(id, featured).await,
                Resource::Testimonials,
                RequestKind::Status,
            ),
            Command::DeleteTestimonial(id) => self.mutation(
                self.api.delete_testimonial(id).await,
                Resource::Testimonials,
                RequestKind::Delete,
            ),

            // Tours and visas
            Command::FetchTours => {
                self.list(self.api.list_tours().await, Resource::Tours, AppEvent::ToursLoaded)
            }
            Command::FetchVisas => {
                self.list(self.api.list_visas().await, Resource::Visas, AppEvent::VisasLoaded)
            }

            // Vouchers
            Command::FetchVouchers => self.list(
                self.api.list_vouchers().await,
                Resource::Vouchers,
                AppEvent::VouchersLoaded,
            ),
            Command::FetchVoucherDetail(id) => self.detail(
                self.api.get_voucher(id).await,
                Resource::Vouchers,
                AppEvent::VoucherDetailLoaded,
            ),
            Command::SaveVoucher { id, payload } => {
                let result = match id {
                    Some(id) => self.api.update_voucher(id, payload).await,
                    None => self.api.create_voucher(payload).await,
                };
                self.mutation(result, Resource::Vouchers, RequestKind::Save);
            }
            Command::DeleteVoucher(id) => self.mutation(
                self.api.delete_voucher(id).await,
                Resource::Vouchers,
                RequestKind::Delete,
            ),
        }
    }

    fn list<T>(&self, result: ApiResult<Vec<T>>, resource: Resource, wrap: fn(Vec<T>) -> AppEvent) {
        match result {
            Ok(items) => self.events.publish(wrap(items)),
            Err(err) => self.fail(resource, RequestKind::List, err),
        }
    }

    fn detail<T>(&self, result: ApiResult<T>, resource: Resource, wrap: fn(T) -> AppEvent) {
        match result {
            Ok(record) => self.events.publish(wrap(record)),
            Err(err) => self.fail(resource, RequestKind::Detail, err),
        }
    }

    fn mutation(&self, result: ApiResult<()>, resource: Resource, kind: RequestKind) {
        match result {
            Ok(()) => {
                tracing::info!(?resource, ?kind, "mutation succeeded");
                self.events
                    .publish(AppEvent::MutationSucceeded { resource, kind });
            }
            Err(err) => self.fail(resource, kind, err),
        }
    }

    fn fail(&self, resource: Resource, kind: RequestKind, err: ApiError) {
        tracing::warn!(?resource, ?kind, error = %err, "request failed");
        self.events.publish(AppEvent::RequestFailed {
            resource,
            kind,
            message: err.user_message(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAdminApi;
    use crate::domain::{Bank, BankId, BankPayload, RecordStatus, Sector, SectorPayload};
    use pretty_assertions::assert_eq;

    fn sample_bank() -> Bank {
        Bank {
            id: BankId::from("b-1"),
            name: "Meezan".to_string(),
            account_title: "Karwan Travels".to_string(),
            account_number: "0101".to_string(),
            iban: "PK36MEZN0000000101".to_string(),
            address: "Karachi".to_string(),
            logo_url: None,
            status: RecordStatus::Active,
        }
    }

    fn bank_payload() -> BankPayload {
        BankPayload {
            name: "Meezan".to_string(),
            account_title: "Karwan Travels".to_string(),
            account_number: "0101".to_string(),
            iban: "PK36MEZN0000000101".to_string(),
            address: "Karachi".to_string(),
            status: RecordStatus::Active,
        }
    }

    fn service_with(api: MockAdminApi) -> (RequestService<MockAdminApi>, tokio::sync::mpsc::UnboundedReceiver<AppEvent>) {
        let (events, rx) = EventBus::channel();
        (RequestService::new(Arc::new(api), events), rx)
    }

    #[tokio::test]
    async fn successful_fetch_publishes_collection() {
        let mut api = MockAdminApi::new();
        api.expect_list_banks()
            .times(1)
            .returning(|| Ok(vec![sample_bank()]));

        let (service, mut rx) = service_with(api);
        service.execute(Command::FetchBanks).await;

        match rx.try_recv().unwrap() {
            AppEvent::BanksLoaded(banks) => assert_eq!(banks.len(), 1),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(rx.try_recv().is_err(), "exactly one event per command");
    }

    #[tokio::test]
    async fn failed_fetch_publishes_one_failure() {
        let mut api = MockAdminApi::new();
        api.expect_list_sectors()
            .times(1)
            .returning(|| Err(ApiError::Rejected("Sectors unavailable".to_string())));

        let (service, mut rx) = service_with(api);
        service.execute(Command::FetchSectors).await;

        match rx.try_recv().unwrap() {
            AppEvent::RequestFailed {
                resource,
                kind,
                message,
            } => {
                assert_eq!(resource, Resource::Sectors);
                assert_eq!(kind, RequestKind::List);
                assert_eq!(message, "Sectors unavailable");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn save_without_id_creates() {
        let mut api = MockAdminApi::new();
        api.expect_create_bank().times(1).returning(|_, _| Ok(()));
        api.expect_update_bank().never();

        let (service, mut rx) = service_with(api);
        service
            .execute(Command::SaveBank {
                id: None,
                payload: bank_payload(),
                logo: None,
            })
            .await;

        assert!(matches!(
            rx.try_recv().unwrap(),
            AppEvent::MutationSucceeded {
                resource: Resource::Banks,
                kind: RequestKind::Save,
            }
        ));
    }

    #[tokio::test]
    async fn save_with_id_updates() {
        let mut api = MockAdminApi::new();
        api.expect_update_bank()
            .times(1)
            .withf(|id, _, _| id.as_str() == "b-1")
            .returning(|_, _, _| Ok(()));
        api.expect_create_bank().never();

        let (service, mut rx) = service_with(api);
        service
            .execute(Command::SaveBank {
                id: Some(BankId::from("b-1")),
                payload: bank_payload(),
                logo: None,
            })
            .await;

        assert!(matches!(
            rx.try_recv().unwrap(),
            AppEvent::MutationSucceeded { .. }
        ));
    }

    #[tokio::test]
    async fn status_toggle_forwards_requested_value() {
        let mut api = MockAdminApi::new();
        api.expect_set_bank_status()
            .times(1)
            .withf(|id, status| id.as_str() == "b-1" && *status == RecordStatus::DeActive)
            .returning(|_, _| Ok(()));

        let (service, mut rx) = service_with(api);
        service
            .execute(Command::SetBankStatus {
                id: BankId::from("b-1"),
                status: RecordStatus::DeActive,
            })
            .await;

        assert!(matches!(
            rx.try_recv().unwrap(),
            AppEvent::MutationSucceeded {
                kind: RequestKind::Status,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn delete_failure_keeps_server_message() {
        let mut api = MockAdminApi::new();
        api.expect_delete_sector().times(1).returning(|_| {
            Err(ApiError::Rejected(
                "Sector is referenced by flights".to_string(),
            ))
        });

        let (service, mut rx) = service_with(api);
        service
            .execute(Command::DeleteSector(crate::domain::SectorId::from("s-1")))
            .await;

        match rx.try_recv().unwrap() {
            AppEvent::RequestFailed { kind, message, .. } => {
                assert_eq!(kind, RequestKind::Delete);
                assert_eq!(message, "Sector is referenced by flights");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn detail_fetch_publishes_record() {
        let mut api = MockAdminApi::new();
        api.expect_get_sector().times(1).returning(|id| {
            Ok(Sector {
                id,
                title: "DXB-JED".to_string(),
                name: "Dubai to Jeddah".to_string(),
            })
        });

        let (service, mut rx) = service_with(api);
        service
            .execute(Command::FetchSectorDetail(crate::domain::SectorId::from("s-1")))
            .await;

        match rx.try_recv().unwrap() {
            AppEvent::SectorDetailLoaded(sector) => assert_eq!(sector.title, "DXB-JED"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn commands_run_in_submission_order() {
        let mut api = MockAdminApi::new();
        api.expect_create_sector().times(1).returning(|_| Ok(()));
        api.expect_list_sectors().times(1).returning(|| Ok(vec![]));

        let (service, mut rx) = service_with(api);
        tokio_test::block_on(async {
            service
                .execute(Command::SaveSector {
                    id: None,
                    payload: SectorPayload {
                        title: "KHI-JED".to_string(),
                        name: "Karachi to Jeddah".to_string(),
                    },
                })
                .await;
            service.execute(Command::FetchSectors).await;
        });

        assert!(matches!(
            rx.try_recv().unwrap(),
            AppEvent::MutationSucceeded { .. }
        ));
        assert!(matches!(rx.try_recv().unwrap(), AppEvent::SectorsLoaded(_)));
    }
}
