//! Typed endpoint operations.
//!
//! [`AdminApi`] is the seam between the request worker and the wire: the
//! worker is written (and tested) against the trait, and [`ApiClient`]
//! carries the real implementation. Every endpoint has an explicit
//! response-contract type; list bodies accept both the generic `data` key
//! and the backend's resource-named key.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::api::{rejected, ApiClient, ApiError, ApiResult};
use crate::domain::{
    Airline, AirlineId, AirlinePayload, Bank, BankId, BankPayload, Flight, FlightId,
    FlightPackage, FlightPackageId, FlightPackagePayload, FlightPayload, LinkStatus, LogoUpload,
    ModerationStatus, Package, Permission, RecordStatus, Role, RoleId, RolePayload, Sector,
    SectorId, SectorPayload, Testimonial, TestimonialId, TestimonialPayload, Tour, User, UserId,
    UserPayload, Visa, Voucher, VoucherId, VoucherPayload,
};

/// Collection response: `{ success, message?, data | <resource>: [...] }`.
macro_rules! list_response {
    ($name:ident, $alias:literal, $item:ty) => {
        #[derive(Debug, Deserialize)]
        struct $name {
            success: bool,
            #[serde(default)]
            message: Option<String>,
            #[serde(default, alias = $alias)]
            data: Vec<$item>,
        }
    };
}

/// Single-record response: `{ success, message?, data | <resource>: {...} }`.
macro_rules! detail_response {
    ($name:ident, $alias:literal, $item:ty) => {
        #[derive(Debug, Deserialize)]
        struct $name {
            success: bool,
            #[serde(default)]
            message: Option<String>,
            #[serde(default, alias = $alias)]
            data: Option<$item>,
        }
    };
}

list_response!(BankListResponse, "banks", Bank);
detail_response!(BankDetailResponse, "bank", Bank);
list_response!(AirlineListResponse, "airlines", Airline);
detail_response!(AirlineDetailResponse, "airline", Airline);
list_response!(SectorListResponse, "sectors", Sector);
detail_response!(SectorDetailResponse, "sector", Sector);
list_response!(FlightListResponse, "flights", Flight);
detail_response!(FlightDetailResponse, "flight", Flight);
list_response!(PackageListResponse, "packages", Package);
list_response!(FlightPackageListResponse, "flightPackages", FlightPackage);
detail_response!(FlightPackageDetailResponse, "flightPackage", FlightPackage);
list_response!(PermissionListResponse, "permissions", Permission);
list_response!(RoleListResponse, "roles", Role);
detail_response!(RoleDetailResponse, "role", Role);
list_response!(UserListResponse, "users", User);
detail_response!(UserDetailResponse, "user", User);
list_response!(TestimonialListResponse, "testimonials", Testimonial);
list_response!(TourListResponse, "tours", Tour);
list_response!(VisaListResponse, "visas", Visa);
list_response!(VoucherListResponse, "vouchers", Voucher);
detail_response!(VoucherDetailResponse, "voucher", Voucher);

/// All REST operations the console performs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminApi: Send + Sync {
    // Banks
    async fn list_banks(&self) -> ApiResult<Vec<Bank>>;
    async fn get_bank(&self, id: BankId) -> ApiResult<Bank>;
    async fn create_bank(&self, payload: BankPayload, logo: Option<LogoUpload>) -> ApiResult<()>;
    async fn update_bank(
        &self,
        id: BankId,
        payload: BankPayload,
        logo: Option<LogoUpload>,
    ) -> ApiResult<()>;
    async fn set_bank_status(&self, id: BankId, status: RecordStatus) -> ApiResult<()>;
    async fn delete_bank(&self, id: BankId) -> ApiResult<()>;

    // Airlines
    async fn list_airlines(&self) -> ApiResult<Vec<Airline>>;
    async fn get_airline(&self, id: AirlineId) -> ApiResult<Airline>;
    async fn create_airline(
        &self,
        payload: AirlinePayload,
        logo: Option<LogoUpload>,
    ) -> ApiResult<()>;
    async fn update_airline(
        &self,
        id: AirlineId,
        payload: AirlinePayload,
        logo: Option<LogoUpload>,
    ) -> ApiResult<()>;
    async fn delete_airline(&self, id: AirlineId) -> ApiResult<()>;

    // Sectors
    async fn list_sectors(&self) -> ApiResult<Vec<Sector>>;
    async fn get_sector(&self, id: SectorId) -> ApiResult<Sector>;
    async fn create_sector(&self, payload: SectorPayload) -> ApiResult<()>;
    async fn update_sector(&self, id: SectorId, payload: SectorPayload) -> ApiResult<()>;
    async fn delete_sector(&self, id: SectorId) -> ApiResult<()>;

    // Flights
    async fn list_flights(&self) -> ApiResult<Vec<Flight>>;
    async fn get_flight(&self, id: FlightId) -> ApiResult<Flight>;
    async fn create_flight(&self, payload: FlightPayload) -> ApiResult<()>;
    async fn update_flight(&self, id: FlightId, payload: FlightPayload) -> ApiResult<()>;
    async fn delete_flight(&self, id: FlightId) -> ApiResult<()>;

    // Packages (referenced by flight-package links)
    async fn list_packages(&self) -> ApiResult<Vec<Package>>;

    // Flight-package links
    async fn list_flight_packages(&self) -> ApiResult<Vec<FlightPackage>>;
    async fn get_flight_package(&self, id: FlightPackageId) -> ApiResult<FlightPackage>;
    async fn create_flight_package(&self, payload: FlightPackagePayload) -> ApiResult<()>;
    async fn update_flight_package(
        &self,
        id: FlightPackageId,
        payload: FlightPackagePayload,
    ) -> ApiResult<()>;
    async fn set_flight_package_status(
        &self,
        id: FlightPackageId,
        status: LinkStatus,
    ) -> ApiResult<()>;
    async fn delete_flight_package(&self, id: FlightPackageId) -> ApiResult<()>;

    // Roles and permissions
    async fn list_permissions(&self) -> ApiResult<Vec<Permission>>;
    async fn list_roles(&self) -> ApiResult<Vec<Role>>;
    async fn get_role(&self, id: RoleId) -> ApiResult<Role>;
    async fn create_role(&self, payload: RolePayload) -> ApiResult<()>;
    async fn update_role(&self, id: RoleId, payload: RolePayload) -> ApiResult<()>;
    async fn delete_role(&self, id: RoleId) -> ApiResult<()>;

    // Users
    async fn list_users(&self) -> ApiResult<Vec<User>>;
    async fn get_user(&self, id: UserId) -> ApiResult<User>;
    async fn create_user(&self, payload: UserPayload) -> ApiResult<()>;
    async fn update_user(&self, id: UserId, payload: UserPayload) -> ApiResult<()>;
    async fn set_user_status(&self, id: UserId, status: RecordStatus) -> ApiResult<()>;
    async fn delete_user(&self, id: UserId) -> ApiResult<()>;

    // Testimonials
    async fn list_testimonials(&self) -> ApiResult<Vec<Testimonial>>;
    async fn update_testimonial(
        &self,
        id: TestimonialId,
        payload: TestimonialPayload,
    ) -> ApiResult<()>;
    async fn set_testimonial_status(
        &self,
        id: TestimonialId,
        status: ModerationStatus,
    ) -> ApiResult<()>;
    async fn set_testimonial_featured(&self, id: TestimonialId, featured: bool) -> ApiResult<()>;
    async fn delete_testimonial(&self, id: TestimonialId) -> ApiResult<()>;

    // Tours and visas (view-only)
    async fn list_tours(&self) -> ApiResult<Vec<Tour>>;
    async fn list_visas(&self) -> ApiResult<Vec<Visa>>;

    // Payment vouchers
    async fn list_vouchers(&self) -> ApiResult<Vec<Voucher>>;
    async fn get_voucher(&self, id: VoucherId) -> ApiResult<Voucher>;
    async fn create_voucher(&self, payload: VoucherPayload) -> ApiResult<()>;
    async fn update_voucher(&self, id: VoucherId, payload: VoucherPayload) -> ApiResult<()>;
    async fn delete_voucher(&self, id: VoucherId) -> ApiResult<()>;
}

impl ApiClient {
    async fn fetch_list<T, R>(&self, resource: &str, extract: fn(R) -> (bool, Option<String>, Vec<T>)) -> ApiResult<Vec<T>>
    where
        R: serde::de::DeserializeOwned,
    {
        tracing::debug!(resource, "fetching collection");
        let response = self.http().get(self.endpoint(&[resource])).send().await?;
        let body: R = self.parse(response).await?;
        let (success, message, data) = extract(body);
        if !success {
            return Err(rejected(message));
        }
        Ok(data)
    }

    async fn fetch_detail<T, R>(
        &self,
        resource: &str,
        id: &str,
        extract: fn(R) -> (bool, Option<String>, Option<T>),
    ) -> ApiResult<T>
    where
        R: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(&[resource, id]);
        let response = self.http().get(url).send().await?;
        let body: R = self.parse(response).await?;
        let (success, message, data) = extract(body);
        if !success {
            return Err(rejected(message));
        }
        data.ok_or_else(|| ApiError::Decode("record missing from response".to_string()))
    }

    async fn post_json<P: serde::Serialize + Sync>(
        &self,
        segments: &[&str],
        payload: &P,
    ) -> ApiResult<()> {
        let response = self
            .http()
            .post(self.endpoint(segments))
            .json(payload)
            .send()
            .await?;
        self.parse_ack(response).await
    }

    async fn put_json<P: serde::Serialize + Sync>(
        &self,
        segments: &[&str],
        payload: &P,
    ) -> ApiResult<()> {
        let response = self
            .http()
            .put(self.endpoint(segments))
            .json(payload)
            .send()
            .await?;
        self.parse_ack(response).await
    }

    async fn patch_json<P: serde::Serialize + Sync>(
        &self,
        segments: &[&str],
        payload: &P,
    ) -> ApiResult<()> {
        let response = self
            .http()
            .patch(self.endpoint(segments))
            .json(payload)
            .send()
            .await?;
        self.parse_ack(response).await
    }

    async fn delete_record(&self, segments: &[&str]) -> ApiResult<()> {
        let response = self.http().delete(self.endpoint(segments)).send().await?;
        self.parse_ack(response).await
    }

    async fn send_multipart(
        &self,
        method: reqwest::Method,
        segments: &[&str],
        form: reqwest::multipart::Form,
    ) -> ApiResult<()> {
        let response = self
            .http()
            .request(method, self.endpoint(segments))
            .multipart(form)
            .send()
            .await?;
        self.parse_ack(response).await
    }
}

fn logo_part(logo: LogoUpload) -> ApiResult<reqwest::multipart::Part> {
    let part = reqwest::multipart::Part::stream(reqwest::Body::from(logo.bytes))
        .file_name(logo.file_name)
        .mime_str(logo.mime)?;
    Ok(part)
}

fn bank_form(
    payload: &BankPayload,
    logo: Option<LogoUpload>,
) -> ApiResult<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new()
        .text("name", payload.name.clone())
        .text("account_title", payload.account_title.clone())
        .text("account_number", payload.account_number.clone())
        .text("iban", payload.iban.clone())
        .text("address", payload.address.clone())
        .text("status", payload.status.wire_value());
    if let Some(logo) = logo {
        form = form.part("logo", logo_part(logo)?);
    }
    Ok(form)
}

fn airline_form(
    payload: &AirlinePayload,
    logo: Option<LogoUpload>,
) -> ApiResult<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new()
        .text("country", payload.country.clone())
        .text("name", payload.name.clone())
        .text("short_code", payload.short_code.clone());
    if let Some(logo) = logo {
        form = form.part("logo", logo_part(logo)?);
    }
    Ok(form)
}

#[async_trait]
impl AdminApi for ApiClient {
    async fn list_banks(&self) -> ApiResult<Vec<Bank>> {
        self.fetch_list("banks", |r: BankListResponse| (r.success, r.message, r.data))
            .await
    }

    async fn get_bank(&self, id: BankId) -> ApiResult<Bank> {
        self.fetch_detail("banks", id.as_str(), |r: BankDetailResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn create_bank(&self, payload: BankPayload, logo: Option<LogoUpload>) -> ApiResult<()> {
        let form = bank_form(&payload, logo)?;
        self.send_multipart(reqwest::Method::POST, &["banks", "add"], form)
            .await
    }

    async fn update_bank(
        &self,
        id: BankId,
        payload: BankPayload,
        logo: Option<LogoUpload>,
    ) -> ApiResult<()> {
        let form = bank_form(&payload, logo)?;
        self.send_multipart(reqwest::Method::PUT, &["banks", id.as_str()], form)
            .await
    }

    async fn set_bank_status(&self, id: BankId, status: RecordStatus) -> ApiResult<()> {
        self.patch_json(&["banks", id.as_str(), "status"], &json!({ "status": status }))
            .await
    }

    async fn delete_bank(&self, id: BankId) -> ApiResult<()> {
        self.delete_record(&["banks", id.as_str()]).await
    }

    async fn list_airlines(&self) -> ApiResult<Vec<Airline>> {
        self.fetch_list("airlines", |r: AirlineListResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn get_airline(&self, id: AirlineId) -> ApiResult<Airline> {
        self.fetch_detail("airlines", id.as_str(), |r: AirlineDetailResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn create_airline(
        &self,
        payload: AirlinePayload,
        logo: Option<LogoUpload>,
    ) -> ApiResult<()> {
        let form = airline_form(&payload, logo)?;
        self.send_multipart(reqwest::Method::POST, &["airlines", "add"], form)
            .await
    }

    async fn update_airline(
        &self,
        id: AirlineId,
        payload: AirlinePayload,
        logo: Option<LogoUpload>,
    ) -> ApiResult<()> {
        let form = airline_form(&payload, logo)?;
        self.send_multipart(reqwest::Method::PUT, &["airlines", id.as_str()], form)
            .await
    }

    async fn delete_airline(&self, id: AirlineId) -> ApiResult<()> {
        self.delete_record(&["airlines", id.as_str()]).await
    }

    async fn list_sectors(&self) -> ApiResult<Vec<Sector>> {
        self.fetch_list("sectors", |r: SectorListResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn get_sector(&self, id: SectorId) -> ApiResult<Sector> {
        self.fetch_detail("sectors", id.as_str(), |r: SectorDetailResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn create_sector(&self, payload: SectorPayload) -> ApiResult<()> {
        self.post_json(&["sectors", "add"], &payload).await
    }

    async fn update_sector(&self, id: SectorId, payload: SectorPayload) -> ApiResult<()> {
        self.put_json(&["sectors", id.as_str()], &payload).await
    }

    async fn delete_sector(&self, id: SectorId) -> ApiResult<()> {
        self.delete_record(&["sectors", id.as_str()]).await
    }

    async fn list_flights(&self) -> ApiResult<Vec<Flight>> {
        self.fetch_list("flights", |r: FlightListResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn get_flight(&self, id: FlightId) -> ApiResult<Flight> {
        self.fetch_detail("flights", id.as_str(), |r: FlightDetailResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn create_flight(&self, payload: FlightPayload) -> ApiResult<()> {
        self.post_json(&["flights", "add"], &payload).await
    }

    async fn update_flight(&self, id: FlightId, payload: FlightPayload) -> ApiResult<()> {
        self.put_json(&["flights", id.as_str()], &payload).await
    }

    async fn delete_flight(&self, id: FlightId) -> ApiResult<()> {
        self.delete_record(&["flights", id.as_str()]).await
    }

    async fn list_packages(&self) -> ApiResult<Vec<Package>> {
        self.fetch_list("packages", |r: PackageListResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn list_flight_packages(&self) -> ApiResult<Vec<FlightPackage>> {
        self.fetch_list("flight-packages", |r: FlightPackageListResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn get_flight_package(&self, id: FlightPackageId) -> ApiResult<FlightPackage> {
        self.fetch_detail("flight-packages", id.as_str(), |r: FlightPackageDetailResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn create_flight_package(&self, payload: FlightPackagePayload) -> ApiResult<()> {
        self.post_json(&["flight-packages", "add"], &payload).await
    }

    async fn update_flight_package(
        &self,
        id: FlightPackageId,
        payload: FlightPackagePayload,
    ) -> ApiResult<()> {
        self.put_json(&["flight-packages", id.as_str()], &payload)
            .await
    }

    async fn set_flight_package_status(
        &self,
        id: FlightPackageId,
        status: LinkStatus,
    ) -> ApiResult<()> {
        self.patch_json(
            &["flight-packages", id.as_str(), "status"],
            &json!({ "status": status }),
        )
        .await
    }

    async fn delete_flight_package(&self, id: FlightPackageId) -> ApiResult<()> {
        self.delete_record(&["flight-packages", id.as_str()]).await
    }

    async fn list_permissions(&self) -> ApiResult<Vec<Permission>> {
        self.fetch_list("permissions", |r: PermissionListResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn list_roles(&self) -> ApiResult<Vec<Role>> {
        self.fetch_list("roles", |r: RoleListResponse| (r.success, r.message, r.data))
            .await
    }

    async fn get_role(&self, id: RoleId) -> ApiResult<Role> {
        self.fetch_detail("roles", id.as_str(), |r: RoleDetailResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn create_role(&self, payload: RolePayload) -> ApiResult<()> {
        self.post_json(&["roles", "add"], &payload).await
    }

    async fn update_role(&self, id: RoleId, payload: RolePayload) -> ApiResult<()> {
        self.put_json(&["roles", id.as_str()], &payload).await
    }

    async fn delete_role(&self, id: RoleId) -> ApiResult<()> {
        self.delete_record(&["roles", id.as_str()]).await
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.fetch_list("users", |r: UserListResponse| (r.success, r.message, r.data))
            .await
    }

    async fn get_user(&self, id: UserId) -> ApiResult<User> {
        self.fetch_detail("users", id.as_str(), |r: UserDetailResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn create_user(&self, payload: UserPayload) -> ApiResult<()> {
        self.post_json(&["users", "add"], &payload).await
    }

    async fn update_user(&self, id: UserId, payload: UserPayload) -> ApiResult<()> {
        self.put_json(&["users", id.as_str()], &payload).await
    }

    async fn set_user_status(&self, id: UserId, status: RecordStatus) -> ApiResult<()> {
        self.patch_json(&["users", id.as_str(), "status"], &json!({ "status": status }))
            .await
    }

    async fn delete_user(&self, id: UserId) -> ApiResult<()> {
        self.delete_record(&["users", id.as_str()]).await
    }

    async fn list_testimonials(&self) -> ApiResult<Vec<Testimonial>> {
        self.fetch_list("testimonials", |r: TestimonialListResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn update_testimonial(
        &self,
        id: TestimonialId,
        payload: TestimonialPayload,
    ) -> ApiResult<()> {
        self.put_json(&["testimonials", id.as_str()], &payload).await
    }

    async fn set_testimonial_status(
        &self,
        id: TestimonialId,
        status: ModerationStatus,
    ) -> ApiResult<()> {
        self.patch_json(
            &["testimonials", id.as_str(), "status"],
            &json!({ "status": status }),
        )
        .await
    }

    async fn set_testimonial_featured(&self, id: TestimonialId, featured: bool) -> ApiResult<()> {
        self.patch_json(
            &["testimonials", id.as_str(), "featured"],
            &json!({ "featured": featured }),
        )
        .await
    }

    async fn delete_testimonial(&self, id: TestimonialId) -> ApiResult<()> {
        self.delete_record(&["testimonials", id.as_str()]).await
    }

    async fn list_tours(&self) -> ApiResult<Vec<Tour>> {
        self.fetch_list("tours", |r: TourListResponse| (r.success, r.message, r.data))
            .await
    }

    async fn list_visas(&self) -> ApiResult<Vec<Visa>> {
        self.fetch_list("visas", |r: VisaListResponse| (r.success, r.message, r.data))
            .await
    }

    async fn list_vouchers(&self) -> ApiResult<Vec<Voucher>> {
        self.fetch_list("vouchers", |r: VoucherListResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn get_voucher(&self, id: VoucherId) -> ApiResult<Voucher> {
        self.fetch_detail("vouchers", id.as_str(), |r: VoucherDetailResponse| {
            (r.success, r.message, r.data)
        })
        .await
    }

    async fn create_voucher(&self, payload: VoucherPayload) -> ApiResult<()> {
        self.post_json(&["vouchers", "add"], &payload).await
    }

    async fn update_voucher(&self, id: VoucherId, payload: VoucherPayload) -> ApiResult<()> {
        self.put_json(&["vouchers", id.as_str()], &payload).await
    }

    async fn delete_voucher(&self, id: VoucherId) -> ApiResult<()> {
        self.delete_record(&["vouchers", id.as_str()]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_body_accepts_resource_key() {
        let body: BankListResponse = serde_json::from_str(
            r#"{"success":true,"banks":[{"id":"b-1","name":"Meezan","account_title":"Karwan Travels",
                "account_number":"0101","iban":"PK36MEZN0000000101","address":"Karachi",
                "status":"Active"}]}"#,
        )
        .unwrap();
        assert!(body.success);
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0].name, "Meezan");
    }

    #[test]
    fn list_body_accepts_data_key() {
        let body: SectorListResponse = serde_json::from_str(
            r#"{"success":true,"data":[{"id":"s-1","title":"DXB-JED","name":"Dubai to Jeddah"}]}"#,
        )
        .unwrap();
        assert_eq!(body.data[0].title, "DXB-JED");
    }

    #[test]
    fn failed_list_body_decodes_without_data() {
        let body: FlightListResponse =
            serde_json::from_str(r#"{"success":false,"message":"No flights found"}"#).unwrap();
        assert!(!body.success);
        assert_eq!(body.message.as_deref(), Some("No flights found"));
        assert!(body.data.is_empty());
    }

    #[test]
    fn detail_body_accepts_either_key() {
        let body: RoleDetailResponse = serde_json::from_str(
            r#"{"success":true,"role":{"id":"r-1","name":"Operations"}}"#,
        )
        .unwrap();
        assert_eq!(body.data.unwrap().name, "Operations");

        let body: RoleDetailResponse = serde_json::from_str(
            r#"{"success":true,"data":{"id":"r-2","name":"Finance"}}"#,
        )
        .unwrap();
        assert_eq!(body.data.unwrap().name, "Finance");
    }

    #[test]
    fn status_patch_body_uses_wire_spelling() {
        let body = json!({ "status": RecordStatus::DeActive });
        assert_eq!(body.to_string(), r#"{"status":"De-Active"}"#);

        let body = json!({ "status": LinkStatus::SoldOut });
        assert_eq!(body.to_string(), r#"{"status":"Sold Out"}"#);
    }
}
