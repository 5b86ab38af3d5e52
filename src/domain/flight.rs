//! Flights and their links to tour packages.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{AirlineId, FlightId, FlightPackageId, PackageId, SectorId};

/// One leg endpoint: a city with its scheduled date and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightStop {
    pub city: String,
    pub date: NaiveDate,
    /// Scheduled local time, minute precision.
    pub time: NaiveTime,
}

/// A flight record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    /// Carrier flight number, e.g. `PK-741`.
    pub number: String,
    pub airline_id: AirlineId,
    pub sector_id: SectorId,
    pub departure: FlightStop,
    pub arrival: FlightStop,
}

/// Write-side fields for creating or updating a flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightPayload {
    pub number: String,
    pub airline_id: AirlineId,
    pub sector_id: SectorId,
    pub departure: FlightStop,
    pub arrival: FlightStop,
}

/// A tour package, referenced when linking flights to packages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    pub title: String,
}

/// Availability status of a flight-package link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkStatus {
    #[default]
    Active,
    #[serde(rename = "Sold Out")]
    SoldOut,
    Upcoming,
    Inactive,
}

impl LinkStatus {
    /// Returns the display label.
    pub fn label(self) -> &'static str {
        match self {
            LinkStatus::Active => "Active",
            LinkStatus::SoldOut => "Sold Out",
            LinkStatus::Upcoming => "Upcoming",
            LinkStatus::Inactive => "Inactive",
        }
    }

    /// All statuses, in selector order.
    pub fn all() -> &'static [LinkStatus] {
        &[
            LinkStatus::Active,
            LinkStatus::SoldOut,
            LinkStatus::Upcoming,
            LinkStatus::Inactive,
        ]
    }
}

/// A link attaching a flight to a package with a seat allotment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPackage {
    pub id: FlightPackageId,
    pub flight_id: FlightId,
    pub package_id: PackageId,
    /// Seats still available on this flight for this package.
    pub remaining_seats: u32,
    pub status: LinkStatus,
}

/// Write-side fields for creating or updating a flight-package link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightPackagePayload {
    pub flight_id: FlightId,
    pub package_id: PackageId,
    pub remaining_seats: u32,
    pub status: LinkStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_status_wire_spelling() {
        let json = serde_json::to_string(&LinkStatus::SoldOut).unwrap();
        assert_eq!(json, "\"Sold Out\"");

        let back: LinkStatus = serde_json::from_str("\"Sold Out\"").unwrap();
        assert_eq!(back, LinkStatus::SoldOut);
    }

    #[test]
    fn flight_round_trips_through_json() {
        let flight = Flight {
            id: FlightId::from("fl-1"),
            number: "PK-741".to_string(),
            airline_id: AirlineId::from("al-1"),
            sector_id: SectorId::from("sec-1"),
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
        };

        let json = serde_json::to_string(&flight).unwrap();
        let back: Flight = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flight);
    }
}
