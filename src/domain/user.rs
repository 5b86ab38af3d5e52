//! Console users and agency accounts.

use serde::{Deserialize, Serialize};

use crate::domain::ids::{RoleId, UserId};
use crate::domain::status::RecordStatus;

/// How an agency's margin on bookings is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginType {
    /// Percentage of the booking total.
    #[default]
    Percentage,
    /// Flat amount per booking.
    Fixed,
}

impl MarginType {
    /// Returns the display label.
    pub fn label(self) -> &'static str {
        match self {
            MarginType::Percentage => "Percentage",
            MarginType::Fixed => "Fixed",
        }
    }

    /// Both margin types, in selector order.
    pub fn all() -> &'static [MarginType] {
        &[MarginType::Percentage, MarginType::Fixed]
    }
}

/// A console user or agency account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub margin_type: MarginType,
    pub margin_value: f64,
    pub credit: f64,
    pub status: RecordStatus,
    #[serde(default)]
    pub role_ids: Vec<RoleId>,
}

/// Write-side fields for creating or updating a user.
///
/// The password is write-only: absent from [`User`], optional here (only
/// sent when set, and required on create).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub margin_type: MarginType,
    pub margin_value: f64,
    pub credit: f64,
    pub status: RecordStatus,
    pub role_ids: Vec<RoleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_omitted_when_unset() {
        let payload = UserPayload {
            name: "Amir".to_string(),
            email: "amir@example.com".to_string(),
            phone: "+92-300-1234567".to_string(),
            company: String::new(),
            address: String::new(),
            city: String::new(),
            country: String::new(),
            margin_type: MarginType::Percentage,
            margin_value: 5.0,
            credit: 0.0,
            status: RecordStatus::Active,
            role_ids: vec![],
            password: None,
        };

        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("password"));
    }

    #[test]
    fn password_is_sent_when_set() {
        let payload = UserPayload {
            name: "Amir".to_string(),
            email: "amir@example.com".to_string(),
            phone: "+92-300-1234567".to_string(),
            company: String::new(),
            address: String::new(),
            city: String::new(),
            country: String::new(),
            margin_type: MarginType::Fixed,
            margin_value: 1500.0,
            credit: 20000.0,
            status: RecordStatus::Active,
            role_ids: vec![RoleId::from("role-1")],
            password: Some("s3cret".to_string()),
        };

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"password\":\"s3cret\""));
    }
}
