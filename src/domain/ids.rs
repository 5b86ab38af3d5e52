//! Opaque record identifiers.
//!
//! Every persisted record is keyed by a backend-assigned identifier. The
//! client never inspects or derives these values; newtypes keep a bank id
//! from being handed to a flight endpoint by accident.

use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Returns the raw identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a bank record.
    BankId
);
opaque_id!(
    /// Identifier of an airline record.
    AirlineId
);
opaque_id!(
    /// Identifier of a sector record.
    SectorId
);
opaque_id!(
    /// Identifier of a flight record.
    FlightId
);
opaque_id!(
    /// Identifier of a package record.
    PackageId
);
opaque_id!(
    /// Identifier of a flight-package link record.
    FlightPackageId
);
opaque_id!(
    /// Identifier of a role record.
    RoleId
);
opaque_id!(
    /// Identifier of a permission record.
    PermissionId
);
opaque_id!(
    /// Identifier of a user or agent record.
    UserId
);
opaque_id!(
    /// Identifier of a testimonial record.
    TestimonialId
);
opaque_id!(
    /// Identifier of a tour record.
    TourId
);
opaque_id!(
    /// Identifier of a visa record.
    VisaId
);
opaque_id!(
    /// Identifier of a payment voucher record.
    VoucherId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip() {
        let id = BankId::from("bank-17");
        assert_eq!(id.as_str(), "bank-17");
        assert_eq!(id.to_string(), "bank-17");
    }

    #[test]
    fn id_serializes_transparently() {
        let id = FlightId::from("fl-2");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"fl-2\"");

        let back: FlightId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
