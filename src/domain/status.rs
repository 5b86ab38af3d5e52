//! Record status values shared across resources.

use serde::{Deserialize, Serialize};

/// Two-state activation status used by banks, users, tours and visas.
///
/// The wire value for the inactive state is the backend's historical
/// spelling `De-Active`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    #[default]
    Active,
    #[serde(rename = "De-Active")]
    DeActive,
}

impl RecordStatus {
    /// Returns the opposite status.
    pub fn toggled(self) -> Self {
        match self {
            RecordStatus::Active => RecordStatus::DeActive,
            RecordStatus::DeActive => RecordStatus::Active,
        }
    }

    /// Returns the display label.
    pub fn label(self) -> &'static str {
        match self {
            RecordStatus::Active => "Active",
            RecordStatus::DeActive => "De-Active",
        }
    }

    /// Returns the wire value sent to the status endpoint.
    pub fn wire_value(self) -> &'static str {
        self.label()
    }

    /// Returns whether the record is active.
    pub fn is_active(self) -> bool {
        matches!(self, RecordStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_involutive() {
        assert_eq!(RecordStatus::Active.toggled(), RecordStatus::DeActive);
        assert_eq!(RecordStatus::Active.toggled().toggled(), RecordStatus::Active);
    }

    #[test]
    fn wire_spelling() {
        let json = serde_json::to_string(&RecordStatus::DeActive).unwrap();
        assert_eq!(json, "\"De-Active\"");

        let back: RecordStatus = serde_json::from_str("\"De-Active\"").unwrap();
        assert_eq!(back, RecordStatus::DeActive);
    }
}
