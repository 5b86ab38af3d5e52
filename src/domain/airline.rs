//! Airlines operating the platform's flights.

use serde::{Deserialize, Serialize};

use crate::domain::ids::AirlineId;

/// An airline record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    pub id: AirlineId,
    /// ISO-style country name the airline is registered in.
    pub country: String,
    pub name: String,
    /// 2-3 letter carrier code, always uppercase.
    pub short_code: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Write-side fields for creating or updating an airline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirlinePayload {
    pub country: String,
    pub name: String,
    pub short_code: String,
}

/// Checks a carrier short code: 2-3 ASCII uppercase letters.
pub fn is_valid_short_code(code: &str) -> bool {
    (2..=3).contains(&code.len()) && code.chars().all(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_code_accepts_iata_and_icao_lengths() {
        assert!(is_valid_short_code("PK"));
        assert!(is_valid_short_code("PAK"));
    }

    #[test]
    fn short_code_rejects_bad_shapes() {
        assert!(!is_valid_short_code("p1"));
        assert!(!is_valid_short_code("pak"));
        assert!(!is_valid_short_code("P"));
        assert!(!is_valid_short_code("PAKK"));
        assert!(!is_valid_short_code("P-1"));
        assert!(!is_valid_short_code(""));
    }
}
