//! Flight sectors (origin-destination airport pairs).

use serde::{Deserialize, Serialize};

use crate::domain::ids::SectorId;

/// A sector record, e.g. `DXB-JED` "Dubai to Jeddah".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub id: SectorId,
    /// Canonical title, always formatted `XXX-XXX`.
    pub title: String,
    /// Human-readable sector name.
    pub name: String,
}

/// Write-side fields for creating or updating a sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorPayload {
    pub title: String,
    pub name: String,
}

/// Normalizes free-form sector input to the canonical `XXX-XXX` title.
///
/// Non-alphabetic characters are dropped, letters are uppercased, and a
/// dash is inserted after the third letter once enough letters exist.
/// Inputs shorter than four letters are returned uppercased as-is.
pub fn normalize_title(input: &str) -> String {
    let letters: String = input
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .take(6)
        .collect();

    if letters.len() <= 3 {
        return letters;
    }

    format!("{}-{}", &letters[..3], &letters[3..])
}

/// Checks a normalized sector title: exactly `XXX-XXX`.
pub fn is_valid_title(title: &str) -> bool {
    let parts: Vec<&str> = title.split('-').collect();
    parts.len() == 2
        && parts
            .iter()
            .all(|p| p.len() == 3 && p.chars().all(|c| c.is_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_lowercase_run() {
        assert_eq!(normalize_title("dxbjed"), "DXB-JED");
    }

    #[test]
    fn normalization_is_idempotent() {
        assert_eq!(normalize_title("DXB-JED"), "DXB-JED");
        assert_eq!(normalize_title(&normalize_title("khiJed")), "KHI-JED");
    }

    #[test]
    fn drops_noise_characters() {
        assert_eq!(normalize_title("dxb / jed"), "DXB-JED");
        assert_eq!(normalize_title("d1x2b3jed"), "DXB-JED");
    }

    #[test]
    fn short_input_stays_partial() {
        assert_eq!(normalize_title("dx"), "DX");
        assert_eq!(normalize_title("dxb"), "DXB");
        assert_eq!(normalize_title(""), "");
    }

    #[test]
    fn extra_letters_are_truncated() {
        assert_eq!(normalize_title("dxbjeddah"), "DXB-JED");
    }

    #[test]
    fn title_validation() {
        assert!(is_valid_title("DXB-JED"));
        assert!(!is_valid_title("DXBJED"));
        assert!(!is_valid_title("DX-JED"));
        assert!(!is_valid_title("dxb-jed"));
        assert!(!is_valid_title("DXB-JED-KHI"));
    }
}
