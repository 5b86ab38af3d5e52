//! Customer testimonials and their moderation workflow.

use serde::{Deserialize, Serialize};

use crate::domain::ids::TestimonialId;

/// Moderation state of a testimonial. Transitions are driven entirely by
/// the backend; the console only requests them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModerationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    /// Returns the display label.
    pub fn label(self) -> &'static str {
        match self {
            ModerationStatus::Pending => "Pending",
            ModerationStatus::Approved => "Approved",
            ModerationStatus::Rejected => "Rejected",
        }
    }

    /// All statuses, in filter order.
    pub fn all() -> &'static [ModerationStatus] {
        &[
            ModerationStatus::Pending,
            ModerationStatus::Approved,
            ModerationStatus::Rejected,
        ]
    }
}

/// A customer testimonial awaiting or past moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub customer_name: String,
    /// Star rating, 1-5.
    pub rating: u8,
    pub content: String,
    pub status: ModerationStatus,
    /// Whether the testimonial is featured on the public site.
    #[serde(default)]
    pub featured: bool,
    /// Optional public reply from the company.
    #[serde(default)]
    pub company_response: Option<String>,
}

/// Write-side fields for the moderation form (company response only; the
/// customer's content is never edited by the console).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestimonialPayload {
    pub company_response: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_for_optional_fields() {
        let t: Testimonial = serde_json::from_str(
            r#"{"id":"t-1","customer_name":"Sana","rating":5,
                "content":"Smooth Umrah booking","status":"Approved"}"#,
        )
        .unwrap();

        assert!(!t.featured);
        assert!(t.company_response.is_none());
        assert_eq!(t.status, ModerationStatus::Approved);
    }
}
