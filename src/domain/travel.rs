//! Tours and visa offerings. Both are view-only in the console; records
//! are maintained by a separate content pipeline.

use serde::{Deserialize, Serialize};

use crate::domain::ids::{TourId, VisaId};
use crate::domain::status::RecordStatus;

/// A guided tour offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: TourId,
    pub name: String,
    pub duration_days: u32,
    pub price: f64,
    pub status: RecordStatus,
}

/// A visa processing offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visa {
    pub id: VisaId,
    pub country: String,
    /// e.g. "Umrah", "Visit", "Transit".
    pub visa_type: String,
    pub price: f64,
    pub processing_days: u32,
    pub status: RecordStatus,
}
