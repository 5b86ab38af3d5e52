//! Bank accounts used for customer payments.

use serde::{Deserialize, Serialize};

use crate::domain::ids::BankId;
use crate::domain::status::RecordStatus;

/// A bank account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub id: BankId,
    pub name: String,
    pub account_title: String,
    pub account_number: String,
    pub iban: String,
    pub address: String,
    /// URL of the uploaded logo, if any.
    #[serde(default)]
    pub logo_url: Option<String>,
    pub status: RecordStatus,
}

/// Write-side fields for creating or updating a bank.
///
/// The logo travels separately as a multipart file part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankPayload {
    pub name: String,
    pub account_title: String,
    pub account_number: String,
    pub iban: String,
    pub address: String,
    pub status: RecordStatus,
}
