//! Payment vouchers recorded against agency accounts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{BankId, UserId, VoucherId};

/// How a voucher payment was made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Cash,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Cheque,
}

impl PaymentMethod {
    /// Returns the display label.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Cheque => "Cheque",
        }
    }

    /// All methods, in selector order.
    pub fn all() -> &'static [PaymentMethod] {
        &[
            PaymentMethod::Cash,
            PaymentMethod::BankTransfer,
            PaymentMethod::Cheque,
        ]
    }

    /// Whether this method settles through a bank account.
    pub fn requires_bank(self) -> bool {
        !matches!(self, PaymentMethod::Cash)
    }
}

/// Posting state of a voucher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoucherStatus {
    #[default]
    Pending,
    Posted,
    Cancelled,
}

impl VoucherStatus {
    /// Returns the display label.
    pub fn label(self) -> &'static str {
        match self {
            VoucherStatus::Pending => "Pending",
            VoucherStatus::Posted => "Posted",
            VoucherStatus::Cancelled => "Cancelled",
        }
    }
}

/// A payment voucher record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: VoucherId,
    /// Backend-assigned running number, e.g. `PV-2025-0931`.
    pub voucher_no: String,
    pub user_id: UserId,
    pub amount: f64,
    pub method: PaymentMethod,
    /// Receiving bank, present for non-cash methods.
    #[serde(default)]
    pub bank_id: Option<BankId>,
    pub issued_on: NaiveDate,
    #[serde(default)]
    pub notes: String,
    pub status: VoucherStatus,
}

/// Write-side fields for creating or updating a voucher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoucherPayload {
    pub user_id: UserId,
    pub amount: f64,
    pub method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<BankId>,
    pub issued_on: NaiveDate,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_transfer_wire_spelling() {
        let json = serde_json::to_string(&PaymentMethod::BankTransfer).unwrap();
        assert_eq!(json, "\"Bank Transfer\"");
    }

    #[test]
    fn cash_needs_no_bank() {
        assert!(!PaymentMethod::Cash.requires_bank());
        assert!(PaymentMethod::BankTransfer.requires_bank());
        assert!(PaymentMethod::Cheque.requires_bank());
    }
}
