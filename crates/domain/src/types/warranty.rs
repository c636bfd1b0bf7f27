//! Warranty status types
//!
//! Derived, never stored: recomputed from the delivery date on every render.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Warranty classification of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarrantyState {
    /// More than the expiring-soon window remains
    InWarranty,
    /// Between 0 and 30 days remain (inclusive)
    ExpiringSoon,
    /// Expiry date has passed
    OutOfWarranty,
}

crate::impl_status_conversions!(WarrantyState {
    InWarranty => "in_warranty",
    ExpiringSoon => "expiring_soon",
    OutOfWarranty => "out_of_warranty",
});

impl WarrantyState {
    /// Badge text shown in the record detail modal
    pub fn label(&self) -> &'static str {
        match self {
            Self::InWarranty => "In Warranty",
            Self::ExpiringSoon => "Expiring Soon",
            Self::OutOfWarranty => "Out of Warranty",
        }
    }
}

/// Result of evaluating a delivery date against "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarrantyStatus {
    pub state: WarrantyState,
    pub delivery_date: NaiveDate,
    pub expiry_date: NaiveDate,
    /// Signed whole days until expiry (negative once expired)
    pub days_remaining: i64,
}

impl WarrantyStatus {
    /// Day count as displayed: days left, or days since expiry once expired.
    pub fn display_days(&self) -> u64 {
        self.days_remaining.unsigned_abs()
    }

    pub fn is_active(&self) -> bool {
        self.state != WarrantyState::OutOfWarranty
    }

    /// Sentence for the detail view, e.g. "Expired 35 days ago".
    pub fn summary(&self) -> String {
        let days = self.display_days();
        let unit = if days == 1 { "day" } else { "days" };
        match self.state {
            WarrantyState::OutOfWarranty => format!("Expired {days} {unit} ago"),
            WarrantyState::InWarranty | WarrantyState::ExpiringSoon => {
                format!("{days} {unit} remaining")
            }
        }
    }
}
