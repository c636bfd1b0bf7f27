//! Sold unit / service record types
//!
//! A `Record` is an immutable snapshot of what the backend returned. The
//! detail view may hold its own copy and swap it when the user jumps to a
//! related record, but it never edits fields in place.

use serde::{Deserialize, Serialize};

/// Backend identifier of a record
pub type RecordId = i64;

/// One sold or serviced unit with client and commercial metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub id: RecordId,

    pub client_name: Option<String>,
    /// Client phone number; doubles as the client identifier for history lookups
    pub phone: Option<String>,
    pub address: Option<String>,
    pub zone: Option<String>,

    /// Start of the warranty window
    pub delivery_date: Option<String>,
    pub installation_date: Option<String>,
    pub site_visit_date: Option<String>,

    pub machine_model: Option<String>,
    pub machine_serial: Option<String>,
    pub machine_capacity: Option<String>,

    pub sale_price: Option<f64>,
    pub sold_by: Option<String>,
    pub lead_source: Option<String>,
    pub remarks: Option<String>,
}

impl Record {
    /// Client identifier used for purchase-history lookups.
    ///
    /// Blank phone numbers are treated as absent.
    pub fn client_identifier(&self) -> Option<&str> {
        self.phone.as_deref().map(str::trim).filter(|phone| !phone.is_empty())
    }

    /// Display name falling back to the phone number, then to the id.
    pub fn display_name(&self) -> String {
        self.client_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| self.client_identifier().map(str::to_string))
            .unwrap_or_else(|| format!("Record #{}", self.id))
    }
}

/// Body of `GET /records/history/{phone}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub records: Vec<Record>,
}
