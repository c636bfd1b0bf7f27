//! Domain constants
//!
//! Centralized location for the fixed numbers the derivation layer relies on.

// Warranty
pub const WARRANTY_PERIOD_YEARS: i32 = 1;
pub const WARRANTY_EXPIRING_SOON_DAYS: i64 = 30;

// Record history
pub const HISTORY_PAGE_SIZE: usize = 10;

// Summary breakdowns (sold-by is never truncated)
pub const ZONE_BREAKDOWN_LIMIT: usize = 10;
pub const LEAD_SOURCE_BREAKDOWN_LIMIT: usize = 8;

// API client
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_API_MAX_ATTEMPTS: usize = 2;

// Session storage
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "SalesDesk.session";
pub const DEFAULT_KEYCHAIN_ACCOUNT: &str = "dashboard";
pub const INVALID_PASSCODE_MESSAGE: &str = "Invalid passcode";
