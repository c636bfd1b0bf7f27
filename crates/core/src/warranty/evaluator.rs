//! Warranty evaluation from a delivery date

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use salesdesk_domain::constants::{WARRANTY_EXPIRING_SOON_DAYS, WARRANTY_PERIOD_YEARS};
use salesdesk_domain::utils::dates::{add_years, parse_calendar_date};
use salesdesk_domain::{Record, Result, SalesDeskError, WarrantyState, WarrantyStatus};
use tracing::debug;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Evaluate the warranty for a raw delivery date string.
///
/// The warranty window is exactly one calendar year from delivery. The
/// expiry instant is midnight UTC of the expiry date and the day count is
/// `ceil((expiry - now) / 1 day)`.
///
/// # Errors
/// Returns `SalesDeskError::Validation` when the date is absent or cannot be
/// parsed.
pub fn evaluate_warranty(delivery_date: Option<&str>, now: DateTime<Utc>) -> Result<WarrantyStatus> {
    let raw = delivery_date
        .ok_or_else(|| SalesDeskError::Validation("delivery date is missing".into()))?;
    let delivery = parse_calendar_date(raw)?;
    evaluate_from_date(delivery, now)
}

/// Evaluate the warranty for an already-parsed delivery date.
///
/// # Errors
/// Returns `SalesDeskError::Validation` if the expiry date falls outside the
/// representable calendar.
pub fn evaluate_from_date(delivery: NaiveDate, now: DateTime<Utc>) -> Result<WarrantyStatus> {
    let expiry = add_years(delivery, WARRANTY_PERIOD_YEARS).ok_or_else(|| {
        SalesDeskError::Validation(format!("delivery date {delivery} is out of range"))
    })?;

    let days_remaining = days_until(expiry, now);
    Ok(WarrantyStatus {
        state: classify(days_remaining),
        delivery_date: delivery,
        expiry_date: expiry,
        days_remaining,
    })
}

/// Evaluate the warranty of a record's delivery date.
///
/// # Errors
/// See [`evaluate_warranty`].
pub fn evaluate_warranty_for_record(record: &Record, now: DateTime<Utc>) -> Result<WarrantyStatus> {
    evaluate_warranty(record.delivery_date.as_deref(), now)
}

/// Like [`evaluate_warranty_for_record`], but "no warranty data" is `None`
/// instead of an error.
pub fn warranty_or_none(record: &Record, now: DateTime<Utc>) -> Option<WarrantyStatus> {
    match evaluate_warranty_for_record(record, now) {
        Ok(status) => Some(status),
        Err(err) => {
            debug!(record_id = record.id, error = %err, "no warranty data for record");
            None
        }
    }
}

fn classify(days_remaining: i64) -> WarrantyState {
    if days_remaining < 0 {
        WarrantyState::OutOfWarranty
    } else if days_remaining <= WARRANTY_EXPIRING_SOON_DAYS {
        WarrantyState::ExpiringSoon
    } else {
        WarrantyState::InWarranty
    }
}

fn days_until(expiry: NaiveDate, now: DateTime<Utc>) -> i64 {
    let expiry_instant = expiry.and_time(NaiveTime::MIN).and_utc();
    let millis = (expiry_instant - now).num_milliseconds();
    // ceil for a positive divisor
    -((-millis).div_euclid(MILLIS_PER_DAY))
}
