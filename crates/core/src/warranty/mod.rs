//! Warranty evaluator
//!
//! Pure mapping from a delivery date and "now" to a [`WarrantyStatus`].
//!
//! [`WarrantyStatus`]: salesdesk_domain::WarrantyStatus

pub mod evaluator;

pub use evaluator::{
    evaluate_from_date, evaluate_warranty, evaluate_warranty_for_record, warranty_or_none,
};
