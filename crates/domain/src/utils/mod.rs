//! Shared domain utilities

pub mod dates;
