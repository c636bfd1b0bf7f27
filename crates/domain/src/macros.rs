//! Macro for wire-string conversions of small domain enums
//!
//! Generates `as_str`, `Display` and a case-insensitive `FromStr` whose error
//! is a [`SalesDeskError::Validation`](crate::SalesDeskError::Validation), so
//! parsing a bad config value or API field lands in the regular taxonomy.
//!
//! # Example
//!
//! ```rust
//! use salesdesk_domain::impl_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Walkin,
//!     Referral,
//! }
//!
//! impl_status_conversions!(Channel {
//!     Walkin => "walk_in",
//!     Referral => "referral",
//! });
//!
//! assert_eq!(Channel::Walkin.as_str(), "walk_in");
//! assert_eq!(" Referral ".parse::<Channel>().unwrap(), Channel::Referral);
//! ```

/// Implements `as_str`, `Display` and `FromStr` for a fieldless enum.
///
/// Parsing trims surrounding whitespace and ignores ASCII case.
#[macro_export]
macro_rules! impl_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical wire representation
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::SalesDeskError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase();
                $(
                    if normalized == $str {
                        return Ok(Self::$variant);
                    }
                )+
                Err($crate::SalesDeskError::Validation(format!(
                    "invalid {}: {:?}",
                    stringify!($enum_name),
                    s
                )))
            }
        }
    };
}
