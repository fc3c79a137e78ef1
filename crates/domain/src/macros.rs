//! Macro for implementing wire-string conversions on closed enums
//!
//! Scopes, retention policies and regions all travel as fixed strings. This
//! macro gives each such enum a single source of truth for its string form:
//! `as_str`, `Display`, `FromStr` (case-insensitive) and `ALL`.
//!
//! # Example
//!
//! ```rust
//! use forge_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Policy {
//!     Transient,
//!     Persistent,
//! }
//!
//! impl_wire_enum_conversions!(Policy {
//!     Transient => "transient",
//!     Persistent => "persistent",
//! });
//!
//! assert_eq!(Policy::Transient.as_str(), "transient");
//! assert_eq!("PERSISTENT".parse::<Policy>().unwrap(), Policy::Persistent);
//! ```

/// Implements `as_str`, `ALL`, Display and FromStr for wire enums
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their wire strings
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$enum_name] = &[$(Self::$variant),+];

            /// Wire representation of this variant
            #[must_use]
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
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $(if s.eq_ignore_ascii_case($str) {
                    return Ok(Self::$variant);
                })+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
