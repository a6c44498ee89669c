// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros for reducing boilerplate.

/// Generate `as_str`, `Display` and `FromStr` for a fieldless enum whose
/// variants map one-to-one onto lowercase wire names.
///
/// Parsing an unknown name yields [`crate::Error::Invalid`] naming the
/// accepted values.
///
/// ```ignore
/// crate::string_enum! {
///     LockMode("lock mode") {
///         Free => "free",
///         Host => "host",
///     }
/// }
/// ```
#[macro_export]
macro_rules! string_enum {
    ($enum:ident($what:literal) { $( $variant:ident => $str:literal ),+ $(,)? }) => {
        impl $enum {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $str, )+
                }
            }
        }

        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum {
            type Err = $crate::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $str => Ok(Self::$variant), )+
                    other => Err($crate::Error::Invalid(format!(
                        "unknown {} `{}`, expected one of: {}",
                        $what,
                        other,
                        [$( $str ),+].join(", ")
                    ))),
                }
            }
        }
    };
}
