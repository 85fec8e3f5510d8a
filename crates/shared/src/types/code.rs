//! Typed codes for real currencies and fictional denominations.
//!
//! Using typed codes prevents accidentally passing a denomination code where a
//! real currency code is expected, and normalizes casing once at construction.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Macro to generate typed code wrappers.
macro_rules! typed_code {
    ($name:ident, $normalize:ident, $kind:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a code, trimming surrounding whitespace and normalizing case.
            #[must_use]
            pub fn new(code: impl AsRef<str>) -> Self {
                Self(code.as_ref().trim().$normalize())
            }

            /// Returns the normalized code.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the code is empty.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self::new(code)
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                Self::new(code)
            }
        }

        impl From<$name> for String {
            fn from(code: $name) -> Self {
                code.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(AppError::Validation(format!("{} cannot be empty", $kind)));
                }
                if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
                    return Err(AppError::Validation(format!("Invalid {}: {s}", $kind)));
                }
                Ok(Self::new(trimmed))
            }
        }
    };
}

typed_code!(
    CurrencyCode,
    to_ascii_uppercase,
    "currency code",
    "Code of a real currency (e.g. `USD`), always upper-case."
);
typed_code!(
    DenominationCode,
    to_ascii_lowercase,
    "denomination code",
    "Code of a fictional denomination (e.g. `gansito`), always lower-case."
);
