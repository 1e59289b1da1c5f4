//! Numeric identifiers issued by the franchise backend.
//!
//! Every identifier is a positive 64-bit integer on the wire. Each gets its
//! own newtype so a brand id can never be passed where a consultation id is
//! expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Validation errors raised when constructing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// Identifiers start at 1.
    #[error("{kind} must be a positive integer (got {value})")]
    NonPositive { kind: &'static str, value: i64 },
    /// The raw text is not an integer.
    #[error("{kind} must be a positive integer (got {raw:?})")]
    Malformed { kind: &'static str, raw: String },
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub fn new(value: i64) -> Result<Self, IdValidationError> {
                if value <= 0 {
                    return Err(IdValidationError::NonPositive { kind: $kind, value });
                }
                Ok(Self(value))
            }

            /// The raw integer value.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdValidationError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let value = raw.trim().parse::<i64>().map_err(|_| IdValidationError::Malformed {
                    kind: $kind,
                    raw: raw.to_owned(),
                })?;
                Self::new(value)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(
    /// Franchise brand identifier.
    BrandId => "brand id"
);
define_id!(
    /// Brand category identifier.
    CategoryId => "category id"
);
define_id!(
    /// Consultation identifier.
    ConsultationId => "consultation id"
);
define_id!(
    /// End-user account identifier, sent as the `User-Id` header.
    UserId => "user id"
);
define_id!(
    /// Manager account identifier, sent as the `Manager-Id` header.
    ManagerId => "manager id"
);

#[cfg(test)]
mod tests {
    //! Identifier validation and parsing.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-7)]
    fn rejects_non_positive_values(#[case] value: i64) {
        let err = BrandId::new(value).expect_err("non-positive id must fail");
        assert_eq!(
            err,
            IdValidationError::NonPositive {
                kind: "brand id",
                value
            }
        );
    }

    #[rstest]
    fn parses_trimmed_text() {
        let id: ConsultationId = " 42 ".parse().expect("valid id");
        assert_eq!(id.get(), 42);
    }

    #[rstest]
    fn rejects_malformed_text() {
        let err = "abc".parse::<UserId>().expect_err("text is not a number");
        assert!(matches!(err, IdValidationError::Malformed { kind: "user id", .. }));
    }

    #[rstest]
    fn serde_rejects_zero() {
        let result: Result<ManagerId, _> = serde_json::from_str("0");
        assert!(result.is_err());
        let id: ManagerId = serde_json::from_str("9").expect("positive id decodes");
        assert_eq!(serde_json::to_string(&id).expect("encodes"), "9");
    }
}
