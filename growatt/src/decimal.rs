use std::fmt::Formatter;

use growatt_quantities::energy::KilowattHours;
use serde::{Deserialize, Deserializer, Serialize, de::Visitor};

/// Decimal value kept exactly as the vendor sent it.
///
/// Growatt reports energy totals as strings like `"5.2"`, but occasionally as bare numbers.
/// Both are accepted and stored as text, so the original precision is never altered.
#[must_use]
#[derive(
    Clone,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    derive_more::Display,
    derive_more::From,
    derive_more::Into,
)]
#[serde(transparent)]
pub struct DecimalString(String);

impl DecimalString {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the text as kilowatt-hours, if it is a valid number.
    #[must_use]
    pub fn to_kilowatt_hours(&self) -> Option<KilowattHours> {
        self.0.trim().parse().ok().map(KilowattHours)
    }
}

impl From<&str> for DecimalString {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl AsRef<str> for DecimalString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for DecimalString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DecimalVisitor;

        impl Visitor<'_> for DecimalVisitor {
            type Value = DecimalString;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("a decimal string or a number")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(DecimalString(value.to_owned()))
            }

            fn visit_string<E: serde::de::Error>(self, value: String) -> Result<Self::Value, E> {
                Ok(DecimalString(value))
            }

            fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(DecimalString(value.to_string()))
            }

            fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(DecimalString(value.to_string()))
            }

            fn visit_f64<E: serde::de::Error>(self, value: f64) -> Result<Self::Value, E> {
                if value.is_finite() {
                    Ok(DecimalString(value.to_string()))
                } else {
                    Err(E::custom("non-finite decimal"))
                }
            }
        }

        deserializer.deserialize_any(DecimalVisitor)
    }
}
