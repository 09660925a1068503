//! Inventory wire types.
//!
//! [`Quantity`] validates at the Serde layer so a malformed amount never
//! reaches the ledger:
//! - Rejects negative values (number or string form)
//! - Rejects empty and non-numeric strings
//! - Accepts both JSON numbers and numeric strings (clients send both)

use serde::{Deserialize, Serialize};

/// Format-validated, non-negative whole-unit quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity(u64);

impl Quantity {
    /// Get the inner unit count
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Quantity {
    fn from(units: u64) -> Self {
        Self(units)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        // Support both JSON number and JSON string
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumberOrString {
            Number(i64),
            Text(String),
        }

        let value = NumberOrString::deserialize(deserializer)
            .map_err(|_| D::Error::custom("Quantity must be a whole number"))?;

        match value {
            NumberOrString::Number(n) => {
                if n < 0 {
                    return Err(D::Error::custom("Quantity cannot be negative"));
                }
                Ok(Quantity(n as u64))
            }
            NumberOrString::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(D::Error::custom("Quantity cannot be empty"));
                }
                if trimmed.starts_with('-') {
                    return Err(D::Error::custom("Quantity cannot be negative"));
                }
                let units: u64 = trimmed
                    .parse()
                    .map_err(|_| D::Error::custom("Quantity must be a whole number"))?;
                Ok(Quantity(units))
            }
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

/// Reservation request body for `POST /inventory/reduce`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReduceRequest {
    pub item: String,
    pub quantity: Quantity,
}

/// Successful reservation reply.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReduceResponse {
    pub success: bool,
    pub item: String,
    #[serde(rename = "newStock")]
    pub new_stock: u64,
}

/// Business-rule rejection reply.
#[derive(Debug, Serialize, Deserialize)]
pub struct RejectionResponse {
    pub success: bool,
    pub message: String,
}

impl RejectionResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
