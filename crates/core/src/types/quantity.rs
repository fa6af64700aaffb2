//! Cart line quantity type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum QuantityError {
    /// The value is below the minimum of one.
    #[error("quantity must be at least 1 (got {0})")]
    TooSmall(i32),
}

/// A cart line quantity, always at least one.
///
/// A line with zero units does not exist; removal is a separate operation.
/// Deserialization goes through [`Quantity::new`], so zero or negative
/// counts in request bodies are rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Quantity(i32);

impl Quantity {
    /// A quantity of one, the default for new cart lines.
    pub const ONE: Self = Self(1);

    /// Create a `Quantity` from an integer count.
    ///
    /// # Errors
    ///
    /// Returns `QuantityError::TooSmall` if the count is below one.
    pub const fn new(count: i32) -> Result<Self, QuantityError> {
        if count < 1 {
            return Err(QuantityError::TooSmall(count));
        }
        Ok(Self(count))
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Quantity {
    type Error = QuantityError;

    fn try_from(count: i32) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<Quantity> for i32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_enforces_minimum() {
        assert!(Quantity::new(0).is_err());
        assert!(Quantity::new(-3).is_err());
        assert_eq!(Quantity::new(1).unwrap(), Quantity::ONE);
        assert_eq!(Quantity::new(5).unwrap().as_i32(), 5);
    }

    #[test]
    fn test_default_is_one() {
        assert_eq!(Quantity::default(), Quantity::ONE);
    }

    #[test]
    fn test_serde_transparent() {
        let qty = Quantity::new(3).unwrap();
        let json = serde_json::to_string(&qty).unwrap();
        assert_eq!(json, "3");

        let parsed: Quantity = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, qty);
    }
}
