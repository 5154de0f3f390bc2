//! Locally generated correlation IDs.
//!
//! Order and redemption documents carry a `_customId` generated by this
//! backend in addition to the key the document store assigns. The custom ID
//! survives exports and store migrations, where store-assigned keys do not.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A locally generated correlation ID, distinct from the store-assigned key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomId(String);

impl CustomId {
    /// Generate a fresh correlation ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `CustomId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CustomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CustomId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
