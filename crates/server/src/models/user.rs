//! User domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use kumquat_core::{AccountId, Email};

/// A registered user.
///
/// The password field is the stored value verbatim and serializes into the
/// login response, matching the upstream API surface. See DESIGN.md for the
/// hardening note.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique account ID.
    pub id: AccountId,
    /// The user's email address.
    pub email: Email,
    /// Stored password (plaintext).
    pub password: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
