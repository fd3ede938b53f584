//! User entity - an account identified by email

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User account.
///
/// The password hash is deliberately not part of the entity: it is handed
/// to the store at creation and fetched separately for verification, so it
/// never travels with the user through response mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with a fresh id
    pub fn new(email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            created_at: Utc::now(),
        }
    }
}
