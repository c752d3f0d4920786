use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::User;

/// Token payload: subject identity plus issue/expiry timestamps.
/// Roles are deliberately not embedded; the guard re-resolves the user
/// on every request, so a deleted account is locked out immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    pub iat: usize,  // Issued at (as UTC timestamp)
    pub exp: usize,  // Expiration time (as UTC timestamp)
}

impl Claims {
    pub fn new(user: &User, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user.id.to_hex(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}
