//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An authenticated session, looked up by bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Opaque bearer token presented by the client.
    pub token: String,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Check whether the session has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn session(expires_in: Duration) -> Session {
        Session {
            token: "tok".to_string(),
            user_id: Uuid::new_v4(),
            expires_at: Utc::now() + expires_in,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn session_is_live_until_expires_at() {
        assert!(!session(Duration::hours(1)).is_expired());
        assert!(session(Duration::hours(-1)).is_expired());
        assert!(session(Duration::zero()).is_expired());
    }
}
