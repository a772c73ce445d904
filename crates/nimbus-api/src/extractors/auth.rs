//! `AuthUser` extractor: resolves the bearer token to a session and
//! injects the request context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use nimbus_core::error::AppError;
use nimbus_database::repositories::SessionStore;
use nimbus_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Resolve the bearer token in `headers` to a live session.
///
/// Missing or malformed headers, unknown tokens, and sessions past
/// their `expires_at` all fail with `Unauthorized`.
async fn authenticate(
    headers: &HeaderMap,
    sessions: &dyn SessionStore,
) -> Result<RequestContext, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

    let session = sessions
        .find_by_token(token)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid session token"))?;

    if session.is_expired() {
        return Err(AppError::unauthorized("Session expired"));
    }

    Ok(RequestContext::new(session.user_id))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let context = authenticate(&parts.headers, state.sessions.as_ref()).await?;
        Ok(AuthUser(context))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::http::HeaderValue;
    use chrono::{Duration, Utc};
    use nimbus_core::error::ErrorKind;
    use nimbus_core::AppResult;
    use nimbus_entity::session::Session;
    use uuid::Uuid;

    use super::*;

    #[derive(Debug, Default)]
    struct MemorySessions {
        sessions: Mutex<HashMap<String, Session>>,
    }

    impl MemorySessions {
        fn insert(&self, session: Session) {
            self.sessions
                .lock()
                .unwrap()
                .insert(session.token.clone(), session);
        }
    }

    #[async_trait]
    impl SessionStore for MemorySessions {
        async fn find_by_token(&self, token: &str) -> AppResult<Option<Session>> {
            Ok(self.sessions.lock().unwrap().get(token).cloned())
        }
    }

    fn session(token: &str, expires_in: Duration) -> Session {
        Session {
            token: token.to_string(),
            user_id: Uuid::new_v4(),
            expires_at: Utc::now() + expires_in,
            created_at: Utc::now(),
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn live_session_resolves_to_its_user() {
        let store = MemorySessions::default();
        let live = session("tok-live", Duration::hours(1));
        let user_id = live.user_id;
        store.insert(live);

        let ctx = authenticate(&bearer("tok-live"), &store).await.unwrap();
        assert_eq!(ctx.user_id, user_id);
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let store = MemorySessions::default();
        let err = authenticate(&HeaderMap::new(), &store).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn non_bearer_header_is_unauthorized() {
        let store = MemorySessions::default();
        store.insert(session("tok", Duration::hours(1)));

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        let err = authenticate(&headers, &store).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        let store = MemorySessions::default();
        let err = authenticate(&bearer("tok-missing"), &store)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn expired_session_is_unauthorized() {
        let store = MemorySessions::default();
        store.insert(session("tok-stale", Duration::hours(-1)));

        let err = authenticate(&bearer("tok-stale"), &store).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
