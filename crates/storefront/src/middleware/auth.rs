//! Authentication extractors.
//!
//! Sign-in itself happens at the hosted identity provider. The storefront
//! only remembers the profile it was handed, in the session.

use axum::{extract::FromRequestParts, http::request::Parts};
use stark_core::UserProfile;
use tower_sessions::Session;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::models::session_keys;

/// Extractor that requires a signed-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireUser(user): RequireUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.display_name())
/// }
/// ```
pub struct RequireUser(pub UserProfile);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let OptionalUser(user) = OptionalUser::from_request_parts(parts, state).await?;
        user.map(Self)
            .ok_or_else(|| AppError::Unauthorized("sign in required".to_string()))
    }
}

/// Extractor that optionally gets the signed-in user.
///
/// Unlike `RequireUser`, this does not reject the request if nobody is signed in.
pub struct OptionalUser(pub Option<UserProfile>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session.get::<UserProfile>(session_keys::CURRENT_USER).await?,
            None => None,
        };

        Ok(Self(user))
    }
}

/// Helper to set the signed-in user in the session.
///
/// The session id is cycled to prevent fixation.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &UserProfile,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await?;
    set_sentry_user(&user.id, user.primary_email.as_deref());
    Ok(())
}

/// Helper to clear the signed-in user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<UserProfile>(session_keys::CURRENT_USER)
        .await?;
    clear_sentry_user();
    Ok(())
}
