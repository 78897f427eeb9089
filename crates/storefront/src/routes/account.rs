//! Sign-in state and account route handlers.
//!
//! The hosted identity provider signs the user in on the client and hands the
//! resulting profile to `POST /auth/session`.

use axum::{Json, extract::State};
use serde::Serialize;
use stark_core::{AuthState, UserProfile};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{OptionalUser, RequireUser, clear_current_user, load_orders, set_current_user};
use crate::state::AppState;

/// Account overview data.
#[derive(Debug, Serialize)]
pub struct AccountView {
    pub profile: UserProfile,
    pub display_name: String,
    pub order_count: usize,
}

/// Publishable keys the browser needs.
#[derive(Debug, Serialize)]
pub struct PublicConfigView {
    pub identity_publishable_key: String,
    pub payments_publishable_key: Option<String>,
}

/// Current sign-in state.
#[instrument(skip_all)]
pub async fn session_state(OptionalUser(user): OptionalUser) -> Json<AuthState> {
    Json(AuthState::from(user))
}

/// Accept the profile of a user the identity provider just signed in.
#[instrument(skip_all, fields(user_id = %profile.id))]
pub async fn sign_in(session: Session, Json(profile): Json<UserProfile>) -> Result<Json<AuthState>> {
    if profile.id.trim().is_empty() {
        return Err(AppError::BadRequest("profile id is required".to_string()));
    }

    set_current_user(&session, &profile).await?;
    tracing::info!("User signed in");

    Ok(Json(AuthState::SignedIn(profile)))
}

/// Forget the signed-in user. Cart and orders stay with the visitor.
#[instrument(skip_all)]
pub async fn sign_out(session: Session) -> Result<Json<AuthState>> {
    clear_current_user(&session).await?;
    Ok(Json(AuthState::SignedOut))
}

/// Display the signed-in user's account.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn show(session: Session, RequireUser(user): RequireUser) -> Result<Json<AccountView>> {
    let orders = load_orders(&session).await?;

    Ok(Json(AccountView {
        display_name: user.display_name(),
        order_count: orders.order_count(),
        profile: user,
    }))
}

/// Publishable keys for client-side widgets.
#[instrument(skip_all)]
pub async fn public_config(State(state): State<AppState>) -> Json<PublicConfigView> {
    let config = state.config();
    Json(PublicConfigView {
        identity_publishable_key: config.identity_publishable_key.clone(),
        payments_publishable_key: config.payments_publishable_key.clone(),
    })
}
