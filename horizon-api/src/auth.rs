use axum::{
    extract::State,
    Json,
    routing::post,
    Router,
};
use serde::Serialize;
use jsonwebtoken::{encode, Header, EncodingKey};
use chrono::{Utc, Duration};
use horizon_core::Actor;
use uuid::Uuid;
use crate::{state::{AppState, AuthConfig}, error::AppError, middleware::auth::Claims};

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/auth/guest", post(login_guest))
}

/// Sign a token the identity extractor will accept for `actor`
pub fn issue_token(auth: &AuthConfig, actor: &Actor) -> Result<String, AppError> {
    let claims = Claims {
        sub: actor.user_id.clone(),
        role: actor.role,
        exp: (Utc::now() + Duration::seconds(auth.expiration as i64)).timestamp() as usize,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(auth.secret.as_bytes()))
        .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))
}

async fn login_guest(State(state): State<AppState>) -> Result<Json<AuthResponse>, AppError> {
    let actor = Actor::customer(format!("guest-{}", Uuid::new_v4()));
    let token = issue_token(&state.auth, &actor)?;

    tracing::info!("Issued guest token for {}", actor.user_id);
    Ok(Json(AuthResponse { token, user_id: actor.user_id }))
}
