use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::{
    AppState,
    error::{AppError, AppResult},
};

/// Identity attached to an authenticated request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
}

/// Checks a bearer token. Swap the implementation to plug real verification
/// in without touching the routes.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> AppResult<Principal>;
}

/// Accepts every non-empty token.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAnyToken;

impl TokenVerifier for AcceptAnyToken {
    fn verify(&self, token: &str) -> AppResult<Principal> {
        Ok(Principal { subject: token.to_string() })
    }
}

fn missing_token() -> AppError {
    AppError::Unauthorized("Token d'authentification requis".to_string())
}

/// Token of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

pub async fn require_token(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let token = bearer_token(req.headers()).ok_or_else(missing_token)?;
    let principal = state.verifier.verify(token)?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}
