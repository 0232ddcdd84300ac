//! Optional HTTP Basic auth with per-user roles.
//!
//! With no users configured every request is treated as [`Role::Admin`].

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use fir_core::store::FirStore;
use serde::Deserialize;
use strum::Display;

use crate::{AppState, error::ApiError};

// ─── Configuration ───────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  /// Read-only; evidence is withheld.
  Citizen,
  Police,
  Admin,
}

/// One configured account.
#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub role:          Role,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
  #[serde(default)]
  pub users: Vec<UserConfig>,
}

impl AuthConfig {
  pub fn is_enabled(&self) -> bool { !self.users.is_empty() }
}

// ─── Caller ──────────────────────────────────────────────────────────────────

/// The authenticated role behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
  pub role: Role,
}

impl Caller {
  /// Filing and verification are reserved for officers.
  pub fn require_officer(&self) -> Result<(), ApiError> {
    match self.role {
      Role::Police | Role::Admin => Ok(()),
      Role::Citizen => Err(ApiError::Forbidden(format!(
        "role '{}' may not modify records",
        self.role
      ))),
    }
  }

  pub fn sees_evidence(&self) -> bool { self.role != Role::Citizen }
}

/// Check Basic credentials in `headers` against `config`.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<Caller, ApiError> {
  if !config.is_enabled() {
    return Ok(Caller { role: Role::Admin });
  }

  let header_val = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;

  let user = config
    .users
    .iter()
    .find(|u| u.username == username)
    .ok_or(ApiError::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&user.password_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| {
      tracing::debug!(username, "rejected credentials");
      ApiError::Unauthorized
    })?;

  Ok(Caller { role: user.role })
}

impl<S> FromRequestParts<AppState<S>> for Caller
where
  S: FirStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    verify_auth(&parts.headers, &state.auth)
  }
}
