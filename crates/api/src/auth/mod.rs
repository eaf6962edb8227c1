//! Identity resolution.
//!
//! Requests carry an opaque bearer token. An [`AuthVerifier`] turns it into
//! the id of the user whose rows the request may touch. The production
//! implementation is [`jwt::JwtVerifier`]; the verifier is injected through
//! [`AppState`](crate::state::AppState) so tests can substitute their own.

use taskmitra_core::types::DbId;

pub mod jwt;

/// The presented token could not be resolved to a user.
#[derive(Debug, thiserror::Error)]
#[error("Invalid or expired token")]
pub struct InvalidToken;

/// Resolve a bearer token to the authenticated user's id.
pub trait AuthVerifier: Send + Sync + 'static {
    fn verify(&self, token: &str) -> Result<DbId, InvalidToken>;
}
