//! Bearer-token authentication
//!
//! `Subject` is the authenticated caller's id, extracted from the
//! `Authorization: Bearer` header and verified before any handler logic
//! runs. Handlers that require authentication take it as an explicit
//! parameter; there is no ambient "current user" state.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use common::error::AppError;
use common::fault::{TokenFault, translate_token_fault};

use crate::{AppState, models::ObjectId};

/// The authenticated user id asserted by the request's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject(pub ObjectId);

#[async_trait]
impl FromRequestParts<AppState> for Subject {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // An absent or malformed Authorization header and a bad token all
        // render the same generic 401.
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| translate_token_fault(TokenFault::Missing))?;

        let subject = state
            .jwt
            .verify(bearer.token())
            .map_err(translate_token_fault)?;

        Ok(Self(subject))
    }
}
