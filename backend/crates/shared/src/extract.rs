//! Axum extractors shared by every HTTP-facing crate

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::extract::rejection::JsonRejection;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::app_error::AppError;
use crate::principal::Principal;
use crate::validation::Validate;

/// JSON body that has passed [`Validate`]
///
/// Malformed JSON is a plain 400; validation failures are a 400 carrying the
/// field map.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                AppError::bad_request(rejection.body_text())
                    .with_action("Send a valid JSON body with Content-Type: application/json")
            })?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

/// The access middleware inserts the [`Principal`]; a route that extracts it
/// without the middleware in front answers 401.
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))
    }
}
