//! Functionality for using `urlform` with `axum`.
//!
//! Enable with the `axum` feature. Both extractors read a [`Config`] from the
//! request extensions when one was added, and fall back to the default
//! otherwise.
//!
//! ```ignore
//! use axum::{routing::get, Router};
//! use urlform::axum::FormQuery;
//! use urlform::Form;
//!
//! #[derive(Debug, Default, Form)]
//! struct Search {
//!     pub q: String,
//!     pub page: Option<u32>,
//! }
//!
//! async fn search(FormQuery(params): FormQuery<Search>) -> String {
//!     format!("{} on page {}", params.q, params.page.unwrap_or(1))
//! }
//!
//! let app: Router = Router::new().route("/search", get(search));
//! ```

use axum_framework as axum;

use axum::{
    BoxError, Error,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::Config;
use crate::reflect::Reflect;

/// Extracts a struct from the request's query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormQuery<T>(pub T);

/// Extracts a struct from an `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormBody<T>(pub T);

impl<T, S> FromRequestParts<S> for FormQuery<T>
where
    T: Reflect + Default + Send,
    S: Send + Sync,
{
    type Rejection = FormRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let config = parts
            .extensions
            .get::<Config>()
            .copied()
            .unwrap_or_default();
        let query = parts.uri.query().unwrap_or_default();
        let value = config
            .decode_str(query)
            .map_err(FormRejection::new)?;
        Ok(FormQuery(value))
    }
}

impl<T, S> FromRequest<S> for FormBody<T>
where
    T: Reflect + Default + Send,
    S: Send + Sync,
{
    type Rejection = FormRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let config = req
            .extensions()
            .get::<Config>()
            .copied()
            .unwrap_or_default();
        let body = Bytes::from_request(req, state)
            .await
            .map_err(FormRejection::new)?;
        let value = config
            .decode_bytes(&body)
            .map_err(FormRejection::new)?;
        Ok(FormBody(value))
    }
}

impl<T> std::ops::Deref for FormQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::Deref for FormBody<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection for both extractors: the request could not be read or decoded.
#[derive(Debug)]
pub struct FormRejection {
    error: Error,
}

impl std::fmt::Display for FormRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to decode form data. Error: {}", self.error)
    }
}

impl std::error::Error for FormRejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl FormRejection {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        FormRejection {
            error: Error::new(error),
        }
    }
}

impl IntoResponse for FormRejection {
    fn into_response(self) -> Response {
        debug!(error = %self.error, "rejecting form request");
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}
