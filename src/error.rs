use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use thiserror::Error;

use crate::news::ScrapeError;
use crate::weather::ExternalServiceError;

/// Failure of either upstream fetch, surfaced at the handler boundary.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Weather(#[from] ExternalServiceError),
    #[error(transparent)]
    Scrape(#[from] ScrapeError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        // Logging in the conversion function is somewhat dubious, but it is
        // the one place every failed request passes through.
        error!("error encountered while processing request: {}", self);
        StatusCode::BAD_GATEWAY.into_response()
    }
}
