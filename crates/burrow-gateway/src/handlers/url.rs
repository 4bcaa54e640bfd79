use crate::error::{AppError, Result};
use crate::model::{ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::ShortCode;
use tracing::info;

pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        AppError::BadRequest(format!(
            "invalid JSON or missing long_url field: {}",
            rejection.body_text()
        ))
    })?;

    let link = state.shortener().shorten(&request.long_url).await?;
    info!(code = %link.code, short_url = %link.short_url, "created short url");

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: link.short_url,
        }),
    ))
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let code = ShortCode::new(short_code);
    let long_url = state.shortener().resolve(&code).await?;

    let location = HeaderValue::try_from(long_url).map_err(|e| {
        AppError::Internal(format!("stored url for '{code}' is not a valid header: {e}"))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
