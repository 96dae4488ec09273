use super::types::{
    DetailedErrorResponse, ErrorResponse, FallbackResponse, HealthResponse, ProductImageRequest,
    StyleAnalysisRequest,
};
use crate::{
    Error,
    gateway::{Extraction, Gateway, ProductImage},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
}

pub async fn analyze_size(
    State(state): State<AppState>,
    body: Result<Json<ProductImageRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();

    let request = match product_image(body) {
        Ok(request) => request,
        Err(rejection) => return rejection,
    };

    info!(%request_id, "Size estimation requested for product: {}", request.product);

    match state.gateway.estimate(&request).await {
        Ok(Extraction::Extracted(estimate)) => {
            info!(%request_id, "Recommended size {}", estimate.recommended_size);
            (StatusCode::OK, Json(estimate)).into_response()
        }
        Ok(Extraction::Fallback { value, cause }) => {
            error!(%request_id, "Size analysis error: {}", cause);
            fallback_response("Analysis failed", cause, value)
        }
        Err(e) => error_response(request_id, e),
    }
}

pub async fn generate_try_on(
    State(state): State<AppState>,
    body: Result<Json<ProductImageRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();

    let request = match product_image(body) {
        Ok(request) => request,
        Err(rejection) => return rejection,
    };

    info!(%request_id, "Try-on requested for product: {}", request.product);

    match state.gateway.generate_try_on(&request).await {
        Ok(Extraction::Extracted(image)) => {
            info!(%request_id, "Try-on image ready ({:?})", image.mode);
            (StatusCode::OK, Json(image)).into_response()
        }
        Ok(Extraction::Fallback { value, cause }) => {
            error!(%request_id, "Try-on error: {}", cause);
            fallback_response("Try-on generation failed", cause, value)
        }
        Err(e) => error_response(request_id, e),
    }
}

pub async fn analyze_style(
    State(state): State<AppState>,
    body: Result<Json<StyleAnalysisRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();

    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection(rejection),
    };
    let payload = request.payload.unwrap_or(Value::Null);

    info!(%request_id, "Style analysis requested");

    match state.gateway.analyze_style(&payload).await {
        Ok(forwarded) => {
            let status =
                StatusCode::from_u16(forwarded.status).unwrap_or(StatusCode::BAD_GATEWAY);
            if !status.is_success() {
                warn!(%request_id, "Style analysis upstream answered {}", status);
            }
            (status, Json(forwarded.body)).into_response()
        }
        Err(e) if e.is_upstream_fault() => {
            error!(%request_id, "Style analysis error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DetailedErrorResponse {
                    error: "Style analysis failed".to_string(),
                    details: e.to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => error_response(request_id, e),
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        credential_configured: state.gateway.has_credential(),
        try_on_mode: state.gateway.try_on_mode().as_str(),
    })
}

pub async fn method_not_allowed() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method Not Allowed".to_string(),
        }),
    )
}

fn product_image(
    body: Result<Json<ProductImageRequest>, JsonRejection>,
) -> Result<ProductImage, Response> {
    let Json(body) = body.map_err(json_rejection)?;

    ProductImage::from_parts(body.image.as_deref(), body.product.as_deref()).map_err(|e| {
        warn!("Rejected request: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response()
    })
}

fn json_rejection(rejection: JsonRejection) -> Response {
    warn!("Rejected request body: {}", rejection.body_text());
    (
        rejection.status(),
        Json(ErrorResponse {
            error: format!("Invalid JSON body: {}", rejection.body_text()),
        }),
    )
        .into_response()
}

fn fallback_response<T: Serialize>(error: &str, cause: Error, value: T) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FallbackResponse {
            error: error.to_string(),
            details: cause.to_string(),
            value,
        }),
    )
        .into_response()
}

fn error_response(request_id: Uuid, e: Error) -> Response {
    let status = if e.is_client_fault() {
        warn!(%request_id, "Rejected request: {}", e);
        StatusCode::BAD_REQUEST
    } else {
        error!(%request_id, "Request failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}
