use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use bson::oid::ObjectId;
use bson::Document;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_sessions::Session;
use tracing::info;

use wayfare_core::booking::{Booking, BookingKind};

use crate::error::AppError;
use crate::session::require_customer;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveBookingRequest {
    #[serde(rename = "type")]
    pub kind: BookingKind,
    #[serde(default)]
    pub details: Document,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationRequest {
    pub booking_id: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/booking-history", get(booking_history))
        .route("/save-booking-history", post(save_booking_history))
        .route("/request-cancellation", post(request_cancellation))
}

async fn booking_history(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let email = require_customer(&session).await?;
    let history = state
        .users
        .booking_history(&email)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(json!({ "history": history })))
}

async fn save_booking_history(
    session: Session,
    State(state): State<AppState>,
    Json(req): Json<SaveBookingRequest>,
) -> Result<Json<Value>, AppError> {
    let email = require_customer(&session).await?;

    let booking = Booking::confirmed(req.kind, req.details);
    state
        .users
        .push_booking(&email, &booking)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    info!("booking saved for {}", email);
    Ok(Json(json!({ "message": "Booking saved to history" })))
}

async fn request_cancellation(
    session: Session,
    State(state): State<AppState>,
    Json(req): Json<CancellationRequest>,
) -> Result<Json<Value>, AppError> {
    let email = require_customer(&session).await?;

    let raw_id = req
        .booking_id
        .ok_or_else(|| AppError::ValidationError("Booking ID required".to_string()))?;
    let booking_id = ObjectId::parse_str(&raw_id)
        .map_err(|_| AppError::ValidationError("Invalid booking id".to_string()))?;

    let booking = state
        .users
        .request_cancellation(&email, booking_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Booking not found".to_string()))?;

    info!("cancellation requested: {}", booking_id);
    Ok(Json(json!({
        "success": true,
        "message": "Cancellation requested",
        "booking": booking,
    })))
}
