use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tower_sessions::Session;
use tracing::info;

use wayfare_core::booking::{resolve_cancellation_status, PendingCancellation};
use wayfare_core::catalog::CatalogEntity;

use crate::error::AppError;
use crate::session::require_admin;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/all-trains", get(list_trains))
        .route("/admin/all-buses", get(list_buses))
        .route("/admin/all-flights", get(list_flights))
        .route("/admin/all-drivers", get(list_drivers))
        .route("/admin/add-train", post(add_train))
        .route("/admin/add-bus", post(add_bus))
        .route("/admin/add-flight", post(add_flight))
        .route("/admin/add-cab", post(add_driver))
        .route("/admin/update-train/{id}", patch(update_train))
        .route("/admin/update-bus/{id}", patch(update_bus))
        .route("/admin/update-flight/{id}", patch(update_flight))
        .route("/admin/update-cab/{id}", patch(update_driver))
        .route("/admin/delete-train/{id}", delete(delete_train))
        .route("/admin/delete-bus/{id}", delete(delete_bus))
        .route("/admin/delete-flight/{id}", delete(delete_flight))
        .route("/admin/delete-cab/{id}", delete(delete_driver))
        .route("/admin/cancellations", get(list_cancellations))
        .route("/admin/cancellations/{bookingId}", post(resolve_cancellation))
}

fn parse_id(entity: CatalogEntity, raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| {
        AppError::ValidationError(format!("Invalid {} id", entity.field_name()))
    })
}

// ============================================================================
// Listing
// ============================================================================

async fn list_all(
    state: &AppState,
    entity: CatalogEntity,
) -> Result<Json<Vec<bson::Document>>, AppError> {
    let records = state
        .catalog
        .list(entity)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(records))
}

// The train/bus/flight listings have no admin check; only the driver listing
// is protected.

async fn list_trains(State(state): State<AppState>) -> Result<Json<Vec<bson::Document>>, AppError> {
    list_all(&state, CatalogEntity::Train).await
}

async fn list_buses(State(state): State<AppState>) -> Result<Json<Vec<bson::Document>>, AppError> {
    list_all(&state, CatalogEntity::Bus).await
}

async fn list_flights(State(state): State<AppState>) -> Result<Json<Vec<bson::Document>>, AppError> {
    list_all(&state, CatalogEntity::Flight).await
}

async fn list_drivers(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<Vec<bson::Document>>, AppError> {
    require_admin(&session).await?;
    list_all(&state, CatalogEntity::Driver).await
}

// ============================================================================
// Add
// ============================================================================

async fn add_record(
    session: &Session,
    state: &AppState,
    entity: CatalogEntity,
    payload: Value,
) -> Result<(StatusCode, Json<Value>), AppError> {
    require_admin(session).await?;

    let record = bson::to_document(&payload).map_err(|_| {
        AppError::ValidationError(format!("Invalid {} payload", entity.field_name()))
    })?;
    let stored = state
        .catalog
        .add(entity, record)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let mut body = Map::new();
    body.insert(
        "message".to_string(),
        json!(format!("{} added successfully", entity.display_name())),
    );
    body.insert(entity.field_name().to_string(), serde_json::to_value(&stored)?);
    Ok((StatusCode::CREATED, Json(Value::Object(body))))
}

async fn add_train(
    session: Session,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    add_record(&session, &state, CatalogEntity::Train, payload).await
}

async fn add_bus(
    session: Session,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    add_record(&session, &state, CatalogEntity::Bus, payload).await
}

async fn add_flight(
    session: Session,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    add_record(&session, &state, CatalogEntity::Flight, payload).await
}

async fn add_driver(
    session: Session,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    add_record(&session, &state, CatalogEntity::Driver, payload).await
}

// ============================================================================
// Update
// ============================================================================

async fn update_record(
    session: &Session,
    state: &AppState,
    entity: CatalogEntity,
    raw_id: &str,
    patch: Value,
) -> Result<Json<Value>, AppError> {
    require_admin(session).await?;

    let id = parse_id(entity, raw_id)?;
    let patch = bson::to_document(&patch).map_err(|_| {
        AppError::ValidationError(format!("Invalid {} payload", entity.field_name()))
    })?;

    // Missing ids still report success; only the matched count would tell.
    state
        .catalog
        .update(entity, id, patch)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    info!("{} {} updated", entity.field_name(), id);
    Ok(Json(json!({
        "message": format!("{} updated successfully", entity.display_name()),
    })))
}

async fn update_train(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut patch): Json<Value>,
) -> Result<Json<Value>, AppError> {
    // The edit form round-trips nested values as JSON text, so `classes` may
    // arrive as a string.
    if let Some(raw) = patch.get("classes").and_then(Value::as_str).map(str::to_owned) {
        let classes: Value = serde_json::from_str(&raw).map_err(|_| {
            AppError::ValidationError("Invalid JSON format in classes field".to_string())
        })?;
        patch["classes"] = classes;
    }
    update_record(&session, &state, CatalogEntity::Train, &id, patch).await
}

async fn update_bus(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<Json<Value>, AppError> {
    update_record(&session, &state, CatalogEntity::Bus, &id, patch).await
}

async fn update_flight(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<Json<Value>, AppError> {
    update_record(&session, &state, CatalogEntity::Flight, &id, patch).await
}

async fn update_driver(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<Json<Value>, AppError> {
    update_record(&session, &state, CatalogEntity::Driver, &id, patch).await
}

// ============================================================================
// Delete
// ============================================================================

async fn delete_record(
    session: &Session,
    state: &AppState,
    entity: CatalogEntity,
    raw_id: &str,
) -> Result<Json<Value>, AppError> {
    require_admin(session).await?;

    let id = parse_id(entity, raw_id)?;
    // Unconditional removal; deleting an unknown id still reports success.
    state
        .catalog
        .delete(entity, id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    info!("{} {} deleted", entity.field_name(), id);
    Ok(Json(json!({
        "message": format!("{} deleted successfully", entity.display_name()),
    })))
}

async fn delete_train(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    delete_record(&session, &state, CatalogEntity::Train, &id).await
}

async fn delete_bus(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    delete_record(&session, &state, CatalogEntity::Bus, &id).await
}

async fn delete_flight(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    delete_record(&session, &state, CatalogEntity::Flight, &id).await
}

async fn delete_driver(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    delete_record(&session, &state, CatalogEntity::Driver, &id).await
}

// ============================================================================
// Cancellation queue
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ResolveCancellationRequest {
    pub action: String,
}

async fn list_cancellations(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<Vec<PendingCancellation>>, AppError> {
    require_admin(&session).await?;
    let pending = state
        .users
        .pending_cancellations()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(pending))
}

async fn resolve_cancellation(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(req): Json<ResolveCancellationRequest>,
) -> Result<Json<Value>, AppError> {
    require_admin(&session).await?;

    let booking_id = ObjectId::parse_str(&raw_id)
        .map_err(|_| AppError::ValidationError("Invalid booking id".to_string()))?;
    let status = resolve_cancellation_status(&req.action);

    let booking = state
        .users
        .resolve_cancellation(booking_id, status)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Booking not found".to_string()))?;

    info!("cancellation {} -> {}", booking_id, status.as_str());
    Ok(Json(json!({
        "message": "Cancellation updated",
        "booking": booking,
    })))
}
