use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use rand::seq::SliceRandom;
use serde::Serialize;

use wayfare_core::catalog::{Bus, Driver, Flight, Train};
use wayfare_core::search::{BusSearchRequest, FlightSearchQuery, TrainSearchQuery};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search-trains", get(search_trains))
        .route("/api/buses/search", post(search_buses))
        .route("/api/flights", get(search_flights))
        .route("/api/driver/{type}", get(driver_by_type))
}

async fn search_trains(
    State(state): State<AppState>,
    Query(query): Query<TrainSearchQuery>,
) -> Result<Json<Vec<Train>>, AppError> {
    let trains = state
        .catalog
        .search_trains(&query)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(trains))
}

async fn search_buses(
    State(state): State<AppState>,
    Json(req): Json<BusSearchRequest>,
) -> Result<Json<Vec<Bus>>, AppError> {
    let buses = state
        .catalog
        .search_buses(&req.from, &req.to)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(buses))
}

/// Flight results echo the traveller's requested date back on every record.
#[derive(Debug, Serialize)]
struct FlightResult {
    #[serde(flatten)]
    flight: Flight,
    #[serde(rename = "userDate", skip_serializing_if = "Option::is_none")]
    user_date: Option<String>,
}

async fn search_flights(
    State(state): State<AppState>,
    Query(query): Query<FlightSearchQuery>,
) -> Result<Json<Vec<FlightResult>>, AppError> {
    let flights = state
        .catalog
        .search_flights(&query.from, &query.to)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let results = flights
        .into_iter()
        .map(|flight| FlightResult {
            flight,
            user_date: query.user_date.clone(),
        })
        .collect();
    Ok(Json(results))
}

async fn driver_by_type(
    State(state): State<AppState>,
    Path(cab_type): Path<String>,
) -> Result<Json<Driver>, AppError> {
    let cab_type = cab_type.to_lowercase();
    let drivers = state
        .catalog
        .drivers_by_type(&cab_type)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    // One driver is assigned at random per request.
    let driver = drivers
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or_else(|| {
            AppError::NotFoundError("No drivers found for this cab type".to_string())
        })?;
    Ok(Json(driver))
}
