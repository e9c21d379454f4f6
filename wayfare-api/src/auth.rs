use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_sessions::Session;
use tracing::info;

use wayfare_core::user::User;

use crate::error::AppError;
use crate::session::{current_user, SessionUser, SESSION_USER_KEY};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub dob: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub id: String,
    pub password: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/check-auth", get(check_auth))
        .route("/admin-login", post(admin_login))
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let existing = state
        .users
        .find_by_email(&req.email)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    if existing.is_some() {
        return Err(AppError::ValidationError("User already exists".to_string()));
    }

    let hashed = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let user = User {
        id: None,
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        gender: req.gender,
        dob: req.dob,
        password: hashed,
        booking_history: Vec::new(),
    };
    state
        .users
        .insert(&user)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

async fn login(
    session: Session,
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let user = state
        .users
        .find_by_email(&req.email)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::ValidationError("User not found".to_string()))?;

    let password_ok = bcrypt::verify(&req.password, &user.password)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    if !password_ok {
        return Err(AppError::ValidationError("Invalid credentials".to_string()));
    }

    let session_user = SessionUser::Customer {
        email: user.email.clone(),
        first_name: user.first_name.clone(),
    };
    session
        .insert(SESSION_USER_KEY, &session_user)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    info!("login: {}", user.email);
    Ok(Json(json!({
        "message": format!("Welcome {}!", user.first_name),
        "user": session_user,
    })))
}

async fn logout(session: Session) -> Result<Json<Value>, AppError> {
    session
        .flush()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(json!({ "message": "Logged out successfully" })))
}

async fn check_auth(session: Session) -> Result<Json<Value>, AppError> {
    match current_user(&session).await? {
        Some(user) => Ok(Json(json!({ "isLoggedIn": true, "user": user }))),
        None => Ok(Json(json!({ "isLoggedIn": false }))),
    }
}

async fn admin_login(
    session: Session,
    State(state): State<AppState>,
    Json(req): Json<AdminLoginRequest>,
) -> Result<Json<Value>, AppError> {
    if req.id != state.admin.id || req.password != state.admin.password {
        return Err(AppError::AuthenticationError(
            "Invalid admin credentials".to_string(),
        ));
    }

    let session_user = SessionUser::Admin {
        id: req.id,
        name: "ADMIN".to_string(),
    };
    session
        .insert(SESSION_USER_KEY, &session_user)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    info!("admin login");
    Ok(Json(json!({
        "message": "Admin logged in successfully",
        "user": session_user,
    })))
}
