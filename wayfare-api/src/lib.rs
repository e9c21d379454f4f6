use axum::{http::header, http::Method, Router};
use time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::Key, Expiry, MemoryStore, SessionManagerLayer};

use wayfare_store::app_config::SessionConfig;

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod error;
pub mod search;
pub mod session;
pub mod state;

pub use state::AppState;

/// Assembles the full application router: API routes, CORS, request tracing,
/// the cookie-backed session layer, and the static browser client.
///
/// `session.secret` must be at least 64 bytes; `Config::load` enforces this.
pub fn app(state: AppState, session: &SessionConfig, static_dir: &str) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_signed(Key::from(session.secret.as_bytes()))
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            session.cookie_max_age_seconds as i64,
        )));

    // The browser client sends credentialed requests, so the origin is
    // mirrored rather than wildcarded.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(auth::routes())
        .merge(search::routes())
        .merge(bookings::routes())
        .merge(admin::routes())
        .fallback_service(ServeDir::new(static_dir))
        .layer(session_layer)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
