//! Route definitions for the echo responder.

use axum::routing::any;
use axum::Router;

use crate::handlers::echo;
use crate::state::AppState;

/// Script path that clients of the original PHP fixture point at.
pub const LEGACY_SCRIPT_PATH: &str = "/jsonquery-server-sample.php";

/// Echo routes, every HTTP method accepted.
///
/// ```text
/// ANY /                               -> echo
/// ANY /jsonquery-server-sample.php    -> echo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", any(echo::echo))
        .route(LEGACY_SCRIPT_PATH, any(echo::echo))
}
