pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::pages::handlers as pages;
use crate::render::handlers as render;
use crate::state::AppState;
use crate::wizard::handlers as wizard;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // HTML surface
        .route("/", get(pages::handle_index))
        .route(
            "/letters/:id",
            get(pages::handle_page).post(pages::handle_page_action),
        )
        .route("/letters/:id/export", get(render::handle_export))
        // Wizard API
        .route("/api/v1/sessions", post(wizard::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(wizard::handle_get_session).delete(wizard::handle_delete_session),
        )
        .route("/api/v1/sessions/:id/fields", patch(wizard::handle_edit_field))
        .route("/api/v1/sessions/:id/next", post(wizard::handle_next))
        .route("/api/v1/sessions/:id/previous", post(wizard::handle_previous))
        .route("/api/v1/sessions/:id/submit", post(wizard::handle_submit))
        .route("/api/v1/sessions/:id/close", post(wizard::handle_close_result))
        .route(
            "/api/v1/sessions/:id/toggle-view",
            post(wizard::handle_toggle_view),
        )
        .route(
            "/api/v1/sessions/:id/new-letter",
            post(wizard::handle_new_letter),
        )
        // Result API
        .route("/api/v1/sessions/:id/letter", get(render::handle_get_letter))
        .route("/api/v1/sessions/:id/export", get(render::handle_export))
        .with_state(state)
}
