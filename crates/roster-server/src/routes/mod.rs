pub mod health;
pub mod sellers;

use axum::Router;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(sellers::routes())
        .merge(health::routes())
        .with_state(state)
}
