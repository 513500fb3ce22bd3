//! Detail page handlers.

use tracing::warn;

use crate::api::PropertyApi;
use crate::handlers::app_handlers;
use crate::state::{DELETE_FAILED, DetailState, NOT_FOUND, Phase, Route};
use crate::store::StateStore;

/// Handle `detail/load`. Any failure reads as "not found".
pub async fn handle_load(store: &StateStore, api: &dyn PropertyApi, id: &str) {
    let mut state = DetailState::loading(id);
    store.set(DetailState::PATH, state.clone());

    match api.get(id).await {
        Ok(property) => {
            state.property = Some(property);
            state.phase = Phase::Ready;
        }
        Err(e) => {
            warn!(id, "detail load failed: {}", e);
            state.phase = Phase::Failed;
            state.error = Some(NOT_FOUND.into());
        }
    }
    store.set(DetailState::PATH, state);
}

/// Handle `detail/delete`. Navigates back to the list on success.
pub async fn handle_delete(store: &StateStore, api: &dyn PropertyApi) {
    let Some(mut state) = store.get_as::<DetailState>(DetailState::PATH) else {
        return;
    };
    if state.property.is_none() {
        return;
    }

    match api.delete(&state.id).await {
        Ok(()) => app_handlers::handle_navigate(store, api, Route::List).await,
        Err(e) => {
            warn!(id = %state.id, "delete failed: {}", e);
            state.error = Some(DELETE_FAILED.into());
            store.set(DetailState::PATH, state);
        }
    }
}
