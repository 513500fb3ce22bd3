//! List page handlers.

use tracing::warn;

use crate::api::PropertyApi;
use crate::filter::FilterField;
use crate::paginate::paginate;
use crate::state::{DELETE_FAILED, LOAD_LIST_FAILED, ListState, Phase};
use crate::store::StateStore;

fn current(store: &StateStore) -> ListState {
    store.get_as::<ListState>(ListState::PATH).unwrap_or_default()
}

/// Handle `list/load`. Also the retry action.
///
/// Filter, page and page size survive a reload. The page is pulled back
/// onto the last page when the list has shrunk beneath it.
pub async fn handle_load(store: &StateStore, api: &dyn PropertyApi) {
    let mut state = current(store);
    state.phase = Phase::Loading;
    state.error = None;
    store.set(ListState::PATH, state.clone());

    match api.list().await {
        Ok(properties) => {
            state.properties = properties;
            state.page = state.page.clamp(1, state.view().total_pages.max(1));
            state.phase = Phase::Ready;
        }
        Err(e) => {
            warn!("list load failed: {}", e);
            state.phase = Phase::Failed;
            state.error = Some(LOAD_LIST_FAILED.into());
        }
    }
    store.set(ListState::PATH, state);
}

/// Handle `list/filter`. Any filter change returns to page 1.
pub fn handle_set_filter(store: &StateStore, field: FilterField, value: &str) {
    let mut state = current(store);
    state.filter.set(field, value);
    state.page = 1;
    store.set(ListState::PATH, state);
}

/// Handle `list/page_size`. Returns to page 1.
pub fn handle_set_page_size(store: &StateStore, page_size: usize) {
    if page_size == 0 {
        return;
    }
    let mut state = current(store);
    state.page_size = page_size;
    state.page = 1;
    store.set(ListState::PATH, state);
}

/// Jump to `page` if it exists.
pub fn handle_goto_page(store: &StateStore, page: usize) {
    let mut state = current(store);
    if page >= 1 && page <= state.view().total_pages && page != state.page {
        state.page = page;
        store.set(ListState::PATH, state);
    }
}

pub fn handle_next_page(store: &StateStore) {
    let page = current(store).page;
    handle_goto_page(store, page + 1);
}

pub fn handle_prev_page(store: &StateStore) {
    let page = current(store).page;
    if page > 1 {
        handle_goto_page(store, page - 1);
    }
}

/// Handle `list/delete`.
///
/// On success the record is dropped locally; if it was the only one shown
/// on a page past the first, the view moves back a page.
pub async fn handle_delete(store: &StateStore, api: &dyn PropertyApi, id: &str) {
    let mut state = current(store);
    let filtered = state.filtered();
    let shown = paginate(&filtered, state.page, state.page_size).items.len();

    match api.delete(id).await {
        Ok(()) => {
            state.properties.retain(|p| p.id != id);
            if shown == 1 && state.page > 1 {
                state.page -= 1;
            }
            state.error = None;
        }
        Err(e) => {
            warn!(id, "delete failed: {}", e);
            state.error = Some(DELETE_FAILED.into());
        }
    }
    store.set(ListState::PATH, state);
}
