//! Property client logic, independent of any rendering layer.
//!
//! Each page keeps its state at a path in a [`StateStore`]:
//!
//! - `list/state`: [`ListState`], the fetched list with filter and pagination
//! - `detail/state`: [`DetailState`]
//! - `form/state`: [`FormState`], the inputs and per-field errors
//! - `app/route`: [`AppRoute`]
//!
//! A renderer subscribes to the paths it draws and calls the
//! [`PropertyBff`] actions on user input.

pub mod api;
pub mod filter;
pub mod form;
pub mod handlers;
pub mod paginate;
pub mod state;
pub mod store;

#[cfg(test)]
mod testing;

use std::sync::Arc;

pub use api::PropertyApi;
pub use filter::{FilterField, ListFilter};
pub use form::{FieldErrors, FormField, FormFields};
pub use paginate::{DEFAULT_PAGE_SIZE, PAGE_SIZES, PageLink, page_window, paginate};
pub use state::{AppRoute, DetailState, FormMode, FormState, ListState, ListView, Phase, Route};
pub use store::{StateStore, StateValue, SubscriptionId};

use handlers::{app_handlers, detail_handlers, form_handlers, list_handlers};

/// Entry point for a renderer: the state store plus every page action.
pub struct PropertyBff {
    store: Arc<StateStore>,
    api: Arc<dyn PropertyApi>,
}

impl PropertyBff {
    pub fn new(api: Arc<dyn PropertyApi>) -> Self {
        Self {
            store: Arc::new(StateStore::new()),
            api,
        }
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    // ── Navigation ──

    pub async fn navigate(&self, route: Route) {
        app_handlers::handle_navigate(&self.store, self.api.as_ref(), route).await;
    }

    /// Navigate by path. Returns false for an unknown path.
    pub async fn open(&self, path: &str) -> bool {
        match Route::parse(path) {
            Some(route) => {
                self.navigate(route).await;
                true
            }
            None => false,
        }
    }

    pub fn route(&self) -> Option<Route> {
        app_handlers::current_route(&self.store)
    }

    // ── List page ──

    pub fn list(&self) -> ListState {
        self.store.get_as(ListState::PATH).unwrap_or_default()
    }

    /// Reload the list; also the retry action after a failure.
    pub async fn reload(&self) {
        list_handlers::handle_load(&self.store, self.api.as_ref()).await;
    }

    pub fn set_filter(&self, field: FilterField, value: &str) {
        list_handlers::handle_set_filter(&self.store, field, value);
    }

    pub fn set_page_size(&self, page_size: usize) {
        list_handlers::handle_set_page_size(&self.store, page_size);
    }

    pub fn goto_page(&self, page: usize) {
        list_handlers::handle_goto_page(&self.store, page);
    }

    pub fn next_page(&self) {
        list_handlers::handle_next_page(&self.store);
    }

    pub fn prev_page(&self) {
        list_handlers::handle_prev_page(&self.store);
    }

    pub async fn delete_listed(&self, id: &str) {
        list_handlers::handle_delete(&self.store, self.api.as_ref(), id).await;
    }

    // ── Detail page ──

    pub fn detail(&self) -> Option<DetailState> {
        self.store.get_as(DetailState::PATH)
    }

    pub async fn delete_shown(&self) {
        detail_handlers::handle_delete(&self.store, self.api.as_ref()).await;
    }

    // ── Form page ──

    pub fn form(&self) -> Option<FormState> {
        self.store.get_as(FormState::PATH)
    }

    pub fn edit_field(&self, field: FormField, value: &str) {
        form_handlers::handle_edit_field(&self.store, field, value);
    }

    pub async fn submit(&self) {
        form_handlers::handle_submit(&self.store, self.api.as_ref()).await;
    }
}
