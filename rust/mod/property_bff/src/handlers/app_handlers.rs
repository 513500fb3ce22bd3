//! Navigation.

use crate::api::PropertyApi;
use crate::handlers::{detail_handlers, form_handlers, list_handlers};
use crate::state::{AppRoute, Route};
use crate::store::StateStore;

/// Handle `app/navigate`: record the route, then load the target page.
pub async fn handle_navigate(store: &StateStore, api: &dyn PropertyApi, route: Route) {
    store.set(AppRoute::PATH, AppRoute(route.path()));
    match route {
        Route::List => list_handlers::handle_load(store, api).await,
        Route::Detail(id) => detail_handlers::handle_load(store, api, &id).await,
        Route::New => form_handlers::handle_open_create(store),
        Route::Edit(id) => form_handlers::handle_open_edit(store, api, &id).await,
    }
}

pub fn current_route(store: &StateStore) -> Option<Route> {
    store
        .get_as::<AppRoute>(AppRoute::PATH)
        .and_then(|r| Route::parse(&r.0))
}
