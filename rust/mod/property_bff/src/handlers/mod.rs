//! Page handlers. Each reads the current page state, talks to the
//! backend, and writes the next state back to the store.

pub mod app_handlers;
pub mod detail_handlers;
pub mod form_handlers;
pub mod list_handlers;
