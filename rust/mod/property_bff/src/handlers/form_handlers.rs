//! Form page handlers.

use estate_client::ApiError;
use property::model::{NewProperty, PropertyPatch};
use tracing::{info, warn};

use crate::api::PropertyApi;
use crate::form::{FormField, FormFields, merge_server_errors, validate_form};
use crate::handlers::app_handlers;
use crate::state::{FormMode, FormState, LOAD_FORM_FAILED, Route, SAVE_FAILED, SAVE_INVALID};
use crate::store::StateStore;

enum Submission {
    Create(NewProperty),
    Update(String, PropertyPatch),
}

pub fn handle_open_create(store: &StateStore) {
    store.set(FormState::PATH, FormState::create());
}

/// Handle `form/open_edit`: fetch the record and prefill the inputs.
pub async fn handle_open_edit(store: &StateStore, api: &dyn PropertyApi, id: &str) {
    let mut state = FormState::edit(id);
    store.set(FormState::PATH, state.clone());

    match api.get(id).await {
        Ok(property) => state.fields = FormFields::from_property(&property),
        Err(e) => {
            warn!(id, "form load failed: {}", e);
            state.error = Some(LOAD_FORM_FAILED.into());
        }
    }
    state.loading = false;
    store.set(FormState::PATH, state);
}

/// Handle `form/edit`: update one input and clear its error.
pub fn handle_edit_field(store: &StateStore, field: FormField, value: &str) {
    let Some(mut state) = store.get_as::<FormState>(FormState::PATH) else {
        return;
    };
    state.fields.set(field, value);
    state.errors.remove(field.key());
    store.set(FormState::PATH, state);
}

/// Handle `form/submit`.
///
/// Local validation runs first and blocks the request. Server validation
/// details are merged into the field errors; success returns to the list.
pub async fn handle_submit(store: &StateStore, api: &dyn PropertyApi) {
    let Some(mut state) = store.get_as::<FormState>(FormState::PATH) else {
        return;
    };
    if state.busy || state.loading {
        return;
    }

    let submission = match &state.mode {
        FormMode::Create => validate_form(&state.fields).map(Submission::Create),
        FormMode::Edit(id) => state
            .fields
            .to_patch()
            .map(|patch| Submission::Update(id.clone(), patch)),
    };
    let submission = match submission {
        Ok(submission) => submission,
        Err(errors) => {
            state.errors = errors;
            store.set(FormState::PATH, state);
            return;
        }
    };

    state.busy = true;
    state.errors.clear();
    state.error = None;
    store.set(FormState::PATH, state.clone());

    let result = match &submission {
        Submission::Create(payload) => api.create(payload).await,
        Submission::Update(id, patch) => api.update(id, patch).await,
    };

    match result {
        Ok(saved) => {
            info!(id = %saved.id, "property saved");
            app_handlers::handle_navigate(store, api, Route::List).await;
        }
        Err(e) => {
            warn!("save failed: {}", e);
            state.busy = false;
            match e {
                ApiError::Validation { details } => {
                    merge_server_errors(&mut state.errors, &details);
                    state.error = Some(SAVE_INVALID.into());
                }
                _ => state.error = Some(SAVE_FAILED.into()),
            }
            store.set(FormState::PATH, state);
        }
    }
}
