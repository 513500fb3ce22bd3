//! Page states, each stored at its own path.

use property::model::Property;

use crate::filter::ListFilter;
use crate::form::{FieldErrors, FormFields};
use crate::paginate::{DEFAULT_PAGE_SIZE, PageLink, page_window, paginate};

pub const LOAD_LIST_FAILED: &str = "Erreur lors du chargement des propriétés";
pub const DELETE_FAILED: &str = "Erreur lors de la suppression";
pub const NOT_FOUND: &str = "Propriété non trouvée";
pub const LOAD_FORM_FAILED: &str = "Erreur lors du chargement de la propriété";
pub const SAVE_FAILED: &str = "Erreur lors de la sauvegarde";
pub const SAVE_INVALID: &str = "Erreurs de validation";

/// Fetch lifecycle of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Failed,
}

/// List page: stored at `list/state`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub phase: Phase,
    /// Everything the server returned, unfiltered.
    pub properties: Vec<Property>,
    pub filter: ListFilter,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    pub error: Option<String>,
}

impl ListState {
    pub const PATH: &'static str = "list/state";

    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            properties: Vec::new(),
            filter: ListFilter::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            error: None,
        }
    }

    pub fn filtered(&self) -> Vec<Property> {
        self.filter.apply(&self.properties)
    }

    /// What the list page shows right now.
    pub fn view(&self) -> ListView {
        let filtered = self.filtered();
        let page = paginate(&filtered, self.page, self.page_size);
        ListView {
            items: page.items.to_vec(),
            matching: filtered.len(),
            total_pages: page.total_pages,
            first: page.first,
            last: page.last,
            links: page_window(self.page, page.total_pages),
        }
    }
}

/// Derived list page content.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub items: Vec<Property>,
    /// Number of properties passing the filter.
    pub matching: usize,
    pub total_pages: usize,
    pub first: usize,
    pub last: usize,
    pub links: Vec<PageLink>,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

/// Detail page: stored at `detail/state`.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub id: String,
    pub phase: Phase,
    pub property: Option<Property>,
    pub error: Option<String>,
}

impl DetailState {
    pub const PATH: &'static str = "detail/state";

    pub fn loading(id: &str) -> Self {
        Self {
            id: id.to_string(),
            phase: Phase::Loading,
            property: None,
            error: None,
        }
    }

    /// Price per m², rounded, once loaded.
    pub fn price_per_m2(&self) -> Option<f64> {
        self.property.as_ref().map(Property::price_per_m2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

/// Form page: stored at `form/state`.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub mode: FormMode,
    pub fields: FormFields,
    pub errors: FieldErrors,
    /// Edit mode: the record is still being fetched.
    pub loading: bool,
    /// A submit is in flight.
    pub busy: bool,
    pub error: Option<String>,
}

impl FormState {
    pub const PATH: &'static str = "form/state";

    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            fields: FormFields::default(),
            errors: FieldErrors::new(),
            loading: false,
            busy: false,
            error: None,
        }
    }

    pub fn edit(id: &str) -> Self {
        Self {
            mode: FormMode::Edit(id.to_string()),
            loading: true,
            ..Self::create()
        }
    }
}

/// Client-side route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(String),
    New,
    Edit(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail(id) => format!("/property/{id}"),
            Route::New => "/property/new".to_string(),
            Route::Edit(id) => format!("/property/edit/{id}"),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let rest = match path {
            "/" | "" => return Some(Route::List),
            "/property/new" => return Some(Route::New),
            other => other.strip_prefix("/property/")?,
        };
        match rest.strip_prefix("edit/") {
            Some(id) if !id.is_empty() && !id.contains('/') => Some(Route::Edit(id.to_string())),
            Some(_) => None,
            None if !rest.is_empty() && !rest.contains('/') => Some(Route::Detail(rest.to_string())),
            None => None,
        }
    }
}

/// Current route: stored at `app/route`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRoute(pub String);

impl AppRoute {
    pub const PATH: &'static str = "app/route";
}
