use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// A type-erased, reference-counted state value.
///
/// Clone is cheap: just an atomic increment.
#[derive(Clone)]
pub struct StateValue {
    inner: Arc<dyn Any + Send + Sync>,
}

impl StateValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Try to downcast to a concrete type reference.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateValue")
            .field("type_id", &(*self.inner).type_id())
            .finish()
    }
}

/// Handle returned by [`StateStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

struct HandlerEntry {
    id: SubscriptionId,
    pattern: String,
    handler: ChangeHandler,
}

/// Whether `path` matches a subscription `pattern`.
///
/// - Exact: `list/state`
/// - Prefix: `list/#` matches `list/state` and anything else under `list/`
/// - All: `#`
fn pattern_matches(pattern: &str, path: &str) -> bool {
    if pattern == "#" {
        return true;
    }
    match pattern.strip_suffix("/#") {
        Some(prefix) => path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
        None => pattern == path,
    }
}

/// Path-keyed state store the rendering layer reads and subscribes to.
///
/// - `set(path, value)` stores a value and notifies matching subscribers.
/// - `get(path)` reads the current value (Arc clone).
/// - `subscribe(pattern, handler)` registers a change handler.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    handlers: RwLock<Vec<HandlerEntry>>,
    next_id: AtomicU64,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            handlers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Set a typed value at `path` and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        let value = StateValue::new(value);
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), value.clone());

        // Handlers run outside the lock so they may read the store.
        let matching: Vec<ChangeHandler> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| pattern_matches(&e.pattern, path))
            .map(|e| Arc::clone(&e.handler))
            .collect();
        for handler in matching {
            handler(path, &value);
        }
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Typed read: the value at `path` if present and of type `T`.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.downcast_ref::<T>().cloned())
    }

    /// Remove the value at `path`. Does not notify subscribers.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    /// All stored paths, ordered.
    pub fn paths(&self) -> Vec<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Subscribe to changes on paths matching `pattern`.
    ///
    /// The handler is called synchronously from `set`.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(HandlerEntry {
                id,
                pattern: pattern.to_string(),
                handler: Arc::new(handler),
            });
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|e| e.id != id);
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
