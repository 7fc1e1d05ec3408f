//! Application state for the API server.

use std::sync::Arc;

use crate::api::auth::Authenticator;
use crate::db::HabitStore;

/// Shared application state.
///
/// Generic over the store and authenticator so tests can inject
/// in-memory stores and canned authenticators. Dependencies are injected
/// via the constructor, not created internally.
pub struct AppState<S: HabitStore, A: Authenticator> {
    store: Arc<S>,
    authenticator: Arc<A>,
}

// Manual Clone impl - only the Arcs need to be cloneable, not S or A.
impl<S: HabitStore, A: Authenticator> Clone for AppState<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

impl<S: HabitStore, A: Authenticator> AppState<S, A> {
    /// Create a new AppState with the given store and authenticator.
    pub fn new(store: S, authenticator: A) -> Self {
        Self {
            store: Arc::new(store),
            authenticator: Arc::new(authenticator),
        }
    }

    /// Get a reference to the habit store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the authenticator.
    pub fn authenticator(&self) -> &A {
        &self.authenticator
    }
}
