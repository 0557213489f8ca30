//! Guard registry: the provided [`Resolver`] implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::errors::{GuardError, Result};
use crate::traits::{Guard, Resolver};
use crate::types::GuardToken;

/// Token-to-guard registry
///
/// Registrations may change at runtime; every resolution reads current
/// state, so composites built over tokens pick up re-registered guards on
/// their next evaluation. Re-registering a token replaces the previous
/// guard. Clones share the same underlying registrations.
pub struct GuardRegistry<C> {
    guards: Arc<RwLock<HashMap<GuardToken, Arc<dyn Guard<C>>>>>,
}

impl<C> GuardRegistry<C> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            guards: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a guard under a token, returning any guard it replaced
    pub fn register(
        &self,
        token: impl Into<GuardToken>,
        guard: Arc<dyn Guard<C>>,
    ) -> Option<Arc<dyn Guard<C>>> {
        let token = token.into();
        tracing::debug!(token = %token, "registering guard");
        self.guards.write().unwrap().insert(token, guard)
    }

    /// Remove a registration, returning the guard if one was present
    pub fn deregister(&self, token: impl Into<GuardToken>) -> Option<Arc<dyn Guard<C>>> {
        let token = token.into();
        tracing::debug!(token = %token, "deregistering guard");
        self.guards.write().unwrap().remove(&token)
    }

    /// Whether a guard is currently registered under the token
    pub fn contains(&self, token: impl Into<GuardToken>) -> bool {
        self.guards.read().unwrap().contains_key(&token.into())
    }
}

impl<C> Default for GuardRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for GuardRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            guards: Arc::clone(&self.guards),
        }
    }
}

impl<C> Resolver<C> for GuardRegistry<C> {
    fn resolve(&self, token: &GuardToken) -> Result<Arc<dyn Guard<C>>> {
        self.guards
            .read()
            .unwrap()
            .get(token)
            .map(Arc::clone)
            .ok_or_else(|| GuardError::Unresolved(token.clone()))
    }
}
