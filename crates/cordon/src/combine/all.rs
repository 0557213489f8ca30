//! Logical-AND composite guard.

use std::fmt;
use std::sync::Arc;

use crate::combine::{Composite, Reduce};
use crate::errors::Result;
use crate::traits::{Guard, Resolver};
use crate::types::{CombineOptions, GuardRef, Outcome};

/// Composite guard allowing a request only when every member allows it
///
/// Members are referenced by token or instance and resolved on every
/// evaluation. By default members evaluate concurrently and a member
/// failure counts as a denial; [`CombineOptions`] selects the sequential
/// and fail-fast variants. With no members the composite allows
/// vacuously, so an empty member list behaves like no guard at all.
pub struct AllGuard<C> {
    inner: Composite<C>,
}

impl<C> AllGuard<C> {
    /// Composite over `refs` with default options
    pub fn new(
        resolver: Arc<dyn Resolver<C>>,
        refs: impl IntoIterator<Item = GuardRef<C>>,
    ) -> Self {
        Self::with_options(resolver, refs, CombineOptions::default())
    }

    /// Composite over `refs` with explicit options
    pub fn with_options(
        resolver: Arc<dyn Resolver<C>>,
        refs: impl IntoIterator<Item = GuardRef<C>>,
        options: CombineOptions,
    ) -> Self {
        Self {
            inner: Composite::new(resolver, refs, options),
        }
    }

    /// Options this composite evaluates under
    pub fn options(&self) -> CombineOptions {
        self.inner.options
    }
}

impl<C: Sync> Guard<C> for AllGuard<C> {
    fn evaluate<'a>(&'a self, ctx: &'a C) -> Result<Outcome<'a>> {
        Ok(Outcome::deferred(self.inner.evaluate(ctx, Reduce::All)))
    }
}

impl<C> fmt::Debug for AllGuard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllGuard")
            .field("refs", &self.inner.refs)
            .field("options", &self.inner.options)
            .finish()
    }
}
