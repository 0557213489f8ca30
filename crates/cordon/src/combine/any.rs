//! Logical-OR composite guard.

use std::fmt;
use std::sync::Arc;

use crate::combine::{Composite, Reduce};
use crate::errors::Result;
use crate::traits::{Guard, Resolver};
use crate::types::{CombineOptions, GuardRef, Outcome};

/// Composite guard allowing a request when at least one member allows it
///
/// The mirror of [`AllGuard`](crate::AllGuard): same reference
/// resolution, same [`CombineOptions`], but one allowing member settles
/// the composite as allowed. A member failure still counts as a false
/// verdict by default, so a later allowing member can outvote it. With
/// no members the composite denies.
pub struct AnyGuard<C> {
    inner: Composite<C>,
}

impl<C> AnyGuard<C> {
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

impl<C: Sync> Guard<C> for AnyGuard<C> {
    fn evaluate<'a>(&'a self, ctx: &'a C) -> Result<Outcome<'a>> {
        Ok(Outcome::deferred(self.inner.evaluate(ctx, Reduce::Any)))
    }
}

impl<C> fmt::Debug for AnyGuard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyGuard")
            .field("refs", &self.inner.refs)
            .field("options", &self.inner.options)
            .finish()
    }
}
