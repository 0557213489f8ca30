//! Guard and resolver capability traits.

use std::sync::Arc;

use crate::errors::Result;
use crate::types::{GuardToken, Outcome};

/// A single request-authorization check
///
/// `C` is the host's per-request context; guards read it but never own it.
/// Returning an error raises the failure at issue time; returning an
/// [`Outcome`] lets the guard answer immediately, defer to a future, or
/// emit on a stream.
pub trait Guard<C>: Send + Sync {
    /// Evaluate this guard against the current request context
    fn evaluate<'a>(&'a self, ctx: &'a C) -> Result<Outcome<'a>>;
}

/// Capability mapping a guard token to a live instance
///
/// Resolution happens on every evaluation, so callers always observe the
/// current registration for a token.
pub trait Resolver<C>: Send + Sync {
    /// Resolve a token to the guard currently registered under it
    fn resolve(&self, token: &GuardToken) -> Result<Arc<dyn Guard<C>>>;
}

/// Guard with a fixed verdict, for defaults and tests
pub struct FixedGuard {
    verdict: bool,
}

impl FixedGuard {
    /// Guard that allows every request
    pub fn allow() -> Self {
        Self { verdict: true }
    }

    /// Guard that denies every request
    pub fn deny() -> Self {
        Self { verdict: false }
    }
}

impl<C> Guard<C> for FixedGuard {
    fn evaluate<'a>(&'a self, _ctx: &'a C) -> Result<Outcome<'a>> {
        Ok(Outcome::Ready(self.verdict))
    }
}

/// Evaluate a single guard through to a final verdict
///
/// Issues the evaluation and settles whichever outcome shape the guard
/// produced.
pub async fn verdict<C>(guard: &dyn Guard<C>, ctx: &C) -> Result<bool> {
    guard.evaluate(ctx)?.into_verdict().await
}
