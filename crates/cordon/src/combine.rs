//! Composite guards reducing ordered members to a single verdict.

use std::sync::Arc;

use futures::future;

use crate::errors::Result;
use crate::traits::{Guard, Resolver};
use crate::types::{CombineOptions, GuardRef, Outcome};

mod all;
mod any;

pub use all::AllGuard;
pub use any::AnyGuard;

/// How a composite reduces member verdicts
#[derive(Debug, Clone, Copy)]
enum Reduce {
    /// Logical AND: one false settles the composite as false
    All,
    /// Logical OR: one true settles the composite as true
    Any,
}

impl Reduce {
    /// Member verdict that settles the composite on its own
    fn decisive(self) -> bool {
        matches!(self, Reduce::Any)
    }

    /// Composite verdict over zero members
    fn vacuous(self) -> bool {
        matches!(self, Reduce::All)
    }

    fn as_str(self) -> &'static str {
        match self {
            Reduce::All => "all",
            Reduce::Any => "any",
        }
    }
}

/// Settle an issued evaluation into a verdict
async fn settle(issued: Result<Outcome<'_>>) -> Result<bool> {
    issued?.into_verdict().await
}

/// Shared state and evaluation engine behind [`AllGuard`] and [`AnyGuard`]
struct Composite<C> {
    resolver: Arc<dyn Resolver<C>>,
    refs: Vec<GuardRef<C>>,
    options: CombineOptions,
}

impl<C> Composite<C> {
    fn new(
        resolver: Arc<dyn Resolver<C>>,
        refs: impl IntoIterator<Item = GuardRef<C>>,
        options: CombineOptions,
    ) -> Self {
        Self {
            resolver,
            refs: refs.into_iter().collect(),
            options,
        }
    }

    /// Resolve every reference up front
    ///
    /// A reference that fails to resolve fails the whole evaluation,
    /// whatever the options say; an unresolvable guard is a configuration
    /// error, not a verdict.
    fn resolve_all(&self) -> Result<Vec<Arc<dyn Guard<C>>>> {
        self.refs
            .iter()
            .map(|reference| {
                reference.resolve(self.resolver.as_ref()).map_err(|err| {
                    tracing::warn!(reference = ?reference, error = %err, "Guard resolution failed");
                    err
                })
            })
            .collect()
    }

    async fn evaluate(&self, ctx: &C, reduce: Reduce) -> Result<bool> {
        let guards = self.resolve_all()?;
        tracing::debug!(
            mode = reduce.as_str(),
            guards = guards.len(),
            sequential = self.options.sequential,
            "Evaluating composite guard"
        );

        let verdict = if self.options.sequential {
            self.sequential(&guards, ctx, reduce).await?
        } else {
            self.concurrent(&guards, ctx, reduce).await?
        };

        tracing::debug!(mode = reduce.as_str(), verdict, "Composite guard settled");
        Ok(verdict)
    }

    /// Evaluate members one at a time in input order
    ///
    /// Each member settles before the next is issued; a decisive verdict
    /// stops the walk and later members are never evaluated.
    async fn sequential(
        &self,
        guards: &[Arc<dyn Guard<C>>],
        ctx: &C,
        reduce: Reduce,
    ) -> Result<bool> {
        for (position, guard) in guards.iter().enumerate() {
            let allowed = match settle(guard.evaluate(ctx)).await {
                Ok(allowed) => allowed,
                Err(err) if self.options.throw_on_first_error => return Err(err),
                Err(err) => {
                    tracing::warn!(guard = position, error = %err, "Guard evaluation failed, treating as denial");
                    false
                }
            };
            if allowed == reduce.decisive() {
                return Ok(reduce.decisive());
            }
        }
        Ok(reduce.vacuous())
    }

    /// Evaluate all members concurrently
    ///
    /// Every evaluation is issued before any verdict is awaited, and all of
    /// them run to completion even once the composite verdict is known.
    /// Under `throw_on_first_error` the propagated error is the first in
    /// input order, independent of settle timing.
    async fn concurrent(
        &self,
        guards: &[Arc<dyn Guard<C>>],
        ctx: &C,
        reduce: Reduce,
    ) -> Result<bool> {
        let issued: Vec<_> = guards.iter().map(|guard| guard.evaluate(ctx)).collect();
        let settled = future::join_all(issued.into_iter().map(settle)).await;

        let mut verdict = reduce.vacuous();
        for (position, result) in settled.into_iter().enumerate() {
            let allowed = match result {
                Ok(allowed) => allowed,
                Err(err) if self.options.throw_on_first_error => return Err(err),
                Err(err) => {
                    tracing::warn!(guard = position, error = %err, "Guard evaluation failed, treating as denial");
                    false
                }
            };
            if allowed == reduce.decisive() {
                verdict = reduce.decisive();
            }
        }
        Ok(verdict)
    }
}
