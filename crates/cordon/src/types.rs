//! Core guard types: tokens, references, options, and evaluation outcomes.

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::errors::{GuardError, Result};
use crate::traits::{Guard, Resolver};

/// Lookup key identifying a registered guard
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuardToken(Cow<'static, str>);

impl GuardToken {
    /// Create a token from a static or owned name
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Token name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuardToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for GuardToken {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for GuardToken {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

/// Reference to a guard, resolved anew on every evaluation
pub enum GuardRef<C> {
    /// Token looked up through the resolver at evaluation time
    Token(GuardToken),
    /// Concrete instance; resolves to itself
    Instance(Arc<dyn Guard<C>>),
}

impl<C> GuardRef<C> {
    /// Reference a guard by registration token
    pub fn token(token: impl Into<GuardToken>) -> Self {
        GuardRef::Token(token.into())
    }

    /// Reference a concrete guard instance
    pub fn instance(guard: impl Guard<C> + 'static) -> Self {
        GuardRef::Instance(Arc::new(guard))
    }

    /// Resolve this reference to a live guard
    pub fn resolve(&self, resolver: &dyn Resolver<C>) -> Result<Arc<dyn Guard<C>>> {
        match self {
            GuardRef::Token(token) => resolver.resolve(token),
            GuardRef::Instance(guard) => Ok(Arc::clone(guard)),
        }
    }
}

impl<C> Clone for GuardRef<C> {
    fn clone(&self) -> Self {
        match self {
            GuardRef::Token(token) => GuardRef::Token(token.clone()),
            GuardRef::Instance(guard) => GuardRef::Instance(Arc::clone(guard)),
        }
    }
}

impl<C> fmt::Debug for GuardRef<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardRef::Token(token) => f.debug_tuple("Token").field(token).finish(),
            GuardRef::Instance(_) => f.write_str("Instance(..)"),
        }
    }
}

impl<C> From<GuardToken> for GuardRef<C> {
    fn from(token: GuardToken) -> Self {
        GuardRef::Token(token)
    }
}

impl<C> From<&'static str> for GuardRef<C> {
    fn from(token: &'static str) -> Self {
        GuardRef::Token(token.into())
    }
}

impl<C> From<Arc<dyn Guard<C>>> for GuardRef<C> {
    fn from(guard: Arc<dyn Guard<C>>) -> Self {
        GuardRef::Instance(guard)
    }
}

/// Options controlling how a composite guard evaluates its members
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineOptions {
    /// Propagate the first evaluation failure instead of treating it as a denial
    pub throw_on_first_error: bool,
    /// Evaluate members one at a time in input order instead of concurrently
    pub sequential: bool,
}

/// Shape of a single guard evaluation
///
/// A guard may answer immediately, defer the verdict to a future, or emit
/// it on a stream, of which only the first item counts. Callers settle an
/// outcome with [`Outcome::into_verdict`].
pub enum Outcome<'a> {
    /// Immediate verdict
    Ready(bool),
    /// Verdict produced by a future
    Deferred(BoxFuture<'a, Result<bool>>),
    /// Verdict taken from the first item of a stream
    Stream(BoxStream<'a, Result<bool>>),
}

impl<'a> Outcome<'a> {
    /// Immediate verdict
    pub fn ready(allow: bool) -> Self {
        Outcome::Ready(allow)
    }

    /// Verdict produced by a future
    pub fn deferred(fut: impl Future<Output = Result<bool>> + Send + 'a) -> Self {
        Outcome::Deferred(Box::pin(fut))
    }

    /// Verdict taken from the first item of a stream
    pub fn stream(stream: impl Stream<Item = Result<bool>> + Send + 'a) -> Self {
        Outcome::Stream(Box::pin(stream))
    }

    /// Settle the outcome into a final verdict
    ///
    /// Deferred outcomes are awaited and stream outcomes polled for their
    /// first item; a stream that ends without yielding one fails with
    /// [`GuardError::NoVerdict`].
    pub async fn into_verdict(self) -> Result<bool> {
        match self {
            Outcome::Ready(allow) => Ok(allow),
            Outcome::Deferred(fut) => fut.await,
            Outcome::Stream(mut stream) => {
                stream.next().await.unwrap_or(Err(GuardError::NoVerdict))
            }
        }
    }
}

impl From<bool> for Outcome<'_> {
    fn from(allow: bool) -> Self {
        Outcome::Ready(allow)
    }
}

impl fmt::Debug for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ready(allow) => f.debug_tuple("Ready").field(allow).finish(),
            Outcome::Deferred(_) => f.write_str("Deferred(..)"),
            Outcome::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}
