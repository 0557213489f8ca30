//! # cordon
//!
//! Composable request-authorization guards for async services.
//!
//! A guard is one yes/no check against a request context: does the caller
//! hold the right role, is the tenant within quota, did the request come
//! from an allowed network. A guard answers immediately, defers to a
//! future, or emits on a stream (see [`Outcome`]); composites reduce
//! several answers to one:
//!
//! - [`AllGuard`] allows a request only when every member allows it
//! - [`AnyGuard`] allows a request when at least one member allows it
//!
//! Members are referenced by [`GuardToken`] or held directly and resolved
//! through a [`Resolver`] (typically a [`GuardRegistry`]) on every
//! evaluation, so re-registering a token changes behavior without
//! rebuilding the composite. [`CombineOptions`] selects sequential or
//! concurrent evaluation and whether member failures propagate or count
//! as denials.

#![warn(clippy::all)]

mod combine;
pub mod errors;
pub mod registry;
pub mod traits;
pub mod types;


pub use combine::{AllGuard, AnyGuard};
pub use errors::*;
pub use registry::*;
pub use traits::*;
pub use types::*;
