//! # cordon-axum
//!
//! axum middleware for [`cordon`] request-authorization guards.
//!
//! [`GuardLayer`] wraps a route or router and evaluates a guard reference
//! against each request's head before the inner service runs. A denial
//! answers `403` with a JSON error envelope, a failed evaluation `500`;
//! allowed requests pass through untouched. Guards referenced by token
//! resolve on every request, so registrations can change at runtime.

#![warn(clippy::all)]

mod layer;
mod rejection;

#[cfg(test)]
mod tests;

pub use layer::{GuardLayer, GuardService};
pub use rejection::{ErrorDetails, ErrorResponse, GuardRejection};
