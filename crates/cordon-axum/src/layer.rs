use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::request::Parts;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use cordon::{verdict, Guard, GuardRef, GuardRegistry, Resolver};
use futures::future::BoxFuture;
use tower::{Layer, Service};

use crate::rejection::GuardRejection;

/// Layer protecting wrapped services with a guard
///
/// The guard evaluates against the request head ([`Parts`]) before the
/// inner service runs. Token references resolve on every request, so a
/// re-registered guard takes effect without rebuilding the router.
#[derive(Clone)]
pub struct GuardLayer {
    resolver: Arc<dyn Resolver<Parts>>,
    reference: GuardRef<Parts>,
}

impl GuardLayer {
    /// Protect with a reference resolved through `resolver`
    pub fn new(resolver: Arc<dyn Resolver<Parts>>, reference: impl Into<GuardRef<Parts>>) -> Self {
        Self {
            resolver,
            reference: reference.into(),
        }
    }

    /// Protect with a fixed guard instance
    pub fn instance(guard: impl Guard<Parts> + 'static) -> Self {
        Self {
            resolver: Arc::new(GuardRegistry::<Parts>::new()),
            reference: GuardRef::instance(guard),
        }
    }
}

impl<S> Layer<S> for GuardLayer {
    type Service = GuardService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GuardService {
            inner,
            resolver: Arc::clone(&self.resolver),
            reference: self.reference.clone(),
        }
    }
}

/// Middleware produced by [`GuardLayer`]
#[derive(Clone)]
pub struct GuardService<S> {
    inner: S,
    resolver: Arc<dyn Resolver<Parts>>,
    reference: GuardRef<Parts>,
}

impl<S> Service<Request<Body>> for GuardService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), S::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        // Pass the service we drove to readiness into the future and
        // leave a fresh clone behind
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let resolver = Arc::clone(&self.resolver);
        let reference = self.reference.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();

            let guard = match reference.resolve(resolver.as_ref()) {
                Ok(guard) => guard,
                Err(err) => return Ok(GuardRejection::Failed(err).into_response()),
            };

            match verdict(guard.as_ref(), &parts).await {
                Ok(true) => inner.call(Request::from_parts(parts, body)).await,
                Ok(false) => {
                    tracing::debug!(path = %parts.uri.path(), "Request denied by guard");
                    Ok(GuardRejection::Denied.into_response())
                }
                Err(err) => Ok(GuardRejection::Failed(err).into_response()),
            }
        })
    }
}
