use crate::*;
use std::sync::Arc;

use axum::body::Body;
use axum::http::request::Parts;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use cordon::{
    AllGuard, FixedGuard, Guard, GuardError, GuardRef, GuardRegistry, Outcome, Resolver,
};
use tower::ServiceExt;

// Mock guard that allows requests carrying a marker header
struct HeaderGuard {
    header: &'static str,
}

impl Guard<Parts> for HeaderGuard {
    fn evaluate<'a>(&'a self, ctx: &'a Parts) -> cordon::Result<Outcome<'a>> {
        Ok(Outcome::Ready(ctx.headers.contains_key(self.header)))
    }
}

struct FailingGuard;

impl Guard<Parts> for FailingGuard {
    fn evaluate<'a>(&'a self, _ctx: &'a Parts) -> cordon::Result<Outcome<'a>> {
        Err(GuardError::evaluation(std::io::Error::other(
            "policy backend down",
        )))
    }
}

async fn handler() -> &'static str {
    "ok"
}

fn request() -> Request<Body> {
    Request::builder().uri("/").body(Body::empty()).unwrap()
}

// Helper to pull the error code out of the JSON envelope
async fn error_code(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    body["error"]["code"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn allowed_requests_reach_the_inner_service() {
    let app = Router::new()
        .route("/", get(handler))
        .layer(GuardLayer::instance(HeaderGuard { header: "x-api-key" }));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-api-key", "sekrit")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn denied_requests_answer_forbidden() {
    let app = Router::new()
        .route("/", get(handler))
        .layer(GuardLayer::instance(HeaderGuard { header: "x-api-key" }));

    let response = app.oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(error_code(response).await, "FORBIDDEN");
}

#[tokio::test]
async fn guard_failure_answers_internal_error() {
    let app = Router::new()
        .route("/", get(handler))
        .layer(GuardLayer::instance(FailingGuard));

    let response = app.oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(response).await, "GUARD_FAILURE");
}

#[tokio::test]
async fn token_guards_resolve_on_every_request() {
    let registry = Arc::new(GuardRegistry::<Parts>::new());
    registry.register("gate", Arc::new(FixedGuard::deny()) as Arc<dyn Guard<Parts>>);

    let app = Router::new()
        .route("/", get(handler))
        .layer(GuardLayer::new(registry.clone(), "gate"));

    let response = app.clone().oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    registry.register("gate", Arc::new(FixedGuard::allow()) as Arc<dyn Guard<Parts>>);
    let response = app.oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unregistered_token_fails_requests() {
    let registry = Arc::new(GuardRegistry::<Parts>::new());
    let app = Router::new()
        .route("/", get(handler))
        .layer(GuardLayer::new(registry, "missing"));

    let response = app.oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(response).await, "GUARD_FAILURE");
}

#[tokio::test]
async fn composites_guard_routes_end_to_end() {
    let registry = Arc::new(GuardRegistry::<Parts>::new());
    registry.register(
        "has-key",
        Arc::new(HeaderGuard { header: "x-api-key" }) as Arc<dyn Guard<Parts>>,
    );

    let composite = AllGuard::new(
        registry.clone() as Arc<dyn Resolver<Parts>>,
        [
            GuardRef::token("has-key"),
            GuardRef::instance(FixedGuard::allow()),
        ],
    );
    let app = Router::new()
        .route("/", get(handler))
        .layer(GuardLayer::instance(composite));

    let response = app.clone().oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-api-key", "sekrit")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
