use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use textquest_engine::quest::FAREWELL;
use textquest_engine::{DisabledMailer, EngineConfig};
use textquest_server::App;
use textquest_server::http::routes;
use tower::ServiceExt;

fn app() -> Arc<App> {
    Arc::new(App::new(Arc::new(DisabledMailer), EngineConfig::default()))
}

fn form_post(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("request")
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, String::from_utf8(body.to_vec()).expect("utf-8"))
}

#[tokio::test]
async fn plain_route_plays_a_game() {
    let app = app();
    let router = routes().with_state(Arc::clone(&app));

    let (status, opening) = send(router.clone(), form_post("/plain", "From=alice&Body=hello")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(opening.starts_with("You are standing in a clearing."));

    let (_, moved) = send(router.clone(), form_post("/plain", "From=alice&Body=go+east")).await;
    assert!(moved.starts_with("A great castle looms"));

    let (_, farewell) = send(router, form_post("/plain", "From=alice&Body=exit")).await;
    assert_eq!(farewell, FAREWELL);
    assert_eq!(app.store.active_count(), 0);
}

#[tokio::test]
async fn missing_fields_get_an_empty_reply() {
    let app = app();
    let router = routes().with_state(Arc::clone(&app));
    let (status, body) = send(router.clone(), form_post("/plain", "From=bob")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    let (status, body) = send(router, form_post("/sms", "Body=look")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(app.store.total_started(), 0);
}

#[tokio::test]
async fn sms_route_answers_with_twiml() {
    let router = routes().with_state(app());
    let response = router
        .oneshot(form_post("/sms", "From=%2B15550100&Body=look&SmsStatus=received"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().expect("header").to_string();
    assert!(content_type.starts_with("text/xml"));
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let xml = String::from_utf8(body.to_vec()).expect("utf-8");
    assert!(xml.contains("<Response>"));
    assert!(xml.contains("<Message>You are standing in a clearing."));
}

#[tokio::test]
async fn metrics_count_games() {
    let app = app();
    let router = routes().with_state(Arc::clone(&app));
    send(router.clone(), form_post("/plain", "From=carol&Body=hi")).await;
    send(router.clone(), form_post("/plain", "From=dave&Body=hi")).await;

    let request = Request::builder().uri("/metrics").body(Body::empty()).expect("request");
    let (status, body) = send(router, request).await;
    assert_eq!(status, StatusCode::OK);
    let metrics: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert_eq!(metrics["ActiveGames"], 2);
    assert_eq!(metrics["TotalGames"], 2);
    assert!(metrics["UptimeSeconds"].is_u64());
}
