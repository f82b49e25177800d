use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::json;

use villamar_backend::client::property::PropertyClient;
use villamar_backend::config::ClientConfig;
use villamar_backend::model::property::DatasetStatus;

async fn spawn_relay(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn details_route() -> Router {
    Router::new().route(
        "/api/hospitable/properties/{id}",
        get(|| async { Json(json!({ "name": "Villa Mar" })) }),
    )
}

fn images_route() -> Router {
    Router::new().route(
        "/api/hospitable/properties/{id}/images",
        get(|| async {
            Json(json!({ "data": [{ "url": "https://img.example.com/pool.jpg", "caption": "Pool" }] }))
        }),
    )
}

fn failing(path: &str) -> Router {
    Router::new().route(path, get(|| async { StatusCode::BAD_GATEWAY }))
}

fn client_for(base_url: &str) -> PropertyClient {
    PropertyClient::new(&ClientConfig::new(base_url, "villa-1"))
}

#[tokio::test]
async fn test_complete_dataset() {
    let base = spawn_relay(details_route().merge(images_route())).await;

    let dataset = client_for(&base).load_dataset().await;

    assert_eq!(dataset.status(), DatasetStatus::Complete);
    assert_eq!(dataset.details.unwrap()["name"], "Villa Mar");
    let images = dataset.images.unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].caption.as_deref(), Some("Pool"));
}

#[tokio::test]
async fn test_details_failure_with_images_success_is_partial() {
    let base = spawn_relay(
        failing("/api/hospitable/properties/{id}").merge(images_route()),
    )
    .await;

    let dataset = client_for(&base).load_dataset().await;

    assert_eq!(dataset.status(), DatasetStatus::Partial);
    assert!(dataset.details.is_none());
    assert!(!dataset.images.as_ref().unwrap().is_empty());
}

#[tokio::test]
async fn test_images_failure_with_details_success_is_partial() {
    let base = spawn_relay(
        details_route().merge(failing("/api/hospitable/properties/{id}/images")),
    )
    .await;

    let dataset = client_for(&base).load_dataset().await;

    assert_eq!(dataset.status(), DatasetStatus::Partial);
    assert!(dataset.images_failed());
    assert!(dataset.details.is_some());
}

#[tokio::test]
async fn test_both_failing_is_failed_not_empty() {
    // Nothing listens here at all.
    let dataset = client_for("http://127.0.0.1:9").load_dataset().await;

    assert_eq!(dataset.status(), DatasetStatus::Failed);
}

#[tokio::test]
async fn test_reload_images_recovers_a_partial_dataset() {
    // The images endpoint fails on the first request and succeeds after,
    // modeling the manual "reload images" affordance.
    let flaky = Arc::new(AtomicBool::new(true));
    let images = Router::new().route(
        "/api/hospitable/properties/{id}/images",
        get(|State(flaky): State<Arc<AtomicBool>>| async move {
            if flaky.swap(false, Ordering::SeqCst) {
                Err(StatusCode::BAD_GATEWAY)
            } else {
                Ok(Json(json!({ "data": [{ "url": "https://img.example.com/pool.jpg" }] })))
            }
        }),
    )
    .with_state(flaky);
    let base = spawn_relay(details_route().merge(images)).await;
    let client = client_for(&base);

    let mut dataset = client.load_dataset().await;
    assert_eq!(dataset.status(), DatasetStatus::Partial);

    client.reload_images(&mut dataset).await;

    assert_eq!(dataset.status(), DatasetStatus::Complete);
    assert_eq!(dataset.images.unwrap().len(), 1);
}
