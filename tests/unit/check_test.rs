//! Tests for the check command driven over a mock API server

use bufcheck::cli::Cli;
use bufcheck::commands::run_check_with_client;
use clap::Parser;
use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use serde_json::json;

type ApiServerHandle = tower_test::mock::Handle<Request<Body>, Response<Body>>;

fn mock_client() -> (Client, ApiServerHandle) {
    let (mock_service, handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();
    (Client::new(mock_service, "openshift-logging"), handle)
}

async fn respond_with_pod_list(handle: &mut ApiServerHandle, items: serde_json::Value) {
    let (request, send) = handle.next_request().await.expect("service not called");
    assert_eq!(request.method(), http::Method::GET);
    let uri = request.uri().to_string();
    assert!(
        uri.contains("/namespaces/openshift-logging/pods"),
        "unexpected uri {uri}"
    );
    assert!(uri.contains("labelSelector="), "unexpected uri {uri}");

    let body = serde_json::to_vec(&json!({
        "kind": "PodList",
        "apiVersion": "v1",
        "metadata": {},
        "items": items,
    }))
    .unwrap();
    send.send_response(Response::builder().body(Body::from(body)).unwrap());
}

async fn timeout_after_1s(handle: tokio::task::JoinHandle<()>) {
    tokio::time::timeout(std::time::Duration::from_secs(1), handle)
        .await
        .expect("timeout on mock apiserver")
        .expect("scenario succeeded")
}

// ============================================================================
// Empty listing: error message, clean exit, no summary
// ============================================================================

#[tokio::test]
async fn test_empty_listing_is_not_a_failure() {
    let (client, mut handle) = mock_client();
    let cli = Cli::parse_from(["bufcheck"]);

    let apiserver = tokio::spawn(async move {
        respond_with_pod_list(&mut handle, json!([])).await;
        // The check returns right after the listing: no node lookups, no
        // execs, no summary. The client is dropped by then, so the mock
        // service sees no further requests.
        assert!(handle.next_request().await.is_none());
    });

    run_check_with_client(client, &cli)
        .await
        .expect("no pods found is a non-fatal condition");

    timeout_after_1s(apiserver).await;
}

// ============================================================================
// Unreachable API server: fatal, no partial report
// ============================================================================

#[tokio::test]
async fn test_listing_failure_aborts_the_run() {
    let (client, handle) = mock_client();
    let cli = Cli::parse_from(["bufcheck"]);

    // Dropping the handle closes the mock service, so the listing call fails
    drop(handle);

    let result = run_check_with_client(client, &cli).await;
    assert!(result.is_err());
}
