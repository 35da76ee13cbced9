//! Integration tests for client creation (requires a cluster)

use bufcheck::client::create_client;

mod common {
    include!("../common/mod.rs");
}

#[tokio::test]
#[ignore = "requires a Kubernetes cluster"]
async fn test_create_client_default_context() {
    if !common::has_kubeconfig() {
        eprintln!("Skipping: no kubeconfig available");
        return;
    }

    let client = create_client(None).await.expect("client should build");
    let version = client.apiserver_version().await;
    assert!(version.is_ok(), "apiserver should be reachable");
}

#[tokio::test]
#[ignore = "requires a Kubernetes cluster"]
async fn test_create_client_unknown_context_fails() {
    if !common::has_kubeconfig() {
        eprintln!("Skipping: no kubeconfig available");
        return;
    }

    let result = create_client(Some("bufcheck-nonexistent-context")).await;
    assert!(result.is_err());
}
