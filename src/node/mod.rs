//! Node classification for human triage
//!
//! Nodes are bucketed into coarse categories (compute/infra/master) from their
//! labels. Classification is best-effort: any lookup failure degrades to
//! `Unknown` rather than aborting the run.

use k8s_openapi::api::core::v1::Node;
use kube::{Api, Client};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Label key carrying an explicit node type (OpenShift-style clusters)
const TYPE_LABEL: &str = "type";

/// Prefix of role-indicating label keys, e.g. `node-role.kubernetes.io/infra`
const ROLE_LABEL_PREFIX: &str = "node-role.kubernetes.io/";

/// Coarse node category used in report columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Compute,
    Infra,
    Master,
    Unknown,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Compute => write!(f, "compute"),
            NodeType::Infra => write!(f, "infra"),
            NodeType::Master => write!(f, "master"),
            NodeType::Unknown => write!(f, "unknown"),
        }
    }
}

impl NodeType {
    /// Parse a type/role token into a category
    pub fn from_token(token: &str) -> NodeType {
        match token {
            "compute" | "worker" => NodeType::Compute,
            "infra" => NodeType::Infra,
            "master" | "control-plane" => NodeType::Master,
            _ => NodeType::Unknown,
        }
    }

    /// Classify a node from its label map.
    ///
    /// The explicit `type` label wins; otherwise the first
    /// `node-role.kubernetes.io/<role>` key that parses to a known category is
    /// used. Keys are scanned in BTreeMap order so the result is deterministic.
    pub fn from_labels(labels: &BTreeMap<String, String>) -> NodeType {
        if let Some(value) = labels.get(TYPE_LABEL) {
            if !value.is_empty() {
                return NodeType::from_token(value);
            }
        }

        labels
            .keys()
            .filter_map(|key| key.strip_prefix(ROLE_LABEL_PREFIX))
            .map(NodeType::from_token)
            .find(|t| *t != NodeType::Unknown)
            .unwrap_or(NodeType::Unknown)
    }
}

/// Classify a named node by fetching its labels from the API.
///
/// Failures are swallowed and reported as `Unknown` so a single bad node never
/// aborts the fleet report.
pub async fn classify(client: &Client, node_name: &str) -> NodeType {
    let api: Api<Node> = Api::all(client.clone());

    match api.get(node_name).await {
        Ok(node) => match &node.metadata.labels {
            Some(labels) => NodeType::from_labels(labels),
            None => NodeType::Unknown,
        },
        Err(e) => {
            debug!(node = node_name, error = %e, "node lookup failed, classifying as unknown");
            NodeType::Unknown
        }
    }
}
