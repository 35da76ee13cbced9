//! Kubernetes client abstraction

use crate::error::{BufcheckError, Result};
use kube::{config::KubeConfigOptions, Client, Config};

/// Create a Kubernetes client for the specified context
pub async fn create_client(context: Option<&str>) -> Result<Client> {
    let config = load_config(context).await?;
    Client::try_from(config).map_err(BufcheckError::from)
}

/// Load Kubernetes configuration
async fn load_config(context: Option<&str>) -> Result<Config> {
    let options = KubeConfigOptions {
        context: context.map(String::from),
        ..Default::default()
    };

    match Config::from_kubeconfig(&options).await {
        Ok(config) => Ok(config),
        // Fall back to in-cluster config so the check can run from a pod
        Err(kubeconfig_err) => Config::incluster().map_err(|e| {
            BufcheckError::Config(format!(
                "Failed to load kubeconfig ({kubeconfig_err}) and in-cluster config ({e})"
            ))
        }),
    }
}
