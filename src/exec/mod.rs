//! Non-interactive remote exec with captured output

use crate::error::{BufcheckError, Result};
use futures::StreamExt;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, AttachParams};

/// Execute a command inside a pod and return its captured stdout.
///
/// stdin/tty are never attached; stderr is discarded. A nonzero exit status
/// is reported as an error so callers can decide how to degrade.
pub async fn exec_capture(
    api: &Api<Pod>,
    pod: &str,
    container: Option<&str>,
    command: &[&str],
) -> Result<String> {
    let mut ap = AttachParams::default().stdout(true).stderr(false);
    if let Some(container) = container {
        ap = ap.container(container);
    }

    let mut attached = api.exec(pod, command.iter().copied(), &ap).await?;

    let stdout = attached
        .stdout()
        .ok_or_else(|| BufcheckError::RemoteExec {
            pod: pod.to_string(),
            reason: "no stdout stream attached".to_string(),
        })?;
    let status = attached.take_status();

    let output = tokio_util::io::ReaderStream::new(stdout)
        .filter_map(|r| async { r.ok().and_then(|b| String::from_utf8(b.to_vec()).ok()) })
        .collect::<Vec<_>>()
        .await
        .join("");

    attached.join().await.map_err(|e| BufcheckError::RemoteExec {
        pod: pod.to_string(),
        reason: e.to_string(),
    })?;

    if let Some(status) = status {
        if let Some(status) = status.await {
            if status.status.as_deref() == Some("Failure") {
                return Err(BufcheckError::RemoteExec {
                    pod: pod.to_string(),
                    reason: status
                        .reason
                        .unwrap_or_else(|| "command exited with failure".to_string()),
                });
            }
        }
    }

    Ok(output)
}
