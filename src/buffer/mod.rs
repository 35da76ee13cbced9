//! Pod buffer inspection
//!
//! Each logging agent keeps captured records in on-disk buffer files until
//! they are shipped to the log store. The inspector runs a single `find`
//! inside the pod to enumerate those files with their sizes and mtimes, then
//! reduces the listing to a per-pod backlog figure. The parser is independent
//! of the exec transport so the reduction is testable without a cluster.

use crate::error::Result;
use crate::exec::exec_capture;
use k8s_openapi::api::core::v1::Pod;
use kube::api::Api;
use kube::Client;
use tracing::{debug, warn};

/// Options controlling where and what the inspector looks for inside a pod
#[derive(Debug, Clone)]
pub struct InspectOptions {
    /// Root of the buffer queue inside the pod
    pub buffer_dir: String,
    /// File name glob matching buffer files
    pub buffer_pattern: String,
    /// Container to exec into, when the pod has more than one
    pub container: Option<String>,
}

/// Raw reduction of a remote file listing: total size plus the extreme mtimes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferListing {
    pub total_bytes: u64,
    pub oldest_ts: Option<i64>,
    pub newest_ts: Option<i64>,
}

/// Per-pod backlog statistics, with mtimes converted to ages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferStats {
    pub total_bytes: u64,
    pub oldest_age_secs: u64,
    pub newest_age_secs: u64,
}

/// Parse the output of `find ... -printf '%s %T@\n'` into a single-pass
/// reduction.
///
/// Each line is a `<size> <epoch-seconds>` pair; timestamps may carry a
/// fractional part, which is truncated to whole seconds. Lines that do not
/// parse are skipped.
pub fn parse_listing(raw: &str) -> BufferListing {
    let mut listing = BufferListing::default();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let parsed = match (fields.next(), fields.next()) {
            (Some(size), Some(ts)) => size
                .parse::<u64>()
                .ok()
                .zip(parse_epoch_seconds(ts)),
            _ => None,
        };

        let Some((size, ts)) = parsed else {
            debug!(line, "skipping malformed buffer listing line");
            continue;
        };

        listing.total_bytes += size;
        listing.oldest_ts = Some(listing.oldest_ts.map_or(ts, |t| t.min(ts)));
        listing.newest_ts = Some(listing.newest_ts.map_or(ts, |t| t.max(ts)));
    }

    listing
}

/// Truncate a possibly-fractional epoch timestamp to whole seconds
fn parse_epoch_seconds(field: &str) -> Option<i64> {
    field
        .split('.')
        .next()
        .and_then(|whole| whole.parse::<i64>().ok())
}

impl BufferStats {
    /// Convert extreme mtimes to ages relative to `now_epoch`.
    ///
    /// An empty listing yields zero ages rather than absent ones, so a pod
    /// with no buffer files reports as (0, 0, 0). Ages clamp at zero in case
    /// a file's mtime is ahead of our clock.
    pub fn from_listing(listing: &BufferListing, now_epoch: i64) -> BufferStats {
        let age = |ts: Option<i64>| ts.map_or(0, |t| (now_epoch - t).max(0) as u64);

        BufferStats {
            total_bytes: listing.total_bytes,
            oldest_age_secs: age(listing.oldest_ts),
            newest_age_secs: age(listing.newest_ts),
        }
    }
}

/// Resolve the node a listed pod is scheduled on.
///
/// A pod with no assigned node (or stripped spec) gets a placeholder name so
/// it still shows up in the report.
pub fn pod_node_name(pod: &Pod) -> String {
    let pod_name = pod.metadata.name.as_deref().unwrap_or("unnamed");

    pod.spec
        .as_ref()
        .and_then(|s| s.node_name.clone())
        .unwrap_or_else(|| format!("unknown-{pod_name}"))
}

/// Inspect one pod's buffer queue with a single remote round trip.
///
/// Exec failures degrade to zero-valued stats (logged, never propagated) so
/// the fleet report always covers every listed pod.
pub async fn inspect(
    client: &Client,
    namespace: &str,
    pod_name: &str,
    opts: &InspectOptions,
) -> BufferStats {
    let now_epoch = chrono::Utc::now().timestamp();

    match run_listing(client, namespace, pod_name, opts).await {
        Ok(raw) => {
            let listing = parse_listing(&raw);
            if listing.oldest_ts.is_none() {
                debug!(pod = pod_name, "no buffer files matched, reporting empty backlog");
            }
            BufferStats::from_listing(&listing, now_epoch)
        }
        Err(e) => {
            warn!(pod = pod_name, error = %e, "buffer inspection failed, reporting empty backlog");
            BufferStats::default()
        }
    }
}

async fn run_listing(
    client: &Client,
    namespace: &str,
    pod_name: &str,
    opts: &InspectOptions,
) -> Result<String> {
    let api: Api<Pod> = Api::namespaced(client.clone(), namespace);

    let command = [
        "find",
        opts.buffer_dir.as_str(),
        "-type",
        "f",
        "-name",
        opts.buffer_pattern.as_str(),
        "-printf",
        "%s %T@\\n",
    ];

    exec_capture(&api, pod_name, opts.container.as_deref(), &command).await
}
