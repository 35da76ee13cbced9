//! The fleet check: list agent pods, inspect each buffer queue, aggregate
//! and render the report

use crate::buffer::{inspect, pod_node_name, InspectOptions};
use crate::cli::{Cli, OutputFormat};
use crate::client::create_client;
use crate::error::Result;
use crate::node::classify;
use crate::report::{
    detail_lines, pod_table_header, pod_table_row, FleetAccumulator, FleetReport, PodSnapshot,
};
use crate::report::{summary_header, summary_row};
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, ListParams};
use kube::Client;
use tracing::info;

/// Run the health check end to end.
///
/// Client construction and the initial pod listing are fatal; everything past
/// that point degrades per pod so the report always covers the whole fleet.
pub async fn run_check(cli: &Cli) -> Result<()> {
    let client = create_client(cli.context.as_deref()).await?;
    run_check_with_client(client, cli).await
}

/// Run the health check against an already-built client
pub async fn run_check_with_client(client: Client, cli: &Cli) -> Result<()> {
    let api: Api<Pod> = Api::namespaced(client.clone(), &cli.namespace);
    let params = ListParams::default().labels(&cli.selector);
    let pods = api.list(&params).await?.items;

    if pods.is_empty() {
        eprintln!(
            "Error: no pods matching '{}' found in namespace '{}'",
            cli.selector, cli.namespace
        );
        return Ok(());
    }

    info!(count = pods.len(), namespace = %cli.namespace, "inspecting logging agent pods");

    let opts = InspectOptions {
        buffer_dir: cli.buffer_dir.clone(),
        buffer_pattern: cli.buffer_pattern.clone(),
        container: cli.container.clone(),
    };

    let table = cli.output == OutputFormat::Table;
    if table && cli.per_pod {
        println!("{}", pod_table_header());
    }

    let mut acc = FleetAccumulator::new();
    let mut snapshots = Vec::with_capacity(pods.len());

    for pod in &pods {
        let pod_name = pod.metadata.name.as_deref().unwrap_or("unnamed");
        let node_name = pod_node_name(pod);
        let node_type = classify(&client, &node_name).await;
        let stats = inspect(&client, &cli.namespace, pod_name, &opts).await;

        let snapshot = PodSnapshot::new(pod_name, node_name, node_type, stats);
        if table && cli.per_pod {
            println!("{}", pod_table_row(&snapshot));
        }
        acc.observe(&snapshot);
        snapshots.push(snapshot);
    }

    // pods is non-empty here, so finish always yields a summary
    let Some(summary) = acc.finish(chrono::Utc::now()) else {
        return Ok(());
    };

    match cli.output {
        OutputFormat::Table => {
            println!();
            println!("SUMMARY");
            println!();
            println!("{}", summary_header());
            println!("{}", summary_row(&summary));
            for line in detail_lines(&summary) {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            let report = FleetReport {
                pods: snapshots,
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Yaml => {
            let report = FleetReport {
                pods: snapshots,
                summary,
            };
            print!("{}", serde_yaml::to_string(&report)?);
        }
    }

    Ok(())
}
