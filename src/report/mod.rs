//! Fleet reporting: severity buckets, per-pod snapshots, aggregation and
//! fixed-width table rendering

use crate::buffer::BufferStats;
use crate::node::NodeType;
use chrono::{DateTime, Utc};
use owo_colors::{OwoColorize, Stream};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Oldest-age threshold between green and yellow, in seconds
pub const YELLOW_THRESHOLD_SECS: u64 = 60;
/// Oldest-age threshold between yellow and red, in seconds
pub const RED_THRESHOLD_SECS: u64 = 300;

/// Traffic-light severity derived from the oldest buffer file's age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Green,
    Yellow,
    Red,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Green => write!(f, "green"),
            Severity::Yellow => write!(f, "yellow"),
            Severity::Red => write!(f, "red"),
        }
    }
}

impl Severity {
    /// Classify a pod by the age of its oldest pending buffer file.
    ///
    /// A pod with no buffer files has age 0 and so reports green.
    pub fn from_oldest_age(age_secs: u64) -> Severity {
        if age_secs < YELLOW_THRESHOLD_SECS {
            Severity::Green
        } else if age_secs < RED_THRESHOLD_SECS {
            Severity::Yellow
        } else {
            Severity::Red
        }
    }
}

/// Point-in-time backlog view of one pod, immutable once built
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodSnapshot {
    pub pod_name: String,
    pub node_name: String,
    pub node_type: NodeType,
    pub total_buffer_bytes: u64,
    pub oldest_file_age_secs: u64,
    pub newest_file_age_secs: u64,
    pub severity: Severity,
}

impl PodSnapshot {
    pub fn new(
        pod_name: impl Into<String>,
        node_name: impl Into<String>,
        node_type: NodeType,
        stats: BufferStats,
    ) -> Self {
        Self {
            pod_name: pod_name.into(),
            node_name: node_name.into(),
            node_type,
            total_buffer_bytes: stats.total_bytes,
            oldest_file_age_secs: stats.oldest_age_secs,
            newest_file_age_secs: stats.newest_age_secs,
            severity: Severity::from_oldest_age(stats.oldest_age_secs),
        }
    }
}

/// Pod/node pair naming the snapshot behind an extreme value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodRef {
    pub pod_name: String,
    pub node_name: String,
}

impl PodRef {
    fn of(snapshot: &PodSnapshot) -> Self {
        Self {
            pod_name: snapshot.pod_name.clone(),
            node_name: snapshot.node_name.clone(),
        }
    }
}

/// Fleet-wide aggregates derived from all snapshots of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSummary {
    pub timestamp: DateTime<Utc>,
    pub pod_count: usize,
    pub red_count: usize,
    pub yellow_count: usize,
    pub green_count: usize,
    pub total_bytes: u64,
    /// Integer division of total_bytes by pod_count
    pub average_bytes: u64,
    pub max_bytes: u64,
    pub max_bytes_pod: PodRef,
    pub min_bytes: u64,
    pub min_bytes_pod: PodRef,
    pub oldest_age_secs: u64,
    pub oldest_age_pod: PodRef,
    pub newest_age_secs: u64,
    pub newest_age_pod: PodRef,
}

/// Running aggregates owned by the inspection loop.
///
/// All extremes use strict comparisons so equal values keep the first-seen
/// snapshot.
#[derive(Debug, Default)]
pub struct FleetAccumulator {
    pod_count: usize,
    red_count: usize,
    yellow_count: usize,
    green_count: usize,
    total_bytes: u64,
    max_bytes: Option<(u64, PodRef)>,
    min_bytes: Option<(u64, PodRef)>,
    oldest_age: Option<(u64, PodRef)>,
    newest_age: Option<(u64, PodRef)>,
}

impl FleetAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one snapshot into the running aggregates
    pub fn observe(&mut self, snapshot: &PodSnapshot) {
        self.pod_count += 1;
        match snapshot.severity {
            Severity::Red => self.red_count += 1,
            Severity::Yellow => self.yellow_count += 1,
            Severity::Green => self.green_count += 1,
        }

        self.total_bytes += snapshot.total_buffer_bytes;

        let bytes = snapshot.total_buffer_bytes;
        let oldest = snapshot.oldest_file_age_secs;
        let newest = snapshot.newest_file_age_secs;

        if self.max_bytes.as_ref().is_none_or(|(best, _)| bytes > *best) {
            self.max_bytes = Some((bytes, PodRef::of(snapshot)));
        }
        if self.min_bytes.as_ref().is_none_or(|(best, _)| bytes < *best) {
            self.min_bytes = Some((bytes, PodRef::of(snapshot)));
        }
        if self.oldest_age.as_ref().is_none_or(|(best, _)| oldest > *best) {
            self.oldest_age = Some((oldest, PodRef::of(snapshot)));
        }
        if self.newest_age.as_ref().is_none_or(|(best, _)| newest < *best) {
            self.newest_age = Some((newest, PodRef::of(snapshot)));
        }
    }

    /// Finalize into a summary; `None` when no pods were observed
    pub fn finish(self, timestamp: DateTime<Utc>) -> Option<FleetSummary> {
        let (max_bytes, max_bytes_pod) = self.max_bytes?;
        let (min_bytes, min_bytes_pod) = self.min_bytes?;
        let (oldest_age_secs, oldest_age_pod) = self.oldest_age?;
        let (newest_age_secs, newest_age_pod) = self.newest_age?;

        Some(FleetSummary {
            timestamp,
            pod_count: self.pod_count,
            red_count: self.red_count,
            yellow_count: self.yellow_count,
            green_count: self.green_count,
            total_bytes: self.total_bytes,
            average_bytes: self.total_bytes / self.pod_count as u64,
            max_bytes,
            max_bytes_pod,
            min_bytes,
            min_bytes_pod,
            oldest_age_secs,
            oldest_age_pod,
            newest_age_secs,
            newest_age_pod,
        })
    }
}

/// Full report payload for json/yaml output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetReport {
    pub pods: Vec<PodSnapshot>,
    pub summary: FleetSummary,
}

// Fixed column widths. Values longer than their column are truncated so the
// tables stay aligned regardless of pod or node name length.
const STATUS_W: usize = 8;
const AGE_W: usize = 8;
const SIZE_W: usize = 12;
const POD_W: usize = 42;
const NODETYPE_W: usize = 9;
const NODE_W: usize = 32;
const TIME_W: usize = 10;
const COUNT_W: usize = 7;

/// Truncate/pad a value to a fixed column width
fn col(value: &str, width: usize) -> String {
    let truncated: String = value.chars().take(width).collect();
    format!("{truncated:<width$}")
}

fn colorize_severity(severity: Severity, cell: &str) -> String {
    match severity {
        Severity::Green => cell
            .if_supports_color(Stream::Stdout, |t| t.green())
            .to_string(),
        Severity::Yellow => cell
            .if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string(),
        Severity::Red => cell
            .if_supports_color(Stream::Stdout, |t| t.red())
            .to_string(),
    }
}

/// Header row for the per-pod table
pub fn pod_table_header() -> String {
    let mut line = String::new();
    line.push_str(&col("STATUS", STATUS_W));
    line.push_str(&col("OLDEST", AGE_W));
    line.push_str(&col("NEWEST", AGE_W));
    line.push_str(&col("SIZE", SIZE_W));
    line.push_str(&col("POD", POD_W));
    line.push_str(&col("NODETYPE", NODETYPE_W));
    line.push_str(&col("NODE", NODE_W));
    line.trim_end().to_string()
}

/// One formatted row for a pod snapshot; the status cell is colored after
/// padding so escape codes never break the alignment
pub fn pod_table_row(snapshot: &PodSnapshot) -> String {
    let mut line = String::new();
    line.push_str(&colorize_severity(
        snapshot.severity,
        &col(&snapshot.severity.to_string(), STATUS_W),
    ));
    line.push_str(&col(&snapshot.oldest_file_age_secs.to_string(), AGE_W));
    line.push_str(&col(&snapshot.newest_file_age_secs.to_string(), AGE_W));
    line.push_str(&col(&snapshot.total_buffer_bytes.to_string(), SIZE_W));
    line.push_str(&col(&snapshot.pod_name, POD_W));
    line.push_str(&col(&snapshot.node_type.to_string(), NODETYPE_W));
    line.push_str(&col(&snapshot.node_name, NODE_W));
    line.trim_end().to_string()
}

/// Header row for the summary table
pub fn summary_header() -> String {
    let mut line = String::new();
    line.push_str(&col("TIME", TIME_W));
    line.push_str(&col("PODS", COUNT_W));
    line.push_str(&col("RED", COUNT_W));
    line.push_str(&col("YELLOW", COUNT_W));
    line.push_str(&col("GREEN", COUNT_W));
    line.push_str(&col("OLDEST", AGE_W));
    line.push_str(&col("TOTAL_SIZE", SIZE_W));
    line.push_str(&col("LARGEST", SIZE_W));
    line.push_str(&col("AVERAGE", SIZE_W));
    line.trim_end().to_string()
}

/// The single summary data row
pub fn summary_row(summary: &FleetSummary) -> String {
    let mut line = String::new();
    line.push_str(&col(&summary.timestamp.format("%H:%M:%S").to_string(), TIME_W));
    line.push_str(&col(&summary.pod_count.to_string(), COUNT_W));
    line.push_str(&col(&summary.red_count.to_string(), COUNT_W));
    line.push_str(&col(&summary.yellow_count.to_string(), COUNT_W));
    line.push_str(&col(&summary.green_count.to_string(), COUNT_W));
    line.push_str(&col(&summary.oldest_age_secs.to_string(), AGE_W));
    line.push_str(&col(&summary.total_bytes.to_string(), SIZE_W));
    line.push_str(&col(&summary.max_bytes.to_string(), SIZE_W));
    line.push_str(&col(&summary.average_bytes.to_string(), SIZE_W));
    line.trim_end().to_string()
}

/// Free-text lines naming the pods behind the two headline extremes
pub fn detail_lines(summary: &FleetSummary) -> [String; 2] {
    [
        format!(
            "Oldest buffer file: {}s in pod {} (node {})",
            summary.oldest_age_secs,
            summary.oldest_age_pod.pod_name,
            summary.oldest_age_pod.node_name
        ),
        format!(
            "Largest buffer: {} bytes in pod {} (node {})",
            summary.max_bytes, summary.max_bytes_pod.pod_name, summary.max_bytes_pod.node_name
        ),
    ]
}
