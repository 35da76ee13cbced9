//! bufcheck - buffer backlog health check for log-forwarding pods

pub mod buffer;
pub mod cli;
pub mod client;
pub mod commands;
pub mod error;
pub mod exec;
pub mod node;
pub mod report;
