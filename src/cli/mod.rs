//! CLI definitions using clap

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser)]
#[command(
    name = "bufcheck",
    author = "Aleksei Zaitsev",
    version,
    about = "Buffer backlog health check for log-forwarding pods",
    long_about = None,
)]
pub struct Cli {
    /// Kubernetes context to use
    #[arg(long, global = true, env = "BUFCHECK_CONTEXT")]
    pub context: Option<String>,

    /// Namespace the logging agents run in
    #[arg(short = 'n', long, env = "LOGGING_NAMESPACE", default_value = "openshift-logging")]
    pub namespace: String,

    /// Label selector identifying the logging agent pods
    #[arg(short = 'l', long, env = "BUFCHECK_SELECTOR", default_value = "component=fluentd")]
    pub selector: String,

    /// Print one row per pod as it is inspected
    ///
    /// The env value is truthy unless empty/false/no/0, so a stray
    /// PER_POD value never aborts startup
    #[arg(
        long,
        env = "PER_POD",
        action = ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub per_pod: bool,

    /// Directory holding the on-disk buffer queue inside each pod
    #[arg(long, default_value = "/var/lib/fluentd")]
    pub buffer_dir: String,

    /// File name glob matching buffer files under the buffer directory
    #[arg(long, default_value = "*.log")]
    pub buffer_pattern: String,

    /// Container to exec into (defaults to the pod's first container)
    #[arg(short = 'c', long)]
    pub container: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}
