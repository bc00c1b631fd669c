use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "aisync", version, about = "AI integration sync operator CLI")]
pub struct Cli {
    /// Debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the CLI and core library versions.
    Version,
    /// Check connectivity to the configured remote GraphQL endpoint.
    Probe(ProbeArgs),
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Remote GraphQL endpoint.
    #[arg(long, env = "AI_GRAPHQL_ENDPOINT")]
    pub graphql_endpoint: Option<String>,

    /// Remote REST base URL.
    #[arg(long, env = "AI_REST_ENDPOINT")]
    pub rest_endpoint: Option<String>,

    /// Per-call timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
