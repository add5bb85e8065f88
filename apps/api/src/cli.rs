use clap::{Parser, Subcommand};

/// Job Board API server.
#[derive(Debug, Parser)]
#[command(name = "jobboard-api")]
#[command(about = "Job Board API Server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Host to bind the server to
    #[arg(long, global = true, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to run the server on
    #[arg(long, global = true, env = "PORT", default_value_t = 8000)]
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Initialize the database (creates the jobs table if absent)
    Init,
    /// Start the server
    #[command(visible_alias = "start")]
    Run,
}
