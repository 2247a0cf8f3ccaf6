use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "daylog-tui")]
#[command(about = "Terminal client for planning and logging the work day")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against a daylog-api server
    Run,
    /// Store a Linear API key, sent to the server as the access token cookie
    Connect {
        /// Prompted for (without echo) when omitted
        api_key: Option<String>,
    },
    /// Forget the stored Linear API key
    Disconnect,
    /// Print config path and create default file if missing
    ConfigPath,
}
