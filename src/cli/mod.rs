use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Send a prompt, optionally with an error log, to the chat endpoint
    Chat {
        prompt: String,

        /// File whose contents are sent as the error log
        #[arg(short, long)]
        error_log: Option<PathBuf>,

        /// Model id to record on the conversation (see `models`)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// List the selectable chat models
    Models,

    /// Pick a log group and a filter pattern, then open the matching events
    SearchLogGroup,
}
