//! Command execution context
//!
//! Wires configuration, the HTTP client, the confirmation gate and the status
//! line together so mode handlers only deal with fetching and printing.

use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;

use crate::catalog::{Catalog, ConfirmationGate, TerminalPrompt};
use crate::cli::Cli;
use crate::client::GitLabClient;
use crate::config::Config;
use crate::error::Result;
use crate::output::{StatusLine, StatusMode};

/// Shared state for one invocation.
pub struct CommandContext {
    /// Fetch engine over the GitLab API
    pub catalog: Catalog<GitLabClient>,
    /// Spinner or plain status messages on stderr
    pub status: StatusLine,
    /// List everything instead of recently active items only
    pub include_all: bool,
}

impl CommandContext {
    /// Resolve configuration from `cli` and the environment and build the
    /// client.
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = Config::from_env(cli.host.as_deref(), cli.nohttps)?;
        Self::with_config(&config, cli.all, StatusMode::detect(cli.debug))
    }

    /// Build a context from already resolved configuration.
    pub fn with_config(config: &Config, include_all: bool, mode: StatusMode) -> Result<Self> {
        let base_url = config.base_url();
        debug!("Using GitLab at {}", base_url);
        let client = GitLabClient::new(&base_url, config.token.clone())?;

        let (signals, receiver) = mpsc::channel(1);
        let gate = ConfirmationGate::new(Arc::new(TerminalPrompt)).with_status_channel(signals);

        Ok(Self {
            catalog: Catalog::new(client, gate),
            status: StatusLine::new(receiver, mode),
            include_all,
        })
    }
}
