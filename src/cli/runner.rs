//! CLI runner - executes commands

use crate::auth::AuthManager;
use crate::catalog::Catalog;
use crate::cli::commands::{Cli, Commands};
use crate::config::ConfigStore;
use crate::engine::SyncEngine;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::output::MessageWriter;
use crate::state::StateManager;
use crate::streams::{self, TapStream};
use std::path::PathBuf;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Discover { select_all } => Self::discover(*select_all),
            Commands::Sync { catalog, streams } => {
                self.sync(catalog.as_deref(), streams.as_deref()).await
            }
        }
    }

    /// Print a discovery catalog to stdout
    fn discover(select_all: bool) -> Result<()> {
        let catalog = Catalog::discover(select_all);
        let json = serde_json::to_string_pretty(&catalog)?;
        println!("{json}");
        Ok(())
    }

    /// Run a sync over the selected streams
    async fn sync(
        &self,
        catalog: Option<&std::path::Path>,
        stream_filter: Option<&str>,
    ) -> Result<()> {
        let config_path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config file not specified (use -c flag)"))?;
        let store = ConfigStore::open(config_path)?;
        let config = store.config().clone();

        let selected = Self::selected_stream_ids(catalog, stream_filter)?;
        let mut tap_streams = Vec::with_capacity(selected.len());
        for stream_id in &selected {
            let definition = streams::find(stream_id)
                .ok_or_else(|| Error::config(format!("Unknown stream: {stream_id}")))?;
            tap_streams.push(TapStream::from_config(definition, &config)?);
        }

        info!(streams = ?selected, "starting sync");

        let http = HttpClient::new(HttpClientConfig::new(config.base_url()))?;
        let auth = AuthManager::new(store);
        let state = match self.state_path() {
            Some(path) => StateManager::from_file(path)?,
            None => StateManager::in_memory(),
        };
        let writer = MessageWriter::stdout();

        let mut engine = SyncEngine::new(http, auth, state, writer);
        engine.sync(&tap_streams).await?;
        Ok(())
    }

    /// Resolve which streams to sync
    ///
    /// A catalog's selected flags win; otherwise an explicit
    /// comma-separated filter; otherwise every available stream.
    fn selected_stream_ids(
        catalog: Option<&std::path::Path>,
        stream_filter: Option<&str>,
    ) -> Result<Vec<String>> {
        if let Some(path) = catalog {
            let catalog = Catalog::from_file(path)?;
            let selected: Vec<String> = catalog
                .selected_streams()
                .into_iter()
                .map(String::from)
                .collect();
            if selected.is_empty() {
                return Err(Error::config("Catalog selects no streams"));
            }
            return Ok(selected);
        }

        if let Some(filter) = stream_filter {
            let ids: Vec<String> = filter
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if ids.is_empty() {
                return Err(Error::config("No streams given in --streams"));
            }
            return Ok(ids);
        }

        Ok(streams::AVAILABLE_STREAMS
            .iter()
            .map(|def| def.stream_id.to_string())
            .collect())
    }

    fn state_path(&self) -> Option<PathBuf> {
        self.cli.state.clone()
    }
}
