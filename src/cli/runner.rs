//! CLI runner - executes commands

use super::commands::{Cli, Commands, ListArgs};
use super::server::{self, ApiResponse, ListingBody};
use crate::config::GatewayConfig;
use crate::error::{Error, Result};
use crate::gateway::{Gateway, ListQuery};
use crate::types::ResourceKind;
use std::net::{IpAddr, SocketAddr};

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
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Serve { .. } => self.serve(config).await,
            Commands::Songs(args) => self.list(&config, ResourceKind::Songs, args).await,
            Commands::Albums(args) => self.list(&config, ResourceKind::Albums, args).await,
            Commands::Config => {
                print!("{}", config.to_yaml()?);
                Ok(())
            }
        }
    }

    /// Resolve file, environment and command-line settings
    fn load_config(&self) -> Result<GatewayConfig> {
        let mut config = GatewayConfig::load(self.cli.config.as_deref())?;

        if let Some(url) = &self.cli.upstream_url {
            config.upstream.base_url.clone_from(url);
        }
        if let Commands::Serve { host, port } = &self.cli.command {
            if let Some(host) = host {
                config.server.host.clone_from(host);
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }

        config.validate()?;
        Ok(config)
    }

    async fn serve(&self, config: GatewayConfig) -> Result<()> {
        let ip: IpAddr = config.server.host.parse().map_err(|e| {
            Error::invalid_config("server.host", format!("'{}': {e}", config.server.host))
        })?;
        let addr = SocketAddr::new(ip, config.server.port);

        let gateway = Gateway::from_config(&config)?;
        server::serve(gateway, addr).await
    }

    async fn list(
        &self,
        config: &GatewayConfig,
        kind: ResourceKind,
        args: &ListArgs,
    ) -> Result<()> {
        let gateway = Gateway::from_config(config)?;
        let query = ListQuery {
            page: args.page,
            sort_by: Some(args.sort_by),
            sort_order: Some(args.sort_order),
        };

        let listing = tokio::select! {
            listing = gateway.list(kind, &args.artist_id, query) => listing?,
            _ = tokio::signal::ctrl_c() => {
                return Err(Error::Other("Interrupted".to_string()));
            }
        };

        let response = ApiResponse::success(ListingBody::project(kind, listing));
        let output = if args.pretty {
            serde_json::to_string_pretty(&response)?
        } else {
            serde_json::to_string(&response)?
        };
        println!("{output}");
        Ok(())
    }
}
