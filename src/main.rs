use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use echoip::config::{self, CommonConfig, ConfigSource};
use echoip::logs;
use echoip::logs::config::LogLevel;
use echoip::server::config::ServerConfig;
use echoip::server::factory::ServerFactory;
use log::{debug, info, warn};

/// Report the requesting client's IP address and the server time as JSON.
#[derive(Parser, Debug)]
#[command(author, version = env!("ECHOIP_VERSION"), about)]
struct ServerArgs {
    /// The config file path, default is `$ECHOIP_CONFIG` or
    /// `~/.config/echoip/server.toml`.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the server bind address.
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Override the log level.
    #[arg(short, long)]
    pub level: Option<LogLevel>,

    /// Print server configuration data (JSON) and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl ServerArgs {
    fn load_config(&self) -> Result<(ServerConfig, ConfigSource)> {
        let path = config::config_path(self.config.clone())?;
        let (mut cfg, source): (ServerConfig, _) = config::load_config(&path)?;

        if let Some(bind) = &self.bind {
            cfg.bind = bind.clone();
        }
        if let Some(level) = self.level {
            cfg.logs.level = level;
        }

        cfg.complete().context("validate config")?;
        Ok((cfg, source))
    }
}

fn config_json(cfg: &ServerConfig) -> Result<String> {
    serde_json::to_string_pretty(cfg).context("encode config json")
}

async fn run(args: ServerArgs) -> Result<()> {
    let (cfg, source) = args.load_config()?;

    if args.print_config {
        println!("{}", config_json(&cfg)?);
        return Ok(());
    }

    logs::init(&cfg.logs)?;
    match source {
        ConfigSource::File(path) => info!("Load config from '{}'", path.display()),
        ConfigSource::Missing(path) => {
            warn!("Config file '{}' not found, using defaults", path.display())
        }
    }
    debug!("Use config: {:?}", cfg);

    let factory = ServerFactory::new(cfg);
    let srv = factory.build_server();
    srv.run().await.context("run restful server")
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = ServerArgs::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            _ = writeln!(io::stderr(), "Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
