pub mod config;

use std::io::{self, IsTerminal};
use std::time::SystemTime;

use anyhow::{Context, Result};
use config::{LogTarget, LogsConfig};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

pub fn init(cfg: &LogsConfig) -> Result<()> {
    let level = LevelFilter::from(cfg.level);
    let is_terminal = match cfg.target {
        LogTarget::Stdout => io::stdout().is_terminal(),
        LogTarget::Stderr => io::stderr().is_terminal(),
    };

    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .debug(Color::Magenta);

    let dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            if is_terminal {
                out.finish(format_args!(
                    "{} [{}] {}",
                    humantime::format_rfc3339_millis(SystemTime::now()),
                    colors.color(record.level()),
                    message
                ))
            } else {
                out.finish(format_args!(
                    "{} [{}] {}",
                    humantime::format_rfc3339_millis(SystemTime::now()),
                    record.level(),
                    message
                ))
            }
        })
        .level(level);

    let dispatch = match cfg.target {
        LogTarget::Stdout => dispatch.chain(io::stdout()),
        LogTarget::Stderr => dispatch.chain(io::stderr()),
    };
    dispatch.apply().context("init logger")?;

    Ok(())
}
