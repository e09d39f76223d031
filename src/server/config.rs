use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::{expandenv, CommonConfig};
use crate::logs::config::LogsConfig;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_bind")]
    pub bind: String,

    /// Zero keeps the actix-web default.
    #[serde(default = "ServerConfig::default_keep_alive_secs")]
    pub keep_alive_secs: u64,

    /// Zero keeps the actix-web default (one worker per physical core).
    #[serde(default = "ServerConfig::default_workers")]
    pub workers: u64,

    #[serde(default = "LogsConfig::default")]
    pub logs: LogsConfig,
}

impl CommonConfig for ServerConfig {
    fn default() -> Self {
        Self {
            bind: Self::default_bind(),
            keep_alive_secs: Self::default_keep_alive_secs(),
            workers: Self::default_workers(),
            logs: LogsConfig::default(),
        }
    }

    fn complete(&mut self) -> Result<()> {
        self.bind = expandenv("bind", &self.bind)?;
        if self.bind.is_empty() {
            bail!("bind cannot be empty");
        }

        if self.keep_alive_secs > Self::MAX_KEEP_ALIVE_SECS {
            bail!(
                "keep_alive_secs must be less than or equal to {}",
                Self::MAX_KEEP_ALIVE_SECS
            );
        }

        if self.workers > Self::MAX_WORKERS {
            bail!(
                "workers must be less than or equal to {}",
                Self::MAX_WORKERS
            );
        }

        self.logs.complete().context("logs")?;

        Ok(())
    }
}

impl ServerConfig {
    const MAX_KEEP_ALIVE_SECS: u64 = 60 * 60;
    const MAX_WORKERS: u64 = 256;

    pub fn default_bind() -> String {
        String::from("127.0.0.1:5000")
    }

    pub fn default_keep_alive_secs() -> u64 {
        0
    }

    pub fn default_workers() -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use crate::logs::config::{LogLevel, LogTarget};

    use super::*;

    #[test]
    fn test_default_config() {
        let mut cfg: ServerConfig = toml::from_str("").unwrap();
        cfg.complete().unwrap();
        assert_eq!(cfg.bind, "127.0.0.1:5000");
        assert_eq!(cfg.keep_alive_secs, 0);
        assert_eq!(cfg.workers, 0);
        assert_eq!(cfg.logs.level, LogLevel::Info);
        assert_eq!(cfg.logs.target, LogTarget::Stdout);
    }

    #[test]
    fn test_parse_config() {
        let s = r#"
            bind = "0.0.0.0:8080"
            keep_alive_secs = 30
            workers = 4

            [logs]
            level = "debug"
        "#;
        let mut cfg: ServerConfig = toml::from_str(s).unwrap();
        cfg.complete().unwrap();
        assert_eq!(cfg.bind, "0.0.0.0:8080");
        assert_eq!(cfg.keep_alive_secs, 30);
        assert_eq!(cfg.workers, 4);
        assert_eq!(cfg.logs.level, LogLevel::Debug);
    }

    #[test]
    fn test_expand_bind() {
        env::set_var("ECHOIP_TEST_PORT", "9123");
        let mut cfg = <ServerConfig as CommonConfig>::default();
        cfg.bind = String::from("127.0.0.1:${ECHOIP_TEST_PORT}");
        cfg.complete().unwrap();
        assert_eq!(cfg.bind, "127.0.0.1:9123");
    }

    #[test]
    fn test_invalid_config() {
        let cases = [
            "bind = \"\"",
            "keep_alive_secs = 3601",
            "workers = 257",
            "bind = \"127.0.0.1:${ECHOIP_TEST_UNDEFINED_VAR}\"",
        ];
        for case in cases {
            let mut cfg: ServerConfig = toml::from_str(case).unwrap();
            assert!(cfg.complete().is_err(), "{case}");
        }
    }
}
