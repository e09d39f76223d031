use std::path::{Path, PathBuf};
use std::{env, fs, io};

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

pub trait CommonConfig {
    fn default() -> Self;
    fn complete(&mut self) -> Result<()>;
}

/// Where a config was read from. `Missing` means the file did not exist and
/// defaults were used instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
}

/// Resolves the config file path: the explicit path if given, then
/// `$ECHOIP_CONFIG`, then `~/.config/echoip/server.toml`.
pub fn config_path(path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = path {
        return Ok(path);
    }
    if let Ok(path) = env::var("ECHOIP_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    Ok(home_dir()?
        .join(".config")
        .join("echoip")
        .join("server.toml"))
}

/// Loads a config from a toml file, falling back to [`CommonConfig::default`]
/// when the file does not exist. The returned config is not completed yet, so
/// callers can apply overrides before validation.
pub fn load_config<T>(path: &Path) -> Result<(T, ConfigSource)>
where
    T: CommonConfig + DeserializeOwned,
{
    match fs::read_to_string(path) {
        Ok(s) => {
            let cfg: T = toml::from_str(&s)
                .with_context(|| format!("parse config file '{}' toml", path.display()))?;
            Ok((cfg, ConfigSource::File(path.to_path_buf())))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Ok((T::default(), ConfigSource::Missing(path.to_path_buf())))
        }
        Err(err) => {
            Err(err).with_context(|| format!("read config file '{}'", path.display()))
        }
    }
}

/// See: [`shellexpand::full`].
pub fn expandenv(name: &str, s: impl AsRef<str>) -> Result<String> {
    let s =
        shellexpand::full(s.as_ref()).with_context(|| format!("expand env value for '{name}'"))?;
    Ok(s.to_string())
}

fn home_dir() -> Result<PathBuf> {
    let dir = env::var_os("HOME") // Unix/Linux/macOS
        .or_else(|| env::var_os("USERPROFILE")) // Windows
        .map(PathBuf::from);
    match dir {
        Some(dir) => Ok(dir),
        None => {
            bail!("could not determine home directory, please specify config path manually")
        }
    }
}
