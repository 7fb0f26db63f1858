use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::config::AppConfig;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by layering TOML and environment
    /// variables over the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from("config/Config.toml")
    }

    /// Same layering as [`load`](Self::load) with an explicit TOML path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from(path: &str) -> Result<AppConfig> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("CATALYST_").split("__"))
            .extract()?;

        Ok(config)
    }
}
