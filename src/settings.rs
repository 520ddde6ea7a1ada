use std::{env, fs};

use anyhow::Context;
use curve_fit::config::FitConfig;
use log::info;

/// Environment variable holding the path to a JSON run configuration.
const CONFIG_ENV: &str = "FIT_CONFIG";
/// Environment variable overriding the configured seed.
const SEED_ENV: &str = "FIT_SEED";

/// Loads the run configuration from the first CLI argument or `FIT_CONFIG`, falling back to the
/// defaults.
pub fn load() -> anyhow::Result<FitConfig> {
    let path = env::args().nth(1).or_else(|| env::var(CONFIG_ENV).ok());
    let seed = env::var(SEED_ENV).ok();

    let json = match &path {
        Some(path) => {
            info!("reading configuration from {path}");
            Some(fs::read_to_string(path).with_context(|| format!("cannot read '{path}'"))?)
        }
        None => None,
    };

    resolve(json.as_deref(), seed.as_deref())
}

fn resolve(json: Option<&str>, seed: Option<&str>) -> anyhow::Result<FitConfig> {
    let mut config = match json {
        Some(json) => FitConfig::from_json(json)?,
        None => FitConfig::default(),
    };

    if let Some(seed) = seed {
        let seed = seed
            .parse()
            .with_context(|| format!("{SEED_ENV} must be an unsigned integer, got '{seed}'"))?;
        config.seed = Some(seed);
    }

    Ok(config)
}
