use anyhow::Context;
use bilancio_config::BilancioConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<BilancioConfig> {
    let config = BilancioConfig::load_with_dotenv().context("failed to load configuration")?;
    apply_overrides(config, flags)
}

fn apply_overrides(mut config: BilancioConfig, flags: &GlobalFlags) -> anyhow::Result<BilancioConfig> {
    if let Some(base_url) = &flags.base_url {
        config.api.base_url.clone_from(base_url);
        config
            .api
            .validate()
            .with_context(|| format!("invalid --base-url '{base_url}'"))?;
    }
    tracing::debug!(
        endpoint = %config.api.analyze_url(),
        timeout_secs = config.api.timeout_secs,
        "configuration loaded"
    );
    Ok(config)
}
