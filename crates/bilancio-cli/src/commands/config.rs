use bilancio_config::BilancioConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ConfigResponse<'a> {
    analyze_url: String,
    timeout_secs: u64,
    user_agent: &'a str,
    export_format: String,
    output_dir: String,
}

/// Handle `bilancio config`.
pub fn handle(config: &BilancioConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&summarize(config), flags.format)
}

fn summarize(config: &BilancioConfig) -> ConfigResponse<'_> {
    ConfigResponse {
        analyze_url: config.api.analyze_url(),
        timeout_secs: config.api.timeout_secs,
        user_agent: &config.api.user_agent,
        export_format: config.export.format.to_string(),
        output_dir: config.export.output_dir.display().to_string(),
    }
}
