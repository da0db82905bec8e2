use bilancio_core::Dataset;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ShowArgs;
use crate::commands::shared::{dataset_rows, load_response};
use crate::output::output;

/// Handle `bilancio show`.
pub async fn handle(args: &ShowArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let dataset: Dataset = args.dataset.parse()?;
    let response = load_response(&args.response).await?;
    let rows = dataset_rows(&response, dataset, args.year.as_deref(), false)?;
    output(&rows, flags.format)
}
