use bilancio_core::indices::CATALOGUE;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `bilancio indices`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&CATALOGUE, flags.format)
}
