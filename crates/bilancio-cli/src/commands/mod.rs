use bilancio_config::BilancioConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod analyze;
pub mod config;
pub mod export;
pub mod indices;
pub mod matching;
pub mod schema;
pub mod shared;
pub mod show;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &BilancioConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Analyze(args) => analyze::handle(&args, config, flags).await,
        Commands::Export(args) => export::handle(&args, config, flags).await,
        Commands::Show(args) => show::handle(&args, flags).await,
        Commands::Config => config::handle(config, flags),
        Commands::Indices | Commands::Matching | Commands::Schema => {
            unreachable!("indices/matching/schema are pre-dispatched in main")
        }
    }
}
