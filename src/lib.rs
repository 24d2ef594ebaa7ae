mod commands;
pub mod core;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

pub use crate::commands::{Cli, SideArg};
pub use crate::core::assembler::Assembler;
pub use crate::core::error::{AssemblerError, AssemblerResult};
pub use crate::core::modpack::{ModpackManager, Release, Side};
pub use crate::core::progress::{NoProgress, ProgressReporter};
pub use crate::core::settings::AssemblerSettings;

/// Entry point of the command line tool.
pub async fn run(cli: Cli) -> ExitCode {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,modpack_assembler=debug")),
        )
        .init();

    match commands::assemble_release(&cli).await {
        Ok(paths) => {
            for path in paths {
                tracing::info!("Wrote {:?}", path);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Assembly of release '{}' failed: {}", cli.release, e);
            ExitCode::FAILURE
        }
    }
}
