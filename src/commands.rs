use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;

use crate::core::assembler::Assembler;
use crate::core::error::{AssemblerError, AssemblerResult};
use crate::core::modpack::{ModpackManager, Side};
use crate::core::progress::ProgressReporter;
use crate::core::settings::{default_data_dir, AssemblerSettings};

/// Which archives to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    Client,
    Server,
    /// Client, then server.
    All,
}

#[derive(Debug, Parser)]
#[command(name = "modpack-assembler")]
#[command(author, version, about = "Assemble client and server archives of a modpack release", long_about = None)]
pub struct Cli {
    /// Release to assemble, as named in `releases/<name>.json`
    pub release: String,

    /// Archives to build
    #[arg(short, long, value_enum, default_value = "all")]
    pub side: SideArg,

    /// Data directory holding settings, pack files, cache and output
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Log every file added to the archive
    #[arg(short, long)]
    pub verbose: bool,
}

/// Logs task progress in steps of ten percent.
#[derive(Debug, Default)]
struct LogProgress {
    next_step: u32,
}

impl ProgressReporter for LogProgress {
    fn task(&mut self, progress: f64, _label: &str) {
        let percent = (progress * 100.0).floor() as u32;
        if percent >= self.next_step {
            info!("Progress: {}%", percent);
            self.next_step = (percent / 10 + 1) * 10;
        }
        if percent >= 100 {
            self.next_step = 0;
        }
    }
}

/// Load the pack and the release named on the command line, then assemble.
pub async fn assemble_release(cli: &Cli) -> AssemblerResult<Vec<PathBuf>> {
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    let settings = AssemblerSettings::load(&data_dir);
    info!("Using data directory {:?}", data_dir);

    let manager = ModpackManager::load(&settings.pack_dir).await?;
    let release = manager.load_release(&cli.release).await?;
    let side = cli.side;
    let verbose = cli.verbose;

    // Zip writing is blocking IO; keep it off the runtime threads.
    tokio::task::spawn_blocking(move || -> AssemblerResult<Vec<PathBuf>> {
        let assembler = Assembler::new(&manager, &release, &settings);
        let mut progress = LogProgress::default();
        match side {
            SideArg::Client => Ok(vec![assembler.assemble(Side::Client, verbose, &mut progress)?]),
            SideArg::Server => Ok(vec![assembler.assemble(Side::Server, verbose, &mut progress)?]),
            SideArg::All => assembler.assemble_all(verbose, &mut progress),
        }
    })
    .await
    .map_err(|e| AssemblerError::Other(format!("Assembly task failed: {e}")))?
}
