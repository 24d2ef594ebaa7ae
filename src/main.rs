use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    modpack_assembler::run(modpack_assembler::Cli::parse()).await
}
