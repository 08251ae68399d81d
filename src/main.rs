use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    hbsync::logging::init().context("init logging")?;

    let cli = hbsync::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        hbsync::cli::Command::Load(args) => {
            hbsync::load::run(args).context("load")?;
        }
        hbsync::cli::Command::Extract(args) => {
            hbsync::extract::run(args).context("extract")?;
        }
        hbsync::cli::Command::Keys {
            command: hbsync::cli::KeysCommand::Mint(args),
        } => {
            hbsync::keys::mint(args).context("keys mint")?;
        }
        hbsync::cli::Command::Keys {
            command: hbsync::cli::KeysCommand::Export(args),
        } => {
            hbsync::keys::export(args).context("keys export")?;
        }
    }

    Ok(())
}
