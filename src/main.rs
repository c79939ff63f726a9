use anyhow::Result;
use clap::Parser;

use joblog::cli::{Cli, Command};
use joblog::commands::{ReportTarget, run_report};
use joblog::config::JoblogConfig;
use joblog::logging::init_logging;
use joblog::server;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => JoblogConfig::load_from(path)?,
        None => JoblogConfig::load()?,
    };
    if let Some(rollover) = cli.rollover {
        config.rollover = rollover.into();
    }
    let pipeline = config.pipeline()?;

    match cli.command {
        Command::Report {
            file,
            out_dir,
            format,
            stdout,
        } => {
            let target = if stdout {
                ReportTarget::Stdout
            } else {
                ReportTarget::Directory(out_dir.unwrap_or(config.output_dir))
            };
            run_report(&pipeline, &file, format, &target)?;
        }
        Command::Serve { bind } => {
            let bind = bind.unwrap_or(config.bind);
            server::serve(pipeline, &bind).await?;
        }
    }

    Ok(())
}
