use anyhow::Result;
use clap::Parser;
use pod_requirements::app;
use pod_requirements::config::Cli;
use utils::version;

#[tokio::main]
async fn main() -> Result<()> {
    utils::logging::install_panic_hook();

    let cli = Cli::parse();
    utils::logging::init(cli.log_level);

    tracing::info!("Starting pod-requirements {}", &**version::VERSION);

    let report = app::run(&cli).await?;
    println!("{report}");

    Ok(())
}
