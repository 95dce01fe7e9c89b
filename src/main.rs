use clap::Parser;

use vagrant_inventory::cli::{Cli, Mode};
use vagrant_inventory::config;
use vagrant_inventory::inventory;
use vagrant_inventory::logging;
use vagrant_inventory::provider;

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let log_file = logging::init(cli.verbose);

    let settings = config::load_settings(cli.config.as_deref())?;
    if let Some(path) = settings.log_file() {
        if let Err(e) = log_file.attach(path) {
            tracing::warn!(path = %path.display(), "cannot open log file: {e}");
        }
    }

    let provider = provider::create_provider(&settings);

    // Serialize fully before printing so a failure never leaves partial JSON
    let json = match cli.mode() {
        Mode::List => {
            let doc = inventory::build_list(&provider).await?;
            tracing::info!(hosts = doc.vagrants.hosts.len(), "inventory assembled");
            inventory::to_json(&doc, cli.pretty)?
        }
        Mode::Host(name) => {
            let record = inventory::host_details(&provider, &name).await?;
            inventory::to_json(&record, cli.pretty)?
        }
    };

    println!("{json}");
    Ok(())
}
