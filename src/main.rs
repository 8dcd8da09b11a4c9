//! tfe-datasource - Main entry point

use clap::Parser;
use log::{debug, info};

use tfe_datasource::{
    run_read_command, run_run_command, Cli, Command, HostResolver, TfeClient, TokenResolver,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting tfe-datasource v{}", env!("CARGO_PKG_VERSION"));

    let host = HostResolver::resolve(cli.host.as_deref());
    let token = TokenResolver::new(&host).resolve(cli.token.as_deref())?;

    let mut client = TfeClient::new(token, host);
    client.set_default_org(cli.org.clone());
    debug!(
        "Using host: {}, default organization: {:?}",
        client.host(),
        client.default_org()
    );

    match &cli.command {
        Command::Read { .. } => run_read_command(&client, &cli).await?,
        Command::Run { .. } => run_run_command(&client, &cli).await?,
    }

    info!("Completed successfully");
    Ok(())
}
