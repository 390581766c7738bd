use crate::{
    api::server,
    libs::{config::Config, messages::macros::use_tracing_output},
};
use anyhow::Result;
use clap::Args;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "tasklist=info,tower_http=info";

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind, overriding the configured host
    #[arg(long)]
    host: Option<String>,
    /// Port to bind, overriding the configured port
    #[arg(short, long)]
    port: Option<u16>,
}

pub async fn cmd(args: ServeArgs) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
    use_tracing_output();

    let mut settings = Config::load()?.server_settings();
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }

    server::serve(&settings).await
}
