use anyhow::{Context, Result};
use clap::Parser;
use pathway::{config::Config, hyper::Server, storefront};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "failed to listen for ctrl-c");
	}
	tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
	let config = Config::parse();

	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log)))
		.with(tracing_subscriber::fmt::layer())
		.init();

	let addr = config.addr()?;
	let router = storefront::router().context("registering storefront routes")?;

	let server = Server::try_bind(&addr)
		.with_context(|| format!("binding {}", addr))?
		.serve(router);
	tracing::info!(%addr, "Your server is running on port {}!", config.port);

	server.with_graceful_shutdown(shutdown_signal()).await?;
	Ok(())
}
