//! Hosting binary: loads the environment, then serves the invocation trigger route.

// crates.io
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
// self
use scenario_relay::{config::RelayConfig, relay::Relay, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	dotenvy::dotenv().ok();

	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::from_default_env())
		.with(tracing_subscriber::fmt::layer())
		.init();

	let config = RelayConfig::from_env()?;
	let relay = Relay::new(config)?;
	let addr = std::env::var("RELAY_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tracing::info!(%addr, "Scenario relay listening.");

	axum::serve(listener, serve::router(relay)).await?;

	Ok(())
}
