use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid host `{host}`: {source}")]
	InvalidHost {
		host: String,
		source: std::net::AddrParseError,
	},
}

/// Command line options for the `pathway` server.
#[derive(Debug, Clone, Parser)]
#[command(name = "pathway", version, about = "Serves the storefront routes over HTTP")]
pub struct Config {
	/// Address to listen on
	#[arg(long, default_value = "0.0.0.0")]
	pub host: String,

	/// Port to listen on
	#[arg(short, long, default_value_t = 4000)]
	pub port: u16,

	/// Log filter used when `RUST_LOG` is unset
	#[arg(long, default_value = "pathway=info")]
	pub log: String,
}

impl Config {
	pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
		let ip: IpAddr = self.host.parse().map_err(|source| ConfigError::InvalidHost {
			host: self.host.clone(),
			source,
		})?;
		Ok(SocketAddr::new(ip, self.port))
	}
}
