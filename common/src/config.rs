//! Configuration loaded from environment variables.

use std::env;

use thiserror::Error;

use crate::calculations::DEFAULT_INVESTMENT_COST;

pub const DEFAULT_DATABASE_PATH: &str = "./data/roi.db";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
	/// Port the HTTP server listens on.
	pub port: u16,
	/// SQLite database file, ignored by the memory backend.
	pub database_path: String,
	/// Investment cost ROI and payback are measured against.
	pub investment_cost: f64,
	/// Replace the submitted improvement percentages with the industry default
	/// before computing results.
	pub industry_defaults: bool,
}

impl Config {
	pub fn with_port(port: u16) -> Self {
		Self {
			port,
			database_path: DEFAULT_DATABASE_PATH.to_string(),
			investment_cost: DEFAULT_INVESTMENT_COST,
			industry_defaults: true,
		}
	}

	/// Load configuration from the environment, reading `.env` first if present.
	///
	/// | Variable | Description | Default |
	/// |----------|-------------|---------|
	/// | `ROI_PORT` | Listen port | `default_port` |
	/// | `ROI_DATABASE_PATH` | SQLite database file | `./data/roi.db` |
	/// | `ROI_INVESTMENT_COST` | Investment cost | `50000` |
	/// | `ROI_INDUSTRY_DEFAULTS` | Apply industry improvement defaults | `true` |
	pub fn from_env(default_port: u16) -> Result<Self, ConfigError> {
		let _ = dotenvy::dotenv();
		Self::from_lookup(default_port, |key| env::var(key).ok())
	}

	fn from_lookup<F>(default_port: u16, lookup: F) -> Result<Self, ConfigError>
		where F: Fn(&str) -> Option<String>
	{
		let mut config = Self::with_port(default_port);

		if let Some(port) = lookup("ROI_PORT") {
			config.port = port
				.trim()
				.parse()
				.map_err(|_| ConfigError::Invalid { key: "ROI_PORT", value: port })?;
		}

		if let Some(path) = lookup("ROI_DATABASE_PATH") {
			if path.trim().is_empty() {
				return Err(ConfigError::Invalid { key: "ROI_DATABASE_PATH", value: path });
			}
			config.database_path = path;
		}

		if let Some(cost) = lookup("ROI_INVESTMENT_COST") {
			config.investment_cost = match cost.trim().parse::<f64>() {
				Ok(value) if value.is_finite() && value > 0.0 => value,
				_ => {
					return Err(ConfigError::Invalid { key: "ROI_INVESTMENT_COST", value: cost });
				}
			};
		}

		if let Some(flag) = lookup("ROI_INDUSTRY_DEFAULTS") {
			config.industry_defaults = match flag.trim().to_ascii_lowercase().as_str() {
				"1" | "true" | "yes" | "on" => true,
				"0" | "false" | "no" | "off" => false,
				_ => {
					return Err(ConfigError::Invalid { key: "ROI_INDUSTRY_DEFAULTS", value: flag });
				}
			};
		}

		Ok(config)
	}
}

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid value for {key}: {value:?}")]
	Invalid {
		key: &'static str,
		value: String,
	},
}
