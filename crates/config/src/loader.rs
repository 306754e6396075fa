//! Registry loading from file and environment

use std::collections::HashSet;
use std::path::Path;

use chainhopper_types::ChainConfig;
use thiserror::Error;
use tracing::{info, warn};

use crate::registry::ChainRegistry;

/// Environment variable pointing at a JSON chain table
pub const CONFIG_PATH_ENV: &str = "CHAINHOPPER_CONFIG";

/// Prefix for per-chain RPC overrides, e.g. `CHAINHOPPER_RPC_ETHEREUM`
pub const RPC_OVERRIDE_PREFIX: &str = "CHAINHOPPER_RPC_";

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("Failed to read config file: {0}")]
	Io(#[from] std::io::Error),

	#[error("Failed to parse config file: {0}")]
	Parse(#[from] serde_json::Error),

	#[error("Config contains no chains")]
	Empty,

	#[error("Duplicate chain id in config: {chain_id}")]
	DuplicateChain { chain_id: String },
}

/// Load the chain registry.
///
/// Uses the JSON file named by `CHAINHOPPER_CONFIG` when set, otherwise the
/// built-in table. Either way, `CHAINHOPPER_RPC_<CHAIN>` env vars replace
/// that chain's endpoint list (comma separated, first is primary).
pub fn load_registry() -> Result<ChainRegistry, ConfigError> {
	let mut chains = match std::env::var(CONFIG_PATH_ENV) {
		Ok(path) => {
			info!("Loading chain registry from {}", path);
			read_chains(Path::new(&path))?
		},
		Err(_) => ChainRegistry::builtin().all().to_vec(),
	};

	for chain in &mut chains {
		apply_rpc_override(chain);
	}

	validate_chains(&chains)?;
	info!(
		"Chain registry loaded: {} chains, {} enabled",
		chains.len(),
		chains.iter().filter(|c| c.enabled).count()
	);
	Ok(ChainRegistry::new(chains))
}

/// Load a registry from an explicit JSON file path
pub fn load_from_path(path: &Path) -> Result<ChainRegistry, ConfigError> {
	let chains = read_chains(path)?;
	validate_chains(&chains)?;
	Ok(ChainRegistry::new(chains))
}

fn read_chains(path: &Path) -> Result<Vec<ChainConfig>, ConfigError> {
	let raw = std::fs::read_to_string(path)?;
	let chains: Vec<ChainConfig> = serde_json::from_str(&raw)?;
	Ok(chains)
}

fn validate_chains(chains: &[ChainConfig]) -> Result<(), ConfigError> {
	if chains.is_empty() {
		return Err(ConfigError::Empty);
	}
	let mut seen = HashSet::new();
	for chain in chains {
		if !seen.insert(chain.chain_id.as_str()) {
			return Err(ConfigError::DuplicateChain {
				chain_id: chain.chain_id.clone(),
			});
		}
		if chain.rpc_urls.is_empty() && chain.enabled {
			warn!("Chain {} is enabled but has no RPC endpoints", chain.chain_id);
		}
	}
	Ok(())
}

fn apply_rpc_override(chain: &mut ChainConfig) {
	let var = format!(
		"{}{}",
		RPC_OVERRIDE_PREFIX,
		chain.chain_id.to_uppercase().replace('-', "_")
	);
	if let Ok(urls) = std::env::var(&var) {
		let urls: Vec<String> = urls
			.split(',')
			.map(|u| u.trim().to_string())
			.filter(|u| !u.is_empty())
			.collect();
		if !urls.is_empty() {
			info!(
				"Overriding RPC endpoints for {} from {} ({} endpoints)",
				chain.chain_id,
				var,
				urls.len()
			);
			chain.rpc_urls = urls;
		}
	}
}
