//! ChainHopper Adapters
//!
//! Per-family chain adapters behind the uniform [`ChainAdapter`] contract,
//! plus the factory that instantiates one adapter per enabled chain.

pub mod account;
pub mod engine;
pub mod evm;
pub mod object;
pub mod rpc;

pub use account::AccountLedgerAdapter;
pub use engine::SwapEngine;
pub use evm::EvmAdapter;
pub use object::ObjectLedgerAdapter;
pub use rpc::RpcClient;

use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use chainhopper_config::ChainRegistry;
use chainhopper_sources::SourceRegistry;
use chainhopper_types::{AdapterResult, ChainAdapter, ChainConfig, ChainFamily};

/// Instantiates and caches one adapter per enabled chain
///
/// Adapters are built once at startup and shared; lookups after construction
/// are lock-free reads.
pub struct AdapterFactory {
	adapters: DashMap<String, Arc<dyn ChainAdapter>>,
}

impl AdapterFactory {
	/// Build an adapter for every enabled chain in the registry
	pub fn from_registry(
		chains: &ChainRegistry,
		sources: Arc<SourceRegistry>,
	) -> AdapterResult<Self> {
		let adapters = DashMap::new();
		for config in chains.enabled() {
			let adapter = build_adapter(config.clone(), Arc::clone(&sources))?;
			adapters.insert(config.chain_id.clone(), adapter);
		}
		info!("Adapter factory initialized with {} chains", adapters.len());
		Ok(Self { adapters })
	}

	pub fn get(&self, chain_id: &str) -> Option<Arc<dyn ChainAdapter>> {
		self.adapters.get(chain_id).map(|entry| Arc::clone(&entry))
	}

	pub fn chain_ids(&self) -> Vec<String> {
		self.adapters.iter().map(|entry| entry.key().clone()).collect()
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}

/// Family dispatch happens exactly once, here
fn build_adapter(
	config: ChainConfig,
	sources: Arc<SourceRegistry>,
) -> AdapterResult<Arc<dyn ChainAdapter>> {
	let adapter: Arc<dyn ChainAdapter> = match config.family {
		ChainFamily::Evm => Arc::new(EvmAdapter::new(config, sources)?),
		ChainFamily::ObjectLedger => Arc::new(ObjectLedgerAdapter::new(config, sources)?),
		ChainFamily::AccountLedger => Arc::new(AccountLedgerAdapter::new(config, sources)?),
	};
	Ok(adapter)
}
