//! Per-chain source registry

use std::collections::HashMap;
use std::sync::Arc;

use chainhopper_config::ChainRegistry;
use chainhopper_types::QuoteSource;
use tracing::{info, warn};

use crate::http_source::HttpVenueSource;
use crate::profiles::builtin_profiles;

/// Registry of quote source plugins keyed by chain id
///
/// Registration order per chain is preserved; the aggregator uses it as the
/// final tie-breaker, so the first registered venue wins exact ties.
#[derive(Debug, Default)]
pub struct SourceRegistry {
	by_chain: HashMap<String, Vec<Arc<dyn QuoteSource>>>,
}

impl SourceRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry populated with the built-in venue profiles for every enabled
	/// chain in `chains`
	pub fn with_defaults(chains: &ChainRegistry) -> Self {
		let mut registry = Self::new();
		for chain in chains.enabled() {
			for profile in builtin_profiles(chain) {
				match HttpVenueSource::new(profile) {
					Ok(source) => registry.register(Arc::new(source)),
					Err(e) => warn!("Skipping venue for {}: {}", chain.chain_id, e),
				}
			}
		}
		info!(
			"Source registry initialized: {} plugins across {} chains",
			registry.total_sources(),
			registry.by_chain.len()
		);
		registry
	}

	pub fn register(&mut self, source: Arc<dyn QuoteSource>) {
		self.by_chain
			.entry(source.chain_id().to_string())
			.or_default()
			.push(source);
	}

	/// Plugins registered for a chain, in registration order
	pub fn for_chain(&self, chain_id: &str) -> &[Arc<dyn QuoteSource>] {
		self.by_chain
			.get(chain_id)
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	pub fn chains(&self) -> impl Iterator<Item = &str> {
		self.by_chain.keys().map(String::as_str)
	}

	pub fn total_sources(&self) -> usize {
		self.by_chain.values().map(Vec::len).sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::venue::{VenueProfile, WireFormat};

	fn source(venue: &str, chain: &str) -> Arc<dyn QuoteSource> {
		Arc::new(
			HttpVenueSource::new(VenueProfile::new(
				venue,
				chain,
				"http://127.0.0.1:9",
				WireFormat::SwapApi,
				"0xrouter",
			))
			.unwrap(),
		)
	}

	#[test]
	fn test_registration_order_preserved() {
		let mut registry = SourceRegistry::new();
		registry.register(source("first", "demo-evm"));
		registry.register(source("second", "demo-evm"));
		registry.register(source("other", "demo-sol"));

		let sources = registry.for_chain("demo-evm");
		assert_eq!(sources.len(), 2);
		assert_eq!(sources[0].name(), "first");
		assert_eq!(sources[1].name(), "second");

		assert!(registry.for_chain("unknown").is_empty());
		assert_eq!(registry.total_sources(), 3);
	}

	#[test]
	fn test_with_defaults_covers_enabled_chains() {
		let chains = ChainRegistry::builtin();
		let registry = SourceRegistry::with_defaults(&chains);

		for chain in chains.enabled() {
			assert!(
				!registry.for_chain(&chain.chain_id).is_empty(),
				"no venues registered for {}",
				chain.chain_id
			);
		}
	}
}
