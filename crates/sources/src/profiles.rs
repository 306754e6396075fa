//! Built-in venue profiles
//!
//! The default venue set per chain family. EVM chains get a swap-API
//! aggregator and a router API; object/account chains get their dominant
//! router. All of these are plain data: adding or tuning a venue touches
//! nothing but this table.

use chainhopper_types::{ChainConfig, ChainFamily};

use crate::venue::{VenueProfile, WireFormat};

/// Default venues for one chain
pub fn builtin_profiles(chain: &ChainConfig) -> Vec<VenueProfile> {
	let chain_id = chain.chain_id.as_str();
	match chain.family {
		ChainFamily::Evm => vec![
			VenueProfile::new(
				"zeroex",
				chain_id,
				format!("https://api.0x.org/swap/{}", chain_id),
				WireFormat::SwapApi,
				"0xDef1C0ded9bec7F1a1670819833240f027b25EfF",
			)
			.with_fallback_gas(150_000)
			.with_haircut_bps(100),
			VenueProfile::new(
				"openocean",
				chain_id,
				format!("https://open-api.openocean.finance/v3/{}", chain_id),
				WireFormat::SwapApi,
				"0x6352a56caadC4F1E25CD6c75970Fa768A3304e64",
			)
			.with_fallback_gas(180_000)
			.with_haircut_bps(150),
		],
		ChainFamily::ObjectLedger => vec![VenueProfile::new(
			"cetus",
			chain_id,
			"https://api-sui.cetus.zone/router_v2",
			WireFormat::RouterApi,
			"0x2eeaab51b80c9b5f9f8e1bfd0ac6d4b8c66d22a1d52c9da9e769c3bf9e3eeca1",
		)
		.with_fallback_gas(1_500_000)
		.with_haircut_bps(150)
		.with_fee_bps(20)],
		ChainFamily::AccountLedger => vec![VenueProfile::new(
			"jupiter",
			chain_id,
			"https://quote-api.jup.ag/v6",
			WireFormat::RouterApi,
			"JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4",
		)
		.with_fallback_gas(200_000)
		.with_haircut_bps(100)],
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chainhopper_config::ChainRegistry;

	#[test]
	fn test_profiles_scoped_to_their_chain() {
		let chains = ChainRegistry::builtin();
		for chain in chains.all() {
			let profiles = builtin_profiles(chain);
			assert!(!profiles.is_empty());
			for profile in profiles {
				assert_eq!(profile.chain_id, chain.chain_id);
				assert!(profile.haircut_bps > 0);
				assert!(profile.fallback_gas > 0);
			}
		}
	}

	#[test]
	fn test_evm_chains_have_multiple_venues() {
		let chains = ChainRegistry::builtin();
		let eth = chains.get("ethereum").unwrap();
		assert!(builtin_profiles(eth).len() >= 2);
	}
}
