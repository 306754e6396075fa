//! Static chain registry

use chainhopper_types::{ChainConfig, ChainFamily, NativeCurrency, Token};

/// Registry of all known chains, keyed by logical chain id
///
/// Order is preserved: it is the order chains were declared in, and nothing
/// here mutates after construction.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
	chains: Vec<ChainConfig>,
}

impl ChainRegistry {
	pub fn new(chains: Vec<ChainConfig>) -> Self {
		Self { chains }
	}

	/// Registry with the built-in production chain table
	pub fn builtin() -> Self {
		Self::new(builtin_chains())
	}

	pub fn get(&self, chain_id: &str) -> Option<&ChainConfig> {
		self.chains.iter().find(|c| c.chain_id == chain_id)
	}

	pub fn contains(&self, chain_id: &str) -> bool {
		self.get(chain_id).is_some()
	}

	pub fn all(&self) -> &[ChainConfig] {
		&self.chains
	}

	/// Chains with their enabled flag set
	pub fn enabled(&self) -> impl Iterator<Item = &ChainConfig> {
		self.chains.iter().filter(|c| c.enabled)
	}

	pub fn is_empty(&self) -> bool {
		self.chains.is_empty()
	}

	pub fn len(&self) -> usize {
		self.chains.len()
	}
}

fn evm_chain(
	chain_id: &str,
	name: &str,
	symbol: &str,
	currency_name: &str,
	rpc_urls: &[&str],
	explorer_url: &str,
	tokens: Vec<Token>,
) -> ChainConfig {
	ChainConfig {
		chain_id: chain_id.to_string(),
		name: name.to_string(),
		family: ChainFamily::Evm,
		native_currency: NativeCurrency {
			name: currency_name.to_string(),
			symbol: symbol.to_string(),
			decimals: 18,
		},
		rpc_urls: rpc_urls.iter().map(|u| u.to_string()).collect(),
		explorer_url: explorer_url.to_string(),
		enabled: true,
		tokens,
	}
}

fn builtin_chains() -> Vec<ChainConfig> {
	vec![
		evm_chain(
			"ethereum",
			"Ethereum",
			"ETH",
			"Ether",
			&[
				"https://eth.llamarpc.com",
				"https://rpc.ankr.com/eth",
				"https://ethereum-rpc.publicnode.com",
			],
			"https://etherscan.io",
			vec![
				Token::new(
					"0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
					"ethereum",
					"USDC",
					"USD Coin",
					6,
				)
				.verified(),
				Token::new(
					"0xdAC17F958D2ee523a2206206994597C13D831ec7",
					"ethereum",
					"USDT",
					"Tether USD",
					6,
				)
				.verified(),
				Token::new(
					"0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
					"ethereum",
					"WETH",
					"Wrapped Ether",
					18,
				)
				.verified(),
				Token::new(
					"0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599",
					"ethereum",
					"WBTC",
					"Wrapped Bitcoin",
					8,
				)
				.verified(),
			],
		),
		evm_chain(
			"base",
			"Base",
			"ETH",
			"Ether",
			&["https://mainnet.base.org", "https://base.llamarpc.com"],
			"https://basescan.org",
			vec![Token::new(
				"0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
				"base",
				"USDC",
				"USD Coin",
				6,
			)
			.verified()],
		),
		evm_chain(
			"bsc",
			"BNB Smart Chain",
			"BNB",
			"BNB",
			&[
				"https://bsc-dataseed.binance.org",
				"https://bsc-dataseed1.defibit.io",
			],
			"https://bscscan.com",
			vec![Token::new(
				"0x8AC76a51cc950d9822D68b83fE1Ad97B32Cd580d",
				"bsc",
				"USDC",
				"USD Coin",
				18,
			)
			.verified()],
		),
		ChainConfig {
			chain_id: "sui".to_string(),
			name: "Sui".to_string(),
			family: ChainFamily::ObjectLedger,
			native_currency: NativeCurrency {
				name: "Sui".to_string(),
				symbol: "SUI".to_string(),
				decimals: 9,
			},
			rpc_urls: vec![
				"https://fullnode.mainnet.sui.io".to_string(),
				"https://sui-mainnet-rpc.allthatnode.com".to_string(),
			],
			explorer_url: "https://suiscan.xyz".to_string(),
			enabled: true,
			tokens: vec![Token::new(
				"0x5d4b302506645c37ff133b98c4b50a5ae14841659738d6d733d59d0d217a93bf::coin::COIN",
				"sui",
				"USDC",
				"USD Coin",
				6,
			)
			.verified()],
		},
		ChainConfig {
			chain_id: "solana".to_string(),
			name: "Solana".to_string(),
			family: ChainFamily::AccountLedger,
			native_currency: NativeCurrency {
				name: "Solana".to_string(),
				symbol: "SOL".to_string(),
				decimals: 9,
			},
			rpc_urls: vec![
				"https://api.mainnet-beta.solana.com".to_string(),
				"https://solana-rpc.publicnode.com".to_string(),
			],
			explorer_url: "https://solscan.io".to_string(),
			enabled: true,
			tokens: vec![Token::new(
				"EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
				"solana",
				"USDC",
				"USD Coin",
				6,
			)
			.verified()],
		},
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builtin_registry_lookup() {
		let registry = ChainRegistry::builtin();

		let eth = registry.get("ethereum").unwrap();
		assert_eq!(eth.family, ChainFamily::Evm);
		assert_eq!(eth.native_currency.decimals, 18);
		assert!(!eth.rpc_urls.is_empty());

		assert_eq!(
			registry.get("solana").unwrap().family,
			ChainFamily::AccountLedger
		);
		assert_eq!(registry.get("sui").unwrap().family, ChainFamily::ObjectLedger);
		assert!(registry.get("unknown-chain").is_none());
	}

	#[test]
	fn test_builtin_tokens_carry_owning_chain() {
		let registry = ChainRegistry::builtin();
		for chain in registry.all() {
			for token in &chain.tokens {
				assert_eq!(token.chain_id, chain.chain_id);
			}
		}
	}

	#[test]
	fn test_enabled_filter() {
		let mut chains = builtin_chains();
		chains[0].enabled = false;
		let registry = ChainRegistry::new(chains);

		assert!(registry.enabled().all(|c| c.chain_id != "ethereum"));
		assert!(registry.contains("ethereum"));
	}
}
