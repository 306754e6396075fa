//! Chain configuration and status models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Token;

/// Ledger semantics class an adapter implementation targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ChainFamily {
	/// Account-based EVM-style chains (Ethereum, Base, BSC, ...)
	Evm,
	/// Object-based ledgers (Sui-style)
	ObjectLedger,
	/// Account-model ledgers (Solana-style)
	AccountLedger,
}

/// Native currency descriptor for a chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NativeCurrency {
	pub name: String,
	pub symbol: String,
	pub decimals: u8,
}

/// Static network metadata for one chain
///
/// Loaded at process start and owned by the chain registry; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
	/// Logical chain identifier (e.g. "ethereum", "solana")
	pub chain_id: String,
	/// Human-readable name
	pub name: String,
	/// Ledger family this chain belongs to
	pub family: ChainFamily,
	pub native_currency: NativeCurrency,
	/// RPC endpoints; first is primary, the rest are failover
	pub rpc_urls: Vec<String>,
	pub explorer_url: String,
	pub enabled: bool,
	/// Well-known tokens resolvable without network I/O
	#[serde(default)]
	pub tokens: Vec<Token>,
}

impl ChainConfig {
	/// Token record for the chain's native currency
	pub fn native_token(&self) -> Token {
		Token {
			address: Token::NATIVE_ADDRESS.to_string(),
			chain_id: self.chain_id.clone(),
			symbol: self.native_currency.symbol.clone(),
			name: self.native_currency.name.clone(),
			decimals: self.native_currency.decimals,
			logo_uri: None,
			is_native: true,
			is_verified: true,
		}
	}
}

/// Result of a chain liveness probe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStatus {
	pub chain_id: String,
	pub healthy: bool,
	/// Latest block / checkpoint / slot number, family-dependent
	pub latest_block: Option<u64>,
	pub latency_ms: u64,
	pub checked_at: DateTime<Utc>,
}
