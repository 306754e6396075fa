//! Chain adapter contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{self, Amount, AmountError, ChainConfig, ChainFamily, ChainStatus, Token};
use crate::quotes::{AggregatedQuote, SwapRequest, TransactionReceipt, UnsignedTransaction};

pub mod errors;

pub use errors::{AdapterError, AdapterResult};

/// Balance of one token for one owner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
	pub token: String,
	pub amount: Amount,
}

/// Uniform capability contract over one chain's network client
///
/// One adapter instance exists per enabled chain. Callers never branch on
/// chain family: reads delegate to the family's RPC client, quoting and
/// transaction building delegate to the shared aggregator, and utility
/// operations are pure.
#[async_trait]
pub trait ChainAdapter: Send + Sync {
	/// Static configuration for this adapter's chain
	fn config(&self) -> &ChainConfig;

	fn chain_id(&self) -> &str {
		&self.config().chain_id
	}

	fn family(&self) -> ChainFamily {
		self.config().family
	}

	/// Resolve a token by address or symbol; `Ok(None)` when unknown
	async fn get_token(&self, identifier: &str) -> AdapterResult<Option<Token>>;

	/// Balance of one token (native sentinel included) for `owner`
	///
	/// An unresolvable token reports zero; a malformed owner address is an
	/// error before any network call.
	async fn get_token_balance(&self, owner: &str, token: &str) -> AdapterResult<Amount>;

	/// Balances for several tokens; unresolvable entries report zero
	async fn get_token_balances(
		&self,
		owner: &str,
		tokens: &[String],
	) -> AdapterResult<Vec<TokenBalance>>;

	/// Indicative USD price; `Ok(None)` when no estimate exists
	async fn get_token_price(&self, identifier: &str) -> AdapterResult<Option<f64>>;

	/// Liveness probe; a failed probe triggers RPC failover
	async fn health_check(&self) -> AdapterResult<ChainStatus>;

	/// Best quote across this chain's registered venues
	async fn get_quote(&self, request: &SwapRequest) -> AdapterResult<AggregatedQuote>;

	/// Build an unsigned transaction for a previously issued quote
	///
	/// Routing data is re-resolved by a fresh aggregation pass seeded with the
	/// quote's pair and amount; a stale payload is never replayed.
	async fn build_swap_transaction(
		&self,
		quote: &AggregatedQuote,
	) -> AdapterResult<UnsignedTransaction>;

	/// Submit an externally signed transaction; returns the transaction hash
	async fn submit_transaction(&self, signed: &[u8]) -> AdapterResult<String>;

	/// Block until finality is observed or the network client reports failure
	///
	/// Never retries submission; callers needing a bounded wait apply their
	/// own timeout around this call.
	async fn wait_for_confirmation(&self, tx_hash: &str) -> AdapterResult<TransactionReceipt>;

	/// Family-specific address validation, no network I/O
	fn is_valid_address(&self, address: &str) -> bool;

	/// Fixed-point conversion from smallest units to a human string
	fn format_units(&self, amount: &Amount, decimals: u8) -> String {
		models::format_units(amount, decimals)
	}

	/// Fixed-point conversion from a human string to smallest units
	fn parse_units(&self, value: &str, decimals: u8) -> Result<Amount, AmountError> {
		models::parse_units(value, decimals)
	}
}
