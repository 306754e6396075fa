//! Adapter for account-model ledgers (Solana-style)

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use chainhopper_config::usd_estimate;
use chainhopper_sources::SourceRegistry;
use chainhopper_types::{
	AdapterError, AdapterResult, AggregatedQuote, Amount, ChainAdapter, ChainConfig, ChainStatus,
	SwapRequest, Token, TokenBalance, TransactionReceipt, TxStatus, UnsignedTransaction,
};

use crate::engine::SwapEngine;
use crate::rpc::RpcClient;

/// Compute-unit price floor in micro-lamports
const FALLBACK_COMPUTE_UNIT_PRICE: u64 = 1;

const CONFIRMATION_POLL_MS: u64 = 1_000;

pub struct AccountLedgerAdapter {
	engine: SwapEngine,
	rpc: RpcClient,
}

impl AccountLedgerAdapter {
	pub fn new(config: ChainConfig, sources: Arc<SourceRegistry>) -> AdapterResult<Self> {
		let rpc = RpcClient::new(config.chain_id.clone(), config.rpc_urls.clone())?;
		Ok(Self {
			engine: SwapEngine::new(config, sources),
			rpc,
		})
	}

	/// Recent median-ish prioritization fee, or the floor when the node has no
	/// samples
	async fn compute_unit_price(&self) -> Amount {
		let fees = match self
			.rpc
			.call("getRecentPrioritizationFees", json!([[]]))
			.await
		{
			Ok(Value::Array(fees)) => fees,
			Ok(_) | Err(_) => {
				return Amount::from(FALLBACK_COMPUTE_UNIT_PRICE);
			},
		};

		let mut samples: Vec<u64> = fees
			.iter()
			.filter_map(|entry| entry.get("prioritizationFee").and_then(Value::as_u64))
			.filter(|fee| *fee > 0)
			.collect();
		if samples.is_empty() {
			return Amount::from(FALLBACK_COMPUTE_UNIT_PRICE);
		}
		samples.sort_unstable();
		Amount::from(samples[samples.len() / 2])
	}

	async fn native_balance(&self, owner: &str) -> AdapterResult<Amount> {
		let result = self.rpc.call("getBalance", json!([owner])).await?;
		result
			.get("value")
			.and_then(Value::as_u64)
			.map(Amount::from)
			.ok_or_else(|| AdapterError::Rpc {
				reason: "balance response missing value".to_string(),
			})
	}

	/// Sum the holdings of every token account the owner has for `mint`
	async fn spl_balance(&self, owner: &str, mint: &str) -> AdapterResult<Amount> {
		let result = self
			.rpc
			.call(
				"getTokenAccountsByOwner",
				json!([owner, { "mint": mint }, { "encoding": "jsonParsed" }]),
			)
			.await?;
		let accounts = result
			.get("value")
			.and_then(Value::as_array)
			.ok_or_else(|| AdapterError::Rpc {
				reason: "token accounts response missing value".to_string(),
			})?;

		let mut total = Amount::zero();
		for account in accounts {
			let raw = account
				.pointer("/account/data/parsed/info/tokenAmount/amount")
				.and_then(Value::as_str)
				.unwrap_or("0");
			let amount = Amount::from_decimal_str(raw).map_err(|_| AdapterError::Rpc {
				reason: format!("invalid token amount: {}", raw),
			})?;
			total = total.checked_add(&amount).ok_or_else(|| AdapterError::Rpc {
				reason: "token balance overflow".to_string(),
			})?;
		}
		Ok(total)
	}

	fn require_address(&self, address: &str) -> AdapterResult<()> {
		if self.is_valid_address(address) {
			Ok(())
		} else {
			Err(AdapterError::InvalidAddress {
				chain_id: self.chain_id().to_string(),
				address: address.to_string(),
			})
		}
	}
}

#[async_trait]
impl ChainAdapter for AccountLedgerAdapter {
	fn config(&self) -> &ChainConfig {
		self.engine.config()
	}

	async fn get_token(&self, identifier: &str) -> AdapterResult<Option<Token>> {
		Ok(self.engine.resolve_token(identifier))
	}

	async fn get_token_balance(&self, owner: &str, token: &str) -> AdapterResult<Amount> {
		self.require_address(owner)?;
		let token = match self.engine.resolve_token(token) {
			Some(token) => token,
			None => return Ok(Amount::zero()),
		};
		if token.is_native {
			self.native_balance(owner).await
		} else {
			self.spl_balance(owner, &token.address).await
		}
	}

	async fn get_token_balances(
		&self,
		owner: &str,
		tokens: &[String],
	) -> AdapterResult<Vec<TokenBalance>> {
		self.require_address(owner)?;
		let mut balances = Vec::with_capacity(tokens.len());
		for identifier in tokens {
			balances.push(TokenBalance {
				token: identifier.clone(),
				amount: self.get_token_balance(owner, identifier).await?,
			});
		}
		Ok(balances)
	}

	async fn get_token_price(&self, identifier: &str) -> AdapterResult<Option<f64>> {
		Ok(self
			.engine
			.resolve_token(identifier)
			.and_then(|token| usd_estimate(&token.symbol)))
	}

	async fn health_check(&self) -> AdapterResult<ChainStatus> {
		let started = Instant::now();
		let probe = self.rpc.call("getSlot", json!([])).await;
		let latency_ms = started.elapsed().as_millis() as u64;

		let latest_block = match probe {
			Ok(value) => value.as_u64(),
			Err(e) => {
				warn!("Health probe failed on {}: {}", self.chain_id(), e);
				None
			},
		};
		Ok(ChainStatus {
			chain_id: self.chain_id().to_string(),
			healthy: latest_block.is_some(),
			latest_block,
			latency_ms,
			checked_at: Utc::now(),
		})
	}

	async fn get_quote(&self, request: &SwapRequest) -> AdapterResult<AggregatedQuote> {
		let gas_price = self.compute_unit_price().await;
		self.engine.get_quote(request, gas_price).await
	}

	async fn build_swap_transaction(
		&self,
		quote: &AggregatedQuote,
	) -> AdapterResult<UnsignedTransaction> {
		let gas_price = self.compute_unit_price().await;
		// Compute budget requests are exact-or-fail; pad by 10%
		self.engine
			.rebuild_transaction(quote, gas_price, |estimate| estimate + estimate / 10)
			.await
	}

	async fn submit_transaction(&self, signed: &[u8]) -> AdapterResult<String> {
		let encoded = bs58::encode(signed).into_string();
		let result = self
			.rpc
			.call("sendTransaction", json!([encoded, { "encoding": "base58" }]))
			.await
			.map_err(|e| AdapterError::Submission {
				reason: e.to_string(),
			})?;
		let signature = result
			.as_str()
			.ok_or_else(|| AdapterError::Submission {
				reason: "node returned a non-string signature".to_string(),
			})?
			.to_string();
		info!("Submitted transaction {} on {}", signature, self.chain_id());
		Ok(signature)
	}

	/// Polls until the signature reaches finality or the RPC client reports
	/// failure; callers wanting a bounded wait wrap this in their own timeout
	async fn wait_for_confirmation(&self, tx_hash: &str) -> AdapterResult<TransactionReceipt> {
		loop {
			let result = self
				.rpc
				.call(
					"getSignatureStatuses",
					json!([[tx_hash], { "searchTransactionHistory": true }]),
				)
				.await?;
			let status = result.pointer("/value/0").cloned().unwrap_or(Value::Null);

			if !status.is_null() {
				let finalized = status
					.get("confirmationStatus")
					.and_then(Value::as_str)
					.map(|s| s == "finalized")
					.unwrap_or(false);
				if finalized {
					let failed = status.get("err").map(|e| !e.is_null()).unwrap_or(false);
					let status_kind = if failed {
						TxStatus::Failed
					} else {
						TxStatus::Confirmed
					};
					debug!("Transaction {} settled: {:?}", tx_hash, status_kind);
					return Ok(TransactionReceipt {
						chain_id: self.chain_id().to_string(),
						tx_hash: tx_hash.to_string(),
						status: status_kind,
						block: status.get("slot").and_then(Value::as_u64),
						confirmed_at: Utc::now(),
					});
				}
			}
			tokio::time::sleep(tokio::time::Duration::from_millis(CONFIRMATION_POLL_MS)).await;
		}
	}

	fn is_valid_address(&self, address: &str) -> bool {
		bs58::decode(address)
			.into_vec()
			.map(|bytes| bytes.len() == 32)
			.unwrap_or(false)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chainhopper_config::ChainRegistry;

	fn adapter() -> AccountLedgerAdapter {
		let config = ChainRegistry::builtin().get("solana").unwrap().clone();
		AccountLedgerAdapter::new(config, Arc::new(SourceRegistry::new())).unwrap()
	}

	#[test]
	fn test_account_address_validation() {
		let adapter = adapter();
		assert!(adapter.is_valid_address("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin"));
		assert!(adapter.is_valid_address("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"));
		// Hex addresses decode but not to 32 bytes, or fail the alphabet
		assert!(!adapter.is_valid_address("0x742d35Cc6634C0532925a3b8D2a27F79c5a85b03"));
		assert!(!adapter.is_valid_address("short"));
		assert!(!adapter.is_valid_address(""));
	}

	#[tokio::test]
	async fn test_token_resolution_without_network() {
		let adapter = adapter();
		let native = adapter.get_token("SOL").await.unwrap().unwrap();
		assert!(native.is_native);
		assert_eq!(native.decimals, 9);

		let usdc = adapter.get_token("USDC").await.unwrap().unwrap();
		assert!(!usdc.is_native);
	}

	#[tokio::test]
	async fn test_confirmation_wait_surfaces_rpc_failure() {
		let mut config = ChainRegistry::builtin().get("solana").unwrap().clone();
		config.rpc_urls = vec!["http://127.0.0.1:9".to_string()];
		let adapter = AccountLedgerAdapter::new(config, Arc::new(SourceRegistry::new())).unwrap();

		assert!(matches!(
			adapter
				.wait_for_confirmation("5j7s6NiJS3JAkvgkoc18WVAsiSaci2pxB2A6ueCJP4tp")
				.await,
			Err(AdapterError::Rpc { .. })
		));
	}

	#[tokio::test]
	async fn test_balance_rejects_invalid_owner() {
		let adapter = adapter();
		assert!(matches!(
			adapter.get_token_balance("not-base58!", "SOL").await,
			Err(AdapterError::InvalidAddress { .. })
		));
	}
}
