//! Adapter for account-based EVM-style chains

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use primitive_types::U256;
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

/// balanceOf(address) selector
const BALANCE_OF_SELECTOR: &str = "0x70a08231";
/// 20 gwei, used when the node refuses to price gas
const FALLBACK_GAS_PRICE: u64 = 20_000_000_000;

const CONFIRMATION_POLL_MS: u64 = 2_000;

pub struct EvmAdapter {
	engine: SwapEngine,
	rpc: RpcClient,
}

impl EvmAdapter {
	pub fn new(config: ChainConfig, sources: Arc<SourceRegistry>) -> AdapterResult<Self> {
		let rpc = RpcClient::new(config.chain_id.clone(), config.rpc_urls.clone())?;
		Ok(Self {
			engine: SwapEngine::new(config, sources),
			rpc,
		})
	}

	async fn gas_price(&self) -> Amount {
		match self.rpc.call("eth_gasPrice", json!([])).await {
			Ok(value) => match hex_quantity(&value) {
				Ok(price) => Amount(price),
				Err(e) => {
					warn!("Unparseable eth_gasPrice on {}: {}", self.chain_id(), e);
					Amount::from(FALLBACK_GAS_PRICE)
				},
			},
			Err(e) => {
				warn!("eth_gasPrice failed on {}: {}", self.chain_id(), e);
				Amount::from(FALLBACK_GAS_PRICE)
			},
		}
	}

	async fn native_balance(&self, owner: &str) -> AdapterResult<Amount> {
		let result = self
			.rpc
			.call("eth_getBalance", json!([owner, "latest"]))
			.await?;
		hex_quantity(&result).map(Amount)
	}

	async fn erc20_balance(&self, owner: &str, contract: &str) -> AdapterResult<Amount> {
		// balanceOf(owner): selector + owner left-padded to 32 bytes
		let data = format!(
			"{}{:0>64}",
			BALANCE_OF_SELECTOR,
			owner.trim_start_matches("0x").to_lowercase()
		);
		let result = self
			.rpc
			.call(
				"eth_call",
				json!([{ "to": contract, "data": data }, "latest"]),
			)
			.await?;
		hex_quantity(&result).map(Amount)
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
impl ChainAdapter for EvmAdapter {
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
			self.erc20_balance(owner, &token.address).await
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
		let probe = self.rpc.call("eth_blockNumber", json!([])).await;
		let latency_ms = started.elapsed().as_millis() as u64;

		let latest_block = match probe {
			Ok(value) => hex_quantity(&value).ok().map(|n| n.low_u64()),
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
		let gas_price = self.gas_price().await;
		self.engine.get_quote(request, gas_price).await
	}

	async fn build_swap_transaction(
		&self,
		quote: &AggregatedQuote,
	) -> AdapterResult<UnsignedTransaction> {
		let gas_price = self.gas_price().await;
		// 20% headroom over the venue's estimate
		self.engine
			.rebuild_transaction(quote, gas_price, |estimate| estimate + estimate / 5)
			.await
	}

	async fn submit_transaction(&self, signed: &[u8]) -> AdapterResult<String> {
		let raw = format!("0x{}", hex::encode(signed));
		let result = self
			.rpc
			.call("eth_sendRawTransaction", json!([raw]))
			.await
			.map_err(|e| AdapterError::Submission {
				reason: e.to_string(),
			})?;
		let tx_hash = result
			.as_str()
			.ok_or_else(|| AdapterError::Submission {
				reason: "node returned a non-string transaction hash".to_string(),
			})?
			.to_string();
		info!("Submitted transaction {} on {}", tx_hash, self.chain_id());
		Ok(tx_hash)
	}

	/// Polls until the node returns a receipt or the RPC client reports
	/// failure; callers wanting a bounded wait wrap this in their own timeout
	async fn wait_for_confirmation(&self, tx_hash: &str) -> AdapterResult<TransactionReceipt> {
		loop {
			let receipt = self
				.rpc
				.call("eth_getTransactionReceipt", json!([tx_hash]))
				.await?;
			if !receipt.is_null() {
				let status = match receipt.get("status").and_then(Value::as_str) {
					Some("0x1") => TxStatus::Confirmed,
					_ => TxStatus::Failed,
				};
				let block = receipt
					.get("blockNumber")
					.map(hex_quantity)
					.and_then(Result::ok)
					.map(|n| n.low_u64());
				debug!("Transaction {} settled: {:?}", tx_hash, status);
				return Ok(TransactionReceipt {
					chain_id: self.chain_id().to_string(),
					tx_hash: tx_hash.to_string(),
					status,
					block,
					confirmed_at: Utc::now(),
				});
			}
			tokio::time::sleep(tokio::time::Duration::from_millis(CONFIRMATION_POLL_MS)).await;
		}
	}

	fn is_valid_address(&self, address: &str) -> bool {
		address.len() == 42
			&& address.starts_with("0x")
			&& address[2..].chars().all(|c| c.is_ascii_hexdigit())
	}
}

/// Decode a JSON-RPC hex quantity ("0x1b4") into a U256
fn hex_quantity(value: &Value) -> AdapterResult<U256> {
	let text = value.as_str().ok_or_else(|| AdapterError::Rpc {
		reason: format!("expected hex quantity, got {}", value),
	})?;
	U256::from_str_radix(text.trim_start_matches("0x"), 16).map_err(|_| AdapterError::Rpc {
		reason: format!("invalid hex quantity: {}", text),
	})
}
