//! Adapter for object-based ledgers (Sui-style)

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
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

/// Coin type of the native currency
const NATIVE_COIN_TYPE: &str = "0x2::sui::SUI";
/// Reference gas price fallback, in native smallest units
const FALLBACK_GAS_PRICE: u64 = 1_000;

const CONFIRMATION_POLL_MS: u64 = 1_000;

pub struct ObjectLedgerAdapter {
	engine: SwapEngine,
	rpc: RpcClient,
}

impl ObjectLedgerAdapter {
	pub fn new(config: ChainConfig, sources: Arc<SourceRegistry>) -> AdapterResult<Self> {
		let rpc = RpcClient::new(config.chain_id.clone(), config.rpc_urls.clone())?;
		Ok(Self {
			engine: SwapEngine::new(config, sources),
			rpc,
		})
	}

	async fn gas_price(&self) -> Amount {
		match self.rpc.call("suix_getReferenceGasPrice", json!([])).await {
			Ok(value) => match decimal_quantity(&value) {
				Ok(price) => price,
				Err(e) => {
					warn!("Unparseable gas price on {}: {}", self.chain_id(), e);
					Amount::from(FALLBACK_GAS_PRICE)
				},
			},
			Err(e) => {
				warn!("Reference gas price failed on {}: {}", self.chain_id(), e);
				Amount::from(FALLBACK_GAS_PRICE)
			},
		}
	}

	fn coin_type(token: &Token) -> String {
		if token.is_native {
			NATIVE_COIN_TYPE.to_string()
		} else {
			token.address.clone()
		}
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
impl ChainAdapter for ObjectLedgerAdapter {
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
		let result = self
			.rpc
			.call("suix_getBalance", json!([owner, Self::coin_type(&token)]))
			.await?;
		let total = result
			.get("totalBalance")
			.ok_or_else(|| AdapterError::Rpc {
				reason: "balance response missing totalBalance".to_string(),
			})?;
		decimal_quantity(total)
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
		let probe = self
			.rpc
			.call("sui_getLatestCheckpointSequenceNumber", json!([]))
			.await;
		let latency_ms = started.elapsed().as_millis() as u64;

		let latest_block = match probe {
			Ok(value) => decimal_quantity(&value).ok().map(|n| n.0.low_u64()),
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
		// Compute budget headroom of 50%; object ledgers refund the unused part
		self.engine
			.rebuild_transaction(quote, gas_price, |estimate| estimate + estimate / 2)
			.await
	}

	async fn submit_transaction(&self, signed: &[u8]) -> AdapterResult<String> {
		let tx_bytes = BASE64.encode(signed);
		let result = self
			.rpc
			.call(
				"sui_executeTransactionBlock",
				json!([tx_bytes, [], { "showEffects": true }, "WaitForEffectsCert"]),
			)
			.await
			.map_err(|e| AdapterError::Submission {
				reason: e.to_string(),
			})?;
		let digest = result
			.get("digest")
			.and_then(Value::as_str)
			.ok_or_else(|| AdapterError::Submission {
				reason: "execution response missing digest".to_string(),
			})?
			.to_string();
		info!("Submitted transaction {} on {}", digest, self.chain_id());
		Ok(digest)
	}

	/// Polls until the digest carries certified effects or the RPC client
	/// reports failure; callers wanting a bounded wait wrap this in their own
	/// timeout. Submission waits for an effects cert, so the digest is
	/// queryable as soon as `submit_transaction` returns.
	async fn wait_for_confirmation(&self, tx_hash: &str) -> AdapterResult<TransactionReceipt> {
		loop {
			let block = self
				.rpc
				.call(
					"sui_getTransactionBlock",
					json!([tx_hash, { "showEffects": true }]),
				)
				.await?;

			if let Some(status) = block
				.pointer("/effects/status/status")
				.and_then(Value::as_str)
			{
				let status = if status == "success" {
					TxStatus::Confirmed
				} else {
					TxStatus::Failed
				};
				let checkpoint = block
					.get("checkpoint")
					.map(decimal_quantity)
					.and_then(Result::ok)
					.map(|n| n.0.low_u64());
				debug!("Transaction {} settled: {:?}", tx_hash, status);
				return Ok(TransactionReceipt {
					chain_id: self.chain_id().to_string(),
					tx_hash: tx_hash.to_string(),
					status,
					block: checkpoint,
					confirmed_at: Utc::now(),
				});
			}
			tokio::time::sleep(tokio::time::Duration::from_millis(CONFIRMATION_POLL_MS)).await;
		}
	}

	fn is_valid_address(&self, address: &str) -> bool {
		address.len() == 66
			&& address.starts_with("0x")
			&& address[2..].chars().all(|c| c.is_ascii_hexdigit())
	}
}

/// Decode a decimal quantity sent as either a JSON string or number
fn decimal_quantity(value: &Value) -> AdapterResult<Amount> {
	if let Some(text) = value.as_str() {
		return Amount::from_decimal_str(text).map_err(|_| AdapterError::Rpc {
			reason: format!("invalid decimal quantity: {}", text),
		});
	}
	if let Some(number) = value.as_u64() {
		return Ok(Amount::from(number));
	}
	Err(AdapterError::Rpc {
		reason: format!("expected decimal quantity, got {}", value),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use chainhopper_config::ChainRegistry;

	fn adapter() -> ObjectLedgerAdapter {
		let config = ChainRegistry::builtin().get("sui").unwrap().clone();
		ObjectLedgerAdapter::new(config, Arc::new(SourceRegistry::new())).unwrap()
	}

	#[test]
	fn test_object_address_validation() {
		let adapter = adapter();
		assert!(adapter.is_valid_address(
			"0x5d8c1b2f6a3e4c9d0b7a6f5e4d3c2b1a0f9e8d7c6b5a4f3e2d1c0b9a8f7e6d5c"
		));
		// EVM length is too short here
		assert!(!adapter.is_valid_address("0x742d35Cc6634C0532925a3b8D2a27F79c5a85b03"));
		assert!(!adapter.is_valid_address(
			"5d8c1b2f6a3e4c9d0b7a6f5e4d3c2b1a0f9e8d7c6b5a4f3e2d1c0b9a8f7e6d5c"
		));
	}

	#[test]
	fn test_decimal_quantity_decoding() {
		assert_eq!(
			decimal_quantity(&json!("1000000000")).unwrap(),
			Amount::from(1_000_000_000u64)
		);
		assert_eq!(decimal_quantity(&json!(42)).unwrap(), Amount::from(42u64));
		assert!(decimal_quantity(&json!("0x10")).is_err());
		assert!(decimal_quantity(&json!(null)).is_err());
	}

	#[tokio::test]
	async fn test_confirmation_wait_surfaces_rpc_failure() {
		let mut config = ChainRegistry::builtin().get("sui").unwrap().clone();
		config.rpc_urls = vec!["http://127.0.0.1:9".to_string()];
		let adapter = ObjectLedgerAdapter::new(config, Arc::new(SourceRegistry::new())).unwrap();

		assert!(matches!(
			adapter.wait_for_confirmation("DigestAbc").await,
			Err(AdapterError::Rpc { .. })
		));
	}

	#[test]
	fn test_native_coin_type() {
		let adapter = adapter();
		let native = adapter.config().native_token();
		assert_eq!(ObjectLedgerAdapter::coin_type(&native), NATIVE_COIN_TYPE);
	}
}
