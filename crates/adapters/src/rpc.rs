//! JSON-RPC client with endpoint failover
//!
//! One client per adapter. The endpoint list comes from `ChainConfig`; the
//! first entry is primary and the cursor only moves on failure. The cursor is
//! the single piece of mutable state, guarded by a mutex so two callers
//! cannot race a failover.

use std::sync::Mutex;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use chainhopper_types::{AdapterError, AdapterResult};

const RPC_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Deserialize)]
struct RpcResponse {
	#[serde(default)]
	result: Option<Value>,
	#[serde(default)]
	error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
	code: i64,
	message: String,
}

/// HTTP JSON-RPC client bound to one chain's endpoint list
#[derive(Debug)]
pub struct RpcClient {
	chain_id: String,
	endpoints: Vec<String>,
	cursor: Mutex<usize>,
	client: Client,
}

impl RpcClient {
	pub fn new(chain_id: impl Into<String>, endpoints: Vec<String>) -> AdapterResult<Self> {
		let chain_id = chain_id.into();
		if endpoints.is_empty() {
			return Err(AdapterError::RpcExhausted { chain_id });
		}
		let client = Client::builder()
			.timeout(Duration::from_millis(RPC_TIMEOUT_MS))
			.build()?;
		Ok(Self {
			chain_id,
			endpoints,
			cursor: Mutex::new(0),
			client,
		})
	}

	pub fn current_endpoint(&self) -> String {
		let cursor = self.cursor.lock().unwrap_or_else(|e| e.into_inner());
		self.endpoints[*cursor % self.endpoints.len()].clone()
	}

	/// Advance to the next configured endpoint and return it
	pub fn failover(&self) -> String {
		let mut cursor = self.cursor.lock().unwrap_or_else(|e| e.into_inner());
		*cursor = (*cursor + 1) % self.endpoints.len();
		let next = self.endpoints[*cursor].clone();
		warn!(
			"RPC failover for {}: switching to {}",
			self.chain_id, next
		);
		next
	}

	/// Single JSON-RPC call against the current endpoint.
	///
	/// A transport failure advances the endpoint cursor before surfacing the
	/// error; the call itself is never retried here.
	pub async fn call(&self, method: &str, params: Value) -> AdapterResult<Value> {
		let endpoint = self.current_endpoint();
		let body = json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": method,
			"params": params,
		});

		debug!("RPC {} -> {} {}", self.chain_id, endpoint, method);
		let response = match self.client.post(&endpoint).json(&body).send().await {
			Ok(response) => response,
			Err(e) => {
				self.failover();
				return Err(AdapterError::Rpc {
					reason: format!("{} transport failure: {}", method, e),
				});
			},
		};

		let status = response.status();
		if !status.is_success() {
			self.failover();
			return Err(AdapterError::Rpc {
				reason: format!("{} returned HTTP {}", method, status),
			});
		}

		let parsed: RpcResponse = response.json().await?;
		if let Some(error) = parsed.error {
			// The node answered; an RPC-level error is not an endpoint fault
			return Err(AdapterError::Rpc {
				reason: format!("{} failed: {} (code {})", method, error.message, error.code),
			});
		}
		parsed.result.ok_or_else(|| AdapterError::Rpc {
			reason: format!("{} returned no result", method),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_endpoint_list_rejected() {
		assert!(matches!(
			RpcClient::new("demo", vec![]),
			Err(AdapterError::RpcExhausted { .. })
		));
	}

	#[test]
	fn test_failover_cycles_endpoints() {
		let client = RpcClient::new(
			"demo",
			vec![
				"http://one.invalid".to_string(),
				"http://two.invalid".to_string(),
			],
		)
		.unwrap();

		assert_eq!(client.current_endpoint(), "http://one.invalid");
		assert_eq!(client.failover(), "http://two.invalid");
		assert_eq!(client.current_endpoint(), "http://two.invalid");
		// Wraps back to primary
		assert_eq!(client.failover(), "http://one.invalid");
	}

	#[tokio::test]
	async fn test_transport_failure_advances_cursor() {
		let client = RpcClient::new(
			"demo",
			vec![
				"http://127.0.0.1:9".to_string(),
				"http://127.0.0.1:10".to_string(),
			],
		)
		.unwrap();

		let result = client.call("eth_blockNumber", json!([])).await;
		assert!(result.is_err());
		assert_eq!(client.current_endpoint(), "http://127.0.0.1:10");
	}
}
