//! Swap request, quote, and transaction models

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{MAX_SLIPPAGE_BPS, QUOTE_TTL_SECS};
use crate::models::{Amount, Token};

pub mod errors;

pub use errors::{ValidationError, ValidationResult};

/// A single swap to be quoted and executed
///
/// Caller-constructed, immutable, consumed once per quote/build call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
	pub chain_id: String,
	/// Input token address or symbol
	pub token_in: String,
	/// Output token address or symbol
	pub token_out: String,
	/// Input amount in the token's smallest unit
	pub amount_in: Amount,
	/// Slippage tolerance in basis points (50 = 0.50%)
	pub slippage_bps: u32,
	pub recipient: String,
	/// Optional execution deadline, unix seconds
	#[serde(skip_serializing_if = "Option::is_none")]
	pub deadline: Option<u64>,
}

impl SwapRequest {
	/// Validate the request before any network call
	pub fn validate(&self) -> ValidationResult<()> {
		if self.chain_id.is_empty() {
			return Err(ValidationError::MissingField {
				field: "chainId".to_string(),
			});
		}
		if self.token_in.is_empty() {
			return Err(ValidationError::InvalidToken {
				field: "tokenIn".to_string(),
			});
		}
		if self.token_out.is_empty() {
			return Err(ValidationError::InvalidToken {
				field: "tokenOut".to_string(),
			});
		}
		if self.token_in.eq_ignore_ascii_case(&self.token_out) {
			return Err(ValidationError::InvalidToken {
				field: "tokenOut".to_string(),
			});
		}
		if self.amount_in.is_zero() {
			return Err(ValidationError::InvalidAmount {
				reason: "amountIn must be positive".to_string(),
			});
		}
		if self.slippage_bps > MAX_SLIPPAGE_BPS {
			return Err(ValidationError::InvalidSlippage {
				bps: self.slippage_bps,
				max: MAX_SLIPPAGE_BPS,
			});
		}
		if self.recipient.is_empty() {
			return Err(ValidationError::InvalidRecipient {
				address: self.recipient.clone(),
			});
		}
		if let Some(deadline) = self.deadline {
			if (deadline as i64) < Utc::now().timestamp() {
				return Err(ValidationError::DeadlinePassed { deadline });
			}
		}
		Ok(())
	}
}

/// Trust tier of a quote's pricing signal
///
/// Degraded quotes are locally computed haircuts used when a venue's live API
/// is unreachable; their output and price impact are indicative only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuoteTier {
	Live,
	Degraded,
}

/// One hop of a swap route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteHop {
	pub venue: String,
	/// Pool or market identifier at the venue
	pub pool: String,
	pub token_in: String,
	pub token_out: String,
	/// Share of flow through this hop, 0-100
	pub percent: u8,
}

/// Raw transaction payload produced by a venue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TxPayload {
	/// Destination contract or program
	pub to: String,
	/// Call data, hex or venue-specific encoding
	pub data: String,
	/// Native value to attach
	pub value: Amount,
}

/// Normalized result from one quote source plugin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSourceResult {
	/// Winning venue name
	pub venue: String,
	pub tier: QuoteTier,
	pub amount_out: Amount,
	/// Estimated network-fee units (gas / compute units)
	pub gas_estimate: u64,
	pub price_impact_pct: f64,
	pub route: Vec<RouteHop>,
	pub payload: TxPayload,
	/// Fee the venue itself charges, when it declares one
	#[serde(skip_serializing_if = "Option::is_none")]
	pub venue_fee_bps: Option<u32>,
}

impl QuoteSourceResult {
	/// Route hop percentages must cover the whole flow
	pub fn route_is_complete(&self) -> bool {
		self.route.is_empty() || self.route.iter().map(|h| h.percent as u32).sum::<u32>() == 100
	}
}

/// A fee expressed in native units with an optional USD estimate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeeAmount {
	pub native: Amount,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub usd: Option<f64>,
}

/// Structured fee breakdown attached to a quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
	pub protocol: FeeAmount,
	pub network: FeeAmount,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub venue: Option<FeeAmount>,
}

/// Best quote selected by the aggregator
///
/// Created once per `get_quote` call and never mutated; downstream consumers
/// reject it after `expires_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedQuote {
	pub quote_id: String,
	pub chain_id: String,
	pub token_in: Token,
	pub token_out: Token,
	pub amount_in: Amount,
	pub amount_out: Amount,
	/// Output floor after applying the requested slippage tolerance
	pub min_amount_out: Amount,
	pub slippage_bps: u32,
	pub recipient: String,
	pub venue: String,
	pub tier: QuoteTier,
	pub gas_estimate: u64,
	/// Gas or compute-unit price in native smallest units
	pub gas_price: Amount,
	pub price_impact_pct: f64,
	pub route: Vec<RouteHop>,
	pub payload: TxPayload,
	pub fees: FeeBreakdown,
	pub expires_at: DateTime<Utc>,
}

impl AggregatedQuote {
	pub fn new_quote_id() -> String {
		Uuid::new_v4().to_string()
	}

	/// Expiry stamp for a quote created now
	pub fn default_expiry() -> DateTime<Utc> {
		Utc::now() + Duration::seconds(QUOTE_TTL_SECS)
	}

	pub fn is_expired(&self) -> bool {
		Utc::now() >= self.expires_at
	}

	/// Rebuild the swap request this quote answered, for re-resolution
	pub fn to_swap_request(&self) -> SwapRequest {
		SwapRequest {
			chain_id: self.chain_id.clone(),
			token_in: self.token_in.address.clone(),
			token_out: self.token_out.address.clone(),
			amount_in: self.amount_in,
			slippage_bps: self.slippage_bps,
			recipient: self.recipient.clone(),
			deadline: None,
		}
	}
}

/// A transaction ready for external signing
///
/// Produced fresh on each `build_swap_transaction` call; routing data is
/// re-resolved rather than replayed from the quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTransaction {
	pub chain_id: String,
	pub to: String,
	pub data: String,
	pub value: Amount,
	/// Gas or compute limit
	pub gas_limit: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gas_price: Option<Amount>,
}

/// Final status of a submitted transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
	Confirmed,
	Failed,
}

/// Confirmation record for a submitted transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
	pub chain_id: String,
	pub tx_hash: String,
	pub status: TxStatus,
	/// Block / checkpoint / slot the transaction landed in
	pub block: Option<u64>,
	pub confirmed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn valid_request() -> SwapRequest {
		SwapRequest {
			chain_id: "ethereum".to_string(),
			token_in: "ETH".to_string(),
			token_out: "USDC".to_string(),
			amount_in: Amount::from(1_000_000_000_000_000_000u128),
			slippage_bps: 50,
			recipient: "0x742d35Cc6634C0532925a3b8D2a27F79c5a85b03".to_string(),
			deadline: None,
		}
	}

	#[test]
	fn test_swap_request_validation() {
		assert!(valid_request().validate().is_ok());

		let mut request = valid_request();
		request.amount_in = Amount::zero();
		assert!(matches!(
			request.validate(),
			Err(ValidationError::InvalidAmount { .. })
		));

		let mut request = valid_request();
		request.slippage_bps = 9_000;
		assert!(matches!(
			request.validate(),
			Err(ValidationError::InvalidSlippage { .. })
		));

		let mut request = valid_request();
		request.token_out = "eth".to_string();
		assert!(matches!(
			request.validate(),
			Err(ValidationError::InvalidToken { .. })
		));

		let mut request = valid_request();
		request.recipient = String::new();
		assert!(request.validate().is_err());
	}

	#[test]
	fn test_swap_request_deadline_in_past() {
		let mut request = valid_request();
		request.deadline = Some(1_000);
		assert!(matches!(
			request.validate(),
			Err(ValidationError::DeadlinePassed { .. })
		));

		request.deadline = Some((Utc::now().timestamp() + 600) as u64);
		assert!(request.validate().is_ok());
	}

	#[test]
	fn test_route_percentages_sum_to_100() {
		let hop = |percent| RouteHop {
			venue: "demoswap".to_string(),
			pool: "pool-1".to_string(),
			token_in: "ETH".to_string(),
			token_out: "USDC".to_string(),
			percent,
		};

		let mut result = QuoteSourceResult {
			venue: "demoswap".to_string(),
			tier: QuoteTier::Live,
			amount_out: Amount::from(100u64),
			gas_estimate: 150_000,
			price_impact_pct: 0.1,
			route: vec![hop(60), hop(40)],
			payload: TxPayload {
				to: "0xrouter".to_string(),
				data: "0x".to_string(),
				value: Amount::zero(),
			},
			venue_fee_bps: None,
		};
		assert!(result.route_is_complete());

		result.route = vec![hop(60), hop(30)];
		assert!(!result.route_is_complete());
	}
}
