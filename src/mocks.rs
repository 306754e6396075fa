//! Scripted mocks for integration tests
//!
//! Deterministic stand-ins for venue plugins: each mock returns a scripted
//! outcome instead of talking to a venue API, so aggregation behavior can be
//! tested without network access.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use chainhopper_types::{
	Amount, ChainConfig, ChainFamily, NativeCurrency, QuoteSource, QuoteSourceResult, QuoteTier,
	RouteHop, SourceError, SourceResult, SwapRequest, Token, TxPayload,
};

/// What a [`ScriptedVenue`] does when asked for a quote
#[derive(Debug, Clone)]
pub enum VenueScript {
	/// Return a quote with this output and gas estimate
	Quote {
		amount_out: u64,
		gas_estimate: u64,
		tier: QuoteTier,
	},
	/// Return `Ok(None)`
	NoRoute,
	/// Return a plugin error
	Fail,
	/// Sleep past any reasonable timeout, then return a quote
	Stall { amount_out: u64 },
}

/// Quote source plugin with a scripted outcome
#[derive(Debug)]
pub struct ScriptedVenue {
	name: String,
	chain_id: String,
	script: VenueScript,
	fee_bps: Option<u32>,
}

impl ScriptedVenue {
	pub fn new(name: &str, chain_id: &str, script: VenueScript) -> Arc<Self> {
		Arc::new(Self {
			name: name.to_string(),
			chain_id: chain_id.to_string(),
			script,
			fee_bps: None,
		})
	}

	pub fn with_fee_bps(name: &str, chain_id: &str, script: VenueScript, fee_bps: u32) -> Arc<Self> {
		Arc::new(Self {
			name: name.to_string(),
			chain_id: chain_id.to_string(),
			script,
			fee_bps: Some(fee_bps),
		})
	}

	fn result(&self, request: &SwapRequest, amount_out: u64, gas_estimate: u64, tier: QuoteTier) -> QuoteSourceResult {
		QuoteSourceResult {
			venue: self.name.clone(),
			tier,
			amount_out: Amount::from(amount_out),
			gas_estimate,
			price_impact_pct: 0.1,
			route: vec![RouteHop {
				venue: self.name.clone(),
				pool: format!("{}-pool", self.name),
				token_in: request.token_in.clone(),
				token_out: request.token_out.clone(),
				percent: 100,
			}],
			payload: TxPayload {
				to: format!("{}-router", self.name),
				data: "0x".to_string(),
				value: Amount::zero(),
			},
			venue_fee_bps: self.fee_bps,
		}
	}
}

#[async_trait]
impl QuoteSource for ScriptedVenue {
	fn name(&self) -> &str {
		&self.name
	}

	fn chain_id(&self) -> &str {
		&self.chain_id
	}

	async fn quote(&self, request: &SwapRequest) -> SourceResult<Option<QuoteSourceResult>> {
		if request.chain_id != self.chain_id {
			return Ok(None);
		}
		match &self.script {
			VenueScript::Quote {
				amount_out,
				gas_estimate,
				tier,
			} => Ok(Some(self.result(request, *amount_out, *gas_estimate, *tier))),
			VenueScript::NoRoute => Ok(None),
			VenueScript::Fail => Err(SourceError::InvalidResponse {
				venue: self.name.clone(),
				reason: "scripted failure".to_string(),
			}),
			VenueScript::Stall { amount_out } => {
				tokio::time::sleep(Duration::from_secs(3_600)).await;
				Ok(Some(self.result(request, *amount_out, 100_000, QuoteTier::Live)))
			},
		}
	}
}

/// Minimal EVM chain config for tests, with a two-token list
pub fn demo_chain(chain_id: &str) -> ChainConfig {
	ChainConfig {
		chain_id: chain_id.to_string(),
		name: "Demo Chain".to_string(),
		family: ChainFamily::Evm,
		native_currency: NativeCurrency {
			name: "Ether".to_string(),
			symbol: "ETH".to_string(),
			decimals: 18,
		},
		rpc_urls: vec!["http://127.0.0.1:9".to_string()],
		explorer_url: "https://example.invalid".to_string(),
		enabled: true,
		tokens: vec![
			Token::new(
				"0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
				chain_id,
				"WETH",
				"Wrapped Ether",
				18,
			)
			.verified(),
			Token::new(
				"0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
				chain_id,
				"USDC",
				"USD Coin",
				6,
			)
			.verified(),
		],
	}
}

/// A valid request against [`demo_chain`]'s token list
pub fn demo_request(chain_id: &str, slippage_bps: u32) -> SwapRequest {
	SwapRequest {
		chain_id: chain_id.to_string(),
		token_in: "WETH".to_string(),
		token_out: "USDC".to_string(),
		amount_in: Amount::from(1_000_000_000_000_000_000u128),
		slippage_bps,
		recipient: "0x742d35Cc6634C0532925a3b8D2a27F79c5a85b03".to_string(),
		deadline: None,
	}
}
