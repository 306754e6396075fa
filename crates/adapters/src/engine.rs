//! Shared swap engine behind every adapter family
//!
//! Token resolution, request validation, and the aggregation pass are the same
//! on every chain; only the network client differs. Each adapter owns one
//! engine instance bound to its chain's configuration and the shared source
//! registry.

use std::sync::Arc;

use tracing::debug;

use chainhopper_config::usd_estimate;
use chainhopper_service::{Aggregator, QuoteContext};
use chainhopper_sources::SourceRegistry;
use chainhopper_types::{
	AdapterError, AdapterResult, AggregatedQuote, Amount, ChainConfig, SwapRequest, Token,
	UnsignedTransaction,
};

/// Chain-agnostic quoting core shared by all adapter families
#[derive(Clone)]
pub struct SwapEngine {
	config: ChainConfig,
	aggregator: Arc<Aggregator>,
}

impl SwapEngine {
	pub fn new(config: ChainConfig, sources: Arc<SourceRegistry>) -> Self {
		Self {
			config,
			aggregator: Arc::new(Aggregator::new(sources)),
		}
	}

	pub fn config(&self) -> &ChainConfig {
		&self.config
	}

	/// Resolve `identifier` against the native currency and the chain's
	/// well-known token list; no network I/O
	pub fn resolve_token(&self, identifier: &str) -> Option<Token> {
		let native = self.config.native_token();
		if identifier.eq_ignore_ascii_case(Token::NATIVE_ADDRESS)
			|| identifier.eq_ignore_ascii_case(&native.symbol)
		{
			return Some(native);
		}
		self.config
			.tokens
			.iter()
			.find(|token| token.matches(identifier))
			.cloned()
	}

	pub fn require_token(&self, identifier: &str) -> AdapterResult<Token> {
		self.resolve_token(identifier)
			.ok_or_else(|| AdapterError::TokenNotFound {
				chain_id: self.config.chain_id.clone(),
				identifier: identifier.to_string(),
			})
	}

	/// Validate, resolve, aggregate. `gas_price` comes from the owning
	/// adapter's network client.
	pub async fn get_quote(
		&self,
		request: &SwapRequest,
		gas_price: Amount,
	) -> AdapterResult<AggregatedQuote> {
		request.validate()?;
		if request.chain_id != self.config.chain_id {
			return Err(AdapterError::UnsupportedChain {
				chain_id: request.chain_id.clone(),
			});
		}

		let token_in = self.require_token(&request.token_in)?;
		let token_out = self.require_token(&request.token_out)?;
		let ctx = self.quote_context(token_in, token_out, gas_price);

		debug!(
			"Quoting {} {} -> {} on {}",
			request.amount_in, ctx.token_in.symbol, ctx.token_out.symbol, request.chain_id
		);
		self.aggregator
			.best_quote(request, &ctx)
			.await
			.ok_or_else(|| AdapterError::NoQuote {
				chain_id: self.config.chain_id.clone(),
			})
	}

	/// Re-resolve routing for an existing quote and shape the winner into an
	/// unsigned transaction.
	///
	/// The stored payload is never replayed; an expired quote simply means the
	/// rebuilt route may differ from the one originally shown.
	pub async fn rebuild_transaction(
		&self,
		quote: &AggregatedQuote,
		gas_price: Amount,
		gas_limit: impl Fn(u64) -> u64,
	) -> AdapterResult<UnsignedTransaction> {
		if quote.is_expired() {
			debug!(
				"Quote {} expired at {}; rebuilding route from scratch",
				quote.quote_id, quote.expires_at
			);
		}
		let request = quote.to_swap_request();
		let fresh = self.get_quote(&request, gas_price).await?;
		if fresh.payload.to.is_empty() {
			return Err(AdapterError::BuildFailed {
				reason: format!("venue {} produced no destination", fresh.venue),
			});
		}

		Ok(UnsignedTransaction {
			chain_id: fresh.chain_id,
			to: fresh.payload.to,
			data: fresh.payload.data,
			value: fresh.payload.value,
			gas_limit: gas_limit(fresh.gas_estimate),
			gas_price: Some(fresh.gas_price),
		})
	}

	fn quote_context(&self, token_in: Token, token_out: Token, gas_price: Amount) -> QuoteContext {
		let native = &self.config.native_currency;
		QuoteContext {
			native_usd: usd_estimate(&native.symbol),
			token_out_usd: usd_estimate(&token_out.symbol),
			native_decimals: native.decimals,
			token_in,
			token_out,
			gas_price,
		}
	}
}
