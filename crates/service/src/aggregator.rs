//! Core aggregation logic
//!
//! Fans a swap request out to every plugin registered for its chain, joins on
//! all of them, and selects the winner by a deterministic total order:
//! greatest output, then lowest gas estimate, then registration order.

use std::sync::Arc;

use futures::future::join_all;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use chainhopper_sources::SourceRegistry;
use chainhopper_types::constants::{DEFAULT_SOURCE_TIMEOUT_MS, PROTOCOL_FEE_BPS};
use chainhopper_types::{
	format_units, AggregatedQuote, Amount, FeeAmount, FeeBreakdown, QuoteSourceResult, SwapRequest,
	Token,
};

/// Chain-derived inputs the aggregator needs beyond the request itself
///
/// The owning adapter resolves these before calling in: token records from
/// its registry, gas price from its RPC client, USD estimates from the
/// static price table.
#[derive(Debug, Clone)]
pub struct QuoteContext {
	pub token_in: Token,
	pub token_out: Token,
	/// Gas or compute-unit price in native smallest units
	pub gas_price: Amount,
	pub native_decimals: u8,
	pub native_usd: Option<f64>,
	pub token_out_usd: Option<f64>,
}

/// Stateless best-quote selector over a shared source registry
///
/// Holds no per-request state: concurrent calls run independent fan-outs with
/// no caching or deduplication.
pub struct Aggregator {
	sources: Arc<SourceRegistry>,
	source_timeout_ms: u64,
}

impl Aggregator {
	pub fn new(sources: Arc<SourceRegistry>) -> Self {
		Self {
			sources,
			source_timeout_ms: DEFAULT_SOURCE_TIMEOUT_MS,
		}
	}

	pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
		self.source_timeout_ms = timeout_ms;
		self
	}

	/// Best quote for `request`, or `None` when no plugin yields a usable
	/// result
	pub async fn best_quote(
		&self,
		request: &SwapRequest,
		ctx: &QuoteContext,
	) -> Option<AggregatedQuote> {
		let results = self.collect(request).await;
		let winner = select_winner(results)?;
		Some(self.into_quote(request, ctx, winner))
	}

	/// Fan out to every plugin for the request's chain and join on all of
	/// them; no early exit, so a fast low-quality quote never pre-empts a
	/// slower better one
	pub async fn collect(&self, request: &SwapRequest) -> Vec<Option<QuoteSourceResult>> {
		let sources = self.sources.for_chain(&request.chain_id);
		if sources.is_empty() {
			debug!("No quote sources registered for chain {}", request.chain_id);
			return Vec::new();
		}

		let per_source = Duration::from_millis(self.source_timeout_ms);
		let tasks = sources.iter().map(|source| {
			let source = Arc::clone(source);
			let request = request.clone();

			tokio::spawn(async move {
				match timeout(per_source, source.quote(&request)).await {
					Ok(Ok(result)) => result,
					Ok(Err(e)) => {
						warn!("Source {} returned error: {}", source.name(), e);
						None
					},
					Err(_) => {
						warn!(
							"Source {} timed out after {}ms",
							source.name(),
							per_source.as_millis()
						);
						None
					},
				}
			})
		});

		let settled = join_all(tasks).await;
		let results: Vec<Option<QuoteSourceResult>> = settled
			.into_iter()
			.map(|joined| joined.ok().flatten())
			.collect();

		info!(
			"Aggregation for {} settled: {} usable of {} sources",
			request.chain_id,
			results.iter().filter(|r| r.is_some()).count(),
			results.len()
		);
		results
	}

	fn into_quote(
		&self,
		request: &SwapRequest,
		ctx: &QuoteContext,
		winner: QuoteSourceResult,
	) -> AggregatedQuote {
		let min_amount_out = winner.amount_out.apply_haircut_bps(request.slippage_bps);
		let fees = self.fee_breakdown(ctx, &winner);

		AggregatedQuote {
			quote_id: AggregatedQuote::new_quote_id(),
			chain_id: request.chain_id.clone(),
			token_in: ctx.token_in.clone(),
			token_out: ctx.token_out.clone(),
			amount_in: request.amount_in,
			amount_out: winner.amount_out,
			min_amount_out,
			slippage_bps: request.slippage_bps,
			recipient: request.recipient.clone(),
			venue: winner.venue,
			tier: winner.tier,
			gas_estimate: winner.gas_estimate,
			gas_price: ctx.gas_price,
			price_impact_pct: winner.price_impact_pct,
			route: winner.route,
			payload: winner.payload,
			fees,
			expires_at: AggregatedQuote::default_expiry(),
		}
	}

	fn fee_breakdown(&self, ctx: &QuoteContext, winner: &QuoteSourceResult) -> FeeBreakdown {
		let protocol_native = winner.amount_out.portion_bps(PROTOCOL_FEE_BPS);
		let network_native = ctx.gas_price.saturating_mul(winner.gas_estimate);

		let protocol = FeeAmount {
			native: protocol_native,
			usd: units_to_usd(&protocol_native, ctx.token_out.decimals, ctx.token_out_usd),
		};
		let network = FeeAmount {
			native: network_native,
			usd: units_to_usd(&network_native, ctx.native_decimals, ctx.native_usd),
		};
		let venue = winner.venue_fee_bps.map(|bps| {
			let native = winner.amount_out.portion_bps(bps);
			FeeAmount {
				usd: units_to_usd(&native, ctx.token_out.decimals, ctx.token_out_usd),
				native,
			}
		});

		FeeBreakdown {
			protocol,
			network,
			venue,
		}
	}
}

/// Total-order selection: strictly positive output required; greatest output
/// wins, ties prefer lower gas, remaining ties prefer earlier registration
fn select_winner(results: Vec<Option<QuoteSourceResult>>) -> Option<QuoteSourceResult> {
	let mut best: Option<QuoteSourceResult> = None;
	for candidate in results.into_iter().flatten() {
		if candidate.amount_out.is_zero() {
			continue;
		}
		best = match best {
			None => Some(candidate),
			Some(current) => {
				let better = candidate.amount_out > current.amount_out
					|| (candidate.amount_out == current.amount_out
						&& candidate.gas_estimate < current.gas_estimate);
				if better {
					Some(candidate)
				} else {
					Some(current)
				}
			},
		};
	}
	best
}

fn units_to_usd(amount: &Amount, decimals: u8, price: Option<f64>) -> Option<f64> {
	let price = price?;
	let whole = format_units(amount, decimals).parse::<f64>().ok()?;
	Some(whole * price)
}
