//! Generic HTTP venue plugin
//!
//! One implementation of [`QuoteSource`] covers every HTTP venue; the
//! differences between venues live in their [`VenueProfile`]. When the live
//! call fails for any reason the plugin degrades to a locally computed
//! estimate so the aggregator always has a numeric signal.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use chainhopper_types::{
	Amount, QuoteSource, QuoteSourceResult, QuoteTier, RouteHop, SourceError, SourceResult,
	SwapRequest, TxPayload,
};

use crate::venue::{VenueProfile, WireFormat};

/// HTTP-backed quote source driven by a venue profile
#[derive(Debug)]
pub struct HttpVenueSource {
	profile: VenueProfile,
	client: Client,
}

impl HttpVenueSource {
	pub fn new(profile: VenueProfile) -> SourceResult<Self> {
		let mut headers = HeaderMap::new();
		headers.insert("Accept", HeaderValue::from_static("application/json"));
		headers.insert("User-Agent", HeaderValue::from_static("ChainHopper/0.1"));

		let client = Client::builder()
			.default_headers(headers)
			.timeout(Duration::from_millis(profile.timeout_ms))
			.build()
			.map_err(SourceError::Http)?;

		Ok(Self { profile, client })
	}

	pub fn profile(&self) -> &VenueProfile {
		&self.profile
	}

	fn quote_url(&self) -> SourceResult<Url> {
		let mut base = Url::parse(&self.profile.base_url).map_err(|e| SourceError::Config {
			reason: format!("Invalid base URL '{}': {}", self.profile.base_url, e),
		})?;
		if !base.path().ends_with('/') {
			base.set_path(&format!("{}/", base.path()));
		}
		base.join("quote").map_err(|e| SourceError::Config {
			reason: format!("Failed to build quote URL: {}", e),
		})
	}

	async fn live_quote(&self, request: &SwapRequest) -> SourceResult<QuoteSourceResult> {
		let url = self.quote_url()?;
		let amount = request.amount_in.to_string();
		let slippage = request.slippage_bps.to_string();

		let query: Vec<(&str, &str)> = match self.profile.wire {
			WireFormat::SwapApi => vec![
				("sellToken", request.token_in.as_str()),
				("buyToken", request.token_out.as_str()),
				("sellAmount", amount.as_str()),
				("slippageBps", slippage.as_str()),
			],
			WireFormat::RouterApi => vec![
				("inputMint", request.token_in.as_str()),
				("outputMint", request.token_out.as_str()),
				("amount", amount.as_str()),
				("slippageBps", slippage.as_str()),
			],
		};

		let response = self.client.get(url).query(&query).send().await?;
		let status = response.status();
		if !status.is_success() {
			return Err(SourceError::HttpStatus {
				status_code: status.as_u16(),
				reason: status.canonical_reason().unwrap_or("unknown").to_string(),
			});
		}

		let body = response.text().await?;
		match self.profile.wire {
			WireFormat::SwapApi => self.parse_swap_api(request, &body),
			WireFormat::RouterApi => self.parse_router_api(request, &body),
		}
	}

	fn parse_swap_api(&self, request: &SwapRequest, body: &str) -> SourceResult<QuoteSourceResult> {
		let quote: SwapApiQuote =
			serde_json::from_str(body).map_err(|e| SourceError::InvalidResponse {
				venue: self.profile.venue.clone(),
				reason: e.to_string(),
			})?;

		let price_impact_pct = quote
			.estimated_price_impact
			.as_deref()
			.and_then(|p| p.parse::<f64>().ok())
			.unwrap_or(0.0);

		let route: Vec<RouteHop> = quote
			.sources
			.iter()
			.filter_map(|s| {
				let proportion = s.proportion.parse::<f64>().ok()?;
				let percent = (proportion * 100.0).round() as u8;
				(percent > 0).then(|| RouteHop {
					venue: self.profile.venue.clone(),
					pool: s.name.clone(),
					token_in: request.token_in.clone(),
					token_out: request.token_out.clone(),
					percent,
				})
			})
			.collect();

		Ok(QuoteSourceResult {
			venue: self.profile.venue.clone(),
			tier: QuoteTier::Live,
			amount_out: quote.buy_amount,
			gas_estimate: quote.estimated_gas.unwrap_or(self.profile.fallback_gas),
			price_impact_pct,
			route: self.normalized_route(request, route),
			payload: TxPayload {
				to: quote.to,
				data: quote.data,
				value: quote.value.unwrap_or_else(Amount::zero),
			},
			venue_fee_bps: self.profile.fee_bps,
		})
	}

	fn parse_router_api(
		&self,
		request: &SwapRequest,
		body: &str,
	) -> SourceResult<QuoteSourceResult> {
		let quote: RouterApiQuote =
			serde_json::from_str(body).map_err(|e| SourceError::InvalidResponse {
				venue: self.profile.venue.clone(),
				reason: e.to_string(),
			})?;

		let route: Vec<RouteHop> = quote
			.route_plan
			.iter()
			.filter(|step| step.percent > 0)
			.map(|step| RouteHop {
				venue: step
					.swap_info
					.label
					.clone()
					.unwrap_or_else(|| self.profile.venue.clone()),
				pool: step.swap_info.amm_key.clone(),
				token_in: step.swap_info.input_mint.clone(),
				token_out: step.swap_info.output_mint.clone(),
				percent: step.percent,
			})
			.collect();

		let payload = match quote.transaction {
			Some(tx) => TxPayload {
				to: tx.to,
				data: tx.data,
				value: tx.value.unwrap_or_else(Amount::zero),
			},
			None => TxPayload {
				to: self.profile.router_address.clone(),
				data: String::new(),
				value: Amount::zero(),
			},
		};

		Ok(QuoteSourceResult {
			venue: self.profile.venue.clone(),
			tier: QuoteTier::Live,
			amount_out: quote.out_amount,
			gas_estimate: quote.compute_units.unwrap_or(self.profile.fallback_gas),
			price_impact_pct: quote.price_impact_pct.unwrap_or(0.0),
			route: self.normalized_route(request, route),
			payload,
			venue_fee_bps: self.profile.fee_bps,
		})
	}

	/// Replace routes whose percentages do not cover the flow with a single
	/// whole-flow hop at this venue
	fn normalized_route(&self, request: &SwapRequest, route: Vec<RouteHop>) -> Vec<RouteHop> {
		let total: u32 = route.iter().map(|h| h.percent as u32).sum();
		if !route.is_empty() && total == 100 {
			return route;
		}
		vec![self.whole_flow_hop(request)]
	}

	fn whole_flow_hop(&self, request: &SwapRequest) -> RouteHop {
		RouteHop {
			venue: self.profile.venue.clone(),
			pool: self.profile.router_address.clone(),
			token_in: request.token_in.clone(),
			token_out: request.token_out.clone(),
			percent: 100,
		}
	}

	/// Locally computed estimate used when the live call fails
	///
	/// Output is the input minus a conservative haircut with a venue-typical
	/// gas figure and a flat impact guess; it does not reflect market depth.
	fn degraded_estimate(&self, request: &SwapRequest) -> Option<QuoteSourceResult> {
		let amount_out = request.amount_in.apply_haircut_bps(self.profile.haircut_bps);
		if amount_out.is_zero() {
			return None;
		}

		Some(QuoteSourceResult {
			venue: self.profile.venue.clone(),
			tier: QuoteTier::Degraded,
			amount_out,
			gas_estimate: self.profile.fallback_gas,
			price_impact_pct: self.profile.impact_guess_pct,
			route: vec![self.whole_flow_hop(request)],
			payload: TxPayload {
				to: self.profile.router_address.clone(),
				data: String::new(),
				value: Amount::zero(),
			},
			venue_fee_bps: self.profile.fee_bps,
		})
	}
}

#[async_trait]
impl QuoteSource for HttpVenueSource {
	fn name(&self) -> &str {
		&self.profile.venue
	}

	fn chain_id(&self) -> &str {
		&self.profile.chain_id
	}

	async fn quote(&self, request: &SwapRequest) -> SourceResult<Option<QuoteSourceResult>> {
		if request.chain_id != self.profile.chain_id {
			return Ok(None);
		}

		match self.live_quote(request).await {
			Ok(result) if !result.amount_out.is_zero() => {
				debug!(
					"Live quote from {}: {} -> {} out {}",
					self.profile.venue, request.token_in, request.token_out, result.amount_out
				);
				Ok(Some(result))
			},
			Ok(_) => {
				debug!("Venue {} quoted zero output, discarding", self.profile.venue);
				Ok(None)
			},
			Err(e) => {
				warn!(
					"Live quote from {} failed ({}), using degraded estimate",
					self.profile.venue, e
				);
				Ok(self.degraded_estimate(request))
			},
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapApiQuote {
	buy_amount: Amount,
	to: String,
	data: String,
	#[serde(default)]
	value: Option<Amount>,
	#[serde(default)]
	estimated_gas: Option<u64>,
	#[serde(default)]
	estimated_price_impact: Option<String>,
	#[serde(default)]
	sources: Vec<SwapApiSource>,
}

#[derive(Debug, Deserialize)]
struct SwapApiSource {
	name: String,
	/// Share of flow as a decimal fraction, e.g. "0.6"
	proportion: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouterApiQuote {
	out_amount: Amount,
	#[serde(default)]
	price_impact_pct: Option<f64>,
	#[serde(default)]
	compute_units: Option<u64>,
	#[serde(default)]
	route_plan: Vec<RouterPlanStep>,
	#[serde(default)]
	transaction: Option<RouterTx>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouterPlanStep {
	swap_info: RouterSwapInfo,
	percent: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouterSwapInfo {
	amm_key: String,
	#[serde(default)]
	label: Option<String>,
	input_mint: String,
	output_mint: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouterTx {
	to: String,
	data: String,
	#[serde(default)]
	value: Option<Amount>,
}
