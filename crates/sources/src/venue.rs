//! Venue profiles
//!
//! A `VenueProfile` is the full description of one liquidity venue: where to
//! reach it, how to read its responses, and what to assume when it is down.
//! The generic HTTP plugin is driven entirely by these values, so adding a
//! venue is a new profile, not a new module.

use serde::{Deserialize, Serialize};

/// How a venue's quote endpoint is shaped
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WireFormat {
	/// 0x-style swap API: sellToken/buyToken query, calldata in the response
	SwapApi,
	/// Jupiter-style router API: mint pair query, route plan in the response
	RouterApi,
}

/// Configuration for one venue on one chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VenueProfile {
	/// Venue name, e.g. "zeroex" or "jupiter"
	pub venue: String,
	/// Chain this venue serves
	pub chain_id: String,
	/// Base URL of the venue's quote API
	pub base_url: String,
	pub wire: WireFormat,
	/// Router/program the degraded payload points at
	pub router_address: String,
	/// Gas or compute-unit estimate used when the live call fails
	pub fallback_gas: u64,
	/// Conservative output haircut for degraded estimates, in basis points
	pub haircut_bps: u32,
	/// Flat price-impact guess for degraded estimates, percent
	pub impact_guess_pct: f64,
	/// Venue fee, when the venue charges one
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fee_bps: Option<u32>,
	/// Per-request HTTP timeout against this venue
	pub timeout_ms: u64,
}

impl VenueProfile {
	/// Profile with venue-typical defaults; callers override what differs
	pub fn new(
		venue: impl Into<String>,
		chain_id: impl Into<String>,
		base_url: impl Into<String>,
		wire: WireFormat,
		router_address: impl Into<String>,
	) -> Self {
		Self {
			venue: venue.into(),
			chain_id: chain_id.into(),
			base_url: base_url.into(),
			wire,
			router_address: router_address.into(),
			fallback_gas: 150_000,
			haircut_bps: 100,
			impact_guess_pct: 0.5,
			fee_bps: None,
			timeout_ms: 2_500,
		}
	}

	pub fn with_fallback_gas(mut self, gas: u64) -> Self {
		self.fallback_gas = gas;
		self
	}

	pub fn with_haircut_bps(mut self, bps: u32) -> Self {
		self.haircut_bps = bps;
		self
	}

	pub fn with_fee_bps(mut self, bps: u32) -> Self {
		self.fee_bps = Some(bps);
		self
	}

	pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
		self.timeout_ms = timeout_ms;
		self
	}
}
