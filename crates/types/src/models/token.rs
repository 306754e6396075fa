//! Token model

use serde::{Deserialize, Serialize};

/// A token on one chain
///
/// Constructed on demand by adapters; not persisted by this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
	/// Contract address or venue-specific identifier
	pub address: String,
	/// Chain this token belongs to
	pub chain_id: String,
	pub symbol: String,
	pub name: String,
	pub decimals: u8,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub logo_uri: Option<String>,
	pub is_native: bool,
	pub is_verified: bool,
}

impl Token {
	/// Sentinel address used for a chain's native currency
	pub const NATIVE_ADDRESS: &'static str = "native";

	pub fn new(
		address: impl Into<String>,
		chain_id: impl Into<String>,
		symbol: impl Into<String>,
		name: impl Into<String>,
		decimals: u8,
	) -> Self {
		Self {
			address: address.into(),
			chain_id: chain_id.into(),
			symbol: symbol.into(),
			name: name.into(),
			decimals,
			logo_uri: None,
			is_native: false,
			is_verified: false,
		}
	}

	pub fn verified(mut self) -> Self {
		self.is_verified = true;
		self
	}

	/// Whether `identifier` refers to this token, by address or symbol
	pub fn matches(&self, identifier: &str) -> bool {
		self.address.eq_ignore_ascii_case(identifier)
			|| self.symbol.eq_ignore_ascii_case(identifier)
	}
}
