//! ChainHopper Types
//!
//! Shared models and traits for the ChainHopper swap core. This crate holds
//! all domain models organized by business entity.

pub mod adapters;
pub mod constants;
pub mod models;
pub mod quotes;
pub mod sources;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use models::{
	format_units, parse_units, Amount, AmountError, ChainConfig, ChainFamily, ChainStatus,
	NativeCurrency, Token, BPS_DENOMINATOR,
};

pub use quotes::{
	AggregatedQuote, FeeAmount, FeeBreakdown, QuoteSourceResult, QuoteTier, RouteHop, SwapRequest,
	TransactionReceipt, TxPayload, TxStatus, UnsignedTransaction, ValidationError,
	ValidationResult,
};

pub use sources::{QuoteSource, SourceError, SourceResult};

pub use adapters::{AdapterError, AdapterResult, ChainAdapter, TokenBalance};
