//! ChainHopper
//!
//! Multi-chain swap quoting and execution core. One [`ChainAdapter`] per
//! enabled chain exposes reads, quoting, and transaction lifecycle over a
//! uniform contract; quoting fans out to per-chain venue plugins and selects
//! a single best quote.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use chainhopper::{AdapterFactory, ChainRegistry, SourceRegistry};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let chains = chainhopper::load_registry()?;
//! let sources = Arc::new(SourceRegistry::with_defaults(&chains));
//! let adapters = AdapterFactory::from_registry(&chains, sources)?;
//!
//! let eth = adapters.get("ethereum").ok_or("ethereum not enabled")?;
//! let usdc = eth.get_token("USDC").await?;
//! # Ok(())
//! # }
//! ```

pub use chainhopper_adapters::{
	AccountLedgerAdapter, AdapterFactory, EvmAdapter, ObjectLedgerAdapter, RpcClient, SwapEngine,
};
pub use chainhopper_config::{load_from_path, load_registry, usd_estimate, ChainRegistry, ConfigError};
pub use chainhopper_service::{Aggregator, QuoteContext};
pub use chainhopper_sources::{
	builtin_profiles, HttpVenueSource, SourceRegistry, VenueProfile, WireFormat,
};
pub use chainhopper_types::{
	chrono, constants, format_units, parse_units, AdapterError, AdapterResult, AggregatedQuote, Amount,
	AmountError, ChainAdapter, ChainConfig, ChainFamily, ChainStatus, FeeAmount, FeeBreakdown,
	NativeCurrency, QuoteSource, QuoteSourceResult, QuoteTier, RouteHop, SourceError, SourceResult,
	SwapRequest, Token, TokenBalance, TransactionReceipt, TxPayload, TxStatus, UnsignedTransaction,
	ValidationError,
};

pub mod mocks;
