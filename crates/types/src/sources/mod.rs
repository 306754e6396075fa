//! Quote source plugin contract

use async_trait::async_trait;
use std::fmt::Debug;

use crate::quotes::{QuoteSourceResult, SwapRequest};

pub mod errors;

pub use errors::{SourceError, SourceResult};

/// A single liquidity venue queried during aggregation
///
/// Implementations are chain-scoped, side-effect-free outside their own HTTP
/// client, and safe to invoke concurrently with any other plugin. A request
/// for a different chain must return `Ok(None)` without any I/O.
///
/// The live path may fail internally; implementations degrade to a local
/// estimate or return `Ok(None)` rather than propagating venue failures. The
/// aggregator still treats an `Err` the same as "no quote", so a misbehaving
/// plugin can never fail the whole aggregation.
#[async_trait]
pub trait QuoteSource: Send + Sync + Debug {
	/// Venue name, used for routes and tie-breaking logs
	fn name(&self) -> &str;

	/// Chain this venue quotes for
	fn chain_id(&self) -> &str;

	/// Produce a normalized quote, or `None` if the venue has nothing usable
	async fn quote(&self, request: &SwapRequest) -> SourceResult<Option<QuoteSourceResult>>;
}
