//! Shared limits and defaults

/// How long an aggregated quote stays valid
pub const QUOTE_TTL_SECS: i64 = 60;

/// Default per-plugin timeout during aggregation
pub const DEFAULT_SOURCE_TIMEOUT_MS: u64 = 3_000;

/// Highest slippage tolerance a request may carry (50%)
pub const MAX_SLIPPAGE_BPS: u32 = 5_000;

/// Protocol fee taken on the quoted output
pub const PROTOCOL_FEE_BPS: u32 = 30;
