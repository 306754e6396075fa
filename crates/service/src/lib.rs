//! ChainHopper Service
//!
//! Quote aggregation: concurrent fan-out over a chain's registered quote
//! sources and deterministic best-quote selection.

pub mod aggregator;

pub use aggregator::{Aggregator, QuoteContext};
