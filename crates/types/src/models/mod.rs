//! Shared domain models

use thiserror::Error;

pub mod amount;
pub mod chain;
pub mod token;

pub use amount::{format_units, parse_units, Amount, BPS_DENOMINATOR};
pub use chain::{ChainConfig, ChainFamily, ChainStatus, NativeCurrency};
pub use token::Token;

/// Errors from amount parsing and unit conversion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmountError {
	#[error("Invalid decimal value: {value}")]
	InvalidDecimal { value: String },

	#[error("Value overflows 256 bits: {value}")]
	Overflow { value: String },

	#[error("Too many fractional digits in {value} for {decimals} decimals")]
	TooManyFractionalDigits { value: String, decimals: u8 },
}
