//! Error types for swap request validation

use thiserror::Error;

/// Validation errors surfaced before any network call is attempted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
	#[error("Missing required field: {field}")]
	MissingField { field: String },

	#[error("Invalid token identifier: {field}")]
	InvalidToken { field: String },

	#[error("Invalid amount: {reason}")]
	InvalidAmount { reason: String },

	#[error("Invalid slippage tolerance: {bps} bps (maximum {max} bps)")]
	InvalidSlippage { bps: u32, max: u32 },

	#[error("Invalid recipient address: {address}")]
	InvalidRecipient { address: String },

	#[error("Deadline {deadline} is in the past")]
	DeadlinePassed { deadline: u64 },
}

pub type ValidationResult<T> = Result<T, ValidationError>;
