//! Error types for chain adapter operations

use thiserror::Error;

use crate::quotes::ValidationError;

/// Chain adapter operation errors
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("Request validation failed: {0}")]
	Validation(#[from] ValidationError),

	#[error("No quotes available for chain {chain_id}")]
	NoQuote { chain_id: String },

	#[error("Chain not supported: {chain_id}")]
	UnsupportedChain { chain_id: String },

	#[error("Invalid address for chain {chain_id}: {address}")]
	InvalidAddress { chain_id: String, address: String },

	#[error("Token not found on chain {chain_id}: {identifier}")]
	TokenNotFound {
		chain_id: String,
		identifier: String,
	},

	#[error("RPC call failed: {reason}")]
	Rpc { reason: String },

	#[error("All RPC endpoints exhausted for chain {chain_id}")]
	RpcExhausted { chain_id: String },

	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("Transaction build failed: {reason}")]
	BuildFailed { reason: String },

	#[error("Transaction submission rejected: {reason}")]
	Submission { reason: String },
}

pub type AdapterResult<T> = Result<T, AdapterError>;
