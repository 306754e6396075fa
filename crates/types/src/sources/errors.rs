//! Error types for quote source plugins

use thiserror::Error;

/// Failures on a plugin's live path
///
/// These never cross the plugin boundary: the generic plugin converts them to
/// a degraded estimate or a "no quote" result before returning.
#[derive(Error, Debug)]
pub enum SourceError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	HttpStatus { status_code: u16, reason: String },

	#[error("Invalid response from venue {venue}: {reason}")]
	InvalidResponse { venue: String, reason: String },

	#[error("Venue configuration error: {reason}")]
	Config { reason: String },
}

pub type SourceResult<T> = Result<T, SourceError>;
