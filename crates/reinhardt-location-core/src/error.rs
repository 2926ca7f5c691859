//! Error types for location handling.

use thiserror::Error;

/// Errors that can occur while reading, resolving, or navigating a location.
#[derive(Debug, Error)]
pub enum LocationError {
	/// A URL or navigation target could not be parsed or resolved.
	#[error("invalid URL '{input}': {source}")]
	InvalidUrl {
		/// The raw input that failed to parse.
		input: String,
		/// Underlying parse error.
		#[source]
		source: url::ParseError,
	},

	/// The host environment (window, history, location) is not available.
	#[error("host unavailable: {0}")]
	HostUnavailable(String),

	/// The host refused to perform a navigation.
	///
	/// Typically raised for cross-origin history entries or restricted
	/// embedding contexts.
	#[error("navigation failed: {0}")]
	NavigationFailed(String),

	/// Location settings could not be loaded.
	#[error("invalid location settings: {0}")]
	Settings(String),
}

impl LocationError {
	/// Builds an [`LocationError::InvalidUrl`] for the given input.
	pub fn invalid_url(input: impl Into<String>, source: url::ParseError) -> Self {
		Self::InvalidUrl {
			input: input.into(),
			source,
		}
	}
}

impl From<toml::de::Error> for LocationError {
	fn from(err: toml::de::Error) -> Self {
		Self::Settings(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_invalid_url_display() {
		let err = LocationError::invalid_url("not a url", url::ParseError::RelativeUrlWithoutBase);
		let message = err.to_string();
		assert!(message.contains("'not a url'"));
		assert!(message.contains("relative URL without a base"));
	}

	#[rstest]
	#[case(LocationError::HostUnavailable("no window".to_string()), "host unavailable: no window")]
	#[case(
		LocationError::NavigationFailed("SecurityError".to_string()),
		"navigation failed: SecurityError"
	)]
	#[case(LocationError::Settings("bad mode".to_string()), "invalid location settings: bad mode")]
	fn test_error_display(#[case] err: LocationError, #[case] expected: &str) {
		assert_eq!(err.to_string(), expected);
	}
}
