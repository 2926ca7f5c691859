//! In-memory location with no host synchronization.

use url::Url;

use crate::error::LocationError;
use crate::location::Location;
use crate::state::{ChangeCallback, LocationState, Subscription, parse_absolute};

/// Default URL for locations created without an explicit one.
pub const DEFAULT_URL: &str = "http://localhost/";

/// A location whose state lives only in memory.
///
/// Useful for server-side rendering, tests, and embedded views where no
/// browser history exists.
///
/// # Example
///
/// ```
/// use reinhardt_location_core::{Location, LocationExt, MemoryLocation};
///
/// let location = MemoryLocation::parse("http://example.com").unwrap();
/// location.push("/users/42/").unwrap();
/// assert_eq!(location.href(), "http://example.com/users/42/");
/// ```
#[derive(Debug, Clone)]
pub struct MemoryLocation {
	state: LocationState,
}

impl MemoryLocation {
	/// Creates a location at `url`.
	pub fn new(url: Url) -> Self {
		Self {
			state: LocationState::new(url),
		}
	}

	/// Creates a location from an absolute URL string.
	pub fn parse(url: &str) -> Result<Self, LocationError> {
		parse_absolute(url).map(Self::new)
	}

	/// Replaces the current URL, notifying subscribers when the href changes.
	///
	/// Returns `false` when the href was unchanged and nothing was notified.
	pub fn set_url(&self, url: Url) -> bool {
		self.state.set_url(url)
	}

	/// Returns the shared state backing this location.
	pub fn state(&self) -> &LocationState {
		&self.state
	}
}

impl Default for MemoryLocation {
	fn default() -> Self {
		Self::new(Url::parse(DEFAULT_URL).expect("DEFAULT_URL is a valid absolute URL"))
	}
}

impl Location for MemoryLocation {
	fn url(&self) -> Url {
		self.state.url()
	}

	fn push(&self, target: &str) -> Result<(), LocationError> {
		let formatted = self.format(target)?;
		let next = self.state.resolve(&formatted)?;
		self.state.set_url(next);
		Ok(())
	}

	fn format(&self, target: &str) -> Result<String, LocationError> {
		Ok(target.to_string())
	}

	fn on_change(&self, callback: ChangeCallback) -> Subscription {
		self.state.subscribe(callback)
	}
}
