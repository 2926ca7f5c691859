//! Location settings and construction-time variant selection.
//!
//! ```toml
//! mode = "hash"
//! initial_url = "http://localhost/"
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::LocationError;
use crate::hash::HashLocation;
use crate::history::HistoryLocation;
use crate::host::NavigationHost;
use crate::location::Location;
use crate::memory::{DEFAULT_URL, MemoryLocation};
use crate::state::{ChangeCallback, Subscription, parse_absolute};

/// Which location variant to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
	/// In-memory state, no host synchronization.
	#[default]
	Memory,
	/// Session history (`pushState`/`popstate`).
	History,
	/// URL fragment (`#!/path`, `hashchange`).
	Hash,
}

/// Location configuration
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSettings {
	/// Variant to build
	#[serde(default)]
	pub mode: LocationMode,

	/// Starting URL for [`LocationMode::Memory`]; ignored by host-synced modes
	#[serde(default = "default_initial_url")]
	pub initial_url: String,
}

fn default_initial_url() -> String {
	DEFAULT_URL.to_string()
}

impl Default for LocationSettings {
	fn default() -> Self {
		Self {
			mode: LocationMode::default(),
			initial_url: default_initial_url(),
		}
	}
}

impl LocationSettings {
	/// Creates settings for `mode` with the default initial URL.
	pub fn new(mode: LocationMode) -> Self {
		Self {
			mode,
			..Self::default()
		}
	}

	/// Sets the initial URL used by memory mode.
	pub fn with_initial_url(mut self, url: impl Into<String>) -> Self {
		self.initial_url = url.into();
		self
	}

	/// Parses settings from a TOML document.
	pub fn from_toml_str(input: &str) -> Result<Self, LocationError> {
		Ok(toml::from_str(input)?)
	}

	/// Builds the configured variant on top of `host`.
	///
	/// Memory mode never touches `host`.
	pub fn build<H>(&self, host: H) -> Result<AnyLocation<H>, LocationError>
	where
		H: NavigationHost + Clone + 'static,
	{
		tracing::debug!(mode = ?self.mode, "building location");
		Ok(match self.mode {
			LocationMode::Memory => {
				AnyLocation::Memory(MemoryLocation::new(parse_absolute(&self.initial_url)?))
			}
			LocationMode::History => AnyLocation::History(HistoryLocation::new(host)?),
			LocationMode::Hash => AnyLocation::Hash(HashLocation::new(host)?),
		})
	}
}

/// A location whose variant was chosen at construction time.
#[derive(Debug)]
pub enum AnyLocation<H: NavigationHost> {
	/// In-memory location.
	Memory(MemoryLocation),
	/// History-backed location.
	History(HistoryLocation<H>),
	/// Hash-backed location.
	Hash(HashLocation<H>),
}

impl<H: NavigationHost> AnyLocation<H> {
	/// Returns the mode this location was built with.
	pub fn mode(&self) -> LocationMode {
		match self {
			Self::Memory(_) => LocationMode::Memory,
			Self::History(_) => LocationMode::History,
			Self::Hash(_) => LocationMode::Hash,
		}
	}
}

impl<H> Location for AnyLocation<H>
where
	H: NavigationHost + Clone + 'static,
{
	fn url(&self) -> Url {
		match self {
			Self::Memory(location) => location.url(),
			Self::History(location) => location.url(),
			Self::Hash(location) => location.url(),
		}
	}

	fn push(&self, target: &str) -> Result<(), LocationError> {
		match self {
			Self::Memory(location) => location.push(target),
			Self::History(location) => location.push(target),
			Self::Hash(location) => location.push(target),
		}
	}

	fn format(&self, target: &str) -> Result<String, LocationError> {
		match self {
			Self::Memory(location) => location.format(target),
			Self::History(location) => location.format(target),
			Self::Hash(location) => location.format(target),
		}
	}

	fn on_change(&self, callback: ChangeCallback) -> Subscription {
		match self {
			Self::Memory(location) => location.on_change(callback),
			Self::History(location) => location.on_change(callback),
			Self::Hash(location) => location.on_change(callback),
		}
	}

	fn disconnect(&self) {
		match self {
			Self::Memory(location) => location.disconnect(),
			Self::History(location) => location.disconnect(),
			Self::Hash(location) => location.disconnect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::host::{HostEvent, MemoryHost};
	use crate::location::LocationExt;
	use rstest::*;

	#[fixture]
	fn host() -> MemoryHost {
		MemoryHost::new("http://localhost:3000/").unwrap()
	}

	#[rstest]
	fn test_defaults() {
		let settings = LocationSettings::default();
		assert_eq!(settings.mode, LocationMode::Memory);
		assert_eq!(settings.initial_url, DEFAULT_URL);
	}

	#[rstest]
	#[case("", LocationMode::Memory)]
	#[case("mode = \"memory\"", LocationMode::Memory)]
	#[case("mode = \"history\"", LocationMode::History)]
	#[case("mode = \"hash\"", LocationMode::Hash)]
	fn test_mode_from_toml(#[case] input: &str, #[case] expected: LocationMode) {
		let settings = LocationSettings::from_toml_str(input).unwrap();
		assert_eq!(settings.mode, expected);
	}

	#[rstest]
	fn test_unknown_mode_is_rejected() {
		let result = LocationSettings::from_toml_str("mode = \"session\"");
		assert!(matches!(result, Err(LocationError::Settings(_))));
	}

	#[rstest]
	fn test_build_memory_uses_initial_url(host: MemoryHost) {
		let settings = LocationSettings::from_toml_str(
			"mode = \"memory\"\ninitial_url = \"http://example.com/start\"",
		)
		.unwrap();
		let location = settings.build(host.clone()).unwrap();

		assert_eq!(location.mode(), LocationMode::Memory);
		assert_eq!(location.href(), "http://example.com/start");
		assert_eq!(host.listener_count(HostEvent::PopState), 0);
		assert_eq!(host.listener_count(HostEvent::HashChange), 0);
	}

	#[rstest]
	fn test_build_memory_rejects_relative_url(host: MemoryHost) {
		let settings = LocationSettings::new(LocationMode::Memory).with_initial_url("/relative");
		assert!(matches!(
			settings.build(host),
			Err(LocationError::InvalidUrl { .. })
		));
	}

	#[rstest]
	fn test_build_history(host: MemoryHost) {
		let location = LocationSettings::new(LocationMode::History)
			.build(host.clone())
			.unwrap();

		location.push("/test").unwrap();
		assert_eq!(host.current_url().as_str(), "http://localhost:3000/test");
		assert_eq!(location.href(), "http://localhost:3000/test");

		location.disconnect();
		assert_eq!(host.listener_count(HostEvent::PopState), 0);
	}

	#[rstest]
	fn test_build_hash(host: MemoryHost) {
		let location = LocationSettings::new(LocationMode::Hash)
			.build(host.clone())
			.unwrap();

		assert_eq!(location.format("/test").unwrap(), "#!/test");
		location.push("/test").unwrap();
		host.dispatch_pending();
		assert_eq!(location.href(), "http://localhost:3000/test");
	}
}
