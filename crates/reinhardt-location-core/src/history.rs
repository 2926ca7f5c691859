//! Location synchronized with the host's session history.

use std::rc::Rc;

use url::Url;

use crate::error::LocationError;
use crate::host::{HostBinding, HostEvent, NavigationHost};
use crate::location::Location;
use crate::state::{ChangeCallback, LocationState, Subscription, parse_absolute};

/// History-API backed location.
///
/// Reads the host's href on construction and listens for `popstate` so that
/// back/forward traversal updates the location. [`push`](Location::push)
/// records a host history entry first and then updates internal state, so
/// subscribers always observe a host that already shows the new URL.
///
/// # Example
///
/// ```
/// use reinhardt_location_core::{HistoryLocation, Location, LocationExt, MemoryHost};
///
/// let host = MemoryHost::new("http://localhost:3000/").unwrap();
/// let location = HistoryLocation::new(host.clone()).unwrap();
///
/// location.push("/users/").unwrap();
/// assert_eq!(host.current_url().as_str(), "http://localhost:3000/users/");
/// assert_eq!(location.href(), "http://localhost:3000/users/");
/// ```
#[derive(Debug)]
pub struct HistoryLocation<H: NavigationHost> {
	state: LocationState,
	binding: HostBinding<H>,
}

impl<H> HistoryLocation<H>
where
	H: NavigationHost + Clone + 'static,
{
	/// Creates a location mirroring `host`'s current URL.
	pub fn new(host: H) -> Result<Self, LocationError> {
		let state = LocationState::new(parse_absolute(&host.href()?)?);

		let weak = state.downgrade();
		let listener_host = host.clone();
		let binding = HostBinding::register(
			host,
			HostEvent::PopState,
			Rc::new(move || {
				let Some(state) = weak.upgrade() else {
					return;
				};
				match listener_host.href().and_then(|href| parse_absolute(&href)) {
					Ok(url) => {
						state.set_url(url);
					}
					Err(err) => {
						tracing::warn!(error = %err, "failed to read host URL on popstate");
					}
				}
			}),
		)?;

		Ok(Self { state, binding })
	}

	/// Returns the host this location is synchronized with.
	pub fn host(&self) -> &H {
		self.binding.host()
	}

	/// Returns `true` while the `popstate` listener is registered.
	pub fn is_connected(&self) -> bool {
		self.binding.is_bound()
	}

	/// Removes the `popstate` listener. Repeated calls are no-ops.
	pub fn unsubscribe(&self) {
		self.binding.release();
	}
}

impl<H> Location for HistoryLocation<H>
where
	H: NavigationHost + Clone + 'static,
{
	fn url(&self) -> Url {
		self.state.url()
	}

	fn push(&self, target: &str) -> Result<(), LocationError> {
		let formatted = self.format(target)?;
		let next = self.state.resolve(&formatted)?;

		self.binding.host().push_state(next.as_str())?;
		self.state.set_url(next);
		Ok(())
	}

	fn format(&self, target: &str) -> Result<String, LocationError> {
		Ok(target.to_string())
	}

	fn on_change(&self, callback: ChangeCallback) -> Subscription {
		self.state.subscribe(callback)
	}

	fn disconnect(&self) {
		self.unsubscribe();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::host::MemoryHost;
	use crate::location::LocationExt;
	use core::cell::{Cell, RefCell};
	use rstest::*;

	#[fixture]
	fn host() -> MemoryHost {
		MemoryHost::new("http://localhost:3000/").unwrap()
	}

	#[rstest]
	fn test_initial_url_from_host(host: MemoryHost) {
		host.push_state("/start?x=1").unwrap();
		let location = HistoryLocation::new(host).unwrap();
		assert_eq!(location.href(), "http://localhost:3000/start?x=1");
	}

	#[rstest]
	fn test_push_records_host_entry(host: MemoryHost) {
		let location = HistoryLocation::new(host.clone()).unwrap();

		location.push("/test").unwrap();

		assert_eq!(host.href().unwrap(), "http://localhost:3000/test");
		assert_eq!(location.href(), "http://localhost:3000/test");
		assert_eq!(host.push_state_calls(), 1);
	}

	#[rstest]
	fn test_push_fragment(host: MemoryHost) {
		let location = HistoryLocation::new(host.clone()).unwrap();

		location.push("#test").unwrap();

		assert_eq!(host.href().unwrap(), "http://localhost:3000/#test");
		assert_eq!(location.href(), "http://localhost:3000/#test");
		assert_eq!(host.push_state_calls(), 1);
	}

	#[rstest]
	fn test_subscriber_sees_host_already_updated(host: MemoryHost) {
		let location = HistoryLocation::new(host.clone()).unwrap();
		let observed = Rc::new(RefCell::new(None));
		let sink = Rc::clone(&observed);
		let probe = host.clone();
		let _sub = location.subscribe(move |_| {
			*sink.borrow_mut() = Some(probe.href().unwrap());
		});

		location.push("/next").unwrap();
		assert_eq!(
			observed.borrow().as_deref(),
			Some("http://localhost:3000/next")
		);
	}

	#[rstest]
	fn test_popstate_resyncs_location(host: MemoryHost) {
		let location = HistoryLocation::new(host.clone()).unwrap();
		let count = Rc::new(Cell::new(0));
		let seen = Rc::clone(&count);
		let _sub = location.subscribe(move |_| seen.set(seen.get() + 1));

		location.push("/a").unwrap();
		location.push("/b").unwrap();
		assert_eq!(count.get(), 2);

		host.back();
		host.dispatch_pending();
		assert_eq!(location.href(), "http://localhost:3000/a");
		assert_eq!(count.get(), 3);
	}

	#[rstest]
	fn test_denied_navigation_leaves_state(host: MemoryHost) {
		let location = HistoryLocation::new(host.clone()).unwrap();

		let result = location.push("https://elsewhere.example/");
		assert!(matches!(result, Err(LocationError::NavigationFailed(_))));
		assert_eq!(location.href(), "http://localhost:3000/");
	}

	#[rstest]
	fn test_unsubscribe_releases_listener(host: MemoryHost) {
		let location = HistoryLocation::new(host.clone()).unwrap();
		assert_eq!(host.listener_count(HostEvent::PopState), 1);

		location.unsubscribe();
		location.disconnect();
		assert!(!location.is_connected());
		assert_eq!(host.listener_count(HostEvent::PopState), 0);

		host.push_state("/elsewhere").unwrap();
		host.push_state("/again").unwrap();
		host.back();
		host.dispatch_pending();
		assert_eq!(location.href(), "http://localhost:3000/");
	}

	#[rstest]
	fn test_drop_releases_listener(host: MemoryHost) {
		{
			let _location = HistoryLocation::new(host.clone()).unwrap();
			assert_eq!(host.listener_count(HostEvent::PopState), 1);
		}
		assert_eq!(host.listener_count(HostEvent::PopState), 0);
	}
}
