//! The `Location` trait shared by every location variant.

use core::fmt;
use std::rc::Rc;

use url::Url;

use crate::error::LocationError;
use crate::state::{ChangeCallback, Subscription};

/// Navigation state tracking a current absolute URL.
///
/// Implemented by [`MemoryLocation`](crate::MemoryLocation),
/// [`HistoryLocation`](crate::HistoryLocation) and
/// [`HashLocation`](crate::HashLocation). UI bindings consume a location
/// through this trait only: they read [`url`](Location::url), navigate with
/// [`push`](Location::push), render hrefs with [`format`](Location::format)
/// and re-render from [`on_change`](Location::on_change).
pub trait Location {
	/// Returns the current absolute URL.
	fn url(&self) -> Url;

	/// Navigates to `target`, resolved relative to the current URL.
	///
	/// `target` may be an absolute URL, a path, a query string or a bare
	/// fragment. Pushing a target that resolves to the current href does not
	/// notify subscribers.
	fn push(&self, target: &str) -> Result<(), LocationError>;

	/// Returns the on-the-wire representation of `target`, suitable for an
	/// anchor's `href`.
	fn format(&self, target: &str) -> Result<String, LocationError>;

	/// Registers `callback`, invoked synchronously with the new URL on every
	/// change.
	fn on_change(&self, callback: ChangeCallback) -> Subscription;

	/// Releases host event listeners. No-op for locations without a host.
	fn disconnect(&self) {}
}

/// Convenience methods available on every [`Location`].
pub trait LocationExt: Location {
	/// Registers a closure without wrapping it in an `Rc` first.
	fn subscribe<F>(&self, callback: F) -> Subscription
	where
		F: Fn(&Url) + 'static,
	{
		self.on_change(Rc::new(callback))
	}

	/// Returns the current href as a string.
	fn href(&self) -> String {
		self.url().to_string()
	}
}

impl<L: Location + ?Sized> LocationExt for L {}

impl fmt::Debug for dyn Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Location")
			.field("url", &self.url().as_str())
			.finish()
	}
}

impl<L: Location + ?Sized> Location for Rc<L> {
	fn url(&self) -> Url {
		(**self).url()
	}

	fn push(&self, target: &str) -> Result<(), LocationError> {
		(**self).push(target)
	}

	fn format(&self, target: &str) -> Result<String, LocationError> {
		(**self).format(target)
	}

	fn on_change(&self, callback: ChangeCallback) -> Subscription {
		(**self).on_change(callback)
	}

	fn disconnect(&self) {
		(**self).disconnect()
	}
}
