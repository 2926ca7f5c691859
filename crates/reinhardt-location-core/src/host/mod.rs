//! Host navigation capabilities.
//!
//! A host is the environment that owns the "real" address bar: a browser
//! window, or [`MemoryHost`] for native code and tests. History and hash
//! locations talk to it exclusively through [`NavigationHost`].

mod memory;

pub use memory::MemoryHost;

use core::cell::Cell;
use core::fmt;
use std::rc::Rc;

use crate::error::LocationError;

/// Callback invoked when a host navigation event fires.
pub type HostListener = Rc<dyn Fn()>;

/// Host-originated navigation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
	/// Back/forward traversal of the session history.
	PopState,
	/// The URL fragment changed.
	HashChange,
}

impl HostEvent {
	/// Returns the DOM event type name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::PopState => "popstate",
			Self::HashChange => "hashchange",
		}
	}
}

impl fmt::Display for HostEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Opaque token identifying one listener registration on a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle {
	id: u64,
	event: HostEvent,
}

impl ListenerHandle {
	/// Creates a handle. Hosts allocate `id`s uniquely per registration.
	pub fn new(id: u64, event: HostEvent) -> Self {
		Self { id, event }
	}

	/// Returns the registration id.
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Returns the event this registration listens to.
	pub fn event(&self) -> HostEvent {
		self.event
	}
}

/// Read/write access to the host's address and navigation events.
pub trait NavigationHost {
	/// Returns the host's current absolute href.
	fn href(&self) -> Result<String, LocationError>;

	/// Returns the host's current fragment including the leading `#`, or an
	/// empty string when there is none.
	fn hash(&self) -> Result<String, LocationError>;

	/// Records a new session history entry at `url` without reloading.
	fn push_state(&self, url: &str) -> Result<(), LocationError>;

	/// Sets the host's fragment. A leading `#` is optional.
	fn set_hash(&self, hash: &str) -> Result<(), LocationError>;

	/// Registers `listener` for `event`.
	fn add_listener(
		&self,
		event: HostEvent,
		listener: HostListener,
	) -> Result<ListenerHandle, LocationError>;

	/// Removes a registration. Unknown handles are ignored.
	fn remove_listener(&self, handle: ListenerHandle);
}

/// A listener registration owned by a location variant.
///
/// Released exactly once, either by [`HostBinding::release`] or on drop.
pub struct HostBinding<H: NavigationHost> {
	host: H,
	handle: Cell<Option<ListenerHandle>>,
}

impl<H: NavigationHost> HostBinding<H> {
	/// Registers `listener` on `host` for `event`.
	pub fn register(host: H, event: HostEvent, listener: HostListener) -> Result<Self, LocationError> {
		let handle = host.add_listener(event, listener)?;
		tracing::debug!(%event, id = handle.id(), "host listener registered");
		Ok(Self {
			host,
			handle: Cell::new(Some(handle)),
		})
	}

	/// Returns the host this binding is registered with.
	pub fn host(&self) -> &H {
		&self.host
	}

	/// Returns `true` while the listener is still registered.
	pub fn is_bound(&self) -> bool {
		self.handle.get().is_some()
	}

	/// Removes the listener. Later calls do nothing.
	pub fn release(&self) {
		if let Some(handle) = self.handle.take() {
			self.host.remove_listener(handle);
			tracing::debug!(event = %handle.event(), id = handle.id(), "host listener released");
		}
	}
}

impl<H: NavigationHost> Drop for HostBinding<H> {
	fn drop(&mut self) {
		self.release();
	}
}

impl<H: NavigationHost> fmt::Debug for HostBinding<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HostBinding")
			.field("handle", &self.handle.get())
			.finish()
	}
}
