//! Shared location state and the change-subscription protocol.
//!
//! [`LocationState`] owns the current URL and the subscriber registry. Every
//! location variant composes one of these and routes all URL changes through
//! [`LocationState::set_url`], which is the only place notifications fire.
//!
//! ## Notification semantics
//!
//! - Assigning a URL whose href equals the current href is a no-op.
//! - Subscribers are called synchronously, in registration order, with the
//!   new URL.
//! - Delivery iterates over a snapshot taken when the change is committed.
//!   Callbacks may subscribe, unsubscribe, or navigate again while being
//!   notified without disturbing the in-flight delivery.
//! - A change committed from inside a callback supersedes the one being
//!   delivered: the outer delivery stops, so the last URL every subscriber
//!   receives is the current one.

use core::cell::{Cell, RefCell};
use core::fmt;
use std::rc::{Rc, Weak};

use url::Url;

use crate::error::LocationError;

/// Callback invoked with the new URL whenever a location changes.
pub type ChangeCallback = Rc<dyn Fn(&Url)>;

/// Identifier of a single registration in a subscriber registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

#[derive(Default)]
struct SubscriberRegistry {
	next_id: u64,
	entries: Vec<(SubscriberId, ChangeCallback)>,
}

impl SubscriberRegistry {
	fn insert(&mut self, callback: ChangeCallback) -> SubscriberId {
		// Same callback registered twice keeps a single entry
		if let Some((id, _)) = self
			.entries
			.iter()
			.find(|(_, existing)| Rc::ptr_eq(existing, &callback))
		{
			return *id;
		}

		let id = SubscriberId(self.next_id);
		self.next_id += 1;
		self.entries.push((id, callback));
		id
	}

	fn remove(&mut self, id: SubscriberId) -> bool {
		let before = self.entries.len();
		self.entries.retain(|(entry_id, _)| *entry_id != id);
		self.entries.len() != before
	}

	fn snapshot(&self) -> Vec<ChangeCallback> {
		self.entries
			.iter()
			.map(|(_, callback)| Rc::clone(callback))
			.collect()
	}
}

struct StateInner {
	url: RefCell<Url>,
	// Bumped on every committed change
	generation: Cell<u64>,
	subscribers: Rc<RefCell<SubscriberRegistry>>,
}

/// Current-URL state plus the subscribers interested in it.
///
/// Cloning is cheap and yields a handle to the same state.
#[derive(Clone)]
pub struct LocationState {
	inner: Rc<StateInner>,
}

impl LocationState {
	/// Creates state holding `url`. Construction is not a change, so nothing
	/// is notified.
	pub fn new(url: Url) -> Self {
		Self {
			inner: Rc::new(StateInner {
				url: RefCell::new(url),
				generation: Cell::new(0),
				subscribers: Rc::new(RefCell::new(SubscriberRegistry::default())),
			}),
		}
	}

	/// Returns a clone of the current URL.
	pub fn url(&self) -> Url {
		self.inner.url.borrow().clone()
	}

	/// Replaces the current URL and notifies subscribers.
	///
	/// Returns `false` without notifying anyone when `next` has the same href
	/// as the current URL. If a subscriber commits another change while this
	/// one is being delivered, the remaining subscribers only receive the
	/// newer change.
	pub fn set_url(&self, next: Url) -> bool {
		{
			let mut current = self.inner.url.borrow_mut();
			if current.as_str() == next.as_str() {
				tracing::trace!(url = %next, "location unchanged, skipping notification");
				return false;
			}
			*current = next.clone();
		}
		let generation = self.inner.generation.get() + 1;
		self.inner.generation.set(generation);

		let callbacks = self.inner.subscribers.borrow().snapshot();
		tracing::debug!(url = %next, subscribers = callbacks.len(), "location changed");
		for callback in callbacks {
			if self.inner.generation.get() != generation {
				tracing::trace!(url = %next, "superseded by a newer change, stopping delivery");
				break;
			}
			callback(&next);
		}
		true
	}

	/// Resolves `target` against the current URL.
	///
	/// Follows WHATWG relative resolution: absolute URLs replace the base,
	/// paths, queries, and bare fragments are merged into it. Non-ASCII
	/// characters are percent-encoded as given and repeated slashes are kept.
	pub fn resolve(&self, target: &str) -> Result<Url, LocationError> {
		self.inner
			.url
			.borrow()
			.join(target)
			.map_err(|source| LocationError::invalid_url(target, source))
	}

	/// Registers `callback` to be called on every change.
	pub fn subscribe(&self, callback: ChangeCallback) -> Subscription {
		let id = self.inner.subscribers.borrow_mut().insert(callback);
		tracing::trace!(?id, "location subscriber registered");
		Subscription {
			id,
			registry: Rc::downgrade(&self.inner.subscribers),
			active: Cell::new(true),
		}
	}

	/// Returns the number of registered subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.inner.subscribers.borrow().entries.len()
	}

	/// Returns a weak handle that does not keep the state alive.
	pub fn downgrade(&self) -> WeakLocationState {
		WeakLocationState {
			inner: Rc::downgrade(&self.inner),
		}
	}
}

impl fmt::Debug for LocationState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LocationState")
			.field("url", &self.inner.url.borrow().as_str())
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}

/// Weak counterpart of [`LocationState`], held by host event listeners.
#[derive(Clone)]
pub struct WeakLocationState {
	inner: Weak<StateInner>,
}

impl WeakLocationState {
	/// Upgrades to a strong handle if the state is still alive.
	pub fn upgrade(&self) -> Option<LocationState> {
		self.inner.upgrade().map(|inner| LocationState { inner })
	}
}

/// Handle returned by `on_change`; removes exactly one registration.
///
/// Dropping a subscription does not unsubscribe. Call
/// [`Subscription::unsubscribe`] to stop receiving changes.
pub struct Subscription {
	id: SubscriberId,
	registry: Weak<RefCell<SubscriberRegistry>>,
	active: Cell<bool>,
}

impl Subscription {
	/// Removes the registration. Calling this more than once is a no-op.
	pub fn unsubscribe(&self) {
		if !self.active.replace(false) {
			return;
		}
		if let Some(registry) = self.registry.upgrade() {
			let removed = registry.borrow_mut().remove(self.id);
			tracing::trace!(id = ?self.id, removed, "location subscriber removed");
		}
	}

	/// Returns the registration id.
	pub fn id(&self) -> SubscriberId {
		self.id
	}

	/// Returns `true` until [`Subscription::unsubscribe`] has been called.
	pub fn is_active(&self) -> bool {
		self.active.get()
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("id", &self.id)
			.field("active", &self.active.get())
			.finish()
	}
}

/// Parses an absolute URL, mapping failures to [`LocationError::InvalidUrl`].
pub fn parse_absolute(input: &str) -> Result<Url, LocationError> {
	Url::parse(input).map_err(|source| LocationError::invalid_url(input, source))
}
