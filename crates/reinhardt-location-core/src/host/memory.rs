//! In-process navigation host.
//!
//! [`MemoryHost`] mimics the parts of a browser window a location depends
//! on: a session history stack, a fragment, and `popstate`/`hashchange`
//! events. Events are queued rather than dispatched inline, matching the
//! browser's event loop; call [`MemoryHost::dispatch_pending`] to deliver
//! them.
//!
//! | Operation | New entry | Queued events |
//! |-----------|-----------|---------------|
//! | `push_state` | Yes | None |
//! | `set_hash` (different fragment) | Yes | `hashchange` |
//! | `set_hash` (same fragment) | No | None |
//! | `back` / `forward` / `go` | No | `popstate`, plus `hashchange` if the fragment differs |

use core::cell::{Cell, RefCell};
use core::fmt;
use std::collections::VecDeque;
use std::rc::Rc;

use url::Url;

use super::{HostEvent, HostListener, ListenerHandle, NavigationHost};
use crate::error::LocationError;
use crate::state::parse_absolute;

struct MemoryHostInner {
	entries: RefCell<Vec<Url>>,
	index: Cell<usize>,
	listeners: RefCell<Vec<(ListenerHandle, HostListener)>>,
	pending: RefCell<VecDeque<HostEvent>>,
	next_listener_id: Cell<u64>,
	push_state_calls: Cell<usize>,
}

/// A navigation host backed by memory.
///
/// Cloning yields another handle to the same host.
#[derive(Clone)]
pub struct MemoryHost {
	inner: Rc<MemoryHostInner>,
}

impl MemoryHost {
	/// Creates a host whose only history entry is `href`.
	pub fn new(href: &str) -> Result<Self, LocationError> {
		let url = parse_absolute(href)?;
		Ok(Self {
			inner: Rc::new(MemoryHostInner {
				entries: RefCell::new(vec![url]),
				index: Cell::new(0),
				listeners: RefCell::new(Vec::new()),
				pending: RefCell::new(VecDeque::new()),
				next_listener_id: Cell::new(0),
				push_state_calls: Cell::new(0),
			}),
		})
	}

	/// Returns the URL of the current history entry.
	pub fn current_url(&self) -> Url {
		self.inner.entries.borrow()[self.inner.index.get()].clone()
	}

	/// Returns the number of session history entries.
	pub fn history_len(&self) -> usize {
		self.inner.entries.borrow().len()
	}

	/// Returns the index of the current history entry.
	pub fn history_index(&self) -> usize {
		self.inner.index.get()
	}

	/// Returns how many times [`NavigationHost::push_state`] succeeded.
	pub fn push_state_calls(&self) -> usize {
		self.inner.push_state_calls.get()
	}

	/// Returns the number of listeners registered for `event`.
	pub fn listener_count(&self, event: HostEvent) -> usize {
		self.inner
			.listeners
			.borrow()
			.iter()
			.filter(|(handle, _)| handle.event() == event)
			.count()
	}

	/// Returns the number of queued, undelivered events.
	pub fn pending_events(&self) -> usize {
		self.inner.pending.borrow().len()
	}

	/// Moves one entry back. Returns `false` at the start of history.
	pub fn back(&self) -> bool {
		self.go(-1)
	}

	/// Moves one entry forward. Returns `false` at the end of history.
	pub fn forward(&self) -> bool {
		self.go(1)
	}

	/// Traverses `delta` entries. Out-of-range or zero deltas do nothing.
	pub fn go(&self, delta: isize) -> bool {
		let current = self.inner.index.get();
		let len = self.history_len();
		let Some(target) = current.checked_add_signed(delta) else {
			return false;
		};
		if delta == 0 || target >= len {
			return false;
		}

		let fragment_changed = {
			let entries = self.inner.entries.borrow();
			entries[current].fragment() != entries[target].fragment()
		};
		self.inner.index.set(target);
		tracing::debug!(from = current, to = target, "memory host traversed history");

		self.queue(HostEvent::PopState);
		if fragment_changed {
			self.queue(HostEvent::HashChange);
		}
		true
	}

	/// Delivers every queued event to the listeners registered at delivery
	/// time. Events queued by listeners are delivered in the same call.
	///
	/// Returns the number of events delivered.
	pub fn dispatch_pending(&self) -> usize {
		let mut delivered = 0;
		loop {
			let Some(event) = self.inner.pending.borrow_mut().pop_front() else {
				break;
			};
			let listeners: Vec<HostListener> = self
				.inner
				.listeners
				.borrow()
				.iter()
				.filter(|(handle, _)| handle.event() == event)
				.map(|(_, listener)| Rc::clone(listener))
				.collect();
			tracing::trace!(%event, listeners = listeners.len(), "memory host dispatching event");
			for listener in listeners {
				listener();
			}
			delivered += 1;
		}
		delivered
	}

	fn queue(&self, event: HostEvent) {
		self.inner.pending.borrow_mut().push_back(event);
	}

	fn push_entry(&self, url: Url) {
		let mut entries = self.inner.entries.borrow_mut();
		let index = self.inner.index.get();
		entries.truncate(index + 1);
		entries.push(url);
		self.inner.index.set(index + 1);
	}
}

impl NavigationHost for MemoryHost {
	fn href(&self) -> Result<String, LocationError> {
		Ok(self.current_url().to_string())
	}

	fn hash(&self) -> Result<String, LocationError> {
		Ok(match self.current_url().fragment() {
			Some(fragment) if !fragment.is_empty() => format!("#{}", fragment),
			_ => String::new(),
		})
	}

	fn push_state(&self, url: &str) -> Result<(), LocationError> {
		let current = self.current_url();
		let next = current
			.join(url)
			.map_err(|source| LocationError::invalid_url(url, source))?;

		if next.origin() != current.origin() {
			return Err(LocationError::NavigationFailed(format!(
				"cannot push '{}' from origin '{}'",
				next,
				current.origin().ascii_serialization()
			)));
		}

		tracing::debug!(url = %next, "memory host pushed history entry");
		self.push_entry(next);
		self.inner
			.push_state_calls
			.set(self.inner.push_state_calls.get() + 1);
		Ok(())
	}

	fn set_hash(&self, hash: &str) -> Result<(), LocationError> {
		let fragment = hash.strip_prefix('#').unwrap_or(hash);
		let current = self.current_url();

		let mut next = current.clone();
		next.set_fragment(Some(fragment));
		if next.fragment() == current.fragment() {
			return Ok(());
		}

		tracing::debug!(url = %next, "memory host changed fragment");
		self.push_entry(next);
		self.queue(HostEvent::HashChange);
		Ok(())
	}

	fn add_listener(
		&self,
		event: HostEvent,
		listener: HostListener,
	) -> Result<ListenerHandle, LocationError> {
		let id = self.inner.next_listener_id.get();
		self.inner.next_listener_id.set(id + 1);

		let handle = ListenerHandle::new(id, event);
		self.inner.listeners.borrow_mut().push((handle, listener));
		Ok(handle)
	}

	fn remove_listener(&self, handle: ListenerHandle) {
		self.inner
			.listeners
			.borrow_mut()
			.retain(|(existing, _)| *existing != handle);
	}
}

impl fmt::Debug for MemoryHost {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryHost")
			.field("href", &self.current_url().as_str())
			.field("history_len", &self.history_len())
			.field("history_index", &self.history_index())
			.field("pending_events", &self.pending_events())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;

	#[fixture]
	fn host() -> MemoryHost {
		MemoryHost::new("http://localhost:3000/").unwrap()
	}

	fn record(host: &MemoryHost, event: HostEvent) -> Rc<Cell<usize>> {
		let count = Rc::new(Cell::new(0));
		let seen = Rc::clone(&count);
		host.add_listener(event, Rc::new(move || seen.set(seen.get() + 1)))
			.unwrap();
		count
	}

	#[rstest]
	fn test_push_state_adds_entry_without_event(host: MemoryHost) {
		let popstate = record(&host, HostEvent::PopState);

		host.push_state("/test").unwrap();

		assert_eq!(host.href().unwrap(), "http://localhost:3000/test");
		assert_eq!(host.history_len(), 2);
		assert_eq!(host.push_state_calls(), 1);
		assert_eq!(host.dispatch_pending(), 0);
		assert_eq!(popstate.get(), 0);
	}

	#[rstest]
	fn test_push_state_rejects_cross_origin(host: MemoryHost) {
		let result = host.push_state("https://evil.example/");
		assert!(matches!(result, Err(LocationError::NavigationFailed(_))));
		assert_eq!(host.history_len(), 1);
		assert_eq!(host.push_state_calls(), 0);
	}

	#[rstest]
	fn test_set_hash_queues_hashchange(host: MemoryHost) {
		let hashchange = record(&host, HostEvent::HashChange);

		host.set_hash("#!/test").unwrap();
		assert_eq!(host.href().unwrap(), "http://localhost:3000/#!/test");
		assert_eq!(host.hash().unwrap(), "#!/test");
		assert_eq!(hashchange.get(), 0);

		assert_eq!(host.dispatch_pending(), 1);
		assert_eq!(hashchange.get(), 1);
	}

	#[rstest]
	fn test_set_same_hash_is_silent(host: MemoryHost) {
		host.set_hash("section").unwrap();
		host.dispatch_pending();

		host.set_hash("#section").unwrap();
		assert_eq!(host.pending_events(), 0);
		assert_eq!(host.history_len(), 2);
	}

	#[rstest]
	fn test_empty_hash_reads_as_empty_string(host: MemoryHost) {
		assert_eq!(host.hash().unwrap(), "");
	}

	#[rstest]
	fn test_back_and_forward_queue_popstate(host: MemoryHost) {
		let popstate = record(&host, HostEvent::PopState);
		let hashchange = record(&host, HostEvent::HashChange);
		host.push_state("/a").unwrap();
		host.push_state("/b").unwrap();

		assert!(host.back());
		host.dispatch_pending();
		assert_eq!(host.href().unwrap(), "http://localhost:3000/a");
		assert_eq!(popstate.get(), 1);
		assert_eq!(hashchange.get(), 0);

		assert!(host.forward());
		host.dispatch_pending();
		assert_eq!(host.href().unwrap(), "http://localhost:3000/b");
		assert_eq!(popstate.get(), 2);
	}

	#[rstest]
	fn test_traversal_across_fragments_fires_both_events(host: MemoryHost) {
		let popstate = record(&host, HostEvent::PopState);
		let hashchange = record(&host, HostEvent::HashChange);
		host.set_hash("one").unwrap();
		host.dispatch_pending();
		assert_eq!(hashchange.get(), 1);

		assert!(host.back());
		assert_eq!(host.dispatch_pending(), 2);
		assert_eq!(popstate.get(), 1);
		assert_eq!(hashchange.get(), 2);
	}

	#[rstest]
	#[case(-1)]
	#[case(1)]
	#[case(0)]
	#[case(isize::MIN)]
	fn test_go_out_of_range_is_noop(host: MemoryHost, #[case] delta: isize) {
		assert!(!host.go(delta));
		assert_eq!(host.pending_events(), 0);
	}

	#[rstest]
	fn test_push_after_back_truncates_forward_entries(host: MemoryHost) {
		host.push_state("/a").unwrap();
		host.push_state("/b").unwrap();
		host.back();
		host.push_state("/c").unwrap();

		assert_eq!(host.history_len(), 3);
		assert!(!host.forward());
		assert_eq!(host.href().unwrap(), "http://localhost:3000/c");
	}

	#[rstest]
	fn test_removed_listener_is_not_called(host: MemoryHost) {
		let count = Rc::new(Cell::new(0));
		let seen = Rc::clone(&count);
		let handle = host
			.add_listener(HostEvent::HashChange, Rc::new(move || seen.set(seen.get() + 1)))
			.unwrap();

		host.remove_listener(handle);
		host.remove_listener(handle);
		host.set_hash("x").unwrap();
		host.dispatch_pending();
		assert_eq!(count.get(), 0);
	}
}
