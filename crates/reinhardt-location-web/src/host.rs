//! `NavigationHost` backed by the browser window.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use reinhardt_location_core::{
	HostEvent, HostListener, ListenerHandle, LocationError, NavigationHost,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, History, Window};

type EventClosure = Closure<dyn FnMut(Event)>;

/// Renders a thrown JS value for error messages.
pub(crate) fn describe_js(value: &JsValue) -> String {
	if let Some(message) = value.as_string() {
		return message;
	}
	match value.dyn_ref::<js_sys::Error>() {
		Some(error) => String::from(error.message()),
		None => format!("{:?}", value),
	}
}

struct BrowserHostInner {
	window: Window,
	listeners: RefCell<HashMap<u64, (HostEvent, EventClosure)>>,
	next_id: Cell<u64>,
}

/// Navigation host for the current browser window.
///
/// Cloning shares the same window and listener table. Listeners are removed
/// from the window when their handle is released.
#[derive(Clone)]
pub struct BrowserHost {
	inner: Rc<BrowserHostInner>,
}

impl BrowserHost {
	/// Creates a host for the global `window`.
	///
	/// Fails with [`LocationError::HostUnavailable`] outside a browser
	/// window (workers, server-side rendering).
	pub fn new() -> Result<Self, LocationError> {
		let window = web_sys::window()
			.ok_or_else(|| LocationError::HostUnavailable("no global `window`".to_string()))?;
		Ok(Self::from_window(window))
	}

	/// Creates a host for a specific window.
	pub fn from_window(window: Window) -> Self {
		Self {
			inner: Rc::new(BrowserHostInner {
				window,
				listeners: RefCell::new(HashMap::new()),
				next_id: Cell::new(0),
			}),
		}
	}

	/// Returns the underlying window.
	pub fn window(&self) -> &Window {
		&self.inner.window
	}

	/// Returns the number of listeners currently registered through this host.
	pub fn listener_count(&self) -> usize {
		self.inner.listeners.borrow().len()
	}

	fn history(&self) -> Result<History, LocationError> {
		self.inner.window.history().map_err(|err| {
			LocationError::HostUnavailable(format!("window.history: {}", describe_js(&err)))
		})
	}
}

impl fmt::Debug for BrowserHost {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BrowserHost")
			.field("listeners", &self.listener_count())
			.finish_non_exhaustive()
	}
}

impl NavigationHost for BrowserHost {
	fn href(&self) -> Result<String, LocationError> {
		self.inner.window.location().href().map_err(|err| {
			LocationError::HostUnavailable(format!("window.location.href: {}", describe_js(&err)))
		})
	}

	fn hash(&self) -> Result<String, LocationError> {
		self.inner.window.location().hash().map_err(|err| {
			LocationError::HostUnavailable(format!("window.location.hash: {}", describe_js(&err)))
		})
	}

	fn push_state(&self, url: &str) -> Result<(), LocationError> {
		self.history()?
			.push_state_with_url(&JsValue::NULL, "", Some(url))
			.map_err(|err| LocationError::NavigationFailed(format!("pushState({url}): {}", describe_js(&err))))
	}

	fn set_hash(&self, hash: &str) -> Result<(), LocationError> {
		self.inner
			.window
			.location()
			.set_hash(hash)
			.map_err(|err| LocationError::NavigationFailed(format!("set hash {hash}: {}", describe_js(&err))))
	}

	fn add_listener(
		&self,
		event: HostEvent,
		listener: HostListener,
	) -> Result<ListenerHandle, LocationError> {
		let closure = Closure::wrap(Box::new(move |_event: Event| {
			listener();
		}) as Box<dyn FnMut(Event)>);

		self.inner
			.window
			.add_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref())
			.map_err(|err| {
				LocationError::HostUnavailable(format!(
					"cannot listen for {event}: {}",
					describe_js(&err)
				))
			})?;

		let id = self.inner.next_id.get();
		self.inner.next_id.set(id + 1);
		self.inner.listeners.borrow_mut().insert(id, (event, closure));
		Ok(ListenerHandle::new(id, event))
	}

	fn remove_listener(&self, handle: ListenerHandle) {
		// Take the closure out before calling into JS so the table is not
		// borrowed if removal re-enters the host
		let removed = self.inner.listeners.borrow_mut().remove(&handle.id());
		let Some((event, closure)) = removed else {
			return;
		};
		if let Err(err) = self
			.inner
			.window
			.remove_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref())
		{
			tracing::warn!(%event, error = %describe_js(&err), "failed to remove window listener");
		}
	}
}
