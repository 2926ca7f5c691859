//! Document-wide interception of `<a data-link>` clicks.
//!
//! Render `href` with [`Link::href`] so that clicks left to the browser
//! still land on the right place:
//!
//! ```html
//! <!-- history mode -->
//! <a href="/users/" data-link>Users</a>
//! <!-- hash mode -->
//! <a href="#!/users/" data-link>Users</a>
//! <a href="/fallback" data-link data-to="/users/42/">User 42</a>
//! <a href="/docs" data-link target="_blank">Docs (left to the browser)</a>
//! ```

use std::rc::Rc;

use reinhardt_location_core::{
	HASH_PREFIX, Link, Location, LocationError, path_from_hash, use_location,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, MouseEvent};

use crate::event::handle_link_click;
use crate::host::describe_js;

/// Anchors handled by [`LinkInterceptor`].
pub const LINK_SELECTOR: &str = "a[data-link]";

/// Builds a [`Link`] from an anchor's attributes.
///
/// The destination is `data-to` when present and non-empty, else `href`.
/// An `href` rendered for a hash location (`#!/path`) is decoded back to
/// its path. The frame target is the `target` attribute.
pub fn link_from_anchor(anchor: &Element) -> Option<Link> {
	let to = match anchor.get_attribute("data-to").filter(|to| !to.is_empty()) {
		Some(to) => to,
		None => {
			let href = anchor.get_attribute("href")?;
			if href.starts_with(HASH_PREFIX) {
				path_from_hash(&href).to_string()
			} else {
				href
			}
		}
	};

	let link = Link::new(to);
	Some(match anchor.get_attribute("target") {
		Some(target) => link.target(target),
		None => link,
	})
}

/// A `click` listener on the document that routes link clicks through a
/// location.
///
/// The listener is removed when the interceptor is dropped.
pub struct LinkInterceptor {
	document: Document,
	handler: Closure<dyn FnMut(Event)>,
}

impl LinkInterceptor {
	/// Installs an interceptor that pushes to the active location at click
	/// time.
	pub fn install() -> Result<Self, LocationError> {
		Self::install_with(None)
	}

	/// Installs an interceptor bound to `location`.
	pub fn for_location(location: Rc<dyn Location>) -> Result<Self, LocationError> {
		Self::install_with(Some(location))
	}

	fn install_with(location: Option<Rc<dyn Location>>) -> Result<Self, LocationError> {
		let document = web_sys::window()
			.and_then(|window| window.document())
			.ok_or_else(|| LocationError::HostUnavailable("no document".to_string()))?;

		let handler = Closure::wrap(Box::new(move |event: Event| {
			let location = location.clone().unwrap_or_else(use_location);
			if let Err(err) = intercept_click(&event, &*location) {
				tracing::warn!(error = %err, "link navigation failed");
			}
		}) as Box<dyn FnMut(Event)>);

		document
			.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
			.map_err(|err| {
				LocationError::HostUnavailable(format!("cannot listen for click: {}", describe_js(&err)))
			})?;
		tracing::debug!("link interceptor installed");

		Ok(Self { document, handler })
	}
}

impl Drop for LinkInterceptor {
	fn drop(&mut self) {
		if let Err(err) = self
			.document
			.remove_event_listener_with_callback("click", self.handler.as_ref().unchecked_ref())
		{
			tracing::warn!(error = %describe_js(&err), "failed to remove link interceptor");
		}
	}
}

/// Finds the anchor a click landed in and applies the policy.
fn intercept_click(event: &Event, location: &dyn Location) -> Result<bool, LocationError> {
	let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
		return Ok(false);
	};
	// Walk up from the clicked node in case the click landed inside the link
	let anchor = event
		.target()
		.and_then(|target| target.dyn_into::<Element>().ok())
		.and_then(|element| element.closest(LINK_SELECTOR).ok().flatten());
	let Some(link) = anchor.as_ref().and_then(link_from_anchor) else {
		return Ok(false);
	};
	handle_link_click(mouse, location, &link)
}
