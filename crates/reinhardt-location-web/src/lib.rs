//! Browser bindings for `reinhardt-location-core`.
//!
//! - [`BrowserHost`]: `NavigationHost` over `window.location`,
//!   `window.history` and window events
//! - [`LinkInterceptor`]: document-wide `<a data-link>` click interception
//! - [`provide_browser_location`]: builds the configured location on the
//!   browser host and makes it the active location
//!
//! Everything here is only available on `wasm32` targets.
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_location_core::{LocationMode, LocationSettings};
//! use reinhardt_location_web::{LinkInterceptor, provide_browser_location};
//!
//! let location = provide_browser_location(&LocationSettings::new(LocationMode::History))?;
//! let interceptor = LinkInterceptor::install()?;
//! ```

#[cfg(target_arch = "wasm32")]
mod event;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod interceptor;

#[cfg(target_arch = "wasm32")]
pub use event::{activation_from_mouse_event, handle_link_click};
#[cfg(target_arch = "wasm32")]
pub use host::BrowserHost;
#[cfg(target_arch = "wasm32")]
pub use interceptor::{LINK_SELECTOR, LinkInterceptor, link_from_anchor};

#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use reinhardt_location_core::{Location, LocationError, LocationSettings, provide_location};

/// Builds the location described by `settings` on the browser window and
/// installs it as the active location.
///
/// A previously active location is disconnected from its host.
#[cfg(target_arch = "wasm32")]
pub fn provide_browser_location(
	settings: &LocationSettings,
) -> Result<Rc<dyn Location>, LocationError> {
	let location: Rc<dyn Location> = Rc::new(settings.build(BrowserHost::new()?)?);
	if let Some(previous) = provide_location(Rc::clone(&location)) {
		previous.disconnect();
	}
	tracing::debug!(mode = ?settings.mode, href = %location.url(), "browser location installed");
	Ok(location)
}
