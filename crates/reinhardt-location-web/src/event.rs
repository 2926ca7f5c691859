//! DOM mouse events and the link activation policy.

use reinhardt_location_core::{ActivationEvent, Link, Location, LocationError, should_intercept};
use web_sys::MouseEvent;

/// Reads the fields the interception policy needs from a DOM event.
pub fn activation_from_mouse_event(event: &MouseEvent) -> ActivationEvent {
	ActivationEvent::primary()
		.with_button(event.button())
		.with_meta(event.meta_key())
		.with_alt(event.alt_key())
		.with_ctrl(event.ctrl_key())
		.with_shift(event.shift_key())
		.with_default_prevented(event.default_prevented())
}

/// Handles a click on `link`.
///
/// When the policy intercepts, the browser default is prevented and
/// `link.to()` is pushed to `location`. Returns whether it intercepted.
pub fn handle_link_click<L>(
	event: &MouseEvent,
	location: &L,
	link: &Link,
) -> Result<bool, LocationError>
where
	L: Location + ?Sized,
{
	let activation = activation_from_mouse_event(event);
	if !should_intercept(&activation, link.frame_target()) {
		tracing::trace!(to = link.to(), "link click left to the browser");
		return Ok(false);
	}

	event.prevent_default();
	location.push(link.to())?;
	Ok(true)
}
