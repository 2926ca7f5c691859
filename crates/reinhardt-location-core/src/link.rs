//! Link activation policy and declarative navigation helpers.
//!
//! [`should_intercept`] decides whether a click on a link is handled
//! in-process (prevent the default and `push`) or left to the host.
//! [`Link`] and [`Redirect`] are thin helpers that UI bindings build on.

use crate::error::LocationError;
use crate::location::Location;

/// The frame target that keeps navigation in the current browsing context.
pub const SELF_TARGET: &str = "_self";

/// Pointer buttons as reported by `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
	/// Usually the left button.
	#[default]
	Primary,
	/// Usually the wheel button.
	Auxiliary,
	/// Usually the right button.
	Secondary,
	/// Browser back button.
	Back,
	/// Browser forward button.
	Forward,
	/// Any other reported value.
	Other(i16),
}

impl From<i16> for MouseButton {
	fn from(button: i16) -> Self {
		match button {
			0 => Self::Primary,
			1 => Self::Auxiliary,
			2 => Self::Secondary,
			3 => Self::Back,
			4 => Self::Forward,
			other => Self::Other(other),
		}
	}
}

/// The parts of a pointer activation event the policy looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivationEvent {
	/// Button that triggered the activation.
	pub button: MouseButton,
	/// Meta (Command/Windows) key held.
	pub meta_key: bool,
	/// Alt/Option key held.
	pub alt_key: bool,
	/// Control key held.
	pub ctrl_key: bool,
	/// Shift key held.
	pub shift_key: bool,
	/// An earlier handler already called `preventDefault()`.
	pub default_prevented: bool,
}

impl ActivationEvent {
	/// A plain primary-button click with no modifiers.
	pub fn primary() -> Self {
		Self::default()
	}

	/// Sets the button.
	pub fn with_button(mut self, button: impl Into<MouseButton>) -> Self {
		self.button = button.into();
		self
	}

	/// Sets the meta key flag.
	pub fn with_meta(mut self, held: bool) -> Self {
		self.meta_key = held;
		self
	}

	/// Sets the alt key flag.
	pub fn with_alt(mut self, held: bool) -> Self {
		self.alt_key = held;
		self
	}

	/// Sets the control key flag.
	pub fn with_ctrl(mut self, held: bool) -> Self {
		self.ctrl_key = held;
		self
	}

	/// Sets the shift key flag.
	pub fn with_shift(mut self, held: bool) -> Self {
		self.shift_key = held;
		self
	}

	/// Marks the event as already handled.
	pub fn with_default_prevented(mut self, prevented: bool) -> Self {
		self.default_prevented = prevented;
		self
	}

	/// Returns `true` if any modifier key is held.
	pub fn has_modifier(&self) -> bool {
		self.meta_key || self.alt_key || self.ctrl_key || self.shift_key
	}
}

/// Decides whether a link activation should become an in-process `push`.
///
/// Returns `false` (leave it to the host) when the event was already
/// handled, was not a primary-button activation, targets another frame, or
/// has a modifier key held.
pub fn should_intercept(event: &ActivationEvent, frame_target: Option<&str>) -> bool {
	if event.default_prevented {
		return false;
	}
	if event.button != MouseButton::Primary {
		return false;
	}
	if let Some(target) = frame_target
		&& !target.is_empty()
		&& target != SELF_TARGET
	{
		return false;
	}
	!event.has_modifier()
}

/// A navigational link bound to whichever location renders it.
///
/// # Example
///
/// ```
/// use reinhardt_location_core::{ActivationEvent, Link, LocationExt, MemoryLocation};
///
/// let location = MemoryLocation::parse("http://example.com").unwrap();
/// let link = Link::new("/users/");
///
/// assert_eq!(link.href(&location).unwrap(), "/users/");
/// assert!(link.activate(&location, &ActivationEvent::primary()).unwrap());
/// assert_eq!(location.href(), "http://example.com/users/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
	to: String,
	target: Option<String>,
}

impl Link {
	/// Creates a link to `to`.
	pub fn new(to: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			target: None,
		}
	}

	/// Sets the frame target (the anchor's `target` attribute).
	pub fn target(mut self, target: impl Into<String>) -> Self {
		self.target = Some(target.into());
		self
	}

	/// Returns the destination.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Returns the frame target, if any.
	pub fn frame_target(&self) -> Option<&str> {
		self.target.as_deref()
	}

	/// Returns the `href` to render for `location`.
	pub fn href<L: Location + ?Sized>(&self, location: &L) -> Result<String, LocationError> {
		location.format(&self.to)
	}

	/// Handles an activation of this link.
	///
	/// Returns `Ok(true)` when the activation was intercepted and pushed to
	/// `location`; the caller must then prevent the host default. Returns
	/// `Ok(false)` when the host should handle it.
	pub fn activate<L: Location + ?Sized>(
		&self,
		location: &L,
		event: &ActivationEvent,
	) -> Result<bool, LocationError> {
		if !should_intercept(event, self.frame_target()) {
			return Ok(false);
		}
		location.push(&self.to)?;
		Ok(true)
	}
}

/// Declarative redirection to another target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
	to: String,
}

impl Redirect {
	/// Creates a redirect to `to`.
	pub fn new(to: impl Into<String>) -> Self {
		Self { to: to.into() }
	}

	/// Returns the destination.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Navigates `location` to the destination.
	pub fn apply<L: Location + ?Sized>(&self, location: &L) -> Result<(), LocationError> {
		tracing::debug!(to = %self.to, "redirecting");
		location.push(&self.to)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::host::MemoryHost;
	use crate::location::LocationExt;
	use crate::{HashLocation, MemoryLocation};
	use rstest::*;

	/// Decision table: link interception
	///
	/// | prevented | button | target | modifier | Intercept |
	/// |---|---|---|---|---|
	/// | No | Primary | none | none | Yes |
	/// | No | Primary | `_self` | none | Yes |
	/// | No | Primary | empty | none | Yes |
	/// | No | Primary | none | meta/alt/ctrl/shift | No |
	/// | No | Auxiliary/Secondary | none | none | No |
	/// | No | Primary | `_blank`/named | none | No |
	/// | Yes | Primary | none | none | No |
	#[rstest]
	#[case(ActivationEvent::primary(), None, true)]
	#[case(ActivationEvent::primary(), Some("_self"), true)]
	#[case(ActivationEvent::primary(), Some(""), true)]
	#[case(ActivationEvent::primary().with_meta(true), None, false)]
	#[case(ActivationEvent::primary().with_alt(true), None, false)]
	#[case(ActivationEvent::primary().with_ctrl(true), None, false)]
	#[case(ActivationEvent::primary().with_shift(true), None, false)]
	#[case(ActivationEvent::primary().with_button(MouseButton::Auxiliary), None, false)]
	#[case(ActivationEvent::primary().with_button(MouseButton::Secondary), None, false)]
	#[case(ActivationEvent::primary(), Some("_blank"), false)]
	#[case(ActivationEvent::primary(), Some("sidebar"), false)]
	#[case(ActivationEvent::primary().with_default_prevented(true), None, false)]
	fn test_decision_table_should_intercept(
		#[case] event: ActivationEvent,
		#[case] target: Option<&str>,
		#[case] expected: bool,
	) {
		assert_eq!(should_intercept(&event, target), expected);
	}

	#[rstest]
	#[case(0, MouseButton::Primary)]
	#[case(1, MouseButton::Auxiliary)]
	#[case(2, MouseButton::Secondary)]
	#[case(3, MouseButton::Back)]
	#[case(4, MouseButton::Forward)]
	#[case(7, MouseButton::Other(7))]
	fn test_mouse_button_from_raw(#[case] raw: i16, #[case] expected: MouseButton) {
		assert_eq!(MouseButton::from(raw), expected);
	}

	#[rstest]
	fn test_link_click_pushes_location() {
		let location = MemoryLocation::parse("http://example.com").unwrap();
		assert_eq!(location.href(), "http://example.com/");

		let link = Link::new("/test");
		assert!(link.activate(&location, &ActivationEvent::primary()).unwrap());
		assert_eq!(location.href(), "http://example.com/test");
	}

	#[rstest]
	fn test_link_with_modifier_is_left_to_host() {
		let location = MemoryLocation::parse("http://example.com").unwrap();

		let link = Link::new("/test");
		let event = ActivationEvent::primary().with_ctrl(true);
		assert!(!link.activate(&location, &event).unwrap());
		assert_eq!(location.href(), "http://example.com/");
	}

	#[rstest]
	fn test_link_with_blank_target_is_left_to_host() {
		let location = MemoryLocation::parse("http://example.com").unwrap();

		let link = Link::new("/test").target("_blank");
		assert!(!link.activate(&location, &ActivationEvent::primary()).unwrap());
		assert_eq!(location.href(), "http://example.com/");
	}

	#[rstest]
	fn test_link_href_uses_location_format() {
		let host = MemoryHost::new("http://localhost:3000/").unwrap();
		let location = HashLocation::new(host.clone()).unwrap();

		let link = Link::new("/test");
		assert_eq!(link.href(&location).unwrap(), "#!/test");

		assert!(link.activate(&location, &ActivationEvent::primary()).unwrap());
		assert_eq!(host.current_url().as_str(), "http://localhost:3000/#!/test");
	}

	#[rstest]
	fn test_redirect_pushes_target() {
		let location = MemoryLocation::parse("http://example.com/old").unwrap();

		let redirect = Redirect::new("/new");
		redirect.apply(&location).unwrap();
		assert_eq!(location.href(), "http://example.com/new");
		assert_eq!(redirect.to(), "/new");
	}
}
