//! Active location for the current thread.
//!
//! Applications install their location once at startup and UI bindings look
//! it up instead of threading it through every component. Without an
//! installed location, lookups fall back to an in-memory location at
//! [`DEFAULT_URL`](crate::memory::DEFAULT_URL).

use std::cell::RefCell;
use std::rc::Rc;

use crate::location::Location;
use crate::memory::MemoryLocation;

// Active location for this thread
// Set by provide_location() and read via use_location()/try_with_location()
thread_local! {
	static ACTIVE_LOCATION: RefCell<Option<Rc<dyn Location>>> = const { RefCell::new(None) };
}

/// Installs `location` as the active location.
///
/// Returns the previously installed location, if any.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use reinhardt_location_core::{LocationExt, MemoryLocation, provide_location, use_location};
///
/// provide_location(Rc::new(MemoryLocation::parse("http://example.com/app").unwrap()));
/// assert_eq!(use_location().href(), "http://example.com/app");
/// ```
pub fn provide_location(location: Rc<dyn Location>) -> Option<Rc<dyn Location>> {
	ACTIVE_LOCATION.with(|slot| slot.borrow_mut().replace(location))
}

/// Removes and returns the active location.
pub fn take_location() -> Option<Rc<dyn Location>> {
	ACTIVE_LOCATION.with(|slot| slot.borrow_mut().take())
}

/// Returns the active location.
///
/// Installs and returns a default [`MemoryLocation`] when none is active.
pub fn use_location() -> Rc<dyn Location> {
	ACTIVE_LOCATION.with(|slot| {
		let mut slot = slot.borrow_mut();
		let location = slot.get_or_insert_with(|| {
			tracing::debug!("no active location, installing default in-memory location");
			Rc::new(MemoryLocation::default())
		});
		Rc::clone(location)
	})
}

/// Runs `f` with the active location.
///
/// Returns `None` if no location has been installed.
pub fn try_with_location<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&dyn Location) -> R,
{
	// Clone out of the slot so `f` may itself call provide_location()
	let location = ACTIVE_LOCATION.with(|slot| slot.borrow().clone())?;
	Some(f(&*location))
}
