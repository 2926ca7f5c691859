//! # Reinhardt Location
//!
//! Location tracking for Reinhardt client-side navigation.
//!
//! A location holds the application's current URL, tells subscribers when it
//! changes, and decides whether a link activation is handled in-process or
//! left to the host.
//!
//! ## Variants
//!
//! - [`MemoryLocation`]: in-memory only, for native code, tests and SSR
//! - [`HistoryLocation`]: mirrors the host's session history (`pushState`,
//!   `popstate`)
//! - [`HashLocation`]: encodes the path in the host fragment (`#!/path`,
//!   `hashchange`)
//!
//! ## Feature Flags
//!
//! - `web` - Browser [`NavigationHost`] and `<a data-link>` interception
//!   (`wasm32` only), exposed as the `web` module
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_location::{HistoryLocation, Location, LocationExt, MemoryHost};
//!
//! let host = MemoryHost::new("http://localhost:3000/").unwrap();
//! let location = HistoryLocation::new(host.clone()).unwrap();
//!
//! location.push("/users/42/").unwrap();
//! assert_eq!(host.history_len(), 2);
//!
//! host.back();
//! host.dispatch_pending();
//! assert_eq!(location.href(), "http://localhost:3000/");
//! ```

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use reinhardt_location_core::{
	ActivationEvent, AnyLocation, ChangeCallback, DEFAULT_URL, HASH_PREFIX, HashLocation,
	HistoryLocation, HostBinding, HostEvent, HostListener, ListenerHandle, Link, Location,
	LocationError, LocationExt, LocationMode, LocationResult, LocationSettings, LocationState,
	MemoryHost, MemoryLocation, MouseButton, NavigationHost, Redirect, SELF_TARGET, SubscriberId,
	Subscription, Url, WeakLocationState, hash_from_url, path_from_hash, provide_location,
	should_intercept, take_location, try_with_location, use_location,
};

