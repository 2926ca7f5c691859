//! Location tracking for Reinhardt client-side navigation.
//!
//! This crate tracks the "current location" of an application as an absolute
//! URL, notifies subscribers when it changes, and decides whether a link
//! activation should be handled in-process.
//!
//! ## Variants
//!
//! | Type | Backing state | Host events |
//! |------|---------------|-------------|
//! | [`MemoryLocation`] | memory only | none |
//! | [`HistoryLocation`] | session history (`pushState`) | `popstate` |
//! | [`HashLocation`] | URL fragment (`#!/path`) | `hashchange` |
//!
//! All variants implement [`Location`]. Host-synced variants talk to the
//! environment through [`NavigationHost`]; [`MemoryHost`] implements it in
//! process, and `reinhardt-location-web` implements it for browsers.
//!
//! ## Example
//!
//! ```
//! use reinhardt_location_core::{Location, LocationExt, MemoryLocation};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let location = MemoryLocation::parse("http://example.com").unwrap();
//! let changes = Rc::new(Cell::new(0));
//!
//! let seen = Rc::clone(&changes);
//! let subscription = location.subscribe(move |_url| seen.set(seen.get() + 1));
//!
//! location.push("/users/").unwrap();
//! location.push("/users/").unwrap(); // same href, not a change
//! assert_eq!(changes.get(), 1);
//!
//! subscription.unsubscribe();
//! location.push("#top").unwrap();
//! assert_eq!(changes.get(), 1);
//! assert_eq!(location.href(), "http://example.com/users/#top");
//! ```

pub mod context;
pub mod error;
pub mod hash;
pub mod history;
pub mod host;
pub mod link;
pub mod location;
pub mod memory;
pub mod settings;
pub mod state;

pub use context::{provide_location, take_location, try_with_location, use_location};
pub use error::LocationError;
pub use hash::{HASH_PREFIX, HashLocation, hash_from_url, path_from_hash};
pub use history::HistoryLocation;
pub use host::{HostBinding, HostEvent, HostListener, ListenerHandle, MemoryHost, NavigationHost};
pub use link::{ActivationEvent, Link, MouseButton, Redirect, SELF_TARGET, should_intercept};
pub use location::{Location, LocationExt};
pub use memory::{DEFAULT_URL, MemoryLocation};
pub use settings::{AnyLocation, LocationMode, LocationSettings};
pub use state::{ChangeCallback, LocationState, SubscriberId, Subscription, WeakLocationState};

pub use url::Url;

/// Result type for location operations.
pub type LocationResult<T> = Result<T, LocationError>;
