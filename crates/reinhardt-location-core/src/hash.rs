//! Location synchronized with the host's URL fragment.
//!
//! Paths are stored in the fragment behind a `#!` marker:
//!
//! | Location URL | Host fragment |
//! |--------------|---------------|
//! | `http://host/` | `#!/` |
//! | `http://host/users/42/` | `#!/users/42/` |
//! | `http://host/search?q=rust` | `#!/search?q=rust` |
//! | `http://host/docs#intro` | `#!/docs#intro` |
//!
//! Fragments without the `#!/` prefix (including an empty fragment) decode
//! to `/`.

use std::rc::Rc;

use url::Url;

use crate::error::LocationError;
use crate::host::{HostBinding, HostEvent, NavigationHost};
use crate::location::Location;
use crate::state::{ChangeCallback, LocationState, Subscription, parse_absolute};

/// Marker that prefixes every encoded path.
pub const HASH_PREFIX: &str = "#!";

/// Extracts the encoded path, query and fragment from a host fragment.
///
/// Returns `/` unless `hash` starts with `#!/`.
///
/// # Example
///
/// ```
/// use reinhardt_location_core::path_from_hash;
///
/// assert_eq!(path_from_hash("#!/test"), "/test");
/// assert_eq!(path_from_hash("#section"), "/");
/// assert_eq!(path_from_hash(""), "/");
/// ```
pub fn path_from_hash(hash: &str) -> &str {
	match hash.strip_prefix(HASH_PREFIX) {
		Some(path) if path.starts_with('/') => path,
		_ => "/",
	}
}

/// Renders the path, query and fragment of `url` as a host fragment.
///
/// # Example
///
/// ```
/// use reinhardt_location_core::hash_from_url;
/// use url::Url;
///
/// let url = Url::parse("http://localhost/foo/bar?test=true#top").unwrap();
/// assert_eq!(hash_from_url(&url), "#!/foo/bar?test=true#top");
/// ```
pub fn hash_from_url(url: &Url) -> String {
	let mut hash = format!("{}{}", HASH_PREFIX, url.path());
	if let Some(query) = url.query().filter(|query| !query.is_empty()) {
		hash.push('?');
		hash.push_str(query);
	}
	if let Some(fragment) = url.fragment().filter(|fragment| !fragment.is_empty()) {
		hash.push('#');
		hash.push_str(fragment);
	}
	hash
}

/// Decodes `hash` and resolves it against `href`.
fn url_from_host(href: &str, hash: &str) -> Result<Url, LocationError> {
	let path = path_from_hash(hash);
	parse_absolute(href)?
		.join(path)
		.map_err(|source| LocationError::invalid_url(path, source))
}

/// Hash-fragment backed location.
///
/// The location's URL is decoded from the host fragment, and
/// [`push`](Location::push) writes an encoded fragment back to the host.
///
/// `push` does not update the location directly: the host's `hashchange`
/// event does. Browsers deliver that event asynchronously, so `url()` still
/// returns the previous value immediately after `push` returns. With
/// [`MemoryHost`](crate::MemoryHost) the update happens on
/// [`dispatch_pending`](crate::MemoryHost::dispatch_pending).
///
/// # Example
///
/// ```
/// use reinhardt_location_core::{HashLocation, Location, LocationExt, MemoryHost};
///
/// let host = MemoryHost::new("http://localhost:3000/").unwrap();
/// let location = HashLocation::new(host.clone()).unwrap();
///
/// location.push("/test").unwrap();
/// assert_eq!(host.current_url().as_str(), "http://localhost:3000/#!/test");
///
/// host.dispatch_pending();
/// assert_eq!(location.href(), "http://localhost:3000/test");
/// ```
#[derive(Debug)]
pub struct HashLocation<H: NavigationHost> {
	state: LocationState,
	binding: HostBinding<H>,
}

impl<H> HashLocation<H>
where
	H: NavigationHost + Clone + 'static,
{
	/// Creates a location decoded from `host`'s current fragment.
	pub fn new(host: H) -> Result<Self, LocationError> {
		let state = LocationState::new(url_from_host(&host.href()?, &host.hash()?)?);

		let weak = state.downgrade();
		let listener_host = host.clone();
		let binding = HostBinding::register(
			host,
			HostEvent::HashChange,
			Rc::new(move || {
				let Some(state) = weak.upgrade() else {
					return;
				};
				let decoded = listener_host
					.href()
					.and_then(|href| Ok((href, listener_host.hash()?)))
					.and_then(|(href, hash)| url_from_host(&href, &hash));
				match decoded {
					Ok(url) => {
						state.set_url(url);
					}
					Err(err) => {
						tracing::warn!(error = %err, "failed to decode host fragment on hashchange");
					}
				}
			}),
		)?;

		Ok(Self { state, binding })
	}

	/// Returns the host this location is synchronized with.
	pub fn host(&self) -> &H {
		self.binding.host()
	}

	/// Returns `true` while the `hashchange` listener is registered.
	pub fn is_connected(&self) -> bool {
		self.binding.is_bound()
	}

	/// Removes the `hashchange` listener. Repeated calls are no-ops.
	pub fn unsubscribe(&self) {
		self.binding.release();
	}
}

impl<H> Location for HashLocation<H>
where
	H: NavigationHost + Clone + 'static,
{
	fn url(&self) -> Url {
		self.state.url()
	}

	fn push(&self, target: &str) -> Result<(), LocationError> {
		let hash = self.format(target)?;
		tracing::debug!(%hash, "writing host fragment");
		self.binding.host().set_hash(&hash)
	}

	fn format(&self, target: &str) -> Result<String, LocationError> {
		let resolved = self.state.resolve(target)?;
		Ok(hash_from_url(&resolved))
	}

	fn on_change(&self, callback: ChangeCallback) -> Subscription {
		self.state.subscribe(callback)
	}

	fn disconnect(&self) {
		self.unsubscribe();
	}
}
