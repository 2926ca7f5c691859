//! Browser navigation host and link interception
//!
//! This module provides access to reinhardt-location-web, which connects
//! locations to `window.location`, `window.history` and DOM click events.
//!
//! ## Example
//!
//! ```rust,ignore
//! use reinhardt_location::web::{LinkInterceptor, provide_browser_location};
//! use reinhardt_location::{LocationMode, LocationSettings};
//!
//! let settings = LocationSettings::new(LocationMode::Hash);
//! let location = provide_browser_location(&settings)?;
//!
//! // Route `<a data-link>` clicks through the active location
//! let interceptor = LinkInterceptor::install()?;
//! ```

pub use reinhardt_location_web::*;
