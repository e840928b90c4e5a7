//! Signing AppMarket API requests without effort.
//!
//! This crate re-exports the appsign workspace behind cargo features:
//!
//! - `oauth1` (default): two-legged OAuth 1.0 signing, see [`oauth1`].
//! - `appmarket`: inbound event model and dispatch, see [`appmarket`].
//! - `default-context` (default): [`default_context`] with OS environment access and
//!   a reqwest based transport.
//!
//! ```no_run
//! use appsign::{Connection, HttpConnectionProvider};
//! use http::Method;
//!
//! # fn main() -> appsign::Result<()> {
//! let factory = appsign::oauth1::new_factory("some-key", "some-secret")?;
//! let conn = factory.prepare(
//!     &HttpConnectionProvider,
//!     "https://www.appdirect.com/api/integration/v1/events/1234",
//!     Method::GET,
//! )?;
//! assert!(conn.follow_redirects());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use appsign_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::default_context;

#[cfg(feature = "oauth1")]
pub mod oauth1 {
    pub use appsign_oauth1::*;
}

#[cfg(feature = "appmarket")]
pub mod appmarket {
    pub use appsign_appmarket::*;
}
