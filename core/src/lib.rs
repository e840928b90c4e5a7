//! Core components for signing AppMarket API requests.
//!
//! This crate provides the foundational types and traits for the appsign ecosystem.
//! It is free of any concrete signature algorithm: OAuth1 lives in `appsign-oauth1`,
//! HTTP transports live in the `appsign-http-send-*` crates.
//!
//! ## Overview
//!
//! - **Connection**: the request configuration a signer annotates (method, URL, headers,
//!   timeouts, redirect policy), independent of any network stack.
//! - **Sign**: the signing engine applied to a connection.
//! - **RequestFactory**: prepares connections: sets the method, asserts default timeouts,
//!   signs, and enables redirect following, or fails with a signing error.
//! - **Context**: holds implementations for environment access and HTTP sending.
//!
//! ## Example
//!
//! ```
//! use appsign_core::{Connection, HttpConnection, RequestFactory, Result, Sign};
//! use http::header::AUTHORIZATION;
//! use http::{HeaderValue, Method};
//!
//! #[derive(Debug)]
//! struct MySigner {
//!     token: String,
//! }
//!
//! impl Sign for MySigner {
//!     fn sign(&self, conn: &mut dyn Connection) -> Result<()> {
//!         let value = HeaderValue::from_str(&format!("Bearer {}", self.token))?;
//!         conn.set_header(AUTHORIZATION, value);
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let factory = RequestFactory::new(MySigner {
//!     token: "my-token".to_string(),
//! });
//!
//! let mut conn = HttpConnection::new("https://example.com/api/integration/v1/users")?;
//! factory.prepare_connection(&mut conn, Method::GET)?;
//!
//! let req = conn.into_request(());
//! assert_eq!(req.headers()[AUTHORIZATION], "Bearer my-token");
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, Sign, SigningCredential};

mod connection;
pub use connection::{Connection, ConnectionProvider, HttpConnection, HttpConnectionProvider};

mod factory;
pub use factory::{RequestFactory, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT};
