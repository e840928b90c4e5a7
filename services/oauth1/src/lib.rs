//! Two-legged OAuth 1.0 signing for AppMarket API requests.
//!
//! AppMarket authenticates API callers with OAuth 1.0 using only the consumer key and
//! secret issued to the application: there is no access token. This crate provides the
//! [`RequestSigner`] implementing that scheme, the credential loading around it and
//! shortcuts to build an [`appsign_core::RequestFactory`].
//!
//! ## Quick Start
//!
//! ```
//! use appsign_core::{Connection, HttpConnectionProvider, Result};
//! use http::header::AUTHORIZATION;
//! use http::Method;
//!
//! # fn main() -> Result<()> {
//! let factory = appsign_oauth1::new_factory("some-key", "some-secret")?;
//!
//! let conn = factory.prepare(
//!     &HttpConnectionProvider,
//!     "https://www.appdirect.com/api/integration/v1/events/1234",
//!     Method::GET,
//! )?;
//!
//! let authorization = conn.header(&AUTHORIZATION).unwrap().to_str().unwrap();
//! assert!(authorization.starts_with("OAuth oauth_consumer_key=\"some-key\""));
//! # Ok(())
//! # }
//! ```
//!
//! ## Credential Sources
//!
//! ### Environment Variables
//!
//! ```bash
//! export APPMARKET_CONSUMER_KEY=your-consumer-key
//! export APPMARKET_CONSUMER_SECRET=your-consumer-secret
//! export APPMARKET_SIGNATURE_METHOD=HMAC-SHA1  # Optional
//! ```
//!
//! ```no_run
//! use appsign_core::{Context, OsEnv};
//! use appsign_oauth1::Config;
//!
//! # fn main() -> appsign_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let factory = appsign_oauth1::load_factory(&ctx, Config::default().from_env(&ctx))?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Custom Signers
//!
//! Any [`appsign_core::Sign`] implementation can be given to
//! [`appsign_core::RequestFactory::new`], for example a [`RequestSigner`] using
//! `PLAINTEXT` signatures.

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{RequestSigner, SignatureMethod};

mod provide_credential;
pub use provide_credential::*;

use appsign_core::{Context, Error, ProvideCredential, RequestFactory, Result};
use std::sync::Arc;

/// Build a request factory signing with HMAC-SHA1 for the given consumer key and secret.
///
/// Exactly one signer is built here and shared by every connection the factory prepares.
///
/// # Errors
///
/// Returns [`ConfigInvalid`](appsign_core::ErrorKind::ConfigInvalid) if the key or the
/// secret is empty. Nothing is deferred to the first signing attempt.
pub fn new_factory(consumer_key: &str, consumer_secret: &str) -> Result<RequestFactory> {
    let cred = check_credential(Credential::new(consumer_key, consumer_secret))?;
    Ok(RequestFactory::new(RequestSigner::new(cred)))
}

/// Build a request factory from the credential found by the default provider chain.
///
/// The credential is loaded once, here.
pub fn load_factory(ctx: &Context, config: Config) -> Result<RequestFactory> {
    let signature_method = config.signature_method;
    let provider = DefaultCredentialProvider::new(Arc::new(config));

    let cred = provider
        .provide_credential(ctx)?
        .ok_or_else(|| Error::config_invalid("no appmarket consumer credential found"))?;
    let signer =
        RequestSigner::new(check_credential(cred)?).with_signature_method(signature_method);
    Ok(RequestFactory::new(signer))
}

fn check_credential(cred: Credential) -> Result<Credential> {
    if cred.consumer_key.is_empty() {
        return Err(Error::config_invalid("consumer key must not be empty"));
    }
    if cred.consumer_secret.is_empty() {
        return Err(Error::config_invalid("consumer secret must not be empty"));
    }
    Ok(cred)
}
