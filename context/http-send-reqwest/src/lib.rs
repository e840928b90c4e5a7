//! [`HttpSend`] implementation backed by [`reqwest`].
//!
//! Connections prepared by an [`appsign_core::RequestFactory`] carry their own connect
//! timeout, read timeout and redirect policy. [`ReqwestHttpSend`] builds one
//! [`Client`] for every distinct combination of these settings and reuses it for all
//! later connections sharing them.
//!
//! ```no_run
//! use appsign_core::{Context, HttpConnectionProvider};
//! use appsign_http_send_reqwest::ReqwestHttpSend;
//! use bytes::Bytes;
//! use http::Method;
//!
//! # async fn example() -> appsign_core::Result<()> {
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! let factory = appsign_oauth1::new_factory("some-key", "some-secret")?;
//!
//! let conn = factory.prepare(
//!     &HttpConnectionProvider,
//!     "https://www.appdirect.com/api/integration/v1/events/1234",
//!     Method::GET,
//! )?;
//! let resp = ctx.http_send_as_string(conn, Bytes::new()).await?;
//! println!("{}", resp.body());
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use appsign_core::{Connection, Error, HttpConnection, HttpSend, Result};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqwest::redirect::Policy;
use reqwest::Client;

/// Maximum number of redirects followed when a connection enables redirects.
pub const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ClientKey {
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    follow_redirects: bool,
}

impl ClientKey {
    fn of(conn: &HttpConnection) -> Self {
        Self {
            connect_timeout: conn.connect_timeout(),
            read_timeout: conn.read_timeout(),
            follow_redirects: conn.follow_redirects(),
        }
    }

    fn build(&self) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.read_timeout {
            builder = builder.read_timeout(timeout);
        }
        builder = builder.redirect(if self.follow_redirects {
            Policy::limited(MAX_REDIRECTS)
        } else {
            Policy::none()
        });

        builder
            .build()
            .map_err(|e| Error::unexpected("failed to build reqwest client").with_source(e))
    }
}

/// ReqwestHttpSend sends [`HttpConnection`]s with reqwest.
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Option<Client>,
    clients: Mutex<HashMap<ClientKey, Client>>,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    ///
    /// The given client is used for every connection as is: its own timeouts and
    /// redirect policy win over the connection settings.
    pub fn new(client: Client) -> Self {
        Self {
            client: Some(client),
            clients: Mutex::default(),
        }
    }

    fn client_for(&self, conn: &HttpConnection) -> Result<Client> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let key = ClientKey::of(conn);
        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(client) = clients.get(&key) {
            return Ok(client.clone());
        }

        debug!("building reqwest client for {key:?}");
        let client = key.build()?;
        clients.insert(key, client.clone());
        Ok(client)
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, conn: HttpConnection, body: Bytes) -> Result<http::Response<Bytes>> {
        let client = self.client_for(&conn)?;
        let url = conn.url().to_string();
        let parts = conn.into_parts();

        let resp = client
            .request(parts.method, &url)
            .headers(parts.headers)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                Error::unexpected(format!("failed to send request to {url}")).with_source(e)
            })?;
        let resp: http::Response<_> = resp.into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                Error::unexpected(format!("failed to read response from {url}")).with_source(e)
            })?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
