use crate::{Error, Result};
use http::header::HeaderName;
use http::uri::Scheme;
use http::{HeaderMap, HeaderValue, Method, Uri};
use std::fmt::Debug;
use std::str::FromStr;
use std::time::Duration;

/// Connection is the request configuration a [`RequestFactory`](crate::RequestFactory)
/// prepares before it is sent.
///
/// It only describes the request: the method, target, headers, timeouts and the
/// redirect policy. Sending it is left to the transport that owns the concrete type.
pub trait Connection: Send {
    /// The target URL as it was given when the connection was opened.
    fn url(&self) -> &str;
    /// The parsed target URI.
    fn uri(&self) -> &Uri;

    /// HTTP method of this connection.
    fn method(&self) -> &Method;
    /// Replace the HTTP method.
    fn set_method(&mut self, method: Method);

    /// Get a header value.
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue>;
    /// Insert a header, replacing any previous value of the same name.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Timeout for establishing the connection.
    fn connect_timeout(&self) -> Option<Duration>;
    /// Set the timeout for establishing the connection.
    fn set_connect_timeout(&mut self, timeout: Duration);

    /// Timeout for reading the response.
    fn read_timeout(&self) -> Option<Duration>;
    /// Set the timeout for reading the response.
    fn set_read_timeout(&mut self, timeout: Duration);

    /// Whether redirects are followed by the transport.
    fn follow_redirects(&self) -> bool;
    /// Set whether redirects are followed by the transport.
    fn set_follow_redirects(&mut self, follow: bool);
}

/// ConnectionProvider opens connections for target URLs.
pub trait ConnectionProvider: Debug + Send + Sync {
    /// Connection type opened by this provider.
    type Connection: Connection;

    /// Open a connection to `url`.
    ///
    /// Opening never performs network I/O.
    fn open(&self, url: &str) -> Result<Self::Connection>;
}

/// HttpConnection is an in-memory [`Connection`] built on top of the `http` crate types.
///
/// Convert it into [`http::Request`] or [`http::request::Parts`] to hand it to an HTTP
/// client, or use it with a context `HttpSend` which honors timeouts and redirect policy.
#[derive(Debug, Clone)]
pub struct HttpConnection {
    url: String,
    uri: Uri,
    method: Method,
    headers: HeaderMap,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    follow_redirects: bool,
}

impl HttpConnection {
    /// Open a new connection to an absolute `http` or `https` URL.
    ///
    /// The method defaults to `GET`, no timeouts are set and redirects are not followed.
    pub fn new(url: &str) -> Result<Self> {
        let uri = Uri::from_str(url)?;
        match uri.scheme() {
            Some(scheme) if *scheme == Scheme::HTTP || *scheme == Scheme::HTTPS => {}
            _ => {
                return Err(Error::request_invalid(format!(
                    "connection target must be an absolute http or https url: {url}"
                )))
            }
        }
        if uri.authority().is_none() {
            return Err(Error::request_invalid(format!(
                "connection target without authority: {url}"
            )));
        }

        Ok(Self {
            url: url.to_string(),
            uri,
            method: Method::GET,
            headers: HeaderMap::new(),
            connect_timeout: None,
            read_timeout: None,
            follow_redirects: false,
        })
    }

    /// Get all headers of this connection.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Consume the connection and build the request head.
    ///
    /// Timeouts and the redirect policy are transport settings and are dropped here.
    pub fn into_parts(self) -> http::request::Parts {
        let (mut parts, _) = http::Request::new(()).into_parts();
        parts.method = self.method;
        parts.uri = self.uri;
        parts.headers = self.headers;
        parts
    }

    /// Consume the connection and build a request carrying `body`.
    pub fn into_request<B>(self, body: B) -> http::Request<B> {
        http::Request::from_parts(self.into_parts(), body)
    }
}

/// Build a connection from an existing request head.
///
/// The URL is rendered from the request URI; relative URIs are kept so that signing
/// them reports a proper error.
impl From<http::request::Parts> for HttpConnection {
    fn from(parts: http::request::Parts) -> Self {
        Self {
            url: parts.uri.to_string(),
            uri: parts.uri,
            method: parts.method,
            headers: parts.headers,
            connect_timeout: None,
            read_timeout: None,
            follow_redirects: false,
        }
    }
}

impl Connection for HttpConnection {
    fn url(&self) -> &str {
        &self.url
    }

    fn uri(&self) -> &Uri {
        &self.uri
    }

    fn method(&self) -> &Method {
        &self.method
    }

    fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    fn header(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    fn set_connect_timeout(&mut self, timeout: Duration) {
        self.connect_timeout = Some(timeout);
    }

    fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    fn set_read_timeout(&mut self, timeout: Duration) {
        self.read_timeout = Some(timeout);
    }

    fn follow_redirects(&self) -> bool {
        self.follow_redirects
    }

    fn set_follow_redirects(&mut self, follow: bool) {
        self.follow_redirects = follow;
    }
}

/// HttpConnectionProvider opens [`HttpConnection`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConnectionProvider;

impl ConnectionProvider for HttpConnectionProvider {
    type Connection = HttpConnection;

    fn open(&self, url: &str) -> Result<HttpConnection> {
        HttpConnection::new(url)
    }
}
