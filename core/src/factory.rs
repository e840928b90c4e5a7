// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::{Connection, ConnectionProvider, Error, Result, Sign};
use http::Method;
use std::sync::Arc;
use std::time::Duration;

/// Connect timeout applied to every prepared connection: 10 seconds.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Read timeout applied to every prepared connection: 60 seconds.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(60_000);

/// RequestFactory turns connections into signed, time-bounded, redirect-following
/// connections ready to be sent.
///
/// The factory owns exactly one signer for its whole lifetime and shares it between
/// clones, so it can be handed to many threads without extra locking.
///
/// ```
/// use appsign_core::{Connection, HttpConnectionProvider, RequestFactory, Result, Sign};
/// use http::header::AUTHORIZATION;
/// use http::{HeaderValue, Method};
///
/// #[derive(Debug)]
/// struct StaticSigner;
///
/// impl Sign for StaticSigner {
///     fn sign(&self, conn: &mut dyn Connection) -> Result<()> {
///         conn.set_header(AUTHORIZATION, HeaderValue::from_static("Static"));
///         Ok(())
///     }
/// }
///
/// # fn main() -> Result<()> {
/// let factory = RequestFactory::new(StaticSigner);
/// let conn = factory.prepare(&HttpConnectionProvider, "https://example.com", Method::GET)?;
/// assert!(conn.follow_redirects());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestFactory {
    signer: Arc<dyn Sign>,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl RequestFactory {
    /// Create a new factory around an already constructed signer.
    pub fn new(signer: impl Sign) -> Self {
        Self {
            signer: Arc::new(signer),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    /// Override the connect timeout, [`DEFAULT_CONNECT_TIMEOUT`] by default.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the read timeout, [`DEFAULT_READ_TIMEOUT`] by default.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Open a connection to `url` with `provider` and prepare it for `method`.
    ///
    /// Errors from the provider are returned as is; signing errors are reported like
    /// in [`RequestFactory::prepare_connection`].
    pub fn prepare<P: ConnectionProvider>(
        &self,
        provider: &P,
        url: &str,
        method: Method,
    ) -> Result<P::Connection> {
        let mut conn = provider.open(url)?;
        self.prepare_connection(&mut conn, method)?;
        Ok(conn)
    }

    /// Prepare an opened connection for `method`.
    ///
    /// In order, this sets the method, asserts the timeouts (overwriting whatever the
    /// connection had), signs the connection and turns on redirect following.
    ///
    /// # Errors
    ///
    /// If the signer fails, an error of kind
    /// [`SigningFailed`](crate::ErrorKind::SigningFailed) is returned with the message
    /// `Could not sign request to <url>` and the signer error as its source. The
    /// connection must not be sent in that case.
    pub fn prepare_connection<C: Connection>(&self, conn: &mut C, method: Method) -> Result<()> {
        conn.set_method(method);
        conn.set_connect_timeout(self.connect_timeout);
        conn.set_read_timeout(self.read_timeout);

        if let Err(err) = self.signer.sign(&mut *conn) {
            return Err(Error::signing_failed(conn.url(), err));
        }

        conn.set_follow_redirects(true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, HttpConnection, HttpConnectionProvider};
    use http::header::AUTHORIZATION;
    use http::HeaderValue;
    use pretty_assertions::assert_eq;
    use std::error::Error as _;
    use test_case::test_case;

    /// Records the connection state it observes while signing.
    #[derive(Debug, Default)]
    struct RecordingSigner;

    impl Sign for RecordingSigner {
        fn sign(&self, conn: &mut dyn Connection) -> Result<()> {
            // Method and timeouts must already be in place, redirects not yet.
            let value = format!(
                "Test method={} connect={} read={} redirects={}",
                conn.method(),
                conn.connect_timeout().map(|v| v.as_millis()).unwrap_or(0),
                conn.read_timeout().map(|v| v.as_millis()).unwrap_or(0),
                conn.follow_redirects(),
            );
            conn.set_header(AUTHORIZATION, HeaderValue::from_str(&value)?);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct CrashingSigner;

    impl Sign for CrashingSigner {
        fn sign(&self, _: &mut dyn Connection) -> Result<()> {
            Err(Error::unexpected("could not sign :("))
        }
    }

    #[test]
    fn test_prepare_connection_signs_after_method_and_timeouts() -> Result<()> {
        let factory = RequestFactory::new(RecordingSigner);
        let mut conn = HttpConnection::new("http://some-domain.com/?p1=v1")?;

        factory.prepare_connection(&mut conn, Method::GET)?;

        assert_eq!(
            conn.header(&AUTHORIZATION)
                .expect("authorization must be set"),
            "Test method=GET connect=10000 read=60000 redirects=false"
        );
        assert!(conn.follow_redirects());
        Ok(())
    }

    #[test]
    fn test_prepare_connection_overrides_previous_timeouts() -> Result<()> {
        let factory = RequestFactory::new(RecordingSigner);
        let mut conn = HttpConnection::new("http://some-other.com")?;
        conn.set_connect_timeout(Duration::from_millis(1));
        conn.set_read_timeout(Duration::from_secs(3600));

        factory.prepare_connection(&mut conn, Method::GET)?;

        assert_eq!(conn.connect_timeout(), Some(Duration::from_millis(10_000)));
        assert_eq!(conn.read_timeout(), Some(Duration::from_millis(60_000)));
        Ok(())
    }

    #[test_case(Method::GET ; "get")]
    #[test_case(Method::POST ; "post")]
    #[test_case(Method::DELETE ; "delete")]
    #[test_case(Method::from_bytes(b"patch").unwrap() ; "lowercase extension")]
    fn test_prepare_sets_method_and_redirects(method: Method) -> Result<()> {
        let factory = RequestFactory::new(RecordingSigner);

        let conn = factory.prepare(
            &HttpConnectionProvider,
            "http://some-domain.com/?p1=v1",
            method.clone(),
        )?;

        assert_eq!(conn.method(), &method);
        assert!(conn.follow_redirects());
        Ok(())
    }

    #[test]
    fn test_prepare_reports_signing_failure() {
        let factory = RequestFactory::new(CrashingSigner);
        let mut conn =
            HttpConnection::new("http://some-domain.com").expect("connection must open");

        let err = factory
            .prepare_connection(&mut conn, Method::GET)
            .expect_err("signing must fail");

        assert_eq!(err.kind(), ErrorKind::SigningFailed);
        assert_eq!(err.to_string(), "Could not sign request to http://some-domain.com");
        assert_eq!(err.target_url(), Some("http://some-domain.com"));
        let cause = err
            .source()
            .and_then(|e| e.downcast_ref::<Error>())
            .expect("cause must be the signer error");
        assert_eq!(cause.to_string(), "could not sign :(");
        assert!(!conn.follow_redirects());
        assert!(conn.header(&AUTHORIZATION).is_none());
    }

    #[test]
    fn test_prepare_keeps_provider_error() {
        let factory = RequestFactory::new(CrashingSigner);

        let err = factory
            .prepare(&HttpConnectionProvider, "ftp://some-domain.com", Method::GET)
            .expect_err("open must fail");

        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert_eq!(err.target_url(), None);
    }

    #[test]
    fn test_prepare_is_repeatable() -> Result<()> {
        let factory = RequestFactory::new(RecordingSigner)
            .with_connect_timeout(Duration::from_secs(1))
            .with_read_timeout(Duration::from_secs(2));

        let a = factory.prepare(&HttpConnectionProvider, "https://example.com/x", Method::PUT)?;
        let b = factory
            .clone()
            .prepare(&HttpConnectionProvider, "https://example.com/x", Method::PUT)?;

        for conn in [&a, &b] {
            assert_eq!(conn.method(), &Method::PUT);
            assert_eq!(conn.connect_timeout(), Some(Duration::from_secs(1)));
            assert_eq!(conn.read_timeout(), Some(Duration::from_secs(2)));
            assert!(conn.follow_redirects());
        }
        assert_eq!(a.header(&AUTHORIZATION), b.header(&AUTHORIZATION));
        Ok(())
    }
}
