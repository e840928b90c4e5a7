use crate::constants::*;
use crate::Credential;
use appsign_core::hash::base64_hmac_sha1;
use appsign_core::time::{now, unix_timestamp, DateTime};
use appsign_core::{Connection, Error, Result, Sign, SigningCredential};
use http::header::AUTHORIZATION;
use http::{HeaderValue, Method, Uri};
use log::debug;
use percent_encoding::utf8_percent_encode;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt::{self, Display, Write};
use std::str::FromStr;

/// Signature methods supported by [`RequestSigner`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SignatureMethod {
    /// `HMAC-SHA1`, the method AppMarket expects.
    #[default]
    HmacSha1,
    /// `PLAINTEXT`, only meaningful over https.
    Plaintext,
}

impl SignatureMethod {
    /// The value of `oauth_signature_method`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureMethod::HmacSha1 => "HMAC-SHA1",
            SignatureMethod::Plaintext => "PLAINTEXT",
        }
    }
}

impl Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "HMAC-SHA1" => Ok(SignatureMethod::HmacSha1),
            "PLAINTEXT" => Ok(SignatureMethod::Plaintext),
            _ => Err(Error::config_invalid(format!(
                "unsupported oauth signature method: {s}"
            ))),
        }
    }
}

/// RequestSigner signs connections with two-legged OAuth 1.0.
///
/// - [RFC 5849: The OAuth 1.0 Protocol](https://www.rfc-editor.org/rfc/rfc5849)
///
/// The signer only holds the credential, so one instance can sign from many threads at
/// once. Every signature gets a fresh nonce from the OS random source.
#[derive(Debug)]
pub struct RequestSigner {
    credential: Credential,
    signature_method: SignatureMethod,
    time: Option<DateTime>,
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new HMAC-SHA1 signer for the credential.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            signature_method: SignatureMethod::default(),
            time: None,
            nonce: None,
        }
    }

    /// Use another signature method.
    pub fn with_signature_method(mut self, method: SignatureMethod) -> Self {
        self.signature_method = method;
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// Reusing a nonce makes every signed request after the first one a replay.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    /// Get the consumer key of this signer.
    pub fn consumer_key(&self) -> &str {
        &self.credential.consumer_key
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    fn get_nonce(&self) -> Result<String> {
        if let Some(nonce) = &self.nonce {
            return Ok(nonce.clone());
        }

        let mut bs = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bs)
            .map_err(|e| Error::unexpected("failed to generate oauth nonce").with_source(e))?;
        Ok(hex::encode(bs))
    }

    /// Build the `Authorization` header value for a request.
    fn build_authorization(&self, method: &Method, uri: &Uri) -> Result<String> {
        if !self.credential.is_valid() {
            return Err(Error::credential_invalid(
                "consumer key and consumer secret must not be empty",
            ));
        }

        let timestamp = unix_timestamp(self.get_time()).to_string();
        let nonce = self.get_nonce()?;
        let oauth_params = [
            (OAUTH_CONSUMER_KEY, self.credential.consumer_key.as_str()),
            (OAUTH_NONCE, nonce.as_str()),
            (OAUTH_SIGNATURE_METHOD, self.signature_method.as_str()),
            (OAUTH_TIMESTAMP, timestamp.as_str()),
            (OAUTH_VERSION, OAUTH_VERSION_1_0),
        ];

        let signature = match self.signature_method {
            SignatureMethod::HmacSha1 => {
                let string_to_sign = string_to_sign(method, uri, &oauth_params)?;
                debug!("oauth1 string to sign: {string_to_sign}");
                base64_hmac_sha1(self.signing_key().as_bytes(), string_to_sign.as_bytes())
            }
            SignatureMethod::Plaintext => self.signing_key(),
        };

        // Alphabetical order keeps `oauth_consumer_key` first.
        let mut params = oauth_params.to_vec();
        params.push((OAUTH_SIGNATURE, signature.as_str()));
        params.sort();

        let mut s = String::from("OAuth ");
        for (idx, (k, v)) in params.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(", ");
            }
            write!(s, "{}=\"{}\"", k, percent_encode(v))?;
        }
        Ok(s)
    }

    /// `<consumer_secret>&<token_secret>`, the token secret is always empty.
    fn signing_key(&self) -> String {
        format!("{}&", percent_encode(&self.credential.consumer_secret))
    }
}

impl Sign for RequestSigner {
    fn sign(&self, conn: &mut dyn Connection) -> Result<()> {
        let authorization = self.build_authorization(conn.method(), conn.uri())?;

        let mut value = HeaderValue::from_str(&authorization)?;
        value.set_sensitive(true);
        conn.set_header(AUTHORIZATION, value);
        Ok(())
    }
}

fn percent_encode(v: &str) -> String {
    utf8_percent_encode(v, &OAUTH_ENCODE_SET).to_string()
}

/// Build the signature base string.
///
/// Reference: [RFC 5849 3.4.1. Signature Base String](https://www.rfc-editor.org/rfc/rfc5849#section-3.4.1)
fn string_to_sign(method: &Method, uri: &Uri, oauth_params: &[(&str, &str)]) -> Result<String> {
    let base_uri = base_string_uri(uri)?;
    let params = normalized_parameters(uri, oauth_params);
    debug!("oauth1 normalized parameters: {params}");

    Ok(format!(
        "{}&{}&{}",
        method.as_str().to_ascii_uppercase(),
        percent_encode(&base_uri),
        percent_encode(&params)
    ))
}

/// Reference: [RFC 5849 3.4.1.2. Base String URI](https://www.rfc-editor.org/rfc/rfc5849#section-3.4.1.2)
fn base_string_uri(uri: &Uri) -> Result<String> {
    let scheme = uri
        .scheme_str()
        .ok_or_else(|| Error::request_invalid("request without scheme is invalid for signing"))?
        .to_ascii_lowercase();
    let default_port = match scheme.as_str() {
        "http" => 80,
        "https" => 443,
        _ => {
            return Err(Error::request_invalid(format!(
                "request with scheme {scheme} is invalid for signing"
            )))
        }
    };
    let host = uri
        .host()
        .ok_or_else(|| Error::request_invalid("request without authority is invalid for signing"))?
        .to_ascii_lowercase();

    let mut s = format!("{scheme}://{host}");
    if let Some(port) = uri.port_u16().filter(|port| *port != default_port) {
        write!(s, ":{port}")?;
    }
    match uri.path() {
        "" => s.push('/'),
        path => s.push_str(path),
    }
    Ok(s)
}

/// Reference: [RFC 5849 3.4.1.3.2. Parameters Normalization](https://www.rfc-editor.org/rfc/rfc5849#section-3.4.1.3.2)
fn normalized_parameters(uri: &Uri, oauth_params: &[(&str, &str)]) -> String {
    let query = uri
        .query()
        .map(|v| form_urlencoded::parse(v.as_bytes()).collect::<Vec<_>>())
        .unwrap_or_default();

    let mut params = query
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .chain(
            oauth_params
                .iter()
                .map(|(k, v)| (percent_encode(k), percent_encode(v))),
        )
        .collect::<Vec<_>>();
    params.sort();

    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}
