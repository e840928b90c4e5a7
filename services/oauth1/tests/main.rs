use std::collections::{HashMap, HashSet};
use std::error::Error as _;
use std::thread;

use anyhow::Result;
use appsign_core::{
    Connection, Context, Error, ErrorKind, HttpConnection, HttpConnectionProvider,
    RequestFactory, Sign, StaticEnv,
};
use appsign_oauth1::{Config, Credential, RequestSigner, SignatureMethod};
use http::header::AUTHORIZATION;
use http::Method;
use log::debug;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn init_factory() -> RequestFactory {
    let _ = env_logger::builder().is_test(true).try_init();

    appsign_oauth1::new_factory("some-key", "some-secret").expect("factory must be built")
}

fn authorization(conn: &impl Connection) -> String {
    conn.header(&AUTHORIZATION)
        .expect("authorization must be set")
        .to_str()
        .expect("authorization must be ascii")
        .to_string()
}

#[test]
fn test_prepare_signs_request() -> Result<()> {
    let factory = init_factory();

    let conn = factory.prepare(
        &HttpConnectionProvider,
        "http://some-domain.com/?p1=v1",
        Method::GET,
    )?;
    debug!("prepared connection: {conn:?}");

    assert_eq!(conn.method(), &Method::GET);
    assert!(authorization(&conn).starts_with("OAuth oauth_consumer_key=\"some-key\""));
    assert_eq!(conn.connect_timeout().map(|v| v.as_millis()), Some(10_000));
    assert_eq!(conn.read_timeout().map(|v| v.as_millis()), Some(60_000));
    assert!(conn.follow_redirects());
    Ok(())
}

#[test]
fn test_prepare_header_shape() -> Result<()> {
    let factory = init_factory();

    let conn = factory.prepare(&HttpConnectionProvider, "https://some-other.com", Method::GET)?;
    let value = authorization(&conn);

    let names = value
        .trim_start_matches("OAuth ")
        .split(", ")
        .map(|kv| kv.split_once('=').expect("param must be key=value").0)
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "oauth_consumer_key",
            "oauth_nonce",
            "oauth_signature",
            "oauth_signature_method",
            "oauth_timestamp",
            "oauth_version",
        ]
    );
    assert!(value.contains("oauth_signature_method=\"HMAC-SHA1\""));
    assert!(value.contains("oauth_version=\"1.0\""));
    Ok(())
}

#[test_case(Method::GET ; "get")]
#[test_case(Method::POST ; "post")]
#[test_case(Method::PUT ; "put")]
#[test_case(Method::DELETE ; "delete")]
fn test_prepare_accepts_redirects(method: Method) -> Result<()> {
    let factory = init_factory();

    let mut conn = HttpConnection::new("http://some-domain.com/?p1=v1")?;
    factory.prepare_connection(&mut conn, method.clone())?;

    assert_eq!(conn.method(), &method);
    assert!(conn.follow_redirects());
    Ok(())
}

#[test]
fn test_prepare_resets_timeouts() -> Result<()> {
    let factory = init_factory();

    let mut conn = HttpConnection::new("http://some-other.com")?;
    conn.set_connect_timeout(std::time::Duration::from_secs(1));
    conn.set_read_timeout(std::time::Duration::from_secs(1));
    factory.prepare_connection(&mut conn, Method::GET)?;

    assert_eq!(conn.connect_timeout(), Some(appsign_core::DEFAULT_CONNECT_TIMEOUT));
    assert_eq!(conn.read_timeout(), Some(appsign_core::DEFAULT_READ_TIMEOUT));
    Ok(())
}

#[test]
fn test_prepare_twice_differs_only_in_signature() -> Result<()> {
    let factory = init_factory();

    let a = factory.prepare(&HttpConnectionProvider, "https://some-domain.com/a", Method::POST)?;
    let b = factory.prepare(&HttpConnectionProvider, "https://some-domain.com/a", Method::POST)?;

    assert_eq!(a.method(), b.method());
    assert_eq!(a.connect_timeout(), b.connect_timeout());
    assert_eq!(a.read_timeout(), b.read_timeout());
    assert_eq!(a.follow_redirects(), b.follow_redirects());
    assert_ne!(authorization(&a), authorization(&b));
    Ok(())
}

#[derive(Debug)]
struct CrashingSigner;

impl Sign for CrashingSigner {
    fn sign(&self, _: &mut dyn Connection) -> appsign_core::Result<()> {
        Err(Error::unexpected("could not sign :("))
    }
}

#[test]
fn test_prepare_fails_when_signing_failed() -> Result<()> {
    let factory = RequestFactory::new(CrashingSigner);

    let err = factory
        .prepare(&HttpConnectionProvider, "http://some-domain.com", Method::GET)
        .expect_err("signing must fail");

    assert_eq!(err.kind(), ErrorKind::SigningFailed);
    assert_eq!(err.to_string(), "Could not sign request to http://some-domain.com");
    let cause = err
        .source()
        .and_then(|e| e.downcast_ref::<Error>())
        .expect("cause must be the signer error");
    assert_eq!(cause.kind(), ErrorKind::Unexpected);
    assert_eq!(cause.to_string(), "could not sign :(");
    Ok(())
}

#[test]
fn test_prepare_fails_for_relative_request() -> Result<()> {
    let factory = init_factory();
    let (parts, _) = http::Request::get("/no/authority").body(())?.into_parts();
    let mut conn = HttpConnection::from(parts);

    let err = factory
        .prepare_connection(&mut conn, Method::GET)
        .expect_err("signing must fail");

    assert_eq!(err.kind(), ErrorKind::SigningFailed);
    assert_eq!(err.target_url(), Some("/no/authority"));
    let cause = err
        .source()
        .and_then(|e| e.downcast_ref::<Error>())
        .expect("cause must be the signer error");
    assert_eq!(cause.kind(), ErrorKind::RequestInvalid);
    assert!(!conn.follow_redirects());
    Ok(())
}

#[test_case("", "some-secret" ; "empty key")]
#[test_case("some-key", "" ; "empty secret")]
fn test_new_factory_rejects_empty_credential(key: &str, secret: &str) {
    let err = appsign_oauth1::new_factory(key, secret).expect_err("factory must not be built");
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}

#[test]
fn test_load_factory_from_env() -> Result<()> {
    let ctx = Context::new().with_env(StaticEnv {
        envs: HashMap::from([
            ("APPMARKET_CONSUMER_KEY".to_string(), "env-key".to_string()),
            ("APPMARKET_CONSUMER_SECRET".to_string(), "env-secret".to_string()),
            ("APPMARKET_SIGNATURE_METHOD".to_string(), "PLAINTEXT".to_string()),
        ]),
    });

    let factory = appsign_oauth1::load_factory(&ctx, Config::default().from_env(&ctx))?;
    let conn = factory.prepare(&HttpConnectionProvider, "https://some-domain.com", Method::GET)?;

    let value = authorization(&conn);
    assert!(value.starts_with("OAuth oauth_consumer_key=\"env-key\""));
    assert!(value.contains("oauth_signature=\"env-secret%26\""));
    Ok(())
}

#[test]
fn test_load_factory_without_credential() {
    let ctx = Context::new();

    let err = appsign_oauth1::load_factory(&ctx, Config::default().from_env(&ctx))
        .expect_err("factory must not be built");
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}

#[test]
fn test_custom_signer_with_plaintext() -> Result<()> {
    let signer = RequestSigner::new(Credential::new("some-key", "some-secret"))
        .with_signature_method(SignatureMethod::Plaintext);
    assert_eq!(signer.consumer_key(), "some-key");

    let factory = RequestFactory::new(signer);
    let conn = factory.prepare(&HttpConnectionProvider, "https://some-domain.com", Method::GET)?;

    assert!(authorization(&conn).contains("oauth_signature_method=\"PLAINTEXT\""));
    Ok(())
}

#[test]
fn test_concurrent_signing_uses_unique_nonces() -> Result<()> {
    let factory = init_factory();

    let handles = (0..8)
        .map(|_| {
            let factory = factory.clone();
            thread::spawn(move || {
                (0..32)
                    .map(|_| {
                        let conn = factory
                            .prepare(&HttpConnectionProvider, "https://some-domain.com", Method::GET)
                            .expect("prepare must succeed");
                        authorization(&conn)
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect::<Vec<_>>();

    let mut nonces = HashSet::new();
    for handle in handles {
        for value in handle.join().expect("thread must not panic") {
            let nonce = value
                .split(", ")
                .find(|kv| kv.starts_with("oauth_nonce="))
                .expect("nonce must be present")
                .to_string();
            nonces.insert(nonce);
        }
    }
    assert_eq!(nonces.len(), 8 * 32);
    Ok(())
}
