//! Example of building a request factory from a custom credential provider chain

use appsign_core::{
    Connection, Context, HttpConnectionProvider, OsEnv, ProvideCredential, RequestFactory,
};
use appsign_oauth1::{
    Config, ConfigCredentialProvider, Credential, EnvCredentialProvider, ProvideCredentialChain,
    RequestSigner, SignatureMethod, StaticCredentialProvider,
};
use http::header::AUTHORIZATION;
use http::Method;
use std::sync::Arc;

/// A custom credential provider that reads a vault-style `KEY:SECRET` pair
#[derive(Debug)]
struct PairCredentialProvider;

impl ProvideCredential for PairCredentialProvider {
    type Credential = Credential;

    fn provide_credential(&self, ctx: &Context) -> appsign_core::Result<Option<Self::Credential>> {
        println!("Loading credential from APPMARKET_CONSUMER_PAIR");
        Ok(ctx
            .env_var("APPMARKET_CONSUMER_PAIR")
            .and_then(|v| {
                v.split_once(':')
                    .map(|(key, secret)| Credential::new(key, secret))
            }))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let ctx = Context::new().with_env(OsEnv);
    let config = Arc::new(Config::default().from_env(&ctx));

    // Example 1: Custom chain with specific order
    println!("Example 1: Custom chain with specific order");
    let chain = ProvideCredentialChain::new()
        .push(ConfigCredentialProvider::new(config.clone()))
        .push(PairCredentialProvider)
        .push(EnvCredentialProvider::new())
        .push(StaticCredentialProvider::new("demo-key", "demo-secret"));
    println!("Chain has {} providers", chain.len());

    let Some(cred) = chain.provide_credential(&ctx)? else {
        println!("No credential found");
        return Ok(());
    };
    println!("Found credential: {cred:?}");

    // Example 2: Sign with the loaded credential
    println!("\nExample 2: Sign a request");
    let signer = RequestSigner::new(cred).with_signature_method(SignatureMethod::HmacSha1);
    let factory = RequestFactory::new(signer);
    let conn = factory.prepare(
        &HttpConnectionProvider,
        "https://www.appdirect.com/api/integration/v1/events/1234",
        Method::GET,
    )?;
    println!("Prepared {} {}", conn.method(), conn.url());
    println!(
        "Authorization header present: {}",
        conn.header(&AUTHORIZATION).is_some()
    );
    println!("Connect timeout: {:?}", conn.connect_timeout());
    println!("Read timeout: {:?}", conn.read_timeout());
    println!("Follow redirects: {}", conn.follow_redirects());

    Ok(())
}
