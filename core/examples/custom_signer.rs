use appsign_core::{
    Connection, Context, HttpConnectionProvider, ProvideCredential, RequestFactory, Result, Sign,
    SigningCredential, StaticEnv,
};
use http::header::AUTHORIZATION;
use http::{HeaderValue, Method};
use std::collections::HashMap;

// Define a custom credential type
#[derive(Clone, Debug)]
struct MyCredential {
    api_key: String,
}

impl SigningCredential for MyCredential {
    fn is_valid(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// Implement a credential loader that loads from environment
#[derive(Debug)]
struct MyCredentialLoader;

impl ProvideCredential for MyCredentialLoader {
    type Credential = MyCredential;

    fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(ctx
            .env_var("MY_API_KEY")
            .map(|api_key| MyCredential { api_key }))
    }
}

// Implement a signer using the loaded credential
#[derive(Debug)]
struct MySigner {
    cred: MyCredential,
}

impl Sign for MySigner {
    fn sign(&self, conn: &mut dyn Connection) -> Result<()> {
        let mut value = HeaderValue::from_str(&format!("ApiKey {}", self.cred.api_key))?;
        value.set_sensitive(true);
        conn.set_header(AUTHORIZATION, value);
        Ok(())
    }
}

fn main() -> Result<()> {
    let ctx = Context::new().with_env(StaticEnv {
        envs: HashMap::from([("MY_API_KEY".to_string(), "demo-api-key".to_string())]),
    });

    let Some(cred) = MyCredentialLoader.provide_credential(&ctx)? else {
        println!("MY_API_KEY is not set");
        return Ok(());
    };
    println!("Loaded credential: {cred:?}, valid: {}", cred.is_valid());

    let factory = RequestFactory::new(MySigner { cred });
    let conn = factory.prepare(
        &HttpConnectionProvider,
        "https://www.appdirect.com/api/integration/v1/events",
        Method::GET,
    )?;

    println!("Prepared connection:");
    println!("  url: {}", conn.url());
    println!("  method: {}", conn.method());
    println!("  connect timeout: {:?}", conn.connect_timeout());
    println!("  read timeout: {:?}", conn.read_timeout());
    println!("  follow redirects: {}", conn.follow_redirects());
    Ok(())
}
