use anyhow::Result;
use appsign_core::{Context, HttpConnectionProvider};
use appsign_http_send_reqwest::ReqwestHttpSend;
use bytes::Bytes;
use http::Method;
use reqwest::Client;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Create a custom reqwest client with specific configuration
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .user_agent("appsign-example/1.0")
        .build()?;

    println!("Created custom HTTP client with:");
    println!("  - 30 second timeout");
    println!("  - Max 10 idle connections per host");
    println!("  - Custom user agent");

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));
    let factory = appsign_oauth1::new_factory("some-key", "some-secret")?;

    let test_url = "https://httpbin.org/get?p1=v1";
    println!("\nSending signed GET {test_url}");

    let conn = factory.prepare(&HttpConnectionProvider, test_url, Method::GET)?;
    match ctx.http_send_as_string(conn, Bytes::new()).await {
        Ok(resp) => {
            println!("Response status: {}", resp.status());
            println!("\nResponse body:");
            println!("{}", resp.body());
        }
        Err(e) => {
            eprintln!("Request failed: {e}");
        }
    }

    // Demonstrate using the default transport, which honors the factory timeouts
    println!("\n--- Using default transport ---");
    let default_ctx = Context::new().with_http_send(ReqwestHttpSend::default());

    let conn = factory.prepare(&HttpConnectionProvider, "https://httpbin.org/post", Method::POST)?;
    match default_ctx
        .http_send(conn, Bytes::from(r#"{"message": "Hello from appsign!"}"#))
        .await
    {
        Ok(resp) => {
            println!("POST request successful!");
            println!("Response status: {}", resp.status());
        }
        Err(e) => {
            eprintln!("POST request failed: {e}");
        }
    }

    Ok(())
}
