use anyhow::Result;
use appsign::oauth1::Config;
use appsign::{default_context, HttpConnectionProvider};
use bytes::Bytes;
use http::Method;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Reads APPMARKET_CONSUMER_KEY and APPMARKET_CONSUMER_SECRET
    let ctx = default_context();
    let factory = appsign::oauth1::load_factory(&ctx, Config::default().from_env(&ctx))?;

    let event_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://www.appdirect.com/api/integration/v1/events/1234".to_string());

    let conn = factory.prepare(&HttpConnectionProvider, &event_url, Method::GET)?;
    let resp = ctx.http_send_as_string(conn, Bytes::new()).await?;
    println!("Response status: {}", resp.status());
    println!("{}", resp.body());

    Ok(())
}
