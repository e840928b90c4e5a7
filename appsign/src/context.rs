use appsign_core::{Context, OsEnv};
use appsign_http_send_reqwest::ReqwestHttpSend;

/// Build a [`Context`] reading the process environment and sending with reqwest.
pub fn default_context() -> Context {
    Context::new()
        .with_env(OsEnv)
        .with_http_send(ReqwestHttpSend::default())
}
