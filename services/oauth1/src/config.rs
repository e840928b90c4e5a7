use crate::constants::*;
use crate::SignatureMethod;
use appsign_core::utils::Redact;
use appsign_core::Context;
use log::warn;
use std::fmt::{Debug, Formatter};

/// Config carries all the configuration for signing AppMarket requests.
#[derive(Clone, Default)]
pub struct Config {
    /// `consumer_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`APPMARKET_CONSUMER_KEY`]
    pub consumer_key: Option<String>,
    /// `consumer_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`APPMARKET_CONSUMER_SECRET`]
    pub consumer_secret: Option<String>,
    /// `signature_method` will be loaded from
    ///
    /// - env value: [`APPMARKET_SIGNATURE_METHOD`]
    /// - default to `HMAC-SHA1`
    pub signature_method: SignatureMethod,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("consumer_key", &Redact::from(&self.consumer_key))
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("signature_method", &self.signature_method)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(APPMARKET_CONSUMER_KEY) {
            self.consumer_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(APPMARKET_CONSUMER_SECRET) {
            self.consumer_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(APPMARKET_SIGNATURE_METHOD) {
            match v.parse() {
                Ok(method) => self.signature_method = method,
                Err(err) => warn!("ignore {APPMARKET_SIGNATURE_METHOD}: {err}"),
            }
        }

        self
    }
}
