use crate::{Config, Credential};
use appsign_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

/// ConfigCredentialProvider provides the credential set in [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        match (&self.config.consumer_key, &self.config.consumer_secret) {
            (Some(key), Some(secret)) => Ok(Some(Credential::new(key, secret))),
            _ => Ok(None),
        }
    }
}
