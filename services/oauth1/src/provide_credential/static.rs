use crate::Credential;
use appsign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides a fixed consumer key and secret.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    consumer_key: String,
    consumer_secret: String,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with consumer key and consumer secret.
    pub fn new(consumer_key: &str, consumer_secret: &str) -> Self {
        Self {
            consumer_key: consumer_key.to_string(),
            consumer_secret: consumer_secret.to_string(),
        }
    }
}

impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(Credential::new(
            &self.consumer_key,
            &self.consumer_secret,
        )))
    }
}
