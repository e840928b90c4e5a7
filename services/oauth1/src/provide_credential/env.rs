use crate::{constants::*, Credential};
use appsign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads the AppMarket credential from environment variables.
///
/// This provider looks for the following environment variables:
/// - `APPMARKET_CONSUMER_KEY`: the OAuth consumer key
/// - `APPMARKET_CONSUMER_SECRET`: the OAuth consumer secret
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let consumer_key = ctx.env_var(APPMARKET_CONSUMER_KEY);
        let consumer_secret = ctx.env_var(APPMARKET_CONSUMER_SECRET);

        match (consumer_key, consumer_secret) {
            (Some(key), Some(secret)) => Ok(Some(Credential {
                consumer_key: key,
                consumer_secret: secret,
            })),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appsign_core::StaticEnv;
    use std::collections::HashMap;

    #[test]
    fn test_env_credential_provider() -> Result<()> {
        let envs = HashMap::from([
            (APPMARKET_CONSUMER_KEY.to_string(), "env-key".to_string()),
            (APPMARKET_CONSUMER_SECRET.to_string(), "env-secret".to_string()),
        ]);
        let ctx = Context::new().with_env(StaticEnv { envs });

        let cred = EnvCredentialProvider::new()
            .provide_credential(&ctx)?
            .expect("credential must be loaded");
        assert_eq!(cred.consumer_key, "env-key");
        assert_eq!(cred.consumer_secret, "env-secret");
        Ok(())
    }

    #[test]
    fn test_env_credential_provider_partial_credentials() -> Result<()> {
        let envs = HashMap::from([(APPMARKET_CONSUMER_KEY.to_string(), "env-key".to_string())]);
        let ctx = Context::new().with_env(StaticEnv { envs });

        assert!(EnvCredentialProvider::new()
            .provide_credential(&ctx)?
            .is_none());
        Ok(())
    }
}
