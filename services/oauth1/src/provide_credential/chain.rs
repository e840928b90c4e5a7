use crate::Credential;
use appsign_core::{Context, ProvideCredential, Result};
use log::{debug, warn};
use std::fmt::{self, Debug};

/// A chain of credential providers that will be tried in order.
///
/// The first provider returning a credential wins. Providers that fail are logged and
/// skipped.
pub struct ProvideCredentialChain {
    providers: Vec<Box<dyn ProvideCredential<Credential = Credential>>>,
}

impl ProvideCredentialChain {
    /// Create a new empty credential provider chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add a credential provider to the end of the chain.
    pub fn push(mut self, provider: impl ProvideCredential<Credential = Credential>) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Add a credential provider to the front of the chain.
    pub fn push_front(mut self, provider: impl ProvideCredential<Credential = Credential>) -> Self {
        self.providers.insert(0, Box::new(provider));
        self
    }

    /// Number of providers in this chain.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns `true` if the chain has no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProvideCredentialChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ProvideCredentialChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvideCredentialChain")
            .field("providers_count", &self.providers.len())
            .finish()
    }
}

impl ProvideCredential for ProvideCredentialChain {
    type Credential = Credential;

    fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        for provider in &self.providers {
            debug!("trying credential provider: {provider:?}");

            match provider.provide_credential(ctx) {
                Ok(Some(cred)) => {
                    debug!("loaded credential from provider: {provider:?}");
                    return Ok(Some(cred));
                }
                Ok(None) => {
                    debug!("no credential found in provider: {provider:?}");
                }
                Err(err) => {
                    warn!("failed to load credential from provider {provider:?}: {err:?}");
                }
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticCredentialProvider;
    use appsign_core::Error;

    #[derive(Debug)]
    struct FailingProvider;

    impl ProvideCredential for FailingProvider {
        type Credential = Credential;

        fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
            Err(Error::unexpected("provider is broken"))
        }
    }

    #[derive(Debug)]
    struct EmptyProvider;

    impl ProvideCredential for EmptyProvider {
        type Credential = Credential;

        fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
            Ok(None)
        }
    }

    #[test]
    fn test_chain_skips_failures() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let chain = ProvideCredentialChain::new()
            .push(FailingProvider)
            .push(EmptyProvider)
            .push(StaticCredentialProvider::new("chain-key", "chain-secret"));
        assert_eq!(chain.len(), 3);

        let cred = chain
            .provide_credential(&Context::new())?
            .expect("credential must be loaded");
        assert_eq!(cred.consumer_key, "chain-key");
        Ok(())
    }

    #[test]
    fn test_chain_push_front_takes_priority() -> Result<()> {
        let chain = ProvideCredentialChain::new()
            .push(StaticCredentialProvider::new("second", "secret"))
            .push_front(StaticCredentialProvider::new("first", "secret"));

        let cred = chain
            .provide_credential(&Context::new())?
            .expect("credential must be loaded");
        assert_eq!(cred.consumer_key, "first");
        Ok(())
    }

    #[test]
    fn test_empty_chain() -> Result<()> {
        let chain = ProvideCredentialChain::default();
        assert!(chain.is_empty());
        assert!(chain.provide_credential(&Context::new())?.is_none());
        Ok(())
    }
}
