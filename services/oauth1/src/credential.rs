use appsign_core::utils::Redact;
use appsign_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential that holds the consumer key and secret issued by AppMarket.
///
/// Two-legged OAuth only: there is no access token and no token secret.
#[derive(Default, Clone)]
pub struct Credential {
    /// Consumer key identifying the application.
    pub consumer_key: String,
    /// Consumer secret shared with AppMarket.
    pub consumer_secret: String,
}

impl Credential {
    /// Create a new credential from consumer key and secret.
    pub fn new(consumer_key: &str, consumer_secret: &str) -> Self {
        Self {
            consumer_key: consumer_key.to_string(),
            consumer_secret: consumer_secret.to_string(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("consumer_key", &Redact::from(&self.consumer_key))
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.consumer_key.is_empty() && !self.consumer_secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("some-key", "some-secret", true ; "complete")]
    #[test_case("", "some-secret", false ; "missing key")]
    #[test_case("some-key", "", false ; "missing secret")]
    fn test_is_valid(key: &str, secret: &str, expected: bool) {
        assert_eq!(Credential::new(key, secret).is_valid(), expected);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let cred = Credential::new("marketplace-consumer", "very-secret-value");
        let output = format!("{cred:?}");

        assert!(!output.contains("very-secret-value"));
        assert!(output.contains("ver***lue"));
    }
}
