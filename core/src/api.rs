use crate::{Connection, Context, Result};
use std::fmt::Debug;

/// SigningCredential is the trait used by signers as the signing key.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is valid.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential is the trait used to load the credential from the environment.
///
/// Credentials are loaded once when a signer is built, never per request.
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load signing credential from current env.
    ///
    /// Returns `Ok(None)` if this provider has nothing to offer.
    fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// Sign is the signing engine applied to every outbound connection.
///
/// Implementations compute the signature from the connection's method and URL
/// and store it on the connection, typically as an `Authorization` header.
///
/// A single signer is shared by every request a factory prepares, possibly
/// from many threads at once, so `sign` must not rely on mutable state.
pub trait Sign: Debug + Send + Sync + 'static {
    /// Sign the connection in place.
    fn sign(&self, conn: &mut dyn Connection) -> Result<()>;
}
