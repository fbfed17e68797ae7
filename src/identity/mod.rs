//! Principals and the identity provider seam.
//!
//! Authentication is delegated to an external hosted identity service.
//! This module defines the principal types the rest of the crate works with
//! and the capability trait a provider integration implements. Credential
//! acquisition (OAuth consent screens etc.) happens outside this crate; a
//! [`FederatedCredential`] arrives here as an opaque token.

use async_trait::async_trait;
use thiserror::Error;

/// An authenticated principal issued by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable provider-issued user id
    pub user_id: String,

    /// Whether this is an anonymous (guest) identity
    pub is_anonymous: bool,

    /// Email address, when the provider knows one
    pub email: Option<String>,

    /// Display name, when the provider knows one
    pub display_name: Option<String>,
}

impl Identity {
    /// An anonymous guest identity.
    pub fn anonymous(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            is_anonymous: true,
            email: None,
            display_name: None,
        }
    }

    /// An identity backed by a federated account.
    pub fn federated(
        user_id: impl Into<String>,
        email: Option<String>,
        display_name: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            is_anonymous: false,
            email,
            display_name,
        }
    }
}

/// An externally acquired federated sign-in credential.
///
/// The token is opaque to this crate; only the provider exchange understands
/// it.
#[derive(Debug, Clone)]
pub struct FederatedCredential {
    /// Federation source, e.g. `google.com`
    pub provider: String,

    /// The raw token obtained from the federation source
    pub id_token: String,
}

impl FederatedCredential {
    /// A Google sign-in credential.
    pub fn google(id_token: impl Into<String>) -> Self {
        Self {
            provider: "google.com".to_string(),
            id_token: id_token.into(),
        }
    }
}

/// Sign-in failure classification.
///
/// Network-class failures degrade to an offline placeholder profile; every
/// other class is surfaced to the caller.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider could not be reached at all.
    #[error("identity provider unreachable: {0}")]
    NetworkUnavailable(String),

    /// The provider answered but refused or failed the attempt
    /// (bad credential, disabled account, internal provider error).
    #[error("identity provider error: {0}")]
    Provider(String),
}

impl AuthError {
    pub fn is_network(&self) -> bool {
        matches!(self, AuthError::NetworkUnavailable(_))
    }
}

/// Capability interface over the hosted identity service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Identity from a previously established provider session, if any.
    async fn current_identity(&self) -> Option<Identity>;

    /// Request a new or continued anonymous identity.
    async fn sign_in_anonymously(&self) -> Result<Identity, AuthError>;

    /// Exchange a federated credential for an identity.
    async fn sign_in_with_credential(
        &self,
        credential: FederatedCredential,
    ) -> Result<Identity, AuthError>;
}
