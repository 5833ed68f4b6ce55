//! External identity-provider adapter trait.
//!
//! Used only to bootstrap or confirm a SuperAdmin identity: the adapter
//! verifies an externally issued token and returns the provider's view of
//! the identity, which feeds the local token service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

/// Profile returned by the external identity provider
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalProfile {
	pub id: Box<str>,
	pub email: Box<str>,
	pub display_name: Box<str>,
}

#[async_trait]
pub trait IdentityProviderAdapter: Debug + Send + Sync {
	/// Verifies an external token with the provider.
	///
	/// An invalid or rejected token is `Error::Unauthorized`; a provider
	/// outage is `Error::ServiceUnavailable`.
	async fn verify(&self, external_token: &str) -> RtResult<ExternalProfile>;
}

// vim: ts=4
