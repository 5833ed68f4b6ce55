//! Common types used throughout the Rentra platform.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::prelude::*;

// TenantId //
//**********//

/// Opaque tenant identifier: `tenant_<millis base36>_<8 hex>`.
///
/// Globally unique and immutable once assigned to an Owner.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub Box<str>);

impl TenantId {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Structural check used on externally supplied tenant ids
	pub fn is_valid(s: &str) -> bool {
		s.starts_with("tenant_") && s.len() > 10
	}
}

impl std::fmt::Display for TenantId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<&str> for TenantId {
	fn from(s: &str) -> Self {
		TenantId(Box::from(s))
	}
}

// Role //
//******//

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
	Owner,
	ClientMaster,
	SuperAdmin,
}

impl std::fmt::Display for Role {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Role::Owner => write!(f, "Owner"),
			Role::ClientMaster => write!(f, "ClientMaster"),
			Role::SuperAdmin => write!(f, "SuperAdmin"),
		}
	}
}

impl std::str::FromStr for Role {
	type Err = Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"Owner" => Ok(Role::Owner),
			"ClientMaster" => Ok(Role::ClientMaster),
			"SuperAdmin" => Ok(Role::SuperAdmin),
			_ => Err(Error::ValidationError(format!("invalid role: {}", s))),
		}
	}
}

// TenantScope //
//*************//

/// Effective data-access scope of an authenticated request.
///
/// `Scoped` intersects every store filter with the tenant id;
/// `Unrestricted` is reserved for SuperAdmin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TenantScope {
	Scoped(TenantId),
	Unrestricted,
}

impl TenantScope {
	/// Tenant filter value for store queries; `None` means no filter
	pub fn filter(&self) -> Option<&str> {
		match self {
			TenantScope::Scoped(t) => Some(t.as_str()),
			TenantScope::Unrestricted => None,
		}
	}

	pub fn tenant_id(&self) -> Option<&TenantId> {
		match self {
			TenantScope::Scoped(t) => Some(t),
			TenantScope::Unrestricted => None,
		}
	}
}

// Timestamp //
//***********//

/// Unix timestamp in seconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Timestamp {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(res.as_secs() as i64)
	}

	pub fn from_now(seconds: i64) -> Timestamp {
		Timestamp(Self::now().0 + seconds)
	}

	pub fn add_seconds(self, seconds: i64) -> Timestamp {
		Timestamp(self.0 + seconds)
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}


// vim: ts=4
