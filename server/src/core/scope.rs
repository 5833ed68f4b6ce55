//! Tenant scope resolution
//!
//! Maps an authenticated identity to its effective data-access scope. Runs
//! before any store call on tenant-partitioned entities.

use crate::core::token::AuthClaims;
use crate::prelude::*;

pub fn resolve_scope(claims: &AuthClaims) -> RtResult<TenantScope> {
	match (&claims.tenant_id, claims.role) {
		(Some(tenant_id), _) => Ok(TenantScope::Scoped(tenant_id.clone())),
		(None, Role::SuperAdmin) => Ok(TenantScope::Unrestricted),
		// authenticated but bound to no tenant and not platform-level
		(None, _) => Err(Error::PermissionDenied),
	}
}

/// Tenant a new tenant-partitioned record lands under.
///
/// Tenant-bound callers are stamped with their own partition; a conflicting
/// supplied value is a boundary violation, not a request to honor.
/// Unrestricted callers must say which tenant they mean.
pub fn resolve_write_tenant(claims: &AuthClaims, supplied: Option<&str>) -> RtResult<TenantId> {
	match resolve_scope(claims)? {
		TenantScope::Scoped(tenant_id) => match supplied {
			Some(s) if s != tenant_id.as_str() => Err(Error::PermissionDenied),
			_ => Ok(tenant_id),
		},
		TenantScope::Unrestricted => {
			let supplied = supplied
				.ok_or(Error::ValidationError("tenant_id is required".into()))?;
			if !TenantId::is_valid(supplied) {
				return Err(Error::ValidationError("Invalid tenant_id".into()));
			}
			Ok(TenantId::from(supplied))
		}
	}
}


// vim: ts=4
