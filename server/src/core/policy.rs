//! Role-based authorization policy
//!
//! A single static allow table consulted by every entity handler. Denial is
//! always an explicit `PermissionDenied`; nothing here downgrades a request
//! to a narrower scope.

use crate::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
	Owner,
	Client,
	Property,
	RentAgreement,
	RentTransaction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
	Create,
	Read,
	Update,
	Delete,
	/// Bulk delete within the caller's scope
	DeleteAll,
}

fn allowed(role: Role, entity: Entity, op: Op) -> bool {
	use Entity::*;
	use Op::*;

	match (entity, op, role) {
		// Owner accounts are platform-administered
		(Owner, _, Role::SuperAdmin) => true,
		(Owner, _, _) => false,

		(Client, Read, Role::Owner | Role::SuperAdmin) => true,
		(Client, Create, Role::Owner | Role::SuperAdmin) => true,
		(Client, Update | Delete | DeleteAll, Role::Owner) => true,
		(Client, _, _) => false,

		(Property, Read | Create | Update | Delete, Role::Owner | Role::SuperAdmin) => true,
		(Property, DeleteAll, Role::Owner | Role::SuperAdmin) => true,
		(Property, _, _) => false,

		(RentAgreement, _, Role::Owner) => true,
		(RentAgreement, _, _) => false,

		(RentTransaction, Create, Role::Owner) => true,
		(RentTransaction, Read, Role::Owner | Role::ClientMaster) => true,
		(RentTransaction, Update | Delete | DeleteAll, Role::Owner) => true,
		(RentTransaction, _, _) => false,
	}
}

pub fn check(role: Role, entity: Entity, op: Op) -> RtResult<()> {
	if allowed(role, entity, op) { Ok(()) } else { Err(Error::PermissionDenied) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_owner_entity_is_superadmin_only() {
		for op in [Op::Create, Op::Read, Op::Update, Op::Delete, Op::DeleteAll] {
			assert!(check(Role::SuperAdmin, Entity::Owner, op).is_ok());
			assert!(check(Role::Owner, Entity::Owner, op).is_err());
			assert!(check(Role::ClientMaster, Entity::Owner, op).is_err());
		}
	}

	#[test]
	fn test_client_mutations_are_owner_only() {
		assert!(check(Role::Owner, Entity::Client, Op::Update).is_ok());
		assert!(check(Role::Owner, Entity::Client, Op::Delete).is_ok());
		assert!(check(Role::SuperAdmin, Entity::Client, Op::Update).is_err());
		assert!(check(Role::SuperAdmin, Entity::Client, Op::Delete).is_err());
		// reads are shared with the platform role
		assert!(check(Role::SuperAdmin, Entity::Client, Op::Read).is_ok());
		assert!(check(Role::ClientMaster, Entity::Client, Op::Read).is_err());
	}

	#[test]
	fn test_agreements_are_owner_only() {
		for op in [Op::Create, Op::Read, Op::Update, Op::Delete, Op::DeleteAll] {
			assert!(check(Role::Owner, Entity::RentAgreement, op).is_ok());
			assert!(check(Role::SuperAdmin, Entity::RentAgreement, op).is_err());
			assert!(check(Role::ClientMaster, Entity::RentAgreement, op).is_err());
		}
	}

	#[test]
	fn test_transaction_reads_include_client_master() {
		assert!(check(Role::ClientMaster, Entity::RentTransaction, Op::Read).is_ok());
		assert!(check(Role::ClientMaster, Entity::RentTransaction, Op::Create).is_err());
		assert!(check(Role::Owner, Entity::RentTransaction, Op::Create).is_ok());
		assert!(check(Role::SuperAdmin, Entity::RentTransaction, Op::Read).is_err());
	}
}

// vim: ts=4
