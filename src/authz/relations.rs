//! The relations the evaluator operates over, detached from any particular
//! storage engine. An [`AuthzStore`](crate::authz::store::AuthzStore)
//! materializes these per request; evaluation itself is pure.

use std::collections::HashSet;
use uuid::Uuid;

use super::types::{Action, ObjectType};

/// A stored user: internal id, external identity-provider subject, owning
/// organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub auth0_id: String,
    pub organization_id: Uuid,
}

/// An access-controlled object resolved by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRecord {
    pub id: Uuid,
    pub object_type: ObjectType,
    pub organization_id: Uuid,
}

/// One permission reachable through some role the user holds.
///
/// A permission either applies to every object of its type within its
/// organization (`applies_to_all`) or to the explicit `object_ids` set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantedPermission {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub action: Action,
    pub object_type: ObjectType,
    pub applies_to_all: bool,
    pub object_ids: HashSet<Uuid>,
}

/// Everything needed to answer policy questions for one user: the user row
/// plus the union of permissions across all held roles, loaded in one shot.
#[derive(Debug, Clone)]
pub struct PolicySnapshot {
    pub user: UserRecord,
    pub permissions: Vec<GrantedPermission>,
}
