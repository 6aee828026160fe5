//! The authorization evaluator: given a user identity, an object identity,
//! and a requested action, decide whether the action is permitted, and
//! produce the set of objects of a type a user may read.
//!
//! Evaluation is a pure join over the RBAC relations (user, roles,
//! permissions, objects) loaded through an [`AuthzStore`]; see
//! [`evaluator`] for the decision rules. The operations here add the
//! identifier checks at the boundary and the storage round-trips.

pub mod error;
pub mod evaluator;
pub mod relations;
pub mod store;
pub mod types;

pub use error::AuthzError;
pub use relations::{GrantedPermission, ObjectRecord, PolicySnapshot, UserRecord};
pub use store::AuthzStore;
pub use types::{Action, ObjectType};

use std::collections::HashSet;
use uuid::Uuid;

use crate::ident;

/// Whether `auth0_id` may perform `action` on the object identified by
/// `object_id` (canonical UUID text).
///
/// Nonexistent user, nonexistent object, cross-organization access, and
/// uncovered actions are all ordinary `false`. Only a malformed identifier
/// or an unreachable store is an error.
pub async fn can_user_perform_action<S>(
    store: &S,
    auth0_id: &str,
    object_id: &str,
    action: Action,
) -> Result<bool, AuthzError>
where
    S: AuthzStore + ?Sized,
{
    let object_id = ident::parse_uuid(object_id)?;
    let Some(snapshot) = store.load_snapshot(auth0_id).await? else {
        return Ok(false);
    };
    let Some(object) = store.find_object(object_id).await? else {
        return Ok(false);
    };
    Ok(snapshot.can_perform(&object, action))
}

/// Whether `auth0_id` may create objects of `object_type` within their own
/// organization.
pub async fn user_can_create<S>(
    store: &S,
    auth0_id: &str,
    object_type: ObjectType,
) -> Result<bool, AuthzError>
where
    S: AuthzStore + ?Sized,
{
    let Some(snapshot) = store.load_snapshot(auth0_id).await? else {
        return Ok(false);
    };
    Ok(snapshot.can_create(object_type))
}

/// The ids of every object of `object_type` in the user's organization that
/// some held role grants `read` on. Set-equal to the union of individually
/// readable objects; an unknown user reads nothing.
pub async fn list_objects_user_can_read<S>(
    store: &S,
    auth0_id: &str,
    object_type: ObjectType,
) -> Result<HashSet<Uuid>, AuthzError>
where
    S: AuthzStore + ?Sized,
{
    let Some(snapshot) = store.load_snapshot(auth0_id).await? else {
        return Ok(HashSet::new());
    };
    let objects = store
        .list_objects(snapshot.user.organization_id, object_type)
        .await?;
    Ok(snapshot.readable_objects(objects.iter()))
}
