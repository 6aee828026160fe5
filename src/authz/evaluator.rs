//! Pure policy evaluation over a loaded [`PolicySnapshot`].
//!
//! The decision is a join filtered three ways: the user's organization must
//! own the object, the permission must be scoped to that same organization,
//! and the permission must cover the action on the object (explicitly or via
//! `applies_to_all` over the object's type). Overlapping grants compose by
//! union; there are no deny overrides. Absence of a match is denial.

use std::collections::HashSet;
use uuid::Uuid;

use super::relations::{ObjectRecord, PolicySnapshot};
use super::types::{Action, ObjectType};

impl PolicySnapshot {
    /// Whether the user may perform `action` on an existing object.
    ///
    /// `Create` never matches here: creation is granted per type, not per
    /// object, and is answered by [`can_create`](Self::can_create).
    pub fn can_perform(&self, object: &ObjectRecord, action: Action) -> bool {
        if action == Action::Create {
            return false;
        }
        if object.organization_id != self.user.organization_id {
            return false;
        }
        self.permissions.iter().any(|perm| {
            perm.action == action
                && perm.object_type == object.object_type
                && perm.organization_id == self.user.organization_id
                && (perm.applies_to_all || perm.object_ids.contains(&object.id))
        })
    }

    /// Whether the user may create objects of `object_type`.
    ///
    /// Only create grants scoped to the user's own organization count; a
    /// role may carry another organization's permission, but it never
    /// authorizes creation there.
    pub fn can_create(&self, object_type: ObjectType) -> bool {
        self.permissions.iter().any(|perm| {
            perm.action == Action::Create
                && perm.object_type == object_type
                && perm.organization_id == self.user.organization_id
        })
    }

    /// The subset of `objects` the user may read, as a set of ids.
    pub fn readable_objects<'a, I>(&self, objects: I) -> HashSet<Uuid>
    where
        I: IntoIterator<Item = &'a ObjectRecord>,
    {
        objects
            .into_iter()
            .filter(|object| self.can_perform(object, Action::Read))
            .map(|object| object.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::relations::{GrantedPermission, UserRecord};

    fn snapshot(org: Uuid, permissions: Vec<GrantedPermission>) -> PolicySnapshot {
        PolicySnapshot {
            user: UserRecord {
                id: Uuid::new_v4(),
                auth0_id: "auth0|tester".to_string(),
                organization_id: org,
            },
            permissions,
        }
    }

    fn permission(
        org: Uuid,
        action: Action,
        object_type: ObjectType,
        applies_to_all: bool,
        object_ids: &[Uuid],
    ) -> GrantedPermission {
        GrantedPermission {
            id: Uuid::new_v4(),
            organization_id: org,
            action,
            object_type,
            applies_to_all,
            object_ids: object_ids.iter().copied().collect(),
        }
    }

    fn object(org: Uuid, object_type: ObjectType) -> ObjectRecord {
        ObjectRecord {
            id: Uuid::new_v4(),
            object_type,
            organization_id: org,
        }
    }

    #[test]
    fn type_wide_grant_covers_every_object_of_type() {
        let org = Uuid::new_v4();
        let snap = snapshot(
            org,
            vec![permission(org, Action::Read, ObjectType::Forecasts, true, &[])],
        );
        let fx = object(org, ObjectType::Forecasts);
        assert!(snap.can_perform(&fx, Action::Read));
        assert!(!snap.can_perform(&fx, Action::Update));
        assert!(!snap.can_perform(&fx, Action::Delete));
    }

    #[test]
    fn explicit_grant_covers_only_listed_objects() {
        let org = Uuid::new_v4();
        let listed = object(org, ObjectType::Observations);
        let unlisted = object(org, ObjectType::Observations);
        let snap = snapshot(
            org,
            vec![permission(
                org,
                Action::Read,
                ObjectType::Observations,
                false,
                &[listed.id],
            )],
        );
        assert!(snap.can_perform(&listed, Action::Read));
        assert!(!snap.can_perform(&unlisted, Action::Read));
    }

    #[test]
    fn grant_does_not_leak_across_object_types() {
        let org = Uuid::new_v4();
        let snap = snapshot(
            org,
            vec![permission(org, Action::Read, ObjectType::Forecasts, true, &[])],
        );
        assert!(!snap.can_perform(&object(org, ObjectType::Observations), Action::Read));
    }

    #[test]
    fn cross_organization_object_always_denied() {
        let org = Uuid::new_v4();
        let other_org = Uuid::new_v4();
        let snap = snapshot(
            org,
            vec![permission(org, Action::Read, ObjectType::Forecasts, true, &[])],
        );
        let foreign = object(other_org, ObjectType::Forecasts);
        for action in [Action::Read, Action::Update, Action::Delete] {
            assert!(!snap.can_perform(&foreign, action));
        }
    }

    #[test]
    fn foreign_permission_held_through_role_does_not_authorize() {
        // A role may be mapped to another organization's permission; the
        // grant must still be inert for this user.
        let org = Uuid::new_v4();
        let other_org = Uuid::new_v4();
        let snap = snapshot(
            org,
            vec![permission(
                other_org,
                Action::Read,
                ObjectType::Forecasts,
                true,
                &[],
            )],
        );
        assert!(!snap.can_perform(&object(org, ObjectType::Forecasts), Action::Read));
    }

    #[test]
    fn create_never_applies_to_an_existing_object() {
        let org = Uuid::new_v4();
        let snap = snapshot(
            org,
            vec![permission(org, Action::Create, ObjectType::Forecasts, true, &[])],
        );
        assert!(!snap.can_perform(&object(org, ObjectType::Forecasts), Action::Create));
        assert!(snap.can_create(ObjectType::Forecasts));
    }

    #[test]
    fn can_create_requires_same_organization_grant() {
        let org = Uuid::new_v4();
        let other_org = Uuid::new_v4();
        let snap = snapshot(
            org,
            vec![permission(
                other_org,
                Action::Create,
                ObjectType::Roles,
                true,
                &[],
            )],
        );
        assert!(!snap.can_create(ObjectType::Roles));
    }

    #[test]
    fn can_create_denied_for_ungranted_types() {
        let org = Uuid::new_v4();
        let snap = snapshot(
            org,
            vec![permission(org, Action::Create, ObjectType::Forecasts, true, &[])],
        );
        assert!(snap.can_create(ObjectType::Forecasts));
        for otype in [
            ObjectType::Observations,
            ObjectType::Sites,
            ObjectType::Aggregates,
            ObjectType::Users,
            ObjectType::Roles,
            ObjectType::Permissions,
            ObjectType::Mappings,
        ] {
            assert!(!snap.can_create(otype));
        }
    }

    #[test]
    fn overlapping_grants_compose_by_union() {
        let org = Uuid::new_v4();
        let fx = object(org, ObjectType::Forecasts);
        let snap = snapshot(
            org,
            vec![
                permission(org, Action::Read, ObjectType::Forecasts, false, &[fx.id]),
                permission(org, Action::Read, ObjectType::Forecasts, false, &[fx.id]),
            ],
        );
        assert!(snap.can_perform(&fx, Action::Read));
    }

    #[test]
    fn readable_objects_filters_and_dedups() {
        let org = Uuid::new_v4();
        let a = object(org, ObjectType::Forecasts);
        let b = object(org, ObjectType::Forecasts);
        let snap = snapshot(
            org,
            vec![
                permission(org, Action::Read, ObjectType::Forecasts, false, &[a.id]),
                // overlapping grant on the same object plus a type-wide one
                permission(org, Action::Read, ObjectType::Forecasts, true, &[]),
            ],
        );
        let objects = vec![a.clone(), b.clone(), a.clone()];
        let readable = snap.readable_objects(objects.iter());
        assert_eq!(readable, [a.id, b.id].into_iter().collect());
    }

    #[test]
    fn no_permissions_means_denial() {
        let org = Uuid::new_v4();
        let snap = snapshot(org, vec![]);
        let fx = object(org, ObjectType::Forecasts);
        for action in [Action::Create, Action::Read, Action::Update, Action::Delete] {
            assert!(!snap.can_perform(&fx, action));
        }
        assert!(snap.readable_objects(std::iter::empty()).is_empty());
    }
}
