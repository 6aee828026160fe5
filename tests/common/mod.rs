#![allow(dead_code)] // each test binary uses a different slice of the fixtures

//! In-memory `AuthzStore` plus fixture builders for exercising the
//! evaluator without a live database. The store keeps the raw RBAC
//! relations and performs the user -> roles -> permissions join on load,
//! the same shape the Postgres store produces.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

use arbiter_authz::authz::{
    Action, AuthzError, AuthzStore, GrantedPermission, ObjectRecord, ObjectType, PolicySnapshot,
    UserRecord,
};

#[derive(Debug, Clone)]
pub struct PermissionRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub action: Action,
    pub object_type: ObjectType,
    pub applies_to_all: bool,
}

#[derive(Debug, Default)]
struct Relations {
    users: Vec<UserRecord>,
    objects: Vec<ObjectRecord>,
    permissions: Vec<PermissionRow>,
    user_roles: Vec<(Uuid, Uuid)>,
    role_permissions: Vec<(Uuid, Uuid)>,
    permission_objects: Vec<(Uuid, Uuid)>,
}

#[derive(Debug, Default)]
pub struct MemoryAuthzStore {
    relations: Mutex<Relations>,
}

#[async_trait]
impl AuthzStore for MemoryAuthzStore {
    async fn load_snapshot(&self, auth0_id: &str) -> Result<Option<PolicySnapshot>, AuthzError> {
        let rel = self.relations.lock().unwrap();

        let Some(user) = rel.users.iter().find(|u| u.auth0_id == auth0_id).cloned() else {
            return Ok(None);
        };

        let role_ids: HashSet<Uuid> = rel
            .user_roles
            .iter()
            .filter(|(user_id, _)| *user_id == user.id)
            .map(|(_, role_id)| *role_id)
            .collect();

        let permission_ids: HashSet<Uuid> = rel
            .role_permissions
            .iter()
            .filter(|(role_id, _)| role_ids.contains(role_id))
            .map(|(_, permission_id)| *permission_id)
            .collect();

        let mut object_sets: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
        for (permission_id, object_id) in &rel.permission_objects {
            if permission_ids.contains(permission_id) {
                object_sets.entry(*permission_id).or_default().insert(*object_id);
            }
        }

        let permissions = rel
            .permissions
            .iter()
            .filter(|perm| permission_ids.contains(&perm.id))
            .map(|perm| GrantedPermission {
                id: perm.id,
                organization_id: perm.organization_id,
                action: perm.action,
                object_type: perm.object_type,
                applies_to_all: perm.applies_to_all,
                object_ids: object_sets.remove(&perm.id).unwrap_or_default(),
            })
            .collect();

        Ok(Some(PolicySnapshot { user, permissions }))
    }

    async fn find_object(&self, object_id: Uuid) -> Result<Option<ObjectRecord>, AuthzError> {
        let rel = self.relations.lock().unwrap();
        Ok(rel.objects.iter().find(|o| o.id == object_id).cloned())
    }

    async fn list_objects(
        &self,
        organization_id: Uuid,
        object_type: ObjectType,
    ) -> Result<Vec<ObjectRecord>, AuthzError> {
        let rel = self.relations.lock().unwrap();
        Ok(rel
            .objects
            .iter()
            .filter(|o| o.organization_id == organization_id && o.object_type == object_type)
            .cloned()
            .collect())
    }
}

impl MemoryAuthzStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_organization(&self) -> Uuid {
        Uuid::new_v4()
    }

    pub fn new_user(&self, org: Uuid) -> (Uuid, String) {
        let mut rel = self.relations.lock().unwrap();
        let id = Uuid::new_v4();
        let auth0_id = format!("auth0|{}", id.simple());
        rel.users.push(UserRecord {
            id,
            auth0_id: auth0_id.clone(),
            organization_id: org,
        });
        // users are addressable objects too
        rel.objects.push(ObjectRecord {
            id,
            object_type: ObjectType::Users,
            organization_id: org,
        });
        (id, auth0_id)
    }

    /// Roles are plain ids here; the join tables give them meaning.
    pub fn new_role(&self, org: Uuid) -> Uuid {
        let mut rel = self.relations.lock().unwrap();
        let id = Uuid::new_v4();
        rel.objects.push(ObjectRecord {
            id,
            object_type: ObjectType::Roles,
            organization_id: org,
        });
        id
    }

    pub fn new_permission(
        &self,
        org: Uuid,
        action: Action,
        object_type: ObjectType,
        applies_to_all: bool,
    ) -> Uuid {
        let mut rel = self.relations.lock().unwrap();
        let id = Uuid::new_v4();
        rel.permissions.push(PermissionRow {
            id,
            organization_id: org,
            action,
            object_type,
            applies_to_all,
        });
        rel.objects.push(ObjectRecord {
            id,
            object_type: ObjectType::Permissions,
            organization_id: org,
        });
        id
    }

    pub fn new_object(&self, org: Uuid, object_type: ObjectType) -> Uuid {
        let mut rel = self.relations.lock().unwrap();
        let id = Uuid::new_v4();
        rel.objects.push(ObjectRecord {
            id,
            object_type,
            organization_id: org,
        });
        id
    }

    pub fn assign_role(&self, user_id: Uuid, role_id: Uuid) {
        let mut rel = self.relations.lock().unwrap();
        rel.user_roles.push((user_id, role_id));
    }

    pub fn grant(&self, role_id: Uuid, permission_id: Uuid) {
        let mut rel = self.relations.lock().unwrap();
        rel.role_permissions.push((role_id, permission_id));
    }

    pub fn map_object(&self, permission_id: Uuid, object_id: Uuid) {
        let mut rel = self.relations.lock().unwrap();
        rel.permission_objects.push((permission_id, object_id));
    }

    pub fn objects_of_type(&self, org: Uuid, object_type: ObjectType) -> Vec<Uuid> {
        let rel = self.relations.lock().unwrap();
        rel.objects
            .iter()
            .filter(|o| o.organization_id == org && o.object_type == object_type)
            .map(|o| o.id)
            .collect()
    }
}

/// One user in one organization with a single role carrying a single
/// permission, the smallest useful scenario.
pub struct UserRoles {
    pub org: Uuid,
    pub user_id: Uuid,
    pub auth0_id: String,
    pub role_id: Uuid,
    pub permission_id: Uuid,
}

pub fn make_user_roles(
    store: &MemoryAuthzStore,
    action: Action,
    object_type: ObjectType,
    applies_to_all: bool,
) -> UserRoles {
    let org = store.new_organization();
    let (user_id, auth0_id) = store.new_user(org);
    let role_id = store.new_role(org);
    store.assign_role(user_id, role_id);
    let permission_id = store.new_permission(org, action, object_type, applies_to_all);
    store.grant(role_id, permission_id);
    UserRoles {
        org,
        user_id,
        auth0_id,
        role_id,
        permission_id,
    }
}

/// A fuller scenario: a user with two roles, one granting read on two
/// specific observations, the other granting create and read over all
/// forecasts; plus a site and unrelated objects in the same organization.
pub struct TestPermissions {
    pub user_id: Uuid,
    pub auth0_id: String,
    pub roles: [Uuid; 2],
    pub observations: [Uuid; 2],
    pub forecasts: [Uuid; 1],
    pub sites: [Uuid; 1],
}

pub fn make_test_permissions(store: &MemoryAuthzStore, org: Uuid) -> TestPermissions {
    let (user_id, auth0_id) = store.new_user(org);

    let role0 = store.new_role(org);
    let perm0 = store.new_permission(org, Action::Read, ObjectType::Observations, false);
    let obs0 = store.new_object(org, ObjectType::Observations);
    let obs1 = store.new_object(org, ObjectType::Observations);
    store.map_object(perm0, obs0);
    store.map_object(perm0, obs1);

    let role1 = store.new_role(org);
    let perm1 = store.new_permission(org, Action::Create, ObjectType::Forecasts, true);
    let perm2 = store.new_permission(org, Action::Read, ObjectType::Forecasts, true);

    store.assign_role(user_id, role0);
    store.assign_role(user_id, role1);
    store.grant(role0, perm0);
    store.grant(role1, perm1);
    store.grant(role1, perm2);

    let forecast = store.new_object(org, ObjectType::Forecasts);
    let site = store.new_object(org, ObjectType::Sites);

    TestPermissions {
        user_id,
        auth0_id,
        roles: [role0, role1],
        observations: [obs0, obs1],
        forecasts: [forecast],
        sites: [site],
    }
}
