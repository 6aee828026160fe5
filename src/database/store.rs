//! Postgres implementation of the authorization store.
//!
//! Identifier columns hold the packed 16-byte form (see [`crate::ident`]);
//! every query binds and decodes through that codec. The RBAC relations are
//! plain tables: `users`, `roles`, `permissions`, `user_role_mapping`,
//! `role_permission_mapping`, `permission_object_mapping`, plus one table
//! per data object type.

use async_trait::async_trait;
use sqlx::Row;
use std::collections::{HashMap, HashSet};
use tracing::warn;
use uuid::Uuid;

use crate::authz::{
    Action, AuthzError, AuthzStore, GrantedPermission, ObjectRecord, ObjectType, PolicySnapshot,
    UserRecord,
};
use crate::ident;

use super::manager::Database;

/// One `SELECT` over every table that stores addressable objects, so a bare
/// id resolves to its type and owning organization in a single round-trip.
const FIND_OBJECT_SQL: &str = "\
    SELECT id, organization_id, object_type FROM ( \
        SELECT id, organization_id, 'forecasts' AS object_type FROM forecasts \
        UNION ALL SELECT id, organization_id, 'observations' FROM observations \
        UNION ALL SELECT id, organization_id, 'sites' FROM sites \
        UNION ALL SELECT id, organization_id, 'aggregates' FROM aggregates \
        UNION ALL SELECT id, organization_id, 'users' FROM users \
        UNION ALL SELECT id, organization_id, 'roles' FROM roles \
        UNION ALL SELECT id, organization_id, 'permissions' FROM permissions \
    ) objects WHERE id = $1";

#[async_trait]
impl AuthzStore for Database {
    async fn load_snapshot(&self, auth0_id: &str) -> Result<Option<PolicySnapshot>, AuthzError> {
        let row = sqlx::query("SELECT id, auth0_id, organization_id FROM users WHERE auth0_id = $1")
            .bind(auth0_id)
            .fetch_optional(self.pool())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user = UserRecord {
            id: ident::bin_to_uuid(&row.get::<Vec<u8>, _>("id"))?,
            auth0_id: row.get("auth0_id"),
            organization_id: ident::bin_to_uuid(&row.get::<Vec<u8>, _>("organization_id"))?,
        };

        let perm_rows = sqlx::query(
            "SELECT DISTINCT p.id, p.organization_id, p.action, p.object_type, p.applies_to_all \
             FROM permissions p \
             JOIN role_permission_mapping rpm ON rpm.permission_id = p.id \
             JOIN user_role_mapping urm ON urm.role_id = rpm.role_id \
             WHERE urm.user_id = $1",
        )
        .bind(ident::uuid_to_bin(&user.id).to_vec())
        .fetch_all(self.pool())
        .await?;

        let mut permissions = Vec::with_capacity(perm_rows.len());
        for row in perm_rows {
            let id = ident::bin_to_uuid(&row.get::<Vec<u8>, _>("id"))?;
            let action: String = row.get("action");
            let object_type: String = row.get("object_type");
            // The platform schema carries more action and type words than the
            // evaluator's enums (value-level grants, report types). Those can
            // never match a query here, so skip them rather than fail the load.
            let (action, object_type) = match (action.parse::<Action>(), object_type.parse::<ObjectType>()) {
                (Ok(action), Ok(object_type)) => (action, object_type),
                _ => {
                    warn!(permission = %id, "skipping permission outside the evaluator's enums");
                    continue;
                }
            };
            permissions.push(GrantedPermission {
                id,
                organization_id: ident::bin_to_uuid(&row.get::<Vec<u8>, _>("organization_id"))?,
                action,
                object_type,
                applies_to_all: row.get("applies_to_all"),
                object_ids: HashSet::new(),
            });
        }

        let explicit: Vec<Vec<u8>> = permissions
            .iter()
            .filter(|perm| !perm.applies_to_all)
            .map(|perm| ident::uuid_to_bin(&perm.id).to_vec())
            .collect();

        if !explicit.is_empty() {
            let mapping_rows = sqlx::query(
                "SELECT permission_id, object_id FROM permission_object_mapping \
                 WHERE permission_id = ANY($1)",
            )
            .bind(explicit)
            .fetch_all(self.pool())
            .await?;

            let mut object_sets: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
            for row in mapping_rows {
                let permission_id = ident::bin_to_uuid(&row.get::<Vec<u8>, _>("permission_id"))?;
                let object_id = ident::bin_to_uuid(&row.get::<Vec<u8>, _>("object_id"))?;
                object_sets.entry(permission_id).or_default().insert(object_id);
            }
            for perm in &mut permissions {
                if let Some(ids) = object_sets.remove(&perm.id) {
                    perm.object_ids = ids;
                }
            }
        }

        Ok(Some(PolicySnapshot { user, permissions }))
    }

    async fn find_object(&self, object_id: Uuid) -> Result<Option<ObjectRecord>, AuthzError> {
        let row = sqlx::query(FIND_OBJECT_SQL)
            .bind(ident::uuid_to_bin(&object_id).to_vec())
            .fetch_optional(self.pool())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let object_type: String = row.get("object_type");
        let Ok(object_type) = object_type.parse::<ObjectType>() else {
            warn!(%object_id, "object resolved to a type outside the evaluator's enums");
            return Ok(None);
        };

        Ok(Some(ObjectRecord {
            id: ident::bin_to_uuid(&row.get::<Vec<u8>, _>("id"))?,
            object_type,
            organization_id: ident::bin_to_uuid(&row.get::<Vec<u8>, _>("organization_id"))?,
        }))
    }

    async fn list_objects(
        &self,
        organization_id: Uuid,
        object_type: ObjectType,
    ) -> Result<Vec<ObjectRecord>, AuthzError> {
        // Mapping rows are not standalone objects; there is nothing to list.
        let Some(table) = object_type.table() else {
            return Ok(Vec::new());
        };

        let sql = format!("SELECT id FROM {} WHERE organization_id = $1", table);
        let rows = sqlx::query(&sql)
            .bind(ident::uuid_to_bin(&organization_id).to_vec())
            .fetch_all(self.pool())
            .await?;

        rows.into_iter()
            .map(|row| {
                Ok(ObjectRecord {
                    id: ident::bin_to_uuid(&row.get::<Vec<u8>, _>("id"))?,
                    object_type,
                    organization_id,
                })
            })
            .collect()
    }
}
