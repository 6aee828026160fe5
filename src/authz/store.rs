use async_trait::async_trait;
use uuid::Uuid;

use super::error::AuthzError;
use super::relations::{ObjectRecord, PolicySnapshot};
use super::types::ObjectType;

/// Read-only access to the authorization relations.
///
/// Each method is a single read-only round-trip; isolation against concurrent
/// grant/revoke writes is the storage layer's responsibility. Implementations
/// must propagate storage failures as [`AuthzError::StorageUnavailable`] so
/// callers fail closed.
#[async_trait]
pub trait AuthzStore: Send + Sync {
    /// Load the user identified by the external subject together with the
    /// union of permissions reachable through their roles. `None` when no
    /// such user is stored.
    async fn load_snapshot(&self, auth0_id: &str) -> Result<Option<PolicySnapshot>, AuthzError>;

    /// Resolve an object id to its type and owning organization, across
    /// every object table. `None` when no object carries the id.
    async fn find_object(&self, object_id: Uuid) -> Result<Option<ObjectRecord>, AuthzError>;

    /// Every object of the given type owned by the organization.
    async fn list_objects(
        &self,
        organization_id: Uuid,
        object_type: ObjectType,
    ) -> Result<Vec<ObjectRecord>, AuthzError>;
}
