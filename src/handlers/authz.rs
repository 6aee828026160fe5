// Authorization query endpoints. Each one answers for the authenticated
// subject; denials are ordinary `false`/empty responses, never errors.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::authz::{self, Action, ObjectType};
use crate::database::Database;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// GET /api/authz/can/:object_id/:action
///
/// Whether the authenticated user may perform `action` on the object.
pub async fn can(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path((object_id, action)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let action: Action = action.parse().map_err(ApiError::bad_request)?;
    let allowed = authz::can_user_perform_action(&db, &user.auth0_id, &object_id, action).await?;
    Ok(Json(json!({ "allowed": allowed })))
}

/// GET /api/authz/can-create/:object_type
pub async fn can_create(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(object_type): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let object_type: ObjectType = object_type.parse().map_err(ApiError::bad_request)?;
    let allowed = authz::user_can_create(&db, &user.auth0_id, object_type).await?;
    Ok(Json(json!({ "allowed": allowed })))
}

/// GET /api/authz/readable/:object_type
///
/// The ids of every object of the type the authenticated user may read.
/// Sorted for stable payloads; the set itself carries no ordering contract.
pub async fn readable(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(object_type): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let object_type: ObjectType = object_type.parse().map_err(ApiError::bad_request)?;
    let ids = authz::list_objects_user_can_read(&db, &user.auth0_id, object_type).await?;

    let mut object_ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    object_ids.sort();

    Ok(Json(json!({ "object_ids": object_ids })))
}
