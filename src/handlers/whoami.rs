use axum::{
    extract::{Extension, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::authz::AuthzStore;
use crate::database::Database;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// GET /api/auth/whoami
///
/// The verified token subject, plus the stored identity when the subject
/// maps to a user. A valid token for a subject we have never stored is
/// reported rather than rejected; such users are simply denied everywhere.
pub async fn whoami(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let snapshot = db.load_snapshot(&user.auth0_id).await?;

    let body = match snapshot {
        Some(snapshot) => json!({
            "sub": user.auth0_id,
            "registered": true,
            "user_id": snapshot.user.id,
            "organization_id": snapshot.user.organization_id,
            "permission_count": snapshot.permissions.len(),
        }),
        None => json!({
            "sub": user.auth0_id,
            "registered": false,
        }),
    };

    Ok(Json(body))
}
