//! User provisioning handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{NewUser, User, UserRole, MSG_MISSING_FIELDS};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// User provisioning request.
///
/// All four fields are required; unknown fields are rejected.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    #[validate(
        required(message = "Missing required fields"),
        length(min = 1, message = "Missing required fields")
    )]
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    #[validate(
        required(message = "Missing required fields"),
        length(min = 1, message = "Missing required fields")
    )]
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    #[validate(
        required(message = "Missing required fields"),
        length(min = 1, message = "Missing required fields")
    )]
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    /// An empty string counts as missing
    #[validate(required(message = "Missing required fields"))]
    #[serde(default, deserialize_with = "blank_role_as_none")]
    pub role: Option<UserRole>,
}

fn blank_role_as_none<'de, D>(deserializer: D) -> Result<Option<UserRole>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(role) if role.is_empty() => Ok(None),
        Some(role) => role.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = AppError;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        match (req.email, req.first_name, req.last_name, req.role) {
            (Some(email), Some(first_name), Some(last_name), Some(role)) => {
                Ok(NewUser::new(email, first_name, last_name, role)?)
            }
            _ => Err(AppError::validation(MSG_MISSING_FIELDS)),
        }
    }
}

/// Response body for a provisioned user
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateUserResponse {
    pub user: User,
}

/// Response body for a deletion
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteUserResponse {
    pub success: bool,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user).delete(delete_user_without_id))
        .route("/:id", delete(delete_user))
}

/// List every user profile
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All user profiles in storage order", body = Vec<User>),
        (status = 500, description = "Profile store error")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.provisioning.list_users().await?;
    Ok(Json(users))
}

/// Provision a user in the identity provider and the profile store
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User provisioned", body = CreateUserResponse),
        (status = 400, description = "Missing fields or duplicate email"),
        (status = 500, description = "Identity creation or profile store failure")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<CreateUserResponse>)> {
    let new_user = NewUser::try_from(req)?;
    let user = state.provisioning.create_user(new_user).await?;
    Ok((StatusCode::CREATED, Json(CreateUserResponse { user })))
}

/// Remove a user from the identity provider, then from the profile store
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponse),
        (status = 400, description = "Missing ID or identity provider error"),
        (status = 500, description = "Unexpected failure")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteUserResponse>> {
    state.provisioning.delete_user(&id).await?;
    Ok(Json(DeleteUserResponse { success: true }))
}

/// `DELETE /users` with no id segment
async fn delete_user_without_id(
    State(state): State<AppState>,
) -> AppResult<Json<DeleteUserResponse>> {
    state.provisioning.delete_user("").await?;
    Ok(Json(DeleteUserResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: Option<UserRole>) -> CreateUserRequest {
        CreateUserRequest {
            email: Some("a@x.com".to_string()),
            first_name: Some("A".to_string()),
            last_name: Some("B".to_string()),
            role,
        }
    }

    #[test]
    fn complete_request_validates() {
        let req = request(Some(UserRole::Agent));
        assert!(req.validate().is_ok());

        let new_user = NewUser::try_from(req).unwrap();
        assert_eq!(new_user.role, UserRole::Agent);
    }

    #[test]
    fn missing_role_fails_validation() {
        let req = request(None);
        assert!(req.validate().is_err());
        assert!(NewUser::try_from(req).is_err());
    }

    #[test]
    fn empty_name_fails_validation() {
        let mut req = request(Some(UserRole::Viewer));
        req.first_name = Some(String::new());
        assert!(req.validate().is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let body = r#"{"email":"a@x.com","first_name":"A","last_name":"B","role":"agent","admin":true}"#;
        assert!(serde_json::from_str::<CreateUserRequest>(body).is_err());
    }

    #[test]
    fn blank_or_null_role_counts_as_missing() {
        for body in [
            r#"{"email":"a@x.com","first_name":"A","last_name":"B","role":""}"#,
            r#"{"email":"a@x.com","first_name":"A","last_name":"B","role":null}"#,
        ] {
            let req: CreateUserRequest = serde_json::from_str(body).unwrap();
            assert!(req.role.is_none());
            assert!(req.validate().is_err());
        }
    }

    #[test]
    fn role_is_parsed_from_lowercase_name() {
        let body = r#"{"email":"a@x.com","first_name":"A","last_name":"B","role":"finance"}"#;
        let req: CreateUserRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.role, Some(UserRole::Finance));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let body = r#"{"email":"a@x.com","first_name":"A","last_name":"B","role":"owner"}"#;
        assert!(serde_json::from_str::<CreateUserRequest>(body).is_err());
    }
}
