//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::health_handler::{HealthResponse, ServiceHealth, ServiceStatus};
use crate::handlers::user_handler::{CreateUserRequest, CreateUserResponse, DeleteUserResponse};
use domain::{User, UserRole, UserStatus};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::delete_user,
        crate::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            User,
            UserRole,
            UserStatus,
            CreateUserRequest,
            CreateUserResponse,
            DeleteUserResponse,
            HealthResponse,
            ServiceStatus,
            ServiceHealth,
        )
    ),
    tags(
        (name = "Users", description = "User provisioning endpoints"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;
