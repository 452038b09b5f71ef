//! User profile entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{User, UserRole, UserStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Identity provider principal id
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// Rows written outside this service may carry values the domain does not
/// know; those fall back to the least privileged role and an inactive status.
impl From<Model> for User {
    fn from(model: Model) -> Self {
        let role = model.role.parse().unwrap_or_else(|_| {
            tracing::warn!(user_id = %model.id, role = %model.role, "Unknown role in profile store");
            UserRole::Viewer
        });
        let status = model.status.parse().unwrap_or_else(|_| {
            tracing::warn!(user_id = %model.id, status = %model.status, "Unknown status in profile store");
            UserStatus::Inactive
        });

        User {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            role,
            status,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(role: &str, status: &str) -> Model {
        Model {
            id: Uuid::new_v4(),
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            role: role.to_string(),
            status: status.to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn converts_known_values() {
        let user = User::from(model("finance", "active"));
        assert_eq!(user.role, UserRole::Finance);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.first_name, "Jane");
    }

    #[test]
    fn unknown_values_fall_back() {
        let user = User::from(model("superuser", "suspended"));
        assert_eq!(user.role, UserRole::Viewer);
        assert_eq!(user.status, UserStatus::Inactive);
    }
}
