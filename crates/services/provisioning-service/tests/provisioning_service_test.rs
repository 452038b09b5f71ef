//! Provisioning workflow unit tests.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use common::AppError;
use domain::{NewProfile, NewUser, User, UserRole, UserStatus};
use identity_service_lib::{CreatePrincipal, IdentityError, MockIdentityProvider, Principal};
use profile_service_lib::MockProfileRepository;
use provisioning_service_lib::{OrphanPolicy, Provisioner, ProvisioningService};

fn new_user() -> NewUser {
    NewUser {
        email: "a@x.com".to_string(),
        first_name: "A".to_string(),
        last_name: "B".to_string(),
        role: UserRole::Agent,
    }
}

fn stored_user(profile: NewProfile) -> User {
    User {
        id: profile.id,
        email: profile.email,
        first_name: profile.first_name,
        last_name: profile.last_name,
        role: profile.role,
        status: profile.status,
        created_at: Utc::now(),
    }
}

fn provisioner(
    identity: MockIdentityProvider,
    profiles: MockProfileRepository,
    policy: OrphanPolicy,
) -> Provisioner {
    Provisioner::new(Arc::new(identity), Arc::new(profiles), policy)
}

#[tokio::test]
async fn test_create_user_success_shares_principal_id() {
    let principal_id = Uuid::new_v4();

    let mut identity = MockIdentityProvider::new();
    identity
        .expect_create_principal()
        .withf(|req: &CreatePrincipal| {
            req.email == "a@x.com"
                && req.email_confirmed
                && req.metadata.first_name == "A"
                && req.metadata.last_name == "B"
                && req.metadata.role == UserRole::Agent
                && !req.password.is_empty()
        })
        .times(1)
        .returning(move |req| {
            Ok(Principal {
                id: principal_id,
                email: req.email,
            })
        });

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_email()
        .withf(|email: &str| email == "a@x.com")
        .times(1)
        .returning(|_| Ok(None));
    profiles
        .expect_insert()
        .withf(move |p: &NewProfile| p.id == principal_id && p.status == UserStatus::Active)
        .times(1)
        .returning(|p| Ok(stored_user(p)));

    let service = provisioner(identity, profiles, OrphanPolicy::Preserve);
    let user = service.create_user(new_user()).await.unwrap();

    assert_eq!(user.id, principal_id);
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.role, UserRole::Agent);
    assert_eq!(user.status, UserStatus::Active);
}

#[tokio::test]
async fn test_create_user_duplicate_email_skips_identity() {
    let mut identity = MockIdentityProvider::new();
    identity.expect_create_principal().times(0);

    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_by_email().times(1).returning(|email| {
        Ok(Some(User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role: UserRole::Agent,
            status: UserStatus::Active,
            created_at: Utc::now(),
        }))
    });
    profiles.expect_insert().times(0);

    let service = provisioner(identity, profiles, OrphanPolicy::Preserve);
    let err = service.create_user(new_user()).await.unwrap_err();

    assert!(matches!(err, AppError::Duplicate(_)));
    assert_eq!(err.to_string(), "A user with this email already exists");
}

#[tokio::test]
async fn test_create_user_missing_field_has_no_side_effects() {
    let mut identity = MockIdentityProvider::new();
    identity.expect_create_principal().times(0);

    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_by_email().times(0);
    profiles.expect_insert().times(0);

    let service = provisioner(identity, profiles, OrphanPolicy::Preserve);

    let mut incomplete = new_user();
    incomplete.last_name = String::new();
    let err = service.create_user(incomplete).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(err.to_string(), "Missing required fields");
}

#[tokio::test]
async fn test_create_user_lookup_failure_aborts() {
    let mut identity = MockIdentityProvider::new();
    identity.expect_create_principal().times(0);

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_email()
        .returning(|_| Err(AppError::internal("store unreachable")));

    let service = provisioner(identity, profiles, OrphanPolicy::Preserve);
    let err = service.create_user(new_user()).await.unwrap_err();

    assert!(matches!(err, AppError::Internal(_)));
}

#[tokio::test]
async fn test_create_user_identity_failure_writes_no_profile() {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_create_principal()
        .times(1)
        .returning(|_| Err(IdentityError::rejected(422, "Password should be stronger")));

    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_by_email().returning(|_| Ok(None));
    profiles.expect_insert().times(0);

    let service = provisioner(identity, profiles, OrphanPolicy::Preserve);
    let err = service.create_user(new_user()).await.unwrap_err();

    assert!(matches!(err, AppError::IdentityCreation(_)));
    assert_eq!(err.status().as_u16(), 500);
    assert!(err.to_string().contains("Password should be stronger"));
}

#[tokio::test]
async fn test_create_user_insert_failure_preserves_orphan() {
    let principal_id = Uuid::new_v4();

    let mut identity = MockIdentityProvider::new();
    identity.expect_create_principal().returning(move |req| {
        Ok(Principal {
            id: principal_id,
            email: req.email,
        })
    });
    identity.expect_delete_principal().times(0);

    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_by_email().returning(|_| Ok(None));
    profiles
        .expect_insert()
        .returning(|_| Err(AppError::StoreConflict("duplicate key".to_string())));

    let service = provisioner(identity, profiles, OrphanPolicy::Preserve);
    let err = service.create_user(new_user()).await.unwrap_err();

    assert!(matches!(err, AppError::StoreConflict(_)));
}

#[tokio::test]
async fn test_create_user_insert_failure_compensates_when_enabled() {
    let principal_id = Uuid::new_v4();

    let mut identity = MockIdentityProvider::new();
    identity.expect_create_principal().returning(move |req| {
        Ok(Principal {
            id: principal_id,
            email: req.email,
        })
    });
    identity
        .expect_delete_principal()
        .with(eq(principal_id))
        .times(1)
        .returning(|_| Ok(()));

    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_by_email().returning(|_| Ok(None));
    profiles
        .expect_insert()
        .returning(|_| Err(AppError::internal("insert failed")));

    let service = provisioner(identity, profiles, OrphanPolicy::Compensate);
    let err = service.create_user(new_user()).await.unwrap_err();

    // The insert error is still what the caller sees
    assert!(matches!(err, AppError::Internal(_)));
}

#[tokio::test]
async fn test_create_user_failed_compensation_still_reports_insert_error() {
    let mut identity = MockIdentityProvider::new();
    identity.expect_create_principal().returning(|req| {
        Ok(Principal {
            id: Uuid::new_v4(),
            email: req.email,
        })
    });
    identity
        .expect_delete_principal()
        .times(1)
        .returning(|_| Err(IdentityError::rejected(500, "unavailable")));

    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_by_email().returning(|_| Ok(None));
    profiles
        .expect_insert()
        .returning(|_| Err(AppError::StoreConflict("duplicate key".to_string())));

    let service = provisioner(identity, profiles, OrphanPolicy::Compensate);
    let err = service.create_user(new_user()).await.unwrap_err();

    assert!(matches!(err, AppError::StoreConflict(_)));
}

#[tokio::test]
async fn test_delete_user_success_runs_identity_then_profile() {
    let user_id = Uuid::new_v4();
    let mut seq = mockall::Sequence::new();

    let mut identity = MockIdentityProvider::new();
    identity
        .expect_delete_principal()
        .with(eq(user_id))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_delete()
        .with(eq(user_id))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let service = provisioner(identity, profiles, OrphanPolicy::Preserve);
    service.delete_user(&user_id.to_string()).await.unwrap();
}

#[tokio::test]
async fn test_delete_user_identity_failure_leaves_profile() {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_delete_principal()
        .times(1)
        .returning(|_| Err(IdentityError::rejected(404, "User not found")));

    let mut profiles = MockProfileRepository::new();
    profiles.expect_delete().times(0);

    let service = provisioner(identity, profiles, OrphanPolicy::Preserve);
    let err = service
        .delete_user(&Uuid::new_v4().to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::IdentityProvider(_)));
    assert_eq!(err.status().as_u16(), 400);
    assert_eq!(err.to_string(), "User not found");
}

#[tokio::test]
async fn test_delete_user_profile_failure_is_reported() {
    let mut identity = MockIdentityProvider::new();
    identity.expect_delete_principal().returning(|_| Ok(()));

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_delete()
        .times(1)
        .returning(|_| Err(AppError::internal("store unreachable")));

    let service = provisioner(identity, profiles, OrphanPolicy::Compensate);
    let err = service
        .delete_user(&Uuid::new_v4().to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Internal(_)));
}

#[tokio::test]
async fn test_delete_user_empty_id() {
    let mut identity = MockIdentityProvider::new();
    identity.expect_delete_principal().times(0);
    let mut profiles = MockProfileRepository::new();
    profiles.expect_delete().times(0);

    let service = provisioner(identity, profiles, OrphanPolicy::Preserve);
    let err = service.delete_user("  ").await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(err.to_string(), "Missing user ID");
}

#[tokio::test]
async fn test_delete_user_malformed_id() {
    let mut identity = MockIdentityProvider::new();
    identity.expect_delete_principal().times(0);

    let service = provisioner(identity, MockProfileRepository::new(), OrphanPolicy::Preserve);
    let err = service.delete_user("not-a-uuid").await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_list_users_passes_through() {
    let mut profiles = MockProfileRepository::new();
    profiles.expect_list().times(1).returning(|| {
        Ok(vec![stored_user(NewProfile::for_principal(Uuid::new_v4(), new_user()))])
    });

    let service = provisioner(MockIdentityProvider::new(), profiles, OrphanPolicy::Preserve);
    let users = service.list_users().await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "a@x.com");
}
