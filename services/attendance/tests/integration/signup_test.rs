use chapel_attendance::error::{AttendanceServiceError, ValidationError};
use chapel_attendance::usecase::signup::{SignupInput, SignupUseCase};
use chapel_domain::role::Role;

use crate::helpers::{MockAccountRepo, MockHasher, MockProfileRepo};

fn usecase(
    accounts: &MockAccountRepo,
    profiles: &MockProfileRepo,
) -> SignupUseCase<MockAccountRepo, MockProfileRepo, MockHasher> {
    SignupUseCase {
        accounts: accounts.clone(),
        profiles: profiles.clone(),
        hasher: MockHasher,
    }
}

fn form(username: &str, email: Option<&str>) -> SignupInput {
    SignupInput {
        name: "홍길동".to_owned(),
        username: username.to_owned(),
        email: email.map(str::to_owned),
        password: "secret1".to_owned(),
        password_confirm: Some("secret1".to_owned()),
        role: Role::User,
    }
}

#[tokio::test]
async fn should_register_with_placeholder_address() {
    let accounts = MockAccountRepo::default();
    let profiles = MockProfileRepo::default();

    let profile = usecase(&accounts, &profiles)
        .execute(form("Hong", None))
        .await
        .unwrap();

    let stored = accounts.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].email, "hong@example.com");
    assert_eq!(stored[0].password_hash, "hashed:secret1");
    assert_eq!(profile.id, stored[0].id);
    assert_eq!(profile.username.as_deref(), Some("hong"));
    assert_eq!(profile.full_name.as_deref(), Some("홍길동"));
    assert_eq!(profile.email, None);
    assert!(!profile.approved);
}

#[tokio::test]
async fn should_sign_in_with_real_email_when_given() {
    let accounts = MockAccountRepo::default();
    let profiles = MockProfileRepo::default();

    let profile = usecase(&accounts, &profiles)
        .execute(form("hong", Some(" hong@church.kr ")))
        .await
        .unwrap();

    assert_eq!(accounts.all()[0].email, "hong@church.kr");
    assert_eq!(profile.email.as_deref(), Some("hong@church.kr"));
}

#[tokio::test]
async fn should_approve_admin_signup() {
    let accounts = MockAccountRepo::default();
    let profiles = MockProfileRepo::default();
    let input = SignupInput {
        role: Role::Admin,
        ..form("root", None)
    };

    let profile = usecase(&accounts, &profiles).execute(input).await.unwrap();
    assert_eq!(profile.role, Role::Admin);
    assert!(profile.approved);
}

#[tokio::test]
async fn should_reject_taken_username() {
    let accounts = MockAccountRepo::default();
    let profiles = MockProfileRepo::default();
    let uc = usecase(&accounts, &profiles);

    uc.execute(form("hong", Some("hong@church.kr"))).await.unwrap();
    let err = uc.execute(form("HONG", None)).await.unwrap_err();

    assert!(matches!(err, AttendanceServiceError::AlreadyRegistered));
    assert_eq!(err.localized().message, "이미 등록된 사용자입니다. 로그인을 시도해주세요.");
    assert_eq!(accounts.all().len(), 1);
}

#[tokio::test]
async fn should_reject_taken_email() {
    let accounts = MockAccountRepo::default();
    let profiles = MockProfileRepo::default();
    let uc = usecase(&accounts, &profiles);

    uc.execute(form("hong", Some("shared@church.kr"))).await.unwrap();
    let err = uc
        .execute(form("kim", Some("shared@church.kr")))
        .await
        .unwrap_err();

    assert!(matches!(err, AttendanceServiceError::AlreadyRegistered));
    assert_eq!(profiles.all().len(), 1);
}

#[tokio::test]
async fn should_validate_before_touching_store() {
    let accounts = MockAccountRepo::default();
    let profiles = MockProfileRepo::broken();
    let input = SignupInput {
        password_confirm: Some("other".to_owned()),
        ..form("hong", None)
    };

    let err = usecase(&accounts, &profiles)
        .execute(input)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AttendanceServiceError::Validation(ValidationError::PasswordMismatch)
    ));
    assert!(accounts.all().is_empty());
}

#[tokio::test]
async fn should_bootstrap_admin_once() {
    let accounts = MockAccountRepo::default();
    let profiles = MockProfileRepo::default();
    let uc = usecase(&accounts, &profiles);

    assert!(uc.bootstrap_admin("Root", "rootpass").await.unwrap());
    assert!(!uc.bootstrap_admin("root", "rootpass").await.unwrap());

    let all = profiles.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].role, Role::Admin);
    assert!(all[0].approved);
    assert_eq!(accounts.all()[0].email, "root@example.com");
}

#[tokio::test]
async fn should_not_claim_another_users_placeholder_address() {
    let accounts = MockAccountRepo::default();
    let profiles = MockProfileRepo::default();
    let uc = usecase(&accounts, &profiles);

    let err = uc
        .execute(form("alice", Some("bob@example.com")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AttendanceServiceError::Validation(ValidationError::ReservedEmail)
    ));
    assert!(accounts.all().is_empty());

    uc.execute(form("bob", None)).await.unwrap();
    assert_eq!(accounts.all()[0].email, "bob@example.com");
}
