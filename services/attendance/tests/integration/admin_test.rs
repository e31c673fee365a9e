use uuid::Uuid;

use chapel_attendance::error::{AttendanceServiceError, ValidationError};
use chapel_attendance::usecase::admin::{
    DeleteProfileUseCase, ListProfilesUseCase, Overview, OverviewUseCase, SetApprovalUseCase,
    UpdateProfileInput, UpdateProfileUseCase,
};
use chapel_domain::role::{Position, Role};
use chapel_domain::service::ServiceType;

use crate::helpers::{MockAttendanceRepo, MockProfileRepo, Row, date, profile, slot};

#[tokio::test]
async fn should_list_profiles_by_name_with_unnamed_last() {
    let mut unnamed = profile(Uuid::now_v7(), "zzz", Role::User, false);
    unnamed.full_name = None;
    let repo = MockProfileRepo::new(vec![
        unnamed.clone(),
        profile(Uuid::now_v7(), "park", Role::User, true),
        profile(Uuid::now_v7(), "hong", Role::Staff, true),
    ]);

    let listed = ListProfilesUseCase { profiles: repo }.execute().await.unwrap();
    let names: Vec<_> = listed.iter().map(|p| p.full_name.clone()).collect();
    assert_eq!(
        names,
        vec![Some("HONG".to_owned()), Some("PARK".to_owned()), None]
    );
}

#[tokio::test]
async fn should_approve_when_promoted_to_admin() {
    let p = profile(Uuid::now_v7(), "hong", Role::User, false);
    let repo = MockProfileRepo::new(vec![p.clone()]);
    let uc = UpdateProfileUseCase {
        profiles: repo.clone(),
    };

    let updated = uc
        .execute(
            p.id,
            UpdateProfileInput {
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.role, Role::Admin);
    assert!(updated.approved);
    assert_eq!(repo.get(p.id).unwrap(), updated);
}

#[tokio::test]
async fn should_normalize_assigned_departments() {
    let p = profile(Uuid::now_v7(), "kim", Role::Staff, false);
    let repo = MockProfileRepo::new(vec![p.clone()]);
    let uc = UpdateProfileUseCase {
        profiles: repo.clone(),
    };

    let updated = uc
        .execute(
            p.id,
            UpdateProfileInput {
                position: Some(Position::Deacon),
                departments: Some(vec![
                    " 청년부 ".to_owned(),
                    String::new(),
                    "유년부".to_owned(),
                    "청년부".to_owned(),
                ]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.departments, vec!["청년부", "유년부"]);
    assert_eq!(updated.position, Position::Deacon);
    assert_eq!(updated.role, Role::Staff);
}

#[tokio::test]
async fn should_clear_blank_name_and_email() {
    let mut p = profile(Uuid::now_v7(), "hong", Role::User, true);
    p.email = Some("hong@church.kr".to_owned());
    let repo = MockProfileRepo::new(vec![p.clone()]);

    let updated = UpdateProfileUseCase { profiles: repo }
        .execute(
            p.id,
            UpdateProfileInput {
                full_name: Some("  홍길동 ".to_owned()),
                email: Some("  ".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.full_name.as_deref(), Some("홍길동"));
    assert_eq!(updated.email, None);
}

#[tokio::test]
async fn should_reject_empty_update() {
    let p = profile(Uuid::now_v7(), "hong", Role::User, true);
    let uc = UpdateProfileUseCase {
        profiles: MockProfileRepo::new(vec![p.clone()]),
    };

    let err = uc
        .execute(p.id, UpdateProfileInput::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AttendanceServiceError::Validation(ValidationError::MissingData)
    ));
}

#[tokio::test]
async fn should_report_missing_profile_on_update() {
    let uc = UpdateProfileUseCase {
        profiles: MockProfileRepo::default(),
    };
    let err = uc
        .execute(
            Uuid::now_v7(),
            UpdateProfileInput {
                role: Some(Role::Staff),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AttendanceServiceError::ProfileNotFound));
}

#[tokio::test]
async fn should_toggle_approval() {
    let p = profile(Uuid::now_v7(), "hong", Role::User, false);
    let repo = MockProfileRepo::new(vec![p.clone()]);
    let uc = SetApprovalUseCase {
        profiles: repo.clone(),
    };

    assert!(uc.execute(p.id, true).await.unwrap().approved);
    assert!(repo.get(p.id).unwrap().approved);
    assert!(!uc.execute(p.id, false).await.unwrap().approved);
    assert!(!repo.get(p.id).unwrap().approved);
}

#[tokio::test]
async fn should_keep_admin_approved() {
    let p = profile(Uuid::now_v7(), "root", Role::Admin, true);
    let repo = MockProfileRepo::new(vec![p.clone()]);

    let stored = SetApprovalUseCase {
        profiles: repo.clone(),
    }
    .execute(p.id, false)
    .await
    .unwrap();

    assert!(stored.approved);
    assert!(repo.get(p.id).unwrap().approved);
}

#[tokio::test]
async fn should_delete_profile_once() {
    let p = profile(Uuid::now_v7(), "hong", Role::User, true);
    let repo = MockProfileRepo::new(vec![p.clone()]);
    let uc = DeleteProfileUseCase {
        profiles: repo.clone(),
    };

    uc.execute(p.id).await.unwrap();
    assert!(repo.all().is_empty());

    let err = uc.execute(p.id).await.unwrap_err();
    assert!(matches!(err, AttendanceServiceError::ProfileNotFound));
}

#[tokio::test]
async fn should_count_overview() {
    let today = date(2026, 10, 18);
    let yesterday = date(2026, 10, 17);
    let profiles = MockProfileRepo::new(vec![
        profile(Uuid::now_v7(), "hong", Role::User, true),
        profile(Uuid::now_v7(), "kim", Role::Staff, true),
    ]);
    let rows = vec![
        Row {
            member_id: Uuid::now_v7(),
            slot: slot(today, ServiceType::SundayFirst, "청년부"),
        },
        Row {
            member_id: Uuid::now_v7(),
            slot: slot(today, ServiceType::SundaySecond, "청년부"),
        },
        Row {
            member_id: Uuid::now_v7(),
            slot: slot(yesterday, ServiceType::Wednesday, "장년부"),
        },
    ];
    let uc = OverviewUseCase {
        profiles,
        attendance: MockAttendanceRepo::new(rows),
    };

    assert_eq!(
        uc.execute(today).await.unwrap(),
        Overview {
            total_profiles: 2,
            total_attendance: 3,
            today_attendance: 2,
        }
    );
}
