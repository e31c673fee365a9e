use uuid::Uuid;

use chapel_attendance::error::{AttendanceServiceError, ValidationError};
use chapel_attendance::usecase::member::{
    CreateMemberInput, CreateMemberUseCase, DeleteMemberUseCase, ListMembersUseCase,
};

use crate::helpers::{MockMemberRepo, member};

#[tokio::test]
async fn should_list_by_department_sorted_by_name() {
    let repo = MockMemberRepo::new(vec![
        member("최영희", "청년부"),
        member("김철수", "청년부"),
        member("박민수", "장년부"),
    ]);
    let uc = ListMembersUseCase { members: repo };

    let youth: Vec<_> = uc
        .execute(Some("청년부"))
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(youth, vec!["김철수", "최영희"]);
    assert_eq!(uc.execute(None).await.unwrap().len(), 3);
    assert!(uc.execute(Some("유년부")).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_create_trimmed_member() {
    let repo = MockMemberRepo::default();
    let uc = CreateMemberUseCase {
        members: repo.clone(),
    };

    let created = uc
        .execute(CreateMemberInput {
            name: " 김철수 ".to_owned(),
            department: "청년부 ".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(created.name, "김철수");
    assert_eq!(created.department, "청년부");
    assert_eq!(repo.members.lock().unwrap().as_slice(), &[created]);
}

#[tokio::test]
async fn should_require_name_then_department() {
    let uc = CreateMemberUseCase {
        members: MockMemberRepo::default(),
    };

    let err = uc
        .execute(CreateMemberInput {
            name: " ".to_owned(),
            department: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AttendanceServiceError::Validation(ValidationError::MissingMemberName)
    ));

    let err = uc
        .execute(CreateMemberInput {
            name: "김철수".to_owned(),
            department: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AttendanceServiceError::Validation(ValidationError::MissingDepartment)
    ));
}

#[tokio::test]
async fn should_delete_member_once() {
    let m = member("김철수", "청년부");
    let repo = MockMemberRepo::new(vec![m.clone()]);
    let uc = DeleteMemberUseCase {
        members: repo.clone(),
    };

    uc.execute(m.id).await.unwrap();
    assert!(repo.members.lock().unwrap().is_empty());
    assert!(matches!(
        uc.execute(m.id).await.unwrap_err(),
        AttendanceServiceError::MemberNotFound
    ));
    assert!(matches!(
        uc.execute(Uuid::now_v7()).await.unwrap_err(),
        AttendanceServiceError::MemberNotFound
    ));
}
