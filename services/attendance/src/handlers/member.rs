use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use chapel_auth_types::session::Session;

use crate::domain::types::Member;
use crate::error::AttendanceServiceError;
use crate::handlers::extract::JsonBody;
use crate::state::AppState;
use crate::usecase::access::AccessRule;
use crate::usecase::member::{
    CreateMemberInput, CreateMemberUseCase, DeleteMemberUseCase, ListMembersUseCase,
};

// ── GET /members ─────────────────────────────────────────────────────────────

pub async fn list_members(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<Member>>, AttendanceServiceError> {
    state
        .access_guard()
        .require(session.account_id, &AccessRule::StaffOrAdmin)
        .await?;
    let usecase = ListMembersUseCase {
        members: state.member_repo(),
    };
    Ok(Json(usecase.execute(None).await?))
}

// ── GET /departments/{department}/members ────────────────────────────────────

pub async fn list_department_members(
    State(state): State<AppState>,
    session: Session,
    Path(department): Path<String>,
) -> Result<Json<Vec<Member>>, AttendanceServiceError> {
    state
        .access_guard()
        .require(session.account_id, &AccessRule::Department(department.clone()))
        .await?;
    let usecase = ListMembersUseCase {
        members: state.member_repo(),
    };
    Ok(Json(usecase.execute(Some(&department)).await?))
}

// ── POST /members ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateMemberRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department: String,
}

pub async fn create_member(
    State(state): State<AppState>,
    session: Session,
    JsonBody(body): JsonBody<CreateMemberRequest>,
) -> Result<(StatusCode, Json<Member>), AttendanceServiceError> {
    state
        .access_guard()
        .require(session.account_id, &AccessRule::Admin)
        .await?;
    let usecase = CreateMemberUseCase {
        members: state.member_repo(),
    };
    let member = usecase
        .execute(CreateMemberInput {
            name: body.name,
            department: body.department,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(member)))
}

// ── DELETE /members/{id} ─────────────────────────────────────────────────────

pub async fn delete_member(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AttendanceServiceError> {
    state
        .access_guard()
        .require(session.account_id, &AccessRule::Admin)
        .await?;
    let usecase = DeleteMemberUseCase {
        members: state.member_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
