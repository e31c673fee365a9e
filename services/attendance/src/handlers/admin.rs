use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use chapel_auth_types::session::Session;
use chapel_domain::department::parse_department_list;
use chapel_domain::role::{Position, Role};

use crate::domain::types::Profile;
use crate::error::AttendanceServiceError;
use crate::handlers::extract::JsonBody;
use crate::handlers::auth::SignupRequest;
use crate::state::AppState;
use crate::usecase::access::AccessRule;
use crate::usecase::admin::{
    DeleteProfileUseCase, ListProfilesUseCase, SetApprovalUseCase, UpdateProfileInput,
    UpdateProfileUseCase,
};
use crate::usecase::signup::SignupUseCase;

// ── GET /admin/profiles ──────────────────────────────────────────────────────

pub async fn list_profiles(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<Profile>>, AttendanceServiceError> {
    state
        .access_guard()
        .require(session.account_id, &AccessRule::Admin)
        .await?;
    let usecase = ListProfilesUseCase {
        profiles: state.profile_repo(),
    };
    Ok(Json(usecase.execute().await?))
}

// ── PATCH /admin/profiles/{id} ───────────────────────────────────────────────

/// Departments arrive as a list or as the comma-separated text of the admin form.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum DepartmentsField {
    List(Vec<String>),
    Text(String),
}

impl DepartmentsField {
    fn into_list(self) -> Vec<String> {
        match self {
            Self::List(list) => list,
            Self::Text(text) => parse_department_list(&text),
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub position: Option<Position>,
    pub role: Option<Role>,
    pub departments: Option<DepartmentsField>,
}

pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    JsonBody(body): JsonBody<UpdateProfileRequest>,
) -> Result<Json<Profile>, AttendanceServiceError> {
    state
        .access_guard()
        .require(session.account_id, &AccessRule::Admin)
        .await?;
    let usecase = UpdateProfileUseCase {
        profiles: state.profile_repo(),
    };
    let profile = usecase
        .execute(
            id,
            UpdateProfileInput {
                full_name: body.full_name,
                email: body.email,
                position: body.position,
                role: body.role,
                departments: body.departments.map(DepartmentsField::into_list),
            },
        )
        .await?;
    Ok(Json(profile))
}

// ── PUT /admin/profiles/{id}/approval ────────────────────────────────────────

#[derive(Deserialize)]
pub struct ApprovalRequest {
    pub approved: bool,
}

pub async fn set_approval(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    JsonBody(body): JsonBody<ApprovalRequest>,
) -> Result<Json<Profile>, AttendanceServiceError> {
    state
        .access_guard()
        .require(session.account_id, &AccessRule::Admin)
        .await?;
    let usecase = SetApprovalUseCase {
        profiles: state.profile_repo(),
    };
    Ok(Json(usecase.execute(id, body.approved).await?))
}

// ── DELETE /admin/profiles/{id} ──────────────────────────────────────────────

pub async fn delete_profile(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AttendanceServiceError> {
    state
        .access_guard()
        .require(session.account_id, &AccessRule::Admin)
        .await?;
    let usecase = DeleteProfileUseCase {
        profiles: state.profile_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /admin/accounts ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateAccountRequest {
    #[serde(flatten)]
    pub signup: SignupRequest,
    #[serde(default)]
    pub role: Role,
}

pub async fn create_account(
    State(state): State<AppState>,
    session: Session,
    JsonBody(body): JsonBody<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Profile>), AttendanceServiceError> {
    state
        .access_guard()
        .require(session.account_id, &AccessRule::Admin)
        .await?;
    let usecase = SignupUseCase {
        accounts: state.account_repo(),
        profiles: state.profile_repo(),
        hasher: state.password_hasher(),
    };
    let profile = usecase.execute(body.signup.into_input(body.role)).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}
