use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chapel_auth_types::cookie::{clear_session_cookie, set_session_cookie};
use chapel_auth_types::session::Session;
use chapel_domain::role::Role;

use crate::domain::types::Profile;
use crate::error::{AttendanceServiceError, ValidationError};
use crate::handlers::extract::JsonBody;
use crate::state::AppState;
use crate::usecase::access::AccessRule;
use crate::usecase::login::{LoginInput, LoginUseCase};
use crate::usecase::signup::{SignupInput, SignupUseCase};

// ── POST /auth/signup ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    pub email: Option<String>,
    #[serde(default)]
    pub password: String,
    pub password_confirm: Option<String>,
}

impl SignupRequest {
    pub(crate) fn into_input(self, role: Role) -> SignupInput {
        SignupInput {
            name: self.name,
            username: self.username,
            email: self.email,
            password: self.password,
            password_confirm: self.password_confirm,
            role,
        }
    }
}

pub async fn signup(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<Profile>), AttendanceServiceError> {
    let usecase = SignupUseCase {
        accounts: state.account_repo(),
        profiles: state.profile_repo(),
        hasher: state.password_hasher(),
    };
    let profile = usecase.execute(body.into_input(Role::User)).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

// ── POST /auth/token ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTokenRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct CreateTokenResponse {
    pub account_id: Uuid,
    pub profile: Profile,
}

pub async fn create_token(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(body): JsonBody<CreateTokenRequest>,
) -> Result<impl IntoResponse, AttendanceServiceError> {
    let usecase = LoginUseCase {
        accounts: state.account_repo(),
        profiles: state.profile_repo(),
        hasher: state.password_hasher(),
        throttle: state.login_throttle(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;

    let jar = set_session_cookie(jar, out.session_token, &state.cookie);
    let body = CreateTokenResponse {
        account_id: out.account_id,
        profile: out.profile,
    };
    Ok((StatusCode::CREATED, jar, Json(body)))
}

// ── GET /auth/token ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CheckTokenResponse {
    pub account_id: Uuid,
    #[serde(serialize_with = "chapel_core::serde::unix_to_rfc3339")]
    pub expires_at: u64,
}

pub async fn check_token(session: Session) -> Json<CheckTokenResponse> {
    Json(CheckTokenResponse {
        account_id: session.account_id,
        expires_at: session.expires_at,
    })
}

// ── DELETE /auth/token ───────────────────────────────────────────────────────

pub async fn revoke_token(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = clear_session_cookie(jar, &state.cookie);
    (StatusCode::NO_CONTENT, jar)
}

// ── GET /auth/access ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleParam {
    Authenticated,
    Staff,
    Admin,
    Department,
}

#[derive(Deserialize)]
pub struct AccessQuery {
    pub rule: RuleParam,
    pub department: Option<String>,
}

impl AccessQuery {
    fn into_rule(self) -> Result<AccessRule, ValidationError> {
        Ok(match self.rule {
            RuleParam::Authenticated => AccessRule::Authenticated,
            RuleParam::Staff => AccessRule::StaffOrAdmin,
            RuleParam::Admin => AccessRule::Admin,
            RuleParam::Department => {
                let department = self
                    .department
                    .map(|d| d.trim().to_owned())
                    .filter(|d| !d.is_empty())
                    .ok_or(ValidationError::MissingDepartment)?;
                AccessRule::Department(department)
            }
        })
    }
}

pub async fn check_access(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AccessQuery>,
) -> Result<impl IntoResponse, AttendanceServiceError> {
    let rule = query.into_rule()?;
    let access = state
        .access_guard()
        .evaluate(session.account_id, &rule)
        .await?;
    Ok(Json(access))
}
