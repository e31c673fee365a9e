use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use chapel_auth_types::session::Session;

use crate::domain::types::Profile;
use crate::error::AttendanceServiceError;
use crate::handlers::extract::JsonBody;
use crate::state::AppState;
use crate::usecase::profile::{
    EnsureProfileUseCase, GetProfileUseCase, UpdateOwnProfileInput, UpdateOwnProfileUseCase,
};

#[derive(Serialize)]
pub struct ProfileEnvelope {
    pub profile: Profile,
}

// ── POST /profiles/ensure ────────────────────────────────────────────────────

pub async fn ensure_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<(StatusCode, Json<ProfileEnvelope>), AttendanceServiceError> {
    let usecase = EnsureProfileUseCase {
        accounts: state.account_repo(),
        profiles: state.profile_repo(),
    };
    let out = usecase.execute(session.account_id).await?;
    let status = if out.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(ProfileEnvelope {
            profile: out.profile,
        }),
    ))
}

// ── GET /profiles/@me ────────────────────────────────────────────────────────

pub async fn get_me(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Profile>, AttendanceServiceError> {
    let usecase = GetProfileUseCase {
        profiles: state.profile_repo(),
    };
    Ok(Json(usecase.execute(session.account_id).await?))
}

// ── PATCH /profiles/@me ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

pub async fn update_me(
    State(state): State<AppState>,
    session: Session,
    JsonBody(body): JsonBody<UpdateMeRequest>,
) -> Result<Json<Profile>, AttendanceServiceError> {
    let usecase = UpdateOwnProfileUseCase {
        profiles: state.profile_repo(),
    };
    let profile = usecase
        .execute(
            session.account_id,
            UpdateOwnProfileInput {
                full_name: body.full_name,
                email: body.email,
            },
        )
        .await?;
    Ok(Json(profile))
}
