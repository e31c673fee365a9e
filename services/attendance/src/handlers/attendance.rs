use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use chapel_auth_types::session::Session;

use crate::error::AttendanceServiceError;
use crate::state::AppState;
use crate::usecase::access::AccessRule;
use crate::usecase::attendance::{
    LoadAttendanceUseCase, SaveAttendanceUseCase, SlotInput, validate_save,
};

// ── GET /attendance ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SlotQuery {
    pub date: Option<String>,
    pub service_type: Option<String>,
    pub department: Option<String>,
}

pub async fn get_attendance(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Vec<Uuid>>, AttendanceServiceError> {
    let slot = SlotInput {
        date: query.date,
        service_type: query.service_type,
        department: query.department,
    }
    .parse()?;
    state
        .access_guard()
        .require(
            session.account_id,
            &AccessRule::Department(slot.department.clone()),
        )
        .await?;
    let usecase = LoadAttendanceUseCase {
        attendance: state.attendance_repo(),
    };
    Ok(Json(usecase.execute(&slot).await?))
}

// ── POST /attendance/save ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SaveAttendanceRequest {
    pub date: Option<String>,
    #[serde(rename = "memberIds", alias = "member_ids")]
    pub member_ids: Option<Vec<Uuid>>,
    pub service_type: Option<String>,
    pub department: Option<String>,
}

/// `{success: true}`, or `{success: false, error, kind}` with the error's status.
pub struct SaveOutcome(Result<(), AttendanceServiceError>);

impl IntoResponse for SaveOutcome {
    fn into_response(self) -> Response {
        match self.0 {
            Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "success": true }))).into_response(),
            Err(e) => {
                e.log();
                let body = serde_json::json!({
                    "success": false,
                    "error": e.localized().message,
                    "kind": e.kind(),
                });
                (e.status(), Json(body)).into_response()
            }
        }
    }
}

pub async fn save_attendance(
    State(state): State<AppState>,
    session: Result<Session, StatusCode>,
    body: Result<Json<SaveAttendanceRequest>, JsonRejection>,
) -> SaveOutcome {
    SaveOutcome(save(&state, session, body).await)
}

/// Validation first, then authentication, then department access.
async fn save(
    state: &AppState,
    session: Result<Session, StatusCode>,
    body: Result<Json<SaveAttendanceRequest>, JsonRejection>,
) -> Result<(), AttendanceServiceError> {
    let Json(body) = body?;
    let save = validate_save(
        &SlotInput {
            date: body.date,
            service_type: body.service_type,
            department: body.department,
        },
        body.member_ids,
    )?;

    let session = session.map_err(|_| AttendanceServiceError::Unauthenticated)?;
    state
        .access_guard()
        .require(
            session.account_id,
            &AccessRule::Department(save.slot.department.clone()),
        )
        .await?;

    let usecase = SaveAttendanceUseCase {
        attendance: state.attendance_repo(),
    };
    usecase.execute(&save).await
}
