use axum::{Json, extract::State};

use chapel_auth_types::session::Session;

use crate::error::AttendanceServiceError;
use crate::state::AppState;
use crate::usecase::access::AccessRule;
use crate::usecase::admin::{Overview, OverviewUseCase};
use crate::usecase::stats::{SundayCount, SundayStatsUseCase};

// ── GET /admin/overview ──────────────────────────────────────────────────────

pub async fn get_overview(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Overview>, AttendanceServiceError> {
    state
        .access_guard()
        .require(session.account_id, &AccessRule::StaffOrAdmin)
        .await?;
    let usecase = OverviewUseCase {
        profiles: state.profile_repo(),
        attendance: state.attendance_repo(),
    };
    Ok(Json(usecase.execute(state.today()).await?))
}

// ── GET /admin/stats/sundays ─────────────────────────────────────────────────

pub async fn get_sunday_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<SundayCount>>, AttendanceServiceError> {
    state
        .access_guard()
        .require(session.account_id, &AccessRule::StaffOrAdmin)
        .await?;
    let usecase = SundayStatsUseCase {
        attendance: state.attendance_repo(),
    };
    Ok(Json(usecase.execute(state.today()).await))
}
