use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower::ServiceBuilder;

use chapel_core::health::healthz;
use chapel_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    admin::{create_account, delete_profile, list_profiles, set_approval, update_profile},
    attendance::{get_attendance, save_attendance},
    auth::{check_access, check_token, create_token, revoke_token, signup},
    health::readyz,
    member::{create_member, delete_member, list_department_members, list_members},
    profile::{ensure_profile, get_me, update_me},
    stats::{get_overview, get_sunday_stats},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/signup", post(signup))
        .route("/auth/token", get(check_token))
        .route("/auth/token", post(create_token))
        .route("/auth/token", delete(revoke_token))
        .route("/auth/access", get(check_access))
        // Profiles
        .route("/profiles/ensure", post(ensure_profile))
        .route("/profiles/@me", get(get_me))
        .route("/profiles/@me", patch(update_me))
        // Admin
        .route("/admin/profiles", get(list_profiles))
        .route("/admin/profiles/{id}", patch(update_profile))
        .route("/admin/profiles/{id}", delete(delete_profile))
        .route("/admin/profiles/{id}/approval", put(set_approval))
        .route("/admin/accounts", post(create_account))
        .route("/admin/overview", get(get_overview))
        .route("/admin/stats/sundays", get(get_sunday_stats))
        // Members
        .route("/members", get(list_members))
        .route("/members", post(create_member))
        .route("/members/{id}", delete(delete_member))
        .route("/departments/{department}/members", get(list_department_members))
        // Attendance
        .route("/attendance", get(get_attendance))
        .route("/attendance/save", post(save_attendance))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
