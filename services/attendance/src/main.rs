use sea_orm::Database;
use tracing::{info, warn};

use chapel_attendance::config::AttendanceConfig;
use chapel_attendance::router::build_router;
use chapel_attendance::state::{AppState, utc_offset};
use chapel_attendance::usecase::signup::SignupUseCase;
use chapel_auth_types::cookie::CookieSettings;
use chapel_core::config::Config;
use chapel_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AttendanceConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let state = AppState {
        db,
        redis,
        jwt_secret: config.jwt_secret,
        cookie: CookieSettings {
            domain: config.cookie_domain,
            secure: config.cookie_secure,
        },
        utc_offset: utc_offset(config.church_utc_offset_hours),
    };

    if let (Some(username), Some(password)) = (
        config.bootstrap_admin_username.as_deref(),
        config.bootstrap_admin_password.as_deref(),
    ) {
        let usecase = SignupUseCase {
            accounts: state.account_repo(),
            profiles: state.profile_repo(),
            hasher: state.password_hasher(),
        };
        match usecase.bootstrap_admin(username, password).await {
            Ok(true) => info!(username, "bootstrap admin provisioned"),
            Ok(false) => info!(username, "bootstrap admin already present"),
            Err(e) => warn!(error = %e, "bootstrap admin provisioning failed"),
        }
    }

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("chapel attendance service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
