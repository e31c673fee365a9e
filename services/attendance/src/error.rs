use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header::RETRY_AFTER};
use axum::response::{IntoResponse, Response};

use chapel_core::i18n::{Translation, translate};

/// Shown when a non-staff account signs in before an admin approves it.
pub const PENDING_APPROVAL_MESSAGE: &str = "⏳ 관리자 승인 대기 중입니다.\n\n회원가입이 완료되었지만 아직 관리자의 승인을 받지 못했습니다.\n관리자가 승인하면 로그인할 수 있습니다.\n\n승인까지 시간이 걸릴 수 있으니 잠시만 기다려주세요.";

/// Request fields rejected before any store access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("date is required")]
    MissingDate,
    #[error("date must be YYYY-MM-DD")]
    InvalidDate,
    #[error("service type is required")]
    MissingServiceType,
    #[error("unknown service type")]
    UnknownServiceType,
    #[error("department is required")]
    MissingDepartment,
    #[error("member id list is required")]
    MissingMemberIds,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("password is required")]
    MissingPassword,
    #[error("name is required")]
    MissingName,
    #[error("username is required")]
    MissingUsername,
    #[error("username may only contain letters, digits, '_' and '-'")]
    InvalidUsername,
    #[error("email domain is reserved for accounts without an email")]
    ReservedEmail,
    #[error("member name is required")]
    MissingMemberName,
    #[error("nothing to update")]
    MissingData,
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingDate => "MISSING_DATE",
            Self::InvalidDate => "INVALID_DATE",
            Self::MissingServiceType => "MISSING_SERVICE_TYPE",
            Self::UnknownServiceType => "UNKNOWN_SERVICE_TYPE",
            Self::MissingDepartment => "MISSING_DEPARTMENT",
            Self::MissingMemberIds => "MISSING_MEMBER_IDS",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::MissingPassword => "MISSING_PASSWORD",
            Self::MissingName => "MISSING_NAME",
            Self::MissingUsername => "MISSING_USERNAME",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::ReservedEmail => "RESERVED_EMAIL",
            Self::MissingMemberName => "MISSING_MEMBER_NAME",
            Self::MissingData => "MISSING_DATA",
        }
    }

    /// User-facing Korean text.
    pub fn localized(&self) -> &'static str {
        match self {
            Self::MissingDate => "날짜가 필요합니다.",
            Self::InvalidDate => "날짜 형식이 올바르지 않습니다.",
            Self::MissingServiceType => "예배 종류가 필요합니다.",
            Self::UnknownServiceType => "알 수 없는 예배 종류입니다.",
            Self::MissingDepartment => "부서가 필요합니다.",
            Self::MissingMemberIds => "출석 대상이 필요합니다.",
            Self::PasswordMismatch => "비밀번호가 일치하지 않습니다.",
            Self::PasswordTooShort => "비밀번호는 최소 6자 이상이어야 합니다.",
            Self::MissingPassword => "비밀번호를 입력해주세요.",
            Self::MissingName => "이름을 입력해주세요.",
            Self::MissingUsername => "아이디를 입력해주세요.",
            Self::InvalidUsername => {
                "아이디는 영문, 숫자, 언더스코어(_), 하이픈(-)만 사용할 수 있습니다."
            }
            Self::ReservedEmail => "사용할 수 없는 이메일 주소입니다.",
            Self::MissingMemberName => "교인 이름을 입력해주세요.",
            Self::MissingData => "변경할 항목이 없습니다.",
        }
    }
}

/// Attendance service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceServiceError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("forbidden")]
    Forbidden,
    #[error("pending approval")]
    PendingApproval,
    #[error("invalid login credentials")]
    InvalidCredentials,
    #[error("for security purposes, you can only request this after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error("profile not found")]
    ProfileNotFound,
    #[error("member not found")]
    MemberNotFound,
    #[error("user already registered")]
    AlreadyRegistered,
    #[error("failed to check profile")]
    ProfileCheckFailed(#[source] anyhow::Error),
    /// Store failures keep the full context chain so the driver message reaches the caller.
    #[error("{0:#}")]
    Store(#[from] anyhow::Error),
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl AttendanceServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::Validation(e) => e.kind(),
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::MemberNotFound => "MEMBER_NOT_FOUND",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::ProfileCheckFailed(_) => "PROFILE_CHECK_FAILED",
            Self::Store(_) => "STORE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::PendingApproval => StatusCode::FORBIDDEN,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Validation(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::ProfileNotFound | Self::MemberNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyRegistered => StatusCode::CONFLICT,
            Self::ProfileCheckFailed(_) | Self::Store(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Korean text for the caller, plus the cooldown for throttled attempts.
    pub fn localized(&self) -> Translation {
        let fixed = |message: &str| Translation {
            message: message.to_owned(),
            retry_after_secs: None,
        };
        match self {
            Self::Unauthenticated => fixed("로그인이 필요합니다."),
            Self::Forbidden => fixed("접근 권한이 없습니다."),
            Self::PendingApproval => fixed(PENDING_APPROVAL_MESSAGE),
            Self::Validation(e) => fixed(e.localized()),
            Self::InvalidBody(_) => fixed("요청 형식이 올바르지 않습니다."),
            Self::ProfileNotFound => fixed("프로필을 찾을 수 없습니다."),
            Self::MemberNotFound => fixed("교인을 찾을 수 없습니다."),
            Self::ProfileCheckFailed(_) => fixed("프로필을 확인하는 중 오류가 발생했습니다."),
            Self::Internal(_) => fixed("서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요."),
            Self::InvalidCredentials
            | Self::RateLimited { .. }
            | Self::AlreadyRegistered
            | Self::Store(_) => translate(&self.to_string()),
        }
    }

    /// Log server-side failures. 4xx are expected and left to the trace layer.
    pub(crate) fn log(&self) {
        match self {
            Self::Store(e) => tracing::error!(error = %format!("{e:#}"), kind = "STORE", "store error"),
            Self::Internal(e) => tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error"),
            Self::ProfileCheckFailed(e) => {
                tracing::error!(error = %format!("{e:#}"), kind = "PROFILE_CHECK_FAILED", "profile check failed")
            }
            _ => {}
        }
    }
}

impl IntoResponse for AttendanceServiceError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        let localized = self.localized();
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
            "localized": localized.message,
        });
        if let Self::RateLimited { retry_after_secs } = self {
            body["retry_after_secs"] = retry_after_secs.into();
            let mut response = (status, axum::Json(body)).into_response();
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after_secs));
            return response;
        }
        (status, axum::Json(body)).into_response()
    }
}
