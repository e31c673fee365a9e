//! Korean user-facing text for provider and store error messages.
//!
//! Matching is by lowercase keyword; anything unrecognised is returned unchanged.

/// Localized message plus the cooldown embedded in rate-limit messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub message: String,
    pub retry_after_secs: Option<u64>,
}

impl Translation {
    fn text(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            retry_after_secs: None,
        }
    }
}

/// Extract the first `<digits> second(s)` count, e.g. `31` from "after 31 seconds".
pub fn parse_retry_after(raw: &str) -> Option<u64> {
    let lower = raw.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let digits = &lower[start..i];
        let rest = lower[i..].trim_start();
        if rest.starts_with("second") {
            if let Ok(n) = digits.parse::<u64>() {
                return Some(n);
            }
        }
    }
    None
}

/// Translate a provider/store message into user-facing Korean text.
pub fn translate(raw: &str) -> Translation {
    let lower = raw.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("for security purposes") || has("rate limit") {
        return match parse_retry_after(raw).filter(|n| *n > 0) {
            Some(secs) => Translation {
                message: format!("보안을 위해 {secs}초 후에 다시 시도해주세요. 잠시만 기다려주세요."),
                retry_after_secs: Some(secs),
            },
            None => Translation::text("보안을 위해 잠시 후에 다시 시도해주세요."),
        };
    }
    if has("invalid login credentials") || has("wrong password") {
        return Translation::text("아이디 또는 비밀번호가 올바르지 않습니다.");
    }
    if has("email not confirmed") || has("email confirmation") {
        return Translation::text("이메일 인증이 완료되지 않았습니다. 이메일을 확인해주세요.");
    }
    if has("user not found") {
        return Translation::text("등록되지 않은 아이디입니다.");
    }
    if has("user already registered")
        || has("already exists")
        || has("duplicate key")
        || has("unique constraint")
    {
        return Translation::text("이미 등록된 사용자입니다. 로그인을 시도해주세요.");
    }
    if has("invalid email") || has("email format") {
        return Translation::text("올바른 이메일 형식이 아닙니다.");
    }
    if has("password") && has("weak") {
        return Translation::text("비밀번호가 너무 약합니다. 더 강한 비밀번호를 사용해주세요.");
    }
    if has("password") && has("length") {
        return Translation::text("비밀번호는 최소 6자 이상이어야 합니다.");
    }
    if has("foreign key") || has("constraint") {
        return Translation::text(
            "데이터베이스 제약 조건 오류가 발생했습니다. 관리자에게 문의해주세요.",
        );
    }
    if has("null value") || has("not null") {
        return Translation::text("필수 정보가 누락되었습니다. 모든 필드를 입력해주세요.");
    }
    if has("network") || has("connection") {
        return Translation::text(
            "네트워크 연결 오류가 발생했습니다. 인터넷 연결을 확인하고 다시 시도해주세요.",
        );
    }
    Translation::text(raw)
}
