//! `/health` 엔드포인트 모델.
//!
//! 헬스체크 실패는 에러가 아니라 데이터다. 모든 실패 모드는
//! [`HealthStatus`]의 `error`/`offline` 상태로 정규화된다.

use serde::{Deserialize, Serialize};

/// `/health` 성공 응답 원본 형식
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

/// 호출자에게 반환되는 정규화된 헬스 상태
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// 상태 문자열 ("healthy", "error", "offline" 등)
    pub status: String,
    /// 서버 측 모델 로드 여부
    pub model_loaded: bool,
    /// 상태 설명 메시지
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    /// 서버가 비정상 상태 코드를 반환한 경우
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            model_loaded: false,
            message: Some(message.into()),
        }
    }

    /// 서버에 연결 자체가 불가능한 경우
    pub fn offline(message: impl Into<String>) -> Self {
        Self {
            status: "offline".to_string(),
            model_loaded: false,
            message: Some(message.into()),
        }
    }

    /// 정상 응답을 정규화 — `healthy` 상태에만 긍정 메시지를 붙인다
    pub fn from_response(resp: HealthResponse) -> Self {
        let message = if resp.status == "healthy" {
            Some("API 정상 동작".to_string())
        } else {
            Some("모델 미로드".to_string())
        };
        Self {
            status: resp.status,
            model_loaded: resp.model_loaded,
            message,
        }
    }

    /// 서비스가 요청을 처리할 준비가 되었는지 여부
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy" && self.model_loaded
    }
}
