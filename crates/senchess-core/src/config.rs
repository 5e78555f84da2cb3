//! 클라이언트 설정 구조체.
//!
//! 서버 base URL, API 키, 타임아웃, 기본 신뢰도 임계값을 정의한다.
//! 프로세스 시작 시 한 번 구성되어 이후 불변으로 사용된다 —
//! 호출 지점에 흩어진 전역 조회는 두지 않는다.

use serde::{Deserialize, Serialize};

/// Senchess API 클라이언트 설정
///
/// `from_env()`로 환경변수에서 로드하거나 필드를 직접 채워 생성한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL (예: `https://senchess.example.com`)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer 토큰 — 빈 문자열이면 Authorization 헤더 생략
    #[serde(default)]
    pub api_key: String,
    /// `/predict` 요청 타임아웃 (밀리초)
    ///
    /// `/health`와 이미지 URL 다운로드는 의도적으로 타임아웃이 없다.
    /// 어댑터 crate의 문서 참조.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// 기본 신뢰도 임계값 (0.0 ~ 1.0)
    #[serde(default = "default_conf_threshold")]
    pub default_conf_threshold: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_ms: default_timeout_ms(),
            default_conf_threshold: default_conf_threshold(),
        }
    }
}

impl ClientConfig {
    /// 환경변수에서 설정 로드
    ///
    /// - `SENCHESS_API_URL` → `base_url`
    /// - `SENCHESS_API_KEY` → `api_key`
    ///
    /// 미설정 항목은 기본값을 사용한다.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("SENCHESS_API_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        if let Ok(key) = std::env::var("SENCHESS_API_KEY") {
            config.api_key = key;
        }
        config
    }

    /// base URL 교체 (빌더 스타일)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// API 키 교체 (빌더 스타일)
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// 타임아웃 교체 (빌더 스타일)
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_conf_threshold() -> f64 {
    0.25
}
