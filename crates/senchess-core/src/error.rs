//! Senchess 클라이언트 에러 타입.
//!
//! 분석(analyze) 연산의 모든 실패는 이 enum의 변형으로 반환된다.
//! 헬스체크는 실패를 에러로 전파하지 않고 `HealthStatus` 데이터로 변환하므로
//! 이 타입을 사용하지 않는다.

use thiserror::Error;

/// 체스 인식 클라이언트 에러.
///
/// 원본 메시지는 각 변형의 필드에 보존되므로 호출자는 문자열 매칭 없이
/// 변형으로 분기할 수 있다.
#[derive(Debug, Error)]
pub enum SenchessError {
    /// 설정값 오류 (잘못된 base URL, 클라이언트 빌드 실패)
    #[error("설정 에러: {0}")]
    Config(String),

    /// 이미지 URL 다운로드 실패 (비정상 상태 코드 또는 전송 오류)
    #[error("이미지 다운로드 실패: {0}")]
    Download(String),

    /// 인식 요청이 제한 시간을 초과 — 일반 인식 실패와 구분되는 전용 변형
    #[error("인식 요청 타임아웃: {timeout_ms}ms 초과")]
    Timeout {
        /// 초과된 타임아웃 시간 (밀리초)
        timeout_ms: u64,
    },

    /// 인식 엔드포인트가 비정상 상태를 반환 — 서버 제공 메시지를 보존한다
    #[error("체스 인식 실패: {0}")]
    Recognition(String),

    /// 2xx 응답 본문이 문서화된 예측 형식으로 디코딩되지 않음
    #[error("응답 형식 오류: {0}")]
    MalformedResponse(String),

    /// 파일 입력 경로의 I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}
