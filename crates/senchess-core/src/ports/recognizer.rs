//! 체스 인식 포트.
//!
//! 체스판 이미지 → FEN 인식 서비스를 추상화하는 인터페이스.
//! 구현체: `senchess-network`의 `HttpChessRecognizer`.

use std::path::Path;

use async_trait::async_trait;

use crate::error::SenchessError;
use crate::models::analysis::PositionAnalysis;
use crate::models::health::HealthStatus;

/// 분석 입력 이미지 소스
///
/// 파일 입력은 바이트로 읽은 뒤 [`ImageSource::Bytes`]로 전달되므로
/// 동일 바이트 + 동일 임계값이면 두 경로의 동작은 같다.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// 원격 이미지 URL — 어댑터가 먼저 다운로드한다
    Url(String),
    /// 이미 메모리에 있는 이미지 바이트
    Bytes(Vec<u8>),
}

/// 체스판 이미지 인식 서비스 포트
///
/// 각 연산은 공유 가변 상태 없이 독립적으로 await 가능하다.
/// 동시 호출 간 순서 보장은 없다.
#[async_trait]
pub trait ChessRecognizer: Send + Sync {
    /// URL 또는 바이트 이미지를 분석하여 FEN 포지션을 반환
    ///
    /// - `conf_threshold`: 기물 감지 신뢰도 임계값 (0.0 ~ 1.0)
    async fn analyze_image(
        &self,
        source: ImageSource,
        conf_threshold: f64,
    ) -> Result<PositionAnalysis, SenchessError>;

    /// 로컬 파일을 분석 — 바이트를 읽어 [`ChessRecognizer::analyze_image`]로 위임
    async fn analyze_file(
        &self,
        path: &Path,
        conf_threshold: f64,
    ) -> Result<PositionAnalysis, SenchessError>;

    /// base64 인코딩 이미지를 분석 — 디코딩은 서버 측에서 수행된다
    async fn analyze_base64(
        &self,
        image_base64: &str,
        conf_threshold: f64,
    ) -> Result<PositionAnalysis, SenchessError>;

    /// 서비스 헬스체크 — 어떤 실패도 에러로 전파하지 않는다
    ///
    /// 반복/동시 호출에 안전하며 부작용이 없다.
    async fn check_health(&self) -> HealthStatus;
}
