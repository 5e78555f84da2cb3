//! `/predict` 엔드포인트 와이어 모델.
//!
//! 외부 API가 정의하는 응답 형식을 그대로 옮긴 구조체들.
//! 서버가 필드를 생략할 수 있으므로 모든 필드에 `#[serde(default)]`를 두어
//! JSON 디코딩이 성공하면 이후 변환이 항상 전체 함수가 되도록 보장한다.

use serde::{Deserialize, Serialize};

/// 감지된 기물의 바운딩 박스 (픽셀 좌표)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub x1: f64,
    #[serde(default)]
    pub y1: f64,
    #[serde(default)]
    pub x2: f64,
    #[serde(default)]
    pub y2: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

/// 감지된 기물 하나 — 생성 후 변경되지 않는 순수 데이터
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectedPiece {
    /// 감지 순번 id
    #[serde(default)]
    pub id: i64,
    /// 클래스 라벨 (예: "white-king")
    #[serde(default)]
    pub class: String,
    /// 개별 신뢰도 (0.0 ~ 1.0)
    #[serde(default)]
    pub confidence: f64,
    /// 픽셀 좌표 바운딩 박스
    #[serde(default)]
    pub bbox: BoundingBox,
}

/// 입력 이미지 크기 (픽셀)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ImageSize {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// `/predict` 성공 응답 (2xx) 원본 형식
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPrediction {
    /// 서버 측 성공 플래그
    #[serde(default)]
    pub success: bool,
    /// 인식된 FEN 문자열
    #[serde(default)]
    pub fen: String,
    /// 감지된 기물 목록 (순서 보존)
    #[serde(default)]
    pub pieces: Vec<DetectedPiece>,
    /// 전체 신뢰도 (0.0 ~ 1.0)
    #[serde(default)]
    pub confidence: f64,
    /// 감지된 기물 수
    #[serde(default, rename = "detectedPieces")]
    pub detected_pieces: u32,
    /// 포지션 설명 텍스트
    #[serde(default)]
    pub description: String,
    /// 입력 이미지 크기
    #[serde(default, rename = "imageSize")]
    pub image_size: ImageSize,
    /// 경고 메시지 목록 (생략 시 빈 목록)
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// `/predict` 에러 응답 (비 2xx) 원본 형식 — 두 필드 모두 생략 가능
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
