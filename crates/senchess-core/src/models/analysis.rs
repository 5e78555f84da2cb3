//! 정규화된 분석 결과 모델.
//!
//! 원본 [`RawPrediction`]에서 호출자에게 필요한 핵심만 투영한다.
//! 기물별 상세(바운딩 박스 등)는 의도적으로 제외된다.

use serde::{Deserialize, Serialize};

use crate::models::prediction::RawPrediction;

/// 신뢰도 버킷 — 연속 점수를 3단계로 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// 점수 → 버킷 매핑. 두 호출 경로가 공유하는 유일한 분류 함수.
    ///
    /// 경계값은 strict greater-than: 정확히 0.9는 `Medium`,
    /// 정확히 0.7은 `Low`로 떨어진다.
    pub fn from_score(confidence: f64) -> Self {
        if confidence > 0.9 {
            ConfidenceLevel::High
        } else if confidence > 0.7 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "high"),
            ConfidenceLevel::Medium => write!(f, "medium"),
            ConfidenceLevel::Low => write!(f, "low"),
        }
    }
}

/// 호출자에게 반환되는 정규화된 포지션 분석 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionAnalysis {
    /// 인식된 FEN 문자열
    pub fen: String,
    /// 포지션 설명 텍스트
    pub description: String,
    /// 신뢰도 버킷
    pub confidence: ConfidenceLevel,
    /// 감지된 기물 수
    pub detected_pieces: u32,
    /// 경고 목록 — 원본에 없으면 빈 목록 (null/생략 불가)
    pub warnings: Vec<String>,
}

impl From<RawPrediction> for PositionAnalysis {
    /// [`RawPrediction`] → 정규화 결과. 전체 함수 — 어떤 필드 조합도
    /// 실패를 일으키지 않는다.
    fn from(raw: RawPrediction) -> Self {
        Self {
            fen: raw.fen,
            description: raw.description,
            confidence: ConfidenceLevel::from_score(raw.confidence),
            detected_pieces: raw.detected_pieces,
            warnings: raw.warnings,
        }
    }
}
