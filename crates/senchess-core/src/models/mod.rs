//! Senchess 도메인 모델.
//!
//! 원격 인식 API와 주고받는 와이어 구조체와 호출자에게 반환하는
//! 정규화된 결과 구조체를 정의한다. 모든 모델은 `serde`를 구현한다.

pub mod analysis;
pub mod health;
pub mod prediction;
