//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어. 네트워크 어댑터 crate가
//! 이 trait을 구현하며, 호출 측에서 `Arc<dyn ChessRecognizer>`로 주입한다.
//!
//! 모든 async trait은 `async_trait` 매크로를 사용하여
//! object safety를 보장한다.

pub mod recognizer;
