//! # senchess-network
//!
//! Senchess 체스 인식 API의 HTTP 어댑터.
//! `senchess-core`의 `ChessRecognizer` 포트를 reqwest로 구현한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use senchess_core::config::ClientConfig;
//! use senchess_core::ports::recognizer::{ChessRecognizer, ImageSource};
//! use senchess_network::HttpChessRecognizer;
//!
//! let client = HttpChessRecognizer::new(&ClientConfig::from_env())?;
//! let analysis = client
//!     .analyze_image(ImageSource::Url("https://example.com/board.jpg".into()), 0.25)
//!     .await?;
//! println!("FEN: {}", analysis.fen);
//! ```

pub mod recognizer_client;

pub use recognizer_client::HttpChessRecognizer;
