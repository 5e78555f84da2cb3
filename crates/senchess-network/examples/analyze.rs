//! 체스판 이미지 분석 예시.
//!
//! 실행: `cargo run -p senchess-network --example analyze -- <이미지 경로>`
//!
//! `SENCHESS_API_URL` / `SENCHESS_API_KEY` 환경변수로 서버를 지정한다.

use std::path::Path;

use senchess_core::config::ClientConfig;
use senchess_core::ports::recognizer::ChessRecognizer;
use senchess_network::HttpChessRecognizer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "senchess_network=debug".into()),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or("사용법: analyze <이미지 경로>")?;

    let config = ClientConfig::from_env();
    let client = HttpChessRecognizer::new(&config)?;

    let health = client.check_health().await;
    println!(
        "헬스체크: {} (model_loaded={})",
        health.status, health.model_loaded
    );
    if !health.is_healthy() {
        println!("경고: 서비스가 준비되지 않음 — 분석을 계속 시도합니다");
    }

    let analysis = client
        .analyze_file(Path::new(&path), config.default_conf_threshold)
        .await?;

    println!("FEN: {}", analysis.fen);
    println!("설명: {}", analysis.description);
    println!("신뢰도: {}", analysis.confidence);
    println!("감지된 기물: {}", analysis.detected_pieces);
    for warning in &analysis.warnings {
        println!("경고: {warning}");
    }

    Ok(())
}
