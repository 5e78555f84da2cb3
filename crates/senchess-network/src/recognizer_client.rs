//! 체스 인식 HTTP 클라이언트.
//!
//! `ChessRecognizer` 포트 구현. 이미지 소스를 multipart 폼으로 조립해
//! `POST {base_url}/predict`를 호출하고, 원본 응답을 정규화된
//! `PositionAnalysis`로 변환한다.
//!
//! 타임아웃 정책은 비대칭이다: `/predict`만 요청 단위 타임아웃이 걸리고,
//! `/health`와 이미지 URL 다운로드는 명시적 제한이 없다. 경계가 필요한
//! 호출자는 자체 제한을 걸어야 한다.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use senchess_core::config::ClientConfig;
use senchess_core::error::SenchessError;
use senchess_core::models::analysis::PositionAnalysis;
use senchess_core::models::health::{HealthResponse, HealthStatus};
use senchess_core::models::prediction::{ApiErrorBody, RawPrediction};
use senchess_core::ports::recognizer::{ChessRecognizer, ImageSource};

/// multipart 바이너리 파트의 고정 필드명 — 서버 계약
const IMAGE_FIELD: &str = "image";
/// multipart 바이너리 파트의 고정 파일명 — 서버 계약
const IMAGE_FILENAME: &str = "chess.jpg";
/// base64 텍스트 파트의 고정 필드명 — 서버 계약
const IMAGE_BASE64_FIELD: &str = "image_base64";
/// 신뢰도 임계값 파트의 고정 필드명 — 서버 계약
const CONF_FIELD: &str = "conf";

/// Senchess API HTTP 클라이언트 — `ChessRecognizer` 포트 구현
///
/// 불변 설정과 `reqwest::Client`만 보유하므로 동시 호출에 안전하다.
pub struct HttpChessRecognizer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl HttpChessRecognizer {
    /// 새 클라이언트 생성
    ///
    /// base URL은 생성 시점에 검증된다. 전역 타임아웃은 걸지 않는다 —
    /// `/predict`에만 요청 단위로 적용한다.
    pub fn new(config: &ClientConfig) -> Result<Self, SenchessError> {
        url::Url::parse(&config.base_url)
            .map_err(|e| SenchessError::Config(format!("잘못된 base URL: {e}")))?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SenchessError::Config(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        debug!(
            base_url = %config.base_url,
            timeout_ms = config.timeout_ms,
            has_api_key = !config.api_key.is_empty(),
            "HttpChessRecognizer 초기화"
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// api_key가 비어 있지 않을 때만 Authorization 헤더 부착
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.api_key)
        }
    }

    /// 이미지 URL 선다운로드 — 타임아웃 없음
    async fn download_image(&self, image_url: &str) -> Result<Vec<u8>, SenchessError> {
        debug!(url = %image_url, "이미지 다운로드");

        let resp = self
            .client
            .get(image_url)
            .send()
            .await
            .map_err(|e| SenchessError::Download(format!("이미지 요청 실패: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(url = %image_url, status = %status, "이미지 다운로드 비정상 응답");
            return Err(SenchessError::Download(format!(
                "이미지 다운로드 불가 (상태 {status})"
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| SenchessError::Download(format!("이미지 본문 읽기 실패: {e}")))?;

        Ok(bytes.to_vec())
    }

    /// 조립된 multipart 폼으로 `/predict` 호출 후 응답 정규화
    ///
    /// 두 분석 경로(바이너리/base64)가 공유하는 유일한 호출 지점.
    async fn send_predict(&self, form: Form) -> Result<PositionAnalysis, SenchessError> {
        let url = format!("{}/predict", self.base_url);
        let timeout_ms = self.timeout.as_millis() as u64;

        let resp = self
            .authorize(self.client.post(&url).multipart(form))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SenchessError::Timeout { timeout_ms }
                } else {
                    SenchessError::Recognition(format!("요청 전송 실패: {e}"))
                }
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            if e.is_timeout() {
                SenchessError::Timeout { timeout_ms }
            } else {
                SenchessError::Recognition(format!("응답 본문 읽기 실패: {e}"))
            }
        })?;

        if !status.is_success() {
            warn!(status = %status, "인식 API 비정상 응답");
            // 에러 본문의 message 우선, 파싱 불가 시 상태 텍스트로 폴백
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("인식 처리 실패")
                        .to_string()
                });
            return Err(SenchessError::Recognition(message));
        }

        let raw: RawPrediction = serde_json::from_str(&body)
            .map_err(|e| SenchessError::MalformedResponse(format!("예측 응답 디코딩 실패: {e}")))?;

        let analysis = PositionAnalysis::from(raw);
        debug!(
            fen = %analysis.fen,
            confidence = %analysis.confidence,
            detected_pieces = analysis.detected_pieces,
            "인식 완료"
        );

        Ok(analysis)
    }
}

#[async_trait]
impl ChessRecognizer for HttpChessRecognizer {
    async fn analyze_image(
        &self,
        source: ImageSource,
        conf_threshold: f64,
    ) -> Result<PositionAnalysis, SenchessError> {
        let bytes = match source {
            ImageSource::Url(image_url) => self.download_image(&image_url).await?,
            ImageSource::Bytes(bytes) => bytes,
        };

        debug!(image_size = bytes.len(), conf = conf_threshold, "이미지 분석 요청");

        let form = Form::new()
            .part(IMAGE_FIELD, Part::bytes(bytes).file_name(IMAGE_FILENAME))
            .text(CONF_FIELD, conf_threshold.to_string());

        self.send_predict(form).await
    }

    async fn analyze_file(
        &self,
        path: &Path,
        conf_threshold: f64,
    ) -> Result<PositionAnalysis, SenchessError> {
        let bytes = tokio::fs::read(path).await?;
        self.analyze_image(ImageSource::Bytes(bytes), conf_threshold)
            .await
    }

    async fn analyze_base64(
        &self,
        image_base64: &str,
        conf_threshold: f64,
    ) -> Result<PositionAnalysis, SenchessError> {
        debug!(
            encoded_len = image_base64.len(),
            conf = conf_threshold,
            "base64 이미지 분석 요청"
        );

        // base64 디코딩은 서버 측 책임 — 텍스트 필드로 그대로 전달한다
        let form = Form::new()
            .text(IMAGE_BASE64_FIELD, image_base64.to_string())
            .text(CONF_FIELD, conf_threshold.to_string());

        self.send_predict(form).await
    }

    async fn check_health(&self) -> HealthStatus {
        let url = format!("{}/health", self.base_url);

        let resp = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, "헬스체크 연결 실패");
                return HealthStatus::offline("API 연결 불가");
            }
        };

        if !resp.status().is_success() {
            warn!(status = %resp.status(), "헬스체크 비정상 응답");
            return HealthStatus::error("API 응답 비정상");
        }

        match resp.json::<HealthResponse>().await {
            Ok(body) => HealthStatus::from_response(body),
            Err(e) => {
                // 본문 해석 실패는 연결 실패와 동일하게 offline으로 정규화
                warn!(error = %e, "헬스체크 본문 파싱 실패");
                HealthStatus::offline("API 연결 불가")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use senchess_core::models::analysis::ConfidenceLevel;

    const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn prediction_body() -> String {
        format!(
            r#"{{
                "success": true,
                "fen": "{STARTING_FEN}",
                "pieces": [],
                "confidence": 0.95,
                "detectedPieces": 32,
                "description": "Standard starting position",
                "imageSize": {{"width": 640, "height": 640}},
                "warnings": []
            }}"#
        )
    }

    fn client_for(server: &mockito::ServerGuard) -> HttpChessRecognizer {
        let config = ClientConfig::default().with_base_url(server.url());
        HttpChessRecognizer::new(&config).unwrap()
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let config = ClientConfig::default().with_base_url("체스판 이미지");
        let result = HttpChessRecognizer::new(&config);
        assert!(matches!(result, Err(SenchessError::Config(_))));
    }

    #[test]
    fn trailing_slash_trimmed() {
        let config = ClientConfig::default().with_base_url("http://localhost:5000/");
        let client = HttpChessRecognizer::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:5000");
    }

    #[tokio::test]
    async fn predict_success_normalizes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/predict")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(prediction_body())
            .create_async()
            .await;

        let client = client_for(&server);
        let analysis = client
            .analyze_image(ImageSource::Bytes(vec![0xFF, 0xD8, 0xFF]), 0.25)
            .await
            .unwrap();

        assert_eq!(analysis.fen, STARTING_FEN);
        assert_eq!(analysis.description, "Standard starting position");
        assert_eq!(analysis.confidence, ConfidenceLevel::High);
        assert_eq!(analysis.detected_pieces, 32);
        assert!(analysis.warnings.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn bearer_header_attached_when_key_set() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/predict")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(prediction_body())
            .create_async()
            .await;

        let config = ClientConfig::default()
            .with_base_url(server.url())
            .with_api_key("test-key");
        let client = HttpChessRecognizer::new(&config).unwrap();

        let result = client
            .analyze_image(ImageSource::Bytes(vec![1, 2, 3]), 0.25)
            .await;
        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn no_auth_header_without_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/predict")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(prediction_body())
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client
            .analyze_image(ImageSource::Bytes(vec![1, 2, 3]), 0.25)
            .await;
        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn base64_path_sends_text_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/predict")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="image_base64""#.to_string()),
                Matcher::Regex(r#"name="conf""#.to_string()),
                Matcher::Regex("aGVsbG8=".to_string()),
            ]))
            .with_status(200)
            .with_body(prediction_body())
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.analyze_base64("aGVsbG8=", 0.25).await;
        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_body_message_preserved() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/predict")
            .with_status(422)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "no_board", "message": "no chess board detected"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .analyze_image(ImageSource::Bytes(vec![1]), 0.25)
            .await
            .unwrap_err();

        match err {
            SenchessError::Recognition(message) => {
                assert_eq!(message, "no chess board detected");
            }
            other => panic!("Recognition 변형이어야 함: {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_body_unparseable_falls_back_to_status_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/predict")
            .with_status(500)
            .with_body("<html>boom</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .analyze_image(ImageSource::Bytes(vec![1]), 0.25)
            .await
            .unwrap_err();

        match err {
            SenchessError::Recognition(message) => {
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("Recognition 변형이어야 함: {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn timeout_is_distinct_from_recognition_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/predict")
            .with_status(200)
            .with_chunked_body(|w: &mut dyn std::io::Write| {
                // 클라이언트 타임아웃(100ms)보다 길게 응답을 지연
                std::thread::sleep(Duration::from_millis(500));
                std::io::Write::write_all(w, b"{}")
            })
            .create_async()
            .await;

        let config = ClientConfig::default()
            .with_base_url(server.url())
            .with_timeout_ms(100);
        let client = HttpChessRecognizer::new(&config).unwrap();

        let err = client
            .analyze_image(ImageSource::Bytes(vec![1]), 0.25)
            .await
            .unwrap_err();

        assert!(matches!(err, SenchessError::Timeout { timeout_ms: 100 }));
    }

    #[tokio::test]
    async fn malformed_success_body_is_distinct() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/predict")
            .with_status(200)
            .with_body("이것은 JSON이 아님")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .analyze_image(ImageSource::Bytes(vec![1]), 0.25)
            .await
            .unwrap_err();

        assert!(matches!(err, SenchessError::MalformedResponse(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn url_source_downloads_then_predicts() {
        let mut server = mockito::Server::new_async().await;
        let image_mock = server
            .mock("GET", "/board.jpg")
            .with_status(200)
            .with_header("content-type", "image/jpeg")
            .with_body(vec![0xFF, 0xD8, 0xFF, 0xE0])
            .create_async()
            .await;
        let predict_mock = server
            .mock("POST", "/predict")
            .with_status(200)
            .with_body(prediction_body())
            .create_async()
            .await;

        let client = client_for(&server);
        let image_url = format!("{}/board.jpg", server.url());
        let analysis = client
            .analyze_image(ImageSource::Url(image_url), 0.25)
            .await
            .unwrap();

        assert_eq!(analysis.fen, STARTING_FEN);
        image_mock.assert_async().await;
        predict_mock.assert_async().await;
    }

    #[tokio::test]
    async fn url_download_failure_is_download_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/missing.jpg")
            .with_status(404)
            .create_async()
            .await;

        let client = client_for(&server);
        let image_url = format!("{}/missing.jpg", server.url());
        let err = client
            .analyze_image(ImageSource::Url(image_url), 0.25)
            .await
            .unwrap_err();

        assert!(matches!(err, SenchessError::Download(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn file_path_matches_bytes_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/predict")
            .with_status(200)
            .with_body(prediction_body())
            .expect(2)
            .create_async()
            .await;

        let bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x01, 0x02];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.jpg");
        std::fs::write(&path, &bytes).unwrap();

        let client = client_for(&server);
        let from_bytes = client
            .analyze_image(ImageSource::Bytes(bytes), 0.25)
            .await
            .unwrap();
        let from_file = client.analyze_file(&path, 0.25).await.unwrap();

        assert_eq!(from_bytes.fen, from_file.fen);
        assert_eq!(from_bytes.confidence, from_file.confidence);
        assert_eq!(from_bytes.detected_pieces, from_file.detected_pieces);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let server = mockito::Server::new_async().await;
        let client = client_for(&server);

        let err = client
            .analyze_file(Path::new("/없는/경로/board.jpg"), 0.25)
            .await
            .unwrap_err();
        assert!(matches!(err, SenchessError::Io(_)));
    }

    #[tokio::test]
    async fn health_healthy_passthrough() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "healthy", "model_loaded": true}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let status = client.check_health().await;

        assert_eq!(status.status, "healthy");
        assert!(status.model_loaded);
        assert!(status.is_healthy());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn health_500_is_error_not_panic() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server);
        let status = client.check_health().await;

        assert_eq!(status.status, "error");
        assert!(!status.model_loaded);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn health_unparseable_body_is_offline() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html>proxy says hi</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let status = client.check_health().await;

        assert_eq!(status.status, "offline");
        assert!(!status.model_loaded);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn health_unreachable_is_offline() {
        // 포트 1은 통상 닫혀 있어 연결이 거부된다
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:1");
        let client = HttpChessRecognizer::new(&config).unwrap();

        let status = client.check_health().await;
        assert_eq!(status.status, "offline");
        assert!(!status.model_loaded);
    }
}
