//! Evaluation over HTTP: one `POST` of the answer set, one JSON verdict back.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use titulacion_core::model::{AnswerStore, EvaluationResult};
use titulacion_core::traits::Evaluator;

use crate::error::ClientError;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5001/api/evaluate";

/// Evaluator backed by the remote rule-evaluation service.
pub struct HttpEvaluator {
    endpoint: String,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl HttpEvaluator {
    /// Build an evaluator for `endpoint`. With `timeout = None` the request
    /// waits for as long as the service takes.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let endpoint = if endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            endpoint
        };

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            timeout,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, answers: &AnswerStore) -> Result<EvaluationResult, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(answers)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let verdict: EvaluateResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

        Ok(EvaluationResult {
            passed: verdict.passed,
            reasons: verdict.reasons.unwrap_or_default(),
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout(self.timeout.map(|t| t.as_secs()).unwrap_or_default())
        } else if e.is_connect() {
            ClientError::Network(format!(
                "evaluation service not reachable at {}",
                self.endpoint
            ))
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

/// Wire format of a verdict. Extra fields (`success`, `message`) are ignored.
#[derive(Deserialize)]
struct EvaluateResponse {
    passed: bool,
    #[serde(default)]
    reasons: Option<Vec<String>>,
}

#[async_trait]
impl Evaluator for HttpEvaluator {
    fn name(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip(self, answers), fields(endpoint = %self.endpoint, answers = answers.len()))]
    async fn evaluate(&self, answers: &AnswerStore) -> anyhow::Result<EvaluationResult> {
        let start = Instant::now();
        let result = self.post(answers).await?;
        debug!(
            passed = result.passed,
            latency_ms = start.elapsed().as_millis() as u64,
            "verdict received"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use titulacion_core::presets::find_example;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn success_case() -> AnswerStore {
        find_example("Titulación Exitosa (Todo aprobado)")
            .unwrap()
            .data
    }

    fn evaluator(server: &MockServer) -> HttpEvaluator {
        HttpEvaluator::new(&format!("{}/api/evaluate", server.uri()), None).unwrap()
    }

    #[tokio::test]
    async fn posts_answers_and_parses_verdict() {
        let server = MockServer::start().await;
        let answers = success_case();

        Mock::given(method("POST"))
            .and(path("/api/evaluate"))
            .and(header("content-type", "application/json"))
            .and(body_json(&answers))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "message": "Evaluación completada.",
                "passed": true,
                "reasons": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = evaluator(&server).evaluate(&answers).await.unwrap();
        assert_eq!(result, EvaluationResult::passed());
    }

    #[tokio::test]
    async fn request_body_has_exactly_the_catalog_keys() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "passed": true
            })))
            .mount(&server)
            .await;

        evaluator(&server).evaluate(&success_case()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body: serde_json::Map<String, serde_json::Value> =
            serde_json::from_slice(&requests[0].body).unwrap();
        let mut keys: Vec<_> = body.keys().cloned().collect();
        keys.sort();
        let mut expected: Vec<_> = titulacion_core::catalog::QUESTIONS
            .iter()
            .map(|q| q.key.to_string())
            .collect();
        expected.sort();
        assert_eq!(keys, expected);
        assert_eq!(body["credits_percentage"], serde_json::json!(100));
        assert_eq!(body["debt_lab"], serde_json::json!(false));
    }

    #[tokio::test]
    async fn missing_or_null_reasons_default_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "passed": false,
                "reasons": null
            })))
            .mount(&server)
            .await;

        let result = evaluator(&server).evaluate(&success_case()).await.unwrap();
        assert!(!result.passed);
        assert!(result.reasons.is_empty());
    }

    #[tokio::test]
    async fn reasons_are_kept_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "passed": false,
                "reasons": ["Debes concluir y liberar tu Servicio Social (500 horas).", "Otro"]
            })))
            .mount(&server)
            .await;

        let result = evaluator(&server).evaluate(&success_case()).await.unwrap();
        assert_eq!(
            result.reasons,
            vec![
                "Debes concluir y liberar tu Servicio Social (500 horas).".to_string(),
                "Otro".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn server_error_fails_whole_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "success": false,
                "passed": true
            })))
            .mount(&server)
            .await;

        let err = evaluator(&server)
            .evaluate(&success_case())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn malformed_body_fails_whole_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = evaluator(&server)
            .evaluate(&success_case())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }

    #[tokio::test]
    async fn missing_passed_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "reasons": ["x"]
            })))
            .mount(&server)
            .await;

        let err = evaluator(&server)
            .evaluate(&success_case())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/api/evaluate", listener.local_addr().unwrap());
        drop(listener);

        let evaluator = HttpEvaluator::new(&endpoint, Some(Duration::from_secs(5))).unwrap();
        let err = evaluator.evaluate(&success_case()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Network(_))
        ));
    }

    #[test]
    fn empty_endpoint_falls_back_to_default() {
        let evaluator = HttpEvaluator::new("", None).unwrap();
        assert_eq!(evaluator.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(evaluator.name(), DEFAULT_ENDPOINT);
    }
}
