//! HTTP/1 client for the cipher service.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use common::protocol::{CipherResult, ServiceFailure};
use common::{Algorithm, ServiceError};
use http_body_util::{BodyExt, Full};
use hyper::header::{ACCEPT, CONTENT_TYPE};
use hyper::{Method, Request, StatusCode, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use thiserror::Error;
use tracing::{debug, warn};
use validation::CipherRequest;

/// Which transformation the cipher service is asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Encrypt => "encrypt",
            Operation::Decrypt => "decrypt",
        }
    }
}

/// Path of the cipher-service endpoint handling `algorithm` / `operation`.
///
/// AES has its own route family; the DES variants share one.
pub fn endpoint_path(algorithm: Algorithm, operation: Operation) -> String {
    match algorithm {
        Algorithm::Aes => format!("/api/aes/{}", operation.as_str()),
        _ => format!("/api/{}", operation.as_str()),
    }
}

/// Errors produced while talking to the cipher service.
#[derive(Debug, Error)]
pub enum DownstreamError {
    /// The service answered with a failure. The message is its own.
    #[error("{0}")]
    Service(String),

    /// The configured base URL does not form a valid request URI.
    #[error("invalid cipher service URI: {0}")]
    InvalidUri(String),

    /// Connecting, sending, or reading the response failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// No response within the configured timeout.
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// A success status carried a body without `cipherText`.
    #[error("malformed cipher service response: {0}")]
    Malformed(String),

    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<DownstreamError> for ServiceError {
    fn from(e: DownstreamError) -> Self {
        match e {
            DownstreamError::Service(msg) => ServiceError::Downstream(msg),
            DownstreamError::Malformed(_) => ServiceError::Downstream(e.to_string()),
            DownstreamError::Transport(_) | DownstreamError::Timeout(_) => {
                ServiceError::Unavailable(e.to_string())
            }
            DownstreamError::InvalidUri(_) | DownstreamError::Encode(_) => {
                ServiceError::Internal(e.to_string())
            }
        }
    }
}

/// Cheaply cloneable client bound to one cipher-service base URL.
#[derive(Clone)]
pub struct CipherClient {
    http: Client<HttpConnector, Full<Bytes>>,
    base_url: Arc<str>,
    timeout: Duration,
}

impl CipherClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let http = Client::builder(TokioExecutor::new()).build_http();
        Self {
            http,
            base_url: Arc::from(base_url.trim().trim_end_matches('/')),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forward an admissible request and return the service's result string.
    ///
    /// # Errors
    ///
    /// [`DownstreamError::Service`] carries the service's own error text
    /// unmodified. Transport failures and timeouts are reported separately.
    pub async fn submit(
        &self,
        operation: Operation,
        request: &CipherRequest,
    ) -> Result<String, DownstreamError> {
        let path = endpoint_path(request.algorithm, operation);
        let uri = format!("{}{path}", self.base_url)
            .parse::<Uri>()
            .map_err(|e| DownstreamError::InvalidUri(e.to_string()))?;

        let body = serde_json::to_vec(request)?;
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| DownstreamError::InvalidUri(e.to_string()))?;

        let (status, body) = tokio::time::timeout(self.timeout, self.round_trip(req))
            .await
            .map_err(|_| DownstreamError::Timeout(self.timeout))??;

        debug!(
            operation = operation.as_str(),
            algorithm = %request.algorithm,
            mode = %request.mode,
            status = status.as_u16(),
            "cipher service responded"
        );

        let outcome = interpret(status, &body);
        if let Err(e) = &outcome {
            warn!(operation = operation.as_str(), status = status.as_u16(), error = %e, "cipher service failure");
        }
        outcome
    }

    async fn round_trip(
        &self,
        req: Request<Full<Bytes>>,
    ) -> Result<(StatusCode, Bytes), DownstreamError> {
        let resp = self
            .http
            .request(req)
            .await
            .map_err(|e| DownstreamError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| DownstreamError::Transport(e.to_string()))?
            .to_bytes();
        Ok((status, body))
    }
}

/// Map a cipher-service response to its result string or its error string.
///
/// Failure bodies contribute their `error` field, else the whole JSON
/// document, else the raw text.
fn interpret(status: StatusCode, body: &[u8]) -> Result<String, DownstreamError> {
    if status.is_success() {
        return serde_json::from_slice::<CipherResult>(body)
            .map(|r| r.cipher_text)
            .map_err(|e| DownstreamError::Malformed(e.to_string()));
    }

    if let Ok(failure) = serde_json::from_slice::<ServiceFailure>(body) {
        return Err(DownstreamError::Service(failure.error));
    }
    let message = match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(json) => json.to_string(),
        Err(_) if body.is_empty() => format!("cipher service returned {status}"),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    };
    Err(DownstreamError::Service(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};
    use common::{InputType, Mode, Padding};
    use serde_json::{json, Value};

    async fn spawn_fake(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn fake_service() -> Router {
        Router::new()
            .route(
                "/api/encrypt",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({ "cipherText": format!("{}-{}", body["algorithm"].as_str().unwrap(), body["mode"].as_str().unwrap()) }))
                }),
            )
            .route(
                "/api/aes/encrypt",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({ "cipherText": format!("aes:{}", body["iv"].as_str().unwrap_or("-")) }))
                }),
            )
            .route(
                "/api/decrypt",
                post(|| async {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "error": "Given final block not properly padded" })),
                    )
                }),
            )
            .route(
                "/api/aes/decrypt",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
    }

    fn request(algorithm: Algorithm, mode: Mode) -> CipherRequest {
        CipherRequest {
            algorithm,
            key: "0123456789ABCDEF".into(),
            mode,
            padding: Padding::Pkcs5,
            data: "1122334455667788".into(),
            iv: Some("0001020304050607".into()),
            input_type: InputType::Hex,
            tag_length: Some(128),
        }
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(endpoint_path(Algorithm::Aes, Operation::Encrypt), "/api/aes/encrypt");
        assert_eq!(endpoint_path(Algorithm::DesEde, Operation::Encrypt), "/api/encrypt");
        assert_eq!(endpoint_path(Algorithm::Desx, Operation::Decrypt), "/api/decrypt");
    }

    #[test]
    fn interpret_failure_bodies() {
        let e = interpret(StatusCode::BAD_REQUEST, br#"{"error":"bad key"}"#).unwrap_err();
        assert_eq!(e.to_string(), "bad key");

        let e = interpret(StatusCode::BAD_REQUEST, br#"{"status":400}"#).unwrap_err();
        assert_eq!(e.to_string(), r#"{"status":400}"#);

        let e = interpret(StatusCode::BAD_GATEWAY, b"").unwrap_err();
        assert!(e.to_string().contains("502"));
    }

    #[test]
    fn interpret_success_without_cipher_text() {
        let e = interpret(StatusCode::OK, br#"{"result":"x"}"#).unwrap_err();
        assert!(matches!(e, DownstreamError::Malformed(_)));
    }

    #[test]
    fn error_mapping() {
        let e: ServiceError = DownstreamError::Service("bad key".into()).into();
        assert_eq!(e.http_status(), 502);
        assert_eq!(e.to_string(), "bad key");
        let e: ServiceError = DownstreamError::Timeout(Duration::from_secs(1)).into();
        assert_eq!(e.http_status(), 503);
    }

    #[tokio::test]
    async fn routes_des_family_to_shared_endpoint() {
        let base = spawn_fake(fake_service()).await;
        let client = CipherClient::new(&base, Duration::from_secs(5));
        let out = client
            .submit(Operation::Encrypt, &request(Algorithm::DesEde, Mode::Cbc))
            .await
            .unwrap();
        assert_eq!(out, "DESede-CBC");
    }

    #[tokio::test]
    async fn routes_aes_to_its_own_endpoint() {
        let base = spawn_fake(fake_service()).await;
        let client = CipherClient::new(&format!("{base}/"), Duration::from_secs(5));
        let out = client
            .submit(Operation::Encrypt, &request(Algorithm::Aes, Mode::Cbc))
            .await
            .unwrap();
        assert_eq!(out, "aes:0001020304050607");
    }

    #[tokio::test]
    async fn passes_service_error_through() {
        let base = spawn_fake(fake_service()).await;
        let client = CipherClient::new(&base, Duration::from_secs(5));
        let err = client
            .submit(Operation::Decrypt, &request(Algorithm::Des, Mode::Ecb))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Given final block not properly padded");

        let err = client
            .submit(Operation::Decrypt, &request(Algorithm::Aes, Mode::Cbc))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[tokio::test]
    async fn times_out() {
        let slow = Router::new().route(
            "/api/encrypt",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "cipherText": "late" }))
            }),
        );
        let base = spawn_fake(slow).await;
        let client = CipherClient::new(&base, Duration::from_millis(100));
        let err = client
            .submit(Operation::Encrypt, &request(Algorithm::Des, Mode::Ecb))
            .await
            .unwrap_err();
        assert!(matches!(err, DownstreamError::Timeout(_)));
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = CipherClient::new(&format!("http://{addr}"), Duration::from_secs(5));
        let err = client
            .submit(Operation::Encrypt, &request(Algorithm::Des, Mode::Ecb))
            .await
            .unwrap_err();
        assert!(matches!(err, DownstreamError::Transport(_)));
    }
}
