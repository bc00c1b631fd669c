// @awa-component: INT-RemoteClient
//
//! Low-level transport to the remote service.
//!
//! One call per method. No retries: transport failures surface as
//! [`IntegrationError::Unreachable`], non-2xx responses and GraphQL error
//! lists as [`IntegrationError::UpstreamRejected`].

use std::time::Instant;

use reqwest::Client;
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::headers::{RequestCredentials, build_headers};
use super::query::QueryParams;
use crate::config::IntegrationConfig;
use crate::credentials::CredentialSet;
use crate::error::{IntegrationError, IntegrationResult};

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    #[serde(rename = "operationName")]
    operation_name: &'a str,
    variables: &'a Value,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorItem>,
}

#[derive(Deserialize)]
struct GraphQlErrorItem {
    message: String,
}

/// HTTP + GraphQL client bound to the configured endpoints.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: Client,
    graphql_endpoint: Url,
    rest_endpoint: Url,
    fallback: CredentialSet,
}

impl RemoteClient {
    /// Build a client from configuration.
    ///
    /// Fails with [`IntegrationError::ConfigurationMissing`] unless both endpoints are set.
    pub fn new(config: &IntegrationConfig) -> IntegrationResult<Self> {
        let (Some(graphql), Some(rest)) = (&config.graphql_endpoint, &config.rest_endpoint) else {
            return Err(IntegrationError::ConfigurationMissing);
        };

        let graphql_endpoint = Url::parse(graphql).map_err(|e| {
            IntegrationError::Validation(format!("invalid AI_GRAPHQL_ENDPOINT: {e}"))
        })?;
        let mut rest_endpoint = Url::parse(rest)
            .map_err(|e| IntegrationError::Validation(format!("invalid AI_REST_ENDPOINT: {e}")))?;
        // `Url::join` replaces the last segment unless the base ends with '/'
        if !rest_endpoint.path().ends_with('/') {
            let path = format!("{}/", rest_endpoint.path());
            rest_endpoint.set_path(&path);
        }

        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| IntegrationError::Validation(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            graphql_endpoint,
            rest_endpoint,
            fallback: config.static_credentials(),
        })
    }

    pub fn graphql_endpoint(&self) -> &Url {
        &self.graphql_endpoint
    }

    pub fn rest_endpoint(&self) -> &Url {
        &self.rest_endpoint
    }

    /// Resolve a REST path against the REST base.
    pub fn rest_url(&self, path: &str) -> IntegrationResult<Url> {
        self.rest_endpoint
            .join(path.trim_start_matches('/'))
            .map_err(|e| IntegrationError::Validation(format!("invalid REST path {path}: {e}")))
    }

    async fn send(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> IntegrationResult<Vec<u8>> {
        let started = Instant::now();

        let response = request.send().await.map_err(|e| {
            warn!(operation, error = %e, "remote call failed");
            IntegrationError::Unreachable(format!("{operation}: {e}"))
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!(operation, error = %e, "remote response body failed");
            IntegrationError::Unreachable(format!("{operation}: {e}"))
        })?;

        if !status.is_success() {
            warn!(operation, status = status.as_u16(), "remote call rejected");
            return Err(IntegrationError::UpstreamRejected {
                operation: operation.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        debug!(
            operation,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "remote call completed"
        );
        Ok(body.to_vec())
    }

    fn decode<T: DeserializeOwned>(operation: &str, body: &[u8]) -> IntegrationResult<T> {
        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            body
        };
        serde_json::from_slice(body).map_err(|e| IntegrationError::decode(operation, e.to_string()))
    }

    /// Run a GraphQL document and decode `data.<field>`.
    ///
    /// A non-empty `errors` list is an upstream rejection even on HTTP 200.
    pub async fn graphql<T: DeserializeOwned>(
        &self,
        credentials: &RequestCredentials,
        operation: &str,
        document: &str,
        variables: Value,
        field: &str,
    ) -> IntegrationResult<T> {
        let headers = build_headers(&self.fallback, credentials, true)?;
        let request = self
            .http
            .post(self.graphql_endpoint.clone())
            .headers(headers)
            .json(&GraphQlRequest {
                query: document,
                operation_name: operation,
                variables: &variables,
            });

        let body = self.send(operation, request).await?;
        let response: GraphQlResponse = Self::decode(operation, &body)?;

        if !response.errors.is_empty() {
            let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
            warn!(operation, errors = response.errors.len(), "remote GraphQL errors");
            return Err(IntegrationError::UpstreamRejected {
                operation: operation.to_string(),
                status: 200,
                body: messages.join("; "),
            });
        }

        let mut data = response
            .data
            .ok_or_else(|| IntegrationError::decode(operation, "response has no data"))?;
        let value = data
            .get_mut(field)
            .map(Value::take)
            .ok_or_else(|| IntegrationError::decode(operation, format!("missing field {field}")))?;

        serde_json::from_value(value).map_err(|e| IntegrationError::decode(operation, e.to_string()))
    }

    /// `GET <rest>/<path>?<params>` returning JSON.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        credentials: &RequestCredentials,
        path: &str,
        params: &QueryParams,
    ) -> IntegrationResult<T> {
        let mut url = self.rest_url(path)?;
        params.apply_to(&mut url);
        let headers = build_headers(&self.fallback, credentials, true)?;

        let body = self.send(path, self.http.get(url).headers(headers)).await?;
        Self::decode(path, &body)
    }

    /// `POST <rest>/<path>` with an optional JSON body.
    pub async fn post_json<T, B>(
        &self,
        credentials: &RequestCredentials,
        path: &str,
        body: Option<&B>,
    ) -> IntegrationResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.rest_url(path)?;
        let headers = build_headers(&self.fallback, credentials, true)?;

        let mut request = self.http.post(url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.send(path, request).await?;
        Self::decode(path, &response)
    }

    /// `POST <rest>/<path>` as multipart form data.
    ///
    /// No JSON content type is set; the form supplies its own boundary.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        credentials: &RequestCredentials,
        path: &str,
        form: Form,
    ) -> IntegrationResult<T> {
        let url = self.rest_url(path)?;
        let headers = build_headers(&self.fallback, credentials, false)?;

        let body = self
            .send(path, self.http.post(url).headers(headers).multipart(form))
            .await?;
        Self::decode(path, &body)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode, Uri};
    use axum::routing::{get, post};
    use serde_json::json;

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(base: &str, timeout: Duration) -> RemoteClient {
        RemoteClient::new(&IntegrationConfig {
            graphql_endpoint: Some(format!("{base}/graphql")),
            rest_endpoint: Some(format!("{base}/api")),
            api_key: Some("static-app".into()),
            api_secret: Some("static-secret".into()),
            request_timeout: timeout,
            ..IntegrationConfig::default()
        })
        .unwrap()
    }

    async fn echo(headers: HeaderMap, uri: Uri) -> Json<Value> {
        let h = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
        Json(json!({
            "query": uri.query(),
            "appId": h("x-app-id"),
            "apiKey": h("x-api-key"),
            "openAi": h("x-openai-secret-key"),
        }))
    }

    #[test]
    fn disabled_without_endpoints() {
        let err = RemoteClient::new(&IntegrationConfig::default()).unwrap_err();
        assert!(matches!(err, IntegrationError::ConfigurationMissing));
    }

    #[test]
    fn rest_paths_join_under_base() {
        let client = client_for("http://remote.test", Duration::from_secs(1));
        assert_eq!(
            client.rest_url("/image/process").unwrap().as_str(),
            "http://remote.test/api/image/process"
        );
    }

    #[tokio::test]
    async fn get_sends_headers_and_repeated_query_keys() {
        let base = serve(Router::new().route("/api/echo", get(echo))).await;
        let client = client_for(&base, Duration::from_secs(5));

        let creds = RequestCredentials::new(CredentialSet::with_api_key("tenant-app", "tenant-secret"));
        let params = QueryParams::new().push_all("jobType", ["HOURLY", "FIXED"]);
        let echoed: Value = client.get_json(&creds, "echo", &params).await.unwrap();

        assert_eq!(echoed["query"], "jobType=HOURLY&jobType=FIXED");
        assert_eq!(echoed["appId"], "tenant-app");
        assert_eq!(echoed["apiKey"], "tenant-secret");
        assert_eq!(echoed["openAi"], Value::Null);
    }

    #[tokio::test]
    async fn anonymous_call_uses_static_fallback() {
        let base = serve(Router::new().route("/api/echo", post(echo))).await;
        let client = client_for(&base, Duration::from_secs(5));

        let echoed: Value = client
            .post_json(&RequestCredentials::default(), "echo", None::<&Value>)
            .await
            .unwrap();
        assert_eq!(echoed["appId"], "static-app");
        assert_eq!(echoed["apiKey"], "static-secret");
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_rejected() {
        let router = Router::new().route(
            "/api/fail",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = serve(router).await;
        let client = client_for(&base, Duration::from_secs(5));

        let err = client
            .get_json::<Value>(&RequestCredentials::default(), "fail", &QueryParams::new())
            .await
            .unwrap_err();
        match err {
            IntegrationError::UpstreamRejected { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{addr}"), Duration::from_secs(5));
        let err = client
            .get_json::<Value>(&RequestCredentials::default(), "x", &QueryParams::new())
            .await
            .unwrap_err();
        assert!(err.is_unreachable(), "got {err:?}");
    }

    #[tokio::test]
    async fn timeout_is_unreachable() {
        let router = Router::new().route(
            "/api/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let base = serve(router).await;
        let client = client_for(&base, Duration::from_millis(200));

        let err = client
            .get_json::<Value>(&RequestCredentials::default(), "slow", &QueryParams::new())
            .await
            .unwrap_err();
        assert!(err.is_unreachable(), "got {err:?}");
    }

    #[tokio::test]
    async fn graphql_errors_are_upstream_rejected() {
        let router = Router::new().route(
            "/graphql",
            post(|| async { Json(json!({ "data": null, "errors": [{ "message": "bad filter" }] })) }),
        );
        let base = serve(router).await;
        let client = client_for(&base, Duration::from_secs(5));

        let err = client
            .graphql::<Value>(&RequestCredentials::default(), "q", "query q { x }", json!({}), "x")
            .await
            .unwrap_err();
        match err {
            IntegrationError::UpstreamRejected { body, .. } => assert_eq!(body, "bad filter"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn graphql_decodes_requested_field() {
        let router = Router::new().route(
            "/graphql",
            post(|Json(req): Json<Value>| async move {
                Json(json!({
                    "data": {
                        "employees": {
                            "operation": req["operationName"],
                            "echo": req["variables"]["id"],
                        }
                    }
                }))
            }),
        );
        let base = serve(router).await;
        let client = client_for(&base, Duration::from_secs(5));

        let data: Value = client
            .graphql(
                &RequestCredentials::default(),
                "employeeById",
                "query employeeById($id: String!) { employees { id } }",
                json!({ "id": "e-1" }),
                "employees",
            )
            .await
            .unwrap();
        assert_eq!(data["operation"], "employeeById");
        assert_eq!(data["echo"], "e-1");
    }
}
