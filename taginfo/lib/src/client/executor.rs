//! Request execution with tracing instrumentation.
//!
//! This module provides the [`TaginfoClient`] struct, whose single generic
//! [`execute`](TaginfoClient::execute) method validates parameters, performs
//! the GET request and decodes the response for any [`Endpoint`].

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::ACCEPT;
use tracing::{debug, instrument, Span};
use url::Url;

use super::session::{ScopedSession, Session, SessionBuilder};
use crate::endpoint::Endpoint;
use crate::error::{CallError, TaginfoError};
use crate::params::QueryParameters;
use crate::response::ResponseFormat;

/// Base URL of the public taginfo instance.
pub const DEFAULT_BASE_URL: &str = "https://taginfo.openstreetmap.org/api/4/";

/// Builder for configuring a [`TaginfoClient`].
#[derive(Debug, Clone)]
pub struct TaginfoClientBuilder {
    base_url: Option<Url>,
    session: Option<Session>,
    ephemeral: SessionBuilder,
}

impl TaginfoClientBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            session: None,
            ephemeral: SessionBuilder::default(),
        }
    }

    /// Sets the API base URL, e.g. a self-hosted taginfo instance.
    ///
    /// A trailing `/` is appended if missing so endpoint paths resolve below it.
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Shares `session` across all calls made by the client.
    ///
    /// The session's lifecycle stays with the caller.
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Sets the request timeout for ephemeral sessions.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use taginfo::TaginfoClient;
    ///
    /// let client = TaginfoClient::builder()
    ///     .timeout(Duration::from_secs(60))
    ///     .build();
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.ephemeral = self.ephemeral.timeout(timeout);
        self
    }

    /// Overrides the `User-Agent` of ephemeral sessions.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.ephemeral = self.ephemeral.user_agent(user_agent);
        self
    }

    /// Builds the [`TaginfoClient`].
    pub fn build(self) -> TaginfoClient {
        let mut base_url = match self.base_url {
            Some(url) => url,
            None => default_base_url(),
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        TaginfoClient {
            base_url,
            session: self.session,
            ephemeral: self.ephemeral,
        }
    }
}

fn default_base_url() -> Url {
    // The constant is a well-formed absolute URL
    Url::parse(DEFAULT_BASE_URL).unwrap_or_else(|_| unreachable!("invalid DEFAULT_BASE_URL"))
}

/// Async client for the taginfo API.
///
/// Every per-endpoint method (see [`crate::api`]) is a thin wrapper around
/// [`execute`](Self::execute).
///
/// ## Examples
///
/// ```rust,no_run
/// use taginfo::TaginfoClient;
/// use taginfo::api::KeyParams;
///
/// # async fn run() -> Result<(), taginfo::TaginfoError> {
/// let client = TaginfoClient::new();
/// let overview = client.key_overview(&KeyParams::new("amenity")).await?;
/// println!("{} values", overview.data.counts[0].values);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TaginfoClient {
    base_url: Url,
    session: Option<Session>,
    ephemeral: SessionBuilder,
}

impl Default for TaginfoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TaginfoClient {
    /// Creates a new builder for configuring a client.
    pub fn builder() -> TaginfoClientBuilder {
        TaginfoClientBuilder::new()
    }

    /// Creates a client for the public instance with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns the base URL for this client.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the shared session, if one was configured.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Calls `endpoint` with `params` and decodes the response.
    ///
    /// The parameters are validated first; if that fails, no request is made.
    /// Dropping the returned future cancels the in-flight request.
    ///
    /// ## Errors
    ///
    /// - [`TaginfoError::Value`] if `params` violate a constraint
    /// - [`TaginfoError::Call`] on network faults and non-2xx statuses
    /// - [`TaginfoError::Validation`] if the body does not match the schema
    #[instrument(
        name = "taginfo_request",
        skip(self, endpoint, params),
        fields(
            endpoint = endpoint.id(),
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute<P, F>(
        &self,
        endpoint: &Endpoint<P, F>,
        params: &P,
    ) -> Result<F::Output, TaginfoError>
    where
        P: QueryParameters,
        F: ResponseFormat,
    {
        let result = self.run(endpoint, params).await;
        match &result {
            Ok(_) => {
                Span::current().record("otel.status_code", "OK");
            }
            Err(e) => {
                Span::current().record("otel.status_code", "ERROR");
                debug!(error = %e, "request failed");
            }
        }
        result
    }

    async fn run<P, F>(
        &self,
        endpoint: &Endpoint<P, F>,
        params: &P,
    ) -> Result<F::Output, TaginfoError>
    where
        P: QueryParameters,
        F: ResponseFormat,
    {
        debug!("validating params");
        let query = params.to_query()?;

        let url = endpoint.url(&self.base_url, &query)?;
        debug!(
            path = endpoint.path(),
            params = %query.to_query_string(),
            url = %url,
            "sending request"
        );
        Span::current().record("http.url", url.as_str());

        let body = self.fetch(url, F::CONTENT_TYPE).await?;

        debug!("validating response");
        Ok(F::parse(body)?)
    }

    /// Performs the GET request, returning the body of a 2xx response.
    async fn fetch(&self, url: Url, accept: &'static str) -> Result<Bytes, CallError> {
        let scoped = ScopedSession::acquire(self.session.as_ref(), &self.ephemeral)?;

        let response = scoped
            .session()
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());

            return Err(CallError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ValidationError, ValueError};
    use crate::params::{ParamsBuilder, QueryParams};
    use crate::response::{JsonFormat, PngFormat, Validate, PNG_MAGIC};
    use crate::client::DEFAULT_USER_AGENT;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    struct Thing {
        id: u64,
        name: String,
    }

    impl Validate for Thing {
        fn validate(&self) -> Result<(), crate::error::SchemaViolation> {
            crate::response::schema::non_empty("name", &self.name)
        }
    }

    struct Lookup {
        name: String,
    }

    impl QueryParameters for Lookup {
        fn to_query(&self) -> Result<QueryParams, ValueError> {
            ParamsBuilder::new().text("name", &self.name).finish()
        }
    }

    const THING: Endpoint<Lookup, JsonFormat<Thing>> =
        Endpoint::new("thing", "thing/lookup", "Looks up a thing");
    const PICTURE: Endpoint<(), PngFormat> = Endpoint::new("picture", "thing/picture", "A picture");

    fn client_for(server: &MockServer) -> TaginfoClient {
        let base = Url::parse(&format!("{}/api/4", server.uri())).unwrap();
        TaginfoClient::builder().base_url(base).build()
    }

    fn lookup(name: &str) -> Lookup {
        Lookup {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_default_base_url() {
        let client = TaginfoClient::new();
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
        assert!(client.session().is_none());
    }

    #[test]
    fn test_trailing_slash_enforced() {
        let client = TaginfoClient::builder()
            .base_url(Url::parse("https://example.com/taginfo/api/4").unwrap())
            .build();
        assert_eq!(client.base_url().as_str(), "https://example.com/taginfo/api/4/");
    }

    #[tokio::test]
    async fn test_execute_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/4/thing/lookup"))
            .and(query_param("name", "widget"))
            .and(header("accept", "application/json"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(Thing {
                id: 1,
                name: "widget".to_string(),
            }))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let thing = client.execute(&THING, &lookup("  widget ")).await.unwrap();
        assert_eq!(thing.id, 1);
    }

    #[tokio::test]
    async fn test_execute_png() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/4/thing/picture"))
            .and(header("accept", "image/png"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_MAGIC.to_vec(), "image/png"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let png = client.execute(&PICTURE, &()).await.unwrap();
        assert_eq!(png.data(), PNG_MAGIC.as_slice());
    }

    #[tokio::test]
    async fn test_invalid_params_skip_transport() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.execute(&THING, &lookup("   ")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[tokio::test]
    async fn test_http_error_400() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(Thing {
                id: 1,
                name: "a perfectly valid body".to_string(),
            }))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.execute(&THING, &lookup("x")).await.unwrap_err();
        assert!(matches!(
            err,
            TaginfoError::Call(CallError::HttpStatus { status: 400, .. })
        ));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_http_error_500() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.execute(&PICTURE, &()).await.unwrap_err();
        match err {
            TaginfoError::Call(CallError::HttpStatus { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_schema_mismatch() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": "1", "name": "x"}"#))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.execute(&THING, &lookup("x")).await.unwrap_err();
        assert!(matches!(
            err,
            TaginfoError::Validation(ValidationError::JsonParse(_))
        ));
    }

    #[tokio::test]
    async fn test_shared_session_from_client() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_MAGIC.to_vec(), "image/png"))
            .expect(2)
            .mount(&mock_server)
            .await;

        let session = Session::from_client(reqwest::Client::new()).with_default_user_agent();
        let base = Url::parse(&mock_server.uri()).unwrap();
        let client = TaginfoClient::builder()
            .base_url(base)
            .session(session)
            .build();

        client.execute(&PICTURE, &()).await.unwrap();
        client.execute(&PICTURE, &()).await.unwrap();
    }

    #[tokio::test]
    async fn test_adopted_client_user_agent_reaches_server() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("user-agent", "my-app/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_MAGIC.to_vec(), "image/png"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let http = reqwest::Client::builder()
            .user_agent("my-app/1.0")
            .build()
            .unwrap();
        let client = TaginfoClient::builder()
            .base_url(Url::parse(&mock_server.uri()).unwrap())
            .session(Session::from_client(http))
            .build();

        client.execute(&PICTURE, &()).await.unwrap();
    }

    #[tokio::test]
    async fn test_user_agent_override() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("user-agent", "override/2.0"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_MAGIC.to_vec(), "image/png"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TaginfoClient::builder()
            .base_url(Url::parse(&mock_server.uri()).unwrap())
            .user_agent("override/2.0")
            .build();

        client.execute(&PICTURE, &()).await.unwrap();
    }

    #[tokio::test]
    async fn test_timeout_is_retryable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(PNG_MAGIC.to_vec(), "image/png")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client = TaginfoClient::builder()
            .base_url(Url::parse(&mock_server.uri()).unwrap())
            .timeout(Duration::from_millis(100))
            .build();

        let err = client.execute(&PICTURE, &()).await.unwrap_err();
        assert!(matches!(err, TaginfoError::Call(CallError::Request(_))));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_execute_emits_tracing_events() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_MAGIC.to_vec(), "image/png"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.execute(&PICTURE, &()).await.unwrap();

        assert!(logs_contain("taginfo_request"));
        assert!(logs_contain("validating params"));
        assert!(logs_contain("thing/picture"));
        assert!(logs_contain("validating response"));
        assert!(logs_contain("releasing ephemeral session"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_escaping_path_marks_span_failed() {
        const ESCAPE: Endpoint<(), PngFormat> = Endpoint::new("escape", "/elsewhere", "Escapes");

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.execute(&ESCAPE, &()).await.unwrap_err();

        assert!(matches!(err, TaginfoError::Call(CallError::InvalidPath { .. })));
        assert!(logs_contain("request failed"));
        assert!(logs_contain("otel.status_code=\"ERROR\""));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_connection_failure_marks_span_failed() {
        // Nothing listens on the discard port
        let client = TaginfoClient::builder()
            .base_url(Url::parse("http://127.0.0.1:9/api/4/").unwrap())
            .build();

        let err = client.execute(&PICTURE, &()).await.unwrap_err();

        assert!(matches!(err, TaginfoError::Call(CallError::Request(_))));
        assert!(logs_contain("request failed"));
        assert!(logs_contain("otel.status_code=\"ERROR\""));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_client_error_marks_span_failed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.execute(&PICTURE, &()).await.unwrap_err();

        assert!(logs_contain("http.status_code=404"));
        assert!(logs_contain("otel.status_code=\"ERROR\""));
    }
}
