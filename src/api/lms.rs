// SPDX-License-Identifier: MPL-2.0

use super::error::ApiError;
use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;

/// Placeholder replaced by the parent id in endpoint paths.
pub const PARENT_PLACEHOLDER: &str = "{parent}";

/// Upper bound for a single option request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// How the parent id is attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentScope {
    /// The `{parent}` segment of the path is substituted.
    Path,
    /// The parent id is sent as the named query parameter.
    Query(&'static str),
}

/// A GET endpoint relative to the configured API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub scope: ParentScope,
}

impl Endpoint {
    /// An endpoint scoped by path substitution (or not scoped at all, for roots).
    pub const fn path(path: &'static str) -> Self {
        Self {
            path,
            scope: ParentScope::Path,
        }
    }

    /// An endpoint scoped by a query parameter.
    pub const fn query(path: &'static str, param: &'static str) -> Self {
        Self {
            path,
            scope: ParentScope::Query(param),
        }
    }

    /// Builds the request URL under `base`.
    ///
    /// Every path segment, including the substituted parent id, is
    /// percent-encoded on its own, so ids containing `/` stay one segment.
    pub fn url(&self, base: &Url, parent: Option<&str>) -> Result<Url, ApiError> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(format!("{} cannot be a base URL", base)))?;
            segments.pop_if_empty();
            for segment in self.path.split('/').filter(|s| !s.is_empty()) {
                if segment == PARENT_PLACEHOLDER {
                    let parent = parent.ok_or_else(|| {
                        ApiError::InvalidUrl(format!("{} requires a parent id", self.path))
                    })?;
                    segments.push(parent);
                } else {
                    segments.push(segment);
                }
            }
        }

        if let (ParentScope::Query(param), Some(parent)) = (self.scope, parent) {
            url.query_pairs_mut().append_pair(param, parent);
        }

        Ok(url)
    }
}

/// Read-only client for the LMS REST API.
#[derive(Debug, Clone)]
pub struct LmsClient {
    client: reqwest::Client,
    base_url: Url,
}

impl LmsClient {
    /// Creates a client for `base_url`.
    ///
    /// An empty `auth_token` sends no `Authorization` header at all.
    pub fn new(base_url: &str, auth_token: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let token = auth_token.trim();
        if !token.is_empty() {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::InvalidUrl(format!("invalid token: {}", e)))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let base_url = Url::parse(base_url.trim())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issues one GET for `endpoint` and returns the decoded JSON body.
    ///
    /// The body is returned as-is; locating the entity array is the caller's
    /// concern since the shape differs per endpoint.
    pub async fn get_json(
        &self,
        endpoint: &Endpoint,
        parent: Option<&str>,
    ) -> Result<serde_json::Value, ApiError> {
        let url = endpoint.url(&self.base_url, parent)?;
        tracing::debug!(%url, "requesting options");

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "option request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::MalformedPayload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn base(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn test_url_substitutes_parent_segment() {
        let endpoint = Endpoint::path("courses/{parent}/chapters");
        let url = endpoint.url(&base("http://lms.test/api/"), Some("12")).unwrap();
        assert_eq!(url.as_str(), "http://lms.test/api/courses/12/chapters");
    }

    #[test]
    fn test_url_encodes_parent_as_single_segment() {
        let endpoint = Endpoint::path("courses/{parent}/chapters");
        let url = endpoint.url(&base("http://lms.test/api"), Some("a b/c")).unwrap();
        assert_eq!(url.path(), "/api/courses/a%20b%2Fc/chapters");
    }

    #[test]
    fn test_url_query_scope() {
        let endpoint = Endpoint::query("programs", "organization_id");
        let url = endpoint.url(&base("http://lms.test"), Some("4")).unwrap();
        assert_eq!(url.as_str(), "http://lms.test/programs?organization_id=4");
    }

    #[test]
    fn test_url_requires_parent_for_placeholder() {
        let endpoint = Endpoint::path("chapters/{parent}/contents");
        let err = endpoint.url(&base("http://lms.test"), None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        assert!(matches!(
            LmsClient::new("not a url", ""),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_get_json_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/courses/7/chapters"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"chapter_id": 1}])))
            .expect(1)
            .mount(&server)
            .await;

        let client = LmsClient::new(&format!("{}/api", server.uri()), "secret").unwrap();
        let body = client
            .get_json(&Endpoint::path("courses/{parent}/chapters"), Some("7"))
            .await
            .unwrap();

        assert_eq!(body, json!([{"chapter_id": 1}]));
    }

    #[tokio::test]
    async fn test_get_json_omits_header_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = LmsClient::new(&server.uri(), "").unwrap();
        client
            .get_json(&Endpoint::path("organizations"), None)
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_get_json_query_scope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/programs"))
            .and(query_param("organization_id", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = LmsClient::new(&server.uri(), "").unwrap();
        let body = client
            .get_json(&Endpoint::query("programs", "organization_id"), Some("3"))
            .await
            .unwrap();

        assert_eq!(body, json!({"data": []}));
    }

    #[tokio::test]
    async fn test_get_json_maps_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/courses"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = LmsClient::new(&server.uri(), "").unwrap();
        let err = client
            .get_json(&Endpoint::path("courses"), None)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                body: "boom".to_string()
            }
        );
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_get_json_rejects_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/courses"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let client = LmsClient::new(&server.uri(), "").unwrap();
        let err = client
            .get_json(&Endpoint::path("courses"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::MalformedPayload(_)));
        assert!(!err.is_transport());
    }
}
