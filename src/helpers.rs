// SPDX-License-Identifier: MPL-2.0

//! Async helper functions for the Lectern application.
//! These functions handle LMS API interactions.

use crate::api::{ApiError, Endpoint, LmsClient};
use crate::chain::LevelSpec;
use chrono::{DateTime, Local};

/// Counts shown on the dashboard.
#[derive(Debug, Clone)]
pub struct Overview {
    pub courses: Result<usize, ApiError>,
    pub organizations: Result<usize, ApiError>,
    pub refreshed_at: DateTime<Local>,
}

/// Helper to create a client from the persisted settings
pub fn create_client(url: &str, token: &str) -> Result<LmsClient, ApiError> {
    let client = LmsClient::new(url, token)?;
    tracing::trace!(base_url = %client.base_url(), "created LMS client");
    Ok(client)
}

/// Fetch the raw option payload for one level
pub async fn fetch_options(
    url: &str,
    token: &str,
    endpoint: Endpoint,
    parent: Option<String>,
) -> Result<serde_json::Value, ApiError> {
    let client = create_client(url, token)?;
    client.get_json(&endpoint, parent.as_deref()).await
}

/// Test connection by reading a root list
pub async fn test_connection(url: &str, token: &str, endpoint: Endpoint) -> Result<(), ApiError> {
    let client = create_client(url, token)?;
    client.get_json(&endpoint, None).await.map(|_| ())
}

/// Fetch the dashboard counts; both root lists are requested concurrently
pub async fn fetch_overview(
    url: &str,
    token: &str,
    courses: LevelSpec,
    organizations: LevelSpec,
) -> Result<Overview, ApiError> {
    let client = create_client(url, token)?;
    let (courses, organizations) = futures_util::future::join(
        count_entities(&client, &courses),
        count_entities(&client, &organizations),
    )
    .await;

    Ok(Overview {
        courses,
        organizations,
        refreshed_at: Local::now(),
    })
}

async fn count_entities(client: &LmsClient, spec: &LevelSpec) -> Result<usize, ApiError> {
    let body = client.get_json(&spec.endpoint, None).await?;
    spec.envelope
        .locate(&body)
        .map(|entities| entities.len())
        .ok_or_else(|| ApiError::MalformedPayload(format!("no {} list in response", spec.key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{LoadOutcome, SelectOption};
    use crate::forms::FormKind;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_course_selection_loads_chapters_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/courses/1/chapters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 5, "name": "Ch5"}])))
            .expect(1)
            .mount(&server)
            .await;

        let mut chain = FormKind::CourseContent.chain();
        let ticket = chain
            .select_at(0, Some(SelectOption::new(1, "Course1")))
            .unwrap()
            .unwrap();
        let spec = chain.spec(ticket.level()).cloned().unwrap();

        let response = fetch_options(
            &server.uri(),
            "",
            spec.endpoint,
            ticket.parent().map(|p| p.to_string()),
        )
        .await;
        let outcome = chain.finish_load(&ticket, response, |_, err| panic!("{err}"));

        assert_eq!(outcome, LoadOutcome::Applied { count: 1 });
        let level = chain.level(1).unwrap();
        assert_eq!(level.options(), &[SelectOption::new(5, "Ch5")]);
        assert!(!level.is_loading());
    }

    #[tokio::test]
    async fn test_malformed_response_degrades_to_empty_level() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/courses/1/chapters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;

        let mut chain = FormKind::CourseContent.chain();
        let ticket = chain
            .select_at(0, Some(SelectOption::new(1, "Course1")))
            .unwrap()
            .unwrap();
        let response = fetch_options(
            &server.uri(),
            "",
            chain.spec(1).unwrap().endpoint,
            Some("1".to_string()),
        )
        .await;

        let mut errors = Vec::new();
        chain.finish_load(&ticket, response, |_, err| errors.push(err.clone()));

        assert_eq!(errors.len(), 1);
        assert!(chain.level(1).unwrap().options().is_empty());
        assert!(!chain.level(1).unwrap().is_loading());
    }

    #[tokio::test]
    async fn test_fetch_overview_counts_both_roots() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/courses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": 1}, {"id": 2}]})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/organizations"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let courses = FormKind::CourseContent.chain().spec(0).cloned().unwrap();
        let organizations = FormKind::Enrollment.chain().spec(0).cloned().unwrap();
        let overview = fetch_overview(&server.uri(), "", courses, organizations)
            .await
            .unwrap();

        assert_eq!(overview.courses, Ok(2));
        assert!(matches!(
            overview.organizations,
            Err(ApiError::Status { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_connection_reports_transport_error() {
        // nothing listens on port 9 of localhost
        let err = test_connection("http://127.0.0.1:9", "", Endpoint::path("courses"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
