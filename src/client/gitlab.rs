//! GitLab API client implementation

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use super::api::{GroupScope, ListingApi, ProjectScope};
use super::models::{Group, Project};
use super::pagination::{Page, PageRequest, PaginationInfo};
use crate::error::{ApiError, Result};

/// Path prefix of the REST API on every GitLab instance
const API_PREFIX: &str = "/api/v4";

/// GitLab API client authenticated with a static bearer token
pub struct GitLabClient {
    http: HttpClient,
    api_url: String,
    token: String,
}

impl GitLabClient {
    /// Create a client for the instance at `base_url` (e.g. `https://gitlab.example.com`).
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(concat!("glids/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::from)?;

        Ok(Self {
            http,
            api_url: format!("{}{}", base_url.trim_end_matches('/'), API_PREFIX),
            token: token.into(),
        })
    }

    /// Make one authenticated GET request and decode the JSON body.
    ///
    /// Returns the payload together with the pagination headers of the response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<(T, PaginationInfo)> {
        let url = format!("{}{}", self.api_url, path);
        let request = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(&self.token)
            .build()
            .map_err(ApiError::from)?;
        let target = request.url().to_string();

        debug!("GET {}", target);
        let response = self.http.execute(request).await.map_err(|e| {
            debug!("GET {} failed: {}", target, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let pagination = PaginationInfo::from_headers(response.headers());
        let body = response.text().await.map_err(|e| {
            ApiError::Request(format!("error reading response body: {}", e))
        })?;

        if status != StatusCode::OK {
            debug!("GET {} -> {}: {}", target, status, body);
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let data = serde_json::from_str::<T>(&body).map_err(|e| {
            debug!("GET {} -> undecodable body: {}", target, body);
            ApiError::Decode(e.to_string())
        })?;

        debug!(
            "GET {} -> {} (total={}, per_page={}, page={}/{})",
            target,
            status,
            pagination.total,
            pagination.per_page,
            pagination.current_page,
            pagination.total_pages
        );
        Ok((data, pagination))
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        mut query: Vec<(&'static str, String)>,
        request: &PageRequest,
    ) -> Result<Page<T>> {
        query.extend(request.to_query_params());
        let (items, pagination) = self.get::<Vec<T>>(path, &query).await?;
        Ok(Page { items, pagination })
    }
}

#[async_trait]
impl ListingApi for GitLabClient {
    async fn list_groups(&self, scope: &GroupScope, request: &PageRequest) -> Result<Page<Group>> {
        self.get_page(&scope.path(), scope.query_params(), request)
            .await
    }

    async fn list_projects(
        &self,
        scope: &ProjectScope,
        request: &PageRequest,
    ) -> Result<Page<Project>> {
        self.get_page(&scope.path(), scope.query_params(), request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use mockito::Matcher;

    fn page_query(page: &str, per_page: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), page.into()),
            Matcher::UrlEncoded("per_page".into(), per_page.into()),
        ])
    }

    #[test]
    fn test_client_creation() {
        let client = GitLabClient::new("https://gitlab.example.com/", "token");
        assert!(client.is_ok());
        assert_eq!(
            client.unwrap().api_url,
            "https://gitlab.example.com/api/v4"
        );
    }

    #[tokio::test]
    async fn test_list_groups_sends_auth_and_scope_params() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/groups")
            .match_header("authorization", "Bearer s3cret")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("all_available".into(), "true".into()),
                Matcher::UrlEncoded("search".into(), "plat form".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("per_page".into(), "1".into()),
            ]))
            .with_status(200)
            .with_header("x-total", "120")
            .with_header("x-per-page", "1")
            .with_header("x-total-pages", "120")
            .with_header("x-page", "1")
            .with_body(r#"[{"id": 9, "parent_id": null, "full_path": "platform", "name": "Platform"}]"#)
            .create_async()
            .await;

        let client = GitLabClient::new(&server.url(), "s3cret").unwrap();
        let scope = GroupScope::All {
            search: Some("plat form".to_string()),
        };
        let page = client
            .list_groups(&scope, &PageRequest::probe())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].full_path, "platform");
        assert_eq!(page.pagination.total, 120);
        assert_eq!(page.pagination.total_pages, 120);
        assert_eq!(page.pagination.current_page, 1);
    }

    #[tokio::test]
    async fn test_list_group_projects_excludes_subgroups() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/groups/5/projects")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("include_subgroups".into(), "false".into()),
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("per_page".into(), "100".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"[{"id": 77, "path_with_namespace": "platform/api", "name": "api", "star_count": 3}]"#,
            )
            .create_async()
            .await;

        let client = GitLabClient::new(&server.url(), "t").unwrap();
        let page = client
            .list_projects(&ProjectScope::InGroup(5), &PageRequest::new(2))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.items[0].id, 77);
        // No pagination headers on this response
        assert_eq!(page.pagination, PaginationInfo::default());
    }

    #[tokio::test]
    async fn test_non_200_is_http_status_error_with_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v4/groups/3/subgroups")
            .match_query(page_query("1", "100"))
            .with_status(403)
            .with_body(r#"{"message":"403 Forbidden"}"#)
            .create_async()
            .await;

        let client = GitLabClient::new(&server.url(), "t").unwrap();
        let err = client
            .list_groups(&GroupScope::Subgroups(3), &PageRequest::new(1))
            .await
            .unwrap_err();

        match err {
            Error::Api(ApiError::HttpStatus { status, body }) => {
                assert_eq!(status, 403);
                assert!(body.contains("403 Forbidden"));
            }
            other => panic!("Expected HttpStatus error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v4/projects")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"not": "an array"}"#)
            .create_async()
            .await;

        let client = GitLabClient::new(&server.url(), "t").unwrap();
        let err = client
            .list_projects(&ProjectScope::All, &PageRequest::new(1))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let client = GitLabClient::new("http://127.0.0.1:9", "t").unwrap();
        let err = client
            .list_projects(&ProjectScope::All, &PageRequest::new(1))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Request(_))));
    }
}
