use crate::errors::{Result, StackError};
use crate::github::{CreatePullRequest, MergeMethod, PullRequest, PullRequestClient};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK, USER_AGENT},
    Client,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

/// GitHub REST API client scoped to one repository
pub struct GitHubClient {
    client: Client,
    base_url: String,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(api_url: &str, owner: &str, repo: &str, token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(StackError::auth(
                "GitHub token not configured. Set GITHUB_TOKEN or run 'gt config set github.token <token>'",
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|e| StackError::config(format!("Invalid auth header: {e}")))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("gt-stack/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()
            .map_err(|e| StackError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: api_url.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Get the base API URL for this repository
    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            path.trim_start_matches('/')
        )
    }

    /// GET every page of a list endpoint, following `Link: rel="next"`
    async fn get_all<T>(&self, path: &str) -> Result<Vec<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut items = Vec::new();
        let mut next = Some(self.api_url(path));

        while let Some(url) = next {
            debug!("GET {}", url);

            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| StackError::network(format!("GET request failed: {e}")))?;

            next = response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(next_page_url);

            let page: Vec<T> = self.handle_response(response).await?;
            items.extend(page);
        }

        Ok(items)
    }

    async fn post<T, U>(&self, path: &str, body: &T) -> Result<U>
    where
        T: Serialize,
        U: for<'de> Deserialize<'de>,
    {
        let url = self.api_url(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| StackError::network(format!("POST request failed: {e}")))?;

        self.handle_response(response).await
    }

    async fn put<T, U>(&self, path: &str, body: &T) -> Result<U>
    where
        T: Serialize,
        U: for<'de> Deserialize<'de>,
    {
        let url = self.api_url(path);
        debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| StackError::network(format!("PUT request failed: {e}")))?;

        self.handle_response(response).await
    }

    /// Handle HTTP response and deserialize JSON
    async fn handle_response<T>(&self, response: reqwest::Response) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await.map_err(|e| {
                StackError::network(format!("Failed to read response body: {e}"))
            })?;

            trace!("Response body: {}", text);

            serde_json::from_str(&text).map_err(|e| {
                StackError::network(format!("Failed to parse JSON response: {e}"))
            })
        } else {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(StackError::auth(format!("GitHub rejected the token: {text}")));
            }
            Err(StackError::github_api(status.as_u16(), text))
        }
    }
}

/// Target of the `rel="next"` entry in a `Link` header, if any
fn next_page_url(link: &str) -> Option<String> {
    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let url = parts.next()?.trim();
        let is_next = parts.any(|param| param.trim() == r#"rel="next""#);
        if !is_next {
            return None;
        }
        url.strip_prefix('<')?.strip_suffix('>').map(str::to_string)
    })
}

#[derive(Debug, Deserialize)]
struct ApiPullRequest {
    number: u64,
    title: String,
    html_url: String,
    #[serde(default)]
    draft: bool,
    head: ApiRef,
    base: ApiRef,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    name: String,
}

impl From<ApiPullRequest> for PullRequest {
    fn from(pr: ApiPullRequest) -> Self {
        Self {
            number: pr.number,
            title: pr.title,
            head: pr.head.name,
            base: pr.base.name,
            draft: pr.draft,
            html_url: pr.html_url,
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiCreatePullRequest<'a> {
    title: &'a str,
    body: &'a str,
    head: &'a str,
    base: &'a str,
    draft: bool,
}

#[derive(Debug, Serialize)]
struct ApiMergeRequest {
    merge_method: MergeMethod,
}

#[derive(Debug, Deserialize)]
struct ApiMergeResponse {
    merged: bool,
    #[serde(default)]
    message: String,
}

#[async_trait]
impl PullRequestClient for GitHubClient {
    async fn list_pull_requests(&self) -> Result<Vec<PullRequest>> {
        let prs: Vec<ApiPullRequest> = self
            .get_all("pulls?state=open&per_page=100&page=1")
            .await?;
        debug!("Found {} open pull requests", prs.len());
        Ok(prs.into_iter().map(PullRequest::from).collect())
    }

    async fn create_pull_request(&self, request: CreatePullRequest) -> Result<PullRequest> {
        let body = ApiCreatePullRequest {
            title: &request.title,
            body: &request.body,
            head: &request.head,
            base: &request.base,
            draft: request.draft,
        };
        let pr: ApiPullRequest = self.post("pulls", &body).await?;
        Ok(pr.into())
    }

    async fn merge_pull_request(&self, number: u64, method: MergeMethod) -> Result<()> {
        let response: ApiMergeResponse = self
            .put(
                &format!("pulls/{number}/merge"),
                &ApiMergeRequest {
                    merge_method: method,
                },
            )
            .await?;

        if !response.merged {
            return Err(StackError::network(format!(
                "Pull request #{number} was not merged: {}",
                response.message
            )));
        }
        Ok(())
    }
}
