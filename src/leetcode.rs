//! LeetCode API client used to verify extracted cookies.

use crate::browser::SessionCookies;
use crate::config::{GRAPHQL_ENDPOINT, SITE_URL, VALIDATE_TIMEOUT};
use crate::error::Result;
use serde::Deserialize;

const USER_STATUS_QUERY: &str = "query { userStatus { username } }";

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "userStatus")]
    user_status: Option<UserStatus>,
}

#[derive(Debug, Deserialize)]
struct UserStatus {
    username: Option<String>,
}

/// Thin client over the LeetCode GraphQL endpoint.
pub struct LeetCodeApi {
    client: reqwest::Client,
    endpoint: String,
}

impl LeetCodeApi {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(GRAPHQL_ENDPOINT)
    }

    /// Build a client against a specific endpoint; tests point this at a
    /// local mock server.
    pub fn with_endpoint(endpoint: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(VALIDATE_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Ask the API who the cookies belong to.
    ///
    /// Best-effort: any transport failure, non-success status, or undecodable
    /// response yields `None`. The cookies may still work.
    pub async fn current_username(&self, cookies: &SessionCookies) -> Option<String> {
        match self.query_user_status(cookies).await {
            Ok(username) => username,
            Err(err) => {
                log::debug!("Cookie validation request failed: {}", err);
                None
            }
        }
    }

    async fn query_user_status(&self, cookies: &SessionCookies) -> Result<Option<String>> {
        let body = serde_json::json!({
            "query": USER_STATUS_QUERY,
            "variables": {},
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("Cookie", cookies.cookie_header())
            .header("x-csrftoken", &cookies.csrf)
            .header("Referer", SITE_URL)
            .header("User-Agent", format!("leetfresh/{}", crate::VERSION))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let decoded: GraphqlResponse = response.json().await?;
        Ok(decoded
            .data
            .and_then(|data| data.user_status)
            .and_then(|status| status.username)
            .filter(|username| !username.is_empty()))
    }
}
