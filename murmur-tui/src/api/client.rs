use reqwest::Client;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::{ApiError, ApiResult};
use murmur_types::*;

/// HTTP client for the Murmur REST API
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Helper to handle API responses. Failure statuses carry a
    /// `{message}` body; anything unparseable falls back to the status.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiMessage>(&body)
                .map(|m| m.message)
                .unwrap_or_else(|_| format!("Server returned status {}", status.as_u16()));

            match status.as_u16() {
                404 => Err(ApiError::NotFound(message)),
                _ => Err(ApiError::Server(message)),
            }
        }
    }

    // User endpoints

    /// Fetch a user profile by id or username.
    ///
    /// The profile endpoint reports a missing user as a success status
    /// with an `{error}` body, so the payload is inspected before decoding.
    pub async fn get_user_profile(&self, query: &str) -> ApiResult<UserProfile> {
        let url = format!("{}/api/users/profile/{}", self.base_url, query);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ProfileError>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("Server returned status {}", status.as_u16()));
            return match status.as_u16() {
                404 => Err(ApiError::NotFound(message)),
                _ => Err(ApiError::Server(message)),
            };
        }

        if let Ok(err) = serde_json::from_str::<ProfileError>(&body) {
            return Err(ApiError::NotFound(err.error));
        }

        Ok(serde_json::from_str(&body)?)
    }

    // Post endpoints

    /// Get the feed of posts
    pub async fn get_feed(&self) -> ApiResult<Vec<Post>> {
        let url = format!("{}/api/posts/feed", self.base_url);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Get a single post by ID
    pub async fn get_post(&self, post_id: Uuid) -> ApiResult<Post> {
        let url = format!("{}/api/posts/{}", self.base_url, post_id);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Delete a post
    pub async fn delete_post(&self, post_id: Uuid) -> ApiResult<()> {
        let url = format!("{}/api/posts/{}", self.base_url, post_id);
        let response = self.client.delete(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiMessage>(&body)
            .map(|m| m.message)
            .unwrap_or_else(|_| "An error occurred".to_string());
        Err(ApiError::Server(message))
    }

    /// Create a reply to a post
    pub async fn reply_to_post(&self, post_id: Uuid, text: String) -> ApiResult<Reply> {
        let url = format!("{}/api/posts/reply/{}", self.base_url, post_id);
        let request = ReplyRequest { text };
        let response = self.client.post(&url).json(&request).send().await?;
        self.handle_response(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        let base_url = std::env::var("MURMUR_SERVER_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
        Self::new(base_url)
    }
}
