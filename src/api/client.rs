//! DupeTube REST API Client
//!
//! HTTP client for the DupeTube backend, built on `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::*;
use super::error::{ApiError, ApiResult};
use super::DupeTubeApi;

/// DupeTube REST API client
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(mut config: ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(concat!("dupetube/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Setup(e.to_string()))?;

        config.base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.config.base_url, path))
    }

    fn authorized(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.request(method, path).bearer_auth(token)
    }

    /// Send a request and decode the JSON body.
    ///
    /// A non-2xx response becomes [`ApiError::ServerRejected`] carrying the
    /// body's `error` field. Anything that prevents reading a JSON body
    /// becomes [`ApiError::Unreachable`].
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, endpoint: &str) -> ApiResult<T> {
        tracing::debug!(endpoint, "Sending API request");

        let response = request.send().await.map_err(|e| {
            tracing::debug!(endpoint, error = %e, "API request failed");
            ApiError::from_reqwest(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::from_reqwest)?;

        tracing::debug!(endpoint, status = status.as_u16(), bytes = body.len(), "API response");

        if status.is_success() {
            serde_json::from_slice(&body)
                .map_err(|e| ApiError::Unreachable(format!("malformed response: {}", e)))
        } else {
            let error: ErrorBody = serde_json::from_slice(&body).map_err(|e| {
                ApiError::Unreachable(format!("malformed error response ({}): {}", status, e))
            })?;

            Err(ApiError::ServerRejected {
                status: status.as_u16(),
                message: error
                    .error
                    .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16())),
            })
        }
    }
}

#[async_trait]
impl DupeTubeApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        let req = self.request(Method::POST, "/api/auth/login").json(request);
        self.send(req, "auth.login").await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        let req = self.request(Method::POST, "/api/auth/register").json(request);
        self.send(req, "auth.register").await
    }

    async fn add_channel(&self, token: &str, channel_url: &str) -> ApiResult<AddChannelResponse> {
        let req = self
            .authorized(Method::POST, "/api/channels/", token)
            .json(&AddChannelRequest {
                channel_url: channel_url.to_string(),
            });
        self.send(req, "channels.add").await
    }

    async fn list_channels(&self, token: &str) -> ApiResult<ChannelList> {
        let req = self.authorized(Method::GET, "/api/channels/", token);
        self.send(req, "channels.list").await
    }

    async fn index_channel(&self, token: &str, channel_id: i64) -> ApiResult<IndexResponse> {
        let path = format!("/api/channels/{}/index", channel_id);
        let req = self.authorized(Method::POST, &path, token);
        self.send(req, "channels.index").await
    }

    async fn sync_channel(&self, token: &str, channel_id: i64) -> ApiResult<SyncResponse> {
        let path = format!("/api/channels/{}/sync", channel_id);
        let req = self.authorized(Method::POST, &path, token);
        self.send(req, "channels.sync").await
    }

    async fn list_videos(&self, token: &str, query: &VideoQuery) -> ApiResult<VideoList> {
        let req = self
            .authorized(Method::GET, "/api/videos/", token)
            .query(query);
        self.send(req, "videos.list").await
    }

    async fn search_videos(
        &self,
        token: &str,
        query: &str,
        page: u32,
    ) -> ApiResult<SearchResults> {
        let req = self
            .authorized(Method::GET, "/api/videos/search", token)
            .query(&[("q", query.to_string()), ("page", page.to_string())]);
        self.send(req, "videos.search").await
    }

    async fn get_video(&self, token: &str, video_id: i64) -> ApiResult<VideoEnvelope> {
        let path = format!("/api/videos/{}", video_id);
        let req = self.authorized(Method::GET, &path, token);
        self.send(req, "videos.get").await
    }

    async fn process_video(&self, token: &str, video_id: i64) -> ApiResult<ProcessVideoResponse> {
        let path = format!("/api/videos/{}/process", video_id);
        let req = self.authorized(Method::POST, &path, token);
        self.send(req, "videos.process").await
    }

    async fn video_suggestions(
        &self,
        token: &str,
        video_id: i64,
    ) -> ApiResult<SuggestionsEnvelope> {
        let path = format!("/api/videos/{}/suggestions", video_id);
        let req = self.authorized(Method::GET, &path, token);
        self.send(req, "videos.suggestions").await
    }

    async fn generate_blog_post(
        &self,
        token: &str,
        video_id: i64,
    ) -> ApiResult<GeneratePostResponse> {
        let req = self
            .authorized(Method::POST, "/api/blog/generate", token)
            .json(&GeneratePostRequest { video_id });
        self.send(req, "blog.generate").await
    }

    async fn bulk_generate_blog_posts(
        &self,
        token: &str,
        video_ids: &[i64],
    ) -> ApiResult<BulkGenerateResponse> {
        let req = self
            .authorized(Method::POST, "/api/blog/bulk-generate", token)
            .json(&BulkGenerateRequest {
                video_ids: video_ids.to_vec(),
            });
        self.send(req, "blog.bulk_generate").await
    }

    async fn list_blog_posts(&self, token: &str, query: &PostQuery) -> ApiResult<BlogPostList> {
        let req = self
            .authorized(Method::GET, "/api/blog/posts", token)
            .query(query);
        self.send(req, "blog.list").await
    }

    async fn get_blog_post(&self, token: &str, post_id: i64) -> ApiResult<PostEnvelope> {
        let path = format!("/api/blog/posts/{}", post_id);
        let req = self.authorized(Method::GET, &path, token);
        self.send(req, "blog.get").await
    }

    async fn update_blog_post(
        &self,
        token: &str,
        post_id: i64,
        update: &BlogPostUpdate,
    ) -> ApiResult<PostEnvelope> {
        let path = format!("/api/blog/posts/{}", post_id);
        let req = self.authorized(Method::PUT, &path, token).json(update);
        self.send(req, "blog.update").await
    }

    async fn publish_blog_post(&self, token: &str, post_id: i64) -> ApiResult<PublishResponse> {
        let path = format!("/api/blog/posts/{}/publish", post_id);
        let req = self.authorized(Method::POST, &path, token);
        self.send(req, "blog.publish").await
    }

    async fn delete_blog_post(&self, token: &str, post_id: i64) -> ApiResult<MessageResponse> {
        let path = format!("/api/blog/posts/{}", post_id);
        let req = self.authorized(Method::DELETE, &path, token);
        self.send(req, "blog.delete").await
    }
}
