//! DupeTube REST API
//!
//! Client side of the DupeTube backend, which owns channels, videos and blog
//! posts. The controller talks to it through the [`DupeTubeApi`] trait so it
//! can be driven by the HTTP client or by a test double.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /api/auth/login`
//! - `POST /api/auth/register`
//!
//! ## Channels
//! - `GET /api/channels/` - List channels
//! - `POST /api/channels/` - Add a channel
//! - `POST /api/channels/:id/index` - Index every video of a channel
//! - `POST /api/channels/:id/sync` - Pick up new videos
//!
//! ## Videos
//! - `GET /api/videos/` - List videos (`?page=&per_page=&channel_id=`)
//! - `GET /api/videos/search` - Search titles, descriptions and tags (`?q=&page=`)
//! - `GET /api/videos/:id` - Video detail
//! - `POST /api/videos/:id/process` - Extract transcript and summary
//! - `GET /api/videos/:id/suggestions` - Book, course and blog post ideas
//!
//! ## Blog
//! - `POST /api/blog/generate` - Generate a post from a video
//! - `POST /api/blog/bulk-generate` - Generate posts for several videos
//! - `GET /api/blog/posts` - List posts (`?status=&page=`)
//! - `GET /api/blog/posts/:id` - Post detail
//! - `PUT /api/blog/posts/:id` - Update a post
//! - `POST /api/blog/posts/:id/publish` - Publish to WordPress
//! - `DELETE /api/blog/posts/:id` - Delete a post

mod client;
pub mod dto;
pub mod error;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{ApiClient, ClientConfig};
pub use dto::*;
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

/// Operations the dashboard needs from the backend.
///
/// Authenticated calls take the bearer token explicitly; the API layer keeps
/// no session of its own.
#[async_trait]
pub trait DupeTubeApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse>;

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse>;

    async fn add_channel(&self, token: &str, channel_url: &str) -> ApiResult<AddChannelResponse>;

    async fn list_channels(&self, token: &str) -> ApiResult<ChannelList>;

    async fn index_channel(&self, token: &str, channel_id: i64) -> ApiResult<IndexResponse>;

    async fn sync_channel(&self, token: &str, channel_id: i64) -> ApiResult<SyncResponse>;

    async fn list_videos(&self, token: &str, query: &VideoQuery) -> ApiResult<VideoList>;

    async fn search_videos(&self, token: &str, query: &str, page: u32)
        -> ApiResult<SearchResults>;

    async fn get_video(&self, token: &str, video_id: i64) -> ApiResult<VideoEnvelope>;

    async fn process_video(&self, token: &str, video_id: i64) -> ApiResult<ProcessVideoResponse>;

    async fn video_suggestions(&self, token: &str, video_id: i64)
        -> ApiResult<SuggestionsEnvelope>;

    async fn generate_blog_post(&self, token: &str, video_id: i64)
        -> ApiResult<GeneratePostResponse>;

    async fn bulk_generate_blog_posts(
        &self,
        token: &str,
        video_ids: &[i64],
    ) -> ApiResult<BulkGenerateResponse>;

    async fn list_blog_posts(&self, token: &str, query: &PostQuery) -> ApiResult<BlogPostList>;

    async fn get_blog_post(&self, token: &str, post_id: i64) -> ApiResult<PostEnvelope>;

    async fn update_blog_post(
        &self,
        token: &str,
        post_id: i64,
        update: &BlogPostUpdate,
    ) -> ApiResult<PostEnvelope>;

    async fn publish_blog_post(&self, token: &str, post_id: i64) -> ApiResult<PublishResponse>;

    async fn delete_blog_post(&self, token: &str, post_id: i64) -> ApiResult<MessageResponse>;
}
