//! Data Transfer Objects
//!
//! Request and response types for the DupeTube API endpoints.
//! Records are deserialized leniently: missing or `null` fields fall back to
//! defaults so a partial record still renders.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ============================================
// AUTH DTOs
// ============================================

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Register request body
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Successful login/register response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

/// Authenticated user profile
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub wordpress_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_sync_enabled: bool,
}

// ============================================
// CHANNEL DTOs
// ============================================

/// A registered YouTube channel
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Channel {
    pub id: i64,
    /// YouTube-side channel identifier
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub channel_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subscriber_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub view_count: u64,
    #[serde(default)]
    pub indexed_at: Option<String>,
    #[serde(default)]
    pub last_sync: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddChannelRequest {
    pub channel_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddChannelResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub channel: Channel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub channels: Vec<Channel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub indexed_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_videos: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_created_posts: u64,
}

// ============================================
// VIDEO DTOs
// ============================================

/// An indexed video
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Video {
    pub id: i64,
    /// YouTube-side video identifier
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub like_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment_count: u64,
    #[serde(default)]
    pub published_at: Option<String>,
    /// JSON-encoded list of tags
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blog_ready: bool,
}

impl Video {
    /// Decode the tag list; tags that are not a JSON string array are ignored
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoEnvelope {
    pub video: Video,
}

/// Query string of `GET /api/videos/`; unset fields use the server defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VideoQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Only videos of this channel (local channel id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<i64>,
}

impl VideoQuery {
    pub fn for_channel(channel_id: i64) -> Self {
        Self {
            channel_id: Some(channel_id),
            ..Default::default()
        }
    }

    pub fn with_page(self, page: u32) -> Self {
        Self {
            page: Some(page),
            ..self
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessVideoResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub video: Option<Video>,
}

/// One content idea derived from a video
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Suggestion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// Book, course and blog post ideas for a video
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ContentSuggestions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub book_suggestions: Vec<Suggestion>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_suggestions: Vec<Suggestion>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blog_post_ideas: Vec<Suggestion>,
}

impl ContentSuggestions {
    pub fn is_empty(&self) -> bool {
        self.book_suggestions.is_empty()
            && self.course_suggestions.is_empty()
            && self.blog_post_ideas.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionsEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: ContentSuggestions,
}

// ============================================
// BLOG DTOs
// ============================================

/// Publication state of a blog post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Scheduled,
    #[serde(other)]
    Unknown,
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Draft
    }
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "scheduled" => Ok(PostStatus::Scheduled),
            other => Err(format!(
                "unknown post status '{}' (expected draft, published or scheduled)",
                other
            )),
        }
    }
}

/// A generated blog post
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BlogPost {
    pub id: i64,
    #[serde(default)]
    pub video_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: PostStatus,
    #[serde(default)]
    pub wordpress_post_id: Option<serde_json::Value>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GeneratePostRequest {
    pub video_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePostResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub post: Option<BlogPost>,
}

/// Query string of `GET /api/blog/posts`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PostQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl PostQuery {
    pub fn with_status(status: Option<PostStatus>) -> Self {
        Self { status, page: None }
    }

    pub fn with_page(self, page: u32) -> Self {
        Self {
            page: Some(page),
            ..self
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogPostList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub posts: Vec<BlogPost>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub post: BlogPost,
}

/// Partial update of a blog post; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlogPostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

impl BlogPostUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.excerpt.is_none()
            && self.status.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct BulkGenerateRequest {
    pub video_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkGenerateResponse {
    #[serde(default)]
    pub message: Option<String>,
    /// Posts created by this call; videos that already had one are skipped
    #[serde(default, deserialize_with = "null_as_default")]
    pub posts: Vec<BlogPost>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub wordpress_post_id: Option<serde_json::Value>,
    #[serde(default)]
    pub post: Option<BlogPost>,
}

// ============================================
// SHARED DTOs
// ============================================

/// Plain acknowledgement body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Page metadata returned by list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub pages: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_next: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_prev: bool,
}

/// Body of a non-2xx response
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
