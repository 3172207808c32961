//! In-memory [`DupeTubeApi`] used by controller tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::dto::*;
use super::error::ApiResult;
use super::DupeTubeApi;

/// Canned responses, one per endpoint
pub(crate) struct FakeResponses {
    pub auth: ApiResult<AuthResponse>,
    pub add_channel: ApiResult<AddChannelResponse>,
    pub channels: ApiResult<ChannelList>,
    pub index: ApiResult<IndexResponse>,
    pub sync: ApiResult<SyncResponse>,
    pub videos: ApiResult<VideoList>,
    pub search: ApiResult<SearchResults>,
    pub video: ApiResult<VideoEnvelope>,
    pub process: ApiResult<ProcessVideoResponse>,
    pub suggestions: ApiResult<SuggestionsEnvelope>,
    pub generate: ApiResult<GeneratePostResponse>,
    pub bulk_generate: ApiResult<BulkGenerateResponse>,
    pub posts: ApiResult<BlogPostList>,
    pub post: ApiResult<PostEnvelope>,
    pub publish: ApiResult<PublishResponse>,
    pub delete: ApiResult<MessageResponse>,
}

pub(crate) fn user(id: i64, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        email: Some(format!("{}@example.com", username)),
        created_at: None,
        wordpress_url: None,
        auto_sync_enabled: false,
    }
}

pub(crate) fn channel(id: i64, title: &str) -> Channel {
    Channel {
        id,
        channel_id: Some(format!("UC{}", id)),
        channel_url: None,
        title: title.to_string(),
        description: Some(format!("About {}", title)),
        subscriber_count: 1000,
        video_count: 5,
        view_count: 100_000,
        indexed_at: None,
        last_sync: None,
    }
}

pub(crate) fn video(id: i64, title: &str) -> Video {
    Video {
        id,
        video_id: Some(format!("vid{}", id)),
        title: title.to_string(),
        description: None,
        thumbnail_url: Some(format!("https://img.example.com/{}.jpg", id)),
        duration: Some("PT10M".to_string()),
        view_count: 1234,
        like_count: 56,
        comment_count: 7,
        published_at: Some("2024-03-05T10:00:00".to_string()),
        tags: None,
        summary: None,
        blog_ready: false,
    }
}

pub(crate) fn pagination(page: u32, pages: u32) -> Pagination {
    Pagination {
        page,
        per_page: 20,
        total: u64::from(pages) * 20,
        pages,
        has_next: page < pages,
        has_prev: page > 1,
    }
}

pub(crate) fn post(id: i64, title: &str, status: PostStatus) -> BlogPost {
    BlogPost {
        id,
        video_id: Some(1),
        title: title.to_string(),
        content: "Body".to_string(),
        excerpt: Some("Excerpt".to_string()),
        status,
        wordpress_post_id: None,
        published_at: None,
        created_at: Some("2024-03-06T09:30:00".to_string()),
        updated_at: None,
    }
}

impl Default for FakeResponses {
    fn default() -> Self {
        Self {
            auth: Ok(AuthResponse {
                access_token: "tok-1".to_string(),
                user: user(1, "ada"),
            }),
            add_channel: Ok(AddChannelResponse {
                message: Some("Channel added successfully".to_string()),
                channel: channel(42, "New Channel"),
            }),
            channels: Ok(ChannelList { channels: Vec::new() }),
            index: Ok(IndexResponse {
                message: None,
                indexed_count: 12,
            }),
            sync: Ok(SyncResponse {
                message: None,
                new_videos: 3,
                auto_created_posts: 0,
            }),
            videos: Ok(VideoList {
                videos: Vec::new(),
                pagination: None,
            }),
            search: Ok(SearchResults {
                videos: Vec::new(),
                pagination: None,
                query: String::new(),
            }),
            video: Ok(VideoEnvelope {
                video: video(1, "First video"),
            }),
            process: Ok(ProcessVideoResponse {
                message: Some("Video processed successfully".to_string()),
                video: None,
            }),
            suggestions: Ok(SuggestionsEnvelope {
                suggestions: ContentSuggestions::default(),
            }),
            generate: Ok(GeneratePostResponse {
                message: None,
                post: None,
            }),
            bulk_generate: Ok(BulkGenerateResponse {
                message: None,
                posts: Vec::new(),
            }),
            posts: Ok(BlogPostList {
                posts: Vec::new(),
                pagination: None,
            }),
            post: Ok(PostEnvelope {
                message: None,
                post: post(1, "First post", PostStatus::Draft),
            }),
            publish: Ok(PublishResponse {
                message: None,
                wordpress_post_id: None,
                post: None,
            }),
            delete: Ok(MessageResponse::default()),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeApi {
    responses: Mutex<FakeResponses>,
    calls: Mutex<Vec<String>>,
    tokens: Mutex<Vec<(String, String)>>,
    video_gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjust the canned responses
    pub fn respond(&self, f: impl FnOnce(&mut FakeResponses)) {
        f(&mut self.responses.lock().unwrap());
    }

    /// Calls received so far, e.g. `"index_channel:42"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Bearer tokens seen by authenticated calls
    pub fn tokens(&self) -> Vec<String> {
        self.tokens
            .lock()
            .unwrap()
            .iter()
            .map(|(_, token)| token.clone())
            .collect()
    }

    /// Bearer token sent with the first call named `call`
    pub fn token_of(&self, call: &str) -> Option<String> {
        self.tokens
            .lock()
            .unwrap()
            .iter()
            .find(|(c, _)| c == call)
            .map(|(_, token)| token.clone())
    }

    /// Hold `list_videos` until the returned handle is notified
    pub fn gate_videos(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.video_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    fn record(&self, call: String, token: Option<&str>) {
        if let Some(token) = token {
            self.tokens
                .lock()
                .unwrap()
                .push((call.clone(), token.to_string()));
        }
        self.calls.lock().unwrap().push(call);
    }

    fn pick<T>(&self, f: impl FnOnce(&FakeResponses) -> T) -> T {
        f(&self.responses.lock().unwrap())
    }
}

/// `"name"` or `"name:a,b"`
fn with_params(name: &str, params: Vec<String>) -> String {
    if params.is_empty() {
        name.to_string()
    } else {
        format!("{}:{}", name, params.join(","))
    }
}

#[async_trait]
impl DupeTubeApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.record(format!("login:{}", request.username), None);
        self.pick(|r| r.auth.clone())
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.record(format!("register:{}", request.username), None);
        self.pick(|r| r.auth.clone())
    }

    async fn add_channel(&self, token: &str, channel_url: &str) -> ApiResult<AddChannelResponse> {
        self.record(format!("add_channel:{}", channel_url), Some(token));
        self.pick(|r| r.add_channel.clone())
    }

    async fn list_channels(&self, token: &str) -> ApiResult<ChannelList> {
        self.record("list_channels".to_string(), Some(token));
        self.pick(|r| r.channels.clone())
    }

    async fn index_channel(&self, token: &str, channel_id: i64) -> ApiResult<IndexResponse> {
        self.record(format!("index_channel:{}", channel_id), Some(token));
        self.pick(|r| r.index.clone())
    }

    async fn sync_channel(&self, token: &str, channel_id: i64) -> ApiResult<SyncResponse> {
        self.record(format!("sync_channel:{}", channel_id), Some(token));
        self.pick(|r| r.sync.clone())
    }

    async fn list_videos(&self, token: &str, query: &VideoQuery) -> ApiResult<VideoList> {
        let mut params = Vec::new();
        if let Some(page) = query.page {
            params.push(format!("page={}", page));
        }
        if let Some(per_page) = query.per_page {
            params.push(format!("per_page={}", per_page));
        }
        if let Some(channel_id) = query.channel_id {
            params.push(format!("channel_id={}", channel_id));
        }
        self.record(with_params("list_videos", params), Some(token));
        let gate = self.video_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.pick(|r| r.videos.clone())
    }

    async fn search_videos(
        &self,
        token: &str,
        query: &str,
        page: u32,
    ) -> ApiResult<SearchResults> {
        self.record(format!("search_videos:{}:{}", query, page), Some(token));
        self.pick(|r| r.search.clone())
    }

    async fn get_video(&self, token: &str, video_id: i64) -> ApiResult<VideoEnvelope> {
        self.record(format!("get_video:{}", video_id), Some(token));
        self.pick(|r| r.video.clone())
    }

    async fn process_video(&self, token: &str, video_id: i64) -> ApiResult<ProcessVideoResponse> {
        self.record(format!("process_video:{}", video_id), Some(token));
        self.pick(|r| r.process.clone())
    }

    async fn video_suggestions(
        &self,
        token: &str,
        video_id: i64,
    ) -> ApiResult<SuggestionsEnvelope> {
        self.record(format!("video_suggestions:{}", video_id), Some(token));
        self.pick(|r| r.suggestions.clone())
    }

    async fn generate_blog_post(
        &self,
        token: &str,
        video_id: i64,
    ) -> ApiResult<GeneratePostResponse> {
        self.record(format!("generate_blog_post:{}", video_id), Some(token));
        self.pick(|r| r.generate.clone())
    }

    async fn bulk_generate_blog_posts(
        &self,
        token: &str,
        video_ids: &[i64],
    ) -> ApiResult<BulkGenerateResponse> {
        let ids: Vec<String> = video_ids.iter().map(i64::to_string).collect();
        self.record(format!("bulk_generate:{}", ids.join(",")), Some(token));
        self.pick(|r| r.bulk_generate.clone())
    }

    async fn list_blog_posts(&self, token: &str, query: &PostQuery) -> ApiResult<BlogPostList> {
        let mut params = Vec::new();
        if let Some(status) = query.status {
            params.push(status.to_string());
        }
        if let Some(page) = query.page {
            params.push(format!("page={}", page));
        }
        self.record(with_params("list_blog_posts", params), Some(token));
        self.pick(|r| r.posts.clone())
    }

    async fn get_blog_post(&self, token: &str, post_id: i64) -> ApiResult<PostEnvelope> {
        self.record(format!("get_blog_post:{}", post_id), Some(token));
        self.pick(|r| r.post.clone())
    }

    async fn update_blog_post(
        &self,
        token: &str,
        post_id: i64,
        _update: &BlogPostUpdate,
    ) -> ApiResult<PostEnvelope> {
        self.record(format!("update_blog_post:{}", post_id), Some(token));
        self.pick(|r| r.post.clone())
    }

    async fn publish_blog_post(&self, token: &str, post_id: i64) -> ApiResult<PublishResponse> {
        self.record(format!("publish_blog_post:{}", post_id), Some(token));
        self.pick(|r| r.publish.clone())
    }

    async fn delete_blog_post(&self, token: &str, post_id: i64) -> ApiResult<MessageResponse> {
        self.record(format!("delete_blog_post:{}", post_id), Some(token));
        self.pick(|r| r.delete.clone())
    }
}
