//! Dashboard Controller
//!
//! Drives the dashboard: owns the session, the active view and the
//! notification region, and turns every user operation into at most one API
//! call plus its documented follow-ups.
//!
//! Every remote failure ends as a notification. Nothing is retried and
//! nothing is rolled back.
//!
//! ## Stale responses
//!
//! Each view switch starts a new generation. A fetch remembers the generation
//! it was started under and its result is dropped if the user has moved on
//! by the time it arrives.

use regex::Regex;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::{
    ApiError, BlogPostUpdate, DupeTubeApi, LoginRequest, PostQuery, PostStatus, RegisterRequest,
    User, VideoQuery,
};
use crate::notify::NotificationCenter;
use crate::session::{SessionManager, SessionStore};
use crate::view::{
    render_screen, ContentKind, DashboardContent, Loadable, Node, Screen, Section, ViewState,
};

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const REGISTER_SUCCESS: &str = "Registration successful!";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";
pub const LOGOUT_SUCCESS: &str = "Logged out successfully!";
pub const LOGIN_REQUIRED: &str = "Please log in to continue.";

pub const CHANNEL_URL_REQUIRED: &str = "Channel URL is required";
pub const CHANNEL_URL_INVALID: &str = "Invalid YouTube channel URL";
pub const CHANNEL_ADDED: &str = "Channel added successfully!";
pub const ADD_CHANNEL_FAILED: &str = "Failed to add channel. Please try again.";
pub const INDEXING: &str = "Indexing videos... This may take a moment.";
pub const INDEX_FAILED: &str = "Failed to index videos. Please try again.";
pub const SYNCING: &str = "Syncing channel... Checking for new videos.";
pub const SYNC_FAILED: &str = "Failed to sync channel. Please try again.";

pub const SEARCH_QUERY_REQUIRED: &str = "Search query is required";
pub const PROCESSING: &str = "Processing video... Extracting transcript and summary.";
pub const VIDEO_PROCESSED: &str = "Video processed successfully!";
pub const PROCESS_FAILED: &str = "Failed to process video. Please try again.";

pub const GENERATING: &str = "Generating blog post... This may take a moment.";
pub const GENERATED: &str = "Blog post generated successfully!";
pub const GENERATE_FAILED: &str = "Failed to generate blog post. Please try again.";
pub const VIDEOS_REQUIRED: &str = "Select at least one video.";
pub const BULK_GENERATING: &str = "Generating blog posts... This may take a moment.";
pub const BULK_GENERATE_FAILED: &str = "Failed to generate blog posts. Please try again.";
pub const PUBLISHING: &str = "Publishing to WordPress...";
pub const PUBLISHED: &str = "Blog post published successfully!";
pub const PUBLISH_FAILED: &str = "Failed to publish blog post. Please try again.";
pub const POST_UPDATED: &str = "Blog post updated successfully!";
pub const UPDATE_FAILED: &str = "Failed to update blog post. Please try again.";
pub const NOTHING_TO_SAVE: &str = "No changes to save.";
pub const POST_DELETED: &str = "Blog post deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete blog post. Please try again.";

/// Optional scheme, any youtube.com subdomain, then one of the channel path
/// shapes. Anything may follow the name after `/`, `?` or `#`.
const CHANNEL_URL_PATTERN: &str = r"(?i)^(?:https?://)?(?:[a-z0-9-]+\.)*youtube\.com/(?:(?:channel|c|user)/[a-z0-9_-]+|@[a-z0-9_.-]+)(?:[/?#].*)?$";

fn channel_url_regex() -> &'static Regex {
    static CHANNEL_URL_RE: OnceLock<Regex> = OnceLock::new();
    CHANNEL_URL_RE.get_or_init(|| Regex::new(CHANNEL_URL_PATTERN).expect("channel URL pattern"))
}

/// Check a channel URL before it is sent to the server.
///
/// Returns the message to show when the URL is unusable.
pub fn validate_channel_url(url: &str) -> Result<(), &'static str> {
    let url = url.trim();
    if url.is_empty() {
        return Err(CHANNEL_URL_REQUIRED);
    }

    if channel_url_regex().is_match(url) {
        Ok(())
    } else {
        Err(CHANNEL_URL_INVALID)
    }
}

/// Session and view controller. Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct DashboardController {
    api: Arc<dyn DupeTubeApi>,
    session: Arc<RwLock<SessionManager>>,
    view: Arc<RwLock<ViewState>>,
    notifications: NotificationCenter,
    /// Fire-and-forget work started by actions (indexing after add)
    background: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl DashboardController {
    /// Create a controller, restoring any session held by `store`
    pub fn new(
        api: Arc<dyn DupeTubeApi>,
        store: Box<dyn SessionStore>,
        notification_ttl: Duration,
    ) -> Self {
        Self {
            api,
            session: Arc::new(RwLock::new(SessionManager::restore(store))),
            view: Arc::new(RwLock::new(ViewState::default())),
            notifications: NotificationCenter::new(notification_ttl),
            background: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    pub async fn user(&self) -> Option<User> {
        self.session.read().await.user().cloned()
    }

    /// Open the dashboard for a restored session, the welcome view otherwise
    pub async fn init(&self) {
        if self.is_authenticated().await {
            self.show_dashboard().await;
        } else {
            self.show_welcome().await;
        }
    }

    // ============================================
    // AUTH
    // ============================================

    pub async fn login(&self, username: &str, password: &str) -> bool {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        match self.api.login(&request).await {
            Ok(auth) => {
                self.authenticate(auth.access_token, auth.user, LOGIN_SUCCESS)
                    .await;
                true
            }
            Err(e) => {
                self.report(&e, LOGIN_FAILED).await;
                false
            }
        }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> bool {
        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.api.register(&request).await {
            Ok(auth) => {
                self.authenticate(auth.access_token, auth.user, REGISTER_SUCCESS)
                    .await;
                true
            }
            Err(e) => {
                self.report(&e, REGISTER_FAILED).await;
                false
            }
        }
    }

    async fn authenticate(&self, token: String, user: User, message: &str) {
        tracing::info!(user = %user.username, "Signed in");
        if let Err(e) = self.session.write().await.establish(token, user) {
            tracing::warn!(error = %e, "Failed to persist session");
        }

        self.notifications.success(message).await;
        self.show_dashboard().await;
    }

    /// Drop the session unconditionally and return to the welcome view
    pub async fn logout(&self) {
        if let Err(e) = self.session.write().await.clear() {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }

        self.show_welcome().await;
        self.notifications.info(LOGOUT_SUCCESS).await;
    }

    /// Token of the current session. Without one the user is sent to the
    /// login view.
    async fn require_token(&self) -> Option<String> {
        let token = self.session.read().await.token().map(str::to_string);
        if token.is_none() {
            tracing::debug!("Action needs a session");
            self.notifications.warning(LOGIN_REQUIRED).await;
            self.show_login().await;
        }
        token
    }

    async fn report(&self, error: &ApiError, fallback: &str) {
        tracing::debug!(error = %error, "Request failed");
        self.notifications
            .danger(error.user_message(fallback))
            .await;
    }

    // ============================================
    // TOP-LEVEL VIEWS
    // ============================================

    pub async fn show_welcome(&self) {
        self.view.write().await.show_section(Section::Welcome);
    }

    pub async fn show_login(&self) {
        self.view.write().await.show_section(Section::Login);
    }

    pub async fn show_register(&self) {
        self.view.write().await.show_section(Section::Register);
    }

    /// Open the dashboard on its onboarding sub-view
    pub async fn show_dashboard(&self) {
        self.show_onboarding().await;
    }

    // ============================================
    // DASHBOARD SUB-VIEWS
    // ============================================

    /// Start a sub-view with a loading placeholder, returning its generation
    async fn begin(&self, content: DashboardContent) -> u64 {
        self.view.write().await.begin(content)
    }

    /// Write a fetch result into the view if its generation is still current
    async fn settle(&self, generation: u64, apply: impl FnOnce(&mut DashboardContent)) -> bool {
        let mut view = self.view.write().await;
        if !view.is_current(generation) {
            tracing::debug!(
                generation,
                current = view.generation,
                "Discarding response for a superseded view"
            );
            return false;
        }

        apply(&mut view.content);
        true
    }

    pub async fn show_onboarding(&self) {
        let Some(token) = self.require_token().await else {
            return;
        };

        let generation = self
            .begin(DashboardContent::Onboarding {
                channels: Loadable::Loading,
            })
            .await;
        let result = self.api.list_channels(&token).await.map(|l| l.channels);

        self.settle(generation, |content| {
            if let DashboardContent::Onboarding { channels } = content {
                *channels = Loadable::from_result(result);
            }
        })
        .await;
    }

    pub async fn show_channels(&self) {
        let Some(token) = self.require_token().await else {
            return;
        };

        let generation = self
            .begin(DashboardContent::Channels {
                channels: Loadable::Loading,
            })
            .await;
        let result = self.api.list_channels(&token).await.map(|l| l.channels);

        self.settle(generation, |content| {
            if let DashboardContent::Channels { channels } = content {
                *channels = Loadable::from_result(result);
            }
        })
        .await;
    }

    /// First page of every video
    pub async fn show_videos(&self) {
        self.show_video_list(VideoQuery::default()).await;
    }

    /// Videos of one channel
    pub async fn show_channel_videos(&self, channel_id: i64) {
        self.show_video_list(VideoQuery::for_channel(channel_id)).await;
    }

    /// One page of the video list
    pub async fn show_video_list(&self, query: VideoQuery) {
        let Some(token) = self.require_token().await else {
            return;
        };

        let generation = self
            .begin(DashboardContent::Videos {
                query,
                videos: Loadable::Loading,
                pagination: None,
            })
            .await;
        let result = self.api.list_videos(&token, &query).await;

        self.settle(generation, |content| {
            if let DashboardContent::Videos {
                videos, pagination, ..
            } = content
            {
                *pagination = result.as_ref().ok().and_then(|l| l.pagination.clone());
                *videos = Loadable::from_result(result.map(|l| l.videos));
            }
        })
        .await;
    }

    /// Search video titles, descriptions and tags
    pub async fn search_videos(&self, query: &str, page: u32) {
        let query = query.trim();
        if query.is_empty() {
            self.notifications.warning(SEARCH_QUERY_REQUIRED).await;
            return;
        }
        let Some(token) = self.require_token().await else {
            return;
        };

        let page = page.max(1);
        let generation = self
            .begin(DashboardContent::SearchResults {
                query: query.to_string(),
                page,
                videos: Loadable::Loading,
                pagination: None,
            })
            .await;
        let result = self.api.search_videos(&token, query, page).await;

        self.settle(generation, |content| {
            if let DashboardContent::SearchResults {
                videos, pagination, ..
            } = content
            {
                *pagination = result.as_ref().ok().and_then(|r| r.pagination.clone());
                *videos = Loadable::from_result(result.map(|r| r.videos));
            }
        })
        .await;
    }

    /// Blog post list, optionally limited to one status
    pub async fn show_blog_posts(&self, filter: Option<PostStatus>) {
        self.show_post_list(PostQuery::with_status(filter)).await;
    }

    /// One page of the blog post list
    pub async fn show_post_list(&self, query: PostQuery) {
        let Some(token) = self.require_token().await else {
            return;
        };

        let generation = self
            .begin(DashboardContent::BlogPosts {
                query,
                posts: Loadable::Loading,
                pagination: None,
            })
            .await;
        let result = self.api.list_blog_posts(&token, &query).await;

        self.settle(generation, |content| {
            if let DashboardContent::BlogPosts {
                posts, pagination, ..
            } = content
            {
                *pagination = result.as_ref().ok().and_then(|l| l.pagination.clone());
                *posts = Loadable::from_result(result.map(|l| l.posts));
            }
        })
        .await;
    }

    /// Move the paged list on screen to `page`, keeping its filters
    pub async fn go_to_page(&self, page: u32) {
        let page = page.max(1);
        let content = self.view.read().await.content.clone();

        match content {
            DashboardContent::Videos { query, .. } => {
                self.show_video_list(query.with_page(page)).await
            }
            DashboardContent::SearchResults { query, .. } => {
                self.search_videos(&query, page).await
            }
            DashboardContent::BlogPosts { query, .. } => {
                self.show_post_list(query.with_page(page)).await
            }
            other => tracing::debug!(kind = ?other.kind(), "No paged list on screen"),
        }
    }

    pub async fn view_video(&self, video_id: i64) {
        let Some(token) = self.require_token().await else {
            return;
        };

        let generation = self
            .begin(DashboardContent::VideoDetail {
                video_id,
                video: Loadable::Loading,
            })
            .await;
        let result = self.api.get_video(&token, video_id).await.map(|v| v.video);

        self.settle(generation, |content| {
            if let DashboardContent::VideoDetail { video, .. } = content {
                *video = Loadable::from_result(result);
            }
        })
        .await;
    }

    /// Book, course and blog post ideas for a video
    pub async fn show_suggestions(&self, video_id: i64) {
        let Some(token) = self.require_token().await else {
            return;
        };

        let generation = self
            .begin(DashboardContent::Suggestions {
                video_id,
                suggestions: Loadable::Loading,
            })
            .await;
        let result = self
            .api
            .video_suggestions(&token, video_id)
            .await
            .map(|s| s.suggestions);

        self.settle(generation, |content| {
            if let DashboardContent::Suggestions { suggestions, .. } = content {
                *suggestions = Loadable::from_result(result);
            }
        })
        .await;
    }

    /// Open the editor for one post
    pub async fn edit_blog_post(&self, post_id: i64) {
        let Some(token) = self.require_token().await else {
            return;
        };

        let generation = self
            .begin(DashboardContent::PostEditor {
                post_id,
                post: Loadable::Loading,
            })
            .await;
        let result = self
            .api
            .get_blog_post(&token, post_id)
            .await
            .map(|p| p.post);

        self.settle(generation, |content| {
            if let DashboardContent::PostEditor { post, .. } = content {
                *post = Loadable::from_result(result);
            }
        })
        .await;
    }

    async fn content_kind(&self) -> ContentKind {
        self.view.read().await.content.kind()
    }

    /// Re-fetch the channel list of the current sub-view, if it shows one
    pub async fn load_channels(&self) {
        match self.content_kind().await {
            ContentKind::Onboarding => self.show_onboarding().await,
            ContentKind::Channels => self.show_channels().await,
            kind => tracing::debug!(?kind, "No channel list on screen"),
        }
    }

    /// Re-fetch the video list or search results on screen, same page
    pub async fn load_videos(&self) {
        let content = self.view.read().await.content.clone();
        match content {
            DashboardContent::Videos { query, .. } => self.show_video_list(query).await,
            DashboardContent::SearchResults { query, page, .. } => {
                self.search_videos(&query, page).await
            }
            other => tracing::debug!(kind = ?other.kind(), "No video list on screen"),
        }
    }

    /// Re-fetch the blog post list if it is on screen, keeping its filter
    /// and page
    pub async fn load_blog_posts(&self) {
        let query = match &self.view.read().await.content {
            DashboardContent::BlogPosts { query, .. } => Some(*query),
            _ => None,
        };

        match query {
            Some(query) => self.show_post_list(query).await,
            None => tracing::debug!("No blog post list on screen"),
        }
    }

    // ============================================
    // ACTIONS
    // ============================================

    /// Register a channel, then index it in the background.
    ///
    /// Indexing is best-effort: its outcome is reported on its own and a
    /// failure does not undo the add. It runs with the token the channel was
    /// added with, whatever happens to the session meanwhile.
    pub async fn add_channel(&self, channel_url: &str) -> bool {
        if let Err(message) = validate_channel_url(channel_url) {
            self.notifications.danger(message).await;
            return false;
        }
        let Some(token) = self.require_token().await else {
            return false;
        };

        match self.api.add_channel(&token, channel_url.trim()).await {
            Ok(response) => {
                self.notifications.success(CHANNEL_ADDED).await;
                self.spawn_indexing(token, response.channel.id).await;
                self.load_channels().await;
                true
            }
            Err(e) => {
                self.report(&e, ADD_CHANNEL_FAILED).await;
                false
            }
        }
    }

    async fn spawn_indexing(&self, token: String, channel_id: i64) {
        let controller = self.clone();
        let handle = tokio::spawn(async move {
            controller.index_with_token(&token, channel_id).await;
        });
        self.background.lock().await.push(handle);
    }

    /// Wait for every background task started so far, including ones they
    /// start themselves
    pub async fn wait_for_background(&self) {
        loop {
            let handles = std::mem::take(&mut *self.background.lock().await);
            if handles.is_empty() {
                return;
            }

            for handle in handles {
                if let Err(e) = handle.await {
                    tracing::warn!(error = %e, "Background task failed");
                }
            }
        }
    }

    pub async fn index_channel_videos(&self, channel_id: i64) -> bool {
        let Some(token) = self.require_token().await else {
            return false;
        };
        self.index_with_token(&token, channel_id).await
    }

    /// Index a channel without touching the session or the view
    async fn index_with_token(&self, token: &str, channel_id: i64) -> bool {
        self.notifications.info(INDEXING).await;

        match self.api.index_channel(token, channel_id).await {
            Ok(response) => {
                self.notifications
                    .success(format!(
                        "Indexed {} videos successfully!",
                        response.indexed_count
                    ))
                    .await;
                true
            }
            Err(e) => {
                self.report(&e, INDEX_FAILED).await;
                false
            }
        }
    }

    pub async fn sync_channel(&self, channel_id: i64) -> bool {
        let Some(token) = self.require_token().await else {
            return false;
        };
        self.notifications.info(SYNCING).await;

        match self.api.sync_channel(&token, channel_id).await {
            Ok(response) => {
                let mut message = format!("Synced {} new videos.", response.new_videos);
                if response.auto_created_posts > 0 {
                    message.push_str(&format!(
                        " {} blog posts auto-created.",
                        response.auto_created_posts
                    ));
                }
                self.notifications.success(message).await;
                true
            }
            Err(e) => {
                self.report(&e, SYNC_FAILED).await;
                false
            }
        }
    }

    /// Extract transcript and summary of a video. An open detail view of
    /// that video is updated in place.
    pub async fn process_video(&self, video_id: i64) -> bool {
        let Some(token) = self.require_token().await else {
            return false;
        };
        self.notifications.info(PROCESSING).await;

        match self.api.process_video(&token, video_id).await {
            Ok(response) => {
                self.notifications.success(VIDEO_PROCESSED).await;
                if let Some(processed) = response.video {
                    let mut view = self.view.write().await;
                    if let DashboardContent::VideoDetail {
                        video_id: shown,
                        video,
                    } = &mut view.content
                    {
                        if *shown == video_id {
                            *video = Loadable::Ready(processed);
                        }
                    }
                }
                true
            }
            Err(e) => {
                self.report(&e, PROCESS_FAILED).await;
                false
            }
        }
    }

    /// Generate posts for several videos and switch to the post list.
    /// Videos that already have a post are skipped by the server.
    pub async fn bulk_generate_blog_posts(&self, video_ids: &[i64]) -> bool {
        if video_ids.is_empty() {
            self.notifications.warning(VIDEOS_REQUIRED).await;
            return false;
        }
        let Some(token) = self.require_token().await else {
            return false;
        };
        self.notifications.info(BULK_GENERATING).await;

        match self.api.bulk_generate_blog_posts(&token, video_ids).await {
            Ok(response) => {
                self.notifications
                    .success(format!(
                        "Generated {} blog posts successfully!",
                        response.posts.len()
                    ))
                    .await;
                self.show_blog_posts(None).await;
                true
            }
            Err(e) => {
                self.report(&e, BULK_GENERATE_FAILED).await;
                false
            }
        }
    }

    /// Generate a post from a video and switch to the post list
    pub async fn generate_blog_post(&self, video_id: i64) -> bool {
        let Some(token) = self.require_token().await else {
            return false;
        };
        self.notifications.info(GENERATING).await;

        match self.api.generate_blog_post(&token, video_id).await {
            Ok(_) => {
                self.notifications.success(GENERATED).await;
                self.show_blog_posts(None).await;
                true
            }
            Err(e) => {
                self.report(&e, GENERATE_FAILED).await;
                false
            }
        }
    }

    pub async fn publish_blog_post(&self, post_id: i64) -> bool {
        let Some(token) = self.require_token().await else {
            return false;
        };
        self.notifications.info(PUBLISHING).await;

        match self.api.publish_blog_post(&token, post_id).await {
            Ok(_) => {
                self.notifications.success(PUBLISHED).await;
                self.load_blog_posts().await;
                true
            }
            Err(e) => {
                self.report(&e, PUBLISH_FAILED).await;
                false
            }
        }
    }

    /// Send edits for a post and return to the post list
    pub async fn save_blog_post(&self, post_id: i64, update: &BlogPostUpdate) -> bool {
        if update.is_empty() {
            self.notifications.info(NOTHING_TO_SAVE).await;
            return false;
        }
        let Some(token) = self.require_token().await else {
            return false;
        };

        match self.api.update_blog_post(&token, post_id, update).await {
            Ok(_) => {
                self.notifications.success(POST_UPDATED).await;
                self.show_blog_posts(None).await;
                true
            }
            Err(e) => {
                self.report(&e, UPDATE_FAILED).await;
                false
            }
        }
    }

    pub async fn delete_blog_post(&self, post_id: i64) -> bool {
        let Some(token) = self.require_token().await else {
            return false;
        };

        match self.api.delete_blog_post(&token, post_id).await {
            Ok(_) => {
                self.notifications.success(POST_DELETED).await;
                self.load_blog_posts().await;
                true
            }
            Err(e) => {
                self.report(&e, DELETE_FAILED).await;
                false
            }
        }
    }

    pub async fn dismiss_notification(&self, id: Uuid) -> bool {
        self.notifications.dismiss(id).await
    }

    // ============================================
    // RENDERING
    // ============================================

    /// Snapshot of everything on screen
    pub async fn screen(&self) -> Screen {
        let (section, content) = {
            let view = self.view.read().await;
            (view.section, view.content.clone())
        };

        Screen {
            section,
            user: self.user().await,
            content,
            notifications: self.notifications.snapshot().await,
        }
    }

    pub async fn render(&self) -> Node {
        render_screen(&self.screen().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{self, FakeApi};
    use crate::api::{
        ApiError, AuthResponse, BlogPostList, BulkGenerateResponse, ChannelList, IndexResponse,
        ProcessVideoResponse, SearchResults, SyncResponse, VideoList,
    };
    use crate::notify::DEFAULT_TTL;
    use crate::session::{MemoryStore, TOKEN_KEY, USER_KEY};
    use crate::view::render::{NO_POSTS, NO_VIDEOS, VIDEOS_REJECTED};

    fn setup() -> (DashboardController, Arc<FakeApi>, Arc<MemoryStore>) {
        let api = Arc::new(FakeApi::new());
        let store = Arc::new(MemoryStore::new());
        let controller =
            DashboardController::new(api.clone(), Box::new(Arc::clone(&store)), DEFAULT_TTL);
        (controller, api, store)
    }

    fn signed_in() -> (DashboardController, Arc<FakeApi>, Arc<MemoryStore>) {
        let api = Arc::new(FakeApi::new());
        let store = Arc::new(MemoryStore::new());
        let user = serde_json::to_string(&fake::user(1, "ada")).unwrap();
        store
            .set_items(&[(TOKEN_KEY, "tok-1"), (USER_KEY, user.as_str())])
            .unwrap();

        let controller =
            DashboardController::new(api.clone(), Box::new(Arc::clone(&store)), DEFAULT_TTL);
        (controller, api, store)
    }

    fn rejected(message: &str) -> ApiError {
        ApiError::ServerRejected {
            status: 400,
            message: message.to_string(),
        }
    }

    fn unreachable() -> ApiError {
        ApiError::Unreachable("connection refused".to_string())
    }

    async fn messages(controller: &DashboardController) -> Vec<String> {
        controller.notifications().messages().await
    }

    #[tokio::test]
    async fn test_init_without_session_shows_welcome() {
        let (controller, api, _) = setup();
        controller.init().await;

        let screen = controller.screen().await;
        assert_eq!(screen.section, Section::Welcome);
        assert!(!screen.logged_in());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_init_with_session_opens_dashboard() {
        let (controller, api, _) = signed_in();
        controller.init().await;

        let screen = controller.screen().await;
        assert_eq!(screen.section, Section::Dashboard);
        assert_eq!(screen.content.kind(), ContentKind::Onboarding);
        assert_eq!(screen.user.map(|u| u.username), Some("ada".to_string()));
        assert_eq!(api.calls(), vec!["list_channels"]);
        assert_eq!(api.tokens(), vec!["tok-1"]);
    }

    #[tokio::test]
    async fn test_login_success_persists_and_opens_dashboard() {
        let (controller, api, store) = setup();
        controller.show_login().await;

        assert!(controller.login("ada", "secret").await);

        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
        assert!(store.get(USER_KEY).unwrap().is_some());
        let screen = controller.screen().await;
        assert_eq!(screen.section, Section::Dashboard);
        assert!(screen.logged_in());
        assert_eq!(messages(&controller).await, vec![LOGIN_SUCCESS]);
        assert_eq!(api.calls(), vec!["login:ada", "list_channels"]);
    }

    #[tokio::test]
    async fn test_login_rejection_keeps_view_and_store() {
        let (controller, api, store) = setup();
        api.respond(|r| r.auth = Err(rejected("Invalid username or password")));
        controller.show_login().await;

        assert!(!controller.login("ada", "wrong").await);

        assert!(store.is_empty());
        assert!(!controller.is_authenticated().await);
        assert_eq!(controller.screen().await.section, Section::Login);
        assert_eq!(
            messages(&controller).await,
            vec!["Invalid username or password"]
        );
    }

    #[tokio::test]
    async fn test_login_unreachable_shows_retry_message() {
        let (controller, api, _) = setup();
        api.respond(|r| r.auth = Err(unreachable()));

        controller.login("ada", "secret").await;
        assert_eq!(messages(&controller).await, vec![LOGIN_FAILED]);
    }

    #[tokio::test]
    async fn test_register() {
        let (controller, api, store) = setup();
        controller.show_register().await;

        assert!(controller.register("ada", "ada@example.com", "pw").await);
        assert_eq!(store.len(), 2);
        assert_eq!(messages(&controller).await, vec![REGISTER_SUCCESS]);
        assert_eq!(api.calls()[0], "register:ada");

        api.respond(|r| r.auth = Err(unreachable()));
        assert!(!controller.register("bob", "bob@example.com", "pw").await);
        assert!(messages(&controller).await.contains(&REGISTER_FAILED.to_string()));
    }

    #[tokio::test]
    async fn test_register_rejection_keeps_store() {
        let (controller, api, store) = setup();
        api.respond(|r| r.auth = Err(rejected("Username already exists")));
        controller.show_register().await;

        assert!(!controller.register("ada", "ada@example.com", "pw").await);

        assert!(store.is_empty());
        assert!(!controller.is_authenticated().await);
        assert_eq!(controller.screen().await.section, Section::Register);
        assert_eq!(messages(&controller).await, vec!["Username already exists"]);

        // A signed-in session survives a rejected registration too
        let (controller, api, store) = signed_in();
        api.respond(|r| r.auth = Err(rejected("Email already registered")));
        assert!(!controller.register("bob", "ada@example.com", "pw").await);
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
        assert_eq!(controller.user().await.map(|u| u.username), Some("ada".to_string()));
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let (controller, _, store) = signed_in();
        controller.init().await;

        controller.logout().await;

        assert!(store.is_empty());
        assert!(controller.user().await.is_none());
        let screen = controller.screen().await;
        assert_eq!(screen.section, Section::Welcome);
        assert_eq!(screen.content, DashboardContent::Empty);
        assert_eq!(messages(&controller).await, vec![LOGOUT_SUCCESS]);

        // Logging out without a session is harmless
        controller.logout().await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_add_channel_triggers_indexing() {
        let (controller, api, _) = signed_in();
        controller.show_onboarding().await;

        assert!(
            controller
                .add_channel("https://www.youtube.com/@newchannel")
                .await
        );
        controller.wait_for_background().await;

        let calls = api.calls();
        assert!(calls.contains(&"add_channel:https://www.youtube.com/@newchannel".to_string()));
        assert!(calls.contains(&"index_channel:42".to_string()));
        // The onboarding channel list was refreshed
        assert_eq!(calls.iter().filter(|c| *c == "list_channels").count(), 2);

        let shown = messages(&controller).await;
        assert!(shown.contains(&CHANNEL_ADDED.to_string()));
        assert!(shown.contains(&"Indexed 12 videos successfully!".to_string()));
    }

    #[tokio::test]
    async fn test_background_indexing_survives_logout() {
        let (controller, api, _) = signed_in();
        controller.show_onboarding().await;

        assert!(
            controller
                .add_channel("https://www.youtube.com/@newchannel")
                .await
        );
        controller.logout().await;
        controller.wait_for_background().await;

        assert_eq!(controller.screen().await.section, Section::Welcome);
        assert_eq!(api.token_of("index_channel:42").as_deref(), Some("tok-1"));
        let shown = messages(&controller).await;
        assert!(!shown.contains(&LOGIN_REQUIRED.to_string()));
        assert!(shown.contains(&"Indexed 12 videos successfully!".to_string()));
    }

    #[tokio::test]
    async fn test_background_indexing_keeps_token_of_add() {
        let (controller, api, store) = signed_in();
        controller.show_onboarding().await;

        assert!(
            controller
                .add_channel("https://www.youtube.com/c/Example")
                .await
        );
        controller.logout().await;
        api.respond(|r| {
            r.auth = Ok(AuthResponse {
                access_token: "tok-2".to_string(),
                user: fake::user(2, "bob"),
            })
        });
        assert!(controller.login("bob", "pw").await);
        controller.wait_for_background().await;

        assert_eq!(api.token_of("index_channel:42").as_deref(), Some("tok-1"));
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-2"));
        assert_eq!(controller.screen().await.section, Section::Dashboard);
    }

    #[tokio::test]
    async fn test_add_channel_unreachable() {
        let (controller, api, _) = signed_in();
        api.respond(|r| r.add_channel = Err(unreachable()));

        assert!(
            !controller
                .add_channel("https://www.youtube.com/@newchannel")
                .await
        );
        controller.wait_for_background().await;

        assert_eq!(messages(&controller).await, vec![ADD_CHANNEL_FAILED]);
        assert!(!api.calls().iter().any(|c| c.starts_with("index_channel")));
    }

    #[tokio::test]
    async fn test_index_failure_does_not_undo_add() {
        let (controller, api, _) = signed_in();
        api.respond(|r| r.index = Err(unreachable()));
        controller.show_onboarding().await;

        assert!(
            controller
                .add_channel("https://youtube.com/channel/UC123")
                .await
        );
        controller.wait_for_background().await;

        let shown = messages(&controller).await;
        assert!(shown.contains(&CHANNEL_ADDED.to_string()));
        assert!(shown.contains(&INDEX_FAILED.to_string()));
        assert!(!api.calls().iter().any(|c| c.starts_with("delete")));
    }

    #[tokio::test]
    async fn test_add_channel_validates_url_first() {
        let (controller, api, _) = signed_in();

        assert!(!controller.add_channel("   ").await);
        assert!(!controller.add_channel("https://vimeo.com/someone").await);

        assert!(api.calls().is_empty());
        assert_eq!(
            messages(&controller).await,
            vec![CHANNEL_URL_REQUIRED, CHANNEL_URL_INVALID]
        );
    }

    #[tokio::test]
    async fn test_add_channel_server_error() {
        let (controller, api, _) = signed_in();
        api.respond(|r| r.add_channel = Err(rejected("Channel already added")));

        assert!(!controller.add_channel("https://youtube.com/c/Example").await);
        controller.wait_for_background().await;

        assert_eq!(messages(&controller).await, vec!["Channel already added"]);
        assert!(!api.calls().iter().any(|c| c.starts_with("index_channel")));
    }

    #[test]
    fn test_channel_url_shapes() {
        for url in [
            "https://www.youtube.com/channel/UCabc_123-x",
            "https://youtube.com/c/SomeName",
            "http://www.youtube.com/user/legacy",
            "https://www.youtube.com/@handle",
            "  https://m.youtube.com/@handle  ",
            "youtube.com/@handle",
            "https://www.youtube.com/@handle/videos",
            "HTTPS://WWW.YOUTUBE.COM/@Handle",
        ] {
            assert_eq!(validate_channel_url(url), Ok(()), "{}", url);
        }

        assert_eq!(validate_channel_url(""), Err(CHANNEL_URL_REQUIRED));
        for url in [
            "https://www.youtube.com/watch?v=abc",
            "https://evil.example/?youtube.com/@x",
            "https://youtube.com.evil.example/@x",
            "https://notyoutube.com/@x",
            "ftp://youtube.com/@x",
        ] {
            assert_eq!(validate_channel_url(url), Err(CHANNEL_URL_INVALID), "{}", url);
        }
    }

    #[tokio::test]
    async fn test_sync_reports_counts() {
        let (controller, api, _) = signed_in();

        assert!(controller.sync_channel(7).await);
        api.respond(|r| {
            r.sync = Ok(SyncResponse {
                message: None,
                new_videos: 4,
                auto_created_posts: 2,
            })
        });
        assert!(controller.sync_channel(7).await);

        assert_eq!(
            messages(&controller).await,
            vec![
                SYNCING,
                "Synced 3 new videos.",
                SYNCING,
                "Synced 4 new videos. 2 blog posts auto-created."
            ]
        );
        assert_eq!(api.calls(), vec!["sync_channel:7", "sync_channel:7"]);
    }

    #[tokio::test]
    async fn test_index_reports_count() {
        let (controller, api, _) = signed_in();
        api.respond(|r| {
            r.index = Ok(IndexResponse {
                message: None,
                indexed_count: 250,
            })
        });

        controller.index_channel_videos(3).await;
        assert_eq!(
            messages(&controller).await,
            vec![INDEXING, "Indexed 250 videos successfully!"]
        );
    }

    #[tokio::test]
    async fn test_generate_switches_to_posts() {
        let (controller, api, _) = signed_in();
        controller.show_videos().await;

        assert!(controller.generate_blog_post(5).await);

        let screen = controller.screen().await;
        assert_eq!(screen.content.kind(), ContentKind::BlogPosts);
        assert_eq!(
            api.calls(),
            vec!["list_videos", "generate_blog_post:5", "list_blog_posts"]
        );
        assert_eq!(messages(&controller).await, vec![GENERATING, GENERATED]);
    }

    #[tokio::test]
    async fn test_generate_failure_stays_put() {
        let (controller, api, _) = signed_in();
        controller.show_videos().await;
        api.respond(|r| r.generate = Err(unreachable()));

        assert!(!controller.generate_blog_post(5).await);
        assert_eq!(controller.screen().await.content.kind(), ContentKind::Videos);
        assert_eq!(messages(&controller).await, vec![GENERATING, GENERATE_FAILED]);
    }

    #[tokio::test]
    async fn test_publish_refreshes_visible_list() {
        let (controller, api, _) = signed_in();
        controller.show_blog_posts(Some(PostStatus::Draft)).await;

        assert!(controller.publish_blog_post(9).await);

        assert_eq!(
            api.calls(),
            vec![
                "list_blog_posts:draft",
                "publish_blog_post:9",
                "list_blog_posts:draft"
            ]
        );
        assert_eq!(messages(&controller).await, vec![PUBLISHING, PUBLISHED]);
    }

    #[tokio::test]
    async fn test_publish_elsewhere_does_not_fetch_posts() {
        let (controller, api, _) = signed_in();
        controller.show_channels().await;

        controller.publish_blog_post(9).await;
        assert_eq!(api.calls(), vec!["list_channels", "publish_blog_post:9"]);
    }

    #[tokio::test]
    async fn test_video_placeholders() {
        let (controller, api, _) = signed_in();

        controller.show_videos().await;
        let html = controller.render().await.to_html();
        assert!(html.contains(NO_VIDEOS));

        api.respond(|r| r.videos = Err(rejected("No channel found")));
        controller.load_videos().await;
        let page = controller.render().await;
        assert!(page.text_content().contains(VIDEOS_REJECTED));

        api.respond(|r| {
            r.videos = Ok(VideoList {
                videos: vec![fake::video(1, "Intro"), fake::video(2, "Deep dive")],
                pagination: None,
            })
        });
        controller.load_videos().await;
        let page = controller.render().await;
        assert_eq!(page.find_by_class("video-card").len(), 2);
    }

    #[tokio::test]
    async fn test_empty_posts_placeholder() {
        let (controller, api, _) = signed_in();
        api.respond(|r| {
            r.posts = Ok(BlogPostList {
                posts: Vec::new(),
                pagination: None,
            })
        });

        controller.show_blog_posts(None).await;
        let page = controller.render().await;
        assert!(page.text_content().contains(NO_POSTS));
        assert!(page.find_by_class("blog-post-card").is_empty());
    }

    #[tokio::test]
    async fn test_channel_list_rendering() {
        let (controller, api, _) = signed_in();
        let mut channel = fake::channel(1, "T");
        channel.description = Some("D".repeat(200));
        api.respond(|r| {
            r.channels = Ok(ChannelList {
                channels: vec![channel],
            })
        });

        controller.show_channels().await;
        let text = controller.render().await.text_content();
        assert!(text.contains(&format!("{}...", "D".repeat(100))));
        assert!(!text.contains(&"D".repeat(101)));
        assert!(text.contains("1,000"));
        assert!(text.contains("100,000"));
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let (controller, api, _) = signed_in();
        let gate = api.gate_videos();

        let slow = controller.clone();
        let task = tokio::spawn(async move { slow.show_videos().await });

        while !api.calls().contains(&"list_videos".to_string()) {
            tokio::task::yield_now().await;
        }

        controller.show_blog_posts(None).await;
        gate.notify_one();
        task.await.unwrap();

        let screen = controller.screen().await;
        assert_eq!(screen.content.kind(), ContentKind::BlogPosts);
        assert!(matches!(
            screen.content,
            DashboardContent::BlogPosts {
                posts: Loadable::Ready(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_actions_without_session_ask_for_login() {
        let (controller, api, _) = setup();

        controller.show_videos().await;
        assert!(!controller.publish_blog_post(1).await);

        assert!(api.calls().is_empty());
        assert_eq!(controller.screen().await.section, Section::Login);
        assert_eq!(
            messages(&controller).await,
            vec![LOGIN_REQUIRED, LOGIN_REQUIRED]
        );
    }

    #[tokio::test]
    async fn test_view_video_and_edit_post() {
        let (controller, api, _) = signed_in();

        controller.view_video(1).await;
        let screen = controller.screen().await;
        assert!(matches!(
            screen.content,
            DashboardContent::VideoDetail {
                video_id: 1,
                video: Loadable::Ready(_)
            }
        ));

        api.respond(|r| r.video = Err(rejected("Video not found")));
        controller.view_video(99).await;
        let text = controller.render().await.text_content();
        assert!(text.contains("Video not found"));

        controller.edit_blog_post(1).await;
        let page = controller.render().await;
        assert_eq!(
            page.find_by_id("postTitle").and_then(|e| e.get_attr("value")),
            Some("First post")
        );
    }

    #[tokio::test]
    async fn test_save_returns_to_list() {
        let (controller, api, _) = signed_in();
        controller.edit_blog_post(1).await;

        assert!(!controller.save_blog_post(1, &BlogPostUpdate::default()).await);

        let update = BlogPostUpdate {
            title: Some("Better title".to_string()),
            ..Default::default()
        };
        assert!(controller.save_blog_post(1, &update).await);

        assert_eq!(
            api.calls(),
            vec!["get_blog_post:1", "update_blog_post:1", "list_blog_posts"]
        );
        assert_eq!(controller.screen().await.content.kind(), ContentKind::BlogPosts);
        assert_eq!(messages(&controller).await, vec![NOTHING_TO_SAVE, POST_UPDATED]);
    }

    #[tokio::test]
    async fn test_delete_refreshes_list() {
        let (controller, api, _) = signed_in();
        controller.show_blog_posts(None).await;

        assert!(controller.delete_blog_post(4).await);
        api.respond(|r| r.delete = Err(rejected("Blog post not found")));
        assert!(!controller.delete_blog_post(4).await);

        assert_eq!(
            api.calls(),
            vec![
                "list_blog_posts",
                "delete_blog_post:4",
                "list_blog_posts",
                "delete_blog_post:4"
            ]
        );
        assert_eq!(
            messages(&controller).await,
            vec![POST_DELETED, "Blog post not found"]
        );
    }

    #[tokio::test]
    async fn test_refresh_without_matching_view_is_noop() {
        let (controller, api, _) = signed_in();
        controller.show_videos().await;

        controller.load_blog_posts().await;
        controller.load_channels().await;
        assert_eq!(api.calls(), vec!["list_videos"]);
    }

    #[tokio::test]
    async fn test_video_paging_keeps_channel_filter() {
        let (controller, api, _) = signed_in();
        api.respond(|r| {
            r.videos = Ok(VideoList {
                videos: vec![fake::video(1, "Intro")],
                pagination: Some(fake::pagination(1, 2)),
            })
        });

        controller.show_channel_videos(7).await;
        controller.go_to_page(2).await;
        controller.load_videos().await;

        assert_eq!(
            api.calls(),
            vec![
                "list_videos:channel_id=7",
                "list_videos:page=2,channel_id=7",
                "list_videos:page=2,channel_id=7"
            ]
        );
        match controller.screen().await.content {
            DashboardContent::Videos {
                query, pagination, ..
            } => {
                assert_eq!(query, VideoQuery::for_channel(7).with_page(2));
                assert_eq!(pagination, Some(fake::pagination(1, 2)));
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_videos() {
        let (controller, api, _) = signed_in();

        controller.search_videos("   ", 1).await;
        assert!(api.calls().is_empty());
        assert_eq!(messages(&controller).await, vec![SEARCH_QUERY_REQUIRED]);

        api.respond(|r| {
            r.search = Ok(SearchResults {
                videos: vec![fake::video(3, "Rust & async")],
                pagination: Some(fake::pagination(1, 2)),
                query: "rust".to_string(),
            })
        });
        controller.search_videos(" rust ", 0).await;
        controller.go_to_page(2).await;

        assert_eq!(
            api.calls(),
            vec!["search_videos:rust:1", "search_videos:rust:2"]
        );
        let page = controller.render().await;
        assert_eq!(page.find_by_class("video-card").len(), 1);
        assert!(matches!(
            controller.screen().await.content,
            DashboardContent::SearchResults { page: 2, .. }
        ));
    }

    #[tokio::test]
    async fn test_post_paging_keeps_status_filter() {
        let (controller, api, _) = signed_in();

        controller.show_blog_posts(Some(PostStatus::Draft)).await;
        controller.go_to_page(2).await;
        controller.publish_blog_post(9).await;

        assert_eq!(
            api.calls(),
            vec![
                "list_blog_posts:draft",
                "list_blog_posts:draft,page=2",
                "publish_blog_post:9",
                "list_blog_posts:draft,page=2"
            ]
        );
    }

    #[tokio::test]
    async fn test_go_to_page_without_paged_list_is_noop() {
        let (controller, api, _) = signed_in();
        controller.view_video(1).await;

        controller.go_to_page(2).await;
        assert_eq!(api.calls(), vec!["get_video:1"]);
    }

    #[tokio::test]
    async fn test_process_video_updates_open_detail() {
        let (controller, api, _) = signed_in();
        controller.view_video(1).await;

        let mut processed = fake::video(1, "First video");
        processed.summary = Some("Short summary".to_string());
        processed.blog_ready = true;
        api.respond(|r| {
            r.process = Ok(ProcessVideoResponse {
                message: None,
                video: Some(processed.clone()),
            })
        });

        assert!(controller.process_video(1).await);
        assert_eq!(messages(&controller).await, vec![PROCESSING, VIDEO_PROCESSED]);
        match controller.screen().await.content {
            DashboardContent::VideoDetail {
                video: Loadable::Ready(video),
                ..
            } => assert!(video.blog_ready),
            other => panic!("unexpected content {:?}", other),
        }
        assert!(controller.render().await.text_content().contains("Short summary"));

        api.respond(|r| r.process = Err(unreachable()));
        assert!(!controller.process_video(1).await);
        assert!(messages(&controller).await.contains(&PROCESS_FAILED.to_string()));
    }

    #[tokio::test]
    async fn test_show_suggestions() {
        let (controller, api, _) = signed_in();
        controller.show_suggestions(4).await;

        assert_eq!(api.calls(), vec!["video_suggestions:4"]);
        assert_eq!(
            controller.screen().await.content.kind(),
            ContentKind::Suggestions
        );

        api.respond(|r| r.suggestions = Err(rejected("Video not found")));
        controller.show_suggestions(99).await;
        let text = controller.render().await.text_content();
        assert!(text.contains("Video not found"));
    }

    #[tokio::test]
    async fn test_bulk_generate() {
        let (controller, api, _) = signed_in();

        assert!(!controller.bulk_generate_blog_posts(&[]).await);
        assert!(api.calls().is_empty());

        api.respond(|r| {
            r.bulk_generate = Ok(BulkGenerateResponse {
                message: Some("Generated 2 blog posts".to_string()),
                posts: vec![
                    fake::post(1, "One", PostStatus::Draft),
                    fake::post(2, "Two", PostStatus::Draft),
                ],
            })
        });
        assert!(controller.bulk_generate_blog_posts(&[1, 2, 3]).await);

        assert_eq!(api.calls(), vec!["bulk_generate:1,2,3", "list_blog_posts"]);
        assert_eq!(
            controller.screen().await.content.kind(),
            ContentKind::BlogPosts
        );
        assert_eq!(
            messages(&controller).await,
            vec![
                VIDEOS_REQUIRED,
                BULK_GENERATING,
                "Generated 2 blog posts successfully!"
            ]
        );

        api.respond(|r| r.bulk_generate = Err(rejected("Some videos not found or not accessible")));
        assert!(!controller.bulk_generate_blog_posts(&[5]).await);
        assert!(messages(&controller)
            .await
            .contains(&"Some videos not found or not accessible".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_notifications_expire_without_further_action() {
        let (controller, _, _) = signed_in();
        controller.sync_channel(1).await;
        assert_eq!(messages(&controller).await.len(), 2);

        tokio::time::sleep(Duration::from_millis(4999)).await;
        assert_eq!(messages(&controller).await.len(), 2);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(messages(&controller).await.is_empty());
        assert!(controller
            .render()
            .await
            .find_by_class("alert-dismissible")
            .is_empty());
    }

    #[tokio::test]
    async fn test_dismiss_notification() {
        let (controller, _, _) = setup();
        controller.logout().await;

        let id = controller.screen().await.notifications[0].id;
        assert!(controller.dismiss_notification(id).await);
        assert!(messages(&controller).await.is_empty());
    }
}
